//! Command-line interface for the `zkw` CLI application.

pub mod constants;
mod key;
#[cfg(feature = "native")]
mod prove;
mod validate;

use clap::Parser;

pub use self::key::KeyCommands;
#[cfg(feature = "native")]
pub use self::prove::ProveArgs;
pub use self::validate::ValidateCommands;

/// Command-line interface definition.
#[derive(Debug, Parser)]
#[command(name = "zkw")]
#[command(about = "Proof-authenticated wallet tools")]
pub struct Cli {
    /// CLI top-level command group.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level command groups.
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Private key storage.
    Key {
        /// Key subcommands.
        #[command(subcommand)]
        command: KeyCommands,
    },
    /// Check wallet inputs the way a send would.
    Validate {
        /// Validation subcommands.
        #[command(subcommand)]
        command: ValidateCommands,
    },
    /// Generate an authorization proof from an input file.
    #[cfg(feature = "native")]
    Prove {
        /// Prove arguments.
        #[command(flatten)]
        args: ProveArgs,
    },
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::commands::SecretSource;

    #[test]
    fn key_import_defaults_to_prompt() {
        let cli = Cli::try_parse_from(["zkw", "key", "import"]).expect("parses");
        let Commands::Key {
            command: KeyCommands::Import { args },
        } = cli.command
        else {
            panic!("expected key import");
        };
        assert_eq!(args.store.store, Path::new(constants::DEFAULT_KEY_STORE));
        assert!(matches!(args.input.source(), SecretSource::Prompt));
    }

    #[test]
    fn key_file_and_stdin_are_exclusive() {
        let res = Cli::try_parse_from([
            "zkw",
            "key",
            "import",
            "--key-file",
            "key.txt",
            "--key-stdin",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn key_stdin_wins_source_resolution() {
        let cli =
            Cli::try_parse_from(["zkw", "validate", "key", "--key-stdin"]).expect("parses");
        let Commands::Validate {
            command: ValidateCommands::Key { args },
        } = cli.command
        else {
            panic!("expected validate key");
        };
        assert!(matches!(args.source(), SecretSource::Stdin));
    }

    #[test]
    fn store_can_be_overridden() {
        let cli =
            Cli::try_parse_from(["zkw", "key", "status", "--store", "/tmp/k"]).expect("parses");
        let Commands::Key {
            command: KeyCommands::Status { args },
        } = cli.command
        else {
            panic!("expected key status");
        };
        assert_eq!(args.store, Path::new("/tmp/k"));
    }

    #[cfg(feature = "native")]
    #[test]
    fn prove_requires_one_proving_key() {
        assert!(Cli::try_parse_from(["zkw", "prove", "--circuit", "auth.wasm"]).is_err());
        assert!(
            Cli::try_parse_from([
                "zkw",
                "prove",
                "--circuit",
                "auth.wasm",
                "--proving-key-file",
                "auth.zkey",
                "--proving-key-name",
                "auth.zkey",
            ])
            .is_err()
        );
        assert!(
            Cli::try_parse_from([
                "zkw",
                "prove",
                "--circuit",
                "auth.wasm",
                "--proving-key-name",
                "auth.zkey",
            ])
            .is_ok()
        );
    }
}
