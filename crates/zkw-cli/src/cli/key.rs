//! Key storage subcommands.

use std::path::PathBuf;

use clap::ArgGroup;

use super::constants::{DEFAULT_KEY_STORE, ZKW_KEY_FILE, ZKW_KEY_STDIN, ZKW_KEY_STORE};
use crate::commands::SecretSource;

/// Where the key store lives.
#[derive(Debug, clap::Args)]
pub struct StoreArgs {
    /// File holding the stored private key.
    #[arg(long, env = ZKW_KEY_STORE, default_value = DEFAULT_KEY_STORE)]
    pub store: PathBuf,
}

/// Where private key text is read from. Prompts when neither is given.
#[derive(Debug, clap::Args)]
#[command(group(
    ArgGroup::new("key_input")
        .args(["key_file", "key_stdin"])
        .multiple(false)
))]
pub struct KeyInputArgs {
    /// Read the private key from a file.
    #[arg(long, env = ZKW_KEY_FILE)]
    pub key_file: Option<PathBuf>,

    /// Read the private key from stdin.
    #[arg(long, env = ZKW_KEY_STDIN, default_value_t = false)]
    pub key_stdin: bool,
}

impl KeyInputArgs {
    /// Resolve the flags into a single source.
    pub fn source(self) -> SecretSource {
        if self.key_stdin {
            SecretSource::Stdin
        } else if let Some(path) = self.key_file {
            SecretSource::File(path)
        } else {
            SecretSource::Prompt
        }
    }
}

/// Arguments for `zkw key import`.
#[derive(Debug, clap::Args)]
pub struct ImportArgs {
    /// Key store.
    #[command(flatten)]
    pub store: StoreArgs,

    /// Key input.
    #[command(flatten)]
    pub input: KeyInputArgs,
}

/// Key command group.
#[derive(Debug, clap::Subcommand)]
pub enum KeyCommands {
    /// Validate a private key (decimal or 0x hex) and store it.
    Import {
        /// Import arguments.
        #[command(flatten)]
        args: ImportArgs,
    },
    /// Report whether a valid key is stored.
    Status {
        /// Key store.
        #[command(flatten)]
        args: StoreArgs,
    },
    /// Remove the stored key.
    Clear {
        /// Key store.
        #[command(flatten)]
        args: StoreArgs,
    },
}
