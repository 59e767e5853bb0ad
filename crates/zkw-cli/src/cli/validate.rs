//! Input validation subcommands.

use super::key::KeyInputArgs;

/// Validation command group.
#[derive(Debug, clap::Subcommand)]
pub enum ValidateCommands {
    /// Check a recipient address (40 hex characters, optional 0x prefix).
    Address {
        /// Address to check.
        address: String,
    },
    /// Check a transfer amount and print it in base units.
    Amount {
        /// Amount in whole tokens, up to 18 decimal places.
        amount: String,
    },
    /// Check a private key without storing it.
    Key {
        /// Key input.
        #[command(flatten)]
        args: KeyInputArgs,
    },
}
