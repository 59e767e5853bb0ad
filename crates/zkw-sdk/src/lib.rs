//! Wallet workflow for the ZKW proof-authenticated wallet.
//!
//! A [`Wallet`] validates user input, loads the key from a [`SecureKeyStore`] and hands the spend
//! to a [`TransactionSubmitter`], which builds the user operation through a [`ChainClient`],
//! proves it, submits it, and polls for confirmation.

pub mod chain;
pub mod config;
pub mod key_store;
pub mod poller;
pub mod submitter;
pub mod wallet;

pub use chain::{ChainClient, ChainError};
pub use config::{
    ConfigError, ConfirmationPolicy, ValidatedConfirmationPolicy, ValidatedWalletConfig,
    WalletConfig,
};
pub use key_store::{FileKeyStore, KeyStoreError, SecureKeyStore};
pub use poller::{ConfirmationStatus, poll_confirmation};
pub use submitter::{SpendRequest, TransactionError, TransactionSubmitter};
pub use wallet::{Wallet, WalletError};
