//! Wallet facade tying key storage, input validation and the submitter together.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;
use zkw_core::base::{PrivateKey, RecipientAddress};
use zkw_core::schema::operation::{TransactionLog, TxHash};
use zkw_core::schema::phase::PhaseChange;
use zkw_core::{ValidationError, parse_amount, parse_private_key, parse_recipient_address};
use zkw_prover::{NativeProver, NativeProverBridge};

use crate::chain::{ChainClient, ChainError};
use crate::config::ValidatedWalletConfig;
use crate::key_store::{KeyStoreError, SecureKeyStore};
use crate::submitter::{SpendRequest, TransactionError, TransactionSubmitter};

/// Errors surfaced to the wallet's caller.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// User input was rejected; nothing was started.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// No key has been imported.
    #[error("no private key stored")]
    KeyNotFound,
    /// The key store failed.
    #[error(transparent)]
    KeyStore(#[from] KeyStoreError),
    /// The send attempt failed.
    #[error(transparent)]
    Transaction(#[from] TransactionError),
    /// A read-only chain query failed.
    #[error(transparent)]
    Chain(#[from] ChainError),
}

/// One account: a stored key plus a submitter for its transfers.
pub struct Wallet<S, C, P> {
    store: S,
    submitter: TransactionSubmitter<C, P>,
    config: ValidatedWalletConfig,
}

impl<S, C, P> Wallet<S, C, P>
where
    S: SecureKeyStore,
    C: ChainClient,
    P: NativeProver + 'static,
{
    /// Wallet over `store`, sending through `client` and proving with `bridge`.
    #[must_use]
    pub fn new(
        store: S,
        client: Arc<C>,
        bridge: NativeProverBridge<P>,
        config: ValidatedWalletConfig,
    ) -> Self {
        let submitter = TransactionSubmitter::new(client, bridge, config.confirmation());
        Self {
            store,
            submitter,
            config,
        }
    }

    /// Validate `text` as a private key and store it, replacing any previous key.
    ///
    /// # Errors
    /// If the key is invalid or cannot be stored.
    pub fn import_key(&self, text: &str) -> Result<(), WalletError> {
        let key = parse_private_key(text)?;
        self.store.set(&key)?;
        Ok(())
    }

    /// Whether a valid key is stored.
    #[must_use]
    pub fn has_key(&self) -> bool {
        self.store.get().is_some()
    }

    /// Remove the stored key.
    ///
    /// # Errors
    /// If the key store cannot be cleared.
    pub fn clear(&self) -> Result<(), WalletError> {
        self.store.clear()?;
        info!("Wallet cleared");
        Ok(())
    }

    /// Phase notifications for every send attempt.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PhaseChange> {
        self.submitter.subscribe()
    }

    fn key(&self) -> Result<PrivateKey, WalletError> {
        self.store.get().ok_or(WalletError::KeyNotFound)
    }

    /// Validate the inputs, load the key, and run one send attempt.
    ///
    /// Validation and key loading happen before the attempt starts, so their errors never
    /// produce phase notifications.
    ///
    /// # Errors
    /// On invalid input, a missing key, or a failed attempt.
    pub async fn send(&self, recipient: &str, amount: &str) -> Result<TxHash, WalletError> {
        let recipient = parse_recipient_address(recipient)?;
        let amount = parse_amount(amount)?;
        let key = self.key()?;

        let hash = self
            .submitter
            .send(&key, SpendRequest { recipient, amount })
            .await?;
        Ok(hash)
    }

    /// Smart-account address derived from the stored key, the event id and the factory.
    ///
    /// # Errors
    /// If no key is stored or the chain query fails.
    pub async fn account_address(&self) -> Result<RecipientAddress, WalletError> {
        let key = self.key()?;
        let address = self
            .submitter
            .client()
            .predicted_address(&key, self.config.event_id, self.config.factory())
            .await?;
        Ok(address)
    }

    /// Balance of the smart account in the smallest unit.
    ///
    /// # Errors
    /// If no key is stored or a chain query fails.
    pub async fn balance(&self) -> Result<String, WalletError> {
        let address = self.account_address().await?;
        Ok(self.submitter.client().balance(&address).await?)
    }

    /// A page of the smart account's outgoing transfers.
    ///
    /// # Errors
    /// If no key is stored or a chain query fails.
    pub async fn history(
        &self,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<TransactionLog>, WalletError> {
        let address = self.account_address().await?;
        Ok(self
            .submitter
            .client()
            .history(&address, offset, limit)
            .await?)
    }
}
