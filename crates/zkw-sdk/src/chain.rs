//! Contract consumed from the blockchain client.

use zkw_core::base::{Amount, PrivateKey, RecipientAddress};
use zkw_core::schema::auth_input::AuthMaterial;
use zkw_core::schema::operation::{TransactionLog, TxHash, UserOperation};

/// Errors reported by a [`ChainClient`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    /// The node or relay could not be reached.
    #[error("chain transport failed: {0}")]
    Transport(String),
    /// The relay refused the operation.
    #[error("operation rejected: {0}")]
    Rejected(String),
    /// The response could not be understood.
    #[error("malformed chain response: {0}")]
    Malformed(String),
}

/// Blockchain client building, submitting and tracking user operations.
///
/// User operations are opaque to the wallet; the client both produces and consumes them.
pub trait ChainClient: Send + Sync {
    /// Build an unsigned user operation transferring `amount` to `recipient`.
    fn build_user_operation(
        &self,
        key: &PrivateKey,
        recipient: &RecipientAddress,
        amount: &Amount,
    ) -> impl Future<Output = Result<UserOperation, ChainError>> + Send;

    /// Event identifier, message hash and signature components bound to `operation`.
    fn auth_material(
        &self,
        key: &PrivateKey,
        operation: &UserOperation,
    ) -> impl Future<Output = Result<AuthMaterial, ChainError>> + Send;

    /// Submit `operation` together with its serialized Groth16 proof.
    fn submit(
        &self,
        operation: UserOperation,
        proof_json: String,
    ) -> impl Future<Output = Result<TxHash, ChainError>> + Send;

    /// Whether the operation identified by `hash` has been included on chain.
    fn is_confirmed(&self, hash: &TxHash)
    -> impl Future<Output = Result<bool, ChainError>> + Send;

    /// Balance of `account` in the smallest unit, base-10.
    fn balance(
        &self,
        account: &RecipientAddress,
    ) -> impl Future<Output = Result<String, ChainError>> + Send;

    /// Outgoing transfers of `account`, newest first.
    fn history(
        &self,
        account: &RecipientAddress,
        offset: u32,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<TransactionLog>, ChainError>> + Send;

    /// Smart-account address the factory deploys for `key` and `event_id`.
    fn predicted_address(
        &self,
        key: &PrivateKey,
        event_id: u64,
        factory: &RecipientAddress,
    ) -> impl Future<Output = Result<RecipientAddress, ChainError>> + Send;
}
