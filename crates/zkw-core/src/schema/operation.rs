//! Opaque chain-client handles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An unsigned spend request produced and consumed by the chain client.
///
/// The wallet core never looks inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserOperation(String);

impl UserOperation {
    /// Wrap an encoded user operation.
    #[must_use]
    pub const fn new(encoded: String) -> Self {
        Self(encoded)
    }

    /// The encoded operation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the handle and return the encoded operation.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Hash of a submitted user operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(String);

impl TxHash {
    /// Wrap a hash returned by the relay.
    #[must_use]
    pub const fn new(hash: String) -> Self {
        Self(hash)
    }

    /// The hash text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One outgoing transfer in the account history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionLog {
    /// Recipient address.
    pub to: String,
    /// Amount in the smallest unit, base-10.
    pub amount: String,
    /// Unix timestamp in seconds.
    pub time: u64,
}
