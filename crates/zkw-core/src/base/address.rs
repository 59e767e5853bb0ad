//! Recipient account addresses.

use std::fmt;

/// Address length in bytes.
pub const ADDRESS_SIZE: usize = 20;
/// Address length in hex characters, without prefix.
pub const ADDRESS_HEX_LEN: usize = 40;

/// A 20-byte recipient address. Build one with [`crate::parse_recipient_address`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecipientAddress([u8; ADDRESS_SIZE]);

impl RecipientAddress {
    pub(crate) const fn from_bytes(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }

    /// Raw address bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }
}

impl fmt::Display for RecipientAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for RecipientAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecipientAddress({self})")
    }
}
