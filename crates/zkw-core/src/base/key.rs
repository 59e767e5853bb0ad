//! Wallet private key scalar.

use std::fmt;

use super::field::FieldElement;

/// A private key must be at least `2^127`.
pub const MIN_PRIVATE_KEY_BITS: u64 = 127;

/// A validated private-key scalar in `[2^127, Q)`.
///
/// The scalar is held in plain memory and is not zeroized on drop.
/// Build one with [`crate::parse_private_key`].
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey(FieldElement);

impl PrivateKey {
    pub(crate) const fn from_validated(scalar: FieldElement) -> Self {
        Self(scalar)
    }

    /// The key as a field element.
    #[must_use]
    pub const fn scalar(&self) -> &FieldElement {
        &self.0
    }

    /// Base-10 rendering used by the key store and the chain client.
    #[must_use]
    pub fn to_decimal(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}
