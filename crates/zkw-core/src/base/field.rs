//! Elements of the BN254 base field used by the authorization circuit.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use num_bigint::BigUint;

/// Base-10 rendering of the field modulus Q.
pub const FIELD_MODULUS_DECIMAL: &str =
    "21888242871839275222246405745257275088696311157297823662689037894645226208583";

/// The field modulus Q (`0x30644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd47`).
pub static FIELD_MODULUS: LazyLock<BigUint> = LazyLock::new(|| {
    BigUint::from_slice(&[
        0xd87c_fd47,
        0x3c20_8c16,
        0x6871_ca8d,
        0x9781_6a91,
        0x8181_585d,
        0xb850_45b6,
        0xe131_a029,
        0x3064_4e72,
    ])
});

/// Errors raised when building a [`FieldElement`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The text is not a plain base-10 integer.
    #[error("not a base-10 integer: {0:?}")]
    NotDecimal(String),
    /// The value is greater than or equal to the field modulus.
    #[error("value is not below the field modulus")]
    OutOfRange,
}

/// Parse a plain base-10 integer made only of ASCII digits.
///
/// Signs, separators and whitespace are rejected; the wire formats never carry them.
#[must_use]
pub fn parse_decimal(text: &str) -> Option<BigUint> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigUint::parse_bytes(text.as_bytes(), 10)
}

/// A non-negative integer strictly below [`FIELD_MODULUS`].
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldElement(BigUint);

impl FieldElement {
    /// Wrap `value` after checking it is below the modulus.
    ///
    /// # Errors
    /// [`FieldError::OutOfRange`] if `value >= Q`.
    pub fn new(value: BigUint) -> Result<Self, FieldError> {
        if value < *FIELD_MODULUS {
            Ok(Self(value))
        } else {
            Err(FieldError::OutOfRange)
        }
    }

    /// Parse a base-10 string into a field element.
    ///
    /// # Errors
    /// If the text is not a decimal integer or the value is not below Q.
    pub fn from_decimal(text: &str) -> Result<Self, FieldError> {
        let value = parse_decimal(text).ok_or_else(|| FieldError::NotDecimal(text.to_owned()))?;
        Self::new(value)
    }

    /// The underlying integer.
    #[must_use]
    pub const fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// Consume the element and return the underlying integer.
    #[must_use]
    pub fn into_biguint(self) -> BigUint {
        self.0
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl TryFrom<BigUint> for FieldElement {
    type Error = FieldError;

    fn try_from(value: BigUint) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for FieldElement {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_decimal(s)
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({})", self.0)
    }
}
