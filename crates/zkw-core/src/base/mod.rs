//! Foundational primitive types.

mod address;
mod amount;
mod field;
mod key;

pub use address::{ADDRESS_HEX_LEN, ADDRESS_SIZE, RecipientAddress};
pub use amount::{AMOUNT_DECIMALS, Amount};
pub use field::{FIELD_MODULUS, FIELD_MODULUS_DECIMAL, FieldElement, FieldError, parse_decimal};
pub use key::{MIN_PRIVATE_KEY_BITS, PrivateKey};
