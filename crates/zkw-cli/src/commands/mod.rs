//! Command implementations.

mod key;
#[cfg(feature = "native")]
mod prove;
mod secret;
mod validate;

pub use key::{key_clear, key_import, key_status};
#[cfg(feature = "native")]
pub use prove::prove;
pub use secret::SecretSource;
pub use validate::{validate_address, validate_amount, validate_key};
