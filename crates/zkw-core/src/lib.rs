//! ZKW base primitives and wire schemas.

/// Field elements, keys, addresses and amounts.
pub mod base;
/// Serialized wire formats shared with the prover and the chain client.
pub mod schema;
/// Validation of user-supplied key, address and amount text.
pub mod validation;

pub use validation::{ValidationError, parse_amount, parse_private_key, parse_recipient_address};
