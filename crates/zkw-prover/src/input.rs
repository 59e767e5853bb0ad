//! Assembly of the authorization circuit inputs.

use num_bigint::BigUint;
use zkw_core::base::{FieldElement, PrivateKey};
use zkw_core::schema::auth_input::{AuthMaterial, AuthProofInput};

/// A scalar handed to the builder is not below the field modulus.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("proof input {input} is not below the field modulus")]
pub struct InputRangeError {
    /// Wire name of the offending input.
    pub input: &'static str,
}

/// Builds [`AuthProofInput`] values for one spend attempt.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProofInputBuilder;

impl ProofInputBuilder {
    /// Combine the key scalar with the auth material derived for the pending user operation.
    ///
    /// Event identifier and message hash pass through unchanged.
    ///
    /// # Errors
    /// [`InputRangeError`] naming the first scalar that is not below Q.
    pub fn build(
        key: &PrivateKey,
        material: AuthMaterial,
    ) -> Result<AuthProofInput, InputRangeError> {
        let AuthMaterial {
            event_id,
            message_hash,
            signature_r8x,
            signature_r8y,
            signature_s,
        } = material;

        Ok(AuthProofInput {
            sk_i: key.scalar().clone(),
            event_id: in_range("eventID", event_id)?,
            message_hash: in_range("messageHash", message_hash)?,
            signature_r8x: in_range("signatureR8x", signature_r8x)?,
            signature_r8y: in_range("signatureR8y", signature_r8y)?,
            signature_s: in_range("signatureS", signature_s)?,
        })
    }
}

fn in_range(input: &'static str, value: BigUint) -> Result<FieldElement, InputRangeError> {
    FieldElement::new(value).map_err(|_| InputRangeError { input })
}
