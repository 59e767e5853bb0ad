//! Inputs of the identity-authorization circuit.

use std::fmt;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::base::FieldElement;

/// The six field-element inputs of the authorization circuit.
///
/// Serializes to a JSON object with exactly the keys `sk_i`, `eventID`, `messageHash`,
/// `signatureR8x`, `signatureR8y` and `signatureS`, each a base-10 string.
#[serde_as]
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthProofInput {
    /// Secret key scalar.
    #[serde(rename = "sk_i")]
    #[serde_as(as = "DisplayFromStr")]
    pub sk_i: FieldElement,
    /// Event identifier bound into the proof.
    #[serde(rename = "eventID")]
    #[serde_as(as = "DisplayFromStr")]
    pub event_id: FieldElement,
    /// Hash of the user operation being authorized.
    #[serde(rename = "messageHash")]
    #[serde_as(as = "DisplayFromStr")]
    pub message_hash: FieldElement,
    /// Signature point `R8`, x coordinate.
    #[serde(rename = "signatureR8x")]
    #[serde_as(as = "DisplayFromStr")]
    pub signature_r8x: FieldElement,
    /// Signature point `R8`, y coordinate.
    #[serde(rename = "signatureR8y")]
    #[serde_as(as = "DisplayFromStr")]
    pub signature_r8y: FieldElement,
    /// Signature scalar `S`.
    #[serde(rename = "signatureS")]
    #[serde_as(as = "DisplayFromStr")]
    pub signature_s: FieldElement,
}

impl AuthProofInput {
    /// Compact JSON encoding handed to the witness generator.
    ///
    /// # Errors
    /// If serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decode the JSON encoding, range-checking every value.
    ///
    /// # Errors
    /// If a key is missing or unknown, or a value is not a decimal below the modulus.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl fmt::Debug for AuthProofInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthProofInput")
            .field("sk_i", &"..")
            .field("event_id", &self.event_id)
            .field("message_hash", &self.message_hash)
            .field("signature_r8x", &self.signature_r8x)
            .field("signature_r8y", &self.signature_r8y)
            .field("signature_s", &self.signature_s)
            .finish()
    }
}

/// Authorization material the chain client derives for one pending user operation.
///
/// Values are not range-checked here; the proof input builder does that.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthMaterial {
    /// Event identifier.
    #[serde(rename = "eventID")]
    #[serde_as(as = "DisplayFromStr")]
    pub event_id: BigUint,
    /// Hash of the user operation.
    #[serde(rename = "messageHash")]
    #[serde_as(as = "DisplayFromStr")]
    pub message_hash: BigUint,
    /// Signature point `R8`, x coordinate.
    #[serde(rename = "signatureR8x")]
    #[serde_as(as = "DisplayFromStr")]
    pub signature_r8x: BigUint,
    /// Signature point `R8`, y coordinate.
    #[serde(rename = "signatureR8y")]
    #[serde_as(as = "DisplayFromStr")]
    pub signature_r8y: BigUint,
    /// Signature scalar `S`.
    #[serde(rename = "signatureS")]
    #[serde_as(as = "DisplayFromStr")]
    pub signature_s: BigUint,
}
