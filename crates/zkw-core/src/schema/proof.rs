//! Groth16 proof payloads as produced by the native prover.

use serde::{Deserialize, Serialize};

/// Protocol tag every accepted proof must carry.
pub const PROTOCOL_TAG: &str = "groth16";

/// Schema violations in an otherwise well-formed proof payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProofSchemaError {
    /// The protocol tag is not [`PROTOCOL_TAG`].
    #[error("unexpected protocol tag {0:?}, expected \"groth16\"")]
    UnexpectedProtocol(String),
    /// A coordinate or signal is not a base-10 integer.
    #[error("{field} contains a non-decimal value {value:?}")]
    NotDecimal {
        /// Which part of the payload.
        field: &'static str,
        /// The offending text.
        value: String,
    },
    /// A field is missing, has the wrong arity, or has the wrong JSON type.
    #[error("unexpected payload shape: {0}")]
    Shape(String),
}

fn is_decimal(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn check_decimal<'a>(
    field: &'static str,
    values: impl IntoIterator<Item = &'a String>,
) -> Result<(), ProofSchemaError> {
    match values.into_iter().find(|v| !is_decimal(v)) {
        Some(value) => Err(ProofSchemaError::NotDecimal {
            field,
            value: value.clone(),
        }),
        None => Ok(()),
    }
}

/// A Groth16 proof: three curve-point groups and a protocol tag.
///
/// The fixed-size arrays enforce the arities on deserialization; field order matches the wire
/// format `{"pi_a":[..],"pi_b":[[..],..],"pi_c":[..],"protocol":".."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// Point A, projective coordinates.
    pub pi_a: [String; 3],
    /// Point B, three pairs of extension-field coordinates.
    pub pi_b: [[String; 2]; 3],
    /// Point C, projective coordinates.
    pub pi_c: [String; 3],
    /// Proving system identifier.
    pub protocol: String,
}

impl Proof {
    /// Check the protocol tag and that every coordinate is a decimal string.
    ///
    /// # Errors
    /// The first violation found.
    pub fn check(&self) -> Result<(), ProofSchemaError> {
        if self.protocol != PROTOCOL_TAG {
            return Err(ProofSchemaError::UnexpectedProtocol(self.protocol.clone()));
        }
        check_decimal("pi_a", &self.pi_a)?;
        check_decimal("pi_b", self.pi_b.iter().flatten())?;
        check_decimal("pi_c", &self.pi_c)
    }

    /// Compact JSON encoding submitted alongside the user operation.
    ///
    /// # Errors
    /// If serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Ordered public outputs of the circuit. The order is part of the verification contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicSignals(Vec<String>);

impl PublicSignals {
    /// Wrap signals in prover order.
    #[must_use]
    pub const fn new(signals: Vec<String>) -> Self {
        Self(signals)
    }

    /// Check that every signal is a decimal string.
    ///
    /// # Errors
    /// The first non-decimal signal.
    pub fn check(&self) -> Result<(), ProofSchemaError> {
        check_decimal("public signals", &self.0)
    }

    /// Signals in prover order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of signals.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no signals.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A proof together with its public signals, only ever built whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZkProof {
    proof: Proof,
    public_signals: PublicSignals,
}

impl ZkProof {
    /// Pair a proof with its signals after checking both.
    ///
    /// # Errors
    /// If either part violates the schema.
    pub fn new(proof: Proof, public_signals: PublicSignals) -> Result<Self, ProofSchemaError> {
        proof.check()?;
        public_signals.check()?;
        Ok(Self {
            proof,
            public_signals,
        })
    }

    /// The proof.
    #[must_use]
    pub const fn proof(&self) -> &Proof {
        &self.proof
    }

    /// The public signals.
    #[must_use]
    pub const fn public_signals(&self) -> &PublicSignals {
        &self.public_signals
    }

    /// Split into parts.
    #[must_use]
    pub fn into_parts(self) -> (Proof, PublicSignals) {
        (self.proof, self.public_signals)
    }
}
