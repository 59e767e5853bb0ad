//! Extraction of JSON payloads from over-allocated prover output buffers.
//!
//! The prover does not NUL-terminate its output and the reported length may include padding, so
//! the true end of each payload is located by searching for its closing token inside the
//! reported length.

use std::fmt;

use serde_json::error::Category;
use zkw_core::schema::proof::{Proof, ProofSchemaError, PublicSignals, ZkProof};

use crate::buffer::OutputBuffer;

/// Closing token of a Groth16 proof object.
pub const PROOF_TERMINATOR: &[u8] = br#""protocol":"groth16"}"#;
/// Closing token of the public signals array.
pub const PUBLIC_SIGNALS_TERMINATOR: u8 = b']';

/// Which payload failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// The raw witness handed from the first call to the second.
    Witness,
    /// The proof object.
    Proof,
    /// The public signals array.
    PublicSignals,
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Witness => f.write_str("witness"),
            Self::Proof => f.write_str("proof"),
            Self::PublicSignals => f.write_str("public signals"),
        }
    }
}

/// Why a payload could not be located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformation {
    /// The closing token does not occur inside the reported length.
    MissingTerminator,
    /// The payload bytes are not UTF-8.
    InvalidUtf8,
    /// The reported length exceeds the buffer capacity.
    LengthOutOfBounds {
        /// Length the prover reported.
        reported: u64,
        /// Bytes actually allocated.
        capacity: usize,
    },
}

impl fmt::Display for Malformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTerminator => f.write_str("closing token not found"),
            Self::InvalidUtf8 => f.write_str("not valid UTF-8"),
            Self::LengthOutOfBounds { reported, capacity } => {
                write!(f, "reported length {reported} exceeds capacity {capacity}")
            }
        }
    }
}

/// The prover output does not hold a usable proof.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The payload could not be located or decoded as text.
    #[error("malformed {payload} payload: {reason}")]
    MalformedPayload {
        /// Failing payload.
        payload: PayloadKind,
        /// What was wrong.
        reason: Malformation,
    },
    /// The payload is text but not valid JSON.
    #[error("{payload} payload is not valid JSON: {source}")]
    Decode {
        /// Failing payload.
        payload: PayloadKind,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// The payload decoded but violates the proof schema.
    #[error(transparent)]
    Schema(#[from] ProofSchemaError),
}

/// End (exclusive) of the last proof terminator in `bytes`.
#[must_use]
pub fn find_proof_end(bytes: &[u8]) -> Option<usize> {
    bytes
        .windows(PROOF_TERMINATOR.len())
        .rposition(|window| window == PROOF_TERMINATOR)
        .map(|start| start.saturating_add(PROOF_TERMINATOR.len()))
}

/// End (exclusive) of the last `]` in `bytes`.
#[must_use]
pub fn find_signals_end(bytes: &[u8]) -> Option<usize> {
    bytes
        .iter()
        .rposition(|&b| b == PUBLIC_SIGNALS_TERMINATOR)
        .map(|index| index.saturating_add(1))
}

/// Syntax errors stay [`ParseError::Decode`]. Well-formed JSON of the wrong shape is a schema
/// error.
fn decode_error(payload: PayloadKind, source: serde_json::Error) -> ParseError {
    match source.classify() {
        Category::Data => ParseError::Schema(ProofSchemaError::Shape(source.to_string())),
        Category::Io | Category::Syntax | Category::Eof => ParseError::Decode { payload, source },
    }
}

fn payload_text(
    buffer: &OutputBuffer,
    payload: PayloadKind,
    find_end: fn(&[u8]) -> Option<usize>,
) -> Result<&str, ParseError> {
    let malformed = |reason| ParseError::MalformedPayload { payload, reason };

    let claimed = buffer.filled().ok_or_else(|| {
        malformed(Malformation::LengthOutOfBounds {
            reported: buffer.reported_len(),
            capacity: buffer.capacity(),
        })
    })?;
    let bytes = find_end(claimed)
        .and_then(|end| claimed.get(..end))
        .ok_or_else(|| malformed(Malformation::MissingTerminator))?;

    std::str::from_utf8(bytes).map_err(|_| malformed(Malformation::InvalidUtf8))
}

/// Parse and check the proof object in `buffer`.
///
/// # Errors
/// If the payload is missing, not JSON of the right shape, or violates the schema.
pub fn parse_proof(buffer: &OutputBuffer) -> Result<Proof, ParseError> {
    let text = payload_text(buffer, PayloadKind::Proof, find_proof_end)?;
    let proof: Proof =
        serde_json::from_str(text).map_err(|source| decode_error(PayloadKind::Proof, source))?;
    proof.check()?;
    Ok(proof)
}

/// Parse and check the public signals array in `buffer`, preserving order.
///
/// # Errors
/// If the payload is missing, not a JSON array of strings, or holds a non-decimal signal.
pub fn parse_public_signals(buffer: &OutputBuffer) -> Result<PublicSignals, ParseError> {
    let text = payload_text(buffer, PayloadKind::PublicSignals, find_signals_end)?;
    let signals: PublicSignals = serde_json::from_str(text)
        .map_err(|source| decode_error(PayloadKind::PublicSignals, source))?;
    signals.check()?;
    Ok(signals)
}

/// Parse both output buffers into a [`ZkProof`]. Nothing is returned unless both parts are valid.
///
/// # Errors
/// The first failure from either payload.
pub fn parse_response(
    proof: &OutputBuffer,
    public_signals: &OutputBuffer,
) -> Result<ZkProof, ParseError> {
    let proof = parse_proof(proof)?;
    let public_signals = parse_public_signals(public_signals)?;
    Ok(ZkProof::new(proof, public_signals)?)
}
