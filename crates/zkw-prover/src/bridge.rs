//! Drives one witness + proof generation through the native prover.

use tracing::{debug, info};
use zeroize::Zeroizing;
use zkw_core::schema::auth_input::AuthProofInput;
use zkw_core::schema::proof::ZkProof;

use crate::buffer::{BufferCapacities, ErrorBuffer, OutputBuffer};
use crate::native::{NativeProver, ProverArtifacts};
use crate::parser::{Malformation, ParseError, PayloadKind, parse_response};
use crate::status::{NativeProverError, ProverStage, ProverStatus};

/// Proof generation failed. The attempt is over; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum ProofError {
    /// The inputs could not be encoded as JSON.
    #[error("failed to encode proof inputs: {0}")]
    Encode(#[source] serde_json::Error),
    /// The native prover reported a non-zero status.
    #[error(transparent)]
    Native(#[from] NativeProverError),
    /// The prover output could not be parsed into a proof.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Owns the buffers of one proving call and lends them to a [`NativeProver`].
#[derive(Debug, Clone)]
pub struct NativeProverBridge<P> {
    prover: P,
    artifacts: ProverArtifacts,
    capacities: BufferCapacities,
}

impl<P: NativeProver> NativeProverBridge<P> {
    /// Bridge with the documented buffer capacities.
    #[must_use]
    pub fn new(prover: P, artifacts: ProverArtifacts) -> Self {
        Self::with_capacities(prover, artifacts, BufferCapacities::default())
    }

    /// Bridge with custom buffer capacities.
    #[must_use]
    pub const fn with_capacities(
        prover: P,
        artifacts: ProverArtifacts,
        capacities: BufferCapacities,
    ) -> Self {
        Self {
            prover,
            artifacts,
            capacities,
        }
    }

    /// Buffer capacities used per call.
    #[must_use]
    pub const fn capacities(&self) -> BufferCapacities {
        self.capacities
    }

    /// Generate a witness, then a proof, then parse the proof outputs.
    ///
    /// Buffers are allocated fresh for this call. The witness buffer is released before parsing.
    ///
    /// # Errors
    /// On any non-zero status or unparseable output.
    pub fn prove(&self, input: &AuthProofInput) -> Result<ZkProof, ProofError> {
        let input_json = Zeroizing::new(input.to_json().map_err(ProofError::Encode)?);
        let mut error = ErrorBuffer::with_capacity(self.capacities.error);

        debug!(
            witness_capacity = self.capacities.witness,
            "Generating witness"
        );
        let mut witness = OutputBuffer::with_capacity(self.capacities.witness);
        let status = self.prover.generate_witness(
            &self.artifacts.circuit,
            input_json.as_bytes(),
            &mut witness,
            &mut error,
        );
        ProverStatus::from_code(status).check(ProverStage::Witness, &error)?;
        drop(input_json);

        let witness_bytes = witness.filled().ok_or(ParseError::MalformedPayload {
            payload: PayloadKind::Witness,
            reason: Malformation::LengthOutOfBounds {
                reported: witness.reported_len(),
                capacity: witness.capacity(),
            },
        })?;
        debug!(witness_len = witness_bytes.len(), "Witness generated");

        let mut proof = OutputBuffer::with_capacity(self.capacities.proof);
        let mut public_signals = OutputBuffer::with_capacity(self.capacities.public_signals);
        error.clear();
        let status = self.prover.generate_proof(
            &self.artifacts.proving_key,
            witness_bytes,
            &mut proof,
            &mut public_signals,
            &mut error,
        );
        drop(witness);
        ProverStatus::from_code(status).check(ProverStage::Proof, &error)?;

        debug!(
            proof_len = proof.reported_len(),
            public_signals_len = public_signals.reported_len(),
            "Proof generated"
        );
        let zk_proof = parse_response(&proof, &public_signals)?;
        info!(
            public_signals = zk_proof.public_signals().len(),
            "Zero-knowledge proof ready"
        );
        Ok(zk_proof)
    }
}
