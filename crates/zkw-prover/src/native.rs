//! Safe view of the native prover ABI.

use std::path::PathBuf;
use std::sync::Arc;

use crate::buffer::{ErrorBuffer, OutputBuffer};

/// Where the compiled circuit comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CircuitSource {
    /// Circuit bytes already in memory.
    Bytes(Arc<[u8]>),
    /// Circuit file on disk.
    Path(PathBuf),
}

/// Where the Groth16 proving key comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvingKeySource {
    /// A named key bundled with the application, resolved by the prover implementation.
    Name(String),
    /// Raw key bytes already in memory.
    Asset(Arc<[u8]>),
    /// Key file on disk.
    Path(PathBuf),
}

/// Circuit and proving key used by every attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProverArtifacts {
    /// Compiled circuit.
    pub circuit: CircuitSource,
    /// Groth16 proving key.
    pub proving_key: ProvingKeySource,
}

/// The two native prover entry points, over owned buffers.
///
/// Implementations write into the lent buffers, set the reported lengths, and return one of the
/// codes in [`crate::status`]. Messages for computation errors go into `error` as NUL-terminated
/// text.
pub trait NativeProver: Send + Sync {
    /// Compute the witness for `input_json` into `witness`.
    fn generate_witness(
        &self,
        circuit: &CircuitSource,
        input_json: &[u8],
        witness: &mut OutputBuffer,
        error: &mut ErrorBuffer,
    ) -> i32;

    /// Compute the proof and public signals for `witness`.
    fn generate_proof(
        &self,
        proving_key: &ProvingKeySource,
        witness: &[u8],
        proof: &mut OutputBuffer,
        public_signals: &mut OutputBuffer,
        error: &mut ErrorBuffer,
    ) -> i32;
}

impl<P: NativeProver + ?Sized> NativeProver for Arc<P> {
    fn generate_witness(
        &self,
        circuit: &CircuitSource,
        input_json: &[u8],
        witness: &mut OutputBuffer,
        error: &mut ErrorBuffer,
    ) -> i32 {
        (**self).generate_witness(circuit, input_json, witness, error)
    }

    fn generate_proof(
        &self,
        proving_key: &ProvingKeySource,
        witness: &[u8],
        proof: &mut OutputBuffer,
        public_signals: &mut OutputBuffer,
        error: &mut ErrorBuffer,
    ) -> i32 {
        (**self).generate_proof(proving_key, witness, proof, public_signals, error)
    }
}
