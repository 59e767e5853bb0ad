use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use zkw_prover::native::{CircuitSource, NativeProver, ProvingKeySource};
use zkw_prover::status::{STATUS_OK, STATUS_OUT_OF_MEMORY};
use zkw_prover::{ErrorBuffer, OutputBuffer};

use crate::{PROOF_JSON, PUBLIC_SIGNALS_JSON};

const WITNESS: &[u8] = b"stub-witness";

/// Copy `payload` to the start of `buffer` and report `reported` bytes.
fn fill(buffer: &mut OutputBuffer, payload: &[u8], reported: usize) -> bool {
    let (bytes, len) = buffer.lend();
    let Some(dst) = bytes.get_mut(..payload.len()) else {
        return false;
    };
    dst.copy_from_slice(payload);
    *len = u64::try_from(reported).unwrap_or(u64::MAX);
    true
}

fn write_message(error: &mut ErrorBuffer, message: &str) {
    let bytes = message.as_bytes();
    let slot = error.as_mut_slice();
    let n = bytes.len().min(slot.len().saturating_sub(1));
    if let (Some(dst), Some(src)) = (slot.get_mut(..n), bytes.get(..n)) {
        dst.copy_from_slice(src);
    }
}

/// Scripted [`NativeProver`] returning fixed statuses and payloads.
///
/// On success the proof buffer is reported as completely full, so the payload is followed by
/// zero padding the parser has to skip.
#[derive(Debug)]
pub struct StubProver {
    witness_status: i32,
    proof_status: i32,
    error_message: String,
    proof_payload: Vec<u8>,
    signals_payload: Vec<u8>,
    witness_overrun: bool,
    witness_calls: AtomicUsize,
    proof_calls: AtomicUsize,
    last_input: Mutex<Option<String>>,
}

impl Default for StubProver {
    fn default() -> Self {
        Self {
            witness_status: STATUS_OK,
            proof_status: STATUS_OK,
            error_message: String::new(),
            proof_payload: PROOF_JSON.as_bytes().to_vec(),
            signals_payload: PUBLIC_SIGNALS_JSON.as_bytes().to_vec(),
            witness_overrun: false,
            witness_calls: AtomicUsize::new(0),
            proof_calls: AtomicUsize::new(0),
            last_input: Mutex::new(None),
        }
    }
}

impl StubProver {
    /// Prover that succeeds with the canonical fixtures.
    #[must_use]
    pub fn succeeding() -> Self {
        Self::default()
    }

    /// Return `status` from witness generation.
    #[must_use]
    pub const fn with_witness_status(mut self, status: i32) -> Self {
        self.witness_status = status;
        self
    }

    /// Return `status` from proof generation.
    #[must_use]
    pub const fn with_proof_status(mut self, status: i32) -> Self {
        self.proof_status = status;
        self
    }

    /// Message written to the error buffer on failure.
    #[must_use]
    pub fn with_error_message(mut self, message: &str) -> Self {
        message.clone_into(&mut self.error_message);
        self
    }

    /// Replace the proof payload.
    #[must_use]
    pub fn with_proof_payload(mut self, payload: &[u8]) -> Self {
        payload.clone_into(&mut self.proof_payload);
        self
    }

    /// Replace the public signals payload.
    #[must_use]
    pub fn with_signals_payload(mut self, payload: &[u8]) -> Self {
        payload.clone_into(&mut self.signals_payload);
        self
    }

    /// Report one byte more witness than the buffer holds, with a success status.
    #[must_use]
    pub const fn with_witness_overrun(mut self) -> Self {
        self.witness_overrun = true;
        self
    }

    /// Number of witness generation calls.
    #[must_use]
    pub fn witness_calls(&self) -> usize {
        self.witness_calls.load(Ordering::SeqCst)
    }

    /// Number of proof generation calls.
    #[must_use]
    pub fn proof_calls(&self) -> usize {
        self.proof_calls.load(Ordering::SeqCst)
    }

    /// The input JSON of the last witness call.
    #[must_use]
    pub fn last_input(&self) -> Option<String> {
        self.last_input
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl NativeProver for StubProver {
    fn generate_witness(
        &self,
        _circuit: &CircuitSource,
        input_json: &[u8],
        witness: &mut OutputBuffer,
        error: &mut ErrorBuffer,
    ) -> i32 {
        self.witness_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_input.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(String::from_utf8_lossy(input_json).into_owned());

        if self.witness_status != STATUS_OK {
            write_message(error, &self.error_message);
            return self.witness_status;
        }
        let reported = if self.witness_overrun {
            witness.capacity().saturating_add(1)
        } else {
            WITNESS.len()
        };
        if !fill(witness, WITNESS, reported) {
            return STATUS_OUT_OF_MEMORY;
        }
        STATUS_OK
    }

    fn generate_proof(
        &self,
        _proving_key: &ProvingKeySource,
        witness: &[u8],
        proof: &mut OutputBuffer,
        public_signals: &mut OutputBuffer,
        error: &mut ErrorBuffer,
    ) -> i32 {
        self.proof_calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(witness, WITNESS, "proof generation received the wrong witness");

        if self.proof_status != STATUS_OK {
            write_message(error, &self.error_message);
            return self.proof_status;
        }
        let proof_capacity = proof.capacity();
        let signals_reported = self
            .signals_payload
            .len()
            .saturating_add(8)
            .min(public_signals.capacity());
        if !fill(proof, &self.proof_payload, proof_capacity)
            || !fill(public_signals, &self.signals_payload, signals_reported)
        {
            return STATUS_OUT_OF_MEMORY;
        }
        STATUS_OK
    }
}
