//! Linked C prover library.
//!
//! Circuit paths and proving key names are resolved here so that file problems surface as the
//! documented `-1` / `-2` status codes before any native call is made.

#![allow(unsafe_code, reason = "FFI boundary with the native prover library")]

use std::ffi::{CString, c_char, c_int, c_ulong};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::buffer::{ErrorBuffer, OutputBuffer};
use crate::native::{CircuitSource, NativeProver, ProvingKeySource};
use crate::status::{STATUS_FILE_OPEN_FAILED, STATUS_FILE_READ_FAILED, STATUS_OUT_OF_MEMORY};

unsafe extern "C" {
    fn zkw_witness_auth(
        circuit: *const u8,
        circuit_len: c_ulong,
        json: *const c_char,
        json_len: c_ulong,
        witness: *mut u8,
        witness_len: *mut c_ulong,
        error_msg: *mut c_char,
        error_msg_max_size: c_ulong,
    ) -> c_int;

    fn zkw_groth16_prove_buffer(
        zkey: *const u8,
        zkey_len: c_ulong,
        witness: *const u8,
        witness_len: c_ulong,
        proof: *mut c_char,
        proof_len: *mut c_ulong,
        public_signals: *mut c_char,
        public_signals_len: *mut c_ulong,
        error_msg: *mut c_char,
        error_msg_max_size: c_ulong,
    ) -> c_int;

    fn zkw_groth16_prove_file(
        zkey_path: *const c_char,
        witness: *const u8,
        witness_len: c_ulong,
        proof: *mut c_char,
        proof_len: *mut c_ulong,
        public_signals: *mut c_char,
        public_signals_len: *mut c_ulong,
        error_msg: *mut c_char,
        error_msg_max_size: c_ulong,
    ) -> c_int;
}

/// Maps a file access failure onto the native status codes.
fn file_status(path: &Path, error: &std::io::Error) -> i32 {
    warn!(path = %path.display(), %error, "Prover input file unavailable");
    if matches!(
        error.kind(),
        ErrorKind::NotFound | ErrorKind::PermissionDenied
    ) {
        STATUS_FILE_OPEN_FAILED
    } else {
        STATUS_FILE_READ_FAILED
    }
}

/// [`NativeProver`] backed by the linked `zkw_prover` library.
#[derive(Debug, Clone)]
pub struct LinkedProver {
    asset_dir: PathBuf,
}

impl LinkedProver {
    /// Prover resolving [`ProvingKeySource::Name`] keys inside `asset_dir`.
    #[must_use]
    pub const fn new(asset_dir: PathBuf) -> Self {
        Self { asset_dir }
    }

    /// Directory searched for named proving keys.
    #[must_use]
    pub fn asset_dir(&self) -> &Path {
        &self.asset_dir
    }

    fn prove_with_path(
        path: &Path,
        witness: &[u8],
        proof: &mut OutputBuffer,
        public_signals: &mut OutputBuffer,
        error: &mut ErrorBuffer,
    ) -> i32 {
        if let Err(e) = std::fs::metadata(path) {
            return file_status(path, &e);
        }
        let Ok(c_path) = CString::new(path.as_os_str().as_encoded_bytes()) else {
            return STATUS_FILE_OPEN_FAILED;
        };
        let (Ok(witness_len), Ok(error_size)) = (
            c_ulong::try_from(witness.len()),
            c_ulong::try_from(error.capacity()),
        ) else {
            return STATUS_OUT_OF_MEMORY;
        };

        let (proof_bytes, proof_len) = proof.lend();
        let (signal_bytes, signals_len) = public_signals.lend();
        let (Ok(mut p_len), Ok(mut s_len)) = (
            c_ulong::try_from(*proof_len),
            c_ulong::try_from(*signals_len),
        ) else {
            return STATUS_OUT_OF_MEMORY;
        };

        debug!(path = %path.display(), "Calling native prover with proving key file");
        // SAFETY: every pointer refers to a live buffer whose length is passed alongside it, and
        // the buffers stay borrowed for the duration of the call.
        let status = unsafe {
            zkw_groth16_prove_file(
                c_path.as_ptr(),
                witness.as_ptr(),
                witness_len,
                proof_bytes.as_mut_ptr().cast(),
                &raw mut p_len,
                signal_bytes.as_mut_ptr().cast(),
                &raw mut s_len,
                error.as_mut_slice().as_mut_ptr().cast(),
                error_size,
            )
        };
        *proof_len = u64::from(p_len);
        *signals_len = u64::from(s_len);
        status
    }

    fn prove_with_bytes(
        zkey: &[u8],
        witness: &[u8],
        proof: &mut OutputBuffer,
        public_signals: &mut OutputBuffer,
        error: &mut ErrorBuffer,
    ) -> i32 {
        let (Ok(zkey_len), Ok(witness_len), Ok(error_size)) = (
            c_ulong::try_from(zkey.len()),
            c_ulong::try_from(witness.len()),
            c_ulong::try_from(error.capacity()),
        ) else {
            return STATUS_OUT_OF_MEMORY;
        };

        let (proof_bytes, proof_len) = proof.lend();
        let (signal_bytes, signals_len) = public_signals.lend();
        let (Ok(mut p_len), Ok(mut s_len)) = (
            c_ulong::try_from(*proof_len),
            c_ulong::try_from(*signals_len),
        ) else {
            return STATUS_OUT_OF_MEMORY;
        };

        // SAFETY: see `prove_with_path`.
        let status = unsafe {
            zkw_groth16_prove_buffer(
                zkey.as_ptr(),
                zkey_len,
                witness.as_ptr(),
                witness_len,
                proof_bytes.as_mut_ptr().cast(),
                &raw mut p_len,
                signal_bytes.as_mut_ptr().cast(),
                &raw mut s_len,
                error.as_mut_slice().as_mut_ptr().cast(),
                error_size,
            )
        };
        *proof_len = u64::from(p_len);
        *signals_len = u64::from(s_len);
        status
    }
}

impl NativeProver for LinkedProver {
    fn generate_witness(
        &self,
        circuit: &CircuitSource,
        input_json: &[u8],
        witness: &mut OutputBuffer,
        error: &mut ErrorBuffer,
    ) -> i32 {
        let loaded;
        let circuit_bytes: &[u8] = match circuit {
            CircuitSource::Bytes(bytes) => bytes,
            CircuitSource::Path(path) => match std::fs::read(path) {
                Ok(bytes) => {
                    loaded = bytes;
                    &loaded
                }
                Err(e) => return file_status(path, &e),
            },
        };

        let (Ok(circuit_len), Ok(json_len), Ok(error_size)) = (
            c_ulong::try_from(circuit_bytes.len()),
            c_ulong::try_from(input_json.len()),
            c_ulong::try_from(error.capacity()),
        ) else {
            return STATUS_OUT_OF_MEMORY;
        };
        let (witness_bytes, witness_len) = witness.lend();
        let Ok(mut w_len) = c_ulong::try_from(*witness_len) else {
            return STATUS_OUT_OF_MEMORY;
        };

        // SAFETY: see `LinkedProver::prove_with_path`.
        let status = unsafe {
            zkw_witness_auth(
                circuit_bytes.as_ptr(),
                circuit_len,
                input_json.as_ptr().cast(),
                json_len,
                witness_bytes.as_mut_ptr(),
                &raw mut w_len,
                error.as_mut_slice().as_mut_ptr().cast(),
                error_size,
            )
        };
        *witness_len = u64::from(w_len);
        status
    }

    fn generate_proof(
        &self,
        proving_key: &ProvingKeySource,
        witness: &[u8],
        proof: &mut OutputBuffer,
        public_signals: &mut OutputBuffer,
        error: &mut ErrorBuffer,
    ) -> i32 {
        match proving_key {
            ProvingKeySource::Asset(bytes) => {
                Self::prove_with_bytes(bytes, witness, proof, public_signals, error)
            }
            ProvingKeySource::Path(path) => {
                Self::prove_with_path(path, witness, proof, public_signals, error)
            }
            ProvingKeySource::Name(name) => {
                let path = self.asset_dir.join(name);
                Self::prove_with_path(&path, witness, proof, public_signals, error)
            }
        }
    }
}
