//! Status codes returned by the native prover entry points.

use std::fmt;

use crate::buffer::ErrorBuffer;

/// The call succeeded.
pub const STATUS_OK: i32 = 0;
/// The computation failed; the error buffer carries details.
pub const STATUS_COMPUTATION_ERROR: i32 = 1;
/// An output buffer was too small.
pub const STATUS_OUT_OF_MEMORY: i32 = 2;
/// An input file could not be opened.
pub const STATUS_FILE_OPEN_FAILED: i32 = -1;
/// An input file could not be read.
pub const STATUS_FILE_READ_FAILED: i32 = -2;

/// Which native call produced a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProverStage {
    /// Witness generation from the circuit and inputs.
    Witness,
    /// Groth16 proof generation from the proving key and witness.
    Proof,
}

impl fmt::Display for ProverStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Witness => f.write_str("witness generation"),
            Self::Proof => f.write_str("proof generation"),
        }
    }
}

/// How an input file failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFailure {
    /// Could not be opened.
    Open,
    /// Opened but could not be read.
    Read,
}

impl fmt::Display for FileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("opened"),
            Self::Read => f.write_str("read"),
        }
    }
}

/// Decoded status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProverStatus {
    /// `0`
    Success,
    /// `1`
    ComputationError,
    /// `2`
    OutOfMemory,
    /// `-1`
    FileOpenFailed,
    /// `-2`
    FileReadFailed,
    /// Anything else.
    Unknown(i32),
}

impl ProverStatus {
    /// Decode a raw status code.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            STATUS_OK => Self::Success,
            STATUS_COMPUTATION_ERROR => Self::ComputationError,
            STATUS_OUT_OF_MEMORY => Self::OutOfMemory,
            STATUS_FILE_OPEN_FAILED => Self::FileOpenFailed,
            STATUS_FILE_READ_FAILED => Self::FileReadFailed,
            other => Self::Unknown(other),
        }
    }

    /// The raw code.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Success => STATUS_OK,
            Self::ComputationError => STATUS_COMPUTATION_ERROR,
            Self::OutOfMemory => STATUS_OUT_OF_MEMORY,
            Self::FileOpenFailed => STATUS_FILE_OPEN_FAILED,
            Self::FileReadFailed => STATUS_FILE_READ_FAILED,
            Self::Unknown(code) => code,
        }
    }

    /// Turn a non-success status into an error, reading the detail message for computation
    /// errors.
    ///
    /// # Errors
    /// Every status other than [`ProverStatus::Success`].
    pub fn check(self, stage: ProverStage, error: &ErrorBuffer) -> Result<(), NativeProverError> {
        match self {
            Self::Success => Ok(()),
            Self::ComputationError => Err(NativeProverError::Computation {
                stage,
                message: error.message(),
            }),
            Self::OutOfMemory => Err(NativeProverError::OutOfMemory { stage }),
            Self::FileOpenFailed => Err(NativeProverError::FileIo {
                stage,
                failure: FileFailure::Open,
            }),
            Self::FileReadFailed => Err(NativeProverError::FileIo {
                stage,
                failure: FileFailure::Read,
            }),
            Self::Unknown(code) => Err(NativeProverError::UnknownStatus { stage, code }),
        }
    }
}

/// A native prover call reported failure. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NativeProverError {
    /// An output buffer was too small for the result.
    #[error("{stage} ran out of buffer space")]
    OutOfMemory {
        /// Failing call.
        stage: ProverStage,
    },
    /// A circuit or proving key file was unusable.
    #[error("{stage} input file could not be {failure}")]
    FileIo {
        /// Failing call.
        stage: ProverStage,
        /// Open or read.
        failure: FileFailure,
    },
    /// The prover rejected the inputs or failed internally.
    #[error("{stage} failed: {message}")]
    Computation {
        /// Failing call.
        stage: ProverStage,
        /// Detail copied from the error buffer.
        message: String,
    },
    /// A status code outside the documented set.
    #[error("{stage} returned unknown status {code}")]
    UnknownStatus {
        /// Failing call.
        stage: ProverStage,
        /// The raw code.
        code: i32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for code in [0, 1, 2, -1, -2, 7, -42] {
            assert_eq!(ProverStatus::from_code(code).code(), code);
        }
        assert_eq!(ProverStatus::from_code(7), ProverStatus::Unknown(7));
    }

    #[test]
    fn computation_error_carries_message() {
        let mut error = ErrorBuffer::with_capacity(32);
        error
            .as_mut_slice()
            .get_mut(..14)
            .expect("in bounds")
            .copy_from_slice(b"assert failed\0");

        let err = ProverStatus::ComputationError
            .check(ProverStage::Witness, &error)
            .expect_err("non-zero status");
        assert_eq!(
            err,
            NativeProverError::Computation {
                stage: ProverStage::Witness,
                message: "assert failed".to_owned(),
            }
        );
        assert_eq!(err.to_string(), "witness generation failed: assert failed");
    }

    #[test]
    fn file_failures_are_distinguished() {
        let error = ErrorBuffer::with_capacity(8);
        assert_eq!(
            ProverStatus::from_code(-1).check(ProverStage::Proof, &error),
            Err(NativeProverError::FileIo {
                stage: ProverStage::Proof,
                failure: FileFailure::Open,
            })
        );
        assert_eq!(
            ProverStatus::from_code(-2).check(ProverStage::Proof, &error),
            Err(NativeProverError::FileIo {
                stage: ProverStage::Proof,
                failure: FileFailure::Read,
            })
        );
    }

    #[test]
    fn success_is_ok() {
        let error = ErrorBuffer::with_capacity(8);
        assert!(ProverStatus::Success.check(ProverStage::Proof, &error).is_ok());
    }
}
