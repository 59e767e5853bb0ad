//! Fixed-capacity buffers lent to the native prover.
//!
//! The prover writes into pre-allocated memory and reports how many bytes it produced through an
//! in/out length field. Everything past the reported length is padding.

/// Witness buffer capacity, 100 MiB.
pub const WITNESS_BUFFER_SIZE: usize = 104_857_600;
/// Proof buffer capacity, 4 MiB.
pub const PROOF_BUFFER_SIZE: usize = 4_194_304;
/// Proof buffer capacity when the proving key is read from a file path, 2 MiB.
pub const PATH_MODE_PROOF_BUFFER_SIZE: usize = 2_097_152;
/// Public signals buffer capacity, 2 MiB.
pub const PUBLIC_SIGNALS_BUFFER_SIZE: usize = 2_097_152;
/// Error message buffer capacity.
pub const ERROR_BUFFER_SIZE: usize = 256;

/// Capacities of the buffers allocated for one proving attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferCapacities {
    /// Witness output.
    pub witness: usize,
    /// Proof JSON output.
    pub proof: usize,
    /// Public signals JSON output.
    pub public_signals: usize,
    /// Error message output.
    pub error: usize,
}

impl Default for BufferCapacities {
    fn default() -> Self {
        Self {
            witness: WITNESS_BUFFER_SIZE,
            proof: PROOF_BUFFER_SIZE,
            public_signals: PUBLIC_SIGNALS_BUFFER_SIZE,
            error: ERROR_BUFFER_SIZE,
        }
    }
}

impl BufferCapacities {
    /// Default capacities with the smaller proof buffer used for path-addressed proving keys.
    #[must_use]
    pub fn path_mode() -> Self {
        Self {
            proof: PATH_MODE_PROOF_BUFFER_SIZE,
            ..Self::default()
        }
    }
}

/// A zero-filled output buffer with an in/out length field.
pub struct OutputBuffer {
    data: Vec<u8>,
    len: u64,
}

impl OutputBuffer {
    /// Allocate `capacity` zeroed bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
            len: 0,
        }
    }

    /// Number of bytes allocated.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Length last reported by the prover.
    #[must_use]
    pub const fn reported_len(&self) -> u64 {
        self.len
    }

    /// Lend the storage and the length field to a prover call.
    ///
    /// The length field is reset to the capacity on the way in, as the native ABI expects; the
    /// prover overwrites it with the number of bytes produced.
    pub fn lend(&mut self) -> (&mut [u8], &mut u64) {
        self.len = u64::try_from(self.data.len()).unwrap_or(u64::MAX);
        (&mut self.data, &mut self.len)
    }

    /// The bytes inside the reported length, or `None` if the length exceeds the capacity.
    #[must_use]
    pub fn filled(&self) -> Option<&[u8]> {
        let len = usize::try_from(self.len).ok()?;
        self.data.get(..len)
    }
}

impl std::fmt::Debug for OutputBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputBuffer")
            .field("capacity", &self.data.len())
            .field("len", &self.len)
            .finish()
    }
}

/// Buffer receiving a NUL-terminated error message from the prover.
#[derive(Debug)]
pub struct ErrorBuffer {
    data: Vec<u8>,
}

impl ErrorBuffer {
    /// Allocate `capacity` zeroed bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
        }
    }

    /// Maximum message size, including the terminator.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Storage the prover writes the message into.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Zero the buffer between calls.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// The message up to the first NUL byte, lossily decoded and trimmed.
    #[must_use]
    pub fn message(&self) -> String {
        let end = self
            .data
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.data.len());
        let bytes = self.data.get(..end).unwrap_or_default();
        String::from_utf8_lossy(bytes).trim().to_owned()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::arithmetic_side_effects, reason = "Tests")]

    use super::*;

    #[test]
    fn default_capacities() {
        let caps = BufferCapacities::default();
        assert_eq!(caps.witness, 100 * 1024 * 1024);
        assert_eq!(caps.proof, 4 * 1024 * 1024);
        assert_eq!(caps.public_signals, 2 * 1024 * 1024);
        assert_eq!(caps.error, 256);
        assert_eq!(BufferCapacities::path_mode().proof, 2 * 1024 * 1024);
    }

    #[test]
    fn lend_resets_length_to_capacity() {
        let mut buffer = OutputBuffer::with_capacity(16);
        let (bytes, len) = buffer.lend();
        assert_eq!(bytes.len(), 16);
        assert_eq!(*len, 16);
    }

    #[test]
    fn filled_respects_reported_length() {
        let mut buffer = OutputBuffer::with_capacity(8);
        {
            let (bytes, len) = buffer.lend();
            bytes.get_mut(..3).expect("in bounds").copy_from_slice(b"abc");
            *len = 3;
        }
        assert_eq!(buffer.filled(), Some(b"abc".as_slice()));

        let (_, len) = buffer.lend();
        *len = 9;
        assert_eq!(buffer.filled(), None);
    }

    #[test]
    fn error_message_stops_at_nul() {
        let mut error = ErrorBuffer::with_capacity(32);
        error
            .as_mut_slice()
            .get_mut(..12)
            .expect("in bounds")
            .copy_from_slice(b"bad input\0xx");
        assert_eq!(error.message(), "bad input");

        error.clear();
        assert_eq!(error.message(), "");
    }

    #[test]
    fn unterminated_error_message_uses_whole_buffer() {
        let mut error = ErrorBuffer::with_capacity(4);
        error.as_mut_slice().copy_from_slice(b"oops");
        assert_eq!(error.message(), "oops");
    }
}
