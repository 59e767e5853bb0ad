//! Proof generation for the ZKW wallet.
//!
//! [`ProofInputBuilder`] assembles the circuit inputs, [`NativeProverBridge`] runs them through a
//! [`NativeProver`] over fixed-capacity buffers, and [`parser`] turns the over-allocated outputs
//! into a [`ZkProof`](zkw_core::schema::proof::ZkProof).

pub mod bridge;
pub mod buffer;
#[cfg(feature = "native")]
pub mod ffi;
pub mod input;
pub mod native;
pub mod parser;
pub mod status;

pub use bridge::{NativeProverBridge, ProofError};
pub use buffer::{BufferCapacities, ErrorBuffer, OutputBuffer};
pub use input::{InputRangeError, ProofInputBuilder};
pub use native::{CircuitSource, NativeProver, ProverArtifacts, ProvingKeySource};
pub use parser::ParseError;
pub use status::{NativeProverError, ProverStatus};
