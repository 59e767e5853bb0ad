//! Serialized data contracts.

/// Authorization circuit inputs.
pub mod auth_input;
/// Chain-client handles and history records.
pub mod operation;
/// Send-attempt phases and their notifications.
pub mod phase;
/// Groth16 proof and public-signal payloads.
pub mod proof;
