//! Shared constants for CLI.

// -------------------------
// Environment variables
// -------------------------

// Key
pub const ZKW_KEY_STORE: &str = "ZKW_KEY_STORE";
pub const ZKW_KEY_FILE: &str = "ZKW_KEY_FILE";
pub const ZKW_KEY_STDIN: &str = "ZKW_KEY_STDIN";

// Prove
#[cfg(feature = "native")]
pub const ZKW_PROVER_ASSET_DIR: &str = "ZKW_PROVER_ASSET_DIR";
#[cfg(feature = "native")]
pub const ZKW_CIRCUIT_FILE: &str = "ZKW_CIRCUIT_FILE";
#[cfg(feature = "native")]
pub const ZKW_PROVING_KEY_FILE: &str = "ZKW_PROVING_KEY_FILE";
#[cfg(feature = "native")]
pub const ZKW_PROVING_KEY_NAME: &str = "ZKW_PROVING_KEY_NAME";
#[cfg(feature = "native")]
pub const ZKW_PROOF_INPUT: &str = "ZKW_PROOF_INPUT";
#[cfg(feature = "native")]
pub const ZKW_PROOF_OUT: &str = "ZKW_PROOF_OUT";
#[cfg(feature = "native")]
pub const ZKW_PUBLIC_SIGNALS_OUT: &str = "ZKW_PUBLIC_SIGNALS_OUT";

// -------------------------
// Default values
// -------------------------

pub const DEFAULT_KEY_STORE: &str = "zkw-key.txt";
#[cfg(feature = "native")]
pub const DEFAULT_PROVER_ASSET_DIR: &str = "assets";
#[cfg(feature = "native")]
pub const DEFAULT_PROOF_INPUT: &str = "proof-input.json";
#[cfg(feature = "native")]
pub const DEFAULT_PROOF_FILE: &str = "proof.json";
#[cfg(feature = "native")]
pub const DEFAULT_PUBLIC_SIGNALS_FILE: &str = "public-signals.json";
