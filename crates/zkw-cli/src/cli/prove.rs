//! Offline proof generation with the linked prover.

use std::path::PathBuf;

use clap::ArgGroup;

use super::constants::{
    DEFAULT_PROOF_FILE, DEFAULT_PROOF_INPUT, DEFAULT_PROVER_ASSET_DIR,
    DEFAULT_PUBLIC_SIGNALS_FILE, ZKW_CIRCUIT_FILE, ZKW_PROOF_INPUT, ZKW_PROOF_OUT,
    ZKW_PROVER_ASSET_DIR, ZKW_PROVING_KEY_FILE, ZKW_PROVING_KEY_NAME, ZKW_PUBLIC_SIGNALS_OUT,
};

/// Arguments for `zkw prove`.
#[derive(Debug, clap::Args)]
#[command(group(
    ArgGroup::new("proving_key")
        .args(["proving_key_file", "proving_key_name"])
        .required(true)
        .multiple(false)
))]
pub struct ProveArgs {
    /// Authorization input JSON (`sk_i`, `eventID`, `messageHash`, `signatureR8x`,
    /// `signatureR8y`, `signatureS`).
    #[arg(long, env = ZKW_PROOF_INPUT, default_value = DEFAULT_PROOF_INPUT)]
    pub input: PathBuf,

    /// Witness-generation circuit.
    #[arg(long, env = ZKW_CIRCUIT_FILE)]
    pub circuit: PathBuf,

    /// Proving key given by path.
    #[arg(long, env = ZKW_PROVING_KEY_FILE)]
    pub proving_key_file: Option<PathBuf>,

    /// Proving key given by name, resolved inside the asset directory.
    #[arg(long, env = ZKW_PROVING_KEY_NAME)]
    pub proving_key_name: Option<String>,

    /// Directory holding named proving keys.
    #[arg(long, env = ZKW_PROVER_ASSET_DIR, default_value = DEFAULT_PROVER_ASSET_DIR)]
    pub asset_dir: PathBuf,

    /// Output file for the proof JSON.
    #[arg(long, env = ZKW_PROOF_OUT, default_value = DEFAULT_PROOF_FILE)]
    pub proof_out: PathBuf,

    /// Output file for the public signals JSON.
    #[arg(long, env = ZKW_PUBLIC_SIGNALS_OUT, default_value = DEFAULT_PUBLIC_SIGNALS_FILE)]
    pub public_signals_out: PathBuf,
}
