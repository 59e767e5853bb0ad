use std::sync::Arc;

use eyre::Context as _;
use tracing::info;
use zeroize::Zeroizing;
use zkw_core::schema::auth_input::AuthProofInput;
use zkw_prover::ffi::LinkedProver;
use zkw_prover::{
    BufferCapacities, CircuitSource, NativeProverBridge, ProverArtifacts, ProvingKeySource,
};

use crate::cli::ProveArgs;

/// Prove an authorization input with the linked prover and write the outputs.
pub async fn prove(args: ProveArgs) -> eyre::Result<()> {
    let json = Zeroizing::new(
        tokio::fs::read_to_string(&args.input)
            .await
            .with_context(|| format!("Failed to read {}", args.input.display()))?,
    );
    let input = AuthProofInput::from_json(&json).context("Invalid proof input")?;
    drop(json);

    let (proving_key, capacities) = match (args.proving_key_file, args.proving_key_name) {
        (Some(path), _) => (ProvingKeySource::Path(path), BufferCapacities::path_mode()),
        (None, Some(name)) => (ProvingKeySource::Name(name), BufferCapacities::default()),
        (None, None) => eyre::bail!("A proving key file or name is required"),
    };
    let artifacts = ProverArtifacts {
        circuit: CircuitSource::Path(args.circuit),
        proving_key,
    };
    let bridge = Arc::new(NativeProverBridge::with_capacities(
        LinkedProver::new(args.asset_dir),
        artifacts,
        capacities,
    ));

    info!("Generating proof");
    let proof = tokio::task::spawn_blocking(move || bridge.prove(&input)).await??;
    let (proof, public_signals) = proof.into_parts();

    tokio::fs::write(&args.proof_out, proof.to_json()?)
        .await
        .with_context(|| format!("Failed to write {}", args.proof_out.display()))?;
    info!(file = ?args.proof_out, "Proof written");

    tokio::fs::write(
        &args.public_signals_out,
        serde_json::to_string(&public_signals)?,
    )
    .await
    .with_context(|| format!("Failed to write {}", args.public_signals_out.display()))?;
    info!(
        file = ?args.public_signals_out,
        count = public_signals.len(),
        "Public signals written"
    );

    Ok(())
}
