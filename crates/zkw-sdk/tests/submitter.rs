//! Send attempts end to end against the stub chain client and stub prover.

use std::sync::Arc;
use std::time::Duration;

use test_utils::{
    AMOUNT, StubChainClient, StubProver, auth_material, recipient, stub_bridge, test_key,
};
use tokio::sync::broadcast;
use zkw_core::base::FIELD_MODULUS;
use zkw_core::parse_amount;
use zkw_core::schema::auth_input::{AuthMaterial, AuthProofInput};
use zkw_core::schema::phase::{PhaseChange, TransactionPhase};
use zkw_core::schema::proof::Proof;
use zkw_sdk::{
    ChainError, ConfirmationPolicy, SpendRequest, TransactionError, TransactionSubmitter,
};

use TransactionPhase::{
    BuildingOperation, Completed, Failed, GeneratingProof, Submitting, WaitingConfirmation,
};

fn submitter(
    client: StubChainClient,
    prover: &Arc<StubProver>,
) -> (
    Arc<StubChainClient>,
    TransactionSubmitter<StubChainClient, Arc<StubProver>>,
) {
    let client = Arc::new(client);
    let policy = ConfirmationPolicy {
        max_attempts: 3,
        delay: Duration::from_millis(1),
    }
    .validate()
    .expect("valid policy");
    let submitter = TransactionSubmitter::new(Arc::clone(&client), stub_bridge(prover), policy);
    (client, submitter)
}

fn request() -> SpendRequest {
    SpendRequest {
        recipient: recipient(),
        amount: parse_amount(AMOUNT).expect("valid amount"),
    }
}

fn drain(rx: &mut broadcast::Receiver<PhaseChange>) -> Vec<TransactionPhase> {
    let mut phases = Vec::new();
    while let Ok(change) = rx.try_recv() {
        assert_eq!(change.label, change.phase.label());
        phases.push(change.phase);
    }
    phases
}

#[tokio::test]
async fn successful_send_completes() {
    let prover = Arc::new(StubProver::succeeding());
    let (client, submitter) = submitter(StubChainClient::new(), &prover);
    let mut phases = submitter.subscribe();

    let hash = submitter
        .send(&test_key(), request())
        .await
        .expect("completed");

    assert_eq!(
        drain(&mut phases),
        [
            BuildingOperation,
            GeneratingProof,
            Submitting,
            WaitingConfirmation,
            Completed
        ]
    );

    let calls = client.calls();
    assert_eq!(calls.built.len(), 1);
    let (to, amount) = calls.built.first().expect("one build");
    assert_eq!(*to, recipient());
    assert_eq!(amount.to_units_string(), "10000000000000000");

    let (_, proof_json) = calls.submitted.first().expect("one submission");
    let proof: Proof = serde_json::from_str(proof_json).expect("proof JSON");
    assert_eq!(proof.protocol, "groth16");
    assert!(!hash.as_str().is_empty());
    assert_eq!(calls.confirmation_checks, 1);
}

#[tokio::test]
async fn prover_receives_six_in_range_inputs() {
    let prover = Arc::new(StubProver::succeeding());
    let (_, submitter) = submitter(StubChainClient::new(), &prover);

    submitter
        .send(&test_key(), request())
        .await
        .expect("completed");

    let json = prover.last_input().expect("witness was generated");
    let input = AuthProofInput::from_json(&json).expect("every input is below the modulus");
    assert_eq!(input.sk_i, *test_key().scalar());
    assert_eq!(input.event_id.as_biguint(), &auth_material().event_id);
    assert_eq!(input.message_hash.as_biguint(), &auth_material().message_hash);
}

#[tokio::test]
async fn failed_submission_never_polls() {
    let prover = Arc::new(StubProver::succeeding());
    let client =
        StubChainClient::new().rejecting_submission(ChainError::Rejected("nonce".to_owned()));
    let (client, submitter) = submitter(client, &prover);
    let mut phases = submitter.subscribe();

    let err = submitter
        .send(&test_key(), request())
        .await
        .expect_err("submission rejected");

    assert!(matches!(err, TransactionError::Submission(ChainError::Rejected(_))));
    assert_eq!(
        drain(&mut phases),
        [BuildingOperation, GeneratingProof, Submitting, Failed]
    );
    assert_eq!(client.calls().confirmation_checks, 0);
}

#[tokio::test]
async fn build_failure_skips_proving() {
    let prover = Arc::new(StubProver::succeeding());
    let client =
        StubChainClient::new().failing_build(ChainError::Transport("offline".to_owned()));
    let (client, submitter) = submitter(client, &prover);
    let mut phases = submitter.subscribe();

    let err = submitter
        .send(&test_key(), request())
        .await
        .expect_err("build fails");

    assert!(matches!(err, TransactionError::Build(_)));
    assert_eq!(drain(&mut phases), [BuildingOperation, Failed]);
    assert_eq!(prover.witness_calls(), 0);
    assert!(client.calls().submitted.is_empty());
}

#[tokio::test]
async fn prover_failure_fails_before_submission() {
    let prover = Arc::new(
        StubProver::succeeding()
            .with_witness_status(1)
            .with_error_message("constraint not satisfied"),
    );
    let (client, submitter) = submitter(StubChainClient::new(), &prover);
    let mut phases = submitter.subscribe();

    let err = submitter
        .send(&test_key(), request())
        .await
        .expect_err("prover fails");

    assert!(err.to_string().contains("constraint not satisfied"), "{err}");
    assert_eq!(
        drain(&mut phases),
        [BuildingOperation, GeneratingProof, Failed]
    );
    assert!(client.calls().submitted.is_empty());
}

#[tokio::test]
async fn out_of_range_material_is_rejected_before_proving() {
    let prover = Arc::new(StubProver::succeeding());
    let material = AuthMaterial {
        message_hash: FIELD_MODULUS.clone(),
        ..auth_material()
    };
    let (_, submitter) = submitter(
        StubChainClient::new().with_auth_material(material),
        &prover,
    );

    let err = submitter
        .send(&test_key(), request())
        .await
        .expect_err("input out of range");

    assert!(matches!(
        err,
        TransactionError::InputRange(ref e) if e.input == "messageHash"
    ));
    assert_eq!(prover.witness_calls(), 0);
}

#[tokio::test]
async fn unconfirmed_transaction_still_completes() {
    let prover = Arc::new(StubProver::succeeding());
    let (client, submitter) = submitter(StubChainClient::new().confirming_on(None), &prover);
    let mut phases = submitter.subscribe();

    submitter
        .send(&test_key(), request())
        .await
        .expect("completion reflects submission");

    assert_eq!(drain(&mut phases).last(), Some(&Completed));
    assert_eq!(client.calls().confirmation_checks, 3);
}

#[tokio::test]
async fn concurrent_sends_run_one_at_a_time() {
    let prover = Arc::new(StubProver::succeeding());
    let (client, submitter) = submitter(StubChainClient::new(), &prover);
    let mut phases = submitter.subscribe();
    let key = test_key();

    let (first, second) = tokio::join!(
        submitter.send(&key, request()),
        submitter.send(&key, request())
    );
    first.expect("first completed");
    second.expect("second completed");

    let attempt = [
        BuildingOperation,
        GeneratingProof,
        Submitting,
        WaitingConfirmation,
        Completed,
    ];
    assert_eq!(drain(&mut phases), [attempt, attempt].concat());
    assert_eq!(client.calls().submitted.len(), 2);
}
