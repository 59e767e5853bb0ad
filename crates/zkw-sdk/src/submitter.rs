//! The send-attempt state machine: build, prove, submit, then poll.

use std::sync::Arc;

use tokio::sync::{Mutex, broadcast};
use tracing::{error, info};
use zkw_core::base::{Amount, PrivateKey, RecipientAddress};
use zkw_core::schema::operation::{TxHash, UserOperation};
use zkw_core::schema::phase::{PhaseChange, TransactionPhase};
use zkw_prover::{InputRangeError, NativeProver, NativeProverBridge, ProofError, ProofInputBuilder};

use crate::chain::{ChainClient, ChainError};
use crate::config::ValidatedConfirmationPolicy;
use crate::poller::poll_confirmation;

/// Capacity of the phase notification channel. Lagging subscribers miss older phases.
const PHASE_CHANNEL_CAPACITY: usize = 16;

/// A validated spend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendRequest {
    /// Recipient.
    pub recipient: RecipientAddress,
    /// Amount in the smallest unit.
    pub amount: Amount,
}

/// Why a send attempt ended in [`TransactionPhase::Failed`].
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The chain client could not build the user operation or its auth material.
    #[error("failed to build user operation: {0}")]
    Build(#[source] ChainError),
    /// The auth material holds a scalar outside the field.
    #[error(transparent)]
    InputRange(#[from] InputRangeError),
    /// Witness or proof generation failed.
    #[error(transparent)]
    Proof(#[from] ProofError),
    /// The blocking prover task did not complete.
    #[error("prover task failed: {0}")]
    ProverTask(#[from] tokio::task::JoinError),
    /// The proof could not be serialized for submission.
    #[error("failed to encode proof: {0}")]
    EncodeProof(#[source] serde_json::Error),
    /// The relay refused the operation. No confirmation polling took place.
    #[error("submission failed: {0}")]
    Submission(#[source] ChainError),
}

/// Tracks the phase of one attempt and broadcasts every transition.
struct PhaseTracker<'a> {
    current: TransactionPhase,
    sender: &'a broadcast::Sender<PhaseChange>,
}

impl<'a> PhaseTracker<'a> {
    const fn new(sender: &'a broadcast::Sender<PhaseChange>) -> Self {
        Self {
            current: TransactionPhase::Idle,
            sender,
        }
    }

    fn advance(&mut self, next: TransactionPhase) {
        debug_assert!(
            self.current.can_transition_to(next),
            "illegal transition {:?} -> {next:?}",
            self.current
        );
        info!(from = ?self.current, to = ?next, "{}", next.label());
        self.current = next;
        // Notifications are advisory; having no subscriber is fine.
        let _ = self.sender.send(PhaseChange::from(next));
    }
}

/// Runs send attempts one at a time against a chain client and a native prover.
pub struct TransactionSubmitter<C, P> {
    client: Arc<C>,
    bridge: Arc<NativeProverBridge<P>>,
    policy: ValidatedConfirmationPolicy,
    phases: broadcast::Sender<PhaseChange>,
    attempt: Mutex<()>,
}

impl<C, P> TransactionSubmitter<C, P>
where
    C: ChainClient,
    P: NativeProver + 'static,
{
    /// Submitter polling confirmations according to `policy`.
    #[must_use]
    pub fn new(
        client: Arc<C>,
        bridge: NativeProverBridge<P>,
        policy: ValidatedConfirmationPolicy,
    ) -> Self {
        let (phases, _) = broadcast::channel(PHASE_CHANNEL_CAPACITY);
        Self {
            client,
            bridge: Arc::new(bridge),
            policy,
            phases,
            attempt: Mutex::new(()),
        }
    }

    /// Receive a [`PhaseChange`] for every transition of every later attempt.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PhaseChange> {
        self.phases.subscribe()
    }

    /// The chain client.
    #[must_use]
    pub const fn client(&self) -> &Arc<C> {
        &self.client
    }

    /// Run one attempt to completion and return the operation hash.
    ///
    /// A concurrent call waits until this attempt reaches `Completed` or `Failed`. The result
    /// reflects submission only; confirmation polling is logged but never fails the attempt.
    ///
    /// # Errors
    /// The error that drove the attempt into `Failed`.
    pub async fn send(
        &self,
        key: &PrivateKey,
        request: SpendRequest,
    ) -> Result<TxHash, TransactionError> {
        let guard = self.attempt.lock().await;
        let mut phase = PhaseTracker::new(&self.phases);

        phase.advance(TransactionPhase::BuildingOperation);
        let outcome = match self.run(&mut phase, key, request).await {
            Ok(hash) => {
                phase.advance(TransactionPhase::Completed);
                Ok(hash)
            }
            Err(e) => {
                error!(error = %e, "Transaction failed");
                phase.advance(TransactionPhase::Failed);
                Err(e)
            }
        };
        drop(guard);
        outcome
    }

    async fn run(
        &self,
        phase: &mut PhaseTracker<'_>,
        key: &PrivateKey,
        request: SpendRequest,
    ) -> Result<TxHash, TransactionError> {
        let operation = self.build_operation(key, &request).await?;
        let material = self
            .client
            .auth_material(key, &operation)
            .await
            .map_err(TransactionError::Build)?;

        phase.advance(TransactionPhase::GeneratingProof);
        let input = ProofInputBuilder::build(key, material)?;
        let bridge = Arc::clone(&self.bridge);
        let zk_proof = tokio::task::spawn_blocking(move || bridge.prove(&input)).await??;
        let proof_json = zk_proof
            .proof()
            .to_json()
            .map_err(TransactionError::EncodeProof)?;

        phase.advance(TransactionPhase::Submitting);
        let hash = self
            .client
            .submit(operation, proof_json)
            .await
            .map_err(TransactionError::Submission)?;
        info!(%hash, "Transaction submitted");

        phase.advance(TransactionPhase::WaitingConfirmation);
        let status = poll_confirmation(self.client.as_ref(), &hash, &self.policy).await;
        info!(%hash, ?status, "Confirmation polling finished");

        Ok(hash)
    }

    async fn build_operation(
        &self,
        key: &PrivateKey,
        request: &SpendRequest,
    ) -> Result<UserOperation, TransactionError> {
        info!(
            recipient = %request.recipient,
            amount = %request.amount.to_units_string(),
            "Building user operation"
        );
        self.client
            .build_user_operation(key, &request.recipient, &request.amount)
            .await
            .map_err(TransactionError::Build)
    }
}
