//! Bounded confirmation polling after a successful submission.

use tracing::{debug, info, warn};
use zkw_core::schema::operation::TxHash;

use crate::chain::ChainClient;
use crate::config::ValidatedConfirmationPolicy;

/// Outcome of a polling run. Informational only; it never changes the attempt's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationStatus {
    /// Confirmed on the given 1-based attempt.
    Confirmed {
        /// Attempt that saw the confirmation.
        attempt: u32,
    },
    /// The budget ran out first.
    Unconfirmed {
        /// Checks performed.
        attempts: u32,
    },
}

/// Check `hash` up to `policy.max_attempts` times, sleeping `policy.delay` before each check.
///
/// Stops at the first confirmed check. A failed check counts as unconfirmed.
pub async fn poll_confirmation<C: ChainClient>(
    client: &C,
    hash: &TxHash,
    policy: &ValidatedConfirmationPolicy,
) -> ConfirmationStatus {
    for attempt in 1..=policy.max_attempts {
        tokio::time::sleep(policy.delay).await;
        match client.is_confirmed(hash).await {
            Ok(true) => {
                info!(%hash, attempt, "Transaction confirmed");
                return ConfirmationStatus::Confirmed { attempt };
            }
            Ok(false) => debug!(%hash, attempt, "Transaction not yet confirmed"),
            Err(e) => warn!(%hash, attempt, error = %e, "Confirmation check failed"),
        }
    }

    info!(
        %hash,
        attempts = policy.max_attempts,
        "Transaction not confirmed within polling budget"
    );
    ConfirmationStatus::Unconfirmed {
        attempts: policy.max_attempts,
    }
}
