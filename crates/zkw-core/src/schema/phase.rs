//! Phases of a single send attempt.

use std::fmt;

/// Where a send attempt currently is. Lives only for the duration of one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransactionPhase {
    /// Nothing started yet.
    #[default]
    Idle,
    /// Asking the chain client for the user operation and its auth material.
    BuildingOperation,
    /// Running witness and proof generation.
    GeneratingProof,
    /// Handing the proof-bearing operation to the relay.
    Submitting,
    /// Polling the chain for inclusion.
    WaitingConfirmation,
    /// The operation was accepted by the relay.
    Completed,
    /// The attempt ended with an error.
    Failed,
}

impl TransactionPhase {
    /// Human-readable label for progress displays.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "Starting transaction",
            Self::BuildingOperation => "Initializing transaction",
            Self::GeneratingProof => "Generating zero-knowledge proof",
            Self::Submitting => "Sending transaction",
            Self::WaitingConfirmation => "Waiting for confirmation",
            Self::Completed => "Transaction completed",
            Self::Failed => "Transaction failed",
        }
    }

    /// Whether the attempt has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Whether `next` is a legal successor of `self`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::BuildingOperation) |
                (
                    Self::BuildingOperation,
                    Self::GeneratingProof | Self::Failed
                ) |
                (Self::GeneratingProof, Self::Submitting | Self::Failed) |
                (Self::Submitting, Self::WaitingConfirmation | Self::Failed) |
                (Self::WaitingConfirmation, Self::Completed)
        )
    }
}

impl fmt::Display for TransactionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Notification emitted on every phase transition. Advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    /// The phase just entered.
    pub phase: TransactionPhase,
    /// Label to display for it.
    pub label: &'static str,
}

impl From<TransactionPhase> for PhaseChange {
    fn from(phase: TransactionPhase) -> Self {
        Self {
            phase,
            label: phase.label(),
        }
    }
}
