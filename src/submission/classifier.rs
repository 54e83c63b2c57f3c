//! Maps collaborator failures onto the outcome taxonomy.
//!
//! Infallible: every input yields a valid [`SubmissionOutcome`].

use crate::submission::types::{FailureKind, SubmissionFailure, SubmissionOutcome, UNKNOWN_ERROR};

/// Where in the attempt a failure was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Inside the wallet's sign-and-submit call.
    Wallet,
    /// While waiting for finality.
    Confirmation,
}

/// Classify a failure. Priority: execution failure, then message, then unknown.
pub fn classify(failure: SubmissionFailure) -> SubmissionOutcome {
    match failure {
        SubmissionFailure::Execution {
            transaction_id,
            message,
        } => SubmissionOutcome::execution_failed(transaction_id, message),
        SubmissionFailure::Message(message) => SubmissionOutcome::not_submitted(message),
        SubmissionFailure::Unrecognized => SubmissionOutcome::not_submitted(UNKNOWN_ERROR),
    }
}

/// Failure kind for a failure raised at `stage`.
pub fn failure_kind(stage: Stage, failure: &SubmissionFailure) -> FailureKind {
    match (failure, stage) {
        (SubmissionFailure::Execution { .. }, _) => FailureKind::ChainExecution,
        (SubmissionFailure::Message(_), Stage::Wallet) => FailureKind::WalletRejection,
        (SubmissionFailure::Message(_), Stage::Confirmation) => FailureKind::Confirmation,
        (SubmissionFailure::Unrecognized, _) => FailureKind::Unknown,
    }
}
