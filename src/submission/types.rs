//! Submission result taxonomy and the closed failure union.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fallback message when a failure carries nothing usable.
pub const UNKNOWN_ERROR: &str = "Unknown Error";

/// Opaque transaction payload authored by the caller.
///
/// Never inspected by the submission core; only the wallet adapter interprets it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionIntent(serde_json::Value);

impl TransactionIntent {
    /// Wrap a JSON payload.
    pub fn new(payload: serde_json::Value) -> Self {
        Self(payload)
    }

    /// Borrow the raw payload.
    pub fn payload(&self) -> &serde_json::Value {
        &self.0
    }

    /// Take the raw payload.
    pub fn into_payload(self) -> serde_json::Value {
        self.0
    }
}

impl From<serde_json::Value> for TransactionIntent {
    fn from(payload: serde_json::Value) -> Self {
        Self(payload)
    }
}

/// Chain transaction identifier. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransactionId(String);

impl TransactionId {
    /// Returns `None` for an empty (or whitespace-only) identifier.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TransactionId {
    type Error = EmptyTransactionId;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::new(id).ok_or(EmptyTransactionId)
    }
}

impl From<TransactionId> for String {
    fn from(id: TransactionId) -> Self {
        id.0
    }
}

/// Rejected attempt to build a [`TransactionId`] from an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("transaction identifier must not be empty")]
pub struct EmptyTransactionId;

/// Result of one submission attempt.
///
/// Deserialized outcomes pass through the same message normalization as the
/// constructors, so an empty message never survives a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
#[serde(from = "OutcomeRepr")]
pub enum SubmissionOutcome {
    /// The wallet never broadcast the transaction.
    NotSubmitted {
        message: String,
    },
    /// The transaction reached the chain. `message` is set only when execution failed.
    Submitted {
        transaction_id: TransactionId,
        execution_succeeded: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl SubmissionOutcome {
    /// `NotSubmitted` with an empty message replaced by [`UNKNOWN_ERROR`].
    pub fn not_submitted(message: impl Into<String>) -> Self {
        Self::NotSubmitted {
            message: non_empty_or_unknown(message.into()),
        }
    }

    /// Transaction included and executed successfully.
    pub fn confirmed(transaction_id: TransactionId) -> Self {
        Self::Submitted {
            transaction_id,
            execution_succeeded: true,
            message: None,
        }
    }

    /// Transaction included but execution failed.
    pub fn execution_failed(transaction_id: TransactionId, message: impl Into<String>) -> Self {
        Self::Submitted {
            transaction_id,
            execution_succeeded: false,
            message: Some(non_empty_or_unknown(message.into())),
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted { .. })
    }

    pub fn transaction_id(&self) -> Option<&TransactionId> {
        match self {
            Self::Submitted { transaction_id, .. } => Some(transaction_id),
            Self::NotSubmitted { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::NotSubmitted { message } => Some(message),
            Self::Submitted { message, .. } => message.as_deref(),
        }
    }
}

/// Wire shape of [`SubmissionOutcome`] before normalization.
#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
enum OutcomeRepr {
    NotSubmitted {
        message: String,
    },
    Submitted {
        transaction_id: TransactionId,
        execution_succeeded: bool,
        #[serde(default)]
        message: Option<String>,
    },
}

impl From<OutcomeRepr> for SubmissionOutcome {
    fn from(repr: OutcomeRepr) -> Self {
        match repr {
            OutcomeRepr::NotSubmitted { message } => Self::not_submitted(message),
            OutcomeRepr::Submitted {
                transaction_id,
                execution_succeeded,
                message,
            } => Self::Submitted {
                transaction_id,
                execution_succeeded,
                message: message.map(non_empty_or_unknown),
            },
        }
    }
}

pub(crate) fn non_empty_or_unknown(message: String) -> String {
    if message.trim().is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        message
    }
}

/// What the wallet reported after a sign-and-submit call that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletResponse {
    /// Broadcast accepted; the chain identifier is known.
    Accepted(TransactionId),
    /// Legacy wallets report completion without an identifier when the submission failed.
    Unacknowledged { message: Option<String> },
}

/// Closed failure union raised by wallet and chain adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionFailure {
    /// Included on-chain but executed unsuccessfully.
    #[error("transaction {transaction_id} failed: {message}")]
    Execution {
        transaction_id: TransactionId,
        message: String,
    },
    /// Provider or client error carrying a human-readable message.
    #[error("{0}")]
    Message(String),
    /// Anything the adapter could not make sense of.
    #[error("unrecognized failure")]
    Unrecognized,
}

impl SubmissionFailure {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

/// Failure kinds, used for logging and metrics labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Wallet and application networks disagree.
    Precondition,
    /// Provider declined or errored before broadcast.
    WalletRejection,
    /// Provider reported completion without an identifier.
    LegacySubmission,
    /// Included on-chain, execution unsuccessful.
    ChainExecution,
    /// Finality never observed, or an unrelated fault while waiting.
    Confirmation,
    /// Unrecognized signal.
    Unknown,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::Precondition => "precondition",
            FailureKind::WalletRejection => "wallet_rejection",
            FailureKind::LegacySubmission => "legacy_submission",
            FailureKind::ChainExecution => "chain_execution",
            FailureKind::Confirmation => "confirmation",
            FailureKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Misuse of the submission API. Transaction failures never surface here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// A previous attempt on this session has not resolved yet.
    #[error("a submission is already in flight on this session")]
    AttemptInFlight,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transaction_id_rejects_empty() {
        assert!(TransactionId::new("").is_none());
        assert!(TransactionId::new("   ").is_none());
        assert_eq!(TransactionId::new("0xabc").unwrap().as_str(), "0xabc");
    }

    #[test]
    fn test_transaction_id_deserialize_rejects_empty() {
        let result: Result<TransactionId, _> = serde_json::from_value(json!(""));
        assert!(result.is_err());
    }

    #[test]
    fn test_outcome_deserialize_normalizes_empty_message() {
        let outcome: SubmissionOutcome =
            serde_json::from_value(json!({ "kind": "notSubmitted", "message": "" })).unwrap();
        assert_eq!(outcome.message(), Some(UNKNOWN_ERROR));

        let outcome: SubmissionOutcome = serde_json::from_value(json!({
            "kind": "submitted",
            "transactionId": "0xabc",
            "executionSucceeded": false,
            "message": "  ",
        }))
        .unwrap();
        assert_eq!(
            outcome,
            SubmissionOutcome::execution_failed(TransactionId::new("0xabc").unwrap(), "")
        );

        let outcome: SubmissionOutcome = serde_json::from_value(json!({
            "kind": "submitted",
            "transactionId": "0xabc",
            "executionSucceeded": true,
        }))
        .unwrap();
        assert_eq!(
            outcome,
            SubmissionOutcome::confirmed(TransactionId::new("0xabc").unwrap())
        );
    }

    #[test]
    fn test_not_submitted_never_empty() {
        let outcome = SubmissionOutcome::not_submitted("");
        assert_eq!(outcome.message(), Some(UNKNOWN_ERROR));
    }

    #[test]
    fn test_outcome_json_shape() {
        let id = TransactionId::new("0xabc").unwrap();
        let value = serde_json::to_value(SubmissionOutcome::execution_failed(
            id,
            "INSUFFICIENT_BALANCE",
        ))
        .unwrap();
        assert_eq!(
            value,
            json!({
                "kind": "submitted",
                "transactionId": "0xabc",
                "executionSucceeded": false,
                "message": "INSUFFICIENT_BALANCE",
            })
        );

        let value = serde_json::to_value(SubmissionOutcome::not_submitted("nope")).unwrap();
        assert_eq!(value, json!({ "kind": "notSubmitted", "message": "nope" }));
    }

    #[test]
    fn test_confirmed_has_no_message() {
        let outcome = SubmissionOutcome::confirmed(TransactionId::new("0x1").unwrap());
        assert!(outcome.is_submitted());
        assert_eq!(outcome.message(), None);
    }

    #[test]
    fn test_failure_display() {
        let failure = SubmissionFailure::Execution {
            transaction_id: TransactionId::new("0xabc").unwrap(),
            message: "OUT_OF_GAS".into(),
        };
        assert_eq!(failure.to_string(), "transaction 0xabc failed: OUT_OF_GAS");
        assert_eq!(FailureKind::WalletRejection.to_string(), "wallet_rejection");
    }
}
