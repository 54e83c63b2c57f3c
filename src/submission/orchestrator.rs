//! Drives one submission attempt: precondition, wallet, confirmation, classification.

use futures_util::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::schema::{ConfirmationConfig, SubmitterConfig};
use crate::observability::metrics;
use crate::submission::classifier::{classify, failure_kind, Stage};
use crate::submission::context::NetworkContext;
use crate::submission::precondition::NetworkGuard;
use crate::submission::session::{Admission, SessionState, SubmissionSession};
use crate::submission::transport::{ChainClient, WaitOptions, WalletProvider};
use crate::submission::types::{
    FailureKind, SubmissionFailure, SubmissionOutcome, SubmitError, TransactionId,
    TransactionIntent, WalletResponse, UNKNOWN_ERROR,
};

/// Submission orchestrator owning one [`SubmissionSession`].
///
/// Results are delivered through the session, not returned: callers render
/// from [`Submitter::subscribe`] and disable re-entry while `busy`.
pub struct Submitter {
    wallet: Arc<dyn WalletProvider>,
    chain: Arc<dyn ChainClient>,
    network: Arc<dyn NetworkContext>,
    guard: Arc<NetworkGuard>,
    session: SubmissionSession,
    confirmation: ConfirmationConfig,
}

impl Submitter {
    /// Create a submitter with the default exemption set and no confirmation timeout.
    pub fn new(
        wallet: Arc<dyn WalletProvider>,
        chain: Arc<dyn ChainClient>,
        network: Arc<dyn NetworkContext>,
    ) -> Self {
        Self {
            wallet,
            chain,
            network,
            guard: Arc::new(NetworkGuard::default()),
            session: SubmissionSession::new(),
            confirmation: ConfirmationConfig::default(),
        }
    }

    /// Create a submitter from loaded configuration.
    pub fn from_config(
        config: &SubmitterConfig,
        wallet: Arc<dyn WalletProvider>,
        chain: Arc<dyn ChainClient>,
        network: Arc<dyn NetworkContext>,
    ) -> Self {
        Self::new(wallet, chain, network)
            .with_guard(Arc::new(NetworkGuard::from_config(&config.network)))
            .with_confirmation(config.confirmation.clone())
    }

    /// Share a network guard, e.g. one fed by the config watcher.
    pub fn with_guard(mut self, guard: Arc<NetworkGuard>) -> Self {
        self.guard = guard;
        self
    }

    pub fn with_confirmation(mut self, confirmation: ConfirmationConfig) -> Self {
        self.confirmation = confirmation;
        self
    }

    pub fn guard(&self) -> &Arc<NetworkGuard> {
        &self.guard
    }

    pub fn session(&self) -> &SubmissionSession {
        &self.session
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.session.subscribe()
    }

    pub fn outcome(&self) -> Option<SubmissionOutcome> {
        self.session.outcome()
    }

    pub fn is_busy(&self) -> bool {
        self.session.is_busy()
    }

    pub fn clear(&self) {
        self.session.clear();
    }

    /// Submit a transaction and record exactly one outcome on the session.
    ///
    /// Transaction failures never surface as `Err`; they land as outcomes.
    ///
    /// # Errors
    ///
    /// [`SubmitError::AttemptInFlight`] when a previous attempt has not
    /// resolved. The session and the running attempt are left untouched.
    pub async fn submit(&self, intent: TransactionIntent) -> Result<(), SubmitError> {
        let span = tracing::info_span!("submission", attempt_id = %Uuid::new_v4());
        self.submit_inner(intent).instrument(span).await
    }

    async fn submit_inner(&self, intent: TransactionIntent) -> Result<(), SubmitError> {
        let snapshot = self.network.snapshot();
        let mismatch = self.guard.check(&snapshot).err();
        let early = mismatch
            .as_ref()
            .map(|mismatch| SubmissionOutcome::not_submitted(mismatch.to_string()));

        match self.session.admit(early) {
            Err(err) => {
                metrics::record_rejected_attempt();
                tracing::warn!("Submission rejected, previous attempt still in flight");
                return Err(err);
            }
            Ok(Admission::Resolved) => {
                if let Some(mismatch) = mismatch {
                    tracing::warn!(
                        wallet_network = ?mismatch.wallet_network,
                        expected_network = %mismatch.expected_network,
                        provider = ?snapshot.wallet_provider,
                        "Network mismatch, transaction not submitted"
                    );
                }
                metrics::record_submission(FailureKind::Precondition.as_str());
                return Ok(());
            }
            Ok(Admission::Started) => {}
        }

        let in_flight = InFlight::new(&self.session);
        let (outcome, kind) = self.run_attempt(&intent).await;

        match kind {
            None => tracing::info!(
                transaction_id = ?outcome.transaction_id(),
                "Transaction confirmed"
            ),
            Some(kind) => tracing::warn!(
                kind = %kind,
                transaction_id = ?outcome.transaction_id(),
                message = ?outcome.message(),
                "Transaction submission failed"
            ),
        }
        metrics::record_submission(kind.map_or("confirmed", FailureKind::as_str));
        in_flight.resolve(outcome);
        Ok(())
    }

    async fn run_attempt(
        &self,
        intent: &TransactionIntent,
    ) -> (SubmissionOutcome, Option<FailureKind>) {
        let transaction_id = match shielded(self.wallet.sign_and_submit(intent)).await {
            Ok(WalletResponse::Accepted(transaction_id)) => transaction_id,
            Ok(WalletResponse::Unacknowledged { message }) => {
                return (
                    SubmissionOutcome::not_submitted(message.unwrap_or_default()),
                    Some(FailureKind::LegacySubmission),
                );
            }
            Err(failure) => {
                let kind = failure_kind(Stage::Wallet, &failure);
                return (classify(failure), Some(kind));
            }
        };

        tracing::info!(transaction_id = %transaction_id, "Transaction broadcast, awaiting confirmation");

        let started = Instant::now();
        let result = self.await_confirmation(&transaction_id).await;
        metrics::record_confirmation_duration(started.elapsed());

        match result {
            Ok(()) => (SubmissionOutcome::confirmed(transaction_id), None),
            Err(failure) => {
                let kind = failure_kind(Stage::Confirmation, &failure);
                (classify(pin_identifier(failure, &transaction_id)), Some(kind))
            }
        }
    }

    async fn await_confirmation(
        &self,
        transaction_id: &TransactionId,
    ) -> Result<(), SubmissionFailure> {
        let options = WaitOptions { check_success: true };
        let wait = shielded(self.chain.wait_for_transaction(transaction_id, options));

        match self.confirmation.timeout() {
            Some(limit) => tokio::time::timeout(limit, wait).await.unwrap_or_else(|_| {
                Err(SubmissionFailure::Message(format!(
                    "Timed out after {}s waiting for transaction {}",
                    limit.as_secs(),
                    transaction_id
                )))
            }),
            None => wait.await,
        }
    }
}

/// Run a collaborator future, turning a panic into an unrecognized failure.
async fn shielded<T>(
    future: impl Future<Output = Result<T, SubmissionFailure>>,
) -> Result<T, SubmissionFailure> {
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(result) => result,
        Err(_) => {
            tracing::error!("Collaborator panicked during submission");
            Err(SubmissionFailure::Unrecognized)
        }
    }
}

/// The chain reports on the transaction we waited for; keep that identifier.
fn pin_identifier(failure: SubmissionFailure, awaited: &TransactionId) -> SubmissionFailure {
    match failure {
        SubmissionFailure::Execution {
            transaction_id,
            message,
        } if transaction_id != *awaited => {
            tracing::warn!(
                reported = %transaction_id,
                awaited = %awaited,
                "Chain failure reported a different transaction identifier"
            );
            SubmissionFailure::Execution {
                transaction_id: awaited.clone(),
                message,
            }
        }
        other => other,
    }
}

/// Resolves the session if the attempt is dropped before recording an outcome.
struct InFlight<'a> {
    session: &'a SubmissionSession,
    resolved: bool,
}

impl<'a> InFlight<'a> {
    fn new(session: &'a SubmissionSession) -> Self {
        Self {
            session,
            resolved: false,
        }
    }

    fn resolve(mut self, outcome: SubmissionOutcome) {
        self.resolved = true;
        self.session.resolve(outcome);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.resolved {
            tracing::warn!("Submission dropped before resolution");
            metrics::record_submission(FailureKind::Unknown.as_str());
            self.session
                .resolve(SubmissionOutcome::not_submitted(UNKNOWN_ERROR));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::context::NetworkSnapshot;
    use async_trait::async_trait;

    struct AcceptingWallet;

    #[async_trait]
    impl WalletProvider for AcceptingWallet {
        async fn sign_and_submit(
            &self,
            _intent: &TransactionIntent,
        ) -> Result<WalletResponse, SubmissionFailure> {
            Ok(WalletResponse::Accepted(TransactionId::new("0xabc").unwrap()))
        }
    }

    struct OtherIdChain;

    #[async_trait]
    impl ChainClient for OtherIdChain {
        async fn wait_for_transaction(
            &self,
            _transaction_id: &TransactionId,
            _options: WaitOptions,
        ) -> Result<(), SubmissionFailure> {
            Err(SubmissionFailure::Execution {
                transaction_id: TransactionId::new("0xdef").unwrap(),
                message: "ABORTED".into(),
            })
        }
    }

    struct NeverChain;

    #[async_trait]
    impl ChainClient for NeverChain {
        async fn wait_for_transaction(
            &self,
            _transaction_id: &TransactionId,
            _options: WaitOptions,
        ) -> Result<(), SubmissionFailure> {
            std::future::pending().await
        }
    }

    fn matching_network() -> Arc<dyn NetworkContext> {
        Arc::new(NetworkSnapshot {
            wallet_network: Some("mainnet".into()),
            expected_network: "mainnet".into(),
            wallet_provider: Some("Petra".into()),
        })
    }

    #[tokio::test]
    async fn test_awaited_identifier_wins() {
        let submitter = Submitter::new(
            Arc::new(AcceptingWallet),
            Arc::new(OtherIdChain),
            matching_network(),
        );
        submitter.submit(TransactionIntent::default()).await.unwrap();
        assert_eq!(
            submitter.outcome(),
            Some(SubmissionOutcome::execution_failed(
                TransactionId::new("0xabc").unwrap(),
                "ABORTED"
            ))
        );
    }

    #[tokio::test]
    async fn test_dropped_attempt_resolves_session() {
        let submitter = Submitter::new(
            Arc::new(AcceptingWallet),
            Arc::new(NeverChain),
            matching_network(),
        );

        let attempt = submitter.submit(TransactionIntent::default());
        let timed_out = tokio::time::timeout(std::time::Duration::from_millis(20), attempt).await;
        assert!(timed_out.is_err());

        assert!(!submitter.is_busy());
        assert_eq!(
            submitter.outcome(),
            Some(SubmissionOutcome::not_submitted(UNKNOWN_ERROR))
        );
    }

    #[tokio::test]
    async fn test_confirmation_timeout() {
        let submitter = Submitter::new(
            Arc::new(AcceptingWallet),
            Arc::new(NeverChain),
            matching_network(),
        )
        .with_confirmation(ConfirmationConfig {
            timeout_secs: Some(1),
        });

        tokio::time::pause();
        submitter.submit(TransactionIntent::default()).await.unwrap();

        let outcome = submitter.outcome().unwrap();
        assert!(!outcome.is_submitted());
        assert_eq!(
            outcome.message(),
            Some("Timed out after 1s waiting for transaction 0xabc")
        );
    }
}
