//! Collaborator interfaces consumed by the orchestrator.
//!
//! Adapters for real wallets and chain clients map their vendor errors into
//! [`SubmissionFailure`] here, once, so nothing downstream inspects foreign error shapes.

use async_trait::async_trait;

use crate::submission::types::{SubmissionFailure, TransactionId, TransactionIntent, WalletResponse};

/// Options for [`ChainClient::wait_for_transaction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Fail with [`SubmissionFailure::Execution`] when the transaction executed unsuccessfully.
    pub check_success: bool,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self { check_success: true }
    }
}

/// Signs and broadcasts transactions on the user's behalf.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    async fn sign_and_submit(
        &self,
        intent: &TransactionIntent,
    ) -> Result<WalletResponse, SubmissionFailure>;
}

/// Waits for a broadcast transaction to reach finality.
#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn wait_for_transaction(
        &self,
        transaction_id: &TransactionId,
        options: WaitOptions,
    ) -> Result<(), SubmissionFailure>;
}
