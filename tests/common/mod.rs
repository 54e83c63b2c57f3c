//! Scripted collaborators shared by integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use tx_submitter::submission::{
    ChainClient, NetworkContext, NetworkSnapshot, SubmissionFailure, Submitter, TransactionId,
    TransactionIntent, WaitOptions, WalletProvider, WalletResponse,
};

pub fn id(raw: &str) -> TransactionId {
    TransactionId::new(raw).unwrap()
}

pub fn intent() -> TransactionIntent {
    TransactionIntent::new(serde_json::json!({
        "function": "0x1::aptos_account::transfer",
        "functionArguments": ["0x2", 100],
    }))
}

pub fn network(wallet: &str, expected: &str, provider: &str) -> Arc<dyn NetworkContext> {
    Arc::new(NetworkSnapshot {
        wallet_network: Some(wallet.to_string()),
        expected_network: expected.to_string(),
        wallet_provider: Some(provider.to_string()),
    })
}

pub fn mainnet() -> Arc<dyn NetworkContext> {
    network("mainnet", "mainnet", "Petra")
}

/// Wallet returning a fixed result, optionally held until released.
pub struct MockWallet {
    result: Result<WalletResponse, SubmissionFailure>,
    gate: Option<Arc<Notify>>,
    calls: AtomicU32,
}

impl MockWallet {
    pub fn new(result: Result<WalletResponse, SubmissionFailure>) -> Arc<Self> {
        Arc::new(Self {
            result,
            gate: None,
            calls: AtomicU32::new(0),
        })
    }

    pub fn accepting(raw_id: &str) -> Arc<Self> {
        Self::new(Ok(WalletResponse::Accepted(id(raw_id))))
    }

    /// The call blocks until the returned `Notify` is signalled.
    pub fn gated(result: Result<WalletResponse, SubmissionFailure>) -> (Arc<Self>, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let wallet = Arc::new(Self {
            result,
            gate: Some(gate.clone()),
            calls: AtomicU32::new(0),
        });
        (wallet, gate)
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn sign_and_submit(
        &self,
        _intent: &TransactionIntent,
    ) -> Result<WalletResponse, SubmissionFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.result.clone()
    }
}

pub struct PanickingWallet;

#[async_trait]
impl WalletProvider for PanickingWallet {
    async fn sign_and_submit(
        &self,
        _intent: &TransactionIntent,
    ) -> Result<WalletResponse, SubmissionFailure> {
        panic!("wallet extension crashed");
    }
}

/// Chain client returning a fixed result and recording what it waited on.
pub struct MockChain {
    result: Result<(), SubmissionFailure>,
    gate: Option<Arc<Notify>>,
    waited: Mutex<Vec<(TransactionId, WaitOptions)>>,
}

impl MockChain {
    pub fn new(result: Result<(), SubmissionFailure>) -> Arc<Self> {
        Arc::new(Self {
            result,
            gate: None,
            waited: Mutex::new(Vec::new()),
        })
    }

    /// The wait blocks until the returned `Notify` is signalled.
    pub fn gated(result: Result<(), SubmissionFailure>) -> (Arc<Self>, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let chain = Arc::new(Self {
            result,
            gate: Some(gate.clone()),
            waited: Mutex::new(Vec::new()),
        });
        (chain, gate)
    }

    pub fn finalizing() -> Arc<Self> {
        Self::new(Ok(()))
    }

    pub fn waited(&self) -> Vec<(TransactionId, WaitOptions)> {
        self.waited.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn wait_for_transaction(
        &self,
        transaction_id: &TransactionId,
        options: WaitOptions,
    ) -> Result<(), SubmissionFailure> {
        self.waited
            .lock()
            .unwrap()
            .push((transaction_id.clone(), options));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.result.clone()
    }
}

pub fn submitter(
    wallet: Arc<dyn WalletProvider>,
    chain: Arc<dyn ChainClient>,
    network: Arc<dyn NetworkContext>,
) -> Submitter {
    Submitter::new(wallet, chain, network)
}
