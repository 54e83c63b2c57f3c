//! Local private-key wallet that signs and broadcasts intents.
//!
//! # Security
//! - Private keys are loaded from hex or from an environment variable
//! - Keys are never logged or serialized

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainConfig, BlockchainError, BlockchainResult};
use crate::submission::transport::WalletProvider;
use crate::submission::types::{
    SubmissionFailure, TransactionId, TransactionIntent, WalletResponse,
};

/// Environment variable name for the private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "TX_SUBMITTER_PRIVATE_KEY";

/// Wallet that signs with a local key and broadcasts over JSON-RPC.
#[derive(Clone)]
pub struct LocalWallet {
    address: Address,
    /// Provider with a wallet filler: fills nonce, gas, chain id and signs.
    provider: Arc<dyn Provider + Send + Sync>,
    timeout_duration: Duration,
}

impl LocalWallet {
    /// Create a wallet from a hex-encoded private key string (with or without 0x prefix).
    pub fn from_private_key(
        private_key_hex: &str,
        config: &BlockchainConfig,
    ) -> BlockchainResult<Self> {
        let key_hex = private_key_hex
            .strip_prefix("0x")
            .unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| BlockchainError::Wallet(format!("Invalid private key format: {}", e)))?;
        let address = signer.address();

        let rpc_url: url::Url = config.rpc_url.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(rpc_url);

        tracing::info!(
            address = %address,
            chain_id = config.chain_id,
            "Wallet initialized"
        );

        Ok(Self {
            address,
            provider: Arc::new(provider),
            timeout_duration: Duration::from_secs(config.rpc_timeout_secs),
        })
    }

    /// Load wallet key from `TX_SUBMITTER_PRIVATE_KEY`.
    pub fn from_env(config: &BlockchainConfig) -> BlockchainResult<Self> {
        let private_key = std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| {
            BlockchainError::Wallet(format!(
                "Environment variable {} not set",
                PRIVATE_KEY_ENV_VAR
            ))
        })?;

        Self::from_private_key(&private_key, config)
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

/// Decode an intent into an alloy transaction request.
fn transaction_request(intent: &TransactionIntent) -> BlockchainResult<TransactionRequest> {
    serde_json::from_value(intent.payload().clone())
        .map_err(|e| BlockchainError::InvalidIntent(e.to_string()))
}

#[async_trait]
impl WalletProvider for LocalWallet {
    async fn sign_and_submit(
        &self,
        intent: &TransactionIntent,
    ) -> Result<WalletResponse, SubmissionFailure> {
        let request = transaction_request(intent)?;

        let pending = match timeout(self.timeout_duration, self.provider.send_transaction(request)).await {
            Ok(Ok(pending)) => pending,
            Ok(Err(e)) => {
                let message = e
                    .as_error_resp()
                    .map(|payload| payload.message.to_string())
                    .unwrap_or_else(|| e.to_string());
                tracing::warn!(error = %message, "Broadcast rejected by RPC");
                return Err(SubmissionFailure::Message(message));
            }
            Err(_) => {
                return Err(BlockchainError::Timeout(self.timeout_duration.as_secs()).into());
            }
        };

        let tx_hash = *pending.tx_hash();
        match TransactionId::new(tx_hash.to_string()) {
            Some(id) => Ok(WalletResponse::Accepted(id)),
            None => Ok(WalletResponse::Unacknowledged { message: None }),
        }
    }
}

impl std::fmt::Debug for LocalWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalWallet")
            .field("address", &self.address)
            .finish()
    }
}
