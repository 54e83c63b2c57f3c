//! Alloy-backed collaborators for EVM chains.
//!
//! # Data Flow
//! ```text
//! TransactionIntent (JSON)
//!     → wallet.rs (decode to TransactionRequest, fill, sign, broadcast)
//!     → TransactionId
//!     → client.rs (poll receipts with failover until final)
//!     → SubmissionFailure on revert / RPC exhaustion
//! ```
//!
//! # Security Constraints
//! - Private keys only from hex input or environment variables
//! - Never log private keys or intent payloads
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use types::{BlockchainConfig, BlockchainError, ChainId};
pub use wallet::LocalWallet;
