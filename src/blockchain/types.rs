//! Chain-specific types and error definitions.

use thiserror::Error;

use crate::submission::types::SubmissionFailure;

pub use crate::config::schema::BlockchainConfig;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur inside the alloy adapters.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Invalid private key format or signing error.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Intent payload is not a valid transaction request.
    #[error("Invalid transaction intent: {0}")]
    InvalidIntent(String),

    /// Identifier is not a transaction hash.
    #[error("Invalid transaction hash '{0}'")]
    InvalidHash(String),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

impl From<BlockchainError> for SubmissionFailure {
    fn from(err: BlockchainError) -> Self {
        SubmissionFailure::Message(err.to_string())
    }
}

/// Final state of a transaction receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationStatus {
    /// Executed successfully with the required block depth.
    Confirmed { block_number: u64 },
    /// Included but execution reverted.
    Reverted { block_number: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_conversion() {
        let chain_id = ChainId::from(1u64);
        assert_eq!(chain_id.0, 1);
        assert_eq!(u64::from(chain_id), 1);
    }

    #[test]
    fn test_default_config() {
        let config = BlockchainConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.rpc_timeout_secs, 10);
        assert_eq!(config.confirmation_blocks, 1);
    }

    #[test]
    fn test_error_maps_to_message_failure() {
        let failure = SubmissionFailure::from(BlockchainError::Timeout(10));
        assert_eq!(
            failure,
            SubmissionFailure::Message("RPC timeout after 10 seconds".into())
        );
    }
}
