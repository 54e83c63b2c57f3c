//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SubmitterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::SubmitterConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("network.expected_network must not be empty")]
    EmptyExpectedNetwork,

    #[error("network.exempt_wallet_providers contains an empty entry")]
    EmptyExemptProvider,

    #[error("confirmation.timeout_secs must be greater than zero")]
    ZeroConfirmationTimeout,

    #[error("blockchain.rpc_url '{url}' is invalid: {reason}")]
    InvalidRpcUrl { url: String, reason: String },

    #[error("blockchain.{field} must be greater than zero")]
    ZeroBlockchainSetting { field: &'static str },

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Check a parsed configuration.
pub fn validate_config(config: &SubmitterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.network.expected_network.trim().is_empty() {
        errors.push(ValidationError::EmptyExpectedNetwork);
    }
    if config
        .network
        .exempt_wallet_providers
        .iter()
        .any(|provider| provider.trim().is_empty())
    {
        errors.push(ValidationError::EmptyExemptProvider);
    }

    if config.confirmation.timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroConfirmationTimeout);
    }

    let chain = &config.blockchain;
    if chain.enabled {
        for url in std::iter::once(&chain.rpc_url).chain(&chain.failover_urls) {
            if let Err(e) = url.parse::<url::Url>() {
                errors.push(ValidationError::InvalidRpcUrl {
                    url: url.clone(),
                    reason: e.to_string(),
                });
            }
        }
        if chain.rpc_timeout_secs == 0 {
            errors.push(ValidationError::ZeroBlockchainSetting {
                field: "rpc_timeout_secs",
            });
        }
        if chain.poll_interval_ms == 0 {
            errors.push(ValidationError::ZeroBlockchainSetting {
                field: "poll_interval_ms",
            });
        }
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
