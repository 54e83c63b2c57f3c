//! Network-consistency guard run before any wallet interaction.
//!
//! Some wallet providers cache the network they report and cannot be trusted
//! on it. Those are listed by name in `network.exempt_wallet_providers` and
//! bypass the check. The list is swapped atomically on config reload.

use arc_swap::ArcSwap;
use std::collections::HashSet;
use thiserror::Error;

use crate::config::schema::NetworkConfig;
use crate::submission::context::NetworkSnapshot;

/// Wallet network differs from the one the application expects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Wallet and Explorer should use the same network to submit a transaction")]
pub struct NetworkMismatch {
    pub wallet_network: Option<String>,
    pub expected_network: String,
}

/// Precondition check with a hot-swappable provider exemption set.
#[derive(Debug)]
pub struct NetworkGuard {
    exempt_providers: ArcSwap<HashSet<String>>,
}

impl NetworkGuard {
    pub fn new<I, S>(exempt_providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exempt_providers: ArcSwap::from_pointee(
                exempt_providers.into_iter().map(Into::into).collect(),
            ),
        }
    }

    pub fn from_config(config: &NetworkConfig) -> Self {
        Self::new(config.exempt_wallet_providers.iter().cloned())
    }

    /// Replace the exemption set.
    pub fn reload<I, S>(&self, exempt_providers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let providers: HashSet<String> = exempt_providers.into_iter().map(Into::into).collect();
        tracing::info!(count = providers.len(), "Wallet provider exemptions reloaded");
        self.exempt_providers.store(providers.into());
    }

    pub fn is_exempt(&self, provider: &str) -> bool {
        self.exempt_providers.load().contains(provider)
    }

    /// Passes when the networks agree (case-insensitively) or the provider is exempt.
    ///
    /// An unknown wallet network never agrees with anything.
    pub fn check(&self, snapshot: &NetworkSnapshot) -> Result<(), NetworkMismatch> {
        let same_network = snapshot
            .wallet_network
            .as_deref()
            .is_some_and(|network| network.eq_ignore_ascii_case(&snapshot.expected_network));
        if same_network {
            return Ok(());
        }

        if let Some(provider) = snapshot.wallet_provider.as_deref() {
            if self.is_exempt(provider) {
                tracing::debug!(
                    provider = %provider,
                    wallet_network = ?snapshot.wallet_network,
                    "Network check bypassed for exempt provider"
                );
                return Ok(());
            }
        }

        Err(NetworkMismatch {
            wallet_network: snapshot.wallet_network.clone(),
            expected_network: snapshot.expected_network.clone(),
        })
    }
}

impl Default for NetworkGuard {
    fn default() -> Self {
        Self::from_config(&NetworkConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(wallet: Option<&str>, expected: &str, provider: Option<&str>) -> NetworkSnapshot {
        NetworkSnapshot {
            wallet_network: wallet.map(String::from),
            expected_network: expected.to_string(),
            wallet_provider: provider.map(String::from),
        }
    }

    #[test]
    fn test_mismatch_rejected() {
        let guard = NetworkGuard::default();
        let err = guard
            .check(&snapshot(Some("testnet"), "mainnet", Some("Petra")))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Wallet and Explorer should use the same network to submit a transaction"
        );
        assert_eq!(err.wallet_network.as_deref(), Some("testnet"));
    }

    #[test]
    fn test_same_network_ignores_case() {
        let guard = NetworkGuard::default();
        assert!(guard.check(&snapshot(Some("Mainnet"), "mainnet", Some("Petra"))).is_ok());
    }

    #[test]
    fn test_unknown_wallet_network_rejected() {
        let guard = NetworkGuard::default();
        assert!(guard.check(&snapshot(None, "mainnet", Some("Petra"))).is_err());
        assert!(guard.check(&snapshot(None, "mainnet", None)).is_err());
    }

    #[test]
    fn test_default_exemption() {
        let guard = NetworkGuard::default();
        assert!(guard
            .check(&snapshot(Some("testnet"), "mainnet", Some("Google (AptosConnect)")))
            .is_ok());
    }

    #[test]
    fn test_reload_replaces_exemptions() {
        let guard = NetworkGuard::new(["Petra"]);
        let mismatch = snapshot(Some("devnet"), "mainnet", Some("Petra"));
        assert!(guard.check(&mismatch).is_ok());

        guard.reload(Vec::<String>::new());
        assert!(!guard.is_exempt("Petra"));
        assert!(guard.check(&mismatch).is_err());
    }
}
