//! Session/network context: what the wallet is connected to versus what the app expects.

use arc_swap::ArcSwap;
use std::sync::Arc;

/// Point-in-time view of the network context.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NetworkSnapshot {
    /// Network reported by the wallet. May lag behind reality or be unknown.
    pub wallet_network: Option<String>,
    /// Network the application is configured for.
    pub expected_network: String,
    /// Display name of the connected wallet provider.
    pub wallet_provider: Option<String>,
}

/// Read-only access to the process-wide network context.
pub trait NetworkContext: Send + Sync {
    fn snapshot(&self) -> NetworkSnapshot;
}

impl NetworkContext for NetworkSnapshot {
    fn snapshot(&self) -> NetworkSnapshot {
        self.clone()
    }
}

/// Lock-free shared context updated by the wallet connection layer.
#[derive(Debug)]
pub struct SharedNetworkContext {
    inner: ArcSwap<NetworkSnapshot>,
}

impl SharedNetworkContext {
    /// Create a context for `expected_network` with no wallet connected.
    pub fn new(expected_network: impl Into<String>) -> Self {
        Self {
            inner: ArcSwap::from_pointee(NetworkSnapshot {
                wallet_network: None,
                expected_network: expected_network.into(),
                wallet_provider: None,
            }),
        }
    }

    /// Record the connected wallet and the network it reports.
    pub fn set_wallet(&self, provider: impl Into<String>, network: Option<String>) {
        let provider = provider.into();
        tracing::debug!(provider = %provider, network = ?network, "Wallet context updated");
        self.inner.rcu(|current| {
            Arc::new(NetworkSnapshot {
                wallet_network: network.clone(),
                wallet_provider: Some(provider.clone()),
                ..NetworkSnapshot::clone(current)
            })
        });
    }

    /// Forget the connected wallet.
    pub fn clear_wallet(&self) {
        self.inner.rcu(|current| {
            Arc::new(NetworkSnapshot {
                wallet_network: None,
                wallet_provider: None,
                ..NetworkSnapshot::clone(current)
            })
        });
    }

    /// Switch the network the application expects.
    pub fn set_expected_network(&self, network: impl Into<String>) {
        let network = network.into();
        self.inner.rcu(|current| {
            Arc::new(NetworkSnapshot {
                expected_network: network.clone(),
                ..NetworkSnapshot::clone(current)
            })
        });
    }
}

impl NetworkContext for SharedNetworkContext {
    fn snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot::clone(&self.inner.load())
    }
}
