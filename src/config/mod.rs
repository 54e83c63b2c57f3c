//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → SubmitterConfig (validated, immutable)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → apply_network_updates swaps the exemption set and expected network
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Only network settings are live-reloaded; the state machine never reads config

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use schema::{
    BlockchainConfig, ConfirmationConfig, NetworkConfig, ObservabilityConfig, SubmitterConfig,
};
