//! Transaction submission and confirmation workflow.
//!
//! # Data Flow
//! ```text
//! Submitter::submit(intent)
//!     → precondition.rs (wallet network vs expected network)
//!         └─ mismatch → NotSubmitted, session never busy
//!     → session.rs (Idle | Resolved → InFlight)
//!     → WalletProvider::sign_and_submit
//!         ├─ failure → classifier.rs
//!         └─ no identifier → NotSubmitted
//!     → ChainClient::wait_for_transaction
//!         └─ failure → classifier.rs
//!     → session.rs (InFlight → Resolved(outcome))
//! ```
//!
//! # Design Decisions
//! - `busy` is derived from the session state, never stored separately
//! - Collaborator failures are a closed union mapped once at the adapter edge
//! - Overlapping submits on one session fail fast with `SubmitError`

pub mod classifier;
pub mod context;
pub mod orchestrator;
pub mod precondition;
pub mod session;
pub mod transport;
pub mod types;

pub use context::{NetworkContext, NetworkSnapshot, SharedNetworkContext};
pub use orchestrator::Submitter;
pub use precondition::{NetworkGuard, NetworkMismatch};
pub use session::{SessionState, SubmissionSession};
pub use transport::{ChainClient, WaitOptions, WalletProvider};
pub use types::{
    FailureKind, SubmissionFailure, SubmissionOutcome, SubmitError, TransactionId,
    TransactionIntent, WalletResponse, UNKNOWN_ERROR,
};
