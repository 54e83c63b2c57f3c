//! Transaction submission and confirmation for wallet-driven UIs.

pub mod blockchain;
pub mod config;
pub mod observability;
pub mod submission;

pub use config::schema::SubmitterConfig;
pub use submission::{SubmissionOutcome, Submitter};
