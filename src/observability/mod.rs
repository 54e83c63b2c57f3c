//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Submission attempts produce:
//!     → logging.rs (structured log events inside a per-attempt span)
//!     → metrics.rs (counters, histograms, gauges)
//!
//! Consumers:
//!     → Log aggregation (stdout, JSON or pretty)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Every attempt carries a UUID `attempt_id` span field
//! - Intent payloads are never logged
//! - Metrics calls are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
