//! Observable submission state.
//!
//! # States
//! - Idle: nothing recorded (fresh session, or after `clear()`)
//! - InFlight: an attempt was admitted and has not resolved
//! - Resolved: the latest attempt's outcome
//!
//! # State Transitions
//! ```text
//! Idle | Resolved → InFlight: attempt admitted
//! Idle | Resolved → Resolved: precondition failed (never InFlight)
//! InFlight → Resolved: outcome recorded
//! Resolved → Idle: clear()
//! ```
//!
//! `busy` is derived: it is true exactly in `InFlight`.

use tokio::sync::watch;

use crate::submission::types::{SubmitError, SubmissionOutcome};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    InFlight,
    Resolved(SubmissionOutcome),
}

impl SessionState {
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionState::InFlight)
    }

    pub fn outcome(&self) -> Option<&SubmissionOutcome> {
        match self {
            SessionState::Resolved(outcome) => Some(outcome),
            SessionState::Idle | SessionState::InFlight => None,
        }
    }
}

/// How an admitted `submit()` proceeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Admission {
    /// Session moved to `InFlight`; the attempt must now be resolved.
    Started,
    /// An early outcome was recorded directly.
    Resolved,
}

/// State holder for one owning context. Dropped with its owner.
#[derive(Debug)]
pub struct SubmissionSession {
    state: watch::Sender<SessionState>,
}

impl SubmissionSession {
    pub fn new() -> Self {
        let (state, _) = watch::channel(SessionState::Idle);
        Self { state }
    }

    /// Receive every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn outcome(&self) -> Option<SubmissionOutcome> {
        self.state.borrow().outcome().cloned()
    }

    pub fn is_busy(&self) -> bool {
        self.state.borrow().is_busy()
    }

    /// Drop the recorded outcome. An in-flight attempt is untouched and still lands.
    pub fn clear(&self) {
        self.state.send_if_modified(|state| match state {
            SessionState::Resolved(_) => {
                *state = SessionState::Idle;
                true
            }
            SessionState::Idle | SessionState::InFlight => false,
        });
    }

    /// Admit a new attempt, atomically with respect to other callers.
    ///
    /// `early` is the outcome of a failed precondition; when present it is
    /// recorded instead of entering `InFlight`.
    pub(crate) fn admit(
        &self,
        early: Option<SubmissionOutcome>,
    ) -> Result<Admission, SubmitError> {
        let mut early = early;
        let mut admission = Err(SubmitError::AttemptInFlight);
        self.state.send_if_modified(|state| {
            if state.is_busy() {
                return false;
            }
            *state = match early.take() {
                Some(outcome) => {
                    admission = Ok(Admission::Resolved);
                    SessionState::Resolved(outcome)
                }
                None => {
                    admission = Ok(Admission::Started);
                    SessionState::InFlight
                }
            };
            true
        });
        admission
    }

    pub(crate) fn resolve(&self, outcome: SubmissionOutcome) {
        self.state.send_replace(SessionState::Resolved(outcome));
    }
}

impl Default for SubmissionSession {
    fn default() -> Self {
        Self::new()
    }
}
