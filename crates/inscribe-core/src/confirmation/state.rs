//! Workflow states and terminal outcomes.

use crate::api::ConfirmResponse;
use crate::countdown::Countdown;

/// Terminal outcome of a confirmation workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user confirmed in time; the service issued a definitive
    /// inscription.
    Confirmed(ConfirmResponse),
    /// The user cancelled and the service acknowledged it.
    Cancelled,
    /// The window lapsed; the service was cancelled best-effort and local
    /// state was cleared unconditionally.
    ExpiredCancelled,
}

/// State of one confirmation workflow instance.
///
/// A single enum rather than parallel `confirming`/`cancelling` flags: only
/// [`WorkflowState::Ready`] can start a terminal transition, so at most one
/// external confirm/cancel call can ever be made per instance, by
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState {
    /// The pending record has not been read yet.
    Loading,
    /// Record found; the countdown is running.
    Ready {
        /// The confirmation window, anchored to its persisted start.
        countdown: Countdown,
    },
    /// No record under this cache key (absent, corrupted, or already
    /// resolved elsewhere). Read-only dead end: the user must start a new
    /// submission.
    NotFound,
    /// Confirm call in flight.
    Confirming,
    /// Cancel call in flight.
    Cancelling,
    /// Expiry cleanup in flight.
    Expiring,
    /// The workflow finished; no further transitions.
    Terminal(Outcome),
}

impl WorkflowState {
    /// The state name used in errors and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading",
            Self::Ready { .. } => "Ready",
            Self::NotFound => "NotFound",
            Self::Confirming => "Confirming",
            Self::Cancelling => "Cancelling",
            Self::Expiring => "Expiring",
            Self::Terminal(_) => "Terminal",
        }
    }

    /// Whether this state ends the workflow.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal(_) | Self::NotFound)
    }
}
