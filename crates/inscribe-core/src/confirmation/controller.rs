//! Confirmation workflow controller.

use std::sync::Arc;

use tracing::{info, warn};

use super::error::ConfirmationError;
use super::state::{Outcome, WorkflowState};
use crate::api::{ConfirmResponse, InscriptionApi};
use crate::countdown::{Clock, Countdown, CountdownTicker};
use crate::pending::{PendingInscriptionRecord, PendingStore};

/// Orchestrates one pending inscription from load to terminal outcome.
///
/// Holds the store, the service client, and the clock behind trait objects
/// so tests can drive the whole workflow with fakes and simulated time.
pub struct ConfirmationController {
    store: Arc<dyn PendingStore>,
    api: Arc<dyn InscriptionApi>,
    clock: Arc<dyn Clock>,
    window_secs: u64,
    cache_key: String,
    record: Option<PendingInscriptionRecord>,
    state: WorkflowState,
}

impl ConfirmationController {
    /// Creates a controller for `cache_key` in the `Loading` state.
    ///
    /// `cache_key` must already be percent-decoded (see
    /// [`crate::api::decode_cache_key`]); the same token is used for storage
    /// keys and API payloads.
    #[must_use]
    pub fn new(
        store: Arc<dyn PendingStore>,
        api: Arc<dyn InscriptionApi>,
        clock: Arc<dyn Clock>,
        window_secs: u64,
        cache_key: impl Into<String>,
    ) -> Self {
        Self {
            store,
            api,
            clock,
            window_secs,
            cache_key: cache_key.into(),
            record: None,
            state: WorkflowState::Loading,
        }
    }

    /// The current workflow state.
    #[must_use]
    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// The decoded cache key this workflow is bound to.
    #[must_use]
    pub fn cache_key(&self) -> &str {
        &self.cache_key
    }

    /// The loaded record, for display. `None` until `load` finds one.
    #[must_use]
    pub fn record(&self) -> Option<&PendingInscriptionRecord> {
        self.record.as_ref()
    }

    /// Reads the pending record and starts the countdown.
    ///
    /// `Loading` moves to `Ready` when the record exists (starting the
    /// window idempotently: a reload resumes the original start timestamp),
    /// or to `NotFound` when it is absent or malformed. Calls after the
    /// first leave the state unchanged.
    pub fn load(&mut self) -> &WorkflowState {
        if !matches!(self.state, WorkflowState::Loading) {
            return &self.state;
        }
        match self.store.load(&self.cache_key) {
            Some(record) => {
                let started_at_ms = self.store.start_timer(&self.cache_key, self.clock.now_ms());
                info!(
                    cache_key = %self.cache_key,
                    started_at_ms,
                    window_secs = self.window_secs,
                    "pending inscription loaded"
                );
                self.record = Some(record);
                self.state = WorkflowState::Ready {
                    countdown: Countdown::new(started_at_ms, self.window_secs),
                };
            },
            None => {
                self.state = WorkflowState::NotFound;
            },
        }
        &self.state
    }

    /// Seconds left in the window, when the workflow is `Ready`.
    #[must_use]
    pub fn remaining_secs(&self) -> Option<u64> {
        match &self.state {
            WorkflowState::Ready { countdown } => {
                Some(countdown.remaining_secs_at(self.clock.now_ms()))
            },
            _ => None,
        }
    }

    /// A 1 Hz ticker over the running window, when the workflow is `Ready`.
    #[must_use]
    pub fn ticker(&self) -> Option<CountdownTicker> {
        match &self.state {
            WorkflowState::Ready { countdown } => {
                Some(CountdownTicker::new(*countdown, Arc::clone(&self.clock)))
            },
            _ => None,
        }
    }

    /// Confirms the pending inscription.
    ///
    /// On success the store is cleared and the workflow ends in
    /// `Terminal(Confirmed)`. On service failure the workflow returns to
    /// `Ready` — the window keeps running from its original start, network
    /// latency never extends it — and the caller may retry.
    ///
    /// # Errors
    ///
    /// [`ConfirmationError::Api`] on service failure (recoverable);
    /// [`ConfirmationError::RecordNotFound`] /
    /// [`ConfirmationError::InvalidTransition`] when not `Ready`.
    pub async fn confirm(&mut self) -> Result<ConfirmResponse, ConfirmationError> {
        let countdown = self.take_ready("confirm")?;
        self.state = WorkflowState::Confirming;
        match self.api.confirm(&self.cache_key).await {
            Ok(response) => {
                self.store.clear(&self.cache_key);
                info!(
                    cache_key = %self.cache_key,
                    inscription_id = response.inscription_id,
                    status = %response.inscription_status,
                    "inscription confirmed"
                );
                self.state = WorkflowState::Terminal(Outcome::Confirmed(response.clone()));
                Ok(response)
            },
            Err(err) => {
                warn!(cache_key = %self.cache_key, error = %err, "confirm failed; staying ready");
                self.state = WorkflowState::Ready { countdown };
                Err(ConfirmationError::Api(err))
            },
        }
    }

    /// Cancels the pending inscription at the user's request.
    ///
    /// Cancel is only applied locally once the service acknowledges it;
    /// outside the expiry path a failed cancel leaves the reservation
    /// pending and the workflow `Ready`.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::confirm`].
    pub async fn cancel(&mut self) -> Result<(), ConfirmationError> {
        let countdown = self.take_ready("cancel")?;
        self.state = WorkflowState::Cancelling;
        match self.api.cancel(&self.cache_key).await {
            Ok(()) => {
                self.store.clear(&self.cache_key);
                info!(cache_key = %self.cache_key, "inscription cancelled");
                self.state = WorkflowState::Terminal(Outcome::Cancelled);
                Ok(())
            },
            Err(err) => {
                warn!(cache_key = %self.cache_key, error = %err, "cancel failed; staying ready");
                self.state = WorkflowState::Ready { countdown };
                Err(ConfirmationError::Api(err))
            },
        }
    }

    /// Runs the expiry transition if the window has lapsed.
    ///
    /// Returns `true` when the transition ran. Only fires from `Ready`, so a
    /// user action and the expiry tick racing in the same window resolve to
    /// whichever transitions first; the loser finds the state changed and
    /// does nothing.
    ///
    /// The service cancel is best-effort: its failure is logged and
    /// swallowed, and the local store is cleared unconditionally so an
    /// expired reservation can never resurrect from stale local state.
    pub async fn expire_if_due(&mut self) -> bool {
        let countdown = match &self.state {
            WorkflowState::Ready { countdown } => *countdown,
            _ => return false,
        };
        if !countdown.is_expired_at(self.clock.now_ms()) {
            return false;
        }
        self.state = WorkflowState::Expiring;
        if let Err(err) = self.api.cancel(&self.cache_key).await {
            warn!(
                cache_key = %self.cache_key,
                error = %err,
                "best-effort cancel on expiry failed; clearing local state anyway"
            );
        }
        self.store.clear(&self.cache_key);
        info!(cache_key = %self.cache_key, "confirmation window expired");
        self.state = WorkflowState::Terminal(Outcome::ExpiredCancelled);
        true
    }

    /// Takes the `Ready` countdown or reports why the action cannot run.
    fn take_ready(&mut self, action: &'static str) -> Result<Countdown, ConfirmationError> {
        match &self.state {
            WorkflowState::Ready { countdown } => Ok(*countdown),
            WorkflowState::NotFound => Err(ConfirmationError::RecordNotFound {
                cache_key: self.cache_key.clone(),
            }),
            other => Err(ConfirmationError::InvalidTransition {
                from_state: other.name(),
                action,
            }),
        }
    }
}
