//! Command implementations and shared wiring.

pub mod cancel;
pub mod confirm;
pub mod status;
pub mod submit;
pub mod sweep;
pub mod watch;

use std::sync::Arc;

use anyhow::Result;
use inscribe_core::api::{HttpInscriptionApi, InscriptionApi};
use inscribe_core::config::InscribeConfig;
use inscribe_core::confirmation::ConfirmationController;
use inscribe_core::countdown::{Clock, SystemClock};
use inscribe_core::pending::{MemoryStore, PendingStore, SqliteStore};
use tracing::warn;

/// Shared handles every command runs against.
pub struct App {
    /// The persisted pending-record store.
    pub store: Arc<dyn PendingStore>,
    /// The external inscription service.
    pub api: Arc<dyn InscriptionApi>,
    /// Wall clock.
    pub clock: Arc<dyn Clock>,
    /// Confirmation window length in seconds.
    pub window_secs: u64,
}

impl App {
    /// Builds the production wiring from configuration.
    ///
    /// A store that cannot be opened degrades to an in-memory one: the
    /// session still works, it just will not survive a restart.
    pub fn from_config(config: &InscribeConfig) -> Result<Self> {
        let store: Arc<dyn PendingStore> = match SqliteStore::open(&config.storage.db_path) {
            Ok(store) => Arc::new(store),
            Err(err) => {
                warn!(
                    path = %config.storage.db_path.display(),
                    error = %err,
                    "could not open pending store; falling back to in-memory (no restart survival)"
                );
                Arc::new(MemoryStore::new())
            },
        };
        let api = Arc::new(HttpInscriptionApi::new(&config.api)?);
        Ok(Self {
            store,
            api,
            clock: Arc::new(SystemClock),
            window_secs: config.confirmation.window_secs,
        })
    }

    /// A confirmation controller bound to an already-decoded cache key.
    #[must_use]
    pub fn controller(&self, cache_key: &str) -> ConfirmationController {
        ConfirmationController::new(
            Arc::clone(&self.store),
            Arc::clone(&self.api),
            Arc::clone(&self.clock),
            self.window_secs,
            cache_key,
        )
    }
}

/// Formats seconds as `MM:SS` for countdown display.
#[must_use]
pub fn format_remaining(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod unit_tests {
    use super::format_remaining;

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(0), "00:00");
        assert_eq!(format_remaining(61), "01:01");
        assert_eq!(format_remaining(1800), "30:00");
    }
}
