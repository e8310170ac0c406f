//! Client-side engine for event inscriptions with a timed confirmation
//! window.
//!
//! The external inscription service accepts a submission and answers with an
//! opaque cache key plus a pending record. This crate holds that pending
//! state locally for a bounded window (30 minutes by default), lets the user
//! confirm or cancel it, and auto-expires it — cancelling server-side
//! best-effort — when the window lapses. Pending state survives process
//! restarts; the window does not reset on reload.
//!
//! # Modules
//!
//! - [`pending`]: durable pending-record store (record JSON + countdown
//!   start, keyed by cache key) with degrade-to-not-found failure semantics.
//! - [`countdown`]: injected clocks, the pure remaining-time derivation, and
//!   a 1 Hz ticker with a single terminal expiry tick.
//! - [`confirmation`]: the workflow state machine tying store, countdown,
//!   and service calls together.
//! - [`api`]: the external REST boundary behind a trait, with the reqwest
//!   implementation.
//! - [`config`]: TOML configuration with working defaults.
//!
//! The server enforces its own expiry independently; the local window is
//! advisory UX state, never the authority.

pub mod api;
pub mod config;
pub mod confirmation;
pub mod countdown;
pub mod pending;
