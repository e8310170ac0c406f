//! Timed confirmation workflow.
//!
//! A pending inscription is held locally for a bounded window. The user may
//! confirm or cancel it; when the window lapses the workflow cancels the
//! reservation best-effort and clears local state unconditionally.
//!
//! # State Machine
//!
//! ```text
//!                 ┌─────────┐
//!                 │ Loading │
//!                 └────┬────┘
//!            record    │    no record
//!        ┌─────────────┴─────────────┐
//!        ▼                           ▼
//!    ┌───────┐                 ┌──────────┐
//!    │ Ready │                 │ NotFound │
//!    └───┬───┘                 └──────────┘
//!        │ confirm / cancel / window lapsed
//!        ▼
//!  ┌────────────────────────────────────┐
//!  │ Confirming | Cancelling | Expiring │
//!  └───────────────┬────────────────────┘
//!                  ▼
//!   ┌──────────────────────────────────────────┐
//!   │ Terminal(Confirmed | Cancelled |         │
//!   │          ExpiredCancelled)               │
//!   └──────────────────────────────────────────┘
//! ```
//!
//! # Valid Transitions
//!
//! | From | Trigger | To |
//! |------|---------|----|
//! | `Loading` | record found | `Ready` (window started idempotently) |
//! | `Loading` | record absent/malformed | `NotFound` |
//! | `Ready` | `confirm` ok | `Terminal(Confirmed)` |
//! | `Ready` | `confirm` service failure | `Ready` (retry allowed) |
//! | `Ready` | `cancel` ok | `Terminal(Cancelled)` |
//! | `Ready` | `cancel` service failure | `Ready` |
//! | `Ready` | window lapsed | `Terminal(ExpiredCancelled)` |
//!
//! Any other trigger is rejected with
//! [`ConfirmationError::InvalidTransition`]; only `Ready` can start a
//! terminal transition, so the external service is called at most once per
//! workflow instance even when a user action and the expiry tick race.

mod controller;
mod error;
mod state;


pub use controller::ConfirmationController;
pub use error::ConfirmationError;
pub use state::{Outcome, WorkflowState};
