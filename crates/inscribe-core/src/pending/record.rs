//! Pending inscription record types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Participant snapshot captured when the service accepted the submission.
///
/// Display-only data: the client shows it back to the user while the
/// confirmation window is open and never re-validates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// Full name as submitted.
    pub name: String,
    /// Birth date as submitted.
    pub birth_date: NaiveDate,
    /// Gender as submitted.
    pub gender: String,
    /// Human-readable inscription category assigned by the service.
    pub type_description: String,
    /// Inscription fee for the assigned category.
    pub value: f64,
}

/// An inscription the service accepted but the user has not yet confirmed.
///
/// Created when the submission call returns a cache key, persisted
/// immediately, read back on the confirmation step, and deleted on confirm,
/// cancel, or expiry. Never mutated in place — replaced wholesale or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingInscriptionRecord {
    /// Opaque correlation id issued by the service.
    pub cache_key: String,
    /// Participant snapshot for display.
    pub participant: Participant,
}
