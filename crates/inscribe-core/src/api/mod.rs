//! External inscription service boundary.
//!
//! The actual REST calls are abstracted behind [`InscriptionApi`] so the
//! workflow can be driven against recording fakes in tests. The production
//! implementation is [`HttpInscriptionApi`].
//!
//! # Endpoints consumed
//!
//! | Operation | Endpoint | Input | Output |
//! |-----------|----------|-------|--------|
//! | submit | `POST inscriptions/upload` | responsible + participant | cache key + participant snapshot |
//! | confirm | `POST inscriptions/confirm` | `{cacheKey}` | inscription id, status, payment flag |
//! | cancel | `POST inscriptions/cancel` | `{cacheKey}` | none (fire-and-forget) |
//!
//! Cache keys taken from URL segments are percent-encoded; call
//! [`decode_cache_key`] before handing them to the store or to this API so
//! storage keys and payloads always carry the decoded token.

mod error;
mod http;

use async_trait::async_trait;
use chrono::NaiveDate;
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

pub use error::ApiError;
pub use http::HttpInscriptionApi;

use crate::pending::Participant;

/// Decodes a cache key taken from a URL segment.
#[must_use]
pub fn decode_cache_key(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// Person responsible for the inscription (guardian or self).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Responsible {
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

/// Participant data as entered by the user.
///
/// Category and fee are assigned by the service; the response carries the
/// full [`Participant`] snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSubmission {
    /// Full name.
    pub name: String,
    /// Birth date.
    pub birth_date: NaiveDate,
    /// Gender.
    pub gender: String,
}

/// Input for a new inscription attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    /// Who is responsible for this inscription.
    pub responsible: Responsible,
    /// The participant being inscribed.
    pub participant: ParticipantSubmission,
}

/// Service answer to a submission: the pending reservation to hold locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    /// Opaque correlation id for the pending inscription.
    pub cache_key: String,
    /// Participant snapshot with service-assigned category and fee.
    pub participant: Participant,
}

/// Service answer to a successful confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmResponse {
    /// Definitive inscription id.
    pub inscription_id: u64,
    /// Status the inscription landed in.
    pub inscription_status: String,
    /// Whether the payment step is open for this inscription.
    pub payment_enabled: bool,
}

/// Client contract for the external inscription service.
#[async_trait]
pub trait InscriptionApi: Send + Sync {
    /// Submits a new inscription attempt.
    async fn submit(&self, request: &SubmitRequest) -> Result<SubmitResponse, ApiError>;

    /// Confirms the pending inscription held under `cache_key`.
    async fn confirm(&self, cache_key: &str) -> Result<ConfirmResponse, ApiError>;

    /// Cancels the pending inscription held under `cache_key`.
    ///
    /// Fire-and-forget from the workflow's perspective: the expiry path
    /// ignores the outcome.
    async fn cancel(&self, cache_key: &str) -> Result<(), ApiError>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_decode_cache_key_decodes_url_escapes() {
        assert_eq!(decode_cache_key("abc%3D%3D123"), "abc==123");
    }

    #[test]
    fn test_decode_cache_key_passes_plain_tokens_through() {
        assert_eq!(decode_cache_key("abc123"), "abc123");
    }

    #[test]
    fn test_confirm_response_wire_names() {
        let json = r#"{
            "inscriptionId": 4711,
            "inscriptionStatus": "CONFIRMED",
            "paymentEnabled": true
        }"#;
        let response: ConfirmResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.inscription_id, 4711);
        assert_eq!(response.inscription_status, "CONFIRMED");
        assert!(response.payment_enabled);
    }

    #[test]
    fn test_submit_request_wire_names() {
        let request = SubmitRequest {
            responsible: Responsible {
                name: "Carla Souza".to_string(),
                email: "carla@example.com".to_string(),
            },
            participant: ParticipantSubmission {
                name: "Ana Souza".to_string(),
                birth_date: NaiveDate::from_ymd_opt(2011, 3, 14).unwrap(),
                gender: "F".to_string(),
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["participant"]["birthDate"], "2011-03-14");
        assert_eq!(json["responsible"]["email"], "carla@example.com");
    }
}
