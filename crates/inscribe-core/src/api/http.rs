//! HTTP implementation of the inscription service boundary.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::ApiError;
use super::{ConfirmResponse, InscriptionApi, SubmitRequest, SubmitResponse};
use crate::config::ApiConfig;

/// JSON payload carrying a cache key, `{"cacheKey": "..."}` on the wire.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CacheKeyPayload<'a> {
    cache_key: &'a str,
}

/// reqwest-backed client for the inscription REST endpoints.
#[derive(Debug, Clone)]
pub struct HttpInscriptionApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpInscriptionApi {
    /// Builds a client from the API configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ApiError::ClientSetup)?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        let status = response.status();
        debug!(path = %path, status = status.as_u16(), "inscription service call");
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }
        response.json().await.map_err(ApiError::Decode)
    }

    async fn post_for_status(&self, path: &str, cache_key: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(&CacheKeyPayload { cache_key })
            .send()
            .await
            .map_err(ApiError::Transport)?;
        let status = response.status();
        debug!(path = %path, status = status.as_u16(), "inscription service call");
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl InscriptionApi for HttpInscriptionApi {
    async fn submit(&self, request: &SubmitRequest) -> Result<SubmitResponse, ApiError> {
        self.post_json("inscriptions/upload", request).await
    }

    async fn confirm(&self, cache_key: &str) -> Result<ConfirmResponse, ApiError> {
        self.post_json("inscriptions/confirm", &CacheKeyPayload { cache_key })
            .await
    }

    async fn cancel(&self, cache_key: &str) -> Result<(), ApiError> {
        self.post_for_status("inscriptions/cancel", cache_key).await
    }
}
