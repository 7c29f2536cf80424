//! HTTP client adapter for ProfileStore.
//!
//! Talks to a remote decision-scale server's `/api/profiles` resource, so a
//! client process can use the server as its durable store.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

use crate::domain::decision::Profile;
use crate::domain::foundation::{ProfileId, ValidationError};
use crate::ports::{ProfilePatch, ProfileStore, StoreError};

/// Configuration for the remote store client.
#[derive(Debug, Clone)]
pub struct HttpStoreConfig {
    /// API root, e.g. `http://localhost:5000/api`.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl HttpStoreConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Remote profile store over the REST API.
#[derive(Debug, Clone)]
pub struct HttpProfileStore {
    config: HttpStoreConfig,
    client: Client,
}

impl HttpProfileStore {
    pub fn new(config: HttpStoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn profiles_url(&self) -> String {
        format!("{}/profiles", self.config.base_url)
    }

    fn profile_url(&self, id: &ProfileId) -> String {
        format!("{}/profiles/{}", self.config.base_url, id)
    }

    /// Maps transport failures. Anything short of an HTTP response is
    /// treated as the server being unreachable.
    fn transport_error(err: reqwest::Error) -> StoreError {
        if err.is_connect() || err.is_timeout() || err.is_request() {
            StoreError::unavailable(err.to_string())
        } else {
            StoreError::internal(err.to_string())
        }
    }

    /// Passes successful responses through and maps error statuses.
    async fn check_status(response: Response, id: Option<&ProfileId>) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or(body);

        match (status, id) {
            (StatusCode::NOT_FOUND, Some(id)) => Err(StoreError::NotFound(id.clone())),
            (StatusCode::CONFLICT, Some(id)) => Err(StoreError::Conflict(id.clone())),
            (StatusCode::BAD_REQUEST, _) | (StatusCode::UNPROCESSABLE_ENTITY, _) => {
                Err(ValidationError::invalid_format("profile", message).into())
            }
            (StatusCode::BAD_GATEWAY, _)
            | (StatusCode::SERVICE_UNAVAILABLE, _)
            | (StatusCode::GATEWAY_TIMEOUT, _) => Err(StoreError::unavailable(format!(
                "Server error {}: {}",
                status, message
            ))),
            _ => Err(StoreError::internal(format!(
                "Unexpected status {}: {}",
                status, message
            ))),
        }
    }

    async fn parse_profile(response: Response) -> Result<Profile, StoreError> {
        response
            .json::<Profile>()
            .await
            .map_err(|e| StoreError::internal(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl ProfileStore for HttpProfileStore {
    async fn list(&self) -> Result<Vec<Profile>, StoreError> {
        let response = self
            .client
            .get(self.profiles_url())
            .send()
            .await
            .map_err(Self::transport_error)?;
        let response = Self::check_status(response, None).await?;

        response
            .json::<Vec<Profile>>()
            .await
            .map_err(|e| StoreError::internal(format!("Failed to parse response: {}", e)))
    }

    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, StoreError> {
        let response = self
            .client
            .get(self.profile_url(id))
            .send()
            .await
            .map_err(Self::transport_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::check_status(response, Some(id)).await?;
        Self::parse_profile(response).await.map(Some)
    }

    async fn create(&self, profile: &Profile) -> Result<Profile, StoreError> {
        let response = self
            .client
            .post(self.profiles_url())
            .json(profile)
            .send()
            .await
            .map_err(Self::transport_error)?;
        let response = Self::check_status(response, Some(&profile.id)).await?;
        Self::parse_profile(response).await
    }

    async fn update(&self, id: &ProfileId, patch: &ProfilePatch) -> Result<Profile, StoreError> {
        let response = self
            .client
            .put(self.profile_url(id))
            .json(patch)
            .send()
            .await
            .map_err(Self::transport_error)?;
        let response = Self::check_status(response, Some(id)).await?;
        Self::parse_profile(response).await
    }

    async fn delete(&self, id: &ProfileId) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.profile_url(id))
            .send()
            .await
            .map_err(Self::transport_error)?;
        Self::check_status(response, Some(id)).await?;
        Ok(())
    }
}
