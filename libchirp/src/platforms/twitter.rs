//! Twitter (API v1.1) platform implementation
//!
//! Posts a status via `statuses/update.json` with an OAuth 1.0a signed
//! request: the `Authorization` header carries the protocol parameters and
//! signature, the form-encoded body carries the `status` field.

use async_trait::async_trait;
use tracing::debug;

use crate::credentials::Credentials;
use crate::error::{PlatformError, Result};
use crate::oauth::{self, SignedRequest};
use crate::platforms::Platform;
use crate::types::{PostOutcome, StatusUpdate};

/// Default endpoint for posting a status update
pub const DEFAULT_ENDPOINT: &str = "https://api.twitter.com/1.1/statuses/update.json";

/// Tweet length limit
const CHARACTER_LIMIT: usize = 280;

/// Twitter client
///
/// Holds the immutable credentials for the run and a reqwest client. No
/// timeout is configured; the library default applies.
pub struct TwitterClient {
    credentials: Credentials,
    endpoint: String,
    client: reqwest::Client,
}

impl TwitterClient {
    /// Create a client against the default `statuses/update.json` endpoint
    pub fn new(credentials: Credentials) -> Self {
        Self::with_endpoint(credentials, DEFAULT_ENDPOINT)
    }

    /// Create a client against a specific endpoint URL
    ///
    /// The URL must be bare (no query string); query parameters would have
    /// to participate in the signature.
    pub fn with_endpoint(credentials: Credentials, endpoint: impl Into<String>) -> Self {
        Self {
            credentials,
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sign a POST of `status` with a fresh nonce and timestamp
    ///
    /// Exposed separately from `send` so callers can print the base string
    /// and Authorization header of the exact request that goes out.
    pub fn sign_status(&self, status: &str) -> SignedRequest {
        let nonce = oauth::nonce();
        let timestamp = oauth::timestamp();
        SignedRequest::new(
            "POST",
            &self.endpoint,
            &[("status", status)],
            &self.credentials,
            &nonce,
            &timestamp,
        )
    }

    /// Send a signed status POST and return the raw outcome
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Network` if the request cannot be sent or
    /// the response body cannot be read. A non-200 status code is not an
    /// error.
    pub async fn send(&self, signed: &SignedRequest, status: &str) -> Result<PostOutcome> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", &signed.authorization)
            .form(&[("status", status)])
            .send()
            .await
            .map_err(|e| {
                PlatformError::Network(format!("Failed to reach {}: {}", self.endpoint, e))
            })?;

        let status_code = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            PlatformError::Network(format!("Failed to read response body: {}", e))
        })?;

        debug!(status_code, "received response");

        Ok(PostOutcome { status_code, body })
    }
}

#[async_trait]
impl Platform for TwitterClient {
    async fn post(&self, update: &StatusUpdate) -> Result<PostOutcome> {
        self.validate_content(&update.content)?;

        let signed = self.sign_status(&update.content);
        debug!(base_string = %signed.base_string, "signed status update");

        self.send(&signed, &update.content).await
    }

    fn validate_content(&self, content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(PlatformError::Validation("Content cannot be empty".to_string()).into());
        }

        let char_count = content.chars().count();
        if char_count > CHARACTER_LIMIT {
            return Err(PlatformError::Validation(format!(
                "Content exceeds Twitter's {} character limit (current: {} characters)",
                CHARACTER_LIMIT, char_count
            ))
            .into());
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "twitter"
    }

    fn character_limit(&self) -> Option<usize> {
        Some(CHARACTER_LIMIT)
    }

    fn is_configured(&self) -> bool {
        // Credentials were validated when loaded
        true
    }
}
