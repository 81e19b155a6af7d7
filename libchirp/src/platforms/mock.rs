//! Mock platform implementation for testing
//!
//! A configurable platform that simulates HTTP outcomes and transport
//! failures without network access. Available in all builds so integration
//! tests can drive the posting flow end to end.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{PlatformError, Result};
use crate::platforms::Platform;
use crate::types::{PostOutcome, StatusUpdate};

/// Behavior of every `post` call on the mock
#[derive(Debug, Clone)]
enum MockBehavior {
    /// Respond with the given HTTP status code and body
    Respond { status_code: u16, body: String },
    /// Fail with a network error
    NetworkError(String),
}

/// Mock platform for testing
pub struct MockPlatform {
    behavior: MockBehavior,
    character_limit: Option<usize>,
    /// Content of every post that reached the (simulated) wire
    pub posted_content: Arc<Mutex<Vec<String>>>,
}

impl MockPlatform {
    /// Mock that answers every post with the given status code and body
    pub fn respond_with(status_code: u16, body: &str) -> Self {
        Self {
            behavior: MockBehavior::Respond {
                status_code,
                body: body.to_string(),
            },
            character_limit: Some(280),
            posted_content: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Mock whose transport always fails
    pub fn network_error(message: &str) -> Self {
        Self {
            behavior: MockBehavior::NetworkError(message.to_string()),
            character_limit: Some(280),
            posted_content: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl Platform for MockPlatform {
    async fn post(&self, update: &StatusUpdate) -> Result<PostOutcome> {
        self.validate_content(&update.content)?;

        match &self.behavior {
            MockBehavior::Respond { status_code, body } => {
                self.posted_content
                    .lock()
                    .expect("posted_content mutex poisoned")
                    .push(update.content.clone());
                Ok(PostOutcome {
                    status_code: *status_code,
                    body: body.clone(),
                })
            }
            MockBehavior::NetworkError(message) => {
                Err(PlatformError::Network(message.clone()).into())
            }
        }
    }

    fn validate_content(&self, content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(PlatformError::Validation("Content cannot be empty".to_string()).into());
        }
        if let Some(limit) = self.character_limit {
            let char_count = content.chars().count();
            if char_count > limit {
                return Err(PlatformError::Validation(format!(
                    "Content exceeds {} character limit (current: {} characters)",
                    limit, char_count
                ))
                .into());
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "mock"
    }

    fn character_limit(&self) -> Option<usize> {
        self.character_limit
    }

    fn is_configured(&self) -> bool {
        true
    }
}
