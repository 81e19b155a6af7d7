//! Platform abstraction and implementations
//!
//! A platform is anything that accepts a status update over the network.
//! The one real implementation targets the Twitter v1.1 statuses API; a
//! configurable mock is available for tests.
//!
//! # Examples
//!
//! ```no_run
//! use libchirp::platforms::{Platform, twitter::TwitterClient};
//! use libchirp::{Credentials, StatusUpdate};
//!
//! # async fn example() -> libchirp::error::Result<()> {
//! let credentials = Credentials::load(".env")?;
//! let client = TwitterClient::new(credentials);
//!
//! let update = StatusUpdate::from_file("progress_update.txt")?;
//! let outcome = client.post(&update).await?;
//! if outcome.is_success() {
//!     println!("posted");
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{PostOutcome, StatusUpdate};

pub mod twitter;

// Mock platform is available for all builds (not just tests) to support
// integration tests
pub mod mock;

/// Common interface for status-update targets
#[async_trait]
pub trait Platform: Send + Sync {
    /// Post the update and return the raw HTTP outcome
    ///
    /// A non-200 response is reported through the returned `PostOutcome`,
    /// not as an error. Only transport failures and pre-flight validation
    /// produce `Err`.
    async fn post(&self, update: &StatusUpdate) -> Result<PostOutcome>;

    /// Validate content before posting
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Validation` if the content fails validation
    fn validate_content(&self, content: &str) -> Result<()>;

    /// Lowercase platform identifier (e.g. "twitter")
    fn name(&self) -> &str;

    /// Maximum characters per post, or `None` if there is no hard limit
    fn character_limit(&self) -> Option<usize>;

    /// Whether the platform has all the configuration it needs to post
    fn is_configured(&self) -> bool;
}
