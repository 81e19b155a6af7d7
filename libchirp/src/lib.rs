//! Chirp - post a status update over OAuth 1.0a
//!
//! This library provides the credential handling, request signing, and HTTP
//! posting used by the `chirp-post` binary.

pub mod credentials;
pub mod error;
pub mod logging;
pub mod oauth;
pub mod platforms;
pub mod types;

// Re-export commonly used types
pub use credentials::Credentials;
pub use error::{ChirpError, Result};
pub use types::{PostOutcome, StatusUpdate};
