//! Credential loading for Chirp
//!
//! Credentials live in an env-style file of `KEY=VALUE` lines (one per
//! line, split on the first `=`). Blank lines and `#` comments are skipped.
//! Any other line that is not `KEY=VALUE` is rejected with its line number
//! rather than silently ignored, so a typo in the file fails before any
//! network call is made.
//!
//! # Example
//!
//! ```no_run
//! use libchirp::credentials::Credentials;
//!
//! # fn example() -> libchirp::error::Result<()> {
//! let credentials = Credentials::load(".env")?;
//! println!("consumer key: {}", credentials.consumer_key);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::path::Path;

use crate::error::{CredentialError, Result};

const KEY_CONSUMER_KEY: &str = "TWITTER_API_KEY";
const KEY_CONSUMER_SECRET: &str = "TWITTER_API_SECRET";
const KEY_ACCESS_TOKEN: &str = "TWITTER_ACCESS_TOKEN";
const KEY_ACCESS_SECRET: &str = "TWITTER_ACCESS_SECRET";

/// The four OAuth 1.0a credential strings
///
/// Loaded once at startup and immutable for the rest of the run. Never
/// written back to disk by this crate.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl Credentials {
    /// Load credentials from an env-style file
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::ReadError` if the file cannot be read,
    /// `CredentialError::MalformedLine` for a line that is not `KEY=VALUE`,
    /// and `CredentialError::MissingKey` / `CredentialError::EmptyValue`
    /// when one of the four required keys is absent or blank.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(CredentialError::ReadError)?;
        Self::parse(&content)
    }

    /// Parse credentials from env-style file content
    pub fn parse(content: &str) -> Result<Self> {
        let mut values: HashMap<&str, String> = HashMap::new();

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Split on the first '=' only; values may contain '='.
            let (key, value) = line
                .split_once('=')
                .ok_or(CredentialError::MalformedLine { line: idx + 1 })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(CredentialError::MalformedLine { line: idx + 1 }.into());
            }
            values.insert(key, value.trim().to_string());
        }

        Ok(Self {
            consumer_key: take(&mut values, KEY_CONSUMER_KEY)?,
            consumer_secret: take(&mut values, KEY_CONSUMER_SECRET)?,
            access_token: take(&mut values, KEY_ACCESS_TOKEN)?,
            access_token_secret: take(&mut values, KEY_ACCESS_SECRET)?,
        })
    }
}

fn take(values: &mut HashMap<&str, String>, key: &'static str) -> Result<String> {
    let value = values
        .remove(key)
        .ok_or(CredentialError::MissingKey(key))?;
    if value.is_empty() {
        return Err(CredentialError::EmptyValue(key).into());
    }
    Ok(value)
}
