//! Core types for Chirp

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single status update read from a content file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub content: String,
}

impl StatusUpdate {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Read the update from a plain-text file, stripping surrounding
    /// whitespace
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(Self::new(raw.trim()))
    }
}

/// Raw result of the HTTP POST: status code and response body
///
/// A non-200 code is a reported failure, not an error; the caller decides
/// what to do with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostOutcome {
    pub status_code: u16,
    pub body: String,
}

impl PostOutcome {
    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}
