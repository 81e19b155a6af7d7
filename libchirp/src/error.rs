//! Error types for Chirp

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChirpError>;

#[derive(Error, Debug)]
pub enum ChirpError {
    #[error("Credential error: {0}")]
    Credentials(#[from] CredentialError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Failed to read status file: {0}")]
    StatusFile(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ChirpError {
    /// Returns the appropriate exit code for this error
    ///
    /// Convention: 0 success, 1 post or network failure, 2 configuration
    /// error (credentials or status file), 3 invalid input.
    pub fn exit_code(&self) -> i32 {
        match self {
            ChirpError::InvalidInput(_) => 3,
            ChirpError::Platform(PlatformError::Validation(_)) => 3,
            ChirpError::Platform(_) => 1,
            ChirpError::Credentials(_) => 2,
            ChirpError::StatusFile(_) => 2,
        }
    }
}

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Failed to read credentials file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Malformed line {line} in credentials file: expected KEY=VALUE")]
    MalformedLine { line: usize },

    #[error("Missing required credential: {0}")]
    MissingKey(&'static str),

    #[error("Credential {0} is empty")]
    EmptyValue(&'static str),
}

#[derive(Error, Debug, Clone)]
pub enum PlatformError {
    #[error("Content validation failed: {0}")]
    Validation(String),

    #[error("Posting failed: {0}")]
    Posting(String),

    #[error("Network error: {0}")]
    Network(String),
}
