//! Error types for the CrisisMap API tester
//!
//! Only configuration and file errors ever reach `main`. Transport failures,
//! status mismatches and structural problems are recorded against the step
//! that produced them and the run carries on.

use thiserror::Error;

use crate::http::TransportError;
use crate::testing::StructuralError;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the tester
#[derive(Error, Debug)]
pub enum Error {
    // === Transport Errors ===
    #[error(transparent)]
    Transport(#[from] TransportError),

    // === Verdict Errors ===
    #[error("Expected status {expected}, got {actual}")]
    StatusMismatch { expected: u16, actual: u16 },

    #[error("Structural validation failed: {0}")]
    StructuralInvalid(#[from] StructuralError),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a status mismatch error
    pub fn status_mismatch(expected: u16, actual: u16) -> Self {
        Self::StatusMismatch { expected, actual }
    }

    /// Create a file read error for a path
    pub fn file_read(path: &std::path::Path, error: impl std::fmt::Display) -> Self {
        Self::FileRead {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Short machine-readable code for JSON reports
    pub fn code(&self) -> &'static str {
        match self {
            Error::Transport(TransportError::Timeout { .. }) => "TRANSPORT_TIMEOUT",
            Error::Transport(TransportError::Connection(_)) => "TRANSPORT_CONNECTION",
            Error::Transport(TransportError::Unexpected(_)) => "TRANSPORT_UNEXPECTED",
            Error::StatusMismatch { .. } => "STATUS_MISMATCH",
            Error::StructuralInvalid(_) => "STRUCTURAL_INVALID",
            Error::Config(_) | Error::ConfigParse(_) => "CONFIG",
            Error::FileRead { .. } => "IO",
            Error::Json(_) => "JSON",
        }
    }
}
