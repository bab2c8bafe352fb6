//! Error types for the onboarding service.

use uuid::Uuid;

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Submission error: {0}")]
    Submission(#[from] SubmissionError),

    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}. {hint}")]
    MissingRequired { key: String, hint: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Session registry errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session {id} not found")]
    NotFound { id: Uuid },
}

/// Outbound submission errors.
///
/// Submissions are single-shot: a failure is returned to the caller, which
/// decides whether to re-trigger. Nothing here retries.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Request to {endpoint} endpoint failed: {reason}")]
    Transport { endpoint: String, reason: String },

    #[error("{endpoint} endpoint returned status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("Malformed response from {endpoint} endpoint: {reason}")]
    MalformedResponse { endpoint: String, reason: String },

    #[error("Failed to encode submission: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Camera acquisition and capture errors.
#[derive(Debug, thiserror::Error)]
pub enum CameraError {
    /// Permission denied or no device attached. Callers fall back to
    /// manual file selection.
    #[error("Camera unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Cannot {operation} in state {state}")]
    InvalidState { operation: String, state: String },

    #[error("Not an image file: {path}")]
    NotAnImage { path: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
