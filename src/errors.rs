/*!
 * Error types for the revoice application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

use crate::artifact_store::ArtifactKind;
use crate::stage_runner::Stage;

/// Errors that can occur when talking to an external service API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that a pipeline stage reports to the controller.
///
/// Every failure carries a specific kind; the controller forwards it unchanged
/// to the presentation layer. All kinds are user-recoverable: perform the
/// missing upstream stage, or retry the failed one.
#[derive(Error, Debug)]
pub enum StageError {
    /// A required upstream artifact is missing or stale
    #[error("cannot {stage}: {missing} is missing or out of date")]
    PreconditionNotMet {
        /// The stage that was requested
        stage: Stage,
        /// The artifact that must exist and be fresh first
        missing: ArtifactKind,
    },

    /// The transcoder produced no output video
    #[error("transcode failed: {0}")]
    TranscodeFailed(String),

    /// The transcoder produced no output audio
    #[error("audio extraction failed: {0}")]
    ExtractionFailed(String),

    /// The transcription service failed
    #[error("transcription failed: {0}")]
    TranscriptionFailed(ProviderError),

    /// The translation service failed
    #[error("translation failed: {0}")]
    TranslationFailed(ProviderError),

    /// The speech synthesis service failed
    #[error("speech synthesis failed: {0}")]
    SynthesisFailed(ProviderError),
}

impl StageError {
    /// Stable kind name, for status reporting to the presentation layer.
    pub fn kind(&self) -> &'static str {
        match self {
            StageError::PreconditionNotMet { .. } => "PreconditionNotMet",
            StageError::TranscodeFailed(_) => "TranscodeFailed",
            StageError::ExtractionFailed(_) => "ExtractionFailed",
            StageError::TranscriptionFailed(_) => "TranscriptionFailed",
            StageError::TranslationFailed(_) => "TranslationFailed",
            StageError::SynthesisFailed(_) => "SynthesisFailed",
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error in the application configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Error from an external service
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from a pipeline stage
    #[error("Stage error: {0}")]
    Stage(#[from] StageError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
