//! minutes-extract - Structured meeting minutes from raw transcripts
//!
//! A transcript is sent to an LLM with a function-calling schema, the
//! returned arguments are validated into [`schema::MeetingMinutes`], and the
//! result is flattened into a Markdown document.

pub mod cli;
pub mod config;
pub mod export;
pub mod llm;
pub mod pipeline;
pub mod render;
pub mod sample;
pub mod schema;

use thiserror::Error;

/// Main error type for minutes-extract
#[derive(Error, Debug)]
pub enum MinutesError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailure(String),

    #[error("Extraction failed: {message}")]
    ExtractionFailure { message: String, transient: bool },

    #[error("Schema violation: {}", .violations.join("; "))]
    SchemaViolation { violations: Vec<String> },

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MinutesError {
    /// A failure worth retrying (network hiccup, rate limit, server error).
    pub fn extraction_transient(message: impl Into<String>) -> Self {
        Self::ExtractionFailure {
            message: message.into(),
            transient: true,
        }
    }

    /// A failure that will not go away by asking again.
    pub fn extraction_permanent(message: impl Into<String>) -> Self {
        Self::ExtractionFailure {
            message: message.into(),
            transient: false,
        }
    }

    pub fn schema_violation(violation: impl Into<String>) -> Self {
        Self::SchemaViolation {
            violations: vec![violation.into()],
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ExtractionFailure {
                transient: true,
                ..
            }
        )
    }
}

pub type Result<T> = std::result::Result<T, MinutesError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "minutes-extract";
