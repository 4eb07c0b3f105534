//! Error types for agentry.

pub mod unified;

pub use unified::{ErrorCategory, RecoverySuggestion};

use thiserror::Error;

/// Primary error type for all agentry operations.
///
/// Domain outcomes that the model is expected to read (a reminder index out
/// of range, for instance) are *not* errors; tools report those inside their
/// JSON result. This enum covers misconfiguration and broken calls.
#[derive(Error, Debug)]
pub enum AgentryError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Settings file error: {0}")]
    Settings(#[from] toml::de::Error),

    #[error("Unknown agent: {0}")]
    AgentNotFound(String),

    #[error("Unknown tool: {0}")]
    ToolNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Schema violation on '{field}': {message}")]
    SchemaViolation { field: String, message: String },

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl AgentryError {
    /// Create a schema violation for a named field.
    pub fn schema(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SchemaViolation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration(_) | Self::Settings(_) => ErrorCategory::Configuration,
            Self::Io(_) => ErrorCategory::Io,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::AgentNotFound(_) | Self::ToolNotFound(_) => ErrorCategory::NotFound,
            Self::InvalidArgument(_) | Self::SchemaViolation { .. } => ErrorCategory::Validation,
            Self::InvalidState(_) => ErrorCategory::State,
        }
    }

    /// Suggest recovery actions.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self.category() {
            ErrorCategory::Configuration => RecoverySuggestion::CheckConfiguration,
            ErrorCategory::Validation | ErrorCategory::Serialization => {
                RecoverySuggestion::FixInput
            }
            ErrorCategory::State => RecoverySuggestion::ResetSession,
            ErrorCategory::NotFound => RecoverySuggestion::ListAvailable,
            ErrorCategory::Io => RecoverySuggestion::CheckConfiguration,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, AgentryError>;
