//! Error classification and recovery.

/// Broad error category for routing recovery logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Io,
    Serialization,
    NotFound,
    Validation,
    State,
}

impl ErrorCategory {
    /// Process exit code used by the CLI for this category.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Validation | Self::Serialization => 2,
            Self::NotFound => 3,
            Self::Configuration | Self::Io => 4,
            Self::State => 1,
        }
    }
}

/// Suggested recovery action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySuggestion {
    CheckConfiguration,
    FixInput,
    ResetSession,
    ListAvailable,
}

impl RecoverySuggestion {
    /// Short hint shown next to CLI errors.
    pub fn hint(self) -> &'static str {
        match self {
            Self::CheckConfiguration => "check ~/.agentry/config.toml and your API key variables",
            Self::FixInput => "fix the input and retry",
            Self::ResetSession => "start from a fresh session state",
            Self::ListAvailable => "run `agentry list` to see available agents and tools",
        }
    }
}
