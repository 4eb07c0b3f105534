//! Convenience re-exports for common use.

pub use crate::agent::Agent;
pub use crate::config::AgentryConfig;
pub use crate::error::{AgentryError, Result};
pub use crate::models::LanguageModel;
pub use crate::output::{OutputSchema, OutputSpec};
pub use crate::session::{Session, SessionManager};
pub use crate::state::SessionState;
pub use crate::tools::{AgentTool, AgentToolParameters, Tool, ToolArguments, ToolContext};
pub use crate::types::GenerationSettings;
