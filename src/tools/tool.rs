//! Tool trait, execution context and closure-based tool wrapper.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::arguments::ToolArguments;
use super::types::{AgentToolParameters, ToolDeclaration};
use crate::error::AgentryError;
use crate::state::SessionState;

/// Context available during tool execution.
///
/// Carries a handle to the calling session's state; writes through it are
/// visible to the caller once the tool returns.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Session state shared with the caller.
    pub state: SessionState,
    /// Name of the agent the call is made on behalf of.
    pub agent_name: String,
    /// Unique id of this invocation, for log correlation.
    pub invocation_id: Uuid,
}

impl ToolContext {
    pub fn new(agent_name: impl Into<String>, state: SessionState) -> Self {
        Self {
            state,
            agent_name: agent_name.into(),
            invocation_id: Uuid::new_v4(),
        }
    }
}

impl Default for ToolContext {
    fn default() -> Self {
        Self::new("", SessionState::new())
    }
}

/// Core tool trait — implement to create custom tools.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (must match what the model calls).
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// JSON Schema parameters.
    fn parameters(&self) -> &AgentToolParameters;

    /// Execute the tool with parsed arguments.
    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &ToolContext,
    ) -> Result<serde_json::Value, AgentryError>;

    /// Declaration advertised to the model.
    fn declaration(&self) -> ToolDeclaration {
        ToolDeclaration {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters().schema.clone(),
        }
    }
}

/// Type alias for the tool handler function.
type ToolHandler = dyn Fn(
        ToolArguments,
        ToolContext,
    ) -> Pin<Box<dyn Future<Output = Result<serde_json::Value, AgentryError>> + Send>>
    + Send
    + Sync;

/// Closure-based tool for quick tool creation.
pub struct AgentTool {
    name: String,
    description: String,
    parameters: AgentToolParameters,
    handler: Arc<ToolHandler>,
}

impl AgentTool {
    /// Create a tool from an async closure.
    pub fn new<F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: AgentToolParameters,
        handler: F,
    ) -> Self
    where
        F: Fn(ToolArguments, ToolContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<serde_json::Value, AgentryError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            handler: Arc::new(move |args, ctx| Box::pin(handler(args, ctx))),
        }
    }

    /// Create a tool from a synchronous function.
    ///
    /// Most recipe tools are plain functions over their arguments and the
    /// state bag; this saves them the `async move` wrapper.
    pub fn from_fn<F>(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: AgentToolParameters,
        handler: F,
    ) -> Self
    where
        F: Fn(&ToolArguments, &ToolContext) -> Result<serde_json::Value, AgentryError>
            + Send
            + Sync
            + 'static,
    {
        let handler = Arc::new(handler);
        Self::new(name, description, parameters, move |args, ctx| {
            let handler = Arc::clone(&handler);
            async move { handler(&args, &ctx) }
        })
    }
}

#[async_trait]
impl Tool for AgentTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters(&self) -> &AgentToolParameters {
        &self.parameters
    }

    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &ToolContext,
    ) -> Result<serde_json::Value, AgentryError> {
        (self.handler)(args.clone(), ctx.clone()).await
    }
}

impl std::fmt::Debug for AgentTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentTool")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}
