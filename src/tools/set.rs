//! Ordered, name-unique collection of tools with validated dispatch.

use std::sync::Arc;

use tracing::{debug, warn};

use super::arguments::ToolArguments;
use super::tool::{Tool, ToolContext};
use super::validation::validate_arguments;
use crate::error::{AgentryError, Result};

/// Tools attached to one agent, in declaration order.
#[derive(Clone, Default)]
pub struct ToolSet {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool. Names must be unique within a set.
    pub fn insert(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        if self.get(tool.name()).is_some() {
            return Err(AgentryError::Configuration(format!(
                "duplicate tool name '{}'",
                tool.name()
            )));
        }
        self.tools.push(tool);
        Ok(())
    }

    /// Collect tools, failing on the first duplicated name.
    pub fn try_from_iter(tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Result<Self> {
        let mut set = Self::new();
        for tool in tools {
            set.insert(tool)?;
        }
        Ok(set)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Look up `name`, validate `args` against its schema, then execute it.
    pub async fn invoke(
        &self,
        name: &str,
        args: serde_json::Value,
        ctx: &ToolContext,
    ) -> Result<serde_json::Value> {
        let tool = self
            .get(name)
            .ok_or_else(|| AgentryError::ToolNotFound(name.to_string()))?;

        if let Err(message) = validate_arguments(&args, &tool.parameters().schema) {
            warn!(tool = name, invocation = %ctx.invocation_id, %message, "rejected tool arguments");
            return Err(AgentryError::InvalidArgument(format!("{name}: {message}")));
        }

        debug!(
            tool = name,
            agent = %ctx.agent_name,
            invocation = %ctx.invocation_id,
            %args,
            "invoking tool"
        );
        tool.execute(&ToolArguments::new(args), ctx).await
    }
}

impl std::fmt::Debug for ToolSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl FromIterator<Arc<dyn Tool>> for ToolSet {
    /// Collects tools, keeping the first of any duplicated name. Use
    /// [`ToolSet::try_from_iter`] to treat duplicates as an error.
    fn from_iter<I: IntoIterator<Item = Arc<dyn Tool>>>(iter: I) -> Self {
        let mut set = Self::new();
        for tool in iter {
            if let Err(e) = set.insert(tool) {
                warn!(error = %e, "dropping tool");
            }
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::tool::AgentTool;
    use crate::tools::types::AgentToolParameters;
    use serde_json::json;

    fn echo() -> Arc<dyn Tool> {
        Arc::new(AgentTool::from_fn(
            "echo",
            "Echo the input",
            AgentToolParameters::object()
                .string("text", "Text to echo", true)
                .build(),
            |args, _ctx| Ok(json!({ "text": args.get_str("text")? })),
        ))
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut set = ToolSet::new();
        set.insert(echo()).unwrap();
        assert!(matches!(
            set.insert(echo()),
            Err(AgentryError::Configuration(_))
        ));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn try_from_iter_rejects_duplicates_collect_keeps_first() {
        assert!(matches!(
            ToolSet::try_from_iter([echo(), echo()]),
            Err(AgentryError::Configuration(_))
        ));

        let set: ToolSet = [echo(), echo()].into_iter().collect();
        assert_eq!(set.names(), vec!["echo"]);
    }

    #[tokio::test]
    async fn invoke_validates_before_executing() {
        let set: ToolSet = [echo()].into_iter().collect();
        let ctx = ToolContext::default();

        let ok = set.invoke("echo", json!({ "text": "hi" }), &ctx).await.unwrap();
        assert_eq!(ok, json!({ "text": "hi" }));

        let err = set.invoke("echo", json!({}), &ctx).await.unwrap_err();
        assert!(matches!(err, AgentryError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn unknown_tool_is_not_found() {
        let set = ToolSet::new();
        let err = set
            .invoke("nope", json!({}), &ToolContext::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AgentryError::ToolNotFound(name) if name == "nope"));
    }
}
