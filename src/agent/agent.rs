//! Agent configuration: model, instruction, tools and output contract.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde_json::{json, Value};
use tracing::info;

use crate::error::{AgentryError, Result};
use crate::models::LanguageModel;
use crate::output::{OutputSchema, OutputSpec};
use crate::state::{inject_state, SessionState};
use crate::tools::{Tool, ToolContext, ToolDeclaration, ToolSet};
use crate::types::GenerationSettings;

static AGENT_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("agent name regex must compile")
});

/// A configured agent: everything the runtime needs to drive one model.
///
/// The agent does not talk to the model itself. It renders its instruction
/// against session state, advertises its tools, executes a tool call the
/// runtime hands back, and checks the final reply against its output schema.
#[derive(Clone)]
pub struct Agent {
    name: String,
    model: LanguageModel,
    description: String,
    instruction: String,
    tools: Vec<Arc<dyn Tool>>,
    output: Option<OutputSpec>,
    output_key: Option<String>,
    settings: GenerationSettings,
    api_key: Option<String>,
}

impl Agent {
    /// Create an agent with no instruction and no tools.
    pub fn new(name: impl Into<String>, model: LanguageModel) -> Self {
        Self {
            name: name.into(),
            model,
            description: String::new(),
            instruction: String::new(),
            tools: Vec::new(),
            output: None,
            output_key: None,
            settings: GenerationSettings::default(),
            api_key: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the instruction template. `{key}` placeholders are filled from
    /// session state when rendered.
    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    /// Add a tool.
    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn with_tools(mut self, tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Self {
        self.tools.extend(tools);
        self
    }

    /// Require the final reply to be a `T`.
    pub fn with_output_schema<T: OutputSchema>(mut self) -> Self {
        self.output = Some(OutputSpec::of::<T>());
        self
    }

    /// Store the final reply in session state under `key`.
    pub fn with_output_key(mut self, key: impl Into<String>) -> Self {
        self.output_key = Some(key.into());
        self
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Explicit credentials for the model, bypassing environment lookup.
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }

    pub fn with_model(mut self, model: LanguageModel) -> Self {
        self.model = model;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &LanguageModel {
        &self.model
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The instruction template as written.
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Generation settings as configured, without the output response format.
    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub fn output_key(&self) -> Option<&str> {
        self.output_key.as_deref()
    }

    pub fn output_spec(&self) -> Option<&OutputSpec> {
        self.output.as_ref()
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Check the configuration is usable.
    ///
    /// Names must be identifiers, tool names unique, and an agent with an
    /// output schema cannot also carry tools.
    pub fn validate(&self) -> Result<()> {
        if !AGENT_NAME_RE.is_match(&self.name) || self.name == "user" {
            return Err(AgentryError::Configuration(format!(
                "agent name '{}' must be an identifier other than 'user'",
                self.name
            )));
        }
        if self.output.is_some() && !self.tools.is_empty() {
            return Err(AgentryError::Configuration(format!(
                "agent '{}' declares an output schema and tools; structured-output agents cannot call tools",
                self.name
            )));
        }
        self.toolset().map(|_| ())
    }

    fn toolset(&self) -> Result<ToolSet> {
        ToolSet::try_from_iter(self.tools.iter().cloned())
    }

    /// Render the instruction for a session.
    ///
    /// When the model cannot enforce a JSON schema natively, the schema is
    /// appended as a plain-text instruction.
    pub fn render_instruction(&self, state: &SessionState) -> Result<String> {
        let mut rendered = inject_state(&self.instruction, state)?;
        if let Some(spec) = &self.output {
            if !self.model.capabilities().supports_json_schema {
                rendered.push_str("\n\n");
                rendered.push_str(&spec.schema_instruction());
            }
        }
        Ok(rendered)
    }

    /// Generation settings to send, including the response format implied by
    /// the output schema.
    pub fn request_settings(&self) -> GenerationSettings {
        let mut settings = self.settings.clone();
        if let Some(spec) = &self.output {
            settings.response_format = Some(spec.response_format(&self.model.capabilities()));
        }
        settings
    }

    pub fn tool_declarations(&self) -> Vec<ToolDeclaration> {
        self.tools.iter().map(|t| t.declaration()).collect()
    }

    /// Execute one tool call against a session's state.
    pub async fn call_tool(&self, tool: &str, args: Value, state: &SessionState) -> Result<Value> {
        let ctx = ToolContext::new(&self.name, state.clone());
        info!(agent = %self.name, tool, invocation = %ctx.invocation_id, "tool call");
        self.toolset()?.invoke(tool, args, &ctx).await
    }

    /// Accept the model's final reply.
    ///
    /// With an output schema the reply must parse and validate; the stored
    /// value is the normalized object. Without one the trimmed text is kept.
    /// Either way the result lands under the output key, when there is one.
    pub fn accept_output(&self, raw: &str, state: &SessionState) -> Result<Value> {
        let value = match &self.output {
            Some(spec) => spec.parse(raw)?,
            None => Value::String(raw.trim().to_string()),
        };
        if let Some(key) = &self.output_key {
            state.set(key.clone(), value.clone())?;
            info!(agent = %self.name, key = %key, "stored agent output");
        }
        Ok(value)
    }

    /// JSON summary of the configuration. With a state the instruction is
    /// rendered against it, otherwise the raw template is shown.
    pub fn describe(&self, state: Option<&SessionState>) -> Result<Value> {
        let instruction = match state {
            Some(state) => self.render_instruction(state)?,
            None => self.instruction.clone(),
        };
        Ok(json!({
            "name": self.name,
            "model": self.model.to_string(),
            "description": self.description,
            "instruction": instruction,
            "tools": self.tool_declarations(),
            "output_schema": self.output.as_ref().map(|spec| json!({
                "name": spec.name,
                "schema": spec.schema,
            })),
            "output_key": self.output_key,
            "settings": self.request_settings(),
            "has_api_key": self.has_api_key(),
        }))
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("model", &self.model)
            .field("tools", &self.tool_names())
            .field("output", &self.output)
            .field("output_key", &self.output_key)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ModelSelector;
    use crate::tools::{AgentTool, AgentToolParameters};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Verdict {
        ok: bool,
    }

    impl OutputSchema for Verdict {
        const NAME: &'static str = "Verdict";

        fn json_schema() -> Value {
            json!({
                "type": "object",
                "properties": { "ok": { "type": "boolean" } },
                "required": ["ok"],
            })
        }
    }

    fn ping() -> Arc<dyn Tool> {
        Arc::new(AgentTool::from_fn(
            "ping",
            "Reply with pong",
            AgentToolParameters::empty(),
            |_args, ctx| Ok(json!({ "reply": "pong", "agent": ctx.agent_name })),
        ))
    }

    #[test]
    fn rejects_non_identifier_names() {
        for bad in ["my agent", "9lives", "user", ""] {
            let agent = Agent::new(bad, LanguageModel::default_gemini());
            assert!(agent.validate().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn rejects_duplicate_tools() {
        let agent = Agent::new("dup", LanguageModel::default_gemini())
            .with_tool(ping())
            .with_tool(ping());
        assert!(matches!(agent.validate(), Err(AgentryError::Configuration(_))));
    }

    #[test]
    fn rejects_output_schema_with_tools() {
        let agent = Agent::new("judge", LanguageModel::default_gemini())
            .with_tool(ping())
            .with_output_schema::<Verdict>();
        assert!(agent.validate().is_err());
    }

    #[tokio::test]
    async fn call_tool_passes_agent_name_in_context() {
        let agent = Agent::new("pinger", LanguageModel::default_gemini()).with_tool(ping());
        let result = agent
            .call_tool("ping", Value::Null, &SessionState::new())
            .await
            .unwrap();
        assert_eq!(result, json!({ "reply": "pong", "agent": "pinger" }));
    }

    #[test]
    fn accept_output_stores_parsed_object_under_key() {
        let agent = Agent::new("judge", LanguageModel::default_gemini())
            .with_output_schema::<Verdict>()
            .with_output_key("verdict");
        let state = SessionState::new();

        let value = agent.accept_output("```json\n{\"ok\": true}\n```", &state).unwrap();

        assert_eq!(value, json!({ "ok": true }));
        assert_eq!(state.get("verdict").unwrap(), Some(json!({ "ok": true })));
    }

    #[test]
    fn rejected_output_leaves_state_untouched() {
        let agent = Agent::new("judge", LanguageModel::default_gemini())
            .with_output_schema::<Verdict>()
            .with_output_key("verdict");
        let state = SessionState::new();

        assert!(agent.accept_output("{\"ok\": true, \"why\": 1}", &state).is_err());
        assert_eq!(state.get("verdict").unwrap(), None);
    }

    #[test]
    fn schema_goes_into_instruction_when_model_lacks_json_schema() {
        let model = ModelSelector::parse("openrouter/deepseek/deepseek-chat-v3.1:free").unwrap();
        let agent = Agent::new("judge", model)
            .with_instruction("Judge it.")
            .with_output_schema::<Verdict>();

        let rendered = agent.render_instruction(&SessionState::new()).unwrap();
        assert!(rendered.starts_with("Judge it.\n\n"));
        assert!(rendered.contains("\"ok\""));
        assert_eq!(
            agent.request_settings().response_format,
            Some(crate::types::ResponseFormat::JsonObject)
        );
    }

    #[test]
    fn debug_redacts_api_key() {
        let agent = Agent::new("secretive", LanguageModel::default_gemini())
            .with_api_key(Some("sk-live".into()));
        let debug = format!("{agent:?}");
        assert!(!debug.contains("sk-live"));
        assert!(debug.contains("<redacted>"));
    }
}
