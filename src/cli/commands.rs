//! CLI command handlers.
//!
//! Each handler returns the JSON document the binary prints to stdout.

use std::path::Path;

use serde_json::{json, Value};
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::config::AgentryConfig;
use crate::error::{AgentryError, Result};
use crate::recipes::{self, email};
use crate::state::SessionState;

use super::{CallArgs, CheckEmailArgs, Cli, ShowArgs};

/// Build the config a CLI invocation runs with.
pub fn load_config(cli: &Cli) -> Result<AgentryConfig> {
    let config = AgentryConfig::load(cli.config.as_deref())?;
    Ok(match &cli.model {
        Some(selector) => config.with_model_override(selector.clone()),
        None => config,
    })
}

/// One line per recipe: name, model, description, tools.
pub fn handle_list(config: &AgentryConfig) -> Result<Value> {
    let agents = recipes::catalog(config)?;
    Ok(Value::Array(
        agents
            .iter()
            .map(|agent| {
                json!({
                    "name": agent.name(),
                    "model": agent.model().to_string(),
                    "description": agent.description(),
                    "tools": agent.tool_names(),
                    "structured_output": agent.output_spec().map(|spec| spec.name),
                })
            })
            .collect(),
    ))
}

pub fn handle_show(config: &AgentryConfig, args: &ShowArgs) -> Result<Value> {
    let agent = recipes::build(&args.agent, config)?;
    match &args.state {
        Some(raw) => {
            let state = parse_state(raw)?;
            agent.describe(Some(&state))
        }
        None => agent.describe(None),
    }
}

/// Run a single tool call and report the result with the state it left behind.
pub async fn handle_call(config: &AgentryConfig, args: &CallArgs) -> Result<Value> {
    let agent = recipes::build(&args.agent, config)?;
    let state = parse_state(&args.state)?;
    let tool_args = parse_json("--args", &args.args)?;
    let result = agent.call_tool(&args.tool, tool_args, &state).await?;
    Ok(json!({
        "agent": agent.name(),
        "tool": args.tool,
        "result": result,
        "state": state.snapshot()?,
    }))
}

/// Validate a model reply against the email schema.
pub async fn handle_check_email(config: &AgentryConfig, args: &CheckEmailArgs) -> Result<Value> {
    let raw = match &args.file {
        Some(path) => read_file(path).await?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };
    check_email(config, &raw)
}

/// Parse `raw` through the email agent and return the stored object.
pub fn check_email(config: &AgentryConfig, raw: &str) -> Result<Value> {
    let agent = email::agent(config)?;
    let state = SessionState::new();
    agent.accept_output(raw, &state)
}

async fn read_file(path: &Path) -> Result<String> {
    debug!(path = %path.display(), "reading reply");
    Ok(tokio::fs::read_to_string(path).await?)
}

fn parse_state(raw: &str) -> Result<SessionState> {
    SessionState::from_value(parse_json("--state", raw)?)
}

fn parse_json(flag: &str, raw: &str) -> Result<Value> {
    serde_json::from_str(raw)
        .map_err(|e| AgentryError::InvalidArgument(format!("{flag} is not valid JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> AgentryConfig {
        AgentryConfig::new()
    }

    #[test]
    fn list_covers_every_recipe() {
        let listed = handle_list(&config()).unwrap();
        let names: Vec<&str> = listed
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| entry["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, recipes::AGENT_NAMES.to_vec());
    }

    #[test]
    fn show_renders_instruction_against_state() {
        let args = ShowArgs {
            agent: "memory_agent".into(),
            state: Some(r#"{"user_name":"Ada","reminders":["buy milk"]}"#.into()),
        };
        let shown = handle_show(&config(), &args).unwrap();
        let instruction = shown["instruction"].as_str().unwrap();
        assert!(instruction.contains("- User's name: Ada"));
        assert!(instruction.contains(r#"- Reminders: ["buy milk"]"#));
    }

    #[test]
    fn show_rejects_malformed_state() {
        let args = ShowArgs {
            agent: "memory_agent".into(),
            state: Some("{not json".into()),
        };
        let err = handle_show(&config(), &args).unwrap_err();
        assert!(matches!(err, AgentryError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn call_returns_result_and_state() {
        let args = CallArgs {
            agent: "memory_agent".into(),
            tool: "add_reminder".into(),
            args: r#"{"reminder":"call mom at 6PM"}"#.into(),
            state: r#"{"user_name":"Ada","reminders":[]}"#.into(),
        };
        let out = handle_call(&config(), &args).await.unwrap();
        assert_eq!(out["result"]["status"], "success");
        assert_eq!(out["state"]["reminders"], json!(["call mom at 6PM"]));
    }

    #[tokio::test]
    async fn call_unknown_tool_fails() {
        let args = CallArgs {
            agent: "greeting_agent".into(),
            tool: "get_current_time".into(),
            args: "{}".into(),
            state: "{}".into(),
        };
        let err = handle_call(&config(), &args).await.unwrap_err();
        assert!(matches!(err, AgentryError::ToolNotFound(_)));
    }

    #[test]
    fn check_email_normalizes_defaults() {
        let raw = "```json\n{\"subject\":\"Quarterly review\",\"body\":\"Hello all,\\n\\nThe quarterly review is moved to Thursday at 10am.\\n\\nBest,\\nKim\"}\n```";
        let email = check_email(&config(), raw).unwrap();
        assert_eq!(email["tone"], "neutral");
        assert_eq!(email["priority"], "normal");
        assert_eq!(email["attachments"], json!([]));
    }
}
