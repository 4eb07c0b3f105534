//! An agent with two plain function tools: a clock and a mock search.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone};
use serde_json::{json, Value};
use tracing::info;

use crate::agent::Agent;
use crate::config::AgentryConfig;
use crate::error::Result;
use crate::models::LanguageModel;
use crate::tools::{AgentTool, AgentToolParameters, Tool};

pub const NAME: &str = "tool_agent";

/// Format used by `get_current_time`.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const INSTRUCTION: &str = "\
You are a helpful assistant that can use the following tools:
- get_current_time: Get the current date and time
- simple_search: Perform basic search operations

When users ask for the time, use get_current_time.
When users want to search for something, use simple_search.";

/// Result of `get_current_time` for a given instant.
pub fn current_time_at<Tz: TimeZone>(now: &DateTime<Tz>) -> Value
where
    Tz::Offset: std::fmt::Display,
{
    json!({ "current_time": now.format(TIME_FORMAT).to_string() })
}

/// `get_current_time`: local wall-clock time as `YYYY-MM-DD HH:MM:SS`.
pub fn current_time_tool() -> Arc<dyn Tool> {
    Arc::new(AgentTool::from_fn(
        "get_current_time",
        "Get the current time in the format YYYY-MM-DD HH:MM:SS",
        AgentToolParameters::empty(),
        |_args, _ctx| Ok(current_time_at(&Local::now())),
    ))
}

/// Result of `simple_search`. No search happens; the query is echoed back.
pub fn simulated_search(query: &str) -> Value {
    json!({
        "query": query,
        "status": "success",
        "message": format!("Search completed for: {query}"),
        "note": "This is a custom search tool simulation. For real web search, use a dedicated search agent.",
    })
}

/// `simple_search`: simulated search over `query`.
pub fn simple_search_tool() -> Arc<dyn Tool> {
    Arc::new(AgentTool::from_fn(
        "simple_search",
        "Perform a simple search simulation and return results for the given query",
        AgentToolParameters::object()
            .string("query", "What to search for", true)
            .build(),
        |args, _ctx| {
            let query = args.get_str("query")?;
            info!(query, "simple_search called");
            Ok(simulated_search(query))
        },
    ))
}

pub fn agent(config: &AgentryConfig) -> Result<Agent> {
    let agent = Agent::new(NAME, LanguageModel::default_gemini())
        .with_description("Tool agent with custom tools")
        .with_instruction(INSTRUCTION)
        .with_tools([current_time_tool(), simple_search_tool()]);
    super::configure(agent, config)
}
