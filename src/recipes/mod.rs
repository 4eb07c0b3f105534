//! Ready-made agents, one per tutorial.
//!
//! Each recipe is independent: a few tools plus an [`Agent`] wired to them.
//! [`catalog`] builds all of them against one configuration.

pub mod dad_jokes;
pub mod email;
pub mod greeting;
pub mod reminders;
pub mod tool_agent;

use tracing::warn;

use crate::agent::Agent;
use crate::config::AgentryConfig;
use crate::error::{AgentryError, Result};

/// Names of every recipe agent, in catalog order.
pub const AGENT_NAMES: [&str; 5] = [
    greeting::NAME,
    tool_agent::NAME,
    dad_jokes::NAME,
    email::NAME,
    reminders::NAME,
];

/// Build every recipe agent.
pub fn catalog(config: &AgentryConfig) -> Result<Vec<Agent>> {
    AGENT_NAMES.iter().map(|name| build(name, config)).collect()
}

/// Build one recipe agent by name.
pub fn build(name: &str, config: &AgentryConfig) -> Result<Agent> {
    match name {
        greeting::NAME => greeting::agent(config),
        tool_agent::NAME => tool_agent::agent(config),
        dad_jokes::NAME => dad_jokes::agent(config),
        email::NAME => email::agent(config),
        reminders::NAME => reminders::agent(config),
        other => Err(AgentryError::AgentNotFound(other.to_string())),
    }
}

/// Apply configuration overrides to a recipe's stock agent and validate it.
///
/// The API key is looked up for the model the agent ends up on, not the one
/// the recipe started with.
fn configure(agent: Agent, config: &AgentryConfig) -> Result<Agent> {
    let model = config.model_for(agent.name(), agent.model())?;
    let api_key = config.get_api_key(model.provider_name());
    if api_key.is_none() {
        warn!(
            agent = agent.name(),
            provider = model.provider_name(),
            env = %model.api_key_env_vars().join(" or "),
            "no API key configured; the model will reject requests"
        );
    }
    let settings = config.generation_for(agent.name(), agent.settings().clone());
    let agent = agent
        .with_model(model)
        .with_settings(settings)
        .with_api_key(api_key);
    agent.validate()?;
    Ok(agent)
}
