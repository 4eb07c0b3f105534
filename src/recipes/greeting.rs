//! The smallest possible agent: an instruction and nothing else.

use crate::agent::Agent;
use crate::config::AgentryConfig;
use crate::error::Result;
use crate::models::LanguageModel;

pub const NAME: &str = "greeting_agent";

const INSTRUCTION: &str = "\
You are a helpful assistant that greets the user.
Ask for the user's name and greet them by name.";

pub fn agent(config: &AgentryConfig) -> Result<Agent> {
    let agent = Agent::new(NAME, LanguageModel::default_gemini())
        .with_description("Greeting agent")
        .with_instruction(INSTRUCTION);
    super::configure(agent, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SessionState;

    #[test]
    fn has_no_tools_and_renders_without_state() {
        let agent = agent(&AgentryConfig::new()).unwrap();
        assert!(agent.tool_names().is_empty());
        let rendered = agent.render_instruction(&SessionState::new()).unwrap();
        assert!(rendered.contains("greet them by name"));
    }
}
