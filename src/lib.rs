//! agentry — tool-augmented agent recipes.
//!
//! Defines agents the way an agent runtime consumes them: a model, an
//! instruction templated from session state, a set of callable tools, and
//! optionally a structured output schema. Five recipes show the pieces in
//! isolation: a bare greeting agent, plain function tools, a non-Google model,
//! structured output, and tools that keep data in session state.
//!
//! # Quick Start
//!
//! ```no_run
//! use agentry::prelude::*;
//! use agentry::recipes::reminders;
//!
//! # async fn example() -> agentry::error::Result<()> {
//! let config = AgentryConfig::from_env();
//! let agent = reminders::agent(&config)?;
//! let state = SessionState::from_value(reminders::initial_state("Ada"))?;
//!
//! agent
//!     .call_tool("add_reminder", serde_json::json!({"reminder": "buy milk"}), &state)
//!     .await?;
//! println!("{}", agent.render_instruction(&state)?);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod prelude;
pub mod recipes;
pub mod session;
pub mod state;
pub mod tools;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
