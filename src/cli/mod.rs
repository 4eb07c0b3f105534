//! CLI entry point for agentry.

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// agentry CLI
#[derive(Parser, Debug)]
#[command(name = "agentry", version, about = "agentry — inspect and exercise recipe agents")]
pub struct Cli {
    /// Settings file (defaults to ~/.agentry/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Model selector replacing the stock Gemini model (e.g. google:gemini-2.5-flash)
    #[arg(long, global = true)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List recipe agents
    List,
    /// Show an agent's configuration
    Show(ShowArgs),
    /// Invoke one tool of an agent against a session state
    Call(CallArgs),
    /// Validate a structured email reply
    CheckEmail(CheckEmailArgs),
}

/// Arguments for `agentry show`.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Agent name (see `agentry list`)
    pub agent: String,

    /// Session state as a JSON object; renders the instruction against it
    #[arg(long)]
    pub state: Option<String>,
}

/// Arguments for `agentry call`.
#[derive(Parser, Debug)]
pub struct CallArgs {
    /// Agent name
    pub agent: String,

    /// Tool name
    pub tool: String,

    /// Tool arguments as a JSON object
    #[arg(long, default_value = "{}")]
    pub args: String,

    /// Session state as a JSON object
    #[arg(long, default_value = "{}")]
    pub state: String,
}

/// Arguments for `agentry check-email`.
#[derive(Parser, Debug)]
pub struct CheckEmailArgs {
    /// File holding the model reply (reads stdin when omitted)
    pub file: Option<PathBuf>,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
