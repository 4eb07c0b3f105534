//! agentry CLI binary entry point.

use agentry::cli::{commands, Cli, Commands};
use agentry::error::Result;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("agentry=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&cli).await {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: {}", e.recovery_suggestion().hint());
            std::process::exit(e.category().exit_code());
        }
    }
}

async fn run(cli: &Cli) -> Result<Value> {
    let config = commands::load_config(cli)?;
    match &cli.command {
        Commands::List => commands::handle_list(&config),
        Commands::Show(args) => commands::handle_show(&config, args),
        Commands::Call(args) => commands::handle_call(&config, args).await,
        Commands::CheckEmail(args) => commands::handle_check_email(&config, args).await,
    }
}
