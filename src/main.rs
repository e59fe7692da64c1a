//! Pokepedai - command-line chat client
//!
//! Main entry point: parses the CLI, loads configuration, and dispatches to
//! the command handlers.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pokepedai::cli::{Cli, Commands};
use pokepedai::commands;
use pokepedai::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;
    config.validate()?;

    match cli.command {
        Commands::Chat { session, new } => {
            tracing::info!("Starting interactive chat");
            if let Some(s) = &session {
                tracing::debug!("Resuming session: {}", s);
            }
            commands::chat::run_chat(config, session, new).await
        }
        Commands::Send { message, session } => {
            tracing::debug!("One-shot send");
            commands::send::run_send(config, message, session).await
        }
        Commands::Sessions { command } => commands::sessions::handle_sessions(config, command),
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "pokepedai=debug"
    } else {
        "pokepedai=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
