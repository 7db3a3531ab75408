//! daybook CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use daybook_client::cli::{Cli, Command, ConfigAction};
use daybook_client::commands;
use daybook_client::config::ClientConfig;
use daybook_client::error::ClientResult;
use daybook_core::init_tracing;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> ClientResult<()> {
    let config_path = cli.config.clone().unwrap_or_else(ClientConfig::default_path);
    let mut config = if cli.config.is_some() {
        ClientConfig::load_from(&config_path)?
    } else {
        ClientConfig::load()?
    };
    cli.apply_to(&mut config);

    init_tracing(config.tracing_config())?;
    debug!(path = %config_path.display(), "Configuration resolved");

    match cli.command {
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => commands::config::dump(&config, &config_path),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(&config_path),
        },
        None => commands::interactive::run(&config),
    }
}
