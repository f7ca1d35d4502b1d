//! Cognate CLI entry point.

use clap::Parser;

use cognate::cli::{Cli, Commands};
use cognate::infrastructure::config::ConfigLoader;
use cognate::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Init runs before any configuration exists.
    let command = match cli.command {
        Commands::Init(args) => {
            if let Err(err) = cognate::cli::commands::init::execute(args, cli.json).await {
                cognate::cli::handle_error(err, cli.json);
            }
            return;
        }
        command => command,
    };

    let config = match ConfigLoader::load() {
        Ok(config) => config,
        Err(err) => cognate::cli::handle_error(err, cli.json),
    };

    let mut log_config = LogConfig::from(&config.logging);
    if log_config.log_dir.as_ref().is_some_and(|dir| !dir.is_dir()) {
        log_config.log_dir = None;
    }
    let _logger = match LoggerImpl::init(&log_config) {
        Ok(logger) => Some(logger),
        Err(err) => {
            eprintln!("warning: logging disabled: {err:#}");
            None
        }
    };

    let result = match command {
        Commands::Init(_) => Ok(()),
        Commands::Play(args) => cognate::cli::commands::play::execute(args, config, cli.json).await,
        Commands::Progress(command) => cognate::cli::commands::progress::execute(command, config, cli.json).await,
        Commands::Settings(command) => cognate::cli::commands::settings::execute(command, config, cli.json).await,
        Commands::Leaderboard(args) => cognate::cli::commands::leaderboard::execute(args, config, cli.json).await,
    };

    if let Err(err) = result {
        cognate::cli::handle_error(err, cli.json);
    }
}
