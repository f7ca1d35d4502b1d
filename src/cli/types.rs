//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};

use super::commands::init::InitArgs;
use super::commands::leaderboard::LeaderboardArgs;
use super::commands::play::PlayArgs;
use super::commands::progress::ProgressCommands;
use super::commands::settings::SettingsCommands;

#[derive(Parser)]
#[command(name = "cognate")]
#[command(about = "Cognate - adaptive relationship-judgment reaction trainer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize configuration and the local progress database
    Init(InitArgs),

    /// Play a training session
    Play(PlayArgs),

    /// Show or reset saved progress
    #[command(subcommand)]
    Progress(ProgressCommands),

    /// Show or change sound and auto-continue settings
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Show the remote leaderboard
    Leaderboard(LeaderboardArgs),
}
