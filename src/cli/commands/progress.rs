//! Implementation of the `cognate progress` subcommands.

use anyhow::{Context, Result};
use clap::Subcommand;
use serde::Serialize;

use crate::cli::context::AppContext;
use crate::cli::output::{detail_table, output, CommandOutput};
use crate::domain::models::{Config, Identity, PersistedProgress};
use crate::services::{deadline_ms, RemoteSync};

#[derive(Subcommand, Debug)]
pub enum ProgressCommands {
    /// Show saved progress, reconciled with the remote store when signed in
    Show,

    /// Forget saved progress on this machine
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Serialize)]
pub struct ProgressShowOutput {
    pub progress: PersistedProgress,
    pub deadline_ms: u64,
    pub identity: Option<Identity>,
    pub remote: RemoteSync,
}

impl CommandOutput for ProgressShowOutput {
    fn to_human(&self) -> String {
        let remote = match &self.remote {
            RemoteSync::Skipped => "not synced".to_string(),
            RemoteSync::Synced => "in sync".to_string(),
            RemoteSync::Failed(message) => format!("unavailable ({message})"),
        };
        let player = self
            .identity
            .as_ref()
            .map_or_else(|| "anonymous".to_string(), |identity| identity.display_name.clone());
        detail_table(&[
            ("Player", player),
            ("Current level", self.progress.current_level.to_string()),
            ("Highest level", self.progress.highest_level_reached.to_string()),
            ("Best score", self.progress.best_score.to_string()),
            ("Response window", format!("{} ms", self.deadline_ms)),
            ("Remote", remote),
        ])
        .to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct ProgressResetOutput {
    pub success: bool,
    pub message: String,
}

impl CommandOutput for ProgressResetOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(command: ProgressCommands, config: Config, json_mode: bool) -> Result<()> {
    let context = AppContext::open(config).await?;
    match command {
        ProgressCommands::Show => {
            let (progress, remote) = context
                .progress
                .load_effective()
                .await
                .context("Failed to load progress")?;
            let result = ProgressShowOutput {
                progress,
                deadline_ms: deadline_ms(progress.current_level),
                identity: context.progress.identity(),
                remote,
            };
            output(&result, json_mode);
        }
        ProgressCommands::Reset { yes } => {
            let result = if yes {
                context.progress.reset().await.context("Failed to reset progress")?;
                ProgressResetOutput {
                    success: true,
                    message: "Local progress reset to level 1.".to_string(),
                }
            } else {
                ProgressResetOutput {
                    success: false,
                    message: "Refusing to reset without --yes.".to_string(),
                }
            };
            output(&result, json_mode);
        }
    }
    Ok(())
}
