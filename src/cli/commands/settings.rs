//! Implementation of the `cognate settings` subcommands.

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use serde::Serialize;

use crate::cli::context::AppContext;
use crate::cli::output::{detail_table, output, CommandOutput};
use crate::domain::models::{Config, Settings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    fn enabled(self) -> bool {
        self == Self::On
    }
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show current settings
    Show,

    /// Change one or more settings
    Set {
        /// Play a chime on incorrect answers and timeouts
        #[arg(long, value_enum)]
        sound: Option<Toggle>,

        /// Move on to the next trial automatically
        #[arg(long, value_enum)]
        auto_continue: Option<Toggle>,

        /// Auto-continue delay in seconds (1-20)
        #[arg(long)]
        delay: Option<i64>,
    },
}

#[derive(Debug, Serialize)]
pub struct SettingsOutput {
    #[serde(flatten)]
    pub settings: Settings,
}

impl CommandOutput for SettingsOutput {
    fn to_human(&self) -> String {
        let on_off = |enabled: bool| if enabled { "on" } else { "off" }.to_string();
        detail_table(&[
            ("Sound", on_off(self.settings.sound_enabled)),
            ("Auto-continue", on_off(self.settings.auto_continue.enabled)),
            ("Delay", format!("{} s", self.settings.auto_continue.delay_seconds)),
        ])
        .to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(command: SettingsCommands, config: Config, json_mode: bool) -> Result<()> {
    let context = AppContext::open(config).await?;
    let settings = match command {
        SettingsCommands::Show => context.settings.load().await.context("Failed to load settings")?,
        SettingsCommands::Set {
            sound,
            auto_continue,
            delay,
        } => {
            let mut settings = context.settings.load().await.context("Failed to load settings")?;
            if let Some(sound) = sound {
                settings = context.settings.set_sound(sound.enabled()).await?;
            }
            if auto_continue.is_some() || delay.is_some() {
                let enabled = auto_continue.map_or(settings.auto_continue.enabled, Toggle::enabled);
                settings = context.settings.set_auto_continue(enabled, delay).await?;
            }
            settings
        }
    };
    output(&SettingsOutput { settings }, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::AutoContinueSettings;

    #[test]
    fn test_settings_output() {
        console::set_colors_enabled(false);
        let result = SettingsOutput {
            settings: Settings {
                sound_enabled: false,
                auto_continue: AutoContinueSettings::new(true, 5),
            },
        };
        let human = result.to_human();
        assert!(human.contains("off"));
        assert!(human.contains("5 s"));
        assert_eq!(result.to_json()["sound_enabled"], false);
    }
}
