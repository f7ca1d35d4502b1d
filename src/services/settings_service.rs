//! Settings persistence on top of the local store.

use std::sync::Arc;

use tracing::warn;

use crate::domain::errors::DomainResult;
use crate::domain::models::{AutoContinueSettings, Settings};
use crate::domain::ports::{LocalStore, StoreKey};

pub struct SettingsService {
    local: Arc<dyn LocalStore>,
}

impl SettingsService {
    pub fn new(local: Arc<dyn LocalStore>) -> Self {
        Self { local }
    }

    /// Load settings. Missing or unreadable values fall back to defaults.
    pub async fn load(&self) -> DomainResult<Settings> {
        let defaults = Settings::default();

        let sound_enabled = match self.local.get(StoreKey::SoundEnabled).await? {
            None => defaults.sound_enabled,
            Some(raw) => match raw.trim() {
                "true" => true,
                "false" => false,
                other => {
                    warn!(value = other, "unreadable sound setting, using default");
                    defaults.sound_enabled
                }
            },
        };

        let auto_continue = match self.local.get(StoreKey::AutoContinue).await? {
            None => defaults.auto_continue,
            Some(raw) => match serde_json::from_str::<AutoContinueSettings>(&raw) {
                Ok(value) => value.sanitized(),
                Err(e) => {
                    warn!(error = %e, "unreadable auto-continue setting, using default");
                    defaults.auto_continue
                }
            },
        };

        Ok(Settings {
            sound_enabled,
            auto_continue,
        })
    }

    pub async fn save(&self, settings: &Settings) -> DomainResult<()> {
        self.local
            .set(StoreKey::SoundEnabled, if settings.sound_enabled { "true" } else { "false" })
            .await?;
        let auto_continue = serde_json::to_string(&settings.auto_continue.sanitized())?;
        self.local.set(StoreKey::AutoContinue, &auto_continue).await
    }

    pub async fn set_sound(&self, enabled: bool) -> DomainResult<Settings> {
        let mut settings = self.load().await?;
        settings.sound_enabled = enabled;
        self.save(&settings).await?;
        Ok(settings)
    }

    /// Update auto-continue; the delay is clamped into its allowed range.
    pub async fn set_auto_continue(&self, enabled: bool, delay_seconds: Option<i64>) -> DomainResult<Settings> {
        let mut settings = self.load().await?;
        let delay = delay_seconds.unwrap_or_else(|| i64::from(settings.auto_continue.delay_seconds));
        settings.auto_continue = AutoContinueSettings::new(enabled, delay);
        self.save(&settings).await?;
        Ok(settings)
    }
}
