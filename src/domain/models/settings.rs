//! User settings persisted in the local store.

use serde::{Deserialize, Serialize};

/// Allowed auto-continue delay range, in seconds.
pub const MIN_AUTO_CONTINUE_DELAY_SECS: u32 = 1;
pub const MAX_AUTO_CONTINUE_DELAY_SECS: u32 = 20;

/// Clamp an auto-continue delay into `[1, 20]` seconds.
pub fn clamp_delay(seconds: i64) -> u32 {
    let clamped = seconds.clamp(
        i64::from(MIN_AUTO_CONTINUE_DELAY_SECS),
        i64::from(MAX_AUTO_CONTINUE_DELAY_SECS),
    );
    u32::try_from(clamped).unwrap_or(MIN_AUTO_CONTINUE_DELAY_SECS)
}

/// Automatic reveal of the stimulus pair after the relationship prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoContinueSettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_delay_seconds")]
    pub delay_seconds: u32,
}

const fn default_delay_seconds() -> u32 {
    3
}

impl Default for AutoContinueSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            delay_seconds: default_delay_seconds(),
        }
    }
}

impl AutoContinueSettings {
    pub fn new(enabled: bool, delay_seconds: i64) -> Self {
        Self {
            enabled,
            delay_seconds: clamp_delay(delay_seconds),
        }
    }

    /// Copy with the delay forced back into range.
    pub fn sanitized(self) -> Self {
        Self::new(self.enabled, i64::from(self.delay_seconds))
    }
}

/// All user-facing settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub sound_enabled: bool,
    pub auto_continue: AutoContinueSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            auto_continue: AutoContinueSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_delay_bounds() {
        assert_eq!(clamp_delay(0), 1);
        assert_eq!(clamp_delay(-10), 1);
        assert_eq!(clamp_delay(7), 7);
        assert_eq!(clamp_delay(21), 20);
    }

    #[test]
    fn test_auto_continue_json_defaults() {
        let parsed: AutoContinueSettings = serde_json::from_str(r#"{"enabled":true}"#).unwrap();
        assert!(parsed.enabled);
        assert_eq!(parsed.delay_seconds, 3);

        let wild: AutoContinueSettings =
            serde_json::from_str(r#"{"enabled":false,"delay_seconds":99}"#).unwrap();
        assert_eq!(wild.sanitized().delay_seconds, 20);
    }
}
