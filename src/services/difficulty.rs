//! Adaptive difficulty controller.
//!
//! Maps a level to its response deadline and decides, at the end of an
//! adaptive session, whether the player levels up, levels down, or stays.

use std::time::Duration;

use crate::domain::models::session::MIN_LEVEL;
use crate::domain::models::{GameMode, SessionOutcome};

/// Errors at or above this count end an adaptive session with a level down.
pub const LEVEL_DOWN_ERROR_THRESHOLD: u32 = 6;
/// Share of correct answers needed to level up, in percent.
pub const LEVEL_UP_PERCENT: u32 = 90;
/// The deadline never drops below this many milliseconds.
pub const MIN_DEADLINE_MS: u64 = 50;

/// Response window for a level, in milliseconds.
///
/// ```text
/// level >= 15       max(50, 150 - (level - 14) * 25)
/// 10 <= level < 15  350 - (level - 10) * 50
/// 8 <= level < 10   500 - (level - 7) * 50
/// level < 8         2000 - (level - 1) * 250
/// ```
pub fn deadline_ms(level: u32) -> u64 {
    let level = i64::from(level.max(MIN_LEVEL));
    let ms = if level >= 15 {
        150 - (level - 14) * 25
    } else if level >= 10 {
        350 - (level - 10) * 50
    } else if level >= 8 {
        500 - (level - 7) * 50
    } else {
        2000 - (level - 1) * 250
    };
    u64::try_from(ms).map_or(MIN_DEADLINE_MS, |ms| ms.max(MIN_DEADLINE_MS))
}

pub fn deadline(level: u32) -> Duration {
    Duration::from_millis(deadline_ms(level))
}

/// Tallies of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTally {
    pub mode: GameMode,
    pub level: u32,
    pub score: u32,
    pub error_count: u32,
    pub task_total: u32,
}

/// Decide the outcome of a finished session.
///
/// Manual sessions always produce a summary. Adaptive sessions level down
/// on too many errors, level up at 90% correct (perfect at 100%), and
/// otherwise stay at the same level.
pub fn evaluate(tally: SessionTally) -> SessionOutcome {
    let total = tally.task_total.max(1);
    let percent = tally.score * 100 / total;

    if tally.mode == GameMode::Manual {
        return SessionOutcome::Summary {
            level: tally.level,
            percent,
        };
    }

    if tally.error_count >= LEVEL_DOWN_ERROR_THRESHOLD {
        SessionOutcome::LevelDown {
            new_level: tally.level.saturating_sub(1).max(MIN_LEVEL),
        }
    } else if tally.score * 100 >= total * LEVEL_UP_PERCENT {
        let new_level = tally.level + 1;
        if tally.score >= total {
            SessionOutcome::Perfect { new_level }
        } else {
            SessionOutcome::LevelUp { new_level }
        }
    } else {
        SessionOutcome::Summary {
            level: tally.level,
            percent,
        }
    }
}
