//! Play session domain model.
//!
//! A session is one run of `task_total` trials under a fixed [`GameMode`].
//! [`SessionState`] is owned by the trial engine and discarded when the
//! session returns to idle.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::relationship::{RelationshipType, StimulusPair};
use super::settings::AutoContinueSettings;

/// Lowest difficulty level.
pub const MIN_LEVEL: u32 = 1;
/// Highest level a user may pick in manual mode.
pub const MAX_SELECTABLE_LEVEL: u32 = 18;
/// Bounds for the user-chosen manual session length.
pub const MIN_MANUAL_TASKS: u32 = 10;
pub const MAX_MANUAL_TASKS: u32 = 60;
/// Adaptive sessions always run this many trials.
pub const ADAPTIVE_TASK_TOTAL: u32 = 30;

/// Clamp a stored or user-supplied level to at least [`MIN_LEVEL`].
pub fn clamp_level(level: i64) -> u32 {
    u32::try_from(level.max(i64::from(MIN_LEVEL))).unwrap_or(u32::MAX)
}

/// Clamp a manual-mode level into the selectable range.
pub fn clamp_manual_level(level: u32) -> u32 {
    level.clamp(MIN_LEVEL, MAX_SELECTABLE_LEVEL)
}

/// Clamp a manual-mode session length into its allowed range.
pub fn clamp_task_total(total: u32) -> u32 {
    total.clamp(MIN_MANUAL_TASKS, MAX_MANUAL_TASKS)
}

/// How the session picks its level and whether it persists progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// User-chosen level and length; nothing is persisted.
    Manual,
    /// Level loaded from progress and adjusted at session end.
    Adaptive,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Adaptive => "adaptive",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "manual" => Some(Self::Manual),
            "adaptive" => Some(Self::Adaptive),
            _ => None,
        }
    }
}

/// Parameters fixed for the lifetime of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub mode: GameMode,
    pub level: u32,
    pub task_total: u32,
    pub auto_continue: AutoContinueSettings,
}

impl SessionConfig {
    /// Manual session; level and length are clamped into their ranges.
    pub fn manual(level: u32, task_total: u32) -> Self {
        Self {
            mode: GameMode::Manual,
            level: clamp_manual_level(level),
            task_total: clamp_task_total(task_total),
            auto_continue: AutoContinueSettings::default(),
        }
    }

    /// Adaptive session starting from a persisted level.
    pub fn adaptive(level: u32) -> Self {
        Self {
            mode: GameMode::Adaptive,
            level: level.max(MIN_LEVEL),
            task_total: ADAPTIVE_TASK_TOTAL,
            auto_continue: AutoContinueSettings::default(),
        }
    }

    pub fn with_auto_continue(mut self, auto_continue: AutoContinueSettings) -> Self {
        self.auto_continue = auto_continue;
        self
    }
}

/// State of the trial engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    Idle,
    ShowingRelationship,
    AwaitingResponse,
    Feedback,
    SessionEndLevelUp,
    SessionEndPerfect,
    SessionEndLevelDown,
    SessionEndSummary,
}

impl EngineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::ShowingRelationship => "showing_relationship",
            Self::AwaitingResponse => "awaiting_response",
            Self::Feedback => "feedback",
            Self::SessionEndLevelUp => "session_end_level_up",
            Self::SessionEndPerfect => "session_end_perfect",
            Self::SessionEndLevelDown => "session_end_level_down",
            Self::SessionEndSummary => "session_end_summary",
        }
    }

    /// Outcome states shown after the last trial.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::SessionEndLevelUp
                | Self::SessionEndPerfect
                | Self::SessionEndLevelDown
                | Self::SessionEndSummary
        )
    }

    /// States in which a trial is in progress.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            Self::ShowingRelationship | Self::AwaitingResponse | Self::Feedback
        )
    }
}

/// How a trial was resolved, as shown during feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Correct,
    Incorrect,
    Timeout,
}

impl FeedbackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Incorrect => "incorrect",
            Self::Timeout => "timeout",
        }
    }
}

/// One completed trial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub relationship: RelationshipType,
    pub pair: StimulusPair,
    /// Whether the pair actually satisfied the relationship.
    pub expected: bool,
    /// The subject's judgment; `None` on timeout.
    pub answer: Option<bool>,
    pub correct: bool,
}

/// Result of evaluating a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionOutcome {
    LevelUp { new_level: u32 },
    Perfect { new_level: u32 },
    LevelDown { new_level: u32 },
    /// Level unchanged. `percent` is the share of correct answers.
    Summary { level: u32, percent: u32 },
}

impl SessionOutcome {
    /// The level the next session should start at.
    pub fn next_level(&self) -> u32 {
        match *self {
            Self::LevelUp { new_level } | Self::Perfect { new_level } | Self::LevelDown { new_level } => {
                new_level
            }
            Self::Summary { level, .. } => level,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LevelUp { .. } => "level_up",
            Self::Perfect { .. } => "perfect",
            Self::LevelDown { .. } => "level_down",
            Self::Summary { .. } => "summary",
        }
    }
}

/// Mutable state of the session in progress.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub id: Uuid,
    pub mode: GameMode,
    pub level: u32,
    /// Completed trials before the current one (0-based index of the current trial).
    pub task_index: u32,
    pub task_total: u32,
    pub score: u32,
    pub error_count: u32,
    pub history: Vec<TrialRecord>,
}

impl SessionState {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            mode: config.mode,
            level: config.level.max(MIN_LEVEL),
            task_index: 0,
            task_total: config.task_total.max(1),
            score: 0,
            error_count: 0,
            history: Vec::new(),
        }
    }

    pub fn is_adaptive(&self) -> bool {
        self.mode == GameMode::Adaptive
    }

    /// True when the current trial is the last one of the session.
    pub fn is_last_trial(&self) -> bool {
        self.task_index + 1 >= self.task_total
    }

    /// Record a judged trial.
    pub fn record_judgment(
        &mut self,
        relationship: RelationshipType,
        pair: StimulusPair,
        expected: bool,
        answer: bool,
    ) -> FeedbackKind {
        let correct = answer == expected;
        if correct {
            self.score += 1;
        } else {
            self.error_count += 1;
        }
        self.history.push(TrialRecord {
            relationship,
            pair,
            expected,
            answer: Some(answer),
            correct,
        });
        if correct {
            FeedbackKind::Correct
        } else {
            FeedbackKind::Incorrect
        }
    }

    /// Record a trial whose deadline expired. Only adaptive sessions count
    /// the timeout as an error.
    pub fn record_timeout(&mut self, relationship: RelationshipType, pair: StimulusPair, expected: bool) {
        if self.is_adaptive() {
            self.error_count += 1;
        }
        self.history.push(TrialRecord {
            relationship,
            pair,
            expected,
            answer: None,
            correct: false,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_config_clamps() {
        let config = SessionConfig::manual(40, 5);
        assert_eq!(config.level, MAX_SELECTABLE_LEVEL);
        assert_eq!(config.task_total, MIN_MANUAL_TASKS);

        let config = SessionConfig::manual(0, 100);
        assert_eq!(config.level, MIN_LEVEL);
        assert_eq!(config.task_total, MAX_MANUAL_TASKS);
    }

    #[test]
    fn test_adaptive_config_is_thirty_trials() {
        let config = SessionConfig::adaptive(0);
        assert_eq!(config.level, 1);
        assert_eq!(config.task_total, ADAPTIVE_TASK_TOTAL);
        assert_eq!(config.mode, GameMode::Adaptive);
    }

    #[test]
    fn test_clamp_level_rejects_non_positive() {
        assert_eq!(clamp_level(-4), 1);
        assert_eq!(clamp_level(0), 1);
        assert_eq!(clamp_level(9), 9);
    }

    #[test]
    fn test_engine_state_classes() {
        assert!(EngineState::SessionEndSummary.is_terminal());
        assert!(!EngineState::Feedback.is_terminal());
        assert!(EngineState::AwaitingResponse.is_active());
        assert!(!EngineState::Idle.is_active());
        assert!(!EngineState::SessionEndPerfect.is_active());
    }

    #[test]
    fn test_timeout_counts_only_in_adaptive() {
        let pair = StimulusPair::new("1", "2");
        let mut manual = SessionState::new(&SessionConfig::manual(3, 10));
        manual.record_timeout(RelationshipType::SequentialNumber, pair.clone(), true);
        assert_eq!(manual.error_count, 0);
        assert_eq!(manual.history.len(), 1);

        let mut adaptive = SessionState::new(&SessionConfig::adaptive(3));
        adaptive.record_timeout(RelationshipType::SequentialNumber, pair, true);
        assert_eq!(adaptive.error_count, 1);
        assert_eq!(adaptive.history[0].answer, None);
    }

    #[test]
    fn test_wrong_no_match_on_true_pair_is_an_error() {
        let mut state = SessionState::new(&SessionConfig::adaptive(2));
        let kind = state.record_judgment(
            RelationshipType::Antonym,
            StimulusPair::new("hot", "cold"),
            true,
            false,
        );
        assert_eq!(kind, FeedbackKind::Incorrect);
        assert_eq!(state.error_count, 1);
        assert_eq!(state.score, 0);
    }
}
