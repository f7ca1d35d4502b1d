//! Presentation port.
//!
//! The session runner pushes a [`Frame`] on every engine transition. Input
//! flows back through the runner's handle, not through this trait.

use std::time::Duration;

use crate::domain::models::{
    EngineState, FeedbackKind, GameMode, RelationshipType, SessionOutcome, StimulusPair,
};

/// Snapshot of everything the presentation layer needs to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub state: EngineState,
    pub mode: GameMode,
    pub level: u32,
    pub task_index: u32,
    pub task_total: u32,
    pub relationship: Option<RelationshipType>,
    pub pair: Option<StimulusPair>,
    pub feedback: Option<FeedbackKind>,
    /// Response window for the pair on screen.
    pub deadline: Option<Duration>,
    pub outcome: Option<SessionOutcome>,
    pub score: u32,
    pub error_count: u32,
}

impl Frame {
    pub fn idle() -> Self {
        Self {
            state: EngineState::Idle,
            mode: GameMode::Manual,
            level: 0,
            task_index: 0,
            task_total: 0,
            relationship: None,
            pair: None,
            feedback: None,
            deadline: None,
            outcome: None,
            score: 0,
            error_count: 0,
        }
    }

    /// Prompt text for the relationship on screen.
    pub fn prompt(&self) -> Option<&'static str> {
        self.relationship.map(|r| r.prompt())
    }
}

/// Sink for engine frames.
///
/// Implementations must not block: they run on the session runner's task.
pub trait Presenter: Send {
    fn render(&mut self, frame: &Frame);

    /// A recoverable error the player should see, e.g. a failed remote sync.
    fn notify_error(&mut self, message: &str);

    /// Feedback sound. Only called when sound is enabled.
    fn chime(&mut self, _kind: FeedbackKind) {}
}
