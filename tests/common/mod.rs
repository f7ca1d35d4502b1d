//! Common test utilities for integration tests

use std::path::PathBuf;
use std::sync::Arc;

use cognate::domain::models::{EngineState, FeedbackKind};
use cognate::domain::ports::{Frame, Presenter};
use cognate::services::{RunnerHandle, StimulusCatalog};
use tempfile::TempDir;

/// Create a temporary test database
///
/// Returns the path to a SQLite database file in a temporary directory.
#[allow(dead_code)]
pub fn temp_db_path() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("cognate.db");
    (dir, db_path)
}

/// Setup test logging
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Scripted player that answers every trial.
///
/// Answers correctly unless the trial index is listed in `wrong_on`, and
/// dismisses summary screens so adaptive sessions end.
#[allow(dead_code)]
pub struct ScriptedPlayer {
    pub handle: RunnerHandle,
    pub catalog: Arc<StimulusCatalog>,
    pub wrong_on: Vec<u32>,
    pub errors: Vec<String>,
    pub frames: Vec<Frame>,
    pub chimes: Vec<FeedbackKind>,
}

#[allow(dead_code)]
impl ScriptedPlayer {
    pub fn new(handle: RunnerHandle, catalog: Arc<StimulusCatalog>) -> Self {
        Self {
            handle,
            catalog,
            wrong_on: Vec::new(),
            errors: Vec::new(),
            frames: Vec::new(),
            chimes: Vec::new(),
        }
    }

    pub fn wrong_on(mut self, trials: impl IntoIterator<Item = u32>) -> Self {
        self.wrong_on = trials.into_iter().collect();
        self
    }

    pub fn states(&self) -> Vec<EngineState> {
        self.frames.iter().map(|f| f.state).collect()
    }
}

impl Presenter for ScriptedPlayer {
    fn render(&mut self, frame: &Frame) {
        self.frames.push(frame.clone());
        match frame.state {
            EngineState::ShowingRelationship => self.handle.reveal().expect("runner alive"),
            EngineState::AwaitingResponse => {
                let (Some(kind), Some(pair)) = (frame.relationship, frame.pair.as_ref()) else {
                    return;
                };
                let truth = self.catalog.is_positive(kind, pair);
                let answer = if self.wrong_on.contains(&frame.task_index) { !truth } else { truth };
                self.handle.judge(answer).expect("runner alive");
            }
            EngineState::SessionEndSummary => self.handle.dismiss().expect("runner alive"),
            _ => {}
        }
    }

    fn notify_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn chime(&mut self, kind: FeedbackKind) {
        self.chimes.push(kind);
    }
}
