//! Async driver for the trial engine.
//!
//! The runner owns a [`TrialEngine`] and turns its effects into real work:
//! timers become spawned sleeps that post [`EngineInput::TimerFired`] back
//! into the runner's channel, frames go to a [`Presenter`], and progress
//! updates go through the [`ProgressService`]. Player input arrives through
//! a cloneable [`RunnerHandle`] on the same channel, so the engine only ever
//! sees one input at a time.
//!
//! Aborting a timer task is best effort. A timer that fires after being
//! cancelled still reaches the engine, which ignores its stale token.

use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, warn};
use uuid::Uuid;

use super::catalog::StimulusCatalog;
use super::progress_service::{CommitReport, ProgressService};
use super::trial_engine::{Effect, EngineInput, EngineTiming, TimerToken, TrialEngine};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{EngineState, GameMode, SessionConfig, SessionOutcome};
use crate::domain::ports::Presenter;

/// Sends player input to a running session.
#[derive(Debug, Clone)]
pub struct RunnerHandle {
    tx: mpsc::UnboundedSender<EngineInput>,
}

impl RunnerHandle {
    fn send(&self, input: EngineInput) -> DomainResult<()> {
        self.tx
            .send(input)
            .map_err(|_| DomainError::RunnerStopped("session runner is gone".to_string()))
    }

    pub fn reveal(&self) -> DomainResult<()> {
        self.send(EngineInput::Reveal)
    }

    pub fn judge(&self, matches: bool) -> DomainResult<()> {
        self.send(EngineInput::Judgment(matches))
    }

    pub fn abort(&self) -> DomainResult<()> {
        self.send(EngineInput::Abort)
    }

    pub fn dismiss(&self) -> DomainResult<()> {
        self.send(EngineInput::Dismiss)
    }
}

/// Summary of one finished or aborted session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub session_id: Option<Uuid>,
    pub mode: GameMode,
    pub level: u32,
    pub score: u32,
    pub error_count: u32,
    pub task_total: u32,
    pub trials_played: usize,
    /// `None` when the session was aborted before its last trial.
    pub outcome: Option<SessionOutcome>,
    /// Result of the last progress write made by the session, if any.
    pub progress: Option<CommitReport>,
}

impl SessionReport {
    pub fn aborted(&self) -> bool {
        self.outcome.is_none()
    }
}

pub struct SessionRunner<R: Rng + Send> {
    engine: TrialEngine<R>,
    progress: Arc<ProgressService>,
    sound_enabled: bool,
    tx: mpsc::UnboundedSender<EngineInput>,
    rx: mpsc::UnboundedReceiver<EngineInput>,
    timers: HashMap<TimerToken, JoinHandle<()>>,
}

impl<R: Rng + Send> SessionRunner<R> {
    pub fn new(
        catalog: Arc<StimulusCatalog>,
        rng: R,
        timing: EngineTiming,
        progress: Arc<ProgressService>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            engine: TrialEngine::new(catalog, rng, timing),
            progress,
            sound_enabled: true,
            tx,
            rx,
            timers: HashMap::new(),
        }
    }

    pub fn with_sound(mut self, enabled: bool) -> Self {
        self.sound_enabled = enabled;
        self
    }

    pub fn handle(&self) -> RunnerHandle {
        RunnerHandle { tx: self.tx.clone() }
    }

    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    /// Play one session to completion or abort.
    ///
    /// Returns once the engine is back in `Idle`. Input queued before the
    /// session starts is discarded.
    pub async fn run_session(
        &mut self,
        config: SessionConfig,
        presenter: &mut dyn Presenter,
    ) -> DomainResult<SessionReport> {
        while self.rx.try_recv().is_ok() {}

        let mut last_commit = None;
        self.apply(EngineInput::Start(config), presenter, &mut last_commit).await;

        while self.engine.state() != EngineState::Idle {
            let input = self
                .rx
                .recv()
                .await
                .ok_or_else(|| DomainError::RunnerStopped("input channel closed".to_string()))?;
            if let EngineInput::TimerFired(token) = &input {
                self.timers.remove(token);
            }
            self.apply(input, presenter, &mut last_commit).await;
        }

        for (_, timer) in self.timers.drain() {
            timer.abort();
        }

        let session = self.engine.take_last_session();
        let outcome = self.engine.last_outcome();
        Ok(match session {
            Some(session) => SessionReport {
                session_id: Some(session.id),
                mode: session.mode,
                level: session.level,
                score: session.score,
                error_count: session.error_count,
                task_total: session.task_total,
                trials_played: session.history.len(),
                outcome,
                progress: last_commit,
            },
            None => SessionReport {
                session_id: None,
                mode: GameMode::Manual,
                level: 0,
                score: 0,
                error_count: 0,
                task_total: 0,
                trials_played: 0,
                outcome,
                progress: last_commit,
            },
        })
    }

    async fn apply(
        &mut self,
        input: EngineInput,
        presenter: &mut dyn Presenter,
        last_commit: &mut Option<CommitReport>,
    ) {
        for effect in self.engine.handle(input) {
            match effect {
                Effect::ArmTimer { token, after } => {
                    let tx = self.tx.clone();
                    let timer = tokio::spawn(async move {
                        tokio::time::sleep(after).await;
                        let _ = tx.send(EngineInput::TimerFired(token));
                    });
                    self.timers.insert(token, timer);
                }
                Effect::CancelTimer(token) => {
                    if let Some(timer) = self.timers.remove(&token) {
                        timer.abort();
                    }
                }
                Effect::Render(frame) => presenter.render(&frame),
                Effect::Chime(kind) => {
                    if self.sound_enabled {
                        presenter.chime(kind);
                    }
                }
                Effect::Persist { update, mode } => match self.progress.apply(update, mode).await {
                    Ok(report) => {
                        if let Some(message) = report.remote.failure() {
                            warn!(error = message, "progress kept locally, remote sync failed");
                            presenter.notify_error(&format!("Progress saved locally; remote sync failed: {message}"));
                        }
                        *last_commit = Some(report);
                    }
                    Err(e) => {
                        error!(error = %e, "failed to save progress");
                        presenter.notify_error(&format!("Failed to save progress: {e}"));
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use crate::adapters::memory::InMemoryLocalStore;
    use crate::domain::models::{FeedbackKind, PersistedProgress};
    use crate::domain::ports::Frame;

    /// Plays like a subject who always knows the answer.
    struct PerfectPlayer {
        handle: RunnerHandle,
        catalog: StimulusCatalog,
        abort_at: Option<u32>,
        chimes: Vec<FeedbackKind>,
        frames: Vec<Frame>,
    }

    impl Presenter for PerfectPlayer {
        fn render(&mut self, frame: &Frame) {
            self.frames.push(frame.clone());
            match frame.state {
                EngineState::ShowingRelationship if self.abort_at == Some(frame.task_index) => {
                    self.handle.abort().unwrap();
                }
                EngineState::ShowingRelationship => self.handle.reveal().unwrap(),
                EngineState::AwaitingResponse => {
                    let (Some(kind), Some(pair)) = (frame.relationship, frame.pair.as_ref()) else {
                        return;
                    };
                    self.handle.judge(self.catalog.is_positive(kind, pair)).unwrap();
                }
                EngineState::SessionEndSummary => self.handle.dismiss().unwrap(),
                _ => {}
            }
        }

        fn notify_error(&mut self, _message: &str) {}

        fn chime(&mut self, kind: FeedbackKind) {
            self.chimes.push(kind);
        }
    }

    fn runner(store: Arc<InMemoryLocalStore>) -> SessionRunner<SmallRng> {
        SessionRunner::new(
            Arc::new(StimulusCatalog::builtin()),
            SmallRng::seed_from_u64(7),
            EngineTiming::default(),
            Arc::new(ProgressService::local_only(store)),
        )
    }

    fn player(handle: RunnerHandle) -> PerfectPlayer {
        PerfectPlayer {
            handle,
            catalog: StimulusCatalog::builtin(),
            abort_at: None,
            chimes: Vec::new(),
            frames: Vec::new(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_perfect_adaptive_session_levels_up() {
        let store = Arc::new(InMemoryLocalStore::new());
        let mut runner = runner(store.clone());
        let mut presenter = player(runner.handle());

        let report = runner.run_session(SessionConfig::adaptive(2), &mut presenter).await.unwrap();

        assert_eq!(report.outcome, Some(SessionOutcome::Perfect { new_level: 3 }));
        assert_eq!(report.score, 30);
        assert_eq!(report.trials_played, 30);
        assert_eq!(presenter.chimes.len(), 30);
        let progress = ProgressService::local_only(store).load_local().await.unwrap();
        assert_eq!(progress, PersistedProgress::new(3, 3, 30));
        assert_eq!(runner.state(), EngineState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abort_mid_session_commits_score() {
        let store = Arc::new(InMemoryLocalStore::new());
        let mut runner = runner(store.clone());
        let mut presenter = player(runner.handle());
        presenter.abort_at = Some(3);

        let report = runner.run_session(SessionConfig::adaptive(5), &mut presenter).await.unwrap();

        assert!(report.aborted());
        assert_eq!(report.trials_played, 3);
        let progress = ProgressService::local_only(store).load_local().await.unwrap();
        assert_eq!(progress, PersistedProgress::new(5, 5, 3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unanswered_trials_time_out() {
        struct Idle(RunnerHandle);
        impl Presenter for Idle {
            fn render(&mut self, frame: &Frame) {
                if frame.state == EngineState::ShowingRelationship {
                    self.0.reveal().unwrap();
                }
            }
            fn notify_error(&mut self, _message: &str) {}
        }

        let mut runner = runner(Arc::new(InMemoryLocalStore::new()));
        let mut presenter = Idle(runner.handle());
        let report = runner.run_session(SessionConfig::manual(18, 10), &mut presenter).await.unwrap();

        assert_eq!(report.outcome, Some(SessionOutcome::Summary { level: 18, percent: 0 }));
        assert_eq!(report.error_count, 0);
        assert!(report.progress.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sound_disabled_suppresses_chimes() {
        let mut runner = runner(Arc::new(InMemoryLocalStore::new())).with_sound(false);
        let mut presenter = player(runner.handle());
        runner.run_session(SessionConfig::manual(1, 10), &mut presenter).await.unwrap();
        assert!(presenter.chimes.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_runner_is_reusable_across_sessions() {
        let store = Arc::new(InMemoryLocalStore::new());
        let mut runner = runner(store.clone());
        let mut presenter = player(runner.handle());

        let first = runner.run_session(SessionConfig::adaptive(1), &mut presenter).await.unwrap();
        let next_level = first.outcome.unwrap().next_level();
        let second = runner
            .run_session(SessionConfig::adaptive(next_level), &mut presenter)
            .await
            .unwrap();

        assert_eq!(second.level, 2);
        assert_ne!(first.session_id, second.session_id);
    }
}
