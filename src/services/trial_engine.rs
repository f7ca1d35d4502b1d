//! Trial engine.
//!
//! A synchronous state machine that sequences the trials of one session.
//! The engine performs no I/O: every input returns a list of [`Effect`]s
//! that the caller carries out (arming timers, drawing frames, persisting
//! progress). Timers are identified by a [`TimerToken`]; the engine keeps at
//! most one armed at a time and treats any other token as stale, so a late
//! timer callback can never resolve a trial twice.
//!
//! ```text
//! Idle ──start──▶ ShowingRelationship ──reveal──▶ AwaitingResponse
//!                        ▲                           │ judgment / deadline
//!                        └──────pause (more)──── Feedback
//!                                                    │ pause (last trial)
//!                                                    ▼
//!                     SessionEnd{LevelUp,Perfect,LevelDown,Summary} ──▶ Idle
//! ```

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use super::catalog::StimulusCatalog;
use super::difficulty::{self, SessionTally};
use super::pair_sampler::PairSampler;
use crate::domain::models::{
    AutoContinueSettings, EngineState, FeedbackKind, GameMode, ProgressUpdate, RelationshipType,
    SessionConfig, SessionOutcome, SessionState, SessionTimingConfig, StimulusPair,
};
use crate::domain::ports::Frame;

/// Fixed display durations used by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineTiming {
    /// How long feedback stays on screen before the next trial.
    pub feedback_pause: Duration,
    /// How long an outcome stays on screen before returning to idle.
    pub outcome_display: Duration,
}

impl Default for EngineTiming {
    fn default() -> Self {
        Self::from(&SessionTimingConfig::default())
    }
}

impl From<&SessionTimingConfig> for EngineTiming {
    fn from(config: &SessionTimingConfig) -> Self {
        Self {
            feedback_pause: Duration::from_millis(config.feedback_pause_ms),
            outcome_display: Duration::from_millis(config.outcome_display_ms),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    AutoContinue,
    Deadline,
    FeedbackPause,
    OutcomeDisplay,
}

/// Identifies one armed timer. Generations are unique per engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    pub kind: TimerKind,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineInput {
    Start(SessionConfig),
    /// Show the stimulus pair.
    Reveal,
    /// The subject's judgment: `true` means "the pair matches".
    Judgment(bool),
    /// Leave the session and return to the menu.
    Abort,
    /// Acknowledge an outcome screen.
    Dismiss,
    TimerFired(TimerToken),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ArmTimer { token: TimerToken, after: Duration },
    CancelTimer(TimerToken),
    Render(Frame),
    Persist { update: ProgressUpdate, mode: GameMode },
    Chime(FeedbackKind),
}

/// The trial currently on screen.
#[derive(Debug, Clone)]
struct Trial {
    relationship: RelationshipType,
    pair: Option<StimulusPair>,
    /// Whether `pair` really satisfies `relationship`.
    is_actual: bool,
    answered: bool,
    feedback: Option<FeedbackKind>,
    deadline: Option<Duration>,
}

impl Trial {
    fn new(relationship: RelationshipType) -> Self {
        Self {
            relationship,
            pair: None,
            is_actual: false,
            answered: false,
            feedback: None,
            deadline: None,
        }
    }
}

pub struct TrialEngine<R: Rng> {
    catalog: Arc<StimulusCatalog>,
    sampler: PairSampler,
    rng: R,
    timing: EngineTiming,
    state: EngineState,
    session: Option<SessionState>,
    auto_continue: AutoContinueSettings,
    trial: Option<Trial>,
    outcome: Option<SessionOutcome>,
    last_session: Option<SessionState>,
    armed: Option<TimerToken>,
    generation: u64,
}

impl<R: Rng> TrialEngine<R> {
    pub fn new(catalog: Arc<StimulusCatalog>, rng: R, timing: EngineTiming) -> Self {
        Self {
            catalog,
            sampler: PairSampler::new(),
            rng,
            timing,
            state: EngineState::Idle,
            session: None,
            auto_continue: AutoContinueSettings::default(),
            trial: None,
            outcome: None,
            last_session: None,
            armed: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    /// The timer the engine is currently waiting on, if any.
    pub fn armed_timer(&self) -> Option<TimerToken> {
        self.armed
    }

    /// Outcome of the most recently finished session. Cleared on start.
    pub fn last_outcome(&self) -> Option<SessionOutcome> {
        self.outcome
    }

    /// Take the state of the most recently discarded session.
    pub fn take_last_session(&mut self) -> Option<SessionState> {
        self.last_session.take()
    }

    /// Ground truth of the trial on screen. Only known once the pair is shown.
    pub fn current_truth(&self) -> Option<bool> {
        self.trial.as_ref().filter(|t| t.pair.is_some()).map(|t| t.is_actual)
    }

    /// Feed one input to the engine. Inputs that are not valid in the
    /// current state produce no effects.
    pub fn handle(&mut self, input: EngineInput) -> Vec<Effect> {
        let mut effects = Vec::new();
        match input {
            EngineInput::Start(config) => self.start(config, &mut effects),
            EngineInput::Reveal => self.reveal(&mut effects),
            EngineInput::Judgment(matches) => self.judge(matches, &mut effects),
            EngineInput::Abort => self.abort(&mut effects),
            EngineInput::Dismiss => self.dismiss(&mut effects),
            EngineInput::TimerFired(token) => self.timer_fired(token, &mut effects),
        }
        effects
    }

    pub fn frame(&self) -> Frame {
        let Some(session) = &self.session else {
            return Frame::idle();
        };
        let trial = self.trial.as_ref();
        Frame {
            state: self.state,
            mode: session.mode,
            level: session.level,
            task_index: session.task_index,
            task_total: session.task_total,
            relationship: trial.map(|t| t.relationship),
            pair: trial.and_then(|t| t.pair.clone()),
            feedback: trial.and_then(|t| t.feedback),
            deadline: trial.and_then(|t| t.deadline),
            outcome: if self.state.is_terminal() { self.outcome } else { None },
            score: session.score,
            error_count: session.error_count,
        }
    }

    fn start(&mut self, config: SessionConfig, effects: &mut Vec<Effect>) {
        if self.state != EngineState::Idle {
            debug!(state = self.state.as_str(), "start ignored, session in progress");
            return;
        }

        let session = SessionState::new(&config);
        info!(
            session_id = %session.id,
            mode = session.mode.as_str(),
            level = session.level,
            task_total = session.task_total,
            "session started"
        );
        self.auto_continue = config.auto_continue.sanitized();
        self.session = Some(session);
        self.outcome = None;
        self.last_session = None;
        self.sampler.reset();
        self.begin_trial(effects);
    }

    fn begin_trial(&mut self, effects: &mut Vec<Effect>) {
        let relationship = RelationshipType::ALL[self.rng.random_range(0..RelationshipType::ALL.len())];
        self.trial = Some(Trial::new(relationship));
        self.state = EngineState::ShowingRelationship;

        if self.auto_continue.enabled {
            let delay = Duration::from_secs(u64::from(self.auto_continue.delay_seconds));
            self.arm(TimerKind::AutoContinue, delay, effects);
        }
        effects.push(Effect::Render(self.frame()));
    }

    fn reveal(&mut self, effects: &mut Vec<Effect>) {
        if self.state != EngineState::ShowingRelationship {
            return;
        }
        let (Some(session), Some(trial)) = (self.session.as_ref(), self.trial.as_mut()) else {
            return;
        };

        let kind = trial.relationship;
        let positive = if self.rng.random_bool(0.5) {
            self.sampler.draw(&self.catalog, kind, &mut self.rng)
        } else {
            None
        };
        let (pair, is_actual) = match positive {
            Some(pair) => (pair, true),
            None => (self.catalog.generate_lookalike(kind, &mut self.rng), false),
        };

        let deadline = difficulty::deadline(session.level);
        trial.pair = Some(pair);
        trial.is_actual = is_actual;
        trial.deadline = Some(deadline);
        self.state = EngineState::AwaitingResponse;

        self.arm(TimerKind::Deadline, deadline, effects);
        effects.push(Effect::Render(self.frame()));
    }

    fn judge(&mut self, matches: bool, effects: &mut Vec<Effect>) {
        if self.state != EngineState::AwaitingResponse {
            return;
        }
        let (Some(session), Some(trial)) = (self.session.as_mut(), self.trial.as_mut()) else {
            return;
        };
        if trial.answered {
            return;
        }
        let Some(pair) = trial.pair.clone() else {
            return;
        };

        trial.answered = true;
        let kind = session.record_judgment(trial.relationship, pair, trial.is_actual, matches);
        self.disarm(effects);
        self.enter_feedback(kind, effects);
    }

    fn time_out(&mut self, effects: &mut Vec<Effect>) {
        let (Some(session), Some(trial)) = (self.session.as_mut(), self.trial.as_mut()) else {
            return;
        };
        let Some(pair) = trial.pair.clone() else {
            return;
        };

        trial.answered = true;
        session.record_timeout(trial.relationship, pair, trial.is_actual);
        debug!(session_id = %session.id, task_index = session.task_index, "trial timed out");
        self.enter_feedback(FeedbackKind::Timeout, effects);
    }

    fn enter_feedback(&mut self, kind: FeedbackKind, effects: &mut Vec<Effect>) {
        if let Some(trial) = self.trial.as_mut() {
            trial.feedback = Some(kind);
        }
        self.state = EngineState::Feedback;
        effects.push(Effect::Chime(kind));
        self.arm(TimerKind::FeedbackPause, self.timing.feedback_pause, effects);
        effects.push(Effect::Render(self.frame()));
    }

    fn advance(&mut self, effects: &mut Vec<Effect>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.is_last_trial() {
            self.finish(effects);
        } else {
            session.task_index += 1;
            self.begin_trial(effects);
        }
    }

    fn finish(&mut self, effects: &mut Vec<Effect>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let outcome = difficulty::evaluate(SessionTally {
            mode: session.mode,
            level: session.level,
            score: session.score,
            error_count: session.error_count,
            task_total: session.task_total,
        });
        info!(
            session_id = %session.id,
            level = session.level,
            score = session.score,
            error_count = session.error_count,
            outcome = outcome.as_str(),
            "session finished"
        );

        let mode = session.mode;
        let update = match outcome {
            SessionOutcome::LevelDown { new_level } => {
                session.score = 0;
                session.error_count = 0;
                Some(ProgressUpdate::LevelDown { level: new_level })
            }
            SessionOutcome::LevelUp { new_level } | SessionOutcome::Perfect { new_level } => {
                Some(ProgressUpdate::Commit {
                    level: new_level,
                    score: session.score,
                })
            }
            SessionOutcome::Summary { level, .. } if mode == GameMode::Adaptive => Some(ProgressUpdate::Commit {
                level,
                score: session.score,
            }),
            SessionOutcome::Summary { .. } => None,
        };
        if outcome.next_level() != session.level {
            self.sampler.reset();
        }

        self.outcome = Some(outcome);
        self.state = match outcome {
            SessionOutcome::LevelUp { .. } => EngineState::SessionEndLevelUp,
            SessionOutcome::Perfect { .. } => EngineState::SessionEndPerfect,
            SessionOutcome::LevelDown { .. } => EngineState::SessionEndLevelDown,
            SessionOutcome::Summary { .. } => EngineState::SessionEndSummary,
        };

        if let Some(update) = update {
            effects.push(Effect::Persist { update, mode });
        }
        let waits_for_dismissal = mode == GameMode::Adaptive && self.state == EngineState::SessionEndSummary;
        if !waits_for_dismissal {
            self.arm(TimerKind::OutcomeDisplay, self.timing.outcome_display, effects);
        }
        effects.push(Effect::Render(self.frame()));
    }

    fn abort(&mut self, effects: &mut Vec<Effect>) {
        if self.state.is_terminal() {
            self.return_to_idle(effects);
            return;
        }
        if !self.state.is_active() {
            return;
        }
        self.disarm(effects);

        if let Some(session) = &self.session {
            info!(
                session_id = %session.id,
                task_index = session.task_index,
                score = session.score,
                "session aborted"
            );
            if session.is_adaptive() {
                effects.push(Effect::Persist {
                    update: ProgressUpdate::Commit {
                        level: session.level,
                        score: session.score,
                    },
                    mode: session.mode,
                });
            }
        }
        self.return_to_idle(effects);
    }

    fn dismiss(&mut self, effects: &mut Vec<Effect>) {
        if self.state.is_terminal() {
            self.return_to_idle(effects);
        }
    }

    fn timer_fired(&mut self, token: TimerToken, effects: &mut Vec<Effect>) {
        if self.armed != Some(token) {
            debug!(kind = ?token.kind, generation = token.generation, "stale timer ignored");
            return;
        }

        match (token.kind, self.state) {
            (TimerKind::AutoContinue, EngineState::ShowingRelationship) => {
                self.armed = None;
                self.reveal(effects);
            }
            (TimerKind::Deadline, EngineState::AwaitingResponse) => {
                self.armed = None;
                self.time_out(effects);
            }
            (TimerKind::FeedbackPause, EngineState::Feedback) => {
                self.armed = None;
                self.advance(effects);
            }
            (TimerKind::OutcomeDisplay, state) if state.is_terminal() => {
                self.armed = None;
                self.return_to_idle(effects);
            }
            (kind, state) => {
                debug!(?kind, state = state.as_str(), "timer does not apply to current state");
            }
        }
    }

    fn return_to_idle(&mut self, effects: &mut Vec<Effect>) {
        self.disarm(effects);
        self.trial = None;
        self.last_session = self.session.take();
        self.state = EngineState::Idle;
        effects.push(Effect::Render(self.frame()));
    }

    fn arm(&mut self, kind: TimerKind, after: Duration, effects: &mut Vec<Effect>) {
        self.disarm(effects);
        self.generation += 1;
        let token = TimerToken {
            kind,
            generation: self.generation,
        };
        self.armed = Some(token);
        effects.push(Effect::ArmTimer { token, after });
    }

    fn disarm(&mut self, effects: &mut Vec<Effect>) {
        if let Some(token) = self.armed.take() {
            effects.push(Effect::CancelTimer(token));
        }
    }
}
