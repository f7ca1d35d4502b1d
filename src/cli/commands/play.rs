//! Implementation of the `cognate play` command.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use console::Term;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::cli::context::AppContext;
use crate::cli::output::{detail_table, output, CommandOutput};
use crate::cli::presenter::{spawn_key_reader, TerminalPresenter};
use crate::domain::models::{Config, PersistedProgress, SessionConfig, SessionOutcome};
use crate::domain::ports::Presenter;
use crate::services::{EngineTiming, SessionReport, SessionRunner, StimulusCatalog};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlayMode {
    /// Level follows saved progress; 30 trials per session
    Adaptive,
    /// Fixed level and length; nothing is saved
    Manual,
}

#[derive(Args, Debug)]
pub struct PlayArgs {
    #[arg(long, value_enum, default_value = "adaptive")]
    pub mode: PlayMode,

    /// Level for manual mode (1-18)
    #[arg(long)]
    pub level: Option<u32>,

    /// Number of trials for manual mode (10-60)
    #[arg(long, default_value = "20")]
    pub tasks: u32,

    /// Seed the stimulus generator for a reproducible session
    #[arg(long)]
    pub seed: Option<u64>,

    /// Keep progress and settings in memory only
    #[arg(long)]
    pub ephemeral: bool,
}

#[derive(Debug, Serialize)]
pub struct PlayOutput {
    pub sessions: Vec<SessionReport>,
    pub progress: Option<PersistedProgress>,
}

impl CommandOutput for PlayOutput {
    fn to_human(&self) -> String {
        let mut rows = vec![("Sessions", self.sessions.len().to_string())];
        if let Some(last) = self.sessions.iter().rev().find(|s| s.outcome.is_some()) {
            rows.push(("Last outcome", describe_outcome(last.outcome)));
        }
        if let Some(progress) = &self.progress {
            rows.push(("Saved level", progress.current_level.to_string()));
            rows.push(("Highest level", progress.highest_level_reached.to_string()));
            rows.push(("Best score", progress.best_score.to_string()));
        }
        detail_table(&rows).to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

fn describe_outcome(outcome: Option<SessionOutcome>) -> String {
    match outcome {
        Some(SessionOutcome::Perfect { new_level }) => format!("perfect, now level {new_level}"),
        Some(SessionOutcome::LevelUp { new_level }) => format!("level up, now level {new_level}"),
        Some(SessionOutcome::LevelDown { new_level }) => format!("level down, now level {new_level}"),
        Some(SessionOutcome::Summary { level, percent }) => format!("{percent}% at level {level}"),
        None => "aborted".to_string(),
    }
}

pub async fn execute(args: PlayArgs, config: Config, json_mode: bool) -> Result<()> {
    let context = if args.ephemeral {
        AppContext::ephemeral(config)?
    } else {
        AppContext::open(config).await?
    };
    let settings = context.settings.load().await.context("Failed to load settings")?;

    let rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    let mut runner = SessionRunner::new(
        Arc::new(StimulusCatalog::builtin()),
        rng,
        EngineTiming::from(&context.config.session),
        context.progress.clone(),
    )
    .with_sound(settings.sound_enabled);

    let term = Term::stdout();
    let quit = spawn_key_reader(term.clone(), runner.handle());
    let mut presenter = TerminalPresenter::new(term.clone());
    let _ = term.hide_cursor();

    let mut sessions = Vec::new();
    match args.mode {
        PlayMode::Manual => {
            let level = args.level.unwrap_or(1);
            tracing::debug!(level, tasks = args.tasks, "manual session requested");
            let config = SessionConfig::manual(level, args.tasks).with_auto_continue(settings.auto_continue);
            sessions.push(runner.run_session(config, &mut presenter).await?);
        }
        PlayMode::Adaptive => {
            let (mut progress, sync) = context.progress.load_effective().await?;
            if let Some(message) = sync.failure() {
                presenter.notify_error(&format!("Remote progress unavailable: {message}"));
            }
            loop {
                let config = SessionConfig::adaptive(progress.current_level).with_auto_continue(settings.auto_continue);
                let report = runner.run_session(config, &mut presenter).await?;
                let stop = report.aborted() || quit.load(Ordering::SeqCst);
                sessions.push(report);
                if stop {
                    break;
                }
                progress = context.progress.load_local().await?;
            }
        }
    }

    let _ = term.show_cursor();
    let _ = term.clear_screen();

    let progress = match args.mode {
        PlayMode::Adaptive => Some(context.progress.load_local().await?),
        PlayMode::Manual => None,
    };
    output(&PlayOutput { sessions, progress }, json_mode);
    Ok(())
}
