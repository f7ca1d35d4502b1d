//! Terminal rendering and keyboard input for `cognate play`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use console::{style, Key, Term};

use crate::domain::models::{EngineState, FeedbackKind, GameMode, SessionOutcome};
use crate::domain::ports::{Frame, Presenter};
use crate::services::RunnerHandle;

/// What a key press asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Reveal the pair, or continue past an outcome screen.
    Continue,
    Judge(bool),
    Quit,
}

pub fn key_action(key: &Key) -> Option<KeyAction> {
    match key {
        Key::Char(' ') | Key::Enter => Some(KeyAction::Continue),
        Key::Char('y' | 'Y') => Some(KeyAction::Judge(true)),
        Key::Char('n' | 'N') => Some(KeyAction::Judge(false)),
        Key::Char('q' | 'Q') | Key::Escape => Some(KeyAction::Quit),
        _ => None,
    }
}

/// Forward key presses to the runner from a background thread.
///
/// The returned flag is raised when the player quits.
pub fn spawn_key_reader(term: Term, handle: RunnerHandle) -> Arc<AtomicBool> {
    let quit = Arc::new(AtomicBool::new(false));
    let flag = quit.clone();
    thread::spawn(move || loop {
        let Ok(key) = term.read_key() else {
            flag.store(true, Ordering::SeqCst);
            let _ = handle.abort();
            return;
        };
        let sent = match key_action(&key) {
            Some(KeyAction::Continue) => handle.reveal().and_then(|()| handle.dismiss()),
            Some(KeyAction::Judge(matches)) => handle.judge(matches),
            Some(KeyAction::Quit) => {
                flag.store(true, Ordering::SeqCst);
                handle.abort()
            }
            None => Ok(()),
        };
        if sent.is_err() {
            return;
        }
    });
    quit
}

pub struct TerminalPresenter {
    term: Term,
    notice: Option<String>,
}

impl TerminalPresenter {
    pub fn new(term: Term) -> Self {
        Self { term, notice: None }
    }

    fn header(frame: &Frame) -> String {
        let mode = match frame.mode {
            GameMode::Adaptive => "adaptive",
            GameMode::Manual => "manual",
        };
        format!(
            "{}  level {}  ·  trial {}/{}  ·  score {}  ·  errors {}",
            style(mode).cyan().bold(),
            style(frame.level).bold(),
            frame.task_index + 1,
            frame.task_total,
            frame.score,
            frame.error_count
        )
    }

    fn body(frame: &Frame) -> Vec<String> {
        let prompt = frame.prompt().unwrap_or_default();
        match frame.state {
            EngineState::Idle => Vec::new(),
            EngineState::ShowingRelationship => vec![
                format!("Do the next two items form {}?", style(prompt).bold()),
                String::new(),
                style("[space] show pair   [q] quit").dim().to_string(),
            ],
            EngineState::AwaitingResponse => {
                let pair = frame.pair.as_ref().map(ToString::to_string).unwrap_or_default();
                let window = frame.deadline.map(|d| d.as_millis()).unwrap_or_default();
                vec![
                    format!("{}?", style(prompt).dim()),
                    String::new(),
                    format!("    {}", style(pair).yellow().bold()),
                    String::new(),
                    style(format!("[y] match   [n] no match   ({window} ms)")).dim().to_string(),
                ]
            }
            EngineState::Feedback => vec![match frame.feedback {
                Some(FeedbackKind::Correct) => style("✓ correct").green().bold().to_string(),
                Some(FeedbackKind::Incorrect) => style("✗ incorrect").red().bold().to_string(),
                Some(FeedbackKind::Timeout) => style("⏱ too slow").yellow().bold().to_string(),
                None => String::new(),
            }],
            _ => {
                let mut lines = vec![outcome_line(frame.outcome)];
                if frame.mode == GameMode::Adaptive && frame.state == EngineState::SessionEndSummary {
                    lines.push(String::new());
                    lines.push(style("[space] next session   [q] quit").dim().to_string());
                }
                lines
            }
        }
    }
}

fn outcome_line(outcome: Option<SessionOutcome>) -> String {
    match outcome {
        Some(SessionOutcome::Perfect { new_level }) => {
            style(format!("Perfect session! On to level {new_level}.")).green().bold().to_string()
        }
        Some(SessionOutcome::LevelUp { new_level }) => {
            style(format!("Level up! On to level {new_level}.")).green().bold().to_string()
        }
        Some(SessionOutcome::LevelDown { new_level }) => {
            style(format!("Too many errors. Back to level {new_level}.")).red().bold().to_string()
        }
        Some(SessionOutcome::Summary { level, percent }) => {
            format!("Level {level} finished with {} correct.", style(format!("{percent}%")).bold())
        }
        None => String::new(),
    }
}

impl Presenter for TerminalPresenter {
    fn render(&mut self, frame: &Frame) {
        if frame.state == EngineState::Idle {
            return;
        }
        let mut lines = vec![Self::header(frame), String::new()];
        lines.extend(Self::body(frame));
        if let Some(notice) = &self.notice {
            lines.push(String::new());
            lines.push(style(notice).red().to_string());
        }
        let _ = self.term.clear_screen();
        let _ = self.term.write_line(&lines.join("\n"));
    }

    fn notify_error(&mut self, message: &str) {
        self.notice = Some(message.to_string());
    }

    fn chime(&mut self, kind: FeedbackKind) {
        if kind != FeedbackKind::Correct {
            let _ = self.term.write_str("\x07");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(key_action(&Key::Char(' ')), Some(KeyAction::Continue));
        assert_eq!(key_action(&Key::Enter), Some(KeyAction::Continue));
        assert_eq!(key_action(&Key::Char('y')), Some(KeyAction::Judge(true)));
        assert_eq!(key_action(&Key::Char('N')), Some(KeyAction::Judge(false)));
        assert_eq!(key_action(&Key::Escape), Some(KeyAction::Quit));
        assert_eq!(key_action(&Key::Char('x')), None);
    }

    #[test]
    fn test_outcome_lines_name_the_level() {
        console::set_colors_enabled(false);
        assert_eq!(
            outcome_line(Some(SessionOutcome::LevelDown { new_level: 2 })),
            "Too many errors. Back to level 2."
        );
        assert_eq!(
            outcome_line(Some(SessionOutcome::Summary { level: 4, percent: 80 })),
            "Level 4 finished with 80% correct."
        );
    }
}
