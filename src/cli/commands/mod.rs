//! CLI command implementations.

pub mod init;
pub mod leaderboard;
pub mod play;
pub mod progress;
pub mod settings;
