//! Implementation of the `cognate leaderboard` command.

use anyhow::Result;
use clap::Args;
use comfy_table::Cell;
use serde::Serialize;

use crate::cli::context::AppContext;
use crate::cli::output::{list_table, output, CommandOutput};
use crate::domain::models::{Config, LeaderboardEntry};

#[derive(Args, Debug)]
pub struct LeaderboardArgs {
    /// Number of rows to show
    #[arg(long, short, default_value = "10")]
    pub limit: usize,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardOutput {
    pub entries: Vec<LeaderboardEntry>,
}

impl CommandOutput for LeaderboardOutput {
    fn to_human(&self) -> String {
        if self.entries.is_empty() {
            return "No players on the leaderboard yet.".to_string();
        }
        let mut table = list_table(&["rank", "player", "highest level", "best score", "updated"]);
        for (rank, entry) in self.entries.iter().enumerate() {
            table.add_row(vec![
                Cell::new(rank + 1),
                Cell::new(&entry.display_name),
                Cell::new(entry.highest_level),
                Cell::new(entry.best_score),
                Cell::new(entry.updated_at.format("%Y-%m-%d %H:%M")),
            ]);
        }
        table.to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: LeaderboardArgs, config: Config, json_mode: bool) -> Result<()> {
    let context = AppContext::ephemeral(config)?;
    let entries = context
        .progress
        .leaderboard(args.limit)
        .await
        .map_err(|e| anyhow::anyhow!("Leaderboard unavailable: {e}"))?;
    output(&LeaderboardOutput { entries }, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_rows_are_ranked_in_order() {
        let entry = |name: &str, level| LeaderboardEntry {
            identity_id: name.to_lowercase(),
            display_name: name.to_string(),
            highest_level: level,
            best_score: 20,
            updated_at: Utc::now(),
        };
        let result = LeaderboardOutput {
            entries: vec![entry("Ada", 9), entry("Grace", 7)],
        };
        let human = result.to_human();
        let ada = human.find("Ada").unwrap();
        let grace = human.find("Grace").unwrap();
        assert!(ada < grace);
        assert!(human.contains("HIGHEST LEVEL"));
    }

    #[test]
    fn test_empty_leaderboard() {
        let result = LeaderboardOutput { entries: vec![] };
        assert!(result.to_human().contains("No players"));
    }
}
