//! Cross-run statistics
//!
//! Persisted between sessions. Every field only ever grows; they are folded
//! in once per game over.

use serde::{Deserialize, Serialize};

use crate::sim::GameState;

/// Aggregates over every finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameStats {
    pub high_score: u64,
    pub games_played: u32,
    pub total_numbers_eaten: u64,
    pub longest_snake: u32,
    pub best_streak: u32,
    /// Sum of all final scores
    pub total_score: u64,
}

/// The facts about one finished run that feed the aggregates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub score: u64,
    /// Streak at the moment of death
    pub streak: u32,
    pub length: u32,
    /// Best streak reached during the run
    pub best_streak: u32,
}

impl RunSummary {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.progress.score,
            streak: state.progress.streak,
            length: state.snake.len() as u32,
            best_streak: state.progress.best_streak,
        }
    }
}

impl GameStats {
    /// Create empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a finished run into the aggregates
    pub fn record(&self, run: &RunSummary) -> Self {
        Self {
            high_score: self.high_score.max(run.score),
            games_played: self.games_played + 1,
            total_numbers_eaten: self.total_numbers_eaten + u64::from(run.streak),
            longest_snake: self.longest_snake.max(run.length),
            best_streak: self.best_streak.max(run.best_streak),
            total_score: self.total_score + run.score,
        }
    }

    /// Whether a score would beat the stored best
    pub fn is_new_high(&self, score: u64) -> bool {
        score > self.high_score
    }
}
