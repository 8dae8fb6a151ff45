//! Achievements
//!
//! Each achievement is a plain descriptor (stat, comparison, threshold), so
//! the table can be listed, persisted, and tested without closures.
//! Unlocks are one-way for the lifetime of the book.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::stats::GameStats;

/// Which aggregate a predicate reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatField {
    HighScore,
    GamesPlayed,
    TotalNumbersEaten,
    LongestSnake,
    BestStreak,
    TotalScore,
}

impl StatField {
    pub fn read(&self, stats: &GameStats) -> u64 {
        match self {
            StatField::HighScore => stats.high_score,
            StatField::GamesPlayed => u64::from(stats.games_played),
            StatField::TotalNumbersEaten => stats.total_numbers_eaten,
            StatField::LongestSnake => u64::from(stats.longest_snake),
            StatField::BestStreak => u64::from(stats.best_streak),
            StatField::TotalScore => stats.total_score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    AtLeast,
    GreaterThan,
}

/// A predicate over `GameStats`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    pub field: StatField,
    pub comparator: Comparator,
    pub threshold: u64,
}

impl Predicate {
    pub const fn at_least(field: StatField, threshold: u64) -> Self {
        Self {
            field,
            comparator: Comparator::AtLeast,
            threshold,
        }
    }

    pub const fn greater_than(field: StatField, threshold: u64) -> Self {
        Self {
            field,
            comparator: Comparator::GreaterThan,
            threshold,
        }
    }

    pub fn holds(&self, stats: &GameStats) -> bool {
        let value = self.field.read(stats);
        match self.comparator {
            Comparator::AtLeast => value >= self.threshold,
            Comparator::GreaterThan => value > self.threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub predicate: Predicate,
}

pub const ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: "first_game",
        name: "First Game",
        description: "Play your first game",
        icon: "🎮",
        predicate: Predicate::greater_than(StatField::GamesPlayed, 0),
    },
    Achievement {
        id: "score_100",
        name: "Score 100",
        description: "Reach 100 points",
        icon: "💯",
        predicate: Predicate::at_least(StatField::HighScore, 100),
    },
    Achievement {
        id: "score_500",
        name: "Score 500",
        description: "Reach 500 points",
        icon: "⭐",
        predicate: Predicate::at_least(StatField::HighScore, 500),
    },
    Achievement {
        id: "streak_10",
        name: "Streak Master",
        description: "Get a streak of 10",
        icon: "🔥",
        predicate: Predicate::at_least(StatField::BestStreak, 10),
    },
    Achievement {
        id: "long_snake",
        name: "Giant Snake",
        description: "Reach a snake length of 20",
        icon: "🐲",
        predicate: Predicate::at_least(StatField::LongestSnake, 20),
    },
];

pub fn find(id: &str) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// The set of unlocked achievement ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AchievementBook {
    unlocked: BTreeSet<&'static str>,
}

impl AchievementBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted ids; unknown ids are dropped
    pub fn restore<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let unlocked = ids.into_iter().filter_map(find).map(|a| a.id).collect();
        Self { unlocked }
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.contains(id)
    }

    pub fn unlocked_ids(&self) -> Vec<String> {
        self.unlocked.iter().map(|id| id.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.unlocked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unlocked.is_empty()
    }

    /// Unlock everything that now holds. Returns the newly unlocked, table order.
    pub fn evaluate(&mut self, stats: &GameStats) -> Vec<&'static Achievement> {
        let fresh: Vec<&'static Achievement> = ACHIEVEMENTS
            .iter()
            .filter(|a| !self.unlocked.contains(a.id) && a.predicate.holds(stats))
            .collect();
        for a in &fresh {
            self.unlocked.insert(a.id);
        }
        fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_game_unlocks() {
        let mut book = AchievementBook::new();
        let stats = GameStats {
            games_played: 1,
            ..Default::default()
        };
        let fresh = book.evaluate(&stats);
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].id, "first_game");
        assert!(book.evaluate(&stats).is_empty());
    }

    #[test]
    fn test_unlocks_survive_weaker_stats() {
        let mut book = AchievementBook::new();
        book.evaluate(&GameStats {
            high_score: 600,
            ..Default::default()
        });
        assert!(book.is_unlocked("score_100"));
        assert!(book.is_unlocked("score_500"));

        book.evaluate(&GameStats::default());
        assert!(book.is_unlocked("score_500"));
    }

    #[test]
    fn test_restore_filters_unknown() {
        let book = AchievementBook::restore(["streak_10", "bogus"]);
        assert_eq!(book.len(), 1);
        assert_eq!(book.unlocked_ids(), vec!["streak_10".to_string()]);
    }

    #[test]
    fn test_greater_than() {
        let p = Predicate {
            field: StatField::TotalScore,
            comparator: Comparator::GreaterThan,
            threshold: 10,
        };
        let mut stats = GameStats {
            total_score: 10,
            ..Default::default()
        };
        assert!(!p.holds(&stats));
        stats.total_score = 11;
        assert!(p.holds(&stats));
    }

    #[test]
    fn test_table_ids_unique() {
        let ids: BTreeSet<&str> = ACHIEVEMENTS.iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), ACHIEVEMENTS.len());
    }
}
