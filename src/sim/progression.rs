//! Score, streak, bonus timers, level and speed

use serde::{Deserialize, Serialize};

use crate::consts::{FREEZE_DURATION_MS, MULTIPLIER_EATS, NUMBER_MAX};

/// Result of eating the live target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EatOutcome {
    pub gain: u64,
    /// The eaten value was 9 and the target wrapped to 1
    pub cycle_completed: bool,
    /// The multiplier ran out on this eat
    pub multiplier_ended: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    pub score: u64,
    pub streak: u32,
    /// Best streak of this run
    pub best_streak: u32,
    /// Value that must be eaten next
    pub target: u8,
    /// 1 or 2
    pub score_multiplier: u32,
    /// Correct eats left at the boosted multiplier
    pub multiplier_left: u32,
    /// Remaining freeze time; zero when not frozen
    pub frozen_ms: u32,
    pub completed_cycles: u32,
    pub level: u32,
    pub tick_interval_ms: u32,
}

impl Progression {
    pub fn new(tick_interval_ms: u32) -> Self {
        Self {
            score: 0,
            streak: 0,
            best_streak: 0,
            target: 1,
            score_multiplier: 1,
            multiplier_left: 0,
            frozen_ms: 0,
            completed_cycles: 0,
            level: 1,
            tick_interval_ms,
        }
    }

    /// Bonus factor from the current streak: +1 for every 5 in a row
    pub fn streak_bonus(&self) -> u64 {
        u64::from(self.streak / 5) + 1
    }

    /// Score, advance the target, and roll the level on a full 1-9 cycle
    pub fn on_correct_eat(&mut self, value: u8) -> EatOutcome {
        self.streak += 1;
        self.best_streak = self.best_streak.max(self.streak);

        let gain = u64::from(value) * 10 * u64::from(self.score_multiplier) * self.streak_bonus();
        self.score += gain;

        let mut multiplier_ended = false;
        if self.multiplier_left > 0 {
            self.multiplier_left -= 1;
            if self.multiplier_left == 0 {
                self.score_multiplier = 1;
                multiplier_ended = true;
            }
        }

        let cycle_completed = self.target == NUMBER_MAX;
        self.target = if cycle_completed { 1 } else { self.target + 1 };
        if cycle_completed {
            self.completed_cycles += 1;
            self.level = self.completed_cycles + 1;
        }

        EatOutcome {
            gain,
            cycle_completed,
            multiplier_ended,
        }
    }

    pub fn reset_streak(&mut self) {
        self.streak = 0;
    }

    pub fn halve_streak(&mut self) {
        self.streak /= 2;
    }

    pub fn activate_multiplier(&mut self) {
        self.score_multiplier = 2;
        self.multiplier_left = MULTIPLIER_EATS;
    }

    pub fn clear_multiplier(&mut self) {
        self.score_multiplier = 1;
        self.multiplier_left = 0;
    }

    pub fn freeze(&mut self) {
        self.frozen_ms = FREEZE_DURATION_MS;
    }

    pub fn clear_freeze(&mut self) {
        self.frozen_ms = 0;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen_ms > 0
    }

    /// Shorten the tick interval by `step`, never below `floor`.
    /// Returns true if the interval changed.
    pub fn speed_up(&mut self, step: u32, floor: u32) -> bool {
        let next = self.tick_interval_ms.saturating_sub(step).max(floor);
        let changed = next < self.tick_interval_ms;
        self.tick_interval_ms = self.tick_interval_ms.min(next);
        changed
    }
}
