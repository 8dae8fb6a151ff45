//! Collision classification for the snake's next cell
//!
//! Checks run in a fixed order and the first match wins:
//! wall, obstacle, own body, then bonus and number pickups.

use super::grid::{self, Position};
use super::state::{BonusKind, DeathCause, GameState};

/// What the head runs into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    /// The run ends
    Fatal(DeathCause),
    /// Correct number at `index` in the board list
    Eat { index: usize, value: u8 },
    /// Plain move (possibly over a bonus)
    Move,
}

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    /// Bonus in the entered cell, applied before the number check
    pub bonus: Option<BonusKind>,
    pub impact: Impact,
}

impl Collision {
    fn fatal(cause: DeathCause) -> Self {
        Self {
            bonus: None,
            impact: Impact::Fatal(cause),
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self.impact, Impact::Fatal(_))
    }
}

/// Classify moving the head into `next`. Does not mutate anything.
///
/// The body check covers every current segment, tail included, since the
/// tail has not moved yet when the head arrives.
pub fn resolve(state: &GameState, next: Position) -> Collision {
    if !grid::in_bounds(next) {
        return Collision::fatal(DeathCause::Wall);
    }
    if state.obstacle_at(next) {
        return Collision::fatal(DeathCause::Obstacle);
    }
    if state.snake.contains(next) {
        return Collision::fatal(DeathCause::SelfBite);
    }

    let bonus = state.bonus.filter(|b| b.pos == next).map(|b| b.kind);

    let impact = match state.number_at(next) {
        Some(index) => {
            let number = state.numbers[index];
            let expected = state.progress.target;
            if number.poisonous {
                Impact::Fatal(DeathCause::Poison)
            } else if number.value == expected {
                Impact::Eat {
                    index,
                    value: number.value,
                }
            } else {
                Impact::Fatal(DeathCause::WrongNumber {
                    value: number.value,
                    expected,
                })
            }
        }
        None => Impact::Move,
    };

    Collision { bonus, impact }
}
