//! Idle/demo steering
//!
//! Greedy: among the non-fatal moves, head for the nearest edible target and
//! prefer cells with more free neighbours so the snake doesn't box itself in.

use super::collision::{self, Impact};
use super::grid::{Direction, Position};
use super::state::GameState;

fn manhattan(a: Position, b: Position) -> i32 {
    (a - b).abs().element_sum()
}

/// Number of directions out of `cell` that would not kill the snake
fn exits(state: &GameState, cell: Position) -> usize {
    Direction::ALL
        .iter()
        .filter(|dir| !collision::resolve(state, cell + dir.delta()).is_fatal())
        .count()
}

/// Pick a heading for the next move, or `None` when every option is fatal
pub fn choose_direction(state: &GameState) -> Option<Direction> {
    let head = state.snake.head();
    let heading = state.snake.heading();
    let target_value = state.progress.target;

    let target = state
        .numbers
        .iter()
        .filter(|n| n.value == target_value && !n.poisonous)
        .map(|n| n.pos)
        .min_by_key(|pos| manhattan(head, *pos));

    Direction::ALL
        .iter()
        .copied()
        .filter(|dir| *dir != heading.opposite())
        .filter_map(|dir| {
            let next = head + dir.delta();
            let hit = collision::resolve(state, next);
            if hit.is_fatal() {
                return None;
            }
            let eats = matches!(hit.impact, Impact::Eat { .. });
            let distance = target.map(|t| manhattan(next, t)).unwrap_or(0);
            // Dead ends are only acceptable when they win the target
            let trapped = !eats && exits(state, next) <= 1;
            Some((dir, (trapped, distance)))
        })
        .min_by_key(|(_, rank)| *rank)
        .map(|(dir, _)| dir)
}
