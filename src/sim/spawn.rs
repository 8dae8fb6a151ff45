//! Entity spawning and the background board processes
//!
//! Owns the board-population rules: the live target is always restored,
//! distractors keep the number count steady, hazards scale with level.

use rand::Rng;

use super::grid::{self, Direction, Occupancy};
use super::state::{BonusItem, BonusKind, GameEvent, GameState, NumberItem, Obstacle};
use crate::consts::{MAX_DISTRACTORS, MIN_DISTRACTORS, NUMBER_MAX, TIME_LIMITED_SECS};

/// Replace the board numbers with the live target plus 2-4 distractors
pub fn spawn_initial_numbers(state: &mut GameState) {
    state.numbers.clear();
    spawn_target(state);

    let count = state.rng.random_range(MIN_DISTRACTORS..=MAX_DISTRACTORS);
    for _ in 0..count {
        spawn_distractor(state);
    }
    log::debug!(
        "Board numbers: {:?}",
        state.numbers.iter().map(|n| n.value).collect::<Vec<_>>()
    );
}

/// Put a plain copy of the live target on a free cell
pub fn spawn_target(state: &mut GameState) -> bool {
    let occupied = state.occupied_cells();
    match grid::random_empty_position(&mut state.rng, &occupied) {
        Some(pos) => {
            let value = state.progress.target;
            state.numbers.push(NumberItem::plain(pos, value));
            log::debug!("Spawned target {} at ({}, {})", value, pos.x, pos.y);
            true
        }
        None => false,
    }
}

/// Put a random-valued number on a free cell, possibly timed or poisonous
pub fn spawn_distractor(state: &mut GameState) -> bool {
    let occupied = state.occupied_cells();
    let Some(pos) = grid::random_empty_position(&mut state.rng, &occupied) else {
        return false;
    };

    let tuning = state.tuning();
    let value = state.rng.random_range(1..=NUMBER_MAX);
    let timed = state.rng.random_bool(tuning.time_limited_chance);
    let poisonous = state.rng.random_bool(tuning.poison_chance);

    state.numbers.push(NumberItem {
        pos,
        value,
        time_left: timed.then_some(TIME_LIMITED_SECS),
        poisonous,
    });
    true
}

/// Restore the target if nothing edible with its value is on the board
pub fn ensure_target(state: &mut GameState) {
    if !state.target_present() && !spawn_target(state) {
        log::warn!("Could not place target {}", state.progress.target);
    }
}

/// After a correct eat: restore the target, or keep the count with a distractor
pub fn refill_after_eat(state: &mut GameState) {
    if state.target_present() {
        spawn_distractor(state);
    } else {
        ensure_target(state);
    }
}

/// Roll for a bonus; only one may exist at a time
pub fn maybe_spawn_bonus(state: &mut GameState) {
    if state.bonus.is_some() {
        return;
    }
    if !state.rng.random_bool(state.difficulty.bonus_chance) {
        return;
    }

    let kind = BonusKind::ALL[state.rng.random_range(0..BonusKind::ALL.len())];
    let occupied = state.occupied_cells();
    if let Some(pos) = grid::random_empty_position(&mut state.rng, &occupied) {
        log::debug!("Spawned bonus {:?} at ({}, {})", kind, pos.x, pos.y);
        state.bonus = Some(BonusItem { pos, kind });
    }
}

/// Replace all obstacles with a fresh set sized for the current level
pub fn regenerate_obstacles(state: &mut GameState) {
    let tuning = state.tuning();

    state.obstacles.clear();
    let mut occupied: Occupancy = state.occupied_cells();

    for _ in 0..tuning.obstacle_count {
        let Some(pos) = grid::random_empty_position(&mut state.rng, &occupied) else {
            break;
        };
        let moving = state.rng.random_bool(tuning.moving_obstacle_chance);
        let direction = moving.then(|| Direction::random(&mut state.rng));

        state.obstacles.push(Obstacle { pos, direction });
        occupied.insert(pos);
    }

    let count = state.obstacles.len();
    log::info!("Level {}: placed {} obstacles", state.progress.level, count);
    state.push_event(GameEvent::ObstaclesPlaced { count });
}

/// One-second countdown for time-limited numbers; expired ones vanish
pub fn decay_numbers(state: &mut GameState) {
    let mut expired = Vec::new();

    state.numbers.retain_mut(|n| match n.time_left {
        Some(left) if left <= 1 => {
            expired.push(n.value);
            false
        }
        Some(left) => {
            n.time_left = Some(left - 1);
            true
        }
        None => true,
    });

    if expired.is_empty() {
        return;
    }
    for value in expired {
        state.push_event(GameEvent::NumberExpired { value });
    }
    ensure_target(state);
}

/// Step every moving obstacle; a blocked one turns to a random heading instead
pub fn move_obstacles(state: &mut GameState) {
    let GameState { obstacles, rng, .. } = state;

    for obstacle in obstacles.iter_mut() {
        let Some(dir) = obstacle.direction else {
            continue;
        };
        let next = obstacle.pos + dir.delta();
        if grid::in_bounds(next) {
            obstacle.pos = next;
        } else {
            obstacle.direction = Some(Direction::random(rng));
        }
    }
}
