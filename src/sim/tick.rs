//! Simulation tick
//!
//! One entry point advances the run by a slice of wall time. Inside it, a
//! small event loop steps to the nearest deadline among the periodic drivers
//! (snake movement, number countdown, obstacle drift) and the delayed
//! level-up work, firing each in a fixed order. Nothing else mutates the run,
//! so drivers never interleave.

use super::autopilot;
use super::collision::{self, Impact};
use super::grid::Direction;
use super::spawn;
use super::state::{BonusKind, DeathCause, GameEvent, GamePhase, GameState, Haptic};
use crate::consts::*;
use crate::tuning::LevelTuning;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest directional intent (swipe/tap/key)
    pub direction: Option<Direction>,
    /// Pause toggle
    pub pause: bool,
    /// Help overlay toggle
    pub help: bool,
    /// Idle/demo mode - steer toward the target automatically
    pub autopilot: bool,
}

/// Advance the run by `dt_ms` of wall time.
/// At most `MAX_FRAME_MS` is simulated per call; the excess is dropped, not carried over.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: u32) {
    if input.help {
        toggle_help(state);
    }
    if input.pause {
        toggle_pause(state);
    }
    if let Some(dir) = input.direction {
        state.set_direction(dir);
    }

    // Drivers only run while playing
    if state.phase != GamePhase::Playing {
        return;
    }

    if input.autopilot {
        if let Some(dir) = autopilot::choose_direction(state) {
            state.set_direction(dir);
        }
    }

    run_drivers(state, dt_ms.min(MAX_FRAME_MS));
}

/// PLAYING <-> PAUSED. Resuming restarts the drivers from a clean boundary.
pub fn toggle_pause(state: &mut GameState) -> bool {
    match state.phase {
        GamePhase::Playing => {
            state.phase = GamePhase::Paused;
            log::debug!("Paused at {} ms", state.time_ms);
        }
        GamePhase::Paused => {
            state.phase = GamePhase::Playing;
            state.clock.restart_drivers();
            log::debug!("Resumed at {} ms", state.time_ms);
        }
        GamePhase::GameOver | GamePhase::HowToPlay => return false,
    }
    true
}

/// Open or close the help overlay; it covers PLAYING or PAUSED
pub fn toggle_help(state: &mut GameState) -> bool {
    match state.phase {
        GamePhase::HowToPlay => {
            state.phase = state.help_return;
            if state.phase == GamePhase::Playing {
                state.clock.restart_drivers();
            }
        }
        GamePhase::Playing | GamePhase::Paused => {
            state.help_return = state.phase;
            state.phase = GamePhase::HowToPlay;
        }
        GamePhase::GameOver => return false,
    }
    true
}

fn run_drivers(state: &mut GameState, mut remaining: u32) {
    while remaining > 0 && state.phase == GamePhase::Playing {
        let tuning = state.tuning();
        let step = next_deadline(state, &tuning).min(remaining);

        let freeze_expired = advance_clock(state, &tuning, step);
        remaining -= step;

        fire_due(state, &tuning, freeze_expired);
    }
}

/// Milliseconds until the earliest driver or delayed effect is due (at least 1)
fn next_deadline(state: &GameState, tuning: &LevelTuning) -> u32 {
    let clock = &state.clock;
    let until = |elapsed: u32, period: u32| period.saturating_sub(elapsed).max(1);

    let mut next = if state.progress.is_frozen() {
        state.progress.frozen_ms
    } else {
        until(clock.move_ms, state.progress.tick_interval_ms)
    };

    if tuning.decay_active {
        next = next.min(until(clock.decay_ms, DECAY_INTERVAL_MS));
    }
    if tuning.obstacles_move {
        next = next.min(until(clock.obstacle_ms, OBSTACLE_MOVE_INTERVAL_MS));
    }
    for &left in &clock.pending_speedups {
        next = next.min(left.max(1));
    }
    if let Some(left) = clock.pending_obstacles {
        next = next.min(left.max(1));
    }

    next
}

/// Move every active countdown forward by `step`. Returns true when a freeze ran out.
fn advance_clock(state: &mut GameState, tuning: &LevelTuning, step: u32) -> bool {
    state.time_ms += u64::from(step);

    let mut freeze_expired = false;
    if state.progress.is_frozen() {
        state.progress.frozen_ms = state.progress.frozen_ms.saturating_sub(step);
        freeze_expired = !state.progress.is_frozen();
    } else {
        state.clock.move_ms += step;
    }

    let clock = &mut state.clock;
    if tuning.decay_active {
        clock.decay_ms += step;
    }
    if tuning.obstacles_move {
        clock.obstacle_ms += step;
    }
    for left in clock.pending_speedups.iter_mut() {
        *left = left.saturating_sub(step);
    }
    if let Some(left) = clock.pending_obstacles.as_mut() {
        *left = left.saturating_sub(step);
    }

    freeze_expired
}

fn fire_due(state: &mut GameState, tuning: &LevelTuning, freeze_expired: bool) {
    if freeze_expired {
        state.clock.move_ms = 0;
        state.push_event(GameEvent::FreezeEnded);
    } else if !state.progress.is_frozen()
        && state.clock.move_ms >= state.progress.tick_interval_ms
    {
        state.clock.move_ms = 0;
        step_snake(state);
        if state.phase != GamePhase::Playing {
            return;
        }
    }

    if tuning.decay_active && state.clock.decay_ms >= DECAY_INTERVAL_MS {
        state.clock.decay_ms = 0;
        spawn::decay_numbers(state);
    }

    if tuning.obstacles_move && state.clock.obstacle_ms >= OBSTACLE_MOVE_INTERVAL_MS {
        state.clock.obstacle_ms = 0;
        spawn::move_obstacles(state);
    }

    let due = state.clock.pending_speedups.iter().filter(|&&left| left == 0).count();
    if due > 0 {
        state.clock.pending_speedups.retain(|&left| left > 0);
        for _ in 0..due {
            apply_speedup(state);
        }
    }

    if state.clock.pending_obstacles == Some(0) {
        state.clock.pending_obstacles = None;
        spawn::regenerate_obstacles(state);
    }
}

/// One snake move: classify the entered cell, then apply it
fn step_snake(state: &mut GameState) {
    let next = state.snake.begin_move();
    let hit = collision::resolve(state, next);
    state.moves += 1;

    if let Impact::Fatal(cause) = hit.impact {
        if matches!(
            cause,
            DeathCause::Obstacle | DeathCause::Poison | DeathCause::WrongNumber { .. }
        ) {
            state.haptic(Haptic::Heavy, true);
        }
        state.end_run(cause);
        return;
    }

    let grow = matches!(hit.impact, Impact::Eat { .. });
    state.snake.advance(next, grow);

    if let Some(kind) = hit.bonus {
        apply_bonus(state, kind);
    }

    if let Impact::Eat { index, value } = hit.impact {
        eat_number(state, index, value);
    }
}

fn apply_bonus(state: &mut GameState, kind: BonusKind) {
    state.bonus = None;
    state.haptic(Haptic::Light, false);
    state.push_event(GameEvent::BonusCollected(kind));
    log::debug!("Bonus {:?} collected", kind);

    match kind {
        BonusKind::ScoreMultiplier => state.progress.activate_multiplier(),
        BonusKind::TimeFreeze => state.progress.freeze(),
        BonusKind::Shrink => {
            state.snake.shrink_half();
            state.progress.halve_streak();
        }
    }
}

fn eat_number(state: &mut GameState, index: usize, value: u8) {
    state.numbers.remove(index);
    let outcome = state.progress.on_correct_eat(value);

    log::debug!(
        "Ate {} for {} (score {}, streak {}, tick {} ms)",
        value,
        outcome.gain,
        state.progress.score,
        state.progress.streak,
        state.progress.tick_interval_ms
    );
    state.push_event(GameEvent::NumberEaten {
        value,
        gain: outcome.gain,
    });
    state.haptic(Haptic::Medium, false);
    if outcome.multiplier_ended {
        state.push_event(GameEvent::MultiplierEnded);
    }

    spawn::refill_after_eat(state);
    spawn::maybe_spawn_bonus(state);

    if outcome.cycle_completed {
        level_up(state);
    }
}

fn level_up(state: &mut GameState) {
    let level = state.progress.level;
    log::info!("Cycle complete, level {}", level);

    state.push_event(GameEvent::CycleCompleted { level });
    state.haptic(Haptic::Heavy, false);

    state.clock.pending_speedups.push(SPEEDUP_DELAY_MS);
    if level >= state.difficulty.obstacles_from_level {
        state.clock.pending_obstacles = Some(OBSTACLE_REGEN_DELAY_MS);
    }
}

fn apply_speedup(state: &mut GameState) {
    let step = state.difficulty.tick_interval_step_ms;
    let floor = state.tuning().tick_interval_floor_ms;
    if state.progress.speed_up(step, floor) {
        let tick_interval_ms = state.progress.tick_interval_ms;
        log::info!("Speed up: tick interval now {} ms", tick_interval_ms);
        state.push_event(GameEvent::SpeedIncreased { tick_interval_ms });
    }
}
