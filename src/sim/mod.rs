//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time arrives as explicit millisecond slices
//! - Seeded RNG only
//! - Stable iteration order (board lists keep insertion order)
//! - No rendering, storage, or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod grid;
pub mod progression;
pub mod snake;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod view;

pub use collision::{Collision, Impact, resolve};
pub use grid::{Direction, Occupancy, Position, in_bounds, is_occupied, random_empty_position};
pub use progression::{EatOutcome, Progression};
pub use snake::Snake;
pub use state::{
    BonusItem, BonusKind, Clock, DeathCause, GameEvent, GamePhase, GameState, Haptic, NumberItem,
    Obstacle,
};
pub use tick::{TickInput, tick, toggle_help, toggle_pause};
pub use view::{Board, Cell};
