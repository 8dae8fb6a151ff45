//! Number Snake - a grid snake that must eat numbers in 1-9 order
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, spawning, progression)
//! - `session`: One player's run plus cross-run stats and achievements
//! - `persistence`: Save/load through a key/value store
//! - `tuning`: Data-driven game balance

pub mod achievements;
pub mod persistence;
pub mod session;
pub mod settings;
pub mod sim;
pub mod skins;
pub mod stats;
pub mod tuning;

pub use achievements::{Achievement, AchievementBook};
pub use session::{ContinueGate, NoContinue, Session};
pub use settings::Settings;
pub use stats::GameStats;
pub use tuning::{Difficulty, DifficultyPreset};

/// Game configuration constants
pub mod consts {
    /// Board is GRID_SIZE x GRID_SIZE cells
    pub const GRID_SIZE: i32 = 16;
    /// Snake start cell
    pub const START_X: i32 = 8;
    pub const START_Y: i32 = 8;

    /// Random draws before falling back to a scan for a free cell
    pub const SPAWN_ATTEMPTS: u32 = 100;

    /// Numbers run 1..=NUMBER_MAX then wrap
    pub const NUMBER_MAX: u8 = 9;
    /// Distractors placed beside the target on a fresh board
    pub const MIN_DISTRACTORS: usize = 2;
    pub const MAX_DISTRACTORS: usize = 4;
    /// Countdown on time-limited numbers (seconds)
    pub const TIME_LIMITED_SECS: u8 = 8;

    /// Movement cadence at the start of a run
    pub const INITIAL_TICK_INTERVAL_MS: u32 = 200;
    /// Speed-up per level
    pub const TICK_INTERVAL_STEP_MS: u32 = 10;
    /// Fastest movement cadence
    pub const MIN_TICK_INTERVAL_MS: u32 = 60;
    /// Delay between a level-up and its speed-up
    pub const SPEEDUP_DELAY_MS: u32 = 5000;
    /// Delay between a level-up and its new obstacles
    pub const OBSTACLE_REGEN_DELAY_MS: u32 = 3000;

    /// Countdown cadence for time-limited numbers
    pub const DECAY_INTERVAL_MS: u32 = 1000;
    /// Moving obstacle cadence
    pub const OBSTACLE_MOVE_INTERVAL_MS: u32 = 2000;

    /// Freeze bonus length
    pub const FREEZE_DURATION_MS: u32 = 3000;
    /// Correct eats covered by the score multiplier bonus
    pub const MULTIPLIER_EATS: u32 = 5;
    /// Tail segments lost when continuing
    pub const CONTINUE_SHRINK_SEGMENTS: usize = 3;

    /// Longest wall-time slice one tick call will simulate
    pub const MAX_FRAME_MS: u32 = 250;
}
