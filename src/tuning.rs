//! Data-driven game balance
//!
//! Every level-dependent threshold lives in one table. The spawner and the
//! progression tracker ask `Difficulty::for_level` instead of hard-coding
//! their own numbers.

use serde::{Deserialize, Serialize};

use crate::consts::{MIN_TICK_INTERVAL_MS, TICK_INTERVAL_STEP_MS};

/// Named balance presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyPreset {
    /// Hazards arrive early
    #[default]
    Standard,
    /// Hazards arrive later and rarer
    Relaxed,
}

impl DifficultyPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyPreset::Standard => "Standard",
            DifficultyPreset::Relaxed => "Relaxed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" | "std" => Some(DifficultyPreset::Standard),
            "relaxed" | "easy" => Some(DifficultyPreset::Relaxed),
            _ => None,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        match self {
            DifficultyPreset::Standard => Difficulty {
                time_limited_from_level: 5,
                time_limited_chance: 0.25,
                poison_from_level: 8,
                poison_chance: 0.10,
                moving_obstacle_from_level: 8,
                moving_obstacle_chance: 0.40,
                ..Difficulty::base()
            },
            DifficultyPreset::Relaxed => Difficulty {
                time_limited_from_level: 8,
                time_limited_chance: 0.20,
                poison_from_level: 15,
                poison_chance: 0.05,
                moving_obstacle_from_level: 12,
                moving_obstacle_chance: 0.30,
                ..Difficulty::base()
            },
        }
    }
}

/// Level thresholds and probabilities for one preset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub time_limited_from_level: u32,
    pub time_limited_chance: f64,
    pub poison_from_level: u32,
    pub poison_chance: f64,
    /// Obstacles start appearing at this level
    pub obstacles_from_level: u32,
    pub max_obstacles: u32,
    pub moving_obstacle_from_level: u32,
    pub moving_obstacle_chance: f64,
    /// Chance a bonus spawns after a correct eat (when none is on the board)
    pub bonus_chance: f64,
    pub tick_interval_step_ms: u32,
    pub tick_interval_floor_ms: u32,
}

impl Default for Difficulty {
    fn default() -> Self {
        DifficultyPreset::default().difficulty()
    }
}

/// The resolved row of the table for a single level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelTuning {
    pub time_limited_chance: f64,
    pub poison_chance: f64,
    pub obstacle_count: u32,
    pub moving_obstacle_chance: f64,
    pub tick_interval_floor_ms: u32,
    /// Whether the 1 s countdown driver runs
    pub decay_active: bool,
    /// Whether the 2 s obstacle driver runs
    pub obstacles_move: bool,
}

impl Difficulty {
    fn base() -> Self {
        Self {
            time_limited_from_level: 5,
            time_limited_chance: 0.25,
            poison_from_level: 8,
            poison_chance: 0.10,
            obstacles_from_level: 2,
            max_obstacles: 12,
            moving_obstacle_from_level: 8,
            moving_obstacle_chance: 0.40,
            bonus_chance: 0.25,
            tick_interval_step_ms: TICK_INTERVAL_STEP_MS,
            tick_interval_floor_ms: MIN_TICK_INTERVAL_MS,
        }
    }

    pub fn for_level(&self, level: u32) -> LevelTuning {
        let time_limited = level >= self.time_limited_from_level;
        let poison = level >= self.poison_from_level;
        let moving = level >= self.moving_obstacle_from_level;

        let obstacle_count = if level >= self.obstacles_from_level {
            level.saturating_sub(1).min(self.max_obstacles)
        } else {
            0
        };

        LevelTuning {
            time_limited_chance: if time_limited { self.time_limited_chance } else { 0.0 },
            poison_chance: if poison { self.poison_chance } else { 0.0 },
            obstacle_count,
            moving_obstacle_chance: if moving { self.moving_obstacle_chance } else { 0.0 },
            tick_interval_floor_ms: self.tick_interval_floor_ms,
            decay_active: time_limited,
            obstacles_move: moving,
        }
    }
}
