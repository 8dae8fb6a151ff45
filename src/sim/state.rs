//! Game state and core simulation types
//!
//! `GameState` is the single owner of everything a run mutates. Scheduled
//! drivers read from it directly, never from captured copies.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Direction, Occupancy, Position};
use super::progression::Progression;
use super::snake::Snake;
use super::spawn;
use crate::consts::*;
use crate::tuning::{Difficulty, LevelTuning};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    Paused,
    /// Run ended; may be revived once
    GameOver,
    /// Help overlay; blocks ticking and returns to the phase it covered
    HowToPlay,
}

/// A numbered token on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberItem {
    pub pos: Position,
    /// 1..=9
    pub value: u8,
    /// Seconds left before the item vanishes (time-limited items only)
    #[serde(default)]
    pub time_left: Option<u8>,
    #[serde(default)]
    pub poisonous: bool,
}

impl NumberItem {
    pub fn plain(pos: Position, value: u8) -> Self {
        Self {
            pos,
            value,
            time_left: None,
            poisonous: false,
        }
    }

    pub fn is_time_limited(&self) -> bool {
        self.time_left.is_some()
    }
}

/// Bonus kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusKind {
    /// Doubles score for the next few correct eats
    ScoreMultiplier,
    /// Stops the snake for a short while
    TimeFreeze,
    /// Halves the body and the streak
    Shrink,
}

impl BonusKind {
    pub const ALL: [BonusKind; 3] = [
        BonusKind::ScoreMultiplier,
        BonusKind::TimeFreeze,
        BonusKind::Shrink,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusItem {
    pub pos: Position,
    pub kind: BonusKind,
}

/// A wall block; moving ones drift one cell per obstacle cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Position,
    #[serde(default)]
    pub direction: Option<Direction>,
}

impl Obstacle {
    pub fn is_moving(&self) -> bool {
        self.direction.is_some()
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Wall,
    Obstacle,
    SelfBite,
    Poison,
    WrongNumber { value: u8, expected: u8 },
}

impl DeathCause {
    pub fn describe(&self) -> String {
        match self {
            DeathCause::Wall => "hit the wall".to_string(),
            DeathCause::Obstacle => "hit an obstacle".to_string(),
            DeathCause::SelfBite => "bit itself".to_string(),
            DeathCause::Poison => "ate a poisonous number".to_string(),
            DeathCause::WrongNumber { value, expected } => {
                format!("ate {} while {} was next", value, expected)
            }
        }
    }
}

/// Haptic intensity hint for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Haptic {
    Light,
    Medium,
    Heavy,
}

/// Discrete events for presentation (sound, haptics, toasts)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    NumberEaten { value: u8, gain: u64 },
    BonusCollected(BonusKind),
    FreezeEnded,
    MultiplierEnded,
    NumberExpired { value: u8 },
    CycleCompleted { level: u32 },
    SpeedIncreased { tick_interval_ms: u32 },
    ObstaclesPlaced { count: usize },
    Died(DeathCause),
    GameOver {
        final_score: u64,
        high_score: u64,
        /// The run beat the best score stored before it
        new_high: bool,
    },
    AchievementUnlocked { id: String },
    Continued,
    Haptic { strength: Haptic, vibrate: bool },
}

/// Elapsed-time accumulators for the periodic drivers plus delayed level-up work
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Clock {
    /// Time since the last snake move
    pub move_ms: u32,
    /// Time since the last countdown step
    pub decay_ms: u32,
    /// Time since the last obstacle step
    pub obstacle_ms: u32,
    /// Countdowns to pending speed-ups, one per level-up
    pub pending_speedups: Vec<u32>,
    /// Countdown to the next obstacle regeneration
    pub pending_obstacles: Option<u32>,
}

impl Clock {
    /// Restart the periodic drivers from a clean boundary
    pub fn restart_drivers(&mut self) {
        self.move_ms = 0;
        self.decay_ms = 0;
        self.obstacle_ms = 0;
    }
}

/// Complete state of one run (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub difficulty: Difficulty,
    pub phase: GamePhase,
    /// Phase to return to when the help overlay closes
    pub help_return: GamePhase,
    pub snake: Snake,
    /// Board numbers (at most one per cell)
    pub numbers: Vec<NumberItem>,
    /// At most one bonus at a time
    pub bonus: Option<BonusItem>,
    pub obstacles: Vec<Obstacle>,
    pub progress: Progression,
    pub clock: Clock,
    /// Simulated time spent playing
    pub time_ms: u64,
    /// Snake moves performed
    pub moves: u64,
    /// The one continuation of this run has been used
    pub continued: bool,
    /// Cause of the most recent death
    pub death: Option<DeathCause>,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh run: one-segment snake at the centre heading right, target 1
    pub fn new(seed: u64, difficulty: Difficulty) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            difficulty,
            phase: GamePhase::Playing,
            help_return: GamePhase::Playing,
            snake: Snake::new(IVec2::new(START_X, START_Y), Direction::Right),
            numbers: Vec::new(),
            bonus: None,
            obstacles: Vec::new(),
            progress: Progression::new(INITIAL_TICK_INTERVAL_MS),
            clock: Clock::default(),
            time_ms: 0,
            moves: 0,
            continued: false,
            death: None,
            events: Vec::new(),
        };

        spawn::spawn_initial_numbers(&mut state);
        log::info!("New run with seed {}", seed);

        state
    }

    /// Tuning row for the current level
    pub fn tuning(&self) -> LevelTuning {
        self.difficulty.for_level(self.progress.level)
    }

    /// Every cell held by the snake, numbers, bonus, or obstacles
    pub fn occupied_cells(&self) -> Occupancy {
        let mut occupied: Occupancy = self.snake.segments().copied().collect();
        occupied.extend(self.numbers.iter().map(|n| n.pos));
        occupied.extend(self.bonus.iter().map(|b| b.pos));
        occupied.extend(self.obstacles.iter().map(|o| o.pos));
        occupied
    }

    pub fn number_at(&self, pos: Position) -> Option<usize> {
        self.numbers.iter().position(|n| n.pos == pos)
    }

    pub fn obstacle_at(&self, pos: Position) -> bool {
        self.obstacles.iter().any(|o| o.pos == pos)
    }

    /// Whether an edible copy of the live target is on the board
    pub fn target_present(&self) -> bool {
        let target = self.progress.target;
        self.numbers.iter().any(|n| n.value == target && !n.poisonous)
    }

    /// Buffer a heading change for the next move
    pub fn set_direction(&mut self, dir: Direction) -> bool {
        if self.phase == GamePhase::GameOver {
            return false;
        }
        self.snake.set_direction(dir)
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn haptic(&mut self, strength: Haptic, vibrate: bool) {
        self.events.push(GameEvent::Haptic { strength, vibrate });
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Enter GAME_OVER; all drivers stop
    pub fn end_run(&mut self, cause: DeathCause) {
        if matches!(cause, DeathCause::WrongNumber { .. } | DeathCause::Poison) {
            self.progress.reset_streak();
        }
        log::info!(
            "Run over: {} (score {}, length {}, level {})",
            cause.describe(),
            self.progress.score,
            self.snake.len(),
            self.progress.level
        );
        self.death = Some(cause);
        self.phase = GamePhase::GameOver;
        self.progress.clear_freeze();
        self.clock.restart_drivers();
        self.push_event(GameEvent::Died(cause));
    }

    /// Revive after GAME_OVER. Allowed once per run.
    pub fn continue_run(&mut self) -> bool {
        if self.phase != GamePhase::GameOver || self.continued {
            return false;
        }

        self.snake.drop_tail(CONTINUE_SHRINK_SEGMENTS);
        self.progress.clear_freeze();
        self.progress.clear_multiplier();
        self.continued = true;
        self.death = None;

        spawn::spawn_initial_numbers(self);

        self.clock.restart_drivers();
        self.phase = GamePhase::Playing;
        self.push_event(GameEvent::Continued);
        log::info!(
            "Continuing at score {} with length {} (tick {} ms)",
            self.progress.score,
            self.snake.len(),
            self.progress.tick_interval_ms
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run_layout() {
        let state = GameState::new(42, Difficulty::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.head(), IVec2::new(8, 8));
        assert_eq!(state.snake.heading(), Direction::Right);
        assert_eq!(state.progress.target, 1);
        assert_eq!(state.progress.tick_interval_ms, 200);
        assert!(state.target_present());
        assert!((3..=5).contains(&state.numbers.len()));
        assert!(state.obstacles.is_empty());
        assert!(state.bonus.is_none());
    }

    #[test]
    fn test_numbers_never_share_cells() {
        for seed in 0..50 {
            let state = GameState::new(seed, Difficulty::default());
            let occupied = state.occupied_cells();
            assert_eq!(occupied.len(), state.numbers.len() + state.snake.len());
        }
    }

    #[test]
    fn test_wrong_number_death_resets_streak() {
        let mut state = GameState::new(1, Difficulty::default());
        state.progress.streak = 7;
        state.end_run(DeathCause::WrongNumber { value: 4, expected: 2 });
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.progress.streak, 0);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Died(DeathCause::WrongNumber {
                value: 4,
                expected: 2
            })]
        );
    }

    #[test]
    fn test_wall_death_keeps_streak() {
        let mut state = GameState::new(1, Difficulty::default());
        state.progress.streak = 7;
        state.end_run(DeathCause::Wall);
        assert_eq!(state.progress.streak, 7);
    }

    #[test]
    fn test_continue_only_once() {
        let mut state = GameState::new(3, Difficulty::default());
        assert!(!state.continue_run(), "cannot continue while playing");

        state.end_run(DeathCause::Wall);
        assert!(state.continue_run());
        assert_eq!(state.phase, GamePhase::Playing);

        state.end_run(DeathCause::SelfBite);
        assert!(!state.continue_run());
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_no_direction_change_after_game_over() {
        let mut state = GameState::new(3, Difficulty::default());
        state.end_run(DeathCause::Wall);
        assert!(!state.set_direction(Direction::Up));
    }
}
