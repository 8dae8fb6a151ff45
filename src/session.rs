//! A play session: the current run plus everything that outlives it
//!
//! Owns the store, cross-run stats, achievements, and settings. Hosts drive
//! it with `tick` and read back events and the board snapshot.

use crate::achievements::{self, AchievementBook};
use crate::persistence::{self, Store};
use crate::settings::Settings;
use crate::sim::{Board, Direction, GameEvent, GamePhase, GameState, TickInput, tick};
use crate::skins;
use crate::stats::{GameStats, RunSummary};

/// Asks the host whether a continuation may be offered (e.g. a rewarded ad is ready)
pub trait ContinueGate {
    fn continuation_available(&mut self) -> bool;
}

impl<F: FnMut() -> bool> ContinueGate for F {
    fn continuation_available(&mut self) -> bool {
        self()
    }
}

/// Gate that never grants a continuation
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContinue;

impl ContinueGate for NoContinue {
    fn continuation_available(&mut self) -> bool {
        false
    }
}

pub struct Session<S: Store, G: ContinueGate> {
    store: S,
    gate: G,
    settings: Settings,
    stats: GameStats,
    achievements: AchievementBook,
    state: GameState,
    /// Seed for the next run
    next_seed: u64,
    /// Bookkeeping for the current GAME_OVER has been done
    game_over_recorded: bool,
}

impl<S: Store, G: ContinueGate> Session<S, G> {
    /// Load persisted data and start the first run
    pub fn new(store: S, gate: G, seed: u64) -> Self {
        let settings = persistence::load_settings(&store);
        let stats = persistence::load_stats(&store);
        let achievements = persistence::load_achievements(&store);
        log::info!(
            "Session start: high score {}, {} games, {} achievements",
            stats.high_score,
            stats.games_played,
            achievements.len()
        );

        let state = GameState::new(seed, settings.tuning());
        Self {
            store,
            gate,
            settings,
            stats,
            achievements,
            state,
            next_seed: seed.wrapping_add(1),
            game_over_recorded: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn achievements(&self) -> &AchievementBook {
        &self.achievements
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Snapshot for drawing
    pub fn board(&self) -> Board {
        Board::from_state(&self.state)
    }

    /// Best score including the run in progress
    pub fn high_score(&self) -> u64 {
        self.stats.high_score.max(self.state.progress.score)
    }

    /// Advance the run and return the events raised
    pub fn tick(&mut self, input: &TickInput, dt_ms: u32) -> Vec<GameEvent> {
        tick(&mut self.state, input, dt_ms);
        if self.state.phase == GamePhase::GameOver && !self.game_over_recorded {
            self.finish_run();
        }
        self.take_events()
    }

    pub fn set_direction(&mut self, dir: Direction) -> bool {
        self.state.set_direction(dir)
    }

    pub fn toggle_pause(&mut self) -> bool {
        crate::sim::toggle_pause(&mut self.state)
    }

    pub fn toggle_help(&mut self) -> bool {
        crate::sim::toggle_help(&mut self.state)
    }

    /// Whether the game-over screen should offer a continuation
    pub fn can_continue(&mut self) -> bool {
        self.state.phase == GamePhase::GameOver
            && !self.state.continued
            && self.gate.continuation_available()
    }

    /// Revive the run once, if the host grants it
    pub fn continue_run(&mut self) -> bool {
        if !self.can_continue() {
            return false;
        }
        let resumed = self.state.continue_run();
        if resumed {
            self.game_over_recorded = false;
        }
        resumed
    }

    /// Start a fresh run; cross-run data stays
    pub fn retry(&mut self) {
        if self.state.phase == GamePhase::GameOver && !self.game_over_recorded {
            self.finish_run();
        }
        let seed = self.next_seed;
        self.next_seed = self.next_seed.wrapping_add(1);
        self.state = GameState::new(seed, self.settings.tuning());
        self.game_over_recorded = false;
    }

    /// Select a skin unlocked at the current level and persist the choice
    pub fn select_skin(&mut self, id: &str) -> bool {
        if !skins::is_unlocked(id, self.state.progress.level) {
            return false;
        }
        self.settings.skin = id.to_string();
        self.persist_settings();
        true
    }

    /// Replace settings; difficulty applies from the next run
    pub fn update_settings(&mut self, mut settings: Settings) {
        settings.sanitize();
        self.settings = settings;
        self.persist_settings();
    }

    /// Fold the dead run into stats, unlock achievements, and save
    fn finish_run(&mut self) {
        self.game_over_recorded = true;

        let run = RunSummary::from_state(&self.state);
        let new_high = self.stats.is_new_high(run.score);
        if new_high {
            log::info!("New high score: {}", run.score);
        }
        self.stats = self.stats.record(&run);

        let fresh = self.achievements.evaluate(&self.stats);
        if let Some((first, rest)) = fresh.split_first() {
            log::info!("Achievement unlocked: {} {}", first.icon, first.name);
            self.state.push_event(GameEvent::AchievementUnlocked {
                id: first.id.to_string(),
            });
            for a in rest {
                log::info!("Achievement unlocked: {} {}", a.icon, a.name);
            }
        }

        self.state.push_event(GameEvent::GameOver {
            final_score: run.score,
            high_score: self.stats.high_score,
            new_high,
        });

        if let Err(e) = persistence::save_stats(&mut self.store, &self.stats) {
            log::warn!("Failed to save stats: {}", e);
        }
        if !fresh.is_empty() {
            if let Err(e) = persistence::save_achievements(&mut self.store, &self.achievements) {
                log::warn!("Failed to save achievements: {}", e);
            }
        }
    }

    fn persist_settings(&mut self) {
        if let Err(e) = persistence::save_settings(&mut self.store, &self.settings) {
            log::warn!("Failed to save settings: {}", e);
        }
    }

    /// Drain events, dropping haptics the player has turned off
    fn take_events(&mut self) -> Vec<GameEvent> {
        let haptics = self.settings.haptics;
        let vibration = self.settings.vibration;
        self.state
            .drain_events()
            .into_iter()
            .filter_map(|event| match event {
                GameEvent::Haptic { .. } if !haptics => None,
                GameEvent::Haptic { strength, vibrate } => Some(GameEvent::Haptic {
                    strength,
                    vibrate: vibrate && vibration,
                }),
                other => Some(other),
            })
            .collect()
    }
}

/// Look up the display metadata for an unlocked achievement event
pub fn achievement_for(event: &GameEvent) -> Option<&'static achievements::Achievement> {
    match event {
        GameEvent::AchievementUnlocked { id } => achievements::find(id),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::{DeathCause, NumberItem};
    use glam::IVec2;

    fn session() -> Session<MemoryStore, NoContinue> {
        Session::new(MemoryStore::new(), NoContinue, 7)
    }

    /// Drive the snake right into the wall
    fn crash(session: &mut Session<impl Store, impl ContinueGate>) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..20 {
            events.extend(session.tick(&TickInput::default(), 200));
            if session.state().phase == GamePhase::GameOver {
                break;
            }
        }
        events
    }

    fn clear_path(session: &mut Session<impl Store, impl ContinueGate>) {
        session.state.numbers = vec![NumberItem::plain(IVec2::new(0, 0), 1)];
        session.state.bonus = None;
    }

    #[test]
    fn test_game_over_records_stats_and_achievement() {
        let mut s = session();
        clear_path(&mut s);
        let events = crash(&mut s);

        assert_eq!(s.state().death, Some(DeathCause::Wall));
        assert_eq!(s.stats().games_played, 1);
        assert!(s.achievements().is_unlocked("first_game"));
        assert!(events.contains(&GameEvent::AchievementUnlocked {
            id: "first_game".to_string()
        }));
        assert!(events.contains(&GameEvent::GameOver {
            final_score: 0,
            high_score: 0,
            new_high: false
        }));

        // Saved through the store
        let saved = persistence::load_stats(s.store());
        assert_eq!(saved.games_played, 1);
        assert!(persistence::load_achievements(s.store()).is_unlocked("first_game"));
    }

    #[test]
    fn test_multiple_unlocks_surface_only_first() {
        let mut s = session();
        s.state.progress.score = 600;
        clear_path(&mut s);
        let events = crash(&mut s);

        let unlocked: Vec<&GameEvent> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::AchievementUnlocked { .. }))
            .collect();
        assert_eq!(
            unlocked,
            vec![&GameEvent::AchievementUnlocked {
                id: "first_game".to_string()
            }]
        );
        assert!(events.contains(&GameEvent::GameOver {
            final_score: 600,
            high_score: 600,
            new_high: true
        }));

        // The rest unlock silently but are still recorded and saved
        assert_eq!(s.achievements().len(), 3);
        assert!(s.achievements().is_unlocked("score_500"));
        let saved = persistence::load_achievements(s.store());
        assert_eq!(saved.len(), 3);
    }

    #[test]
    fn test_game_over_recorded_once() {
        let mut s = session();
        clear_path(&mut s);
        crash(&mut s);
        s.tick(&TickInput::default(), 200);
        s.tick(&TickInput::default(), 200);
        assert_eq!(s.stats().games_played, 1);
    }

    #[test]
    fn test_continue_requires_gate() {
        let mut s = session();
        clear_path(&mut s);
        crash(&mut s);
        assert!(!s.continue_run());
        assert_eq!(s.state().phase, GamePhase::GameOver);
    }

    #[test]
    fn test_continue_once_with_gate() {
        let mut s = Session::new(MemoryStore::new(), || true, 7);
        clear_path(&mut s);
        crash(&mut s);
        assert!(s.continue_run());
        assert_eq!(s.state().phase, GamePhase::Playing);
        assert!(s.state().target_present());

        s.set_direction(Direction::Up);
        clear_path(&mut s);
        crash(&mut s);
        assert!(!s.can_continue());
        assert!(!s.continue_run());
        assert_eq!(s.stats().games_played, 2);
    }

    #[test]
    fn test_retry_resets_run_keeps_stats() {
        let mut s = session();
        s.state.progress.score = 250;
        clear_path(&mut s);
        crash(&mut s);
        assert_eq!(s.stats().high_score, 250);

        s.retry();
        assert_eq!(s.state().phase, GamePhase::Playing);
        assert_eq!(s.state().progress.score, 0);
        assert_eq!(s.state().progress.target, 1);
        assert_eq!(s.state().snake.len(), 1);
        assert_eq!(s.stats().high_score, 250);
        assert_eq!(s.high_score(), 250);
    }

    #[test]
    fn test_haptics_filtered_when_disabled() {
        let mut s = session();
        s.update_settings(Settings {
            haptics: false,
            ..Settings::default()
        });
        s.state.numbers = vec![NumberItem::plain(IVec2::new(9, 8), 1)];
        let events = s.tick(&TickInput::default(), 200);
        assert!(events.contains(&GameEvent::NumberEaten { value: 1, gain: 10 }));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Haptic { .. })));
    }

    #[test]
    fn test_skin_needs_level() {
        let mut s = session();
        assert!(!s.select_skin("fire"));
        s.state.progress.level = 5;
        assert!(s.select_skin("fire"));
        assert_eq!(persistence::load_settings(s.store()).skin, "fire");
    }

    #[test]
    fn test_loads_existing_stats() {
        let mut store = MemoryStore::new();
        let stats = GameStats {
            high_score: 900,
            games_played: 4,
            ..Default::default()
        };
        persistence::save_stats(&mut store, &stats).unwrap();
        let s = Session::new(store, NoContinue, 1);
        assert_eq!(s.stats().high_score, 900);
    }
}
