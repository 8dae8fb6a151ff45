//! Number Snake entry point
//!
//! Headless demo: plays one autopilot session and prints the board.
//!
//! Usage: `number-snake [seed] [save-dir] [difficulty]`

use number_snake::DifficultyPreset;
use number_snake::persistence::{self, JsonFileStore};
use number_snake::session::{Session, achievement_for};
use number_snake::sim::{GameEvent, GamePhase, TickInput};
use number_snake::skins;

/// Simulated frame length
const FRAME_MS: u32 = 16;
/// Give up after this much simulated time
const MAX_RUN_MS: u64 = 10 * 60 * 1000;
/// Print the board this often
const PRINT_EVERY_MS: u64 = 5000;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(12345);
    let save_dir = args.next().unwrap_or_else(|| ".number-snake".to_string());
    let preset = args.next().and_then(|s| {
        let preset = DifficultyPreset::from_str(&s);
        if preset.is_none() {
            log::warn!("Unknown difficulty '{}', keeping saved setting", s);
        }
        preset
    });

    log::info!("Number Snake (headless) starting with seed {}", seed);

    let mut store = JsonFileStore::new(save_dir);
    if let Some(preset) = preset {
        let mut settings = persistence::load_settings(&store);
        settings.difficulty = preset;
        if let Err(e) = persistence::save_settings(&mut store, &settings) {
            log::warn!("Failed to save settings: {}", e);
        }
    }
    // The demo never grants a continuation
    let mut session = Session::new(store, || false, seed);

    let skin = skins::resolve(&session.settings().skin);
    println!(
        "Difficulty {} | skin {} {}",
        session.settings().difficulty.as_str(),
        skin.head,
        skin.name
    );

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let mut elapsed = 0u64;
    let mut next_print = 0u64;

    while session.state().phase != GamePhase::GameOver && elapsed < MAX_RUN_MS {
        for event in session.tick(&input, FRAME_MS) {
            report(&event);
        }
        elapsed += u64::from(FRAME_MS);

        if elapsed >= next_print {
            next_print += PRINT_EVERY_MS;
            print_status(&session);
        }
    }

    print_status(&session);
    let stats = session.stats();
    println!(
        "High score {} | games {} | longest snake {} | best streak {}",
        stats.high_score, stats.games_played, stats.longest_snake, stats.best_streak
    );

    let unlocked: Vec<&str> = skins::available(session.state().progress.level)
        .map(|s| s.name)
        .collect();
    println!("Skins unlocked this run: {}", unlocked.join(", "));
}

fn print_status<S, G>(session: &Session<S, G>)
where
    S: number_snake::persistence::Store,
    G: number_snake::ContinueGate,
{
    let p = &session.state().progress;
    println!(
        "score {} | level {} | next {} | streak {} | length {} | tick {} ms",
        p.score,
        p.level,
        p.target,
        p.streak,
        session.state().snake.len(),
        p.tick_interval_ms
    );
    println!("{}", session.board());
}

fn report(event: &GameEvent) {
    match event {
        GameEvent::CycleCompleted { level } => println!(">> Cycle complete, level {}", level),
        GameEvent::BonusCollected(kind) => println!(">> Bonus: {:?}", kind),
        GameEvent::Died(cause) => println!(">> Snake {}", cause.describe()),
        GameEvent::GameOver {
            final_score,
            high_score,
            new_high,
        } => {
            println!(">> Game over: {} (best {})", final_score, high_score);
            if *new_high {
                println!(">> New high score!");
            }
        }
        GameEvent::AchievementUnlocked { .. } => {
            if let Some(a) = achievement_for(event) {
                println!(">> Achievement: {} {} - {}", a.icon, a.name, a.description);
            }
        }
        _ => {}
    }
}
