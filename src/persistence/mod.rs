//! Save/load persistence
//!
//! A `Store` is a string key/value slot (LocalStorage-shaped). Typed helpers
//! on top serialize with `serde_json`. Loads never fail: missing or corrupt
//! data falls back to defaults with a warning.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::achievements::AchievementBook;
use crate::settings::Settings;
use crate::stats::GameStats;

pub const STATS_KEY: &str = "number_snake_stats";
pub const ACHIEVEMENTS_KEY: &str = "number_snake_achievements";
pub const SETTINGS_KEY: &str = "number_snake_settings";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage I/O failed for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("bad JSON for '{key}': {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, PersistenceError>;

/// String key/value storage
pub trait Store {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store (tests, or hosts without storage)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Store for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PersistenceError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        let io_err = |source| PersistenceError::Io {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;

        // Write to a temp file first so a crash never leaves half a save
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        fs::write(&tmp, value).map_err(io_err)?;
        fs::rename(&tmp, self.path(key)).map_err(io_err)?;
        Ok(())
    }
}

fn load_json<T: DeserializeOwned>(store: &dyn Store, key: &str) -> Result<Option<T>> {
    let Some(text) = store.read(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| PersistenceError::Json {
            key: key.to_string(),
            source,
        })
}

fn save_json<T: Serialize + ?Sized>(store: &mut dyn Store, key: &str, value: &T) -> Result<()> {
    let text = serde_json::to_string(value).map_err(|source| PersistenceError::Json {
        key: key.to_string(),
        source,
    })?;
    store.write(key, &text)
}

/// Load with fallback to `T::default()` on absence or failure
fn load_or_default<T: DeserializeOwned + Default>(store: &dyn Store, key: &str, what: &str) -> T {
    match load_json(store, key) {
        Ok(Some(value)) => {
            log::info!("Loaded {}", what);
            value
        }
        Ok(None) => {
            log::info!("No saved {}, starting fresh", what);
            T::default()
        }
        Err(e) => {
            log::warn!("Ignoring saved {}: {}", what, e);
            T::default()
        }
    }
}

pub fn load_stats(store: &dyn Store) -> GameStats {
    load_or_default(store, STATS_KEY, "stats")
}

pub fn save_stats(store: &mut dyn Store, stats: &GameStats) -> Result<()> {
    save_json(store, STATS_KEY, stats)
}

/// Unlocked ids only; unknown ids are dropped
pub fn load_achievements(store: &dyn Store) -> AchievementBook {
    let ids: Vec<String> = load_or_default(store, ACHIEVEMENTS_KEY, "achievements");
    AchievementBook::restore(ids.iter().map(String::as_str))
}

pub fn save_achievements(store: &mut dyn Store, book: &AchievementBook) -> Result<()> {
    save_json(store, ACHIEVEMENTS_KEY, &book.unlocked_ids())
}

pub fn load_settings(store: &dyn Store) -> Settings {
    let mut settings: Settings = load_or_default(store, SETTINGS_KEY, "settings");
    settings.sanitize();
    settings
}

pub fn save_settings(store: &mut dyn Store, settings: &Settings) -> Result<()> {
    save_json(store, SETTINGS_KEY, settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::DifficultyPreset;

    #[test]
    fn test_missing_data_defaults() {
        let store = MemoryStore::new();
        assert_eq!(load_stats(&store), GameStats::default());
        assert!(load_achievements(&store).is_empty());
        assert_eq!(load_settings(&store), Settings::default());
    }

    #[test]
    fn test_corrupt_data_defaults() {
        let mut store = MemoryStore::new();
        store.write(STATS_KEY, "{not json").unwrap();
        store.write(ACHIEVEMENTS_KEY, "42").unwrap();
        assert_eq!(load_stats(&store), GameStats::default());
        assert!(load_achievements(&store).is_empty());
    }

    #[test]
    fn test_stats_and_achievements_persist() {
        let mut store = MemoryStore::new();
        let stats = GameStats {
            high_score: 340,
            games_played: 3,
            ..Default::default()
        };
        save_stats(&mut store, &stats).unwrap();

        let mut book = AchievementBook::new();
        book.evaluate(&stats);
        save_achievements(&mut store, &book).unwrap();

        assert_eq!(load_stats(&store), stats);
        let loaded = load_achievements(&store);
        assert!(loaded.is_unlocked("first_game"));
        assert!(loaded.is_unlocked("score_100"));
        assert!(!loaded.is_unlocked("score_500"));
    }

    #[test]
    fn test_json_file_store() {
        let dir = std::env::temp_dir().join(format!("number-snake-test-{}", std::process::id()));
        let mut store = JsonFileStore::new(&dir);
        assert_eq!(store.read(SETTINGS_KEY).unwrap(), None);

        let settings = Settings::from_preset(DifficultyPreset::Relaxed);
        save_settings(&mut store, &settings).unwrap();
        assert_eq!(load_settings(&store), settings);

        let _ = fs::remove_dir_all(&dir);
    }
}
