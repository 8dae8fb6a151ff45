//! Player preferences
//!
//! Persisted separately from stats, through the same store.

use serde::{Deserialize, Serialize};

use crate::skins::{self, DEFAULT_SKIN};
use crate::tuning::{Difficulty, DifficultyPreset};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Balance preset for new runs
    pub difficulty: DifficultyPreset,

    // === Feedback ===
    /// Forward haptic events to the presentation layer
    pub haptics: bool,
    /// Allow long vibrations on fatal hits
    pub vibration: bool,

    // === Cosmetics ===
    /// Selected snake skin id
    pub skin: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: DifficultyPreset::Standard,
            haptics: true,
            vibration: true,
            skin: DEFAULT_SKIN.to_string(),
        }
    }
}

impl Settings {
    /// Create settings for a preset (other fields default)
    pub fn from_preset(preset: DifficultyPreset) -> Self {
        Self {
            difficulty: preset,
            ..Self::default()
        }
    }

    /// Resolved balance table for new runs
    pub fn tuning(&self) -> Difficulty {
        self.difficulty.difficulty()
    }

    /// Fix up values a hand-edited or stale save may carry
    pub fn sanitize(&mut self) {
        if skins::find(&self.skin).is_none() {
            log::warn!("Unknown skin '{}', using default", self.skin);
            self.skin = DEFAULT_SKIN.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.difficulty, DifficultyPreset::Standard);
        assert!(s.haptics);
        assert_eq!(s.skin, "default");
    }

    #[test]
    fn test_partial_json() {
        let s: Settings = serde_json::from_str(r#"{"difficulty":"Relaxed"}"#).unwrap();
        assert_eq!(s.difficulty, DifficultyPreset::Relaxed);
        assert!(s.vibration);
        assert_eq!(s.tuning().poison_from_level, 15);
    }

    #[test]
    fn test_sanitize_unknown_skin() {
        let mut s = Settings {
            skin: "plaid".to_string(),
            ..Default::default()
        };
        s.sanitize();
        assert_eq!(s.skin, DEFAULT_SKIN);
    }
}
