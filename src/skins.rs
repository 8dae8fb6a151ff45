//! Snake skins unlocked by reaching levels

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnakeSkin {
    pub id: &'static str,
    pub name: &'static str,
    pub head: &'static str,
    /// Body colour as `#rrggbb`
    pub body_color: &'static str,
    pub unlock_level: u32,
}

pub const DEFAULT_SKIN: &str = "default";

pub const SKINS: &[SnakeSkin] = &[
    SnakeSkin {
        id: "default",
        name: "Classic",
        head: "🐍",
        body_color: "#22c55e",
        unlock_level: 1,
    },
    SnakeSkin {
        id: "fire",
        name: "Fire Snake",
        head: "🔥",
        body_color: "#ef4444",
        unlock_level: 5,
    },
    SnakeSkin {
        id: "ice",
        name: "Ice Snake",
        head: "❄️",
        body_color: "#3b82f6",
        unlock_level: 10,
    },
    SnakeSkin {
        id: "gold",
        name: "Golden Snake",
        head: "👑",
        body_color: "#eab308",
        unlock_level: 15,
    },
    SnakeSkin {
        id: "rainbow",
        name: "Rainbow Snake",
        head: "🌈",
        body_color: "#8b5cf6",
        unlock_level: 25,
    },
    SnakeSkin {
        id: "dragon",
        name: "Dragon",
        head: "🐲",
        body_color: "#059669",
        unlock_level: 50,
    },
];

pub fn find(id: &str) -> Option<&'static SnakeSkin> {
    SKINS.iter().find(|s| s.id == id)
}

/// Skin for `id`, falling back to the classic one
pub fn resolve(id: &str) -> &'static SnakeSkin {
    find(id).unwrap_or(&SKINS[0])
}

/// Skins selectable at `level`
pub fn available(level: u32) -> impl Iterator<Item = &'static SnakeSkin> {
    SKINS.iter().filter(move |s| level >= s.unlock_level)
}

pub fn is_unlocked(id: &str, level: u32) -> bool {
    find(id).is_some_and(|s| level >= s.unlock_level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_gates() {
        assert_eq!(available(1).count(), 1);
        assert_eq!(available(10).count(), 3);
        assert!(is_unlocked("fire", 5));
        assert!(!is_unlocked("fire", 4));
        assert!(!is_unlocked("missing", 99));
    }

    #[test]
    fn test_resolve_falls_back() {
        assert_eq!(resolve("ice").name, "Ice Snake");
        assert_eq!(resolve("nope").id, DEFAULT_SKIN);
    }
}
