//! Key identifiers delivered by the host
//!
//! Hosts pass the browser-style key string for each press (`"ArrowLeft"`,
//! `" "`, `"r"`); anything unknown is left for the host to handle.

use serde::{Deserialize, Serialize};

/// Keys the game responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Jump,
    Reset,
    Pause,
}

impl Key {
    /// Map a host key identifier to a game key
    pub fn from_key(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            " " | "Spacebar" => Some(Key::Jump),
            _ => match code.to_lowercase().as_str() {
                "a" => Some(Key::Left),
                "d" => Some(Key::Right),
                "w" => Some(Key::Up),
                "s" => Some(Key::Down),
                "r" => Some(Key::Reset),
                "p" => Some(Key::Pause),
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_and_wasd_aliases() {
        assert_eq!(Key::from_key("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_key("a"), Some(Key::Left));
        assert_eq!(Key::from_key("D"), Some(Key::Right));
        assert_eq!(Key::from_key("w"), Some(Key::Up));
        assert_eq!(Key::from_key("ArrowDown"), Some(Key::Down));
        assert_eq!(Key::from_key(" "), Some(Key::Jump));
    }

    #[test]
    fn test_game_keys_case_insensitive() {
        assert_eq!(Key::from_key("r"), Some(Key::Reset));
        assert_eq!(Key::from_key("R"), Some(Key::Reset));
        assert_eq!(Key::from_key("P"), Some(Key::Pause));
    }

    #[test]
    fn test_unknown_keys() {
        assert_eq!(Key::from_key("Escape"), None);
        assert_eq!(Key::from_key("q"), None);
        assert_eq!(Key::from_key(""), None);
    }
}
