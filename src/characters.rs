//! Playable character catalog
//!
//! Characters are cosmetic: the trail colour tints particles, nothing else.

use serde::{Deserialize, Serialize};

/// Identifier of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CharacterId {
    #[default]
    Bird,
    Rocket,
    Butterfly,
}

/// Static visual profile of a playable character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub id: CharacterId,
    pub name: &'static str,
    pub icon: &'static str,
    /// CSS gradient stops used by the select screen
    pub color: (&'static str, &'static str),
    /// Particle and glow colour
    pub trail_color: &'static str,
    pub description: &'static str,
}

pub const CHARACTERS: [Character; 3] = [
    Character {
        id: CharacterId::Bird,
        name: "Cyber Bird",
        icon: "🐦",
        color: ("#60a5fa", "#2563eb"),
        trail_color: "rgba(59, 130, 246, 0.6)",
        description: "Classic flyer with electric blue trails",
    },
    Character {
        id: CharacterId::Rocket,
        name: "Neon Rocket",
        icon: "🚀",
        color: ("#c084fc", "#db2777"),
        trail_color: "rgba(168, 85, 247, 0.6)",
        description: "High-tech rocket with purple plasma trails",
    },
    Character {
        id: CharacterId::Butterfly,
        name: "Quantum Butterfly",
        icon: "🦋",
        color: ("#34d399", "#0d9488"),
        trail_color: "rgba(16, 185, 129, 0.6)",
        description: "Graceful butterfly with shimmering green aura",
    },
];

impl CharacterId {
    pub const ALL: [CharacterId; 3] = [CharacterId::Bird, CharacterId::Rocket, CharacterId::Butterfly];

    /// Catalog entry for this id
    pub fn profile(self) -> &'static Character {
        match self {
            CharacterId::Bird => &CHARACTERS[0],
            CharacterId::Rocket => &CHARACTERS[1],
            CharacterId::Butterfly => &CHARACTERS[2],
        }
    }

    /// Lookup by 0-based catalog position (number keys on the select screen)
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse a command-line name: `rocket` or the full `Neon Rocket`
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|id| {
            let name = id.profile().name;
            name.eq_ignore_ascii_case(s)
                || name
                    .rsplit(' ')
                    .next()
                    .is_some_and(|word| word.eq_ignore_ascii_case(s))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_match_ids() {
        for id in CharacterId::ALL {
            assert_eq!(id.profile().id, id);
        }
    }

    #[test]
    fn test_from_index_bounds() {
        assert_eq!(CharacterId::from_index(1), Some(CharacterId::Rocket));
        assert_eq!(CharacterId::from_index(3), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(CharacterId::from_str("Butterfly"), Some(CharacterId::Butterfly));
        assert_eq!(CharacterId::from_str("neon rocket"), Some(CharacterId::Rocket));
        assert_eq!(CharacterId::from_str("dragon"), None);
    }
}
