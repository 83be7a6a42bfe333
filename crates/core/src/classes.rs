//! Character class codes and display names.
//!
//! Class codes follow the standard MU Online numbering: each base class
//! occupies a block of 16 (`0`, `16`, `32`, `48`, `64`) with evolved forms
//! at `+1` / `+2` inside the block.

use serde::Serialize;

/// A character class resolved from its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    DarkWizard,
    SoulMaster,
    GrandMaster,
    DarkKnight,
    BladeKnight,
    BladeMaster,
    FairyElf,
    MuseElf,
    HighElf,
    MagicGladiator,
    DuelMaster,
    DarkLord,
    LordEmperor,
}

impl CharacterClass {
    /// Resolve a class from its numeric code, or `None` for unknown codes.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::DarkWizard),
            1 => Some(Self::SoulMaster),
            2 => Some(Self::GrandMaster),
            16 => Some(Self::DarkKnight),
            17 => Some(Self::BladeKnight),
            18 => Some(Self::BladeMaster),
            32 => Some(Self::FairyElf),
            33 => Some(Self::MuseElf),
            34 => Some(Self::HighElf),
            48 => Some(Self::MagicGladiator),
            49 => Some(Self::DuelMaster),
            64 => Some(Self::DarkLord),
            65 => Some(Self::LordEmperor),
            _ => None,
        }
    }

    /// Human-readable class name for API responses.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::DarkWizard => "Dark Wizard",
            Self::SoulMaster => "Soul Master",
            Self::GrandMaster => "Grand Master",
            Self::DarkKnight => "Dark Knight",
            Self::BladeKnight => "Blade Knight",
            Self::BladeMaster => "Blade Master",
            Self::FairyElf => "Fairy Elf",
            Self::MuseElf => "Muse Elf",
            Self::HighElf => "High Elf",
            Self::MagicGladiator => "Magic Gladiator",
            Self::DuelMaster => "Duel Master",
            Self::DarkLord => "Dark Lord",
            Self::LordEmperor => "Lord Emperor",
        }
    }
}

/// Display name for a raw class code, with a fallback for codes the portal
/// does not know (custom server classes).
pub fn class_name(code: i32) -> &'static str {
    CharacterClass::from_code(code)
        .map(|c| c.display_name())
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_classes_resolve() {
        assert_eq!(CharacterClass::from_code(0), Some(CharacterClass::DarkWizard));
        assert_eq!(CharacterClass::from_code(16), Some(CharacterClass::DarkKnight));
        assert_eq!(CharacterClass::from_code(64), Some(CharacterClass::DarkLord));
    }

    #[test]
    fn evolved_classes_resolve() {
        assert_eq!(class_name(18), "Blade Master");
        assert_eq!(class_name(34), "High Elf");
        assert_eq!(class_name(49), "Duel Master");
    }

    #[test]
    fn unknown_code_falls_back() {
        assert_eq!(CharacterClass::from_code(99), None);
        assert_eq!(class_name(99), "Unknown");
    }
}
