//! Character entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use muweb_core::classes::class_name;
use muweb_core::types::{DbId, Timestamp};

/// Full character row from the `characters` table.
#[derive(Debug, Clone, FromRow)]
pub struct Character {
    pub id: DbId,
    pub account_id: DbId,
    pub name: String,
    pub class_code: i32,
    pub level: i32,
    pub experience: i64,
    pub resets: i32,
    pub level_up_points: i32,
    pub strength: i32,
    pub agility: i32,
    pub vitality: i32,
    pub energy: i32,
    pub zen: i64,
    pub pk_level: i32,
    pub pk_kills: i32,
    pub guild_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Full character view for the owner and staff.
#[derive(Debug, Clone, Serialize)]
pub struct CharacterResponse {
    pub name: String,
    pub class: &'static str,
    pub class_code: i32,
    pub level: i32,
    pub resets: i32,
    pub level_up_points: i32,
    pub strength: i32,
    pub agility: i32,
    pub vitality: i32,
    pub energy: i32,
    pub zen: i64,
    pub pk_level: i32,
    pub pk_kills: i32,
    pub guild: Option<String>,
}

/// Public character card: no stat internals, no zen.
#[derive(Debug, Clone, Serialize)]
pub struct CharacterCard {
    pub name: String,
    pub class: &'static str,
    pub level: i32,
    pub resets: i32,
    pub pk_kills: i32,
    pub guild: Option<String>,
}

impl Character {
    /// Build the full (owner/staff) view, with the guild name resolved by
    /// the caller.
    pub fn to_response(&self, guild: Option<String>) -> CharacterResponse {
        CharacterResponse {
            name: self.name.clone(),
            class: class_name(self.class_code),
            class_code: self.class_code,
            level: self.level,
            resets: self.resets,
            level_up_points: self.level_up_points,
            strength: self.strength,
            agility: self.agility,
            vitality: self.vitality,
            energy: self.energy,
            zen: self.zen,
            pk_level: self.pk_level,
            pk_kills: self.pk_kills,
            guild,
        }
    }

    /// Build the public card view.
    pub fn to_card(&self, guild: Option<String>) -> CharacterCard {
        CharacterCard {
            name: self.name.clone(),
            class: class_name(self.class_code),
            level: self.level,
            resets: self.resets,
            pk_kills: self.pk_kills,
            guild,
        }
    }
}

/// DTO for an admin character edit. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct AdminUpdateCharacter {
    pub level: Option<i32>,
    pub resets: Option<i32>,
    pub level_up_points: Option<i32>,
    pub strength: Option<i32>,
    pub agility: Option<i32>,
    pub vitality: Option<i32>,
    pub energy: Option<i32>,
    pub zen: Option<i64>,
}
