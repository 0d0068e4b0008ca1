//! Character records consumed by the court
//!
//! Players and NPCs share one record type. Only the fields the throne and
//! city politics read or write live here; the wider simulation owns the rest.

use serde::{Deserialize, Serialize};

use crate::core::types::{CharacterId, ControllerType, Sex};

/// Longest sentence a character can carry
pub const MAX_PRISON_DAYS: u8 = u8::MAX;

/// Where a character currently is, as far as the court cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Whereabouts {
    Free,
    Prison,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub controller: ControllerType,
    pub sex: Sex,

    // Team membership (empty string = no team)
    pub team: String,
    pub team_password: String,
    pub controls_city: bool,
    /// Days the character's team has held the city
    pub team_record_days: u32,

    pub is_ruler: bool,
    pub alive: bool,
    /// Kept out of rulership by the story
    pub reserved: bool,

    // Combat stats
    pub level: u32,
    pub strength: i64,
    pub defence: i64,
    pub weapon_power: i64,
    pub armor_power: i64,
    pub charisma: i64,
    pub hp: i64,
    pub max_hp: i64,

    pub gold: i64,
    /// Personality trait in [0, 1]
    pub ambition: f32,

    // Imprisonment
    pub prison_days: u8,
    pub cell_open: bool,
    pub rescue_pending: bool,
    pub whereabouts: Whereabouts,
}

impl Character {
    /// A free, teamless, living NPC with modest stats
    pub fn new(id: CharacterId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            controller: ControllerType::Npc,
            sex: Sex::Male,
            team: String::new(),
            team_password: String::new(),
            controls_city: false,
            team_record_days: 0,
            is_ruler: false,
            alive: true,
            reserved: false,
            level: 1,
            strength: 10,
            defence: 5,
            weapon_power: 0,
            armor_power: 0,
            charisma: 10,
            hp: 100,
            max_hp: 100,
            gold: 0,
            ambition: 0.0,
            prison_days: 0,
            cell_open: false,
            rescue_pending: false,
            whereabouts: Whereabouts::Free,
        }
    }

    pub fn has_team(&self) -> bool {
        !self.team.is_empty()
    }

    pub fn is_imprisoned(&self) -> bool {
        self.whereabouts == Whereabouts::Prison || self.prison_days > 0
    }

    /// Ranking score for throne candidates
    pub fn might(&self) -> i64 {
        self.level as i64 + self.strength
    }

    /// Contribution to a team's aggregate power in a city contest
    pub fn city_power(&self) -> i64 {
        self.level as i64 + self.strength + self.defence
    }

    /// Strength plus weapon, fixed for the length of a throne assault
    pub fn attack_power(&self) -> i64 {
        self.strength + self.weapon_power
    }

    /// Defence plus armour, fixed for the length of a throne assault
    pub fn total_defence(&self) -> i64 {
        self.defence + self.armor_power
    }
}
