//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Unique identifier for characters (players and NPCs alike)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharacterId(pub u32);

impl CharacterId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Maintenance day counter (one per scheduler tick)
pub type Day = u32;

/// Who drives a character's decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControllerType {
    Human,
    Npc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Title used by narration for the holder of the throne
    pub fn royal_title(&self) -> &'static str {
        match self {
            Sex::Male => "King",
            Sex::Female => "Queen",
        }
    }
}
