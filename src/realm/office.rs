//! RoyalOffice - the throne and everything that comes with it
//!
//! The office is an aggregate separate from the character who holds it.
//! It is linked to that character by id, never by name.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{CharacterId, ControllerType, Sex};

pub const DEFAULT_TAX_RATE: u32 = 10;
pub const DEFAULT_CITY_TAX_PERCENT: u32 = 5;

/// A hired guard standing between a challenger and the throne
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoyalGuard {
    pub name: String,
    pub salary: i64,
}

/// A monster kept at the gates; fights with its own stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterGuard {
    pub name: String,
    pub hp: i64,
    pub strength: i64,
    pub defence: i64,
    pub weapon_power: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrisonRecord {
    pub days: u32,
    pub crime: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoyalOffice {
    pub ruler: CharacterId,
    pub ruler_name: String,
    pub controller: ControllerType,
    pub sex: Sex,
    pub treasury: i64,
    /// Royal share of every taxed transaction, percent
    pub tax_rate: u32,
    /// Share of shop sales paid to the city-controlling team, percent
    pub city_tax_percent: u32,
    pub guards: Vec<RoyalGuard>,
    pub monster_guards: Vec<MonsterGuard>,
    pub days_in_power: u32,
    /// Prisoner name -> sentence
    pub prison: AHashMap<String, PrisonRecord>,
}

impl RoyalOffice {
    /// Fresh office for a new ruler: empty treasury, default taxes, no guards
    pub fn create_new_king(
        ruler: CharacterId,
        name: impl Into<String>,
        controller: ControllerType,
        sex: Sex,
    ) -> Self {
        Self {
            ruler,
            ruler_name: name.into(),
            controller,
            sex,
            treasury: 0,
            tax_rate: DEFAULT_TAX_RATE,
            city_tax_percent: DEFAULT_CITY_TAX_PERCENT,
            guards: Vec::new(),
            monster_guards: Vec::new(),
            days_in_power: 0,
            prison: AHashMap::new(),
        }
    }

    pub fn title(&self) -> &'static str {
        self.sex.royal_title()
    }

    /// Record a prisoner in the ledger, replacing any earlier entry
    pub fn imprison_character(&mut self, name: &str, days: u32, crime: impl Into<String>) {
        self.prison.insert(
            name.to_string(),
            PrisonRecord {
                days,
                crime: crime.into(),
            },
        );
    }

    pub fn release_prisoner(&mut self, name: &str) -> Option<PrisonRecord> {
        self.prison.remove(name)
    }

    pub fn hire_guard(&mut self, name: impl Into<String>, salary: i64) {
        self.guards.push(RoyalGuard {
            name: name.into(),
            salary,
        });
    }

    pub fn add_monster_guard(&mut self, monster: MonsterGuard) {
        self.monster_guards.push(monster);
    }

    /// Credit the royal share of a transaction to the treasury
    ///
    /// Returns the amount collected.
    pub fn collect_tax(&mut self, amount: i64) -> i64 {
        let share = amount.max(0) * self.tax_rate as i64 / 100;
        self.treasury += share;
        share
    }
}
