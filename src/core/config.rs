//! Challenge configuration with documented constants
//!
//! All magic numbers of the throne and city politics are collected here
//! with explanations of their purpose and how they interact with each other.
//! The orchestrator receives one of these at construction time; nothing reads
//! a process-wide copy.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{CourtError, Result};

/// Tunables for autonomous throne and city challenges
///
/// These values reproduce the pacing of the live game.
/// Changing them will affect how often the throne and the city change hands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChallengeConfig {
    // === SCHEDULING ===
    /// Chance per maintenance tick that an NPC challenges the throne
    ///
    /// At 0.05 a throne challenge is attempted roughly once every 20 ticks.
    pub throne_challenge_chance: f64,

    /// Chance per maintenance tick that a team challenges for the city
    ///
    /// Drawn independently of the throne roll, so both may happen in one tick.
    pub city_challenge_chance: f64,

    // === THRONE CANDIDATES ===
    /// Minimum level for an NPC to challenge a sitting ruler
    pub throne_min_level: u32,

    /// Ambition an NPC needs before it considers the throne at all
    pub throne_min_ambition: f32,

    /// Ambition a teamed NPC needs before it abandons its team for the throne
    ///
    /// Must be above `throne_min_ambition`, otherwise the team gate never bites.
    pub team_abandon_ambition: f32,

    /// How many of the strongest candidates enter the random draw
    pub throne_candidate_pool: usize,

    // === EMPTY THRONE ===
    /// Minimum level to claim a vacant throne
    pub claim_min_level: u32,

    /// Ambition needed to claim a vacant throne when no teamless candidate exists
    pub claim_fallback_ambition: f32,

    /// Starting treasury range for a claimed throne (inclusive)
    pub claim_treasury_min: i64,
    pub claim_treasury_max: i64,

    /// Starting tax rate range for a claimed throne, percent (inclusive)
    pub claim_tax_rate_min: u32,
    pub claim_tax_rate_max: u32,

    // === CITY ===
    /// Smallest team (living members) allowed to challenge for the city
    pub city_min_team_size: usize,

    /// How many of the strongest teams enter the random draw
    pub city_candidate_pool: usize,

    /// Independent noise applied to each side's aggregate power
    ///
    /// At 0.2 each aggregate is scaled by a factor drawn from [0.8, 1.2].
    pub city_power_noise: f64,

    /// Chance that a losing team's leader is jailed
    pub city_loss_imprison_chance: f64,

    /// Sentence for a failed city takeover, in days
    pub city_loss_sentence_days: u32,

    // === CONSEQUENCES ===
    /// Sentence handed to a deposed ruler, in days
    pub deposed_sentence_days: u32,
}

impl Default for ChallengeConfig {
    fn default() -> Self {
        Self {
            // Scheduling
            throne_challenge_chance: 0.05,
            city_challenge_chance: 0.08,

            // Throne candidates
            throne_min_level: 15,
            throne_min_ambition: 0.6,
            team_abandon_ambition: 0.8,
            throne_candidate_pool: 5,

            // Empty throne
            claim_min_level: 10,
            claim_fallback_ambition: 0.7,
            claim_treasury_min: 5_000,
            claim_treasury_max: 20_000,
            claim_tax_rate_min: 10,
            claim_tax_rate_max: 30,

            // City
            city_min_team_size: 2,
            city_candidate_pool: 3,
            city_power_noise: 0.2,
            city_loss_imprison_chance: 0.3,
            city_loss_sentence_days: 3,

            // Consequences
            deposed_sentence_days: 14,
        }
    }
}

impl ChallengeConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ChallengeConfig = toml::from_str(content)?;
        config.validate().map_err(CourtError::InvalidConfig)?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        for (name, p) in [
            ("throne_challenge_chance", self.throne_challenge_chance),
            ("city_challenge_chance", self.city_challenge_chance),
            ("city_loss_imprison_chance", self.city_loss_imprison_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("{} ({}) must be within [0, 1]", name, p));
            }
        }

        if self.team_abandon_ambition < self.throne_min_ambition {
            return Err(format!(
                "team_abandon_ambition ({}) should be >= throne_min_ambition ({})",
                self.team_abandon_ambition, self.throne_min_ambition
            ));
        }

        if self.throne_candidate_pool == 0 || self.city_candidate_pool == 0 {
            return Err("Candidate pools must hold at least one entry".into());
        }

        if self.claim_treasury_min > self.claim_treasury_max
            || self.claim_tax_rate_min > self.claim_tax_rate_max
        {
            return Err("Claim ranges must have min <= max".into());
        }

        if !(0.0..1.0).contains(&self.city_power_noise) {
            return Err(format!(
                "city_power_noise ({}) must be within [0, 1)",
                self.city_power_noise
            ));
        }

        Ok(())
    }
}
