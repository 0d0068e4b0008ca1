//! Autonomous challenges run once per maintenance tick
//!
//! The orchestrator owns the random stream every autonomous challenge draws
//! from. Each tick it rolls for a throne challenge and for a city challenge
//! independently, picks the challengers, and hands them to the resolution
//! engines and the consequence applier.

use ahash::AHashMap;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::ChallengeConfig;
use crate::core::types::CharacterId;
use crate::court::chronicle::{NarrativeSink, NewsCategory};
use crate::court::city::challenge_for_city_control;
use crate::court::consequences::{claim_empty_throne, crown_new_king};
use crate::court::ownership::{controlling_team, force_leave_team};
use crate::court::throne::resolve_throne_challenge;
use crate::realm::{Character, Realm};

/// What happened to the throne this tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ThroneActivity {
    /// The roll said no challenge today
    Quiet,
    /// Someone took the empty throne without a fight
    Claimed(CharacterId),
    NoCandidate,
    /// The chosen challenger would not leave their team
    Abandoned(CharacterId),
    Repelled(CharacterId),
    Usurped(CharacterId),
}

/// What happened to the city this tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CityActivity {
    Quiet,
    NoCandidate,
    /// The chosen team is led by the ruler
    RulerRejected(String),
    Taken(String),
    Held(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceReport {
    pub throne: ThroneActivity,
    pub city: CityActivity,
}

pub struct ChallengeOrchestrator {
    config: ChallengeConfig,
    rng: ChaCha8Rng,
}

impl ChallengeOrchestrator {
    pub fn new(config: ChallengeConfig, rng: ChaCha8Rng) -> Self {
        Self { config, rng }
    }

    pub fn from_seed(config: ChallengeConfig, seed: u64) -> Self {
        Self::new(config, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn config(&self) -> &ChallengeConfig {
        &self.config
    }

    /// Run one tick of autonomous politics
    ///
    /// The report is informational; every effect has already been applied
    /// to `realm` and narrated to `log` when this returns.
    pub fn process_maintenance_challenges(
        &mut self,
        realm: &mut Realm,
        log: &mut dyn NarrativeSink,
    ) -> MaintenanceReport {
        let throne_roll = self.rng.gen_bool(self.config.throne_challenge_chance);
        let city_roll = self.rng.gen_bool(self.config.city_challenge_chance);

        let throne = if !throne_roll {
            ThroneActivity::Quiet
        } else if realm.office.is_none() {
            match claim_empty_throne(realm, &self.config, &mut self.rng, log) {
                Some(id) => ThroneActivity::Claimed(id),
                None => ThroneActivity::NoCandidate,
            }
        } else {
            self.run_throne_challenge(realm, log)
        };

        let city = if city_roll {
            self.run_city_challenge(realm, log)
        } else {
            CityActivity::Quiet
        };

        MaintenanceReport { throne, city }
    }

    fn run_throne_challenge(&mut self, realm: &mut Realm, log: &mut dyn NarrativeSink) -> ThroneActivity {
        let Some(id) = select_throne_challenger(realm, &self.config, &mut self.rng) else {
            tracing::debug!("no eligible throne challenger");
            return ThroneActivity::NoCandidate;
        };
        let Some(challenger) = realm.get(id).cloned() else {
            return ThroneActivity::NoCandidate;
        };

        if challenger.has_team() {
            if challenger.ambition <= self.config.team_abandon_ambition {
                tracing::debug!(challenger = %challenger.name, "not ambitious enough to leave team");
                return ThroneActivity::Abandoned(id);
            }
            if let Some(team) = force_leave_team(realm, id) {
                log.record(
                    NewsCategory::Team,
                    format!("{} left {} to make a bid for the throne.", challenger.name, team),
                );
            }
        }

        log.record(
            NewsCategory::Royal,
            format!("{} is storming the castle to seize the throne!", challenger.name),
        );
        tracing::info!(challenger = %challenger.name, level = challenger.level, "throne challenge");

        let Some(office) = realm.office.as_mut() else {
            return ThroneActivity::NoCandidate;
        };
        let outcome = resolve_throne_challenge(&challenger, office, &mut self.rng, log);

        if !outcome.success {
            return ThroneActivity::Repelled(id);
        }

        if let Err(e) = crown_new_king(realm, id, &self.config, log) {
            tracing::warn!(error = %e, "crowning failed after a won challenge");
            return ThroneActivity::Repelled(id);
        }
        ThroneActivity::Usurped(id)
    }

    fn run_city_challenge(&mut self, realm: &mut Realm, log: &mut dyn NarrativeSink) -> CityActivity {
        let Some(team) = select_city_challenger(realm, &self.config, &mut self.rng) else {
            tracing::debug!("no team able to challenge for the city");
            return CityActivity::NoCandidate;
        };

        let Some(leader) = realm.team_leader(&team).map(|c| c.id) else {
            return CityActivity::NoCandidate;
        };
        if realm.is_ruler(leader) {
            tracing::info!(team = %team, "city challenge dropped: team is led by the ruler");
            return CityActivity::RulerRejected(team);
        }

        if challenge_for_city_control(realm, leader, &team, &self.config, &mut self.rng, log) {
            CityActivity::Taken(team)
        } else {
            CityActivity::Held(team)
        }
    }
}

fn throne_candidate(c: &Character, realm: &Realm, config: &ChallengeConfig) -> bool {
    c.alive
        && c.level >= config.throne_min_level
        && !c.is_imprisoned()
        && !c.is_ruler
        && !realm.is_ruler(c.id)
        && !c.reserved
        && c.ambition > config.throne_min_ambition
}

/// Draw a throne challenger from the strongest eligible characters
pub fn select_throne_challenger<R: Rng>(
    realm: &Realm,
    config: &ChallengeConfig,
    rng: &mut R,
) -> Option<CharacterId> {
    let mut pool: Vec<&Character> = realm
        .characters
        .iter()
        .filter(|c| throne_candidate(c, realm, config))
        .collect();
    if pool.is_empty() {
        return None;
    }

    pool.sort_by_key(|c| std::cmp::Reverse(c.might()));
    pool.truncate(config.throne_candidate_pool);
    Some(pool[rng.gen_range(0..pool.len())].id)
}

/// Draw a challenging team from the strongest teams not holding the city
pub fn select_city_challenger<R: Rng>(
    realm: &Realm,
    config: &ChallengeConfig,
    rng: &mut R,
) -> Option<String> {
    let mut teams: AHashMap<&str, (usize, i64)> = AHashMap::new();
    for c in realm.characters.iter().filter(|c| c.alive && c.has_team()) {
        let entry = teams.entry(c.team.as_str()).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += c.might();
    }

    let controller = controlling_team(realm);
    let mut ranked: Vec<(&str, i64)> = teams
        .into_iter()
        .filter(|(_, (members, _))| *members >= config.city_min_team_size)
        .filter(|(name, _)| Some(*name) != controller)
        .map(|(name, (_, power))| (name, power))
        .collect();
    if ranked.is_empty() {
        return None;
    }

    // Hash order is not stable; break ties by name
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(config.city_candidate_pool);
    Some(ranked[rng.gen_range(0..ranked.len())].0.to_string())
}
