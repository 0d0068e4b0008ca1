//! Throne assault resolution
//!
//! A challenger fights through three phases in order: the monsters at the
//! gate, the royal guards, then the ruler. Hit points carry over between
//! phases and never heal. Losing any duel ends the assault on the spot.
//! Defeated monsters and guards are struck from the office's rosters as
//! they fall, and stay struck even if the assault fails later.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::court::chronicle::{NarrativeSink, NewsCategory};
use crate::realm::{Character, RoyalOffice};

/// Synthesized royal guard strength range (inclusive)
pub const GUARD_STRENGTH: (i64, i64) = (50, 99);
/// Synthesized royal guard hit point range (inclusive)
pub const GUARD_HP: (i64, i64) = (200, 399);
/// Synthesized ruler strength range (inclusive)
pub const RULER_STRENGTH: (i64, i64) = (100, 199);
/// Synthesized ruler hit point range (inclusive)
pub const RULER_HP: (i64, i64) = (500, 999);
/// Ruler's bonus damage die (inclusive)
pub const RULER_BONUS_DIE: (i64, i64) = (10, 30);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThronePhase {
    MonsterGuards,
    RoyalGuards,
    Ruler,
}

/// Result of a throne assault
///
/// `success` is the contract; the rest is bookkeeping for reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThroneOutcome {
    pub success: bool,
    /// Furthest phase the challenger reached
    pub phase: ThronePhase,
    pub monsters_defeated: u32,
    pub guards_defeated: u32,
    pub damage_dealt: i64,
    pub damage_taken: i64,
    /// Challenger hit points when the assault ended
    pub challenger_hp: i64,
}

/// One opponent in a duel
#[derive(Debug, Clone, Copy)]
struct Opponent {
    hp: i64,
    attack: i64,
    defence: i64,
    bonus_die: (i64, i64),
}

/// The challenger's side, fixed at the start of the assault
#[derive(Debug)]
struct Assailant {
    hp: i64,
    attack: i64,
    defence: i64,
    weapon_power: i64,
    damage_dealt: i64,
    damage_taken: i64,
}

impl Assailant {
    fn from_character(c: &Character) -> Self {
        Self {
            hp: c.hp,
            attack: c.attack_power(),
            defence: c.total_defence(),
            weapon_power: c.weapon_power,
            damage_dealt: 0,
            damage_taken: 0,
        }
    }

    /// Alternate blows, challenger first, until one side drops
    ///
    /// Returns true if the opponent fell.
    fn duel<R: Rng>(&mut self, mut foe: Opponent, bonus_max: i64, rng: &mut R) -> bool {
        loop {
            let hit = (self.attack - foe.defence).max(1) + rng.gen_range(1..=bonus_max);
            foe.hp -= hit;
            self.damage_dealt += hit;
            if foe.hp <= 0 {
                return true;
            }

            let back = (foe.attack - self.defence).max(1)
                + rng.gen_range(foe.bonus_die.0..=foe.bonus_die.1);
            self.hp -= back;
            self.damage_taken += back;
            if self.hp <= 0 {
                return false;
            }
        }
    }
}

/// Run a full throne assault against the sitting office
pub fn resolve_throne_challenge<R: Rng>(
    challenger: &Character,
    office: &mut RoyalOffice,
    rng: &mut R,
    log: &mut dyn NarrativeSink,
) -> ThroneOutcome {
    let mut me = Assailant::from_character(challenger);
    let mut outcome = ThroneOutcome {
        success: false,
        phase: ThronePhase::MonsterGuards,
        monsters_defeated: 0,
        guards_defeated: 0,
        damage_dealt: 0,
        damage_taken: 0,
        challenger_hp: me.hp,
    };

    if me.hp <= 0 {
        return outcome;
    }

    let light_die = (me.weapon_power / 3).max(2);
    let heavy_die = (me.weapon_power / 2).max(2);

    // Phase 1: monsters
    while let Some(monster) = office.monster_guards.first().cloned() {
        let foe = Opponent {
            hp: monster.hp,
            attack: monster.strength + monster.weapon_power,
            defence: monster.defence,
            bonus_die: (1, (monster.weapon_power / 3).max(2)),
        };
        if !me.duel(foe, light_die, rng) {
            log.record(
                NewsCategory::Royal,
                format!("{} was slain by the {} guarding the castle gate.", challenger.name, monster.name),
            );
            return finish(outcome, &me, false);
        }
        office.monster_guards.remove(0);
        outcome.monsters_defeated += 1;
        tracing::debug!(challenger = %challenger.name, monster = %monster.name, hp = me.hp, "monster guard defeated");
    }

    // Phase 2: royal guards
    outcome.phase = ThronePhase::RoyalGuards;
    while let Some(guard) = office.guards.first().cloned() {
        let foe = Opponent {
            hp: rng.gen_range(GUARD_HP.0..=GUARD_HP.1),
            attack: rng.gen_range(GUARD_STRENGTH.0..=GUARD_STRENGTH.1),
            defence: 0,
            bonus_die: (1, 2),
        };
        if !me.duel(foe, light_die, rng) {
            log.record(
                NewsCategory::Royal,
                format!("The royal guard {} cut down {} in the castle halls.", guard.name, challenger.name),
            );
            return finish(outcome, &me, false);
        }
        office.guards.remove(0);
        outcome.guards_defeated += 1;
        tracing::debug!(challenger = %challenger.name, guard = %guard.name, hp = me.hp, "royal guard defeated");
    }

    // Phase 3: the ruler
    outcome.phase = ThronePhase::Ruler;
    let ruler = Opponent {
        hp: rng.gen_range(RULER_HP.0..=RULER_HP.1),
        attack: rng.gen_range(RULER_STRENGTH.0..=RULER_STRENGTH.1),
        defence: 0,
        bonus_die: RULER_BONUS_DIE,
    };
    let won = me.duel(ruler, heavy_die, rng);
    if won {
        log.record(
            NewsCategory::Royal,
            format!("{} has defeated {} {} in single combat!", challenger.name, office.title(), office.ruler_name),
        );
    } else {
        log.record(
            NewsCategory::Royal,
            format!("{} {} repelled an assault by {}.", office.title(), office.ruler_name, challenger.name),
        );
    }

    finish(outcome, &me, won)
}

fn finish(mut outcome: ThroneOutcome, me: &Assailant, success: bool) -> ThroneOutcome {
    outcome.success = success && me.hp > 0;
    outcome.damage_dealt = me.damage_dealt;
    outcome.damage_taken = me.damage_taken;
    outcome.challenger_hp = me.hp;
    outcome
}
