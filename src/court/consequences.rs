//! Consequences of resolved challenges
//!
//! Crowning, deposition, empty-throne claims and imprisonment. These are the
//! only places where the throne slot and the ruler marker change.

use rand::Rng;

use crate::core::config::ChallengeConfig;
use crate::core::error::Result;
use crate::core::types::CharacterId;
use crate::court::chronicle::{NarrativeSink, NewsCategory};
use crate::court::ownership::force_leave_team;
use crate::realm::{Character, Realm, RoyalOffice, Whereabouts, MAX_PRISON_DAYS};

pub const DEPOSED_CRIME: &str = "Deposed";

/// Put a character in a closed cell
///
/// The sentence is capped at 255 days. When a throne exists the prisoner is
/// also written into its ledger. Returns false if the character is unknown.
pub fn imprison_character(
    realm: &mut Realm,
    id: CharacterId,
    days: u32,
    reason: &str,
    log: &mut dyn NarrativeSink,
) -> bool {
    let days = days.min(MAX_PRISON_DAYS as u32);
    let Some(prisoner) = realm.get_mut(id) else {
        tracing::debug!(?id, "cannot imprison unknown character");
        return false;
    };

    prisoner.prison_days = days as u8;
    prisoner.whereabouts = Whereabouts::Prison;
    prisoner.cell_open = false;
    prisoner.rescue_pending = false;
    let name = prisoner.name.clone();

    if let Some(office) = realm.office.as_mut() {
        office.imprison_character(&name, days, reason);
    }

    log.record(
        NewsCategory::Prison,
        format!("{} was thrown in prison for {} days ({}).", name, days, reason),
    );
    tracing::info!(prisoner = %name, days, reason, "imprisoned");
    true
}

/// Seat `new_ruler` on the throne, deposing whoever held it
///
/// The new ruler leaves any team first. The new office inherits half the
/// old treasury and the old tax settings; guards and the old ledger are
/// discarded. The predecessor loses the ruler marker and is jailed for the
/// deposition sentence whatever way the throne was lost. A predecessor who
/// is no longer on the roster is skipped without failing the crowning.
pub fn crown_new_king(
    realm: &mut Realm,
    new_ruler: CharacterId,
    config: &ChallengeConfig,
    log: &mut dyn NarrativeSink,
) -> Result<()> {
    realm.require(new_ruler)?;
    if realm.is_ruler(new_ruler) {
        return Ok(());
    }

    force_leave_team(realm, new_ruler);

    let Some(ruler) = realm.get_mut(new_ruler) else {
        return Ok(());
    };
    ruler.is_ruler = true;
    let mut office = RoyalOffice::create_new_king(ruler.id, ruler.name.clone(), ruler.controller, ruler.sex);
    let title = office.title();
    let ruler_name = ruler.name.clone();

    let predecessor = realm.office.take();
    if let Some(old) = &predecessor {
        office.treasury = old.treasury / 2;
        office.tax_rate = old.tax_rate;
        office.city_tax_percent = old.city_tax_percent;
    }
    realm.office = Some(office);

    log.record(
        NewsCategory::Royal,
        format!("{} has been crowned {}!", ruler_name, title),
    );
    tracing::info!(ruler = %ruler_name, "crowned");

    let Some(old) = predecessor else {
        return Ok(());
    };

    match realm.get_mut(old.ruler) {
        Some(deposed) => {
            deposed.is_ruler = false;
            imprison_character(realm, old.ruler, config.deposed_sentence_days, DEPOSED_CRIME, log);
        }
        None => {
            tracing::debug!(predecessor = %old.ruler_name, "deposed ruler no longer on the roster");
            if let Some(office) = realm.office.as_mut() {
                office.imprison_character(&old.ruler_name, config.deposed_sentence_days, DEPOSED_CRIME);
            }
        }
    }

    Ok(())
}

fn eligible_claimant(c: &Character, min_level: u32) -> bool {
    c.alive && c.level >= min_level && !c.reserved
}

/// Pick who claims a vacant throne
///
/// Teamless, free characters ranked by level + charisma come first. If none
/// qualify, any character with enough ambition ranked by level will do.
pub fn select_claimant(realm: &Realm, config: &ChallengeConfig) -> Option<CharacterId> {
    let mut primary: Vec<&Character> = realm
        .characters
        .iter()
        .filter(|c| eligible_claimant(c, config.claim_min_level))
        .filter(|c| !c.has_team() && !c.is_imprisoned())
        .collect();
    primary.sort_by_key(|c| std::cmp::Reverse(c.level as i64 + c.charisma));
    if let Some(c) = primary.first() {
        return Some(c.id);
    }

    let mut fallback: Vec<&Character> = realm
        .characters
        .iter()
        .filter(|c| eligible_claimant(c, config.claim_min_level))
        .filter(|c| c.ambition > config.claim_fallback_ambition)
        .collect();
    fallback.sort_by_key(|c| std::cmp::Reverse(c.level));
    fallback.first().map(|c| c.id)
}

/// Seat a claimant on an empty throne without a fight
///
/// Does nothing while a throne exists. The new office starts with a random
/// treasury and tax rate from the configured ranges.
pub fn claim_empty_throne<R: Rng>(
    realm: &mut Realm,
    config: &ChallengeConfig,
    rng: &mut R,
    log: &mut dyn NarrativeSink,
) -> Option<CharacterId> {
    if realm.office.is_some() {
        return None;
    }

    let Some(id) = select_claimant(realm, config) else {
        tracing::debug!("throne is empty but nobody can claim it");
        return None;
    };
    seat_claimant(realm, id, config, rng, log);
    Some(id)
}

/// Seat a specific character on the empty throne
pub(crate) fn seat_claimant<R: Rng>(
    realm: &mut Realm,
    id: CharacterId,
    config: &ChallengeConfig,
    rng: &mut R,
    log: &mut dyn NarrativeSink,
) {
    force_leave_team(realm, id);
    let Some(claimant) = realm.get_mut(id) else {
        return;
    };
    claimant.is_ruler = true;

    let mut office =
        RoyalOffice::create_new_king(claimant.id, claimant.name.clone(), claimant.controller, claimant.sex);
    office.treasury = rng.gen_range(config.claim_treasury_min..=config.claim_treasury_max);
    office.tax_rate = rng.gen_range(config.claim_tax_rate_min..=config.claim_tax_rate_max);

    log.record(
        NewsCategory::Royal,
        format!("{} has claimed the empty throne and rules as {}.", claimant.name, office.title()),
    );
    tracing::info!(ruler = %claimant.name, treasury = office.treasury, "empty throne claimed");
    realm.office = Some(office);
}
