//! Player-initiated throne attempts
//!
//! The location layer calls this when a human walks into the throne room.
//! It applies the same invariants as the autonomous path (a would-be ruler
//! leaves their team first) and tells the player what stands in the way.
//! The fight itself is run by the interactive combat handler.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::ChallengeConfig;
use crate::core::error::Result;
use crate::core::types::CharacterId;
use crate::court::chronicle::{NarrativeSink, NewsCategory};
use crate::court::consequences::seat_claimant;
use crate::court::ownership::force_leave_team;
use crate::realm::Realm;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerChallengeResult {
    /// The attempt may go ahead (or the empty throne was taken)
    pub success: bool,
    pub message: String,
    pub had_to_leave_team: bool,
    /// Monsters the player will face at the gate
    pub fought_monsters: u32,
    /// Royal guards the player will face in the halls
    pub fought_guards: u32,
    pub damage_dealt: i64,
    pub damage_taken: i64,
}

impl PlayerChallengeResult {
    fn refused(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }
}

/// Validate and prepare a player's bid for the throne
///
/// Errors only if `player` is not on the roster.
pub async fn player_throne_challenge<R: Rng>(
    realm: &mut Realm,
    player: CharacterId,
    config: &ChallengeConfig,
    rng: &mut R,
    log: &mut dyn NarrativeSink,
) -> Result<PlayerChallengeResult> {
    let character = realm.require(player)?;
    let name = character.name.clone();

    if !character.alive {
        return Ok(PlayerChallengeResult::refused("The dead do not sit on thrones."));
    }
    if realm.is_ruler(player) || character.is_ruler {
        return Ok(PlayerChallengeResult::refused("You already rule this realm."));
    }
    if character.is_imprisoned() {
        return Ok(PlayerChallengeResult::refused(
            "You cannot challenge the throne from a prison cell.",
        ));
    }

    let mut result = PlayerChallengeResult::default();
    let mut message = String::new();

    if let Some(team) = force_leave_team(realm, player) {
        result.had_to_leave_team = true;
        message.push_str(&format!(
            "You leave {}; a ruler may not belong to a team. ",
            team
        ));
        log.record(
            NewsCategory::Team,
            format!("{} left {} to challenge the throne.", name, team),
        );
    }

    let Some(office) = realm.office.as_ref() else {
        seat_claimant(realm, player, config, rng, log);
        message.push_str("The throne stands empty. You claim it without a fight!");
        result.success = true;
        result.message = message;
        return Ok(result);
    };

    result.fought_monsters = office.monster_guards.len() as u32;
    result.fought_guards = office.guards.len() as u32;
    message.push_str(&format!(
        "{} {} is defended by {} monsters and {} guards.",
        office.title(),
        office.ruler_name,
        result.fought_monsters,
        result.fought_guards
    ));
    tracing::info!(
        player = %name,
        monsters = result.fought_monsters,
        guards = result.fought_guards,
        "player throne challenge"
    );

    result.success = true;
    result.message = message;
    Ok(result)
}
