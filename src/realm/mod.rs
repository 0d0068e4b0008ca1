//! Realm - the shared state the court politics act on
//!
//! Holds the character roster, the single throne slot, and the denormalized
//! name of the team that controls the city. The maintenance scheduler owns
//! one realm and hands it to the court services by reference.

pub mod character;
pub mod office;

pub use character::{Character, Whereabouts, MAX_PRISON_DAYS};
pub use office::{MonsterGuard, PrisonRecord, RoyalGuard, RoyalOffice};

use serde::{Deserialize, Serialize};

use crate::core::error::{CourtError, Result};
use crate::core::types::{CharacterId, Day};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Realm {
    /// Every character the court knows about, living or dead
    pub characters: Vec<Character>,
    /// The throne; `None` while it stands empty
    pub office: Option<RoyalOffice>,
    /// Team holding the city. Only the control transfer and team eviction
    /// write this; the per-character flags must agree with it.
    pub(crate) city_controller: Option<String>,
    /// Current maintenance day
    pub day: Day,
    next_character_id: u32,
}

impl Realm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a realm around an existing roster
    ///
    /// The controlling team is rebuilt from the characters' flags.
    pub fn with_characters(characters: Vec<Character>) -> Self {
        let next_character_id = characters.iter().map(|c| c.id.0).max().map_or(1, |m| m + 1);
        let city_controller = characters
            .iter()
            .find(|c| c.controls_city && c.has_team())
            .map(|c| c.team.clone());

        Self {
            characters,
            office: None,
            city_controller,
            day: 0,
            next_character_id: next_character_id.max(1),
        }
    }

    /// Generate a new unique CharacterId
    pub fn next_character_id(&mut self) -> CharacterId {
        let id = CharacterId(self.next_character_id.max(1));
        self.next_character_id = id.0 + 1;
        id
    }

    /// Add a character to the roster, assigning a fresh id
    pub fn spawn(&mut self, mut character: Character) -> CharacterId {
        let id = self.next_character_id();
        character.id = id;
        self.characters.push(character);
        id
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.iter_mut().find(|c| c.id == id)
    }

    /// Like `get`, for callers that cannot continue without the character
    pub fn require(&self, id: CharacterId) -> Result<&Character> {
        self.get(id).ok_or(CourtError::CharacterNotFound(id))
    }

    pub fn ruler_id(&self) -> Option<CharacterId> {
        self.office.as_ref().map(|o| o.ruler)
    }

    pub fn is_ruler(&self, id: CharacterId) -> bool {
        self.ruler_id() == Some(id)
    }

    /// Name of the team holding the city, if any
    pub fn city_controller(&self) -> Option<&str> {
        self.city_controller.as_deref()
    }

    /// Living members of a team
    pub fn team_members<'s, 't>(&'s self, team: &'t str) -> impl Iterator<Item = &'s Character> + 't
    where
        's: 't,
    {
        self.characters
            .iter()
            .filter(move |c| c.alive && !team.is_empty() && c.team == team)
    }

    /// Highest-level living member of a team (first on the roster wins ties)
    pub fn team_leader(&self, team: &str) -> Option<&Character> {
        self.team_members(team)
            .fold(None, |best: Option<&Character>, c| match best {
                Some(b) if b.level >= c.level => Some(b),
                _ => Some(c),
            })
    }

    /// Scan the roster and confirm every cross-entity invariant
    ///
    /// The court never relies on this at run time; it exists so tests and
    /// tooling can assert the denormalized state still agrees with the roster.
    pub fn check_invariants(&self) -> Result<()> {
        let marked: Vec<&Character> = self.characters.iter().filter(|c| c.is_ruler).collect();
        if marked.len() > 1 {
            return Err(CourtError::InvariantViolation(format!(
                "{} characters carry the ruler marker",
                marked.len()
            )));
        }

        match (&self.office, marked.first()) {
            (Some(office), Some(c)) if office.ruler != c.id => {
                return Err(CourtError::InvariantViolation(format!(
                    "office names {:?} but {} carries the ruler marker",
                    office.ruler, c.name
                )));
            }
            (None, Some(c)) => {
                return Err(CourtError::InvariantViolation(format!(
                    "{} carries the ruler marker with the throne empty",
                    c.name
                )));
            }
            _ => {}
        }

        if let Some(c) = marked.first() {
            if c.has_team() {
                return Err(CourtError::InvariantViolation(format!(
                    "ruler {} belongs to team {}",
                    c.name, c.team
                )));
            }
        }

        let mut flagged_team: Option<&str> = None;
        for c in self.characters.iter().filter(|c| c.controls_city) {
            if !c.has_team() {
                return Err(CourtError::InvariantViolation(format!(
                    "{} controls the city without a team",
                    c.name
                )));
            }
            match flagged_team {
                Some(t) if t != c.team => {
                    return Err(CourtError::InvariantViolation(format!(
                        "teams {} and {} both hold city flags",
                        t, c.team
                    )));
                }
                _ => flagged_team = Some(&c.team),
            }
        }

        if let Some(t) = flagged_team {
            if self.city_controller() != Some(t) {
                return Err(CourtError::InvariantViolation(format!(
                    "controller is {:?} but flags belong to {}",
                    self.city_controller(),
                    t
                )));
            }
            if let (Some(leader), Some(ruler)) = (self.team_leader(t), self.ruler_id()) {
                if leader.id == ruler {
                    return Err(CourtError::InvariantViolation(format!(
                        "ruler {} leads the controlling team {}",
                        leader.name, t
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ControllerType, Sex};

    fn member(id: u32, team: &str, level: u32) -> Character {
        let mut c = Character::new(CharacterId(id), format!("Member{}", id));
        c.team = team.to_string();
        c.level = level;
        c
    }

    #[test]
    fn test_spawn_assigns_unique_ids() {
        let mut realm = Realm::new();
        let a = realm.spawn(Character::new(CharacterId(0), "A"));
        let b = realm.spawn(Character::new(CharacterId(0), "B"));
        assert_ne!(a, b);
        assert_eq!(realm.get(b).map(|c| c.name.as_str()), Some("B"));
    }

    #[test]
    fn test_with_characters_rebuilds_controller() {
        let mut a = member(1, "Red", 5);
        a.controls_city = true;
        let realm = Realm::with_characters(vec![a, member(2, "Blue", 9)]);
        assert_eq!(realm.city_controller(), Some("Red"));

        let mut realm = realm;
        let id = realm.next_character_id();
        assert_eq!(id, CharacterId(3));
    }

    #[test]
    fn test_team_leader_is_highest_level_living_member() {
        let mut dead = member(3, "Red", 50);
        dead.alive = false;
        let realm = Realm::with_characters(vec![member(1, "Red", 5), member(2, "Red", 9), dead]);
        assert_eq!(realm.team_leader("Red").map(|c| c.id), Some(CharacterId(2)));
        assert!(realm.team_leader("").is_none());
    }

    #[test]
    fn test_team_leader_outlives_team_name() {
        let realm = Realm::with_characters(vec![member(1, "Red", 5), member(2, "Red", 9)]);
        let leader = {
            let team = String::from("Red");
            realm.team_leader(&team)
        };
        assert_eq!(leader.map(|c| c.id), Some(CharacterId(2)));
    }

    #[test]
    fn test_invariants_hold_for_empty_realm() {
        assert!(Realm::new().check_invariants().is_ok());
    }

    #[test]
    fn test_invariants_catch_teamed_ruler() {
        let mut ruler = member(1, "Red", 20);
        ruler.is_ruler = true;
        let mut realm = Realm::with_characters(vec![ruler]);
        realm.office = Some(RoyalOffice::create_new_king(
            CharacterId(1),
            "Member1",
            ControllerType::Npc,
            Sex::Male,
        ));
        assert!(realm.check_invariants().is_err());
    }

    #[test]
    fn test_invariants_catch_split_city_flags() {
        let mut a = member(1, "Red", 5);
        a.controls_city = true;
        let mut b = member(2, "Blue", 5);
        b.controls_city = true;
        let realm = Realm::with_characters(vec![a, b]);
        assert!(realm.check_invariants().is_err());
    }
}
