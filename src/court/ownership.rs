//! Ownership state: team eviction, city control, and its economic effects
//!
//! `force_leave_team` and `transfer_city_control` are the only writers of
//! team membership and city flags inside the court. Everything else here is
//! a read that shops and the economy call on every transaction.

use crate::core::types::CharacterId;
use crate::realm::{Character, Realm};

/// Flat shop discount for members of the controlling team
pub const CONTROLLER_DISCOUNT_PERCENT: u32 = 10;

/// Remove a character from its team in one step
///
/// Clears team name, password, city flag and record counter together.
/// Returns the team the character left, or `None` if it had none.
pub fn force_leave_team(realm: &mut Realm, id: CharacterId) -> Option<String> {
    let character = realm.get_mut(id)?;
    if !character.has_team() {
        return None;
    }

    let team = std::mem::take(&mut character.team);
    character.team_password.clear();
    character.controls_city = false;
    character.team_record_days = 0;

    tracing::debug!(character = %character.name, team = %team, "forced out of team");

    // The last flag holder leaving ends the team's hold on the city
    if realm.city_controller() == Some(team.as_str())
        && !realm.characters.iter().any(|c| c.controls_city && c.team == team)
    {
        realm.city_controller = None;
    }

    Some(team)
}

/// Team currently holding the city
pub fn controlling_team(realm: &Realm) -> Option<&str> {
    realm.city_controller()
}

/// Living characters holding the city flag
pub fn city_controllers(realm: &Realm) -> Vec<&Character> {
    realm
        .characters
        .iter()
        .filter(|c| c.alive && c.controls_city)
        .collect()
}

/// Hand the city to `new_team`
///
/// Every flag is cleared first, so at most one team holds flags afterwards.
/// Living members of the new team get the flag and a fresh record counter.
pub fn transfer_city_control(realm: &mut Realm, new_team: &str) {
    for c in realm.characters.iter_mut() {
        if c.controls_city {
            c.controls_city = false;
            c.team_record_days = 0;
        }
    }

    for c in realm
        .characters
        .iter_mut()
        .filter(|c| c.alive && c.team == new_team && !new_team.is_empty())
    {
        c.controls_city = true;
        c.team_record_days = 0;
    }

    realm.city_controller = if new_team.is_empty() {
        None
    } else {
        Some(new_team.to_string())
    };
}

/// Shop discount in percent for a customer
pub fn shop_discount(realm: &Realm, id: CharacterId) -> u32 {
    match (realm.get(id), controlling_team(realm)) {
        (Some(c), Some(team)) if c.controls_city && c.team == team => CONTROLLER_DISCOUNT_PERCENT,
        _ => 0,
    }
}

/// Price a customer actually pays
pub fn apply_discount(realm: &Realm, price: i64, id: CharacterId) -> i64 {
    let discount = shop_discount(realm, id) as i64;
    price - price * discount / 100
}

/// Split the city tax on a sale among living controllers
///
/// The tax is the office's `city_tax_percent` of the sale. Each controller
/// is credited an equal whole share; the remainder is not collected.
/// Returns who was paid and how much.
pub fn process_sale_tax(realm: &mut Realm, sale_amount: i64) -> Vec<(CharacterId, i64)> {
    let percent = match &realm.office {
        Some(office) => office.city_tax_percent as i64,
        None => return Vec::new(),
    };

    let tax = sale_amount.max(0) * percent / 100;
    let controllers: Vec<CharacterId> = city_controllers(realm).iter().map(|c| c.id).collect();
    if tax == 0 || controllers.is_empty() {
        return Vec::new();
    }

    let share = tax / controllers.len() as i64;
    if share == 0 {
        return Vec::new();
    }

    let mut paid = Vec::with_capacity(controllers.len());
    for id in controllers {
        if let Some(c) = realm.get_mut(id) {
            c.gold += share;
            paid.push((id, share));
        }
    }
    paid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ControllerType, Sex};
    use crate::realm::RoyalOffice;

    fn member(id: u32, team: &str) -> Character {
        let mut c = Character::new(CharacterId(id), format!("Member{}", id));
        c.team = team.to_string();
        c.team_password = "secret".into();
        c
    }

    fn realm_with_red_in_control() -> Realm {
        let mut realm = Realm::with_characters(vec![
            member(1, "Red"),
            member(2, "Red"),
            member(3, "Blue"),
            member(4, "Blue"),
            Character::new(CharacterId(5), "Loner"),
        ]);
        transfer_city_control(&mut realm, "Red");
        realm
    }

    #[test]
    fn test_force_leave_team_clears_everything() {
        let mut realm = realm_with_red_in_control();
        realm.get_mut(CharacterId(1)).unwrap().team_record_days = 12;

        let left = force_leave_team(&mut realm, CharacterId(1));
        assert_eq!(left.as_deref(), Some("Red"));

        let c = realm.get(CharacterId(1)).unwrap();
        assert!(c.team.is_empty());
        assert!(c.team_password.is_empty());
        assert!(!c.controls_city);
        assert_eq!(c.team_record_days, 0);

        // Teammate still holds the city
        assert_eq!(controlling_team(&realm), Some("Red"));
        assert!(realm.check_invariants().is_ok());
    }

    #[test]
    fn test_last_controller_leaving_frees_city() {
        let mut realm = realm_with_red_in_control();
        force_leave_team(&mut realm, CharacterId(1));
        force_leave_team(&mut realm, CharacterId(2));
        assert_eq!(controlling_team(&realm), None);
        assert!(realm.check_invariants().is_ok());
    }

    #[test]
    fn test_force_leave_team_without_team_is_noop() {
        let mut realm = realm_with_red_in_control();
        assert_eq!(force_leave_team(&mut realm, CharacterId(5)), None);
        assert_eq!(force_leave_team(&mut realm, CharacterId(99)), None);
    }

    #[test]
    fn test_transfer_moves_every_flag() {
        let mut realm = realm_with_red_in_control();
        transfer_city_control(&mut realm, "Blue");

        assert_eq!(controlling_team(&realm), Some("Blue"));
        assert!(realm.team_members("Red").all(|c| !c.controls_city));
        assert!(realm.team_members("Blue").all(|c| c.controls_city));
        assert!(realm.check_invariants().is_ok());
    }

    #[test]
    fn test_discount_only_for_controllers() {
        let realm = realm_with_red_in_control();
        assert_eq!(shop_discount(&realm, CharacterId(1)), 10);
        assert_eq!(shop_discount(&realm, CharacterId(3)), 0);
        assert_eq!(shop_discount(&realm, CharacterId(5)), 0);
        assert_eq!(apply_discount(&realm, 1000, CharacterId(1)), 900);
        assert_eq!(apply_discount(&realm, 1000, CharacterId(3)), 1000);
    }

    #[test]
    fn test_sale_tax_split_among_living_controllers() {
        let mut realm = realm_with_red_in_control();
        let mut office =
            RoyalOffice::create_new_king(CharacterId(5), "Loner", ControllerType::Npc, Sex::Male);
        office.city_tax_percent = 10;
        realm.office = Some(office);

        let paid = process_sale_tax(&mut realm, 1000);
        assert_eq!(paid, vec![(CharacterId(1), 50), (CharacterId(2), 50)]);
        assert_eq!(realm.get(CharacterId(1)).unwrap().gold, 50);
        assert_eq!(realm.get(CharacterId(3)).unwrap().gold, 0);
    }

    #[test]
    fn test_sale_tax_needs_office_and_controllers() {
        let mut realm = realm_with_red_in_control();
        assert!(process_sale_tax(&mut realm, 1000).is_empty());

        realm.office = Some(RoyalOffice::create_new_king(
            CharacterId(5),
            "Loner",
            ControllerType::Npc,
            Sex::Male,
        ));
        transfer_city_control(&mut realm, "");
        assert!(process_sale_tax(&mut realm, 1000).is_empty());
    }
}
