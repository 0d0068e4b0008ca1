//! Daily upkeep of the court: reign length, city records, prison sentences

use crate::court::chronicle::{NarrativeSink, NewsCategory};
use crate::realm::{Realm, Whereabouts};

/// Advance the realm by one maintenance day
///
/// Returns the names of prisoners released today.
pub fn advance_day(realm: &mut Realm, log: &mut dyn NarrativeSink) -> Vec<String> {
    realm.day += 1;

    if let Some(office) = realm.office.as_mut() {
        office.days_in_power += 1;
        office.prison.retain(|_, record| {
            record.days = record.days.saturating_sub(1);
            record.days > 0
        });
    }

    let mut released = Vec::new();
    for c in realm.characters.iter_mut() {
        if c.alive && c.controls_city {
            c.team_record_days += 1;
        }

        if c.whereabouts != Whereabouts::Prison && c.prison_days == 0 {
            continue;
        }
        c.prison_days = c.prison_days.saturating_sub(1);
        if c.prison_days == 0 {
            c.whereabouts = Whereabouts::Free;
            c.cell_open = false;
            c.rescue_pending = false;
            released.push(c.name.clone());
        }
    }

    for name in &released {
        if let Some(office) = realm.office.as_mut() {
            office.release_prisoner(name);
        }
        log.record(NewsCategory::Prison, format!("{} has served their sentence and walks free.", name));
    }
    if !released.is_empty() {
        tracing::debug!(count = released.len(), day = realm.day, "prisoners released");
    }

    released
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ChallengeConfig;
    use crate::core::types::CharacterId;
    use crate::court::chronicle::{Chronicle, NullSink};
    use crate::court::consequences::{crown_new_king, imprison_character};
    use crate::court::ownership::transfer_city_control;
    use crate::realm::Character;

    #[test]
    fn test_reign_and_city_record_grow() {
        let mut a = Character::new(CharacterId(2), "A");
        a.team = "Red".into();
        let mut realm = Realm::with_characters(vec![Character::new(CharacterId(1), "King"), a]);
        crown_new_king(&mut realm, CharacterId(1), &ChallengeConfig::default(), &mut NullSink).unwrap();
        transfer_city_control(&mut realm, "Red");

        advance_day(&mut realm, &mut NullSink);
        advance_day(&mut realm, &mut NullSink);

        assert_eq!(realm.day, 2);
        assert_eq!(realm.office.as_ref().unwrap().days_in_power, 2);
        assert_eq!(realm.get(CharacterId(2)).unwrap().team_record_days, 2);
    }

    #[test]
    fn test_prisoner_released_when_sentence_ends() {
        let mut realm = Realm::with_characters(vec![
            Character::new(CharacterId(1), "King"),
            Character::new(CharacterId(2), "Thief"),
        ]);
        crown_new_king(&mut realm, CharacterId(1), &ChallengeConfig::default(), &mut NullSink).unwrap();
        imprison_character(&mut realm, CharacterId(2), 2, "Theft", &mut NullSink);
        let mut log = Chronicle::new();

        assert!(advance_day(&mut realm, &mut log).is_empty());
        assert!(realm.get(CharacterId(2)).unwrap().is_imprisoned());

        assert_eq!(advance_day(&mut realm, &mut log), vec!["Thief".to_string()]);
        let thief = realm.get(CharacterId(2)).unwrap();
        assert!(!thief.is_imprisoned());
        assert!(realm.office.as_ref().unwrap().prison.is_empty());
        assert_eq!(log.len(), 1);
    }
}
