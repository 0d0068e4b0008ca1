//! Throne and city politics
//!
//! Two contested roles: the throne, held by one teamless character, and
//! control of the city, held by one team. Autonomous challenges enter
//! through [`ChallengeOrchestrator`], player challenges through
//! [`player_throne_challenge`]; both end in the same consequence functions.

pub mod chronicle;
pub mod city;
pub mod consequences;
pub mod orchestrator;
pub mod ownership;
pub mod player;
pub mod throne;
pub mod upkeep;

pub use chronicle::{Chronicle, NarrativeSink, NewsCategory, NewsEntry, NullSink};
pub use city::challenge_for_city_control;
pub use consequences::{claim_empty_throne, crown_new_king, imprison_character};
pub use orchestrator::{ChallengeOrchestrator, CityActivity, MaintenanceReport, ThroneActivity};
pub use ownership::{
    apply_discount, city_controllers, controlling_team, force_leave_team, process_sale_tax,
    shop_discount,
};
pub use player::{player_throne_challenge, PlayerChallengeResult};
pub use throne::{resolve_throne_challenge, ThroneOutcome, ThronePhase};
pub use upkeep::advance_day;
