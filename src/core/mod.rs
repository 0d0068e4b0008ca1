pub mod config;
pub mod error;
pub mod types;

pub use config::ChallengeConfig;
pub use error::{CourtError, Result};
pub use types::{CharacterId, ControllerType, Sex};
