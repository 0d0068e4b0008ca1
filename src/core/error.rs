use thiserror::Error;

#[derive(Error, Debug)]
pub enum CourtError {
    #[error("Character not found: {0:?}")]
    CharacterNotFound(crate::core::types::CharacterId),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CourtError>;
