use crate::types::{HeroId, TeamId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("league_id required for team scouting")]
    MissingLeagueId,

    #[error("Team with ID {0} not found.")]
    TeamNotFound(TeamId),

    /// Hero constants are older than the match data. Counting would be corrupted.
    #[error("Unknown hero id {hero_id} in {context}")]
    UnknownHero { hero_id: HeroId, context: String },

    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error("Malformed match record: {0}")]
    MalformedMatch(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),
}

pub type ScoutResult<T> = std::result::Result<T, ScoutError>;
