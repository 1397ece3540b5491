//! Error taxonomy for every core operation.
//!
//! All failures are synchronous and scoped to the single requested action.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Negative damage, malformed effect, level below 1, empty name...
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Claiming twice, accepting an active quest, acting on a finished encounter...
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    /// Unknown skill, objective, item, quest or character id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Persistence collaborator failed. Only produced by the service layer.
    #[error("Repository error: {0}")]
    Repository(String),
}

impl GameError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::InvalidStateTransition(msg.into())
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        Self::Repository(err.to_string())
    }
}

pub type GameResult<T> = Result<T, GameError>;
