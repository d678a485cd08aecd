use thiserror::Error;

use crate::action::ActionError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OptimizeError {
    #[error("Invalid roster: {0}")]
    InvalidRoster(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid partition: team {team} is empty")]
    InvalidPartition { team: usize },
    #[error(transparent)]
    Action(#[from] ActionError),
}

pub type Result<T, E = OptimizeError> = std::result::Result<T, E>;
