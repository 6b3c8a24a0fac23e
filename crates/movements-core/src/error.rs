//! Error types for movements

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MovementsError {
    #[error("Unknown scale: {0}")]
    UnknownScale(String),
    #[error("Unknown event: {0}")]
    UnknownEvent(String),
    #[error("Invalid argument for {event}: {value}")]
    InvalidArgument { event: &'static str, value: String },
    #[error("Invalid motion config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, MovementsError>;
