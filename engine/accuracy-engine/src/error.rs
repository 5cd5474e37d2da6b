//! Error types for the accuracy engine

use crate::models::Week;
use player_registry::PositionGroup;
use serde::Serialize;
use thiserror::Error;

/// Result type alias for accuracy engine operations
pub type Result<T> = std::result::Result<T, AccuracyError>;

/// Errors that can occur while scoring rankings
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum AccuracyError {
    /// A rankings file lists the same canonical name twice
    #[error("{group} week {week}: '{name}' appears more than once in the predicted ranking")]
    DuplicateName { group: PositionGroup, week: Week, name: String },

    /// Predicted and observed rankings share no players
    #[error("{group} week {week}: predicted and observed rankings have no players in common")]
    EmptyCommonSet { group: PositionGroup, week: Week },

    /// Percentile requested against an empty distribution
    #[error("Cannot compute a percentile from {len} values")]
    InsufficientData { len: usize },

    /// Score is NaN or infinite
    #[error("Invalid score value: {0}")]
    InvalidValue(f64),

    /// An accuracy record for this group and week already exists
    #[error("{group} week {week} has already been scored")]
    RecordExists { group: PositionGroup, week: Week },

    /// Week range text could not be parsed
    #[error("Invalid week range: {0}")]
    InvalidWeekRange(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AccuracyError {
    /// Fatal errors skip the whole (group, week); everything else is a soft failure
    pub fn is_fatal(&self) -> bool {
        matches!(self, AccuracyError::DuplicateName { .. })
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
