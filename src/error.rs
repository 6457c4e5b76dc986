//! Typed errors for the journal library.
//!
//! [`ValidationError`] covers user-correctable capture problems that are rejected
//! before anything reaches the store. [`JournalError`] is what store operations
//! return.

/// A draft or new entry that cannot be stored as-is.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please select a mood")]
    MissingMood,

    #[error("Please enter what you ate or wait for analysis to complete")]
    MissingFood,

    #[error("mood must be between 1 and 5, got {0}")]
    MoodOutOfRange(u8),

    #[error("energy must be between 1 and 10, got {0}")]
    EnergyOutOfRange(u8),

    #[error("food item {id} has negative calories ({calories})")]
    NegativeCalories { id: String, calories: f64 },

    #[error("food item ids must be unique within an entry: {0}")]
    DuplicateFoodId(String),
}

#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("entry not found: {0}")]
    NotFound(i64),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("corrupt stored data: {0}")]
    Corrupt(String),
}

pub type Result<T> = std::result::Result<T, JournalError>;
