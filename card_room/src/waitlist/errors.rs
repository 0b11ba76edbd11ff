//! Waitlist error types.

use thiserror::Error;

use super::models::PlayerId;

/// Waitlist errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaitlistError {
    /// No entry matched the request
    #[error("Not found: {0}")]
    NotFound(String),

    /// Player already has an entry
    #[error("Player {0} is already on the waitlist")]
    AlreadyWaitlisted(PlayerId),

    /// Waitlist reached its configured capacity
    #[error("Waitlist is full ({capacity} entries)")]
    WaitlistFull { capacity: usize },

    /// Request failed validation
    #[error("Invalid waitlist entry: {0}")]
    InvalidEntry(String),
}

/// Result type for waitlist operations
pub type WaitlistResult<T> = Result<T, WaitlistError>;
