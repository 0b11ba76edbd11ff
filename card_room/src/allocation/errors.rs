//! Seat allocation error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    seating::SeatNumber,
    table::{TableError, TableId},
    waitlist::{EntryId, WaitlistError},
};

/// Seat allocation errors
///
/// Every variant is recoverable; the engine never mutates state on the
/// error path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    /// Requested seat is already occupied
    #[error("Seat {seat_number} at table {table_id} is already taken")]
    SeatUnavailable {
        table_id: TableId,
        seat_number: SeatNumber,
    },

    /// Preferred-seat assignment on an entry without a table and seat
    #[error("Waitlist entry {0} has no preferred table and seat")]
    NoPreferenceSpecified(EntryId),

    /// The entry's preferred seat is occupied; the entry stays queued
    #[error("Preferred seat {seat_number} at table {table_id} is taken")]
    PreferredSeatTaken {
        table_id: TableId,
        seat_number: SeatNumber,
    },

    /// Entry or record no longer exists
    #[error("Not found: {0}")]
    NotFound(String),

    /// Seat number outside `1..=max_players`
    #[error("Seat {seat_number} is out of range for table {table_id} (1-{max_players})")]
    SeatOutOfRange {
        table_id: TableId,
        seat_number: SeatNumber,
        max_players: usize,
    },

    /// Table not found
    #[error("Table not found: {0}")]
    TableNotFound(TableId),

    /// Table has ended and takes no new players
    #[error("Table {0} has ended")]
    TableEnded(TableId),

    /// Capacity change would leave an occupied seat beyond the new capacity
    #[error(
        "Cannot reduce table {table_id} to {requested} seats: seat {highest_occupied} is occupied"
    )]
    CapacityBelowOccupancy {
        table_id: TableId,
        requested: usize,
        highest_occupied: SeatNumber,
    },

    /// Direct assignment without a player ID or name
    #[error("Invalid player: {0}")]
    InvalidPlayer(String),

    /// Table registry error
    #[error(transparent)]
    Table(#[from] TableError),

    /// Waitlist error
    #[error(transparent)]
    Waitlist(WaitlistError),

    /// Allocation actor has stopped
    #[error("Allocation service is not running")]
    ActorClosed,
}

impl From<WaitlistError> for AllocationError {
    fn from(err: WaitlistError) -> Self {
        match err {
            WaitlistError::NotFound(what) => AllocationError::NotFound(what),
            other => AllocationError::Waitlist(other),
        }
    }
}

/// Error tag reported to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationErrorKind {
    SeatUnavailable,
    NoPreferenceSpecified,
    PreferredSeatTaken,
    NotFound,
    SeatOutOfRange,
    TableNotFound,
    TableEnded,
    CapacityBelowOccupancy,
    InvalidPlayer,
    InvalidTable,
    InvalidWaitlistEntry,
    Unavailable,
}

impl std::fmt::Display for AllocationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            AllocationErrorKind::SeatUnavailable => "seat_unavailable",
            AllocationErrorKind::NoPreferenceSpecified => "no_preference_specified",
            AllocationErrorKind::PreferredSeatTaken => "preferred_seat_taken",
            AllocationErrorKind::NotFound => "not_found",
            AllocationErrorKind::SeatOutOfRange => "seat_out_of_range",
            AllocationErrorKind::TableNotFound => "table_not_found",
            AllocationErrorKind::TableEnded => "table_ended",
            AllocationErrorKind::CapacityBelowOccupancy => "capacity_below_occupancy",
            AllocationErrorKind::InvalidPlayer => "invalid_player",
            AllocationErrorKind::InvalidTable => "invalid_table",
            AllocationErrorKind::InvalidWaitlistEntry => "invalid_waitlist_entry",
            AllocationErrorKind::Unavailable => "unavailable",
        };
        write!(f, "{}", tag)
    }
}

impl AllocationError {
    /// Error tag for this failure
    pub fn kind(&self) -> AllocationErrorKind {
        match self {
            AllocationError::SeatUnavailable { .. } => AllocationErrorKind::SeatUnavailable,
            AllocationError::NoPreferenceSpecified(_) => AllocationErrorKind::NoPreferenceSpecified,
            AllocationError::PreferredSeatTaken { .. } => AllocationErrorKind::PreferredSeatTaken,
            AllocationError::NotFound(_) => AllocationErrorKind::NotFound,
            AllocationError::SeatOutOfRange { .. } => AllocationErrorKind::SeatOutOfRange,
            AllocationError::TableNotFound(_) | AllocationError::Table(TableError::NotFound(_)) => {
                AllocationErrorKind::TableNotFound
            }
            AllocationError::TableEnded(_) | AllocationError::Table(TableError::TableEnded(_)) => {
                AllocationErrorKind::TableEnded
            }
            AllocationError::CapacityBelowOccupancy { .. } => {
                AllocationErrorKind::CapacityBelowOccupancy
            }
            AllocationError::InvalidPlayer(_) => AllocationErrorKind::InvalidPlayer,
            AllocationError::Table(_) => AllocationErrorKind::InvalidTable,
            AllocationError::Waitlist(_) => AllocationErrorKind::InvalidWaitlistEntry,
            AllocationError::ActorClosed => AllocationErrorKind::Unavailable,
        }
    }

    /// Operator-facing message
    ///
    /// Spells out what the operator can do next; internal detail such as
    /// actor state is not exposed.
    pub fn client_message(&self) -> String {
        match self {
            AllocationError::SeatUnavailable { .. } => {
                format!("{}. Choose a different seat.", self)
            }
            AllocationError::PreferredSeatTaken { .. } => {
                format!("{}. The player remains on the waitlist.", self)
            }
            AllocationError::ActorClosed => "Seat allocation is unavailable".to_string(),
            _ => self.to_string(),
        }
    }

    /// Whether the operator can retry with a different seat or preference
    pub fn is_seat_conflict(&self) -> bool {
        matches!(
            self,
            AllocationError::SeatUnavailable { .. } | AllocationError::PreferredSeatTaken { .. }
        )
    }
}

/// Result type for allocation operations
pub type AllocationResult<T> = Result<T, AllocationError>;
