//! Seat allocation data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    seating::SeatNumber,
    table::{Table, TableId},
    waitlist::{EntryId, PlayerId},
};

/// How a seat assignment was initiated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentSource {
    /// Operator picked the seat
    Direct,
    /// Seat taken from the player's waitlist preference
    Preferred,
}

impl std::fmt::Display for AssignmentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentSource::Direct => write!(f, "direct"),
            AssignmentSource::Preferred => write!(f, "preferred"),
        }
    }
}

/// Committed seat assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatAssignment {
    pub table_id: TableId,
    pub seat_number: SeatNumber,
    pub player_id: PlayerId,
    pub player_name: String,
    pub source: AssignmentSource,
    /// Waitlist entry removed as part of the assignment
    pub waitlist_entry: Option<EntryId>,
    pub assigned_at: DateTime<Utc>,
}

/// Seat freed by a departing player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatRelease {
    pub table_id: TableId,
    pub seat_number: SeatNumber,
    /// `false` when the seat was already free
    pub was_occupied: bool,
    pub released_at: DateTime<Utc>,
}

/// Entry in the session's seat history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SeatEvent {
    Assigned(SeatAssignment),
    Released(SeatRelease),
}

/// Table listing row with live seat information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSummary {
    #[serde(flatten)]
    pub table: Table,
    pub occupied_seats: Vec<SeatNumber>,
    pub open_seats: Vec<SeatNumber>,
    /// Waitlisted players who asked for this table, or for its game with no table preference
    pub waitlist_count: usize,
}

impl TableSummary {
    pub fn is_full(&self) -> bool {
        self.open_seats.is_empty()
    }
}

/// Occupied seat that does not fit the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundsViolation {
    pub table_id: TableId,
    pub seat_number: SeatNumber,
    /// Capacity of the table, or `None` when the table is not registered
    pub max_players: Option<usize>,
}

impl std::fmt::Display for BoundsViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.max_players {
            Some(max) => write!(
                f,
                "table {} seat {} is outside 1-{}",
                self.table_id, self.seat_number, max
            ),
            None => write!(
                f,
                "table {} seat {} belongs to an unknown table",
                self.table_id, self.seat_number
            ),
        }
    }
}
