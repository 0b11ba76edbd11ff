//! Waitlist data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{seating::SeatNumber, table::TableId};

/// Waitlist entry ID type
pub type EntryId = u64;

/// Player identity as issued by the card room (e.g., "P010")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(s: &str) -> Self {
        Self(s.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

/// A player waiting for a seat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub id: EntryId,
    pub player_id: PlayerId,
    pub player_name: String,
    pub game_type: String,
    /// Table the player asked for (by ID only)
    pub preferred_table: Option<TableId>,
    pub preferred_seat: Option<SeatNumber>,
    /// 1-based arrival order
    pub position: usize,
    pub joined_at: DateTime<Utc>,
}

impl WaitlistEntry {
    /// The `(table, seat)` pair the player asked for, if both are set
    pub fn preference(&self) -> Option<(TableId, SeatNumber)> {
        self.preferred_table.zip(self.preferred_seat)
    }

    /// Case-insensitive game type match
    pub fn wants_game(&self, game_type: &str) -> bool {
        self.game_type.eq_ignore_ascii_case(game_type.trim())
    }
}

/// Request to join the waitlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWaitlistEntry {
    pub player_id: PlayerId,
    pub player_name: String,
    pub game_type: String,
    pub preferred_table: Option<TableId>,
    pub preferred_seat: Option<SeatNumber>,
}

impl NewWaitlistEntry {
    /// Request with no seat preference
    pub fn new(
        player_id: impl Into<PlayerId>,
        player_name: impl Into<String>,
        game_type: impl Into<String>,
    ) -> Self {
        Self {
            player_id: player_id.into(),
            player_name: player_name.into(),
            game_type: game_type.into(),
            preferred_table: None,
            preferred_seat: None,
        }
    }

    /// Ask for a specific table
    pub fn prefer_table(mut self, table_id: TableId) -> Self {
        self.preferred_table = Some(table_id);
        self
    }

    /// Ask for a specific seat at a specific table
    pub fn prefer_seat(mut self, table_id: TableId, seat_number: SeatNumber) -> Self {
        self.preferred_table = Some(table_id);
        self.preferred_seat = Some(seat_number);
        self
    }

    /// Validate the request
    pub fn validate(&self) -> Result<(), String> {
        if self.player_id.is_empty() {
            return Err("Player ID must not be empty".to_string());
        }

        if self.player_name.trim().is_empty() {
            return Err("Player name must not be empty".to_string());
        }

        if self.preferred_seat.is_some() && self.preferred_table.is_none() {
            return Err("A preferred seat requires a preferred table".to_string());
        }

        if self.preferred_seat == Some(0) {
            return Err("Seat numbers start at 1".to_string());
        }

        Ok(())
    }
}

/// Selects an entry for removal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryMatcher {
    /// Match by waitlist entry ID
    Id(EntryId),
    /// Match by player ID
    Player(PlayerId),
}

impl EntryMatcher {
    pub fn matches(&self, entry: &WaitlistEntry) -> bool {
        match self {
            EntryMatcher::Id(id) => entry.id == *id,
            EntryMatcher::Player(player_id) => entry.player_id == *player_id,
        }
    }
}

impl fmt::Display for EntryMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryMatcher::Id(id) => write!(f, "waitlist entry {}", id),
            EntryMatcher::Player(player_id) => write!(f, "waitlist entry for player {}", player_id),
        }
    }
}
