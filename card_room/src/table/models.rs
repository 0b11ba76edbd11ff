//! Table data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::config::TableConfig;

/// Table ID type
pub type TableId = i64;

/// Table lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    /// Open for play and seating
    Active,
    /// Temporarily halted by an administrator
    Paused,
    /// Closed for good
    Ended,
}

impl TableStatus {
    /// Whether no further transitions are possible
    pub fn is_terminal(self) -> bool {
        matches!(self, TableStatus::Ended)
    }

    /// Whether an administrator may move a table from `self` to `next`
    ///
    /// Active and Paused toggle freely and both may end; Ended is final.
    /// Re-applying the current status is allowed and has no effect.
    pub fn can_transition_to(self, next: TableStatus) -> bool {
        match (self, next) {
            (from, to) if from == to => true,
            (TableStatus::Active, _) | (TableStatus::Paused, _) => true,
            (TableStatus::Ended, _) => false,
        }
    }
}

impl std::fmt::Display for TableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableStatus::Active => write!(f, "active"),
            TableStatus::Paused => write!(f, "paused"),
            TableStatus::Ended => write!(f, "ended"),
        }
    }
}

impl std::str::FromStr for TableStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(TableStatus::Active),
            "paused" => Ok(TableStatus::Paused),
            "ended" => Ok(TableStatus::Ended),
            other => Err(format!("Unknown table status '{}'", other)),
        }
    }
}

/// A physical table in the card room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub id: TableId,
    pub name: String,
    pub status: TableStatus,
    pub game_type: String,
    pub max_players: usize,
    pub stakes: String,
    pub created_at: DateTime<Utc>,
}

impl Table {
    /// Build an active table from a creation config
    pub fn from_config(id: TableId, config: TableConfig) -> Self {
        Self {
            id,
            name: config.name,
            status: TableStatus::Active,
            game_type: config.game_type,
            max_players: config.max_players,
            stakes: config.stakes,
            created_at: Utc::now(),
        }
    }

    /// Whether `seat_number` names a real seat at this table
    pub fn contains_seat(&self, seat_number: usize) -> bool {
        (1..=self.max_players).contains(&seat_number)
    }

    /// Current settings as a config, for re-validation after a patch
    pub fn to_config(&self) -> TableConfig {
        TableConfig {
            name: self.name.clone(),
            game_type: self.game_type.clone(),
            max_players: self.max_players,
            stakes: self.stakes.clone(),
        }
    }
}

/// Partial update for an existing table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablePatch {
    pub name: Option<String>,
    pub game_type: Option<String>,
    pub max_players: Option<usize>,
    pub stakes: Option<String>,
}

impl TablePatch {
    /// Patch that only changes capacity
    pub fn capacity(max_players: usize) -> Self {
        Self {
            max_players: Some(max_players),
            ..Self::default()
        }
    }

    /// Merge this patch over `config`
    pub fn apply_to(&self, mut config: TableConfig) -> TableConfig {
        if let Some(name) = &self.name {
            config.name = name.clone();
        }
        if let Some(game_type) = &self.game_type {
            config.game_type = game_type.clone();
        }
        if let Some(max_players) = self.max_players {
            config.max_players = max_players;
        }
        if let Some(stakes) = &self.stakes {
            config.stakes = stakes.clone();
        }
        config
    }
}
