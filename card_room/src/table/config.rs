//! Table configuration models.

use serde::{Deserialize, Serialize};

/// Table creation parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Display name
    pub name: String,

    /// Free-text game descriptor (e.g., "Texas Hold'em")
    pub game_type: String,

    /// Seat capacity (default: 9)
    pub max_players: usize,

    /// Stakes shown to the operator (e.g., "$1/$2")
    pub stakes: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            name: "Default Table".to_string(),
            game_type: "Texas Hold'em".to_string(),
            max_players: 9,
            stakes: "$1/$2".to_string(),
        }
    }
}

impl TableConfig {
    /// Create a config with the given name, game type and capacity
    pub fn new(name: impl Into<String>, game_type: impl Into<String>, max_players: usize) -> Self {
        Self {
            name: name.into(),
            game_type: game_type.into(),
            max_players,
            ..Self::default()
        }
    }

    /// Set the stakes label
    pub fn with_stakes(mut self, stakes: impl Into<String>) -> Self {
        self.stakes = stakes.into();
        self
    }

    /// Validate configuration
    ///
    /// # Arguments
    ///
    /// * `max_table_size` - Largest capacity the card room allows
    pub fn validate(&self, max_table_size: usize) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Table name must not be empty".to_string());
        }

        if self.game_type.trim().is_empty() {
            return Err("Game type must not be empty".to_string());
        }

        if self.max_players == 0 || self.max_players > max_table_size {
            return Err(format!(
                "Max players must be between 1 and {}",
                max_table_size
            ));
        }

        Ok(())
    }
}
