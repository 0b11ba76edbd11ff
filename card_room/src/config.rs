//! Allocation configuration.
//!
//! Consolidates the environment variables read by the allocation store and
//! its actor.

use crate::waitlist::DEFAULT_WAITLIST_CAPACITY;

/// Largest table the card room seats by default
pub const DEFAULT_MAX_TABLE_SIZE: usize = 23;

/// Default actor inbox depth
pub const DEFAULT_INBOX_CAPACITY: usize = 100;

/// Allocation store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationConfig {
    /// Largest `max_players` accepted when creating or updating a table
    pub max_table_size: usize,

    /// Maximum number of waitlist entries
    pub max_waitlist_len: usize,

    /// Bounded channel size for the allocation actor inbox
    pub inbox_capacity: usize,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            max_table_size: DEFAULT_MAX_TABLE_SIZE,
            max_waitlist_len: DEFAULT_WAITLIST_CAPACITY,
            inbox_capacity: DEFAULT_INBOX_CAPACITY,
        }
    }
}

impl AllocationConfig {
    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `CARD_ROOM_MAX_TABLE_SIZE`: Largest table capacity (default: 23)
    /// - `CARD_ROOM_MAX_WAITLIST`: Waitlist capacity (default: 200)
    /// - `CARD_ROOM_INBOX_CAPACITY`: Actor inbox depth (default: 100)
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            max_table_size: parse_env_or("CARD_ROOM_MAX_TABLE_SIZE", DEFAULT_MAX_TABLE_SIZE),
            max_waitlist_len: parse_env_or("CARD_ROOM_MAX_WAITLIST", DEFAULT_WAITLIST_CAPACITY),
            inbox_capacity: parse_env_or("CARD_ROOM_INBOX_CAPACITY", DEFAULT_INBOX_CAPACITY),
        }
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_table_size == 0 {
            return Err(ConfigError::Invalid {
                var: "CARD_ROOM_MAX_TABLE_SIZE".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.max_waitlist_len == 0 {
            return Err(ConfigError::Invalid {
                var: "CARD_ROOM_MAX_WAITLIST".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.inbox_capacity == 0 {
            return Err(ConfigError::Invalid {
                var: "CARD_ROOM_INBOX_CAPACITY".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
pub fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
