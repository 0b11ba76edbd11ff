//! Console configuration management.
//!
//! Merges command-line flags over the environment-driven allocation limits.

use card_room::config::{AllocationConfig, ConfigError};

/// Complete console configuration
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Limits handed to the allocation store
    pub allocation: AllocationConfig,
    /// Print outcomes as JSON instead of text
    pub json_output: bool,
    /// Load the demo tables, seats and waitlist on startup
    pub load_seed: bool,
}

impl ConsoleConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `max_table_size_override` - Optional table size cap (from CLI args)
    /// * `json_output` - Whether `--json` was passed
    /// * `empty` - Whether `--empty` was passed
    ///
    /// # Returns
    ///
    /// * `Result<ConsoleConfig, ConfigError>` - Loaded configuration or error
    pub fn from_env(
        max_table_size_override: Option<usize>,
        json_output: bool,
        empty: bool,
    ) -> Result<Self, ConfigError> {
        let mut allocation = AllocationConfig::from_env();
        if let Some(max_table_size) = max_table_size_override {
            allocation.max_table_size = max_table_size;
        }

        let config = Self {
            allocation,
            json_output,
            load_seed: !empty,
        };
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.allocation.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_cli_override_wins_over_env() {
        unsafe {
            std::env::set_var("CARD_ROOM_MAX_TABLE_SIZE", "10");
        }

        let config = ConsoleConfig::from_env(Some(12), false, false).unwrap();
        assert_eq!(config.allocation.max_table_size, 12);
        assert!(config.load_seed);

        let config = ConsoleConfig::from_env(None, true, true).unwrap();
        assert_eq!(config.allocation.max_table_size, 10);
        assert!(config.json_output);
        assert!(!config.load_seed);

        unsafe {
            std::env::remove_var("CARD_ROOM_MAX_TABLE_SIZE");
        }
    }

    #[test]
    #[serial]
    fn test_zero_table_size_rejected() {
        unsafe {
            std::env::remove_var("CARD_ROOM_MAX_TABLE_SIZE");
        }

        let result = ConsoleConfig::from_env(Some(0), false, false);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }
}
