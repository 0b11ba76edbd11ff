//! Table registry: table identity, capacity, game type and lifecycle status.
//!
//! Tables are created by an administrator and start `Active`. Status moves
//! freely between `Active` and `Paused`; `Ended` is terminal. Changing a
//! table's status never touches its seats or the waitlist.
//!
//! ## Example
//!
//! ```
//! use card_room::table::{TableConfig, TableRegistry, TableStatus};
//!
//! let mut registry = TableRegistry::new();
//! let id = registry
//!     .create_table(TableConfig::new("Table 1", "Texas Hold'em", 6), 23)
//!     .unwrap();
//!
//! registry.set_status(id, TableStatus::Paused).unwrap();
//! assert_eq!(registry.get(id).unwrap().status, TableStatus::Paused);
//! ```

pub mod config;
pub mod errors;
pub mod models;
pub mod registry;

pub use config::TableConfig;
pub use errors::{TableError, TableResult};
pub use models::{Table, TableId, TablePatch, TableStatus};
pub use registry::TableRegistry;
