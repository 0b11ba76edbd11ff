//! Seat assignment engine and its actor.
//!
//! This module implements:
//! - TableAllocationStore: owns tables, occupancy and waitlist, and commits
//!   seat assignments without double-booking
//! - AllocationActor: Tokio task serializing access to one store
//! - Typed results for every failure (no dialogs, no panics)
//!
//! ## Example
//!
//! ```
//! use card_room::allocation::{AllocationError, TableAllocationStore};
//! use card_room::config::AllocationConfig;
//! use card_room::table::TableConfig;
//!
//! let mut store = TableAllocationStore::new(AllocationConfig::default());
//! let table_id = store
//!     .create_table(TableConfig::new("Table 1", "Texas Hold'em", 6))
//!     .unwrap();
//!
//! store.assign_seat(&"P010".into(), "Alex", table_id, 3).unwrap();
//!
//! let second = store.assign_seat(&"P011".into(), "Sam", table_id, 3);
//! assert!(matches!(second, Err(AllocationError::SeatUnavailable { .. })));
//! ```

pub mod actor;
pub mod errors;
pub mod messages;
pub mod models;
pub mod store;

pub use actor::{AllocationActor, AllocationHandle};
pub use errors::{AllocationError, AllocationErrorKind, AllocationResult};
pub use messages::AllocationMessage;
pub use models::{
    AssignmentSource, BoundsViolation, SeatAssignment, SeatEvent, SeatRelease, TableSummary,
};
pub use store::TableAllocationStore;
