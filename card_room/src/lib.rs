//! # Card Room
//!
//! Table and seat allocation for a card-room operator: which seats at which
//! tables are taken, who is waiting for a seat, and committing assignments
//! without ever seating two players in the same chair.
//!
//! ## Architecture
//!
//! Four components, leaves first:
//!
//! - **Table Registry**: tables with capacity, game type, stakes and status
//! - **Seat Occupancy Map**: per-table set of occupied seat numbers
//! - **Waitlist Queue**: ordered seat requests with optional table/seat preference
//! - **Seat Assignment Engine**: the only code that changes a seat and a
//!   waitlist entry together
//!
//! The engine lives on [`TableAllocationStore`], which owns the other three.
//! [`AllocationActor`] wraps a store in a Tokio task so concurrent callers
//! are serialized. All state is in memory and lasts for the session only.
//!
//! ## Example
//!
//! ```
//! use card_room::{AllocationConfig, seed};
//!
//! let mut store = seed::demo_store(AllocationConfig::default()).unwrap();
//!
//! // P001 asked for table 1, seat 3
//! let assignment = store.assign_preferred_seat(1).unwrap();
//! assert_eq!(assignment.seat_number, 3);
//! assert_eq!(store.occupied_seats(1), vec![1, 2, 3, 4]);
//! ```

/// Seat assignment engine, store and actor.
pub mod allocation;
/// Environment-driven limits.
pub mod config;
/// Seat occupancy map.
pub mod seating;
/// Demo session data.
pub mod seed;
/// Table registry.
pub mod table;
/// Waitlist queue.
pub mod waitlist;

pub use allocation::{
    AllocationActor, AllocationError, AllocationErrorKind, AllocationHandle, AllocationResult,
    SeatAssignment, TableAllocationStore,
};
pub use config::AllocationConfig;
pub use seating::{OccupancyMap, SeatNumber};
pub use table::{Table, TableConfig, TableId, TableStatus};
pub use waitlist::{EntryId, NewWaitlistEntry, PlayerId, WaitlistEntry, WaitlistQueue};
