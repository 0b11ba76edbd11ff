//! Seat occupancy tracking.
//!
//! A seat is the pair `(table_id, seat_number)`. The [`OccupancyMap`] is the
//! single source of truth for whether a seat is taken.

pub mod occupancy;

pub use occupancy::{OccupancyMap, SeatNumber};
