//! Seat occupancy map: which seat numbers are taken at each table.

use crate::table::TableId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Seat number type (1-based)
pub type SeatNumber = usize;

/// Per-table set of occupied seat numbers
///
/// The map answers "is this seat taken" and nothing else. It has no notion
/// of table capacity, so it neither rejects nor reports out-of-range seat
/// numbers; bounds are the caller's responsibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyMap {
    seats: BTreeMap<TableId, BTreeSet<SeatNumber>>,
}

impl OccupancyMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from raw seed data without any validation
    pub fn from_seed<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (TableId, S)>,
        S: IntoIterator<Item = SeatNumber>,
    {
        let mut map = Self::new();
        for (table_id, seats) in entries {
            for seat in seats {
                map.occupy(table_id, seat);
            }
        }
        map
    }

    /// Whether `seat_number` is free at `table_id`
    pub fn is_seat_available(&self, table_id: TableId, seat_number: SeatNumber) -> bool {
        self.seats
            .get(&table_id)
            .is_none_or(|occupied| !occupied.contains(&seat_number))
    }

    /// Mark a seat as occupied
    ///
    /// # Returns
    ///
    /// * `bool` - `true` if the seat was free before this call
    pub fn occupy(&mut self, table_id: TableId, seat_number: SeatNumber) -> bool {
        self.seats.entry(table_id).or_default().insert(seat_number)
    }

    /// Free a seat; freeing an already-free seat is a no-op
    ///
    /// # Returns
    ///
    /// * `bool` - `true` if the seat had been occupied
    pub fn release(&mut self, table_id: TableId, seat_number: SeatNumber) -> bool {
        let Some(occupied) = self.seats.get_mut(&table_id) else {
            return false;
        };

        let removed = occupied.remove(&seat_number);
        if occupied.is_empty() {
            self.seats.remove(&table_id);
        }
        removed
    }

    /// Occupied seats at a table, ascending
    pub fn occupied_seats(&self, table_id: TableId) -> Vec<SeatNumber> {
        self.seats
            .get(&table_id)
            .map(|occupied| occupied.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Number of occupied seats at a table
    pub fn occupied_count(&self, table_id: TableId) -> usize {
        self.seats.get(&table_id).map_or(0, BTreeSet::len)
    }

    /// Free seats in `1..=max_players`, ascending
    pub fn open_seats(&self, table_id: TableId, max_players: usize) -> Vec<SeatNumber> {
        (1..=max_players)
            .filter(|&seat| self.is_seat_available(table_id, seat))
            .collect()
    }

    /// Highest occupied seat number at a table
    pub fn highest_occupied(&self, table_id: TableId) -> Option<SeatNumber> {
        self.seats
            .get(&table_id)
            .and_then(|occupied| occupied.last().copied())
    }

    /// Tables that currently have at least one occupied seat
    pub fn table_ids(&self) -> impl Iterator<Item = TableId> + '_ {
        self.seats.keys().copied()
    }

    /// Iterate `(table_id, seat_number)` pairs for every occupied seat
    pub fn iter(&self) -> impl Iterator<Item = (TableId, SeatNumber)> + '_ {
        self.seats
            .iter()
            .flat_map(|(&table_id, occupied)| occupied.iter().map(move |&seat| (table_id, seat)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_one() -> OccupancyMap {
        OccupancyMap::from_seed([(1, vec![1, 2, 4])])
    }

    #[test]
    fn test_availability() {
        let map = table_one();
        assert!(!map.is_seat_available(1, 1));
        assert!(map.is_seat_available(1, 3));
        assert!(map.is_seat_available(2, 1));
    }

    #[test]
    fn test_availability_does_not_bounds_check() {
        let map = table_one();
        assert!(map.is_seat_available(1, 0));
        assert!(map.is_seat_available(1, 99));
    }

    #[test]
    fn test_occupy_reports_new_insert() {
        let mut map = table_one();
        assert!(map.occupy(1, 3));
        assert!(!map.occupy(1, 3));
        assert_eq!(map.occupied_seats(1), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_occupy_then_release_restores_availability() {
        let mut map = OccupancyMap::new();
        map.occupy(5, 2);
        assert!(!map.is_seat_available(5, 2));
        assert!(map.release(5, 2));
        assert!(map.is_seat_available(5, 2));
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut map = table_one();
        assert!(!map.release(1, 3));
        assert!(!map.release(9, 1));
        assert_eq!(map.occupied_seats(1), vec![1, 2, 4]);
    }

    #[test]
    fn test_release_last_seat_drops_table() {
        let mut map = OccupancyMap::from_seed([(3, vec![2])]);
        map.release(3, 2);
        assert_eq!(map.table_ids().count(), 0);
        assert_eq!(map.highest_occupied(3), None);
    }

    #[test]
    fn test_open_seats_and_counts() {
        let map = table_one();
        assert_eq!(map.open_seats(1, 6), vec![3, 5, 6]);
        assert_eq!(map.occupied_count(1), 3);
        assert_eq!(map.highest_occupied(1), Some(4));
        assert_eq!(map.open_seats(2, 3), vec![1, 2, 3]);
    }

    #[test]
    fn test_iter_pairs() {
        let map = OccupancyMap::from_seed([(2, vec![3]), (1, vec![2, 1])]);
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(1, 1), (1, 2), (2, 3)]);
    }
}
