//! Demo data loaded at the start of every session.
//!
//! The occupancy seed deliberately keeps a known defect: table 2 has six
//! seats but seat 7 is recorded as occupied. It is loaded as-is and reported
//! by [`TableAllocationStore::bounds_violations`].

use crate::{
    allocation::{AllocationResult, TableAllocationStore},
    config::AllocationConfig,
    seating::{OccupancyMap, SeatNumber},
    table::{Table, TableId, TableRegistry, TableStatus},
    waitlist::{NewWaitlistEntry, WaitlistQueue},
};
use chrono::Utc;

/// Seeded tables: (id, name, game type, seats, stakes, status)
const TABLES: [(TableId, &str, &str, usize, &str, TableStatus); 4] = [
    (1, "Table 1", "Texas Hold'em", 6, "$1/$2", TableStatus::Active),
    (2, "Table 2", "Omaha", 6, "$2/$5", TableStatus::Active),
    (3, "High Stakes", "Texas Hold'em", 9, "$5/$10", TableStatus::Paused),
    (4, "Stud Corner", "Seven Card Stud", 8, "$1/$3", TableStatus::Active),
];

/// Seeded occupied seats per table
const OCCUPIED: [(TableId, &[SeatNumber]); 3] = [(1, &[1, 2, 4]), (2, &[1, 3, 5, 7]), (3, &[2, 5])];

/// Seeded tables
pub fn demo_tables() -> Vec<Table> {
    TABLES
        .iter()
        .map(|&(id, name, game_type, max_players, stakes, status)| Table {
            id,
            name: name.to_string(),
            status,
            game_type: game_type.to_string(),
            max_players,
            stakes: stakes.to_string(),
            created_at: Utc::now(),
        })
        .collect()
}

/// Seeded occupancy, loaded without bounds checks
pub fn demo_occupancy() -> OccupancyMap {
    OccupancyMap::from_seed(
        OCCUPIED
            .iter()
            .map(|&(table_id, seats)| (table_id, seats.iter().copied())),
    )
}

/// Seeded waitlist requests in arrival order
pub fn demo_waitlist() -> Vec<NewWaitlistEntry> {
    vec![
        NewWaitlistEntry::new("P001", "Maria Garcia", "Texas Hold'em").prefer_seat(1, 3),
        NewWaitlistEntry::new("P002", "James Wilson", "Omaha").prefer_table(2),
        NewWaitlistEntry::new("P003", "Sarah Chen", "Texas Hold'em"),
        NewWaitlistEntry::new("P004", "Mike Brown", "Texas Hold'em").prefer_seat(3, 5),
        NewWaitlistEntry::new("P005", "Emily Davis", "Seven Card Stud").prefer_seat(4, 1),
    ]
}

/// Build a store holding the demo tables, seats and waitlist
pub fn demo_store(config: AllocationConfig) -> AllocationResult<TableAllocationStore> {
    let mut registry = TableRegistry::new();
    for table in demo_tables() {
        registry.insert(table)?;
    }

    let waitlist = WaitlistQueue::from_seed(demo_waitlist(), config.max_waitlist_len)?;

    Ok(TableAllocationStore::from_parts(
        config,
        registry,
        demo_occupancy(),
        waitlist,
    ))
}
