//! Integration tests for seat assignment.
//!
//! Covers direct and preferred-seat assignment against a table with seats
//! 1, 2 and 4 taken, plus the occupancy and waitlist invariants.

use card_room::allocation::{AllocationError, AllocationErrorKind, TableAllocationStore};
use card_room::config::AllocationConfig;
use card_room::seed;
use card_room::seating::OccupancyMap;
use card_room::table::{TableConfig, TablePatch, TableRegistry, TableStatus};
use card_room::waitlist::{EntryMatcher, NewWaitlistEntry, WaitlistQueue};
use std::collections::HashSet;

/// Table 1: six seats, 1/2/4 occupied. P001 waits for table 1 seat 3.
fn setup_store() -> TableAllocationStore {
    let config = AllocationConfig::default();

    let mut registry = TableRegistry::new();
    registry
        .create_table(
            TableConfig::new("Table 1", "Texas Hold'em", 6).with_stakes("$1/$2"),
            config.max_table_size,
        )
        .expect("Table should be created");

    let occupancy = OccupancyMap::from_seed([(1, vec![1, 2, 4])]);

    let waitlist = WaitlistQueue::from_seed(
        [
            NewWaitlistEntry::new("P001", "Maria", "Texas Hold'em").prefer_seat(1, 3),
            NewWaitlistEntry::new("P002", "James", "Texas Hold'em"),
            NewWaitlistEntry::new("P003", "Sarah", "Texas Hold'em"),
        ],
        config.max_waitlist_len,
    )
    .expect("Waitlist should load");

    TableAllocationStore::from_parts(config, registry, occupancy, waitlist)
}

/// No seat number appears twice and every seat fits its table
fn assert_occupancy_invariants(store: &TableAllocationStore) {
    for table in store.tables() {
        let seats = store.occupied_seats(table.id);
        let unique: HashSet<_> = seats.iter().collect();
        assert_eq!(unique.len(), seats.len(), "Table {} double-booked", table.id);
    }
    assert!(
        store.bounds_violations().is_empty(),
        "Unexpected bounds violations: {:?}",
        store.bounds_violations()
    );
}

fn waitlist_players(store: &TableAllocationStore) -> Vec<String> {
    store
        .waitlist()
        .iter()
        .map(|entry| entry.player_id.to_string())
        .collect()
}

// === Direct assignment ===

#[test]
fn test_assign_taken_seat_is_rejected() {
    let mut store = setup_store();

    let result = store.assign_seat(&"P010".into(), "Alex", 1, 4);

    let err = result.expect_err("Seat 4 is taken");
    assert_eq!(err.kind(), AllocationErrorKind::SeatUnavailable);
    assert_eq!(store.occupied_seats(1), vec![1, 2, 4]);
    assert_occupancy_invariants(&store);
}

#[test]
fn test_assign_free_seat_succeeds() {
    let mut store = setup_store();

    let assignment = store
        .assign_seat(&"P010".into(), "Alex", 1, 3)
        .expect("Seat 3 is free");

    assert_eq!(assignment.table_id, 1);
    assert_eq!(assignment.seat_number, 3);
    assert_eq!(assignment.player_id.as_str(), "P010");
    assert_eq!(assignment.player_name, "Alex");
    assert_eq!(store.occupied_seats(1), vec![1, 2, 3, 4]);
    assert_occupancy_invariants(&store);
}

#[test]
fn test_direct_assignment_removes_waitlisted_player() {
    let mut store = setup_store();

    store
        .assign_seat(&"P002".into(), "James", 1, 5)
        .expect("Seat 5 is free");

    assert_eq!(waitlist_players(&store), vec!["P001", "P003"]);
    assert_eq!(store.waitlist().position_of(&"P003".into()), Some(2));
}

#[test]
fn test_seat_cannot_be_assigned_twice() {
    let mut store = setup_store();

    store
        .assign_seat(&"P010".into(), "Alex", 1, 6)
        .expect("First assignment should succeed");
    let second = store.assign_seat(&"P011".into(), "Sam", 1, 6);

    assert_eq!(
        second,
        Err(AllocationError::SeatUnavailable {
            table_id: 1,
            seat_number: 6
        })
    );
    assert_occupancy_invariants(&store);
}

// === Preferred-seat assignment ===

#[test]
fn test_assign_preferred_seat_succeeds() {
    let mut store = setup_store();
    let entry = store.waitlist().get(1).cloned().expect("P001 is waitlisted");

    let assignment = store
        .assign_preferred_entry(&entry)
        .expect("Preferred seat 3 is free");

    assert_eq!(assignment.seat_number, 3);
    assert_eq!(assignment.waitlist_entry, Some(entry.id));
    assert_eq!(store.occupied_seats(1), vec![1, 2, 3, 4]);
    assert!(store.waitlist().get(entry.id).is_none());
    assert_eq!(waitlist_players(&store), vec!["P002", "P003"]);
    assert_occupancy_invariants(&store);
}

#[test]
fn test_preferred_seat_taken_leaves_entry_in_place() {
    let mut store = setup_store();
    store
        .assign_seat(&"P099".into(), "Walk-in", 1, 3)
        .expect("Seat 3 is free");
    assert_eq!(store.occupied_seats(1), vec![1, 2, 3, 4]);

    let result = store.assign_preferred_seat(1);

    let err = result.expect_err("Seat 3 is now taken");
    assert_eq!(err.kind(), AllocationErrorKind::PreferredSeatTaken);
    assert_eq!(store.occupied_seats(1), vec![1, 2, 3, 4]);

    let entry = store.waitlist().get(1).expect("Entry stays queued");
    assert_eq!(entry.position, 1);
    assert_eq!(waitlist_players(&store), vec!["P001", "P002", "P003"]);
}

#[test]
fn test_preferred_seat_has_no_fallback() {
    let mut store = setup_store();
    store.assign_seat(&"P099".into(), "Walk-in", 1, 3).unwrap();

    let _ = store.assign_preferred_seat(1);

    // Seats 5 and 6 stay free; nothing was substituted
    assert!(store.is_seat_available(1, 5));
    assert!(store.is_seat_available(1, 6));
}

#[test]
fn test_preferred_seat_without_preference() {
    let mut store = setup_store();

    let result = store.assign_preferred_seat(2);

    assert_eq!(result, Err(AllocationError::NoPreferenceSpecified(2)));
    assert_eq!(store.waitlist().len(), 3);
}

#[test]
fn test_preferred_seat_after_entry_removed() {
    let mut store = setup_store();
    let entry = store.waitlist().get(1).cloned().unwrap();
    store
        .leave_waitlist(&EntryMatcher::Id(entry.id))
        .expect("Entry should be removed");

    let err = store.assign_preferred_entry(&entry).unwrap_err();
    assert_eq!(err.kind(), AllocationErrorKind::NotFound);
    assert!(store.is_seat_available(1, 3));
}

// === Release ===

#[test]
fn test_release_round_trip_and_idempotence() {
    let mut store = setup_store();

    store.assign_seat(&"P010".into(), "Alex", 1, 5).unwrap();
    assert!(!store.is_seat_available(1, 5));

    let first = store.release_seat(1, 5).unwrap();
    let second = store.release_seat(1, 5).unwrap();

    assert!(first.was_occupied);
    assert!(!second.was_occupied);
    assert!(store.is_seat_available(1, 5));
    assert_eq!(store.occupied_seats(1), vec![1, 2, 4]);
}

// === Table lifecycle ===

#[test]
fn test_table_lifecycle_never_clears_seats() {
    let mut store = setup_store();

    store.set_table_status(1, TableStatus::Paused).unwrap();
    store.set_table_status(1, TableStatus::Active).unwrap();
    store.set_table_status(1, TableStatus::Ended).unwrap();

    assert_eq!(store.occupied_seats(1), vec![1, 2, 4]);
    assert_eq!(
        store.set_table_status(1, TableStatus::Active).unwrap_err().kind(),
        AllocationErrorKind::InvalidTable
    );
    assert_eq!(
        store.assign_seat(&"P010".into(), "Alex", 1, 3),
        Err(AllocationError::TableEnded(1))
    );
}

#[test]
fn test_capacity_cannot_strand_occupied_seats() {
    let mut store = setup_store();

    let err = store
        .update_table(1, TablePatch::capacity(2))
        .expect_err("Seat 4 is occupied");
    assert_eq!(err.kind(), AllocationErrorKind::CapacityBelowOccupancy);

    store.release_seat(1, 4).unwrap();
    let table = store
        .update_table(1, TablePatch::capacity(2))
        .expect("Highest occupied seat is now 2");
    assert_eq!(table.max_players, 2);
    assert_occupancy_invariants(&store);
}

#[test]
fn test_out_of_range_seat_does_not_block_keeping_capacity() {
    // Demo table 2 has six seats but seat 7 is occupied
    let mut store = seed::demo_store(AllocationConfig::default()).unwrap();

    let patch = TablePatch {
        name: Some("Omaha Main".to_string()),
        max_players: Some(6),
        ..TablePatch::default()
    };
    let table = store
        .update_table(2, patch)
        .expect("Capacity is not being lowered");
    assert_eq!(table.name, "Omaha Main");
    assert_eq!(table.max_players, 6);

    // Raising capacity to cover the stray seat clears the audit
    store.update_table(2, TablePatch::capacity(8)).unwrap();
    assert!(store.bounds_violations().is_empty());

    // Lowering below seat 7 is still refused
    let err = store
        .update_table(2, TablePatch::capacity(6))
        .expect_err("Seat 7 is occupied");
    assert_eq!(err.kind(), AllocationErrorKind::CapacityBelowOccupancy);
    assert_eq!(store.occupied_seats(2), vec![1, 3, 5, 7]);
}

#[test]
fn test_history_records_assignments_and_releases() {
    let mut store = setup_store();

    store.assign_preferred_seat(1).unwrap();
    store.assign_seat(&"P002".into(), "James", 1, 5).unwrap();
    store.release_seat(1, 1).unwrap();
    let _ = store.assign_seat(&"P003".into(), "Sarah", 1, 5);

    assert_eq!(store.history().len(), 3);
    let json = serde_json::to_value(store.history()).unwrap();
    assert_eq!(json[0]["event"], "assigned");
    assert_eq!(json[0]["source"], "preferred");
    assert_eq!(json[2]["event"], "released");
}
