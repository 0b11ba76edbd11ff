//! Integration tests for the allocation actor.
//!
//! Concurrent callers share one store through cloned handles; the actor must
//! let exactly one of them take any given seat.

use card_room::allocation::{AllocationActor, AllocationErrorKind, AllocationHandle};
use card_room::config::AllocationConfig;
use card_room::seed;
use card_room::table::{TablePatch, TableStatus};
use card_room::waitlist::{EntryMatcher, NewWaitlistEntry};

fn spawn_demo() -> AllocationHandle {
    let store = seed::demo_store(AllocationConfig::default()).expect("Demo data should load");
    let (handle, _task) = AllocationActor::spawn(store);
    handle
}

#[tokio::test]
async fn test_concurrent_requests_for_one_seat() {
    let handle = spawn_demo();

    let mut tasks = Vec::new();
    for i in 0..16 {
        let handle = handle.clone();
        tasks.push(tokio::spawn(async move {
            handle
                .assign_seat(format!("W{:02}", i).into(), format!("Walk-in {}", i), 1, 3)
                .await
        }));
    }

    let mut winners = 0;
    for task in tasks {
        match task.await.expect("Task should not panic") {
            Ok(assignment) => {
                assert_eq!(assignment.seat_number, 3);
                winners += 1;
            }
            Err(err) => assert_eq!(err.kind(), AllocationErrorKind::SeatUnavailable),
        }
    }

    assert_eq!(winners, 1, "Exactly one caller should get seat 3");

    let table = handle.table(1).await.unwrap().expect("Table 1 exists");
    assert_eq!(table.occupied_seats, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_concurrent_preferred_and_direct_assignment() {
    let handle = spawn_demo();

    // P001 wants table 1 seat 3 while an operator seats a walk-in there
    let preferred = {
        let handle = handle.clone();
        tokio::spawn(async move { handle.assign_preferred_seat(1).await })
    };
    let direct = {
        let handle = handle.clone();
        tokio::spawn(async move {
            handle
                .assign_seat("W01".into(), "Walk-in".to_string(), 1, 3)
                .await
        })
    };

    let preferred = preferred.await.unwrap();
    let direct = direct.await.unwrap();
    assert!(preferred.is_ok() != direct.is_ok(), "Exactly one should win");

    let waitlist = handle.waitlist(None).await.unwrap();
    let p001_waiting = waitlist
        .iter()
        .any(|entry| entry.player_id.as_str() == "P001");
    assert_eq!(p001_waiting, preferred.is_err());
}

#[tokio::test]
async fn test_demo_session_flow() {
    let handle = spawn_demo();

    // Known seed defect is reported, not fixed
    let violations = handle.audit().await.unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!((violations[0].table_id, violations[0].seat_number), (2, 7));

    // P004 wants table 3 seat 5, which is taken
    let err = handle.assign_preferred_seat(4).await.unwrap_err();
    assert_eq!(err.kind(), AllocationErrorKind::PreferredSeatTaken);

    // P005 gets the stud seat they asked for
    let assignment = handle.assign_preferred_seat(5).await.unwrap();
    assert_eq!((assignment.table_id, assignment.seat_number), (4, 1));

    let entry = handle
        .join_waitlist(NewWaitlistEntry::new("P006", "Lee", "Omaha").prefer_table(2))
        .await
        .unwrap();
    assert_eq!(entry.position, 5);

    let omaha = handle.waitlist(Some("omaha".to_string())).await.unwrap();
    assert_eq!(omaha.len(), 2);

    handle
        .leave_waitlist(EntryMatcher::Player("P006".into()))
        .await
        .unwrap();

    let err = handle
        .update_table(2, TablePatch::capacity(5))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), AllocationErrorKind::CapacityBelowOccupancy);

    handle.set_table_status(3, TableStatus::Active).await.unwrap();
    handle.release_seat(3, 5).await.unwrap();
    let assignment = handle.assign_preferred_seat(4).await.unwrap();
    assert_eq!((assignment.table_id, assignment.seat_number), (3, 5));

    let history = handle.history().await.unwrap();
    assert_eq!(history.len(), 3);

    handle.shutdown().await.unwrap();
}
