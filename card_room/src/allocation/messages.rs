//! Allocation actor message types.

use super::{
    errors::AllocationResult,
    models::{BoundsViolation, SeatAssignment, SeatEvent, SeatRelease, TableSummary},
};
use crate::{
    seating::SeatNumber,
    table::{Table, TableConfig, TableId, TablePatch, TableStatus},
    waitlist::{EntryId, EntryMatcher, NewWaitlistEntry, PlayerId, WaitlistEntry},
};
use tokio::sync::oneshot;

/// Messages that can be sent to an AllocationActor
#[derive(Debug)]
pub enum AllocationMessage {
    /// Seat a player at a chosen seat
    AssignSeat {
        player_id: PlayerId,
        player_name: String,
        table_id: TableId,
        seat_number: SeatNumber,
        response: oneshot::Sender<AllocationResult<SeatAssignment>>,
    },

    /// Seat a waitlisted player at their preferred seat
    AssignPreferredSeat {
        entry_id: EntryId,
        response: oneshot::Sender<AllocationResult<SeatAssignment>>,
    },

    /// Free a seat
    ReleaseSeat {
        table_id: TableId,
        seat_number: SeatNumber,
        response: oneshot::Sender<AllocationResult<SeatRelease>>,
    },

    /// Join waitlist
    JoinWaitlist {
        request: NewWaitlistEntry,
        response: oneshot::Sender<AllocationResult<WaitlistEntry>>,
    },

    /// Leave waitlist
    LeaveWaitlist {
        matcher: EntryMatcher,
        response: oneshot::Sender<AllocationResult<WaitlistEntry>>,
    },

    /// Create table (admin only)
    CreateTable {
        config: TableConfig,
        response: oneshot::Sender<AllocationResult<TableId>>,
    },

    /// Update table settings (admin only)
    UpdateTable {
        table_id: TableId,
        patch: TablePatch,
        response: oneshot::Sender<AllocationResult<Table>>,
    },

    /// Change table status (admin only)
    SetTableStatus {
        table_id: TableId,
        status: TableStatus,
        response: oneshot::Sender<AllocationResult<TableStatus>>,
    },

    /// Get one table with seat details
    GetTable {
        table_id: TableId,
        response: oneshot::Sender<Option<TableSummary>>,
    },

    /// List all tables with seat details
    ListTables {
        response: oneshot::Sender<Vec<TableSummary>>,
    },

    /// Get waitlist, optionally only entries for one game type
    GetWaitlist {
        game_type: Option<String>,
        response: oneshot::Sender<Vec<WaitlistEntry>>,
    },

    /// Get seat history
    GetHistory {
        response: oneshot::Sender<Vec<SeatEvent>>,
    },

    /// Check occupied seats against table capacity
    Audit {
        response: oneshot::Sender<Vec<BoundsViolation>>,
    },

    /// Stop the actor
    Shutdown { response: oneshot::Sender<()> },
}
