//! Table allocation store: the seat assignment engine.
//!
//! The store owns the table registry, the occupancy map and the waitlist,
//! and is the only place where a seat and a waitlist entry change together.
//! Every mutating method validates first and mutates only once nothing can
//! fail, so callers observe either the full assignment or no change.

use super::{
    errors::{AllocationError, AllocationResult},
    models::{
        AssignmentSource, BoundsViolation, SeatAssignment, SeatEvent, SeatRelease, TableSummary,
    },
};
use crate::{
    config::AllocationConfig,
    seating::{OccupancyMap, SeatNumber},
    table::{Table, TableConfig, TableId, TablePatch, TableRegistry, TableStatus},
    waitlist::{EntryId, EntryMatcher, NewWaitlistEntry, PlayerId, WaitlistEntry, WaitlistQueue},
};
use chrono::Utc;

/// Owner of all seat allocation state for one session
#[derive(Debug, Clone)]
pub struct TableAllocationStore {
    /// Limits applied to tables and the waitlist
    config: AllocationConfig,

    /// Tables by ID
    registry: TableRegistry,

    /// Occupied seats per table
    occupancy: OccupancyMap,

    /// Players waiting for a seat
    waitlist: WaitlistQueue,

    /// Assignments and releases, oldest first
    history: Vec<SeatEvent>,
}

impl TableAllocationStore {
    /// Create an empty store
    pub fn new(config: AllocationConfig) -> Self {
        let waitlist = WaitlistQueue::new(config.max_waitlist_len);
        Self {
            config,
            registry: TableRegistry::new(),
            occupancy: OccupancyMap::new(),
            waitlist,
            history: Vec::new(),
        }
    }

    /// Assemble a store from prebuilt collections (seed data)
    ///
    /// Seats that fall outside their table are kept as given and logged;
    /// use [`TableAllocationStore::bounds_violations`] to inspect them.
    pub fn from_parts(
        config: AllocationConfig,
        registry: TableRegistry,
        occupancy: OccupancyMap,
        waitlist: WaitlistQueue,
    ) -> Self {
        let store = Self {
            config,
            registry,
            occupancy,
            waitlist,
            history: Vec::new(),
        };

        for violation in store.bounds_violations() {
            log::warn!("Seat data inconsistency: {}", violation);
        }

        store
    }

    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    // === Seat assignment ===

    /// Seat a player at a specific seat
    ///
    /// If the player has a waitlist entry it is removed; a player who was
    /// never waitlisted is seated all the same. Occupancy tracks seats, not
    /// players, so the same player may hold seats at several tables.
    ///
    /// # Arguments
    ///
    /// * `player_id` - Player being seated
    /// * `player_name` - Display name for the confirmation
    /// * `table_id` - Target table
    /// * `seat_number` - Target seat (1-based)
    ///
    /// # Returns
    ///
    /// * `AllocationResult<SeatAssignment>` - The committed assignment
    pub fn assign_seat(
        &mut self,
        player_id: &PlayerId,
        player_name: &str,
        table_id: TableId,
        seat_number: SeatNumber,
    ) -> AllocationResult<SeatAssignment> {
        if player_id.is_empty() {
            return Err(AllocationError::InvalidPlayer(
                "Player ID must not be empty".to_string(),
            ));
        }
        if player_name.trim().is_empty() {
            return Err(AllocationError::InvalidPlayer(
                "Player name must not be empty".to_string(),
            ));
        }

        self.check_seat(table_id, seat_number)?;

        if !self.occupancy.is_seat_available(table_id, seat_number) {
            log::warn!(
                "Rejected seat {} at table {} for player {}: already taken",
                seat_number,
                table_id,
                player_id
            );
            return Err(AllocationError::SeatUnavailable {
                table_id,
                seat_number,
            });
        }

        self.occupancy.occupy(table_id, seat_number);

        let waitlist_entry = self
            .waitlist
            .dequeue(&EntryMatcher::Player(player_id.clone()))
            .ok()
            .map(|entry| entry.id);

        let assignment = SeatAssignment {
            table_id,
            seat_number,
            player_id: player_id.clone(),
            player_name: player_name.to_string(),
            source: AssignmentSource::Direct,
            waitlist_entry,
            assigned_at: Utc::now(),
        };

        Ok(self.record_assignment(assignment))
    }

    /// Seat a waitlisted player at exactly the seat they asked for
    ///
    /// There is no fallback: if the preferred seat is taken the entry stays
    /// on the waitlist at its current position.
    ///
    /// # Returns
    ///
    /// * `AllocationResult<SeatAssignment>` - The committed assignment
    pub fn assign_preferred_seat(&mut self, entry_id: EntryId) -> AllocationResult<SeatAssignment> {
        let entry = self
            .waitlist
            .get(entry_id)
            .cloned()
            .ok_or_else(|| AllocationError::NotFound(EntryMatcher::Id(entry_id).to_string()))?;

        let (table_id, seat_number) = entry
            .preference()
            .ok_or(AllocationError::NoPreferenceSpecified(entry_id))?;

        self.check_seat(table_id, seat_number)?;

        if !self.occupancy.is_seat_available(table_id, seat_number) {
            log::warn!(
                "Preferred seat {} at table {} taken, player {} stays at waitlist position {}",
                seat_number,
                table_id,
                entry.player_id,
                entry.position
            );
            return Err(AllocationError::PreferredSeatTaken {
                table_id,
                seat_number,
            });
        }

        // Presence was checked above, so this cannot fail before the seat is taken.
        self.waitlist.dequeue(&EntryMatcher::Id(entry_id))?;
        self.occupancy.occupy(table_id, seat_number);

        let assignment = SeatAssignment {
            table_id,
            seat_number,
            player_id: entry.player_id,
            player_name: entry.player_name,
            source: AssignmentSource::Preferred,
            waitlist_entry: Some(entry_id),
            assigned_at: Utc::now(),
        };

        Ok(self.record_assignment(assignment))
    }

    /// Preferred-seat assignment for an entry as last rendered
    ///
    /// Only the entry's ID is used; the live queue is authoritative.
    pub fn assign_preferred_entry(
        &mut self,
        entry: &WaitlistEntry,
    ) -> AllocationResult<SeatAssignment> {
        self.assign_preferred_seat(entry.id)
    }

    /// Free a seat when a player leaves
    ///
    /// Releasing a free seat succeeds with `was_occupied = false`. Seats on
    /// ended tables and out-of-range seats may be released.
    pub fn release_seat(
        &mut self,
        table_id: TableId,
        seat_number: SeatNumber,
    ) -> AllocationResult<SeatRelease> {
        if !self.registry.contains(table_id) {
            return Err(AllocationError::TableNotFound(table_id));
        }

        let was_occupied = self.occupancy.release(table_id, seat_number);
        let release = SeatRelease {
            table_id,
            seat_number,
            was_occupied,
            released_at: Utc::now(),
        };

        if was_occupied {
            log::info!("Released seat {} at table {}", seat_number, table_id);
            self.history.push(SeatEvent::Released(release.clone()));
        }

        Ok(release)
    }

    /// Table exists, is not ended, and `seat_number` is one of its seats
    fn check_seat(&self, table_id: TableId, seat_number: SeatNumber) -> AllocationResult<&Table> {
        let table = self
            .registry
            .get(table_id)
            .ok_or(AllocationError::TableNotFound(table_id))?;

        if table.status == TableStatus::Ended {
            return Err(AllocationError::TableEnded(table_id));
        }

        if !table.contains_seat(seat_number) {
            return Err(AllocationError::SeatOutOfRange {
                table_id,
                seat_number,
                max_players: table.max_players,
            });
        }

        Ok(table)
    }

    fn record_assignment(&mut self, assignment: SeatAssignment) -> SeatAssignment {
        log::info!(
            "Seated player {} ({}) at table {} seat {} [{}]",
            assignment.player_id,
            assignment.player_name,
            assignment.table_id,
            assignment.seat_number,
            assignment.source
        );
        self.history.push(SeatEvent::Assigned(assignment.clone()));
        assignment
    }

    // === Tables ===

    /// Create a new active table
    pub fn create_table(&mut self, config: TableConfig) -> AllocationResult<TableId> {
        Ok(self
            .registry
            .create_table(config, self.config.max_table_size)?)
    }

    /// Update a table's settings
    ///
    /// Lowering `max_players` below the highest occupied seat number is
    /// rejected; seats are never evicted by an update. Keeping or raising
    /// capacity is always allowed, even when a seat is already out of range.
    pub fn update_table(
        &mut self,
        table_id: TableId,
        patch: TablePatch,
    ) -> AllocationResult<Table> {
        let table = self
            .registry
            .get(table_id)
            .ok_or(AllocationError::TableNotFound(table_id))?;

        if table.status.is_terminal() {
            return Err(AllocationError::TableEnded(table_id));
        }

        if let (Some(requested), Some(highest_occupied)) = (
            patch.max_players,
            self.occupancy.highest_occupied(table_id),
        ) && requested < table.max_players
            && requested < highest_occupied
        {
            return Err(AllocationError::CapacityBelowOccupancy {
                table_id,
                requested,
                highest_occupied,
            });
        }

        Ok(self
            .registry
            .update_table(table_id, &patch, self.config.max_table_size)?)
    }

    /// Change a table's status; seats and waitlist are untouched
    ///
    /// # Returns
    ///
    /// * `AllocationResult<TableStatus>` - Previous status
    pub fn set_table_status(
        &mut self,
        table_id: TableId,
        status: TableStatus,
    ) -> AllocationResult<TableStatus> {
        if !self.registry.contains(table_id) {
            return Err(AllocationError::TableNotFound(table_id));
        }
        Ok(self.registry.set_status(table_id, status)?)
    }

    pub fn table(&self, table_id: TableId) -> Option<&Table> {
        self.registry.get(table_id)
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> + '_ {
        self.registry.list()
    }

    /// Listing row for one table
    pub fn table_summary(&self, table_id: TableId) -> Option<TableSummary> {
        self.registry
            .get(table_id)
            .map(|table| self.summarize(table))
    }

    /// Listing rows for every table, ordered by ID
    pub fn table_summaries(&self) -> Vec<TableSummary> {
        self.registry
            .list()
            .map(|table| self.summarize(table))
            .collect()
    }

    fn summarize(&self, table: &Table) -> TableSummary {
        let waitlist_count = self
            .waitlist
            .list_filtered(|entry| match entry.preferred_table {
                Some(preferred) => preferred == table.id,
                None => entry.wants_game(&table.game_type),
            })
            .count();

        TableSummary {
            table: table.clone(),
            occupied_seats: self.occupancy.occupied_seats(table.id),
            open_seats: self.occupancy.open_seats(table.id, table.max_players),
            waitlist_count,
        }
    }

    // === Seats ===

    pub fn is_seat_available(&self, table_id: TableId, seat_number: SeatNumber) -> bool {
        self.occupancy.is_seat_available(table_id, seat_number)
    }

    pub fn occupied_seats(&self, table_id: TableId) -> Vec<SeatNumber> {
        self.occupancy.occupied_seats(table_id)
    }

    pub fn occupancy(&self) -> &OccupancyMap {
        &self.occupancy
    }

    /// Occupied seats that do not fit their table
    ///
    /// Reports seats outside `1..=max_players` and seats recorded for
    /// tables the registry does not know.
    pub fn bounds_violations(&self) -> Vec<BoundsViolation> {
        self.occupancy
            .iter()
            .filter_map(|(table_id, seat_number)| match self.registry.get(table_id) {
                Some(table) if table.contains_seat(seat_number) => None,
                Some(table) => Some(BoundsViolation {
                    table_id,
                    seat_number,
                    max_players: Some(table.max_players),
                }),
                None => Some(BoundsViolation {
                    table_id,
                    seat_number,
                    max_players: None,
                }),
            })
            .collect()
    }

    // === Waitlist ===

    /// Add a player to the waitlist
    ///
    /// A preferred table must exist and still be open; a preferred seat must
    /// be one of that table's seats. Availability is not checked here.
    pub fn join_waitlist(&mut self, request: NewWaitlistEntry) -> AllocationResult<WaitlistEntry> {
        if let Some(table_id) = request.preferred_table {
            let table = self
                .registry
                .get(table_id)
                .ok_or(AllocationError::TableNotFound(table_id))?;

            if table.status == TableStatus::Ended {
                return Err(AllocationError::TableEnded(table_id));
            }

            if let Some(seat_number) = request.preferred_seat
                && !table.contains_seat(seat_number)
            {
                return Err(AllocationError::SeatOutOfRange {
                    table_id,
                    seat_number,
                    max_players: table.max_players,
                });
            }
        }

        let entry = self.waitlist.enqueue(request)?;
        log::info!(
            "Player {} ({}) waitlisted for {} at position {}",
            entry.player_id,
            entry.player_name,
            entry.game_type,
            entry.position
        );
        Ok(entry)
    }

    /// Remove a waitlist entry without seating the player
    pub fn leave_waitlist(&mut self, matcher: &EntryMatcher) -> AllocationResult<WaitlistEntry> {
        let entry = self.waitlist.dequeue(matcher)?;
        log::info!("Player {} left the waitlist", entry.player_id);
        Ok(entry)
    }

    pub fn waitlist(&self) -> &WaitlistQueue {
        &self.waitlist
    }

    pub fn waitlist_for_game_type(&self, game_type: &str) -> Vec<WaitlistEntry> {
        self.waitlist.for_game_type(game_type).cloned().collect()
    }

    pub fn waitlist_for_table(&self, table_id: TableId) -> Vec<WaitlistEntry> {
        self.waitlist.for_table(table_id).cloned().collect()
    }

    // === History ===

    pub fn history(&self) -> &[SeatEvent] {
        &self.history
    }
}
