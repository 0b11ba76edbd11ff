//! Allocation actor: serialized access to a [`TableAllocationStore`].

use super::{
    errors::{AllocationError, AllocationResult},
    messages::AllocationMessage,
    models::{BoundsViolation, SeatAssignment, SeatEvent, SeatRelease, TableSummary},
    store::TableAllocationStore,
};
use crate::{
    seating::SeatNumber,
    table::{Table, TableConfig, TableId, TablePatch, TableStatus},
    waitlist::{EntryId, EntryMatcher, NewWaitlistEntry, PlayerId, WaitlistEntry},
};
use tokio::{sync::mpsc, sync::oneshot, task::JoinHandle};

/// Allocation actor handle for sending messages
#[derive(Clone)]
pub struct AllocationHandle {
    sender: mpsc::Sender<AllocationMessage>,
}

impl AllocationHandle {
    /// Create a new allocation handle
    pub fn new(sender: mpsc::Sender<AllocationMessage>) -> Self {
        Self { sender }
    }

    /// Send a message to the actor
    pub async fn send(&self, message: AllocationMessage) -> AllocationResult<()> {
        self.sender
            .send(message)
            .await
            .map_err(|_| AllocationError::ActorClosed)
    }

    /// Whether the actor has stopped
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> AllocationMessage,
    ) -> AllocationResult<T> {
        let (tx, rx) = oneshot::channel();
        self.send(build(tx)).await?;
        rx.await.map_err(|_| AllocationError::ActorClosed)
    }

    pub async fn assign_seat(
        &self,
        player_id: PlayerId,
        player_name: String,
        table_id: TableId,
        seat_number: SeatNumber,
    ) -> AllocationResult<SeatAssignment> {
        self.request(|response| AllocationMessage::AssignSeat {
            player_id,
            player_name,
            table_id,
            seat_number,
            response,
        })
        .await?
    }

    pub async fn assign_preferred_seat(
        &self,
        entry_id: EntryId,
    ) -> AllocationResult<SeatAssignment> {
        self.request(|response| AllocationMessage::AssignPreferredSeat { entry_id, response })
            .await?
    }

    pub async fn release_seat(
        &self,
        table_id: TableId,
        seat_number: SeatNumber,
    ) -> AllocationResult<SeatRelease> {
        self.request(|response| AllocationMessage::ReleaseSeat {
            table_id,
            seat_number,
            response,
        })
        .await?
    }

    pub async fn join_waitlist(
        &self,
        request: NewWaitlistEntry,
    ) -> AllocationResult<WaitlistEntry> {
        self.request(|response| AllocationMessage::JoinWaitlist { request, response })
            .await?
    }

    pub async fn leave_waitlist(&self, matcher: EntryMatcher) -> AllocationResult<WaitlistEntry> {
        self.request(|response| AllocationMessage::LeaveWaitlist { matcher, response })
            .await?
    }

    pub async fn create_table(&self, config: TableConfig) -> AllocationResult<TableId> {
        self.request(|response| AllocationMessage::CreateTable { config, response })
            .await?
    }

    pub async fn update_table(
        &self,
        table_id: TableId,
        patch: TablePatch,
    ) -> AllocationResult<Table> {
        self.request(|response| AllocationMessage::UpdateTable {
            table_id,
            patch,
            response,
        })
        .await?
    }

    pub async fn set_table_status(
        &self,
        table_id: TableId,
        status: TableStatus,
    ) -> AllocationResult<TableStatus> {
        self.request(|response| AllocationMessage::SetTableStatus {
            table_id,
            status,
            response,
        })
        .await?
    }

    pub async fn table(&self, table_id: TableId) -> AllocationResult<Option<TableSummary>> {
        self.request(|response| AllocationMessage::GetTable { table_id, response })
            .await
    }

    pub async fn tables(&self) -> AllocationResult<Vec<TableSummary>> {
        self.request(|response| AllocationMessage::ListTables { response })
            .await
    }

    pub async fn waitlist(&self, game_type: Option<String>) -> AllocationResult<Vec<WaitlistEntry>> {
        self.request(|response| AllocationMessage::GetWaitlist {
            game_type,
            response,
        })
        .await
    }

    pub async fn history(&self) -> AllocationResult<Vec<SeatEvent>> {
        self.request(|response| AllocationMessage::GetHistory { response })
            .await
    }

    pub async fn audit(&self) -> AllocationResult<Vec<BoundsViolation>> {
        self.request(|response| AllocationMessage::Audit { response })
            .await
    }

    /// Stop the actor and wait for it to acknowledge
    pub async fn shutdown(&self) -> AllocationResult<()> {
        self.request(|response| AllocationMessage::Shutdown { response })
            .await
    }
}

/// Actor owning the allocation store
///
/// Messages are handled one at a time, so every engine operation runs to
/// completion before the next one is observed.
pub struct AllocationActor {
    /// Seat allocation state
    store: TableAllocationStore,

    /// Message inbox
    inbox: mpsc::Receiver<AllocationMessage>,
}

impl AllocationActor {
    /// Create a new allocation actor
    ///
    /// # Arguments
    ///
    /// * `store` - Store the actor takes ownership of
    ///
    /// # Returns
    ///
    /// * `(AllocationActor, AllocationHandle)` - Actor and handle for sending messages
    pub fn new(store: TableAllocationStore) -> (Self, AllocationHandle) {
        let (sender, inbox) = mpsc::channel(store.config().inbox_capacity.max(1));
        let actor = Self { store, inbox };
        (actor, AllocationHandle::new(sender))
    }

    /// Spawn the actor on the current Tokio runtime
    ///
    /// The join handle yields the store once the actor stops.
    pub fn spawn(store: TableAllocationStore) -> (AllocationHandle, JoinHandle<TableAllocationStore>) {
        let (actor, handle) = Self::new(store);
        let task = tokio::spawn(actor.run());
        (handle, task)
    }

    /// Run the actor event loop until shutdown or until every handle is dropped
    pub async fn run(mut self) -> TableAllocationStore {
        log::info!(
            "Allocation actor starting with {} table(s)",
            self.store.tables().count()
        );

        while let Some(message) = self.inbox.recv().await {
            if !self.handle_message(message) {
                break;
            }
        }

        log::info!("Allocation actor stopped");
        self.store
    }

    /// Handle one message; returns `false` when the actor should stop
    fn handle_message(&mut self, message: AllocationMessage) -> bool {
        match message {
            AllocationMessage::AssignSeat {
                player_id,
                player_name,
                table_id,
                seat_number,
                response,
            } => {
                let result =
                    self.store
                        .assign_seat(&player_id, &player_name, table_id, seat_number);
                let _ = response.send(result);
            }

            AllocationMessage::AssignPreferredSeat { entry_id, response } => {
                let result = self.store.assign_preferred_seat(entry_id);
                let _ = response.send(result);
            }

            AllocationMessage::ReleaseSeat {
                table_id,
                seat_number,
                response,
            } => {
                let result = self.store.release_seat(table_id, seat_number);
                let _ = response.send(result);
            }

            AllocationMessage::JoinWaitlist { request, response } => {
                let result = self.store.join_waitlist(request);
                let _ = response.send(result);
            }

            AllocationMessage::LeaveWaitlist { matcher, response } => {
                let result = self.store.leave_waitlist(&matcher);
                let _ = response.send(result);
            }

            AllocationMessage::CreateTable { config, response } => {
                let result = self.store.create_table(config);
                let _ = response.send(result);
            }

            AllocationMessage::UpdateTable {
                table_id,
                patch,
                response,
            } => {
                let result = self.store.update_table(table_id, patch);
                let _ = response.send(result);
            }

            AllocationMessage::SetTableStatus {
                table_id,
                status,
                response,
            } => {
                let result = self.store.set_table_status(table_id, status);
                let _ = response.send(result);
            }

            AllocationMessage::GetTable { table_id, response } => {
                let _ = response.send(self.store.table_summary(table_id));
            }

            AllocationMessage::ListTables { response } => {
                let _ = response.send(self.store.table_summaries());
            }

            AllocationMessage::GetWaitlist {
                game_type,
                response,
            } => {
                let entries = match game_type {
                    Some(game_type) => self.store.waitlist_for_game_type(&game_type),
                    None => self.store.waitlist().iter().cloned().collect(),
                };
                let _ = response.send(entries);
            }

            AllocationMessage::GetHistory { response } => {
                let _ = response.send(self.store.history().to_vec());
            }

            AllocationMessage::Audit { response } => {
                let _ = response.send(self.store.bounds_violations());
            }

            AllocationMessage::Shutdown { response } => {
                log::debug!("Allocation actor received shutdown");
                let _ = response.send(());
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AllocationConfig;

    fn empty_store() -> TableAllocationStore {
        TableAllocationStore::new(AllocationConfig::default())
    }

    #[tokio::test]
    async fn test_actor_round_trip() {
        let (handle, task) = AllocationActor::spawn(empty_store());

        let table_id = handle
            .create_table(TableConfig::new("Table 1", "Omaha", 6))
            .await
            .unwrap();
        let assignment = handle
            .assign_seat("P001".into(), "Dana".to_string(), table_id, 2)
            .await
            .unwrap();
        assert_eq!(assignment.seat_number, 2);

        let summary = handle.table(table_id).await.unwrap().unwrap();
        assert_eq!(summary.occupied_seats, vec![2]);

        handle.shutdown().await.unwrap();
        let store = task.await.unwrap();
        assert_eq!(store.history().len(), 1);
    }

    #[tokio::test]
    async fn test_engine_errors_pass_through() {
        let (handle, _task) = AllocationActor::spawn(empty_store());

        let err = handle
            .assign_seat("P001".into(), "Dana".to_string(), 1, 1)
            .await
            .unwrap_err();
        assert_eq!(err, AllocationError::TableNotFound(1));
    }

    #[tokio::test]
    async fn test_requests_after_shutdown_fail() {
        let (handle, task) = AllocationActor::spawn(empty_store());
        handle.shutdown().await.unwrap();
        task.await.unwrap();

        assert!(handle.is_closed());
        assert_eq!(handle.tables().await, Err(AllocationError::ActorClosed));
    }
}
