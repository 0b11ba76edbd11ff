//! Ordered waitlist queue.

use super::{
    errors::{WaitlistError, WaitlistResult},
    models::{EntryId, EntryMatcher, NewWaitlistEntry, PlayerId, WaitlistEntry},
};
use crate::table::TableId;
use chrono::Utc;
use std::collections::VecDeque;

/// Default cap on waitlist length
pub const DEFAULT_WAITLIST_CAPACITY: usize = 200;

/// FIFO list of players waiting for a seat
///
/// Entries are only ever appended at the tail or removed; the relative order
/// of the remaining entries never changes. Positions are kept equal to
/// `index + 1` after every removal.
#[derive(Debug, Clone)]
pub struct WaitlistQueue {
    entries: VecDeque<WaitlistEntry>,
    next_entry_id: EntryId,
    capacity: usize,
}

impl Default for WaitlistQueue {
    fn default() -> Self {
        Self::new(DEFAULT_WAITLIST_CAPACITY)
    }
}

impl WaitlistQueue {
    /// Create an empty queue holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_WAITLIST_CAPACITY)),
            next_entry_id: 1,
            capacity,
        }
    }

    /// Build a queue from seed requests, in the given arrival order
    pub fn from_seed<I>(requests: I, capacity: usize) -> WaitlistResult<Self>
    where
        I: IntoIterator<Item = NewWaitlistEntry>,
    {
        let mut queue = Self::new(capacity);
        for request in requests {
            queue.enqueue(request)?;
        }
        Ok(queue)
    }

    /// Append a request to the tail of the queue
    ///
    /// # Returns
    ///
    /// * `WaitlistResult<WaitlistEntry>` - The stored entry with its ID and position
    pub fn enqueue(&mut self, request: NewWaitlistEntry) -> WaitlistResult<WaitlistEntry> {
        request.validate().map_err(WaitlistError::InvalidEntry)?;

        if self.contains_player(&request.player_id) {
            return Err(WaitlistError::AlreadyWaitlisted(request.player_id));
        }

        if self.entries.len() >= self.capacity {
            return Err(WaitlistError::WaitlistFull {
                capacity: self.capacity,
            });
        }

        let entry = WaitlistEntry {
            id: self.next_entry_id,
            player_id: request.player_id,
            player_name: request.player_name,
            game_type: request.game_type,
            preferred_table: request.preferred_table,
            preferred_seat: request.preferred_seat,
            position: self.entries.len() + 1,
            joined_at: Utc::now(),
        };
        self.next_entry_id += 1;

        log::debug!(
            "Player {} joined waitlist at position {}",
            entry.player_id,
            entry.position
        );
        self.entries.push_back(entry.clone());

        Ok(entry)
    }

    /// Remove the first entry matching `matcher`
    ///
    /// # Returns
    ///
    /// * `WaitlistResult<WaitlistEntry>` - The removed entry, or `NotFound`
    pub fn dequeue(&mut self, matcher: &EntryMatcher) -> WaitlistResult<WaitlistEntry> {
        let index = self
            .entries
            .iter()
            .position(|entry| matcher.matches(entry))
            .ok_or_else(|| WaitlistError::NotFound(matcher.to_string()))?;

        let removed = self
            .entries
            .remove(index)
            .ok_or_else(|| WaitlistError::NotFound(matcher.to_string()))?;

        for (offset, entry) in self.entries.iter_mut().enumerate().skip(index) {
            entry.position = offset + 1;
        }

        Ok(removed)
    }

    /// Lazily iterate entries accepted by `predicate`, in queue order
    ///
    /// The iterator borrows the queue and can be cloned to restart the view.
    pub fn list_filtered<'a, P>(
        &'a self,
        predicate: P,
    ) -> impl Iterator<Item = &'a WaitlistEntry> + Clone + 'a
    where
        P: Fn(&WaitlistEntry) -> bool + Clone + 'a,
    {
        self.entries.iter().filter(move |entry| predicate(*entry))
    }

    /// Entries wanting `game_type` (case-insensitive)
    pub fn for_game_type<'a>(
        &'a self,
        game_type: &'a str,
    ) -> impl Iterator<Item = &'a WaitlistEntry> + Clone + 'a {
        self.list_filtered(move |entry| entry.wants_game(game_type))
    }

    /// Entries that asked for `table_id`
    pub fn for_table(
        &self,
        table_id: TableId,
    ) -> impl Iterator<Item = &WaitlistEntry> + Clone + '_ {
        self.list_filtered(move |entry| entry.preferred_table == Some(table_id))
    }

    /// Look up an entry by ID
    pub fn get(&self, entry_id: EntryId) -> Option<&WaitlistEntry> {
        self.entries.iter().find(|entry| entry.id == entry_id)
    }

    /// Current 1-based position of a player
    pub fn position_of(&self, player_id: &PlayerId) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| &entry.player_id == player_id)
            .map(|entry| entry.position)
    }

    pub fn contains_player(&self, player_id: &PlayerId) -> bool {
        self.entries.iter().any(|entry| &entry.player_id == player_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WaitlistEntry> + Clone + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue() -> WaitlistQueue {
        WaitlistQueue::from_seed(
            [
                NewWaitlistEntry::new("P001", "Dana", "Texas Hold'em").prefer_seat(1, 3),
                NewWaitlistEntry::new("P002", "Eli", "Omaha"),
                NewWaitlistEntry::new("P003", "Fay", "Texas Hold'em").prefer_table(2),
                NewWaitlistEntry::new("P004", "Gus", "Omaha"),
            ],
            10,
        )
        .unwrap()
    }

    fn player_ids(queue: &WaitlistQueue) -> Vec<&str> {
        queue.iter().map(|entry| entry.player_id.as_str()).collect()
    }

    #[test]
    fn test_enqueue_assigns_position_and_id() {
        let mut queue = queue();
        let entry = queue
            .enqueue(NewWaitlistEntry::new("P005", "Hal", "Omaha"))
            .unwrap();
        assert_eq!(entry.position, 5);
        assert_eq!(entry.id, 5);
        assert_eq!(queue.len(), 5);
    }

    #[test]
    fn test_enqueue_rejects_duplicate_player() {
        let mut queue = queue();
        let result = queue.enqueue(NewWaitlistEntry::new("P002", "Eli", "Stud"));
        assert_eq!(result, Err(WaitlistError::AlreadyWaitlisted("P002".into())));
    }

    #[test]
    fn test_enqueue_rejects_when_full() {
        let mut queue = WaitlistQueue::new(1);
        queue
            .enqueue(NewWaitlistEntry::new("P001", "Dana", "Omaha"))
            .unwrap();
        let result = queue.enqueue(NewWaitlistEntry::new("P002", "Eli", "Omaha"));
        assert_eq!(result, Err(WaitlistError::WaitlistFull { capacity: 1 }));
    }

    #[test]
    fn test_dequeue_by_player_preserves_order() {
        let mut queue = queue();
        let removed = queue.dequeue(&EntryMatcher::Player("P002".into())).unwrap();
        assert_eq!(removed.player_name, "Eli");
        assert_eq!(player_ids(&queue), vec!["P001", "P003", "P004"]);

        let positions: Vec<_> = queue.iter().map(|entry| entry.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn test_dequeue_by_id() {
        let mut queue = queue();
        let removed = queue.dequeue(&EntryMatcher::Id(1)).unwrap();
        assert_eq!(removed.player_id.as_str(), "P001");
        assert_eq!(queue.position_of(&"P004".into()), Some(3));
    }

    #[test]
    fn test_dequeue_missing_is_not_found() {
        let mut queue = queue();
        let result = queue.dequeue(&EntryMatcher::Id(99));
        assert!(matches!(result, Err(WaitlistError::NotFound(_))));
        assert_eq!(queue.len(), 4);
    }

    #[test]
    fn test_entry_ids_are_not_reused() {
        let mut queue = queue();
        queue.dequeue(&EntryMatcher::Id(4)).unwrap();
        let entry = queue
            .enqueue(NewWaitlistEntry::new("P009", "Ivy", "Omaha"))
            .unwrap();
        assert_eq!(entry.id, 5);
        assert_eq!(entry.position, 4);
    }

    #[test]
    fn test_list_filtered_is_restartable() {
        let queue = queue();
        let omaha = queue.for_game_type("omaha");

        let first: Vec<_> = omaha.clone().map(|entry| entry.id).collect();
        let second: Vec<_> = omaha.map(|entry| entry.id).collect();
        assert_eq!(first, vec![2, 4]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_for_table() {
        let queue = queue();
        let ids: Vec<_> = queue.for_table(1).map(|entry| entry.id).collect();
        assert_eq!(ids, vec![1]);
        assert_eq!(queue.for_table(7).count(), 0);
    }
}
