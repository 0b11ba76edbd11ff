//! In-memory registry of card-room tables.

use super::{
    config::TableConfig,
    errors::{TableError, TableResult},
    models::{Table, TableId, TablePatch, TableStatus},
};
use std::collections::BTreeMap;

/// Registry holding every table known to the session
#[derive(Debug, Clone)]
pub struct TableRegistry {
    /// Tables keyed by ID (ordered for stable listings)
    tables: BTreeMap<TableId, Table>,

    /// Next table ID to hand out
    next_table_id: TableId,
}

impl Default for TableRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            tables: BTreeMap::new(),
            next_table_id: 1,
        }
    }

    /// Create and register a new active table
    ///
    /// # Arguments
    ///
    /// * `config` - Table configuration
    /// * `max_table_size` - Largest capacity the card room allows
    ///
    /// # Returns
    ///
    /// * `TableResult<TableId>` - ID of the new table
    pub fn create_table(
        &mut self,
        config: TableConfig,
        max_table_size: usize,
    ) -> TableResult<TableId> {
        config
            .validate(max_table_size)
            .map_err(TableError::InvalidConfig)?;

        let table_id = self.next_table_id;
        self.next_table_id += 1;

        let table = Table::from_config(table_id, config);
        log::info!(
            "Created table {} '{}' ({} seats, {})",
            table_id,
            table.name,
            table.max_players,
            table.game_type
        );
        self.tables.insert(table_id, table);

        Ok(table_id)
    }

    /// Register a fully-formed table (seed data)
    ///
    /// No capacity validation is performed here so that seeded tables are
    /// loaded exactly as given.
    pub fn insert(&mut self, table: Table) -> TableResult<()> {
        if self.tables.contains_key(&table.id) {
            return Err(TableError::DuplicateTable(table.id));
        }

        self.next_table_id = self.next_table_id.max(table.id + 1);
        self.tables.insert(table.id, table);
        Ok(())
    }

    /// Get a table by ID
    pub fn get(&self, table_id: TableId) -> Option<&Table> {
        self.tables.get(&table_id)
    }

    /// Whether a table with this ID exists
    pub fn contains(&self, table_id: TableId) -> bool {
        self.tables.contains_key(&table_id)
    }

    /// All tables ordered by ID
    pub fn list(&self) -> impl Iterator<Item = &Table> + '_ {
        self.tables.values()
    }

    /// Number of registered tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Merge a patch into an existing table
    ///
    /// The merged settings are validated as a whole. Occupancy is not
    /// consulted here; callers holding seat state must check capacity
    /// reductions themselves.
    ///
    /// # Returns
    ///
    /// * `TableResult<Table>` - Updated table
    pub fn update_table(
        &mut self,
        table_id: TableId,
        patch: &TablePatch,
        max_table_size: usize,
    ) -> TableResult<Table> {
        let table = self
            .tables
            .get_mut(&table_id)
            .ok_or(TableError::NotFound(table_id))?;

        if table.status.is_terminal() {
            return Err(TableError::TableEnded(table_id));
        }

        let merged = patch.apply_to(table.to_config());
        merged
            .validate(max_table_size)
            .map_err(TableError::InvalidConfig)?;

        table.name = merged.name;
        table.game_type = merged.game_type;
        table.max_players = merged.max_players;
        table.stakes = merged.stakes;

        log::info!("Updated table {}", table_id);
        Ok(table.clone())
    }

    /// Change a table's lifecycle status
    ///
    /// # Returns
    ///
    /// * `TableResult<TableStatus>` - Previous status
    pub fn set_status(
        &mut self,
        table_id: TableId,
        new_status: TableStatus,
    ) -> TableResult<TableStatus> {
        let table = self
            .tables
            .get_mut(&table_id)
            .ok_or(TableError::NotFound(table_id))?;

        let previous = table.status;
        if !previous.can_transition_to(new_status) {
            return Err(TableError::InvalidTransition {
                from: previous,
                to: new_status,
            });
        }

        if previous != new_status {
            table.status = new_status;
            log::info!("Table {} status {} -> {}", table_id, previous, new_status);
        }

        Ok(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with_table() -> (TableRegistry, TableId) {
        let mut registry = TableRegistry::new();
        let id = registry
            .create_table(TableConfig::new("Table 1", "Texas Hold'em", 6), 23)
            .unwrap();
        (registry, id)
    }

    #[test]
    fn test_create_table_is_active() {
        let (registry, id) = registry_with_table();
        let table = registry.get(id).unwrap();
        assert_eq!(id, 1);
        assert_eq!(table.status, TableStatus::Active);
        assert_eq!(table.max_players, 6);
    }

    #[test]
    fn test_create_table_ids_increment() {
        let (mut registry, _) = registry_with_table();
        let second = registry
            .create_table(TableConfig::new("Table 2", "Omaha", 9), 23)
            .unwrap();
        assert_eq!(second, 2);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_create_table_invalid_config() {
        let mut registry = TableRegistry::new();
        let result = registry.create_table(TableConfig::new("Bad", "Omaha", 0), 23);
        assert!(matches!(result, Err(TableError::InvalidConfig(_))));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_insert_bumps_next_id() {
        let mut registry = TableRegistry::new();
        let seeded = Table::from_config(7, TableConfig::new("Seeded", "Omaha", 6));
        registry.insert(seeded.clone()).unwrap();

        assert_eq!(registry.insert(seeded), Err(TableError::DuplicateTable(7)));

        let next = registry
            .create_table(TableConfig::new("Next", "Omaha", 6), 23)
            .unwrap();
        assert_eq!(next, 8);
    }

    #[test]
    fn test_update_table_merges_patch() {
        let (mut registry, id) = registry_with_table();
        let patch = TablePatch {
            name: Some("Feature Table".to_string()),
            max_players: Some(8),
            ..TablePatch::default()
        };

        let updated = registry.update_table(id, &patch, 23).unwrap();
        assert_eq!(updated.name, "Feature Table");
        assert_eq!(updated.max_players, 8);
        assert_eq!(updated.game_type, "Texas Hold'em");
    }

    #[test]
    fn test_update_table_rejects_invalid_merge() {
        let (mut registry, id) = registry_with_table();
        let result = registry.update_table(id, &TablePatch::capacity(0), 23);
        assert!(matches!(result, Err(TableError::InvalidConfig(_))));
        assert_eq!(registry.get(id).unwrap().max_players, 6);
    }

    #[test]
    fn test_update_missing_table() {
        let mut registry = TableRegistry::new();
        let result = registry.update_table(42, &TablePatch::default(), 23);
        assert_eq!(result, Err(TableError::NotFound(42)));
    }

    #[test]
    fn test_status_toggle_and_end() {
        let (mut registry, id) = registry_with_table();

        assert_eq!(
            registry.set_status(id, TableStatus::Paused),
            Ok(TableStatus::Active)
        );
        assert_eq!(
            registry.set_status(id, TableStatus::Active),
            Ok(TableStatus::Paused)
        );
        assert_eq!(
            registry.set_status(id, TableStatus::Ended),
            Ok(TableStatus::Active)
        );

        let result = registry.set_status(id, TableStatus::Active);
        assert_eq!(
            result,
            Err(TableError::InvalidTransition {
                from: TableStatus::Ended,
                to: TableStatus::Active,
            })
        );
    }

    #[test]
    fn test_ended_table_cannot_be_updated() {
        let (mut registry, id) = registry_with_table();
        registry.set_status(id, TableStatus::Ended).unwrap();

        let result = registry.update_table(id, &TablePatch::capacity(9), 23);
        assert_eq!(result, Err(TableError::TableEnded(id)));
    }
}
