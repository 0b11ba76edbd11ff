//! Table registry error types.

use thiserror::Error;

use super::models::{TableId, TableStatus};

/// Table registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Table not found
    #[error("Table not found: {0}")]
    NotFound(TableId),

    /// Table ID already registered
    #[error("Table {0} already exists")]
    DuplicateTable(TableId),

    /// Configuration rejected by validation
    #[error("Invalid table configuration: {0}")]
    InvalidConfig(String),

    /// Status change not allowed
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: TableStatus, to: TableStatus },

    /// Table has ended and can no longer be changed
    #[error("Table {0} has ended")]
    TableEnded(TableId),
}

/// Result type for table registry operations
pub type TableResult<T> = Result<T, TableError>;
