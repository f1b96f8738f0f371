//! Error types for the datagrid.

use crate::column::ColumnId;

/// Result type alias for datagrid operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when mutating datagrid state.
///
/// Most consistency conditions in the datagrid are policy, not errors: a
/// length mismatch between columns and cells skips the alignment pass, and a
/// redundant visibility write is ignored. The variants here are the cases a
/// caller can actually get wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The column id is not registered with this grid.
    #[error("no column registered with id '{0}'")]
    UnknownColumn(ColumnId),

    /// Hiding this column would leave the grid with no visible columns.
    #[error("cannot hide column '{0}': it is the last visible column")]
    LastVisibleColumn(ColumnId),
}
