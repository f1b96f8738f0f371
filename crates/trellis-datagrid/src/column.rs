//! Hideable column descriptors and the per-grid column registry.
//!
//! Columns are owned by the grid, not by rows. Each grid holds one
//! [`HideableColumnRegistry`] describing the ordered set of columns and
//! their visibility; every row observes the registry's change signal and
//! re-aligns its cells against the latest snapshot.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use trellis_core::Signal;

use crate::error::{Error, Result};

/// A global counter for generating unique column identities.
static COLUMN_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Stable identity token for one logical column.
///
/// Ids are unique for the lifetime of the process and survive reordering and
/// visibility changes; a cell tagged with a `ColumnId` stays associated with
/// the same logical column no matter where that column moves. The `Display`
/// form (`datagrid-column-{n}`) is the token handed to the accessibility
/// layer to link cells with their column headers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(u64);

impl ColumnId {
    /// Allocates the next unique column identity.
    pub fn next() -> Self {
        Self(COLUMN_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw numeric identity.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "datagrid-column-{}", self.0)
    }
}

impl fmt::Debug for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ColumnId({})", self.0)
    }
}

/// Descriptor for one column: stable identity plus visibility.
///
/// Ordinal position is implied by the column's position in the registry
/// list. Descriptors are plain values; rows receive read-only snapshots and
/// never write them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HideableColumn {
    id: ColumnId,
    hidden: bool,
}

impl HideableColumn {
    /// Creates a visible column with a freshly allocated identity.
    pub fn new() -> Self {
        Self {
            id: ColumnId::next(),
            hidden: false,
        }
    }

    /// Creates a column with a freshly allocated identity and the given
    /// initial visibility.
    pub fn with_hidden(hidden: bool) -> Self {
        Self {
            id: ColumnId::next(),
            hidden,
        }
    }

    /// Returns this column's stable identity.
    pub fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns whether this column is hidden.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

impl Default for HideableColumn {
    fn default() -> Self {
        Self::new()
    }
}

/// The shared, per-grid registry of hideable columns.
///
/// Holds the ordered column list and emits [`columns_changed`] with the new
/// snapshot whenever the list changes - membership, order, or visibility.
/// Rows only ever read the registry; mutation comes from the grid and its
/// column-management UI.
///
/// # Signals
///
/// - `columns_changed(Vec<HideableColumn>)`: Emitted with the new ordered
///   list after every effective change
///
/// [`columns_changed`]: HideableColumnRegistry::columns_changed
pub struct HideableColumnRegistry {
    columns: RwLock<Vec<HideableColumn>>,

    /// Emitted with the new ordered column list after every change.
    pub columns_changed: Signal<Vec<HideableColumn>>,
}

impl Default for HideableColumnRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HideableColumnRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            columns: RwLock::new(Vec::new()),
            columns_changed: Signal::new(),
        }
    }

    /// Creates a registry pre-populated with the given columns.
    pub fn with_columns(columns: Vec<HideableColumn>) -> Self {
        Self {
            columns: RwLock::new(columns),
            columns_changed: Signal::new(),
        }
    }

    /// Returns a snapshot of the current ordered column list.
    pub fn columns(&self) -> Vec<HideableColumn> {
        self.columns.read().clone()
    }

    /// Returns the number of registered columns.
    pub fn len(&self) -> usize {
        self.columns.read().len()
    }

    /// Returns `true` if no columns are registered.
    pub fn is_empty(&self) -> bool {
        self.columns.read().is_empty()
    }

    /// Returns the number of currently visible columns.
    pub fn visible_count(&self) -> usize {
        self.columns.read().iter().filter(|c| !c.hidden).count()
    }

    /// Returns whether the column with the given id is hidden, or `None` if
    /// the id is not registered.
    pub fn column_hidden(&self, id: ColumnId) -> Option<bool> {
        self.columns
            .read()
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.hidden)
    }

    /// Replaces the whole column list.
    ///
    /// The grid calls this when columns are declared, removed, or reordered.
    /// Always emits, even if the new list compares equal: a re-projection
    /// with fresh descriptors still needs rows to re-align.
    pub fn set_columns(&self, columns: Vec<HideableColumn>) {
        let snapshot = {
            let mut current = self.columns.write();
            *current = columns;
            current.clone()
        };
        tracing::debug!(
            target: "trellis_datagrid::column",
            count = snapshot.len(),
            "column list replaced"
        );
        self.columns_changed.emit(snapshot);
    }

    /// Sets the visibility of one column.
    ///
    /// Redundant writes (the column already has the requested state) are
    /// accepted and do not emit. Hiding the last visible column is rejected,
    /// since a grid with zero visible columns has no usable rendering.
    pub fn set_column_hidden(&self, id: ColumnId, hidden: bool) -> Result<()> {
        let snapshot = {
            let mut columns = self.columns.write();
            let Some(position) = columns.iter().position(|c| c.id == id) else {
                return Err(Error::UnknownColumn(id));
            };

            if columns[position].hidden == hidden {
                return Ok(());
            }

            if hidden {
                let visible = columns.iter().filter(|c| !c.hidden).count();
                if visible <= 1 {
                    return Err(Error::LastVisibleColumn(id));
                }
            }

            columns[position].hidden = hidden;
            columns.clone()
        };

        tracing::debug!(
            target: "trellis_datagrid::column",
            column = %id,
            hidden,
            "column visibility changed"
        );
        self.columns_changed.emit(snapshot);
        Ok(())
    }

    /// Shows a hidden column.
    pub fn show_column(&self, id: ColumnId) -> Result<()> {
        self.set_column_hidden(id, false)
    }

    /// Hides a column.
    pub fn hide_column(&self, id: ColumnId) -> Result<()> {
        self.set_column_hidden(id, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn registry_with(count: usize) -> HideableColumnRegistry {
        HideableColumnRegistry::with_columns(
            (0..count).map(|_| HideableColumn::new()).collect(),
        )
    }

    #[test]
    fn test_column_ids_are_unique() {
        let a = ColumnId::next();
        let b = ColumnId::next();
        assert_ne!(a, b);
        assert_eq!(format!("{}", a), format!("datagrid-column-{}", a.as_u64()));
    }

    #[test]
    fn test_registry_snapshot() {
        let registry = registry_with(3);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.visible_count(), 3);
        assert!(!registry.is_empty());

        let columns = registry.columns();
        assert_eq!(columns.len(), 3);
        assert!(columns.iter().all(|c| !c.is_hidden()));
    }

    #[test]
    fn test_hide_and_show_column() {
        let registry = registry_with(3);
        let id = registry.columns()[1].id();

        registry.hide_column(id).unwrap();
        assert_eq!(registry.column_hidden(id), Some(true));
        assert_eq!(registry.visible_count(), 2);

        registry.show_column(id).unwrap();
        assert_eq!(registry.column_hidden(id), Some(false));
        assert_eq!(registry.visible_count(), 3);
    }

    #[test]
    fn test_unknown_column_is_rejected() {
        let registry = registry_with(2);
        let stray = ColumnId::next();
        assert_eq!(
            registry.hide_column(stray),
            Err(Error::UnknownColumn(stray))
        );
        assert_eq!(registry.column_hidden(stray), None);
    }

    #[test]
    fn test_last_visible_column_cannot_be_hidden() {
        let registry = registry_with(2);
        let columns = registry.columns();

        registry.hide_column(columns[0].id()).unwrap();
        assert_eq!(
            registry.hide_column(columns[1].id()),
            Err(Error::LastVisibleColumn(columns[1].id()))
        );
        assert_eq!(registry.visible_count(), 1);
    }

    #[test]
    fn test_redundant_write_does_not_emit() {
        let registry = registry_with(2);
        let id = registry.columns()[0].id();

        let emissions = Arc::new(Mutex::new(0));
        let recv = emissions.clone();
        registry.columns_changed.connect(move |_| {
            *recv.lock() += 1;
        });

        registry.hide_column(id).unwrap();
        assert_eq!(*emissions.lock(), 1);

        // Already hidden: accepted, no emission.
        registry.hide_column(id).unwrap();
        assert_eq!(*emissions.lock(), 1);
    }

    #[test]
    fn test_set_columns_emits_snapshot() {
        let registry = HideableColumnRegistry::new();

        let received = Arc::new(Mutex::new(Vec::new()));
        let recv = received.clone();
        registry.columns_changed.connect(move |columns| {
            recv.lock().push(columns.len());
        });

        registry.set_columns(vec![HideableColumn::new(), HideableColumn::new()]);
        registry.set_columns(vec![HideableColumn::new()]);

        assert_eq!(*received.lock(), vec![2, 1]);
        assert_eq!(registry.len(), 1);
    }
}
