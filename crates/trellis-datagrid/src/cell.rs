//! Cells and the per-row cell projection list.
//!
//! A [`Cell`] is the rendering unit for one row/column intersection. Cells
//! are created and destroyed by the grid's content projection as the row's
//! declared content changes; the row controller never adds or removes them,
//! it only assigns their column identity and hidden flag during alignment.

use parking_lot::RwLock;
use trellis_core::Signal;

use crate::column::{ColumnId, HideableColumn};

/// One rendered cell of a row.
///
/// A freshly projected cell is unassigned: its `column` is `None` until the
/// first successful alignment pass tags it. After that, `column` mirrors the
/// identity of the column at the same ordinal position and `hidden` mirrors
/// that column's visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    column: Option<ColumnId>,
    hidden: bool,
}

impl Cell {
    /// Returns the identity of the column this cell is assigned to, if any.
    pub fn column(&self) -> Option<ColumnId> {
        self.column
    }

    /// Returns whether this cell is hidden.
    ///
    /// Mirrors the visibility of the assigned column as of the last
    /// successful alignment. Unassigned cells are visible.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

/// The ordered, observable list of cells currently projected into one row.
///
/// Owned by the projection mechanism and shared with the row controller by
/// `Arc`. Membership changes (cells added or removed as the row's declared
/// content changes) emit [`changed`] with the new cell count; the row reacts
/// by re-reading both this list and the column registry and re-aligning.
///
/// # Signals
///
/// - `changed(usize)`: Emitted with the new cell count after every
///   membership change
///
/// [`changed`]: CellList::changed
pub struct CellList {
    cells: RwLock<Vec<Cell>>,

    /// Emitted with the new cell count after every membership change.
    pub changed: Signal<usize>,
}

impl Default for CellList {
    fn default() -> Self {
        Self::new()
    }
}

impl CellList {
    /// Creates an empty cell list.
    pub fn new() -> Self {
        Self {
            cells: RwLock::new(Vec::new()),
            changed: Signal::new(),
        }
    }

    /// Returns the number of projected cells.
    pub fn len(&self) -> usize {
        self.cells.read().len()
    }

    /// Returns `true` if no cells are projected.
    pub fn is_empty(&self) -> bool {
        self.cells.read().is_empty()
    }

    /// Returns a snapshot of the current cells.
    pub fn cells(&self) -> Vec<Cell> {
        self.cells.read().clone()
    }

    /// Returns the cell at the given index, if present.
    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.read().get(index).copied()
    }

    /// Projects one new, unassigned cell at the end of the row.
    pub fn push(&self) {
        let len = {
            let mut cells = self.cells.write();
            cells.push(Cell::default());
            cells.len()
        };
        self.changed.emit(len);
    }

    /// Projects one new, unassigned cell at the given position.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert(&self, index: usize) {
        let len = {
            let mut cells = self.cells.write();
            cells.insert(index, Cell::default());
            cells.len()
        };
        self.changed.emit(len);
    }

    /// Removes the cell at the given position.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn remove(&self, index: usize) {
        let len = {
            let mut cells = self.cells.write();
            cells.remove(index);
            cells.len()
        };
        self.changed.emit(len);
    }

    /// Removes all cells.
    pub fn clear(&self) {
        self.cells.write().clear();
        self.changed.emit(0);
    }

    /// Re-projects the row to exactly `count` cells.
    ///
    /// Existing cells keep their assignment; new cells start unassigned.
    /// Does nothing (and does not emit) if the count already matches.
    pub fn project(&self, count: usize) {
        let changed = {
            let mut cells = self.cells.write();
            if cells.len() == count {
                false
            } else {
                cells.resize_with(count, Cell::default);
                true
            }
        };
        if changed {
            self.changed.emit(count);
        }
    }

    /// Aligns the cells against a column snapshot, by ordinal position.
    ///
    /// The whole pass happens under one write lock: either every shared
    /// index is assigned (`cells[i].column = columns[i].id`,
    /// `cells[i].hidden = columns[i].hidden`) or - when the lengths differ,
    /// meaning one of the two lists is mid-update - nothing is touched and
    /// `false` is returned. No reader can ever observe a row where some
    /// cells reflect the new column order and others the old one.
    pub(crate) fn align_with(&self, columns: &[HideableColumn]) -> bool {
        let mut cells = self.cells.write();
        if cells.len() != columns.len() {
            tracing::trace!(
                target: "trellis_datagrid::cell",
                cells = cells.len(),
                columns = columns.len(),
                "alignment skipped: list lengths differ"
            );
            return false;
        }

        for (cell, column) in cells.iter_mut().zip(columns) {
            cell.column = Some(column.id());
            cell.hidden = column.is_hidden();
        }
        tracing::trace!(
            target: "trellis_datagrid::cell",
            count = cells.len(),
            "cells aligned to columns"
        );
        true
    }
}
