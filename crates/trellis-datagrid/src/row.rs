//! The datagrid row controller.
//!
//! [`DatagridRow`] is the glue between one bound data item and the shared
//! state of its grid. It delegates selection reads and writes to the grid's
//! [`Selection`], expansion to its own [`Expand`] state, and keeps the row's
//! projected cells aligned with the grid's hideable columns.
//!
//! # Alignment
//!
//! Columns and cells are populated by two independent change streams: the
//! column registry changes when columns are declared, reordered, or hidden,
//! while the cell list changes when the row's content is re-projected. The
//! row never assumes the two are in step. On every notification from either
//! stream it re-reads both lists and assigns identities by ordinal position
//! only when the lengths match at that instant; a mismatch means one stream
//! is mid-update, and the pass is skipped wholesale rather than committing a
//! partial mapping. The skipped state is transient: the owner of the lagging
//! list emits again on the same update cycle once it catches up, and that
//! notification completes the alignment.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use trellis_datagrid::{
//!     CellList, CommonStrings, DatagridRow, Expand, HideableColumnRegistry, Selection,
//! };
//!
//! let selection = Arc::new(Selection::new());
//! let registry = Arc::new(HideableColumnRegistry::new());
//! let cells = Arc::new(CellList::new());
//!
//! let mut row = DatagridRow::new(
//!     "invoice-17".to_string(),
//!     selection,
//!     registry,
//!     cells,
//!     Arc::new(Expand::new()),
//!     Arc::new(CommonStrings::default()),
//! );
//! row.content_ready();
//!
//! row.selected_changed.connect(|&selected| {
//!     println!("row selected: {}", selected);
//! });
//! row.toggle();
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use trellis_core::{ConnectionGuard, Property, Signal};

use crate::cell::CellList;
use crate::column::{HideableColumn, HideableColumnRegistry};
use crate::expand::{Expand, RowDisplay};
use crate::selection::{Selection, SelectionMode};
use crate::strings::CommonStrings;

/// A global counter for generating unique row identities.
static ROW_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Controller for one rendered datagrid row.
///
/// One instance exists per row; it is created when the grid instantiates a
/// row for a bound item and dropped when that item leaves the rendered set.
/// Dropping the row releases its subscriptions, so a stale column or cell
/// notification can never reach a destroyed row.
///
/// # Signals
///
/// - `selected_changed(bool)`: Emitted when this row's selected state
///   actually flips, carrying the new value
/// - `expanded_changed(bool)`: Emitted by [`toggle_expand`] with the new
///   expanded value
///
/// [`toggle_expand`]: DatagridRow::toggle_expand
pub struct DatagridRow<T: Clone + PartialEq> {
    id: String,
    radio_id: String,
    item: T,

    /// Fallback selected flag used while the grid's selection mode is
    /// [`SelectionMode::None`].
    local_selected: Property<bool>,

    /// Emitted when this row's selected state flips.
    pub selected_changed: Signal<bool>,

    /// Emitted with the new expanded value on every effective toggle.
    pub expanded_changed: Signal<bool>,

    // Guards are declared before the Arcs they point into, so teardown
    // disconnects both subscriptions while the signals are still alive.
    cell_subscription: Option<ConnectionGuard<usize>>,
    column_subscription: Option<ConnectionGuard<Vec<HideableColumn>>>,

    selection: Arc<Selection<T>>,
    expand: Arc<Expand>,
    registry: Arc<HideableColumnRegistry>,
    cells: Arc<CellList>,
    strings: Arc<CommonStrings>,
}

impl<T: Clone + PartialEq> DatagridRow<T> {
    /// Creates a row controller for a bound item.
    ///
    /// The row is inert until [`content_ready`] is called: nothing is
    /// aligned and no subscriptions exist, because the projected content is
    /// not complete yet while the grid is still instantiating the row.
    ///
    /// [`content_ready`]: DatagridRow::content_ready
    pub fn new(
        item: T,
        selection: Arc<Selection<T>>,
        registry: Arc<HideableColumnRegistry>,
        cells: Arc<CellList>,
        expand: Arc<Expand>,
        strings: Arc<CommonStrings>,
    ) -> Self {
        let id = format!("datagrid-row-{}", ROW_ID_COUNTER.fetch_add(1, Ordering::Relaxed));
        let radio_id = format!(
            "datagrid-row-radio-{}",
            ROW_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
        );
        tracing::debug!(target: "trellis_datagrid::row", row = %id, "row created");

        Self {
            id,
            radio_id,
            item,
            local_selected: Property::new(false),
            selected_changed: Signal::new(),
            expanded_changed: Signal::new(),
            cell_subscription: None,
            column_subscription: None,
            selection,
            expand,
            registry,
            cells,
            strings,
        }
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Returns this row's identity token.
    ///
    /// The surrounding layout uses it to associate the row with its rendered
    /// region for accessibility linkage.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the identity token for this row's radio input (Single mode).
    pub fn radio_id(&self) -> &str {
        &self.radio_id
    }

    /// Returns the radio group name shared by every row of this grid.
    pub fn radio_name(&self) -> String {
        format!("{}-radio", self.selection.id())
    }

    /// Returns the bound data item.
    pub fn item(&self) -> &T {
        &self.item
    }

    /// Returns the localized labels for this row's controls.
    pub fn strings(&self) -> &CommonStrings {
        &self.strings
    }

    // =========================================================================
    // Alignment lifecycle
    // =========================================================================

    /// Marks the row's projected content as complete and starts observing.
    ///
    /// Aligns once against the current column snapshot, then subscribes to
    /// the cell list and the column registry. Both subscriptions are scoped
    /// to this row: dropping the row disconnects them on every exit path.
    pub fn content_ready(&mut self) {
        // Make sure things get started; the column list may already be
        // complete at this point.
        self.cells.align_with(&self.registry.columns());

        // Triggered when the cells list changes per row re-projection. The
        // handler re-reads the registry so it always aligns against the
        // column list as of this notification, not as of subscription time.
        let registry = Arc::downgrade(&self.registry);
        let cells = Arc::downgrade(&self.cells);
        self.cell_subscription = Some(self.cells.changed.connect_scoped(move |_| {
            let (Some(registry), Some(cells)) = (registry.upgrade(), cells.upgrade()) else {
                return;
            };
            cells.align_with(&registry.columns());
        }));

        // Triggered when columns are declared, reordered, or change
        // visibility; the payload is the new ordered column list.
        let cells = Arc::downgrade(&self.cells);
        self.column_subscription =
            Some(self.registry.columns_changed.connect_scoped(move |columns| {
                let Some(cells) = cells.upgrade() else {
                    return;
                };
                cells.align_with(columns);
            }));

        tracing::debug!(target: "trellis_datagrid::row", row = %self.id, "row content ready");
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Returns whether this row is selected.
    ///
    /// Reads the grid's shared selection, except in [`SelectionMode::None`]
    /// where the row answers from its private flag.
    pub fn is_selected(&self) -> bool {
        match self.selection.mode() {
            SelectionMode::None => self.local_selected.get(),
            _ => self.selection.is_selected(&self.item),
        }
    }

    /// Sets this row's selected state.
    ///
    /// Writes go to the private flag in [`SelectionMode::None`] and to the
    /// shared selection otherwise; Single-mode exclusivity is the shared
    /// selection's business, not the row's. Emits `selected_changed` only
    /// when this row's selected state actually flips.
    pub fn set_selected(&self, selected: bool) {
        let changed = match self.selection.mode() {
            SelectionMode::None => self.local_selected.set(selected),
            _ => self.selection.set_selected(&self.item, selected),
        };
        if changed {
            self.selected_changed.emit(selected);
        }
    }

    /// Toggles this row's selected state.
    pub fn toggle(&self) {
        self.set_selected(!self.is_selected());
    }

    // =========================================================================
    // Expansion
    // =========================================================================

    /// Returns this row's expansion state.
    pub fn expand(&self) -> &Expand {
        &self.expand
    }

    /// Returns whether this row is expanded.
    pub fn is_expanded(&self) -> bool {
        self.expand.expanded()
    }

    /// Sets the expanded flag without notification.
    ///
    /// This is the external-binding path; interactive toggling goes through
    /// [`toggle_expand`](DatagridRow::toggle_expand).
    pub fn set_expanded(&self, expanded: bool) {
        self.expand.set_expanded(expanded);
    }

    /// Toggles expansion, if this row is expandable at all.
    ///
    /// A non-expandable row ignores the call entirely: no state change, no
    /// notification. Otherwise the flag flips and `expanded_changed` carries
    /// the new value.
    pub fn toggle_expand(&self) {
        if !self.expand.expandable() {
            return;
        }
        let expanded = !self.expand.expanded();
        self.expand.set_expanded(expanded);
        self.expanded_changed.emit(expanded);
    }

    /// Derives what this row currently renders.
    pub fn display(&self) -> RowDisplay {
        self.expand.display()
    }
}

impl<T: Clone + PartialEq> Drop for DatagridRow<T> {
    fn drop(&mut self) {
        tracing::debug!(target: "trellis_datagrid::row", row = %self.id, "row destroyed");
    }
}
