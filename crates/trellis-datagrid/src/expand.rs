//! Per-row expansion state and the grid-wide expandable-rows count.
//!
//! Each row owns one [`Expand`] holding four flags: whether the row can
//! expand at all, whether expanded detail replaces the row body or appends
//! below it, whether the row is currently expanded, and whether detail
//! content is still being fetched. What the row actually renders is never
//! stored; it is re-derived on every read as a [`RowDisplay`], so the flags
//! cannot drift out of sync with the rendering.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use trellis_core::Property;

/// What a row currently renders, derived from the expansion flags.
///
/// Computed by [`Expand::display`]; never stored. Loading wins over
/// everything: while detail content is being fetched, neither the collapsed
/// body nor the expanded detail is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowDisplay {
    /// Detail content is loading; both renderings are suppressed.
    Suppressed,
    /// The normal row body, no detail.
    Collapsed,
    /// The row body with expanded detail appended below it.
    ExpandedAppended,
    /// Expanded detail shown instead of the row body.
    ExpandedReplaced,
}

impl RowDisplay {
    /// Returns whether the normal row body is rendered.
    pub fn shows_row_body(&self) -> bool {
        matches!(self, Self::Collapsed | Self::ExpandedAppended)
    }

    /// Returns whether the expanded detail is rendered.
    pub fn shows_detail(&self) -> bool {
        matches!(self, Self::ExpandedAppended | Self::ExpandedReplaced)
    }
}

/// Counts how many rows of a grid are currently expandable.
///
/// Shared across all rows of one grid. The surrounding layout consults
/// [`has_expandable_row`] to decide whether to reserve the caret column;
/// each [`Expand`] registers itself while its `expandable` flag is set and
/// deregisters when the flag clears or the row is destroyed.
///
/// [`has_expandable_row`]: ExpandableRowsCount::has_expandable_row
#[derive(Debug, Default)]
pub struct ExpandableRowsCount {
    count: AtomicUsize,
}

impl ExpandableRowsCount {
    /// Creates a count with no registered rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one expandable row.
    pub fn register(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }

    /// Deregisters one expandable row.
    pub fn deregister(&self) {
        self.count.fetch_sub(1, Ordering::SeqCst);
    }

    /// Returns the number of currently expandable rows.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Returns `true` if any row in the grid is expandable.
    pub fn has_expandable_row(&self) -> bool {
        self.count() > 0
    }
}

/// Expansion state for one row.
///
/// Created with the row and destroyed with it. `expandable` and `replace`
/// are supplied by the surrounding grid (a row learns it has detail content
/// from its declared children) and are read-only as far as the row
/// controller is concerned; `expanded` is the one flag the row writes, and
/// `loading` is driven by whoever fetches the detail content.
pub struct Expand {
    expandable: Property<bool>,
    replace: Property<bool>,
    expanded: Property<bool>,
    loading: Property<bool>,
    rows_count: Option<Arc<ExpandableRowsCount>>,
}

impl Default for Expand {
    fn default() -> Self {
        Self::new()
    }
}

impl Expand {
    /// Creates collapsed, non-expandable expansion state.
    pub fn new() -> Self {
        Self {
            expandable: Property::new(false),
            replace: Property::new(false),
            expanded: Property::new(false),
            loading: Property::new(false),
            rows_count: None,
        }
    }

    /// Attaches the grid-wide expandable-rows count.
    ///
    /// Once attached, flips of the `expandable` flag keep the count in sync,
    /// and dropping this state deregisters a still-expandable row.
    pub fn with_rows_count(mut self, rows_count: Arc<ExpandableRowsCount>) -> Self {
        self.rows_count = Some(rows_count);
        self
    }

    /// Returns whether this row can expand at all.
    pub fn expandable(&self) -> bool {
        self.expandable.get()
    }

    /// Sets whether this row can expand.
    pub fn set_expandable(&self, expandable: bool) {
        if self.expandable.set(expandable) {
            if let Some(rows_count) = &self.rows_count {
                if expandable {
                    rows_count.register();
                } else {
                    rows_count.deregister();
                }
            }
        }
    }

    /// Returns whether expanded detail replaces the row body.
    pub fn replace(&self) -> bool {
        self.replace.get()
    }

    /// Sets whether expanded detail replaces the row body instead of
    /// appending below it.
    pub fn set_replace(&self, replace: bool) {
        self.replace.set(replace);
    }

    /// Returns whether this row is expanded.
    pub fn expanded(&self) -> bool {
        self.expanded.get()
    }

    /// Sets the expanded flag.
    ///
    /// This is a plain state write; change notification is the row
    /// controller's job, so an external binding can sync the flag without
    /// triggering a notification loop.
    pub fn set_expanded(&self, expanded: bool) {
        self.expanded.set(expanded);
    }

    /// Returns whether detail content is currently being fetched.
    pub fn loading(&self) -> bool {
        self.loading.get()
    }

    /// Sets the loading flag.
    pub fn set_loading(&self, loading: bool) {
        self.loading.set(loading);
    }

    /// Derives what the row should render right now.
    pub fn display(&self) -> RowDisplay {
        if self.loading.get() {
            RowDisplay::Suppressed
        } else if self.expanded.get() {
            if self.replace.get() {
                RowDisplay::ExpandedReplaced
            } else {
                RowDisplay::ExpandedAppended
            }
        } else {
            RowDisplay::Collapsed
        }
    }
}

impl Drop for Expand {
    fn drop(&mut self) {
        if let Some(rows_count) = &self.rows_count {
            if self.expandable.get() {
                rows_count.deregister();
            }
        }
    }
}
