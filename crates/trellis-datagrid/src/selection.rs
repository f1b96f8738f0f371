//! Shared selection state for a datagrid.
//!
//! One [`Selection`] instance exists per grid and is injected into every row
//! of that grid. Rows delegate their selected reads and writes here (except
//! in [`SelectionMode::None`], where each row keeps a private local flag),
//! so exclusivity rules live in exactly one place: setting the current
//! single selection deselects whatever held it before, and the multi
//! selection is one set keyed by item equality.
//!
//! Two grids must never share a `Selection`; each grid owns its own
//! instance, wired into rows at construction time.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use trellis_core::Signal;

/// A global counter for generating unique selection-state identities.
static SELECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// How selection works for a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// No selection UI; rows fall back to a private local flag.
    #[default]
    None,
    /// Radio-like: at most one item is selected grid-wide.
    Single,
    /// Checkbox-like: a set of items, toggled independently.
    Multi,
}

/// Shared selection state, one per grid.
///
/// Membership is keyed by equality of the bound item (`T: PartialEq`), not
/// by row identity: if the same logical item is re-rendered into a fresh
/// row, it is still selected.
///
/// # Signals
///
/// - `changed(())`: Emitted after every effective mutation of the selected
///   set or the current single selection
pub struct Selection<T> {
    id: String,
    mode: RwLock<SelectionMode>,
    current_single: RwLock<Option<T>>,
    selected: RwLock<Vec<T>>,

    /// Emitted after every effective selection mutation.
    pub changed: Signal<()>,
}

impl<T: Clone + PartialEq> Default for Selection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + PartialEq> Selection<T> {
    /// Creates an empty selection in [`SelectionMode::None`].
    pub fn new() -> Self {
        let n = SELECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self {
            id: format!("datagrid-selection-{n}"),
            mode: RwLock::new(SelectionMode::default()),
            current_single: RwLock::new(None),
            selected: RwLock::new(Vec::new()),
            changed: Signal::new(),
        }
    }

    /// Creates an empty selection with the given mode.
    pub fn with_mode(mode: SelectionMode) -> Self {
        let selection = Self::new();
        *selection.mode.write() = mode;
        selection
    }

    /// Returns this selection's stable identity token.
    ///
    /// The rendering layer uses it to group the radio inputs of Single mode
    /// under one name.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the current selection mode.
    pub fn mode(&self) -> SelectionMode {
        *self.mode.read()
    }

    /// Sets the selection mode.
    ///
    /// Switching modes clears any existing selection: a set accumulated in
    /// Multi mode has no meaning under Single and vice versa. Emits
    /// `changed` once if anything was selected.
    pub fn set_mode(&self, mode: SelectionMode) {
        let had_selection = {
            let mut current = self.mode.write();
            if *current == mode {
                return;
            }
            *current = mode;

            let had_single = self.current_single.write().take().is_some();
            let mut selected = self.selected.write();
            let had_items = !selected.is_empty();
            selected.clear();
            had_single || had_items
        };

        if had_selection {
            self.changed.emit(());
        }
    }

    /// Returns whether the given item is selected under the current mode.
    ///
    /// In [`SelectionMode::None`] this is always `false`; rows answer from
    /// their local flag instead of asking the shared state.
    pub fn is_selected(&self, item: &T) -> bool {
        match self.mode() {
            SelectionMode::None => false,
            SelectionMode::Single => self
                .current_single
                .read()
                .as_ref()
                .is_some_and(|current| current == item),
            SelectionMode::Multi => self.selected.read().contains(item),
        }
    }

    /// Sets whether the given item is selected.
    ///
    /// Returns `true` if that item's membership actually changed. In Single
    /// mode, selecting an item displaces the previous single selection; in
    /// None mode this is a no-op (the row stores the flag locally).
    pub fn set_selected(&self, item: &T, selected: bool) -> bool {
        let changed = match self.mode() {
            SelectionMode::None => false,
            SelectionMode::Single => {
                let mut current = self.current_single.write();
                let is_current = current.as_ref() == Some(item);
                match (selected, is_current) {
                    (true, false) => {
                        *current = Some(item.clone());
                        true
                    }
                    (false, true) => {
                        *current = None;
                        true
                    }
                    _ => false,
                }
            }
            SelectionMode::Multi => {
                let mut items = self.selected.write();
                if selected {
                    if items.contains(item) {
                        false
                    } else {
                        items.push(item.clone());
                        true
                    }
                } else if let Some(position) = items.iter().position(|i| i == item) {
                    items.remove(position);
                    true
                } else {
                    false
                }
            }
        };

        if changed {
            self.changed.emit(());
        }
        changed
    }

    /// Returns the current single selection, if any.
    pub fn current_single(&self) -> Option<T> {
        self.current_single.read().clone()
    }

    /// Sets the current single selection, displacing the previous one.
    ///
    /// Returns `true` if the value changed.
    pub fn set_current_single(&self, item: Option<T>) -> bool {
        let changed = {
            let mut current = self.current_single.write();
            if *current == item {
                false
            } else {
                *current = item;
                true
            }
        };
        if changed {
            self.changed.emit(());
        }
        changed
    }

    /// Returns a snapshot of the multi-selected items, in selection order.
    pub fn selected_items(&self) -> Vec<T> {
        self.selected.read().clone()
    }

    /// Returns `true` if anything is selected under the current mode.
    pub fn has_selection(&self) -> bool {
        match self.mode() {
            SelectionMode::None => false,
            SelectionMode::Single => self.current_single.read().is_some(),
            SelectionMode::Multi => !self.selected.read().is_empty(),
        }
    }

    /// Clears the whole selection. Emits `changed` once if anything was
    /// selected.
    pub fn clear(&self) {
        let had_selection = {
            let had_single = self.current_single.write().take().is_some();
            let mut selected = self.selected.write();
            let had_items = !selected.is_empty();
            selected.clear();
            had_single || had_items
        };
        if had_selection {
            self.changed.emit(());
        }
    }
}

impl<T: Clone + PartialEq + fmt::Debug> fmt::Debug for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("id", &self.id)
            .field("mode", &self.mode())
            .field("current_single", &self.current_single())
            .field("selected", &self.selected_items())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_selection_creation() {
        let selection = Selection::<String>::new();
        assert_eq!(selection.mode(), SelectionMode::None);
        assert!(!selection.has_selection());
        assert!(selection.id().starts_with("datagrid-selection-"));
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Selection::<i32>::new();
        let b = Selection::<i32>::new();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_multi_selection_is_per_item() {
        let selection = Selection::with_mode(SelectionMode::Multi);

        assert!(selection.set_selected(&"a", true));
        assert!(selection.set_selected(&"b", true));
        assert!(selection.is_selected(&"a"));
        assert!(selection.is_selected(&"b"));

        // Deselecting one item never touches the other.
        assert!(selection.set_selected(&"a", false));
        assert!(!selection.is_selected(&"a"));
        assert!(selection.is_selected(&"b"));
    }

    #[test]
    fn test_multi_redundant_writes_report_no_change() {
        let selection = Selection::with_mode(SelectionMode::Multi);

        assert!(selection.set_selected(&1, true));
        assert!(!selection.set_selected(&1, true));
        assert!(selection.set_selected(&1, false));
        assert!(!selection.set_selected(&1, false));
    }

    #[test]
    fn test_single_selection_is_exclusive() {
        let selection = Selection::with_mode(SelectionMode::Single);

        assert!(selection.set_selected(&"first", true));
        assert!(selection.is_selected(&"first"));

        // Selecting another item displaces the previous one.
        assert!(selection.set_selected(&"second", true));
        assert!(!selection.is_selected(&"first"));
        assert!(selection.is_selected(&"second"));
        assert_eq!(selection.current_single(), Some("second"));
    }

    #[test]
    fn test_single_deselect_only_affects_current() {
        let selection = Selection::with_mode(SelectionMode::Single);
        selection.set_current_single(Some(7));

        // Deselecting a non-current item changes nothing.
        assert!(!selection.set_selected(&3, false));
        assert_eq!(selection.current_single(), Some(7));

        assert!(selection.set_selected(&7, false));
        assert_eq!(selection.current_single(), None);
    }

    #[test]
    fn test_none_mode_ignores_writes() {
        let selection = Selection::<i32>::new();
        assert!(!selection.set_selected(&1, true));
        assert!(!selection.is_selected(&1));
        assert!(!selection.has_selection());
    }

    #[test]
    fn test_mode_switch_clears_selection() {
        let selection = Selection::with_mode(SelectionMode::Multi);
        selection.set_selected(&1, true);
        selection.set_selected(&2, true);

        selection.set_mode(SelectionMode::Single);
        assert!(!selection.has_selection());
        assert_eq!(selection.selected_items(), Vec::<i32>::new());
    }

    #[test]
    fn test_changed_signal_fires_per_effective_mutation() {
        let selection = Selection::with_mode(SelectionMode::Multi);
        let count = Arc::new(AtomicUsize::new(0));

        let recv = count.clone();
        selection.changed.connect(move |_| {
            recv.fetch_add(1, Ordering::SeqCst);
        });

        selection.set_selected(&1, true);
        selection.set_selected(&1, true); // redundant, no emission
        selection.set_selected(&2, true);
        selection.clear();
        selection.clear(); // already empty, no emission

        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_selection_order_is_preserved() {
        let selection = Selection::with_mode(SelectionMode::Multi);
        let items = ["c", "a", "b"];
        for item in &items {
            selection.set_selected(item, true);
        }
        assert_eq!(selection.selected_items(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_equality_keyed_membership() {
        // Selection is keyed by item equality, not by any row identity:
        // a clone of a selected item reads as selected.
        let selection = Selection::with_mode(SelectionMode::Multi);
        let original = "item".to_string();
        let clone = original.clone();

        selection.set_selected(&original, true);
        assert!(selection.is_selected(&clone));

        let emissions = Arc::new(Mutex::new(0));
        let recv = emissions.clone();
        selection.changed.connect(move |_| *recv.lock() += 1);

        // Writing through the clone removes the original.
        selection.set_selected(&clone, false);
        assert!(!selection.is_selected(&original));
        assert_eq!(*emissions.lock(), 1);
    }
}
