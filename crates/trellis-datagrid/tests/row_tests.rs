//! End-to-end scenarios for the row controller: alignment under staggered
//! column/cell updates, selection across several rows of one grid, and
//! expansion rendering states.

use std::sync::Arc;

use parking_lot::Mutex;
use trellis_datagrid::{
    CellList, ColumnId, CommonStrings, DatagridRow, Expand, ExpandableRowsCount, HideableColumn,
    HideableColumnRegistry, RowDisplay, Selection, SelectionMode,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct Grid {
    selection: Arc<Selection<String>>,
    registry: Arc<HideableColumnRegistry>,
    rows_count: Arc<ExpandableRowsCount>,
    strings: Arc<CommonStrings>,
}

impl Grid {
    fn new(column_count: usize) -> Self {
        init_tracing();
        Self {
            selection: Arc::new(Selection::new()),
            registry: Arc::new(HideableColumnRegistry::with_columns(
                (0..column_count).map(|_| HideableColumn::new()).collect(),
            )),
            rows_count: Arc::new(ExpandableRowsCount::new()),
            strings: Arc::new(CommonStrings::default()),
        }
    }

    fn column_ids(&self) -> Vec<ColumnId> {
        self.registry.columns().iter().map(|c| c.id()).collect()
    }

    /// Projects a row with one cell per current column and readies it.
    fn project_row(&self, item: &str) -> (DatagridRow<String>, Arc<CellList>) {
        let cells = Arc::new(CellList::new());
        cells.project(self.registry.len());
        let mut row = DatagridRow::new(
            item.to_string(),
            self.selection.clone(),
            self.registry.clone(),
            cells.clone(),
            Arc::new(Expand::new().with_rows_count(self.rows_count.clone())),
            self.strings.clone(),
        );
        row.content_ready();
        (row, cells)
    }
}

#[test]
fn test_three_columns_align_to_three_cells() {
    let grid = Grid::new(3);
    let (_row, cells) = grid.project_row("item");

    let ids = grid.column_ids();
    let aligned: Vec<Option<ColumnId>> = cells.cells().iter().map(|c| c.column()).collect();
    assert_eq!(aligned, vec![Some(ids[0]), Some(ids[1]), Some(ids[2])]);
    assert!(cells.cells().iter().all(|c| !c.is_hidden()));
}

#[test]
fn test_hiding_middle_column_hides_matching_cell_only() {
    let grid = Grid::new(3);
    let (_row, cells) = grid.project_row("item");
    let ids = grid.column_ids();

    grid.registry.hide_column(ids[1]).unwrap();

    let after = cells.cells();
    assert_eq!(after[1].column(), Some(ids[1]));
    assert!(after[1].is_hidden());
    assert!(!after[0].is_hidden());
    assert!(!after[2].is_hidden());
}

#[test]
fn test_early_fourth_cell_stays_stale_until_columns_catch_up() {
    let grid = Grid::new(3);
    let (_row, cells) = grid.project_row("item");
    let before = cells.cells();

    // The projection adds a fourth cell before the column registry has the
    // matching declaration: the notification fires but alignment is skipped,
    // so the three existing assignments are untouched and the new cell is
    // unassigned.
    cells.push();
    let during = cells.cells();
    assert_eq!(&during[..3], &before[..]);
    assert_eq!(during[3].column(), None);

    // The registry emits its four-entry update; all four indices now match.
    let mut columns = grid.registry.columns();
    columns.push(HideableColumn::new());
    grid.registry.set_columns(columns.clone());

    for (cell, column) in cells.cells().iter().zip(&columns) {
        assert_eq!(cell.column(), Some(column.id()));
    }
}

#[test]
fn test_reordering_columns_reassigns_identities_in_place() {
    let grid = Grid::new(3);
    let (_row, cells) = grid.project_row("item");

    let mut columns = grid.registry.columns();
    columns.swap(0, 2);
    grid.registry.set_columns(columns.clone());

    let aligned: Vec<Option<ColumnId>> = cells.cells().iter().map(|c| c.column()).collect();
    let expected: Vec<Option<ColumnId>> = columns.iter().map(|c| Some(c.id())).collect();
    assert_eq!(aligned, expected);
}

#[test]
fn test_multi_mode_toggle_on_preselected_item_deselects_it() {
    let grid = Grid::new(2);
    grid.selection.set_mode(SelectionMode::Multi);
    grid.selection.set_selected(&"item2".to_string(), true);

    let (row, _cells) = grid.project_row("item2");

    let received = Arc::new(Mutex::new(Vec::new()));
    let recv = received.clone();
    row.selected_changed.connect(move |&value| {
        recv.lock().push(value);
    });

    row.toggle();
    assert!(!grid.selection.is_selected(&"item2".to_string()));
    assert_eq!(*received.lock(), vec![false]);
}

#[test]
fn test_single_mode_selection_moves_between_rows() {
    let grid = Grid::new(2);
    grid.selection.set_mode(SelectionMode::Single);

    let (first, _) = grid.project_row("first");
    let (second, _) = grid.project_row("second");

    first.toggle();
    assert!(first.is_selected());
    assert!(!second.is_selected());

    second.toggle();
    assert!(!first.is_selected());
    assert!(second.is_selected());
    assert_eq!(grid.selection.current_single(), Some("second".to_string()));
}

#[test]
fn test_none_mode_rows_do_not_share_state() {
    let grid = Grid::new(1);
    let (a, _) = grid.project_row("a");
    let (b, _) = grid.project_row("b");

    a.set_selected(true);
    assert!(a.is_selected());
    assert!(!b.is_selected());
    assert!(!grid.selection.has_selection());
}

#[test]
fn test_expansion_lifecycle_with_loading() {
    let grid = Grid::new(1);
    let (row, _) = grid.project_row("item");

    row.expand().set_expandable(true);
    assert!(grid.rows_count.has_expandable_row());
    assert_eq!(row.display(), RowDisplay::Collapsed);

    // The user expands; detail starts loading.
    row.toggle_expand();
    row.expand().set_loading(true);
    assert_eq!(row.display(), RowDisplay::Suppressed);

    // Content arrives.
    row.expand().set_loading(false);
    assert_eq!(row.display(), RowDisplay::ExpandedAppended);

    // Replace-style detail takes over the row body.
    row.expand().set_replace(true);
    assert_eq!(row.display(), RowDisplay::ExpandedReplaced);

    row.toggle_expand();
    assert_eq!(row.display(), RowDisplay::Collapsed);
}

#[test]
fn test_dropping_a_row_releases_its_subscriptions() {
    let grid = Grid::new(2);
    let (row, cells) = grid.project_row("item");
    let (other_row, other_cells) = grid.project_row("other");

    assert_eq!(grid.registry.columns_changed.connection_count(), 2);
    drop(row);
    assert_eq!(grid.registry.columns_changed.connection_count(), 1);
    assert_eq!(cells.changed.connection_count(), 0);

    // The dropped row's cells are frozen; the surviving row still tracks.
    let frozen = cells.cells();
    let ids = grid.column_ids();
    grid.registry.hide_column(ids[0]).unwrap();
    assert_eq!(cells.cells(), frozen);
    assert!(other_cells.cell(0).unwrap().is_hidden());
    drop(other_row);
}

#[test]
fn test_row_drop_releases_expandable_registration() {
    let grid = Grid::new(1);
    let (row, _) = grid.project_row("item");
    row.expand().set_expandable(true);
    assert_eq!(grid.rows_count.count(), 1);

    drop(row);
    assert_eq!(grid.rows_count.count(), 0);
}

#[test]
fn test_two_grids_never_share_selection() {
    let left = Grid::new(1);
    let right = Grid::new(1);
    left.selection.set_mode(SelectionMode::Multi);
    right.selection.set_mode(SelectionMode::Multi);

    let (left_row, _) = left.project_row("shared-item");
    let (right_row, _) = right.project_row("shared-item");

    left_row.toggle();
    assert!(left_row.is_selected());
    assert!(!right_row.is_selected());
}
