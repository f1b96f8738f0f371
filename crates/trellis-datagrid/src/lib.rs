//! Datagrid row machinery for Trellis.
//!
//! This crate implements the state layer of one datagrid row: the shared
//! column registry, the shared selection, per-row expansion, and the row
//! controller that keeps them consistent. Rendering, layout, scrolling, and
//! the actual input widgets live elsewhere; this crate only owns state and
//! the notifications that drive it.
//!
//! # Core Types
//!
//! - [`HideableColumnRegistry`]: Ordered column descriptors with visibility,
//!   shared by every row of a grid
//! - [`CellList`]: The ordered, observable list of cells projected into one
//!   row
//! - [`Selection`]: Grid-wide selection state with three modes
//! - [`Expand`] / [`RowDisplay`]: Per-row expansion flags and the rendering
//!   view derived from them
//! - [`DatagridRow`]: The controller tying one bound item to all of the
//!   above
//!
//! # Architecture Overview
//!
//! ```text
//! ┌──────────────────────┐  columns_changed   ┌──────────────────┐
//! │ HideableColumn-      │───────────────────>│                  │
//! │ Registry (per grid)  │                    │   DatagridRow    │
//! └──────────────────────┘                    │   (per row)      │
//! ┌──────────────────────┐  changed           │                  │
//! │ CellList (per row)   │───────────────────>│  aligns cells to │
//! │                      │<───────────────────│  columns by      │
//! └──────────────────────┘  identity/hidden   │  ordinal index   │
//! ┌──────────────────────┐                    │                  │
//! │ Selection (per grid) │<──────────────────>│                  │
//! └──────────────────────┘  delegated reads/  └──────────────────┘
//! ┌──────────────────────┐  writes                 │
//! │ Expand (per row)     │<────────────────────────┘
//! └──────────────────────┘
//! ```
//!
//! The row is the single point where the column list and the cell list are
//! read together. Both change independently; the row reconciles them only
//! when their lengths match, so a half-updated pair is never committed (see
//! [`DatagridRow`] for the full alignment rules).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use trellis_datagrid::{
//!     CellList, CommonStrings, DatagridRow, Expand, HideableColumn,
//!     HideableColumnRegistry, Selection, SelectionMode,
//! };
//!
//! // Per-grid shared state.
//! let selection = Arc::new(Selection::with_mode(SelectionMode::Multi));
//! let registry = Arc::new(HideableColumnRegistry::with_columns(vec![
//!     HideableColumn::new(),
//!     HideableColumn::new(),
//! ]));
//!
//! // Per-row state, created as the grid projects the row.
//! let cells = Arc::new(CellList::new());
//! cells.project(2);
//!
//! let mut row = DatagridRow::new(
//!     "order-42".to_string(),
//!     selection.clone(),
//!     registry.clone(),
//!     cells.clone(),
//!     Arc::new(Expand::new()),
//!     Arc::new(CommonStrings::default()),
//! );
//! row.content_ready();
//!
//! // Cells now carry their column identities.
//! assert_eq!(cells.cell(0).unwrap().column(), Some(registry.columns()[0].id()));
//!
//! // Hiding a column propagates to the matching cell.
//! let second = registry.columns()[1].id();
//! registry.hide_column(second).unwrap();
//! assert!(cells.cell(1).unwrap().is_hidden());
//!
//! row.toggle();
//! assert!(selection.is_selected(&"order-42".to_string()));
//! ```

pub mod cell;
pub mod column;
pub mod error;
pub mod expand;
pub mod row;
pub mod selection;
pub mod strings;

pub use cell::{Cell, CellList};
pub use column::{ColumnId, HideableColumn, HideableColumnRegistry};
pub use error::{Error, Result};
pub use expand::{Expand, ExpandableRowsCount, RowDisplay};
pub use row::DatagridRow;
pub use selection::{Selection, SelectionMode};
pub use strings::CommonStrings;
