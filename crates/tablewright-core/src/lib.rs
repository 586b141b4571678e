//! # tablewright-core
//!
//! Span-aware table model and structural editing core for tablewright,
//! the table-editing engine of a rich-text document editor.
//!
//! This crate provides the fundamental pieces:
//! - [`Table`], [`Row`], [`Cell`] - the physical tree, owned top-down
//! - [`GridMap`] - the logical 2-D view resolving row/col spans,
//!   rebuilt fresh for every operation
//! - [`resolve_range`] and friends - rectangles over the logical grid
//! - [`ops`] - structural mutators: rows, columns, cells, merge/split
//!
//! The crate is host-independent: it knows nothing about cursors,
//! pointers, or documents. Interactive selection lives in
//! `tablewright-interact`.
//!
//! ## Example
//!
//! ```rust
//! use tablewright_core::{ops, GridMap, Table};
//!
//! let mut table = Table::with_size(2, 2);
//! let a = table.cell_id_at(0, 0).unwrap();
//! let b = table.cell_id_at(0, 1).unwrap();
//!
//! // Merge the top row into one cell spanning two columns.
//! ops::merge::merge_cells(&mut table, &[a, b]).unwrap();
//! assert_eq!(table.cell(a).unwrap().col_span, 2);
//!
//! // The logical grid still tiles cleanly.
//! let map = GridMap::build(&table);
//! assert!(map.is_consistent(&table));
//! ```

pub mod cell;
pub mod error;
pub mod grid;
pub mod ops;
pub mod range;
pub mod row;
pub mod table;

// Re-exports for convenience
pub use cell::{is_placeholder_markup, Cell, CellId, DEFAULT_CELL_STYLE, LINE_BREAK};
pub use error::{Error, Result};
pub use grid::{CellPosition, GridMap};
pub use ops::{DeleteOutcome, SplitOutcome};
pub use range::{bounding_rect, cells_in_rect, resolve_range, GridRect, ResolvedRange};
pub use row::Row;
pub use table::Table;
