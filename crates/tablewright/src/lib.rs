//! # tablewright
//!
//! The table-editing core of a rich-text document editor: a span-aware
//! logical grid over a physical tree of rows and cells, structural
//! editing operations (row/column insertion and deletion, cell
//! insertion/deletion, rectangular merge, row/column split), and an
//! interactive rectangular-selection engine driven by pointer and
//! keyboard input.
//!
//! Every operation keeps row-span/col-span bookkeeping consistent
//! through local, deterministic rules; there is no global re-layout
//! pass and no cached grid.
//!
//! ## Example
//!
//! ```rust
//! use tablewright::prelude::*;
//!
//! // A 3x3 table bound to an interactive session.
//! let table = Table::with_size(3, 3);
//! let a = table.cell_id_at(0, 0).unwrap();
//! let b = table.cell_id_at(1, 1).unwrap();
//!
//! let mut session = TableSession::new(table);
//! let mut host = NullHost;
//!
//! // Select the top-left 2x2 block and merge it.
//! session.select_range(a, b);
//! assert!(session.can_merge());
//! session.merge_cells(&mut host);
//!
//! let merged = session.table().unwrap().cell(a).unwrap();
//! assert_eq!((merged.row_span, merged.col_span), (2, 2));
//! ```

pub mod prelude;

// Re-export core types
pub use tablewright_core::{
    bounding_rect,
    cells_in_rect,
    is_placeholder_markup,
    ops,
    resolve_range,
    // Cell types
    Cell,
    CellId,
    CellPosition,
    DeleteOutcome,
    // Error types
    Error,
    // Grid types
    GridMap,
    GridRect,
    ResolvedRange,
    Result,
    Row,
    SplitOutcome,
    // Main types
    Table,
    DEFAULT_CELL_STYLE,
    LINE_BREAK,
};

// Re-export the interactive engine
pub use tablewright_interact::{
    EditorHost, Key, KeyEvent, Modifiers, NullHost, PointerEvent, Selection, TableSession,
};
