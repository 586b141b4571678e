//! Structural editing operations
//!
//! Every operation here follows the same shape: build a fresh
//! [`GridMap`](crate::GridMap) from the physical tree, decide the edit
//! against that snapshot, then mutate the tree directly. Nothing is
//! cached between operations.
//!
//! Span bookkeeping is repaired by local rules only - cells crossing an
//! edit boundary grow or shrink, cells anchored on it are recreated or
//! duplicated - so a well-formed table stays well-formed without any
//! global re-layout pass.

pub mod cells;
pub mod columns;
pub mod merge;
pub mod rows;

pub use merge::SplitOutcome;

use crate::grid::GridMap;
use crate::table::Table;

/// What a row/column deletion did to the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The targets covered every logical row/column: all rows were
    /// cleared and the caller should remove the table element itself
    TableRemoved,
    /// Only the targeted rows/columns were removed
    Removed,
}

/// Physical splice index in `row` for a cell that should land at
/// logical column `col`: the number of cells *originating* in that
/// physical row whose anchor column is strictly left of `col`. Slots
/// occupied only via row-span overflow from above don't count.
pub(crate) fn physical_insert_index(
    table: &Table,
    map: &GridMap,
    row: usize,
    col: usize,
) -> usize {
    let Some(physical_row) = table.row(row) else {
        return 0;
    };
    let slots = map.row_slots(row);
    physical_row
        .iter()
        .filter(|cell| {
            slots
                .iter()
                .position(|s| *s == Some(cell.id()))
                .is_some_and(|anchor| anchor < col)
        })
        .count()
}
