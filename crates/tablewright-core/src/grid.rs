//! Grid map: the logical 2-D view of a table
//!
//! The grid map resolves row-span/col-span overlaps into a plain
//! rows × columns array of slots. It is a derived, disposable view:
//! every operation that needs one builds it fresh from the physical
//! tree and throws it away afterwards. For an unchanged tree the build
//! is deterministic and idempotent.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cell::CellId;
use crate::table::Table;

/// A cell's anchor position and spans in the logical grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellPosition {
    /// Anchor logical row (equals the cell's physical row index)
    pub row: usize,
    /// Anchor logical column
    pub col: usize,
    /// Rows occupied from the anchor
    pub row_span: usize,
    /// Columns occupied from the anchor
    pub col_span: usize,
}

impl CellPosition {
    /// Last logical row occupied (inclusive)
    pub fn end_row(&self) -> usize {
        self.row + self.row_span - 1
    }

    /// Last logical column occupied (inclusive)
    pub fn end_col(&self) -> usize {
        self.col + self.col_span - 1
    }
}

/// The logical grid: one slot per (row, column), each either empty or
/// referencing exactly one cell.
///
/// Malformed tables (inconsistent spans) degrade to partially filled
/// logical rows rather than failing; lookups against such a map simply
/// come back absent.
#[derive(Debug)]
pub struct GridMap {
    slots: Vec<Vec<Option<CellId>>>,
}

impl GridMap {
    /// Build the logical grid from the physical tree.
    ///
    /// Walks physical rows top-to-bottom and cells left-to-right,
    /// advancing a logical-column cursor past slots already claimed by
    /// spans overflowing from rows above, then stamping each cell's
    /// row-span × col-span rectangle. Rectangles are clamped to the
    /// physical row count. O(rows × columns).
    pub fn build(table: &Table) -> Self {
        let row_count = table.row_count();
        let mut slots: Vec<Vec<Option<CellId>>> = vec![Vec::new(); row_count];

        for (r, row) in table.rows().iter().enumerate() {
            let mut cursor = 0usize;
            for cell in row.iter() {
                // Skip slots claimed by spans from rows above
                while slots[r].get(cursor).is_some_and(Option::is_some) {
                    cursor += 1;
                }

                let row_span = cell.row_span.max(1);
                let col_span = cell.col_span.max(1);
                for i in 0..row_span {
                    let rr = r + i;
                    if rr >= row_count {
                        break;
                    }
                    if slots[rr].len() < cursor + col_span {
                        slots[rr].resize(cursor + col_span, None);
                    }
                    for slot in &mut slots[rr][cursor..cursor + col_span] {
                        *slot = Some(cell.id());
                    }
                }
                cursor += col_span;
            }
        }

        Self { slots }
    }

    /// Number of logical rows (equals the physical row count)
    pub fn row_count(&self) -> usize {
        self.slots.len()
    }

    /// Logical column count: the width of the widest logical row
    pub fn column_count(&self) -> usize {
        self.slots.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// The cell occupying a slot, if any
    pub fn slot(&self, row: usize, col: usize) -> Option<CellId> {
        self.slots.get(row)?.get(col).copied().flatten()
    }

    /// All slots of one logical row
    pub fn row_slots(&self, row: usize) -> &[Option<CellId>] {
        self.slots.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Resolve a cell to its anchor position and spans.
    ///
    /// Returns `None` when the cell is absent from the map: detached,
    /// or owned by a different table than assumed.
    pub fn position(&self, table: &Table, id: CellId) -> Option<CellPosition> {
        let row = table.row_of(id)?;
        // The first slot referencing the cell in its own physical row
        // is its anchor: overflow from spans above never lands in the
        // row the cell originates in ahead of the cell itself.
        let col = self.row_slots(row).iter().position(|s| *s == Some(id))?;
        let cell = table.cell(id)?;
        Some(CellPosition {
            row,
            col,
            row_span: cell.row_span.max(1),
            col_span: cell.col_span.max(1),
        })
    }

    /// Distinct cells occupying a logical row, in column order
    pub fn cells_in_row(&self, row: usize) -> Vec<CellId> {
        let mut out = Vec::new();
        for id in self.row_slots(row).iter().flatten() {
            if !out.contains(id) {
                out.push(*id);
            }
        }
        out
    }

    /// Distinct cells occupying a logical column, in row order
    pub fn cells_in_column(&self, col: usize) -> Vec<CellId> {
        let mut out = Vec::new();
        for row in &self.slots {
            if let Some(Some(id)) = row.get(col) {
                if !out.contains(id) {
                    out.push(*id);
                }
            }
        }
        out
    }

    /// Check the core grid invariant against the physical tree: every
    /// cell's full row-span × col-span rectangle is filled with
    /// references to that cell, and no slot is claimed by two cells.
    ///
    /// Used by tests after every mutator; a well-formed table must stay
    /// well-formed.
    pub fn is_consistent(&self, table: &Table) -> bool {
        let mut claimed: Vec<Vec<Option<CellId>>> =
            vec![vec![None; self.column_count()]; self.row_count()];

        for id in table.cell_ids() {
            let Some(pos) = self.position(table, id) else {
                return false;
            };
            for r in pos.row..=pos.end_row() {
                for c in pos.col..=pos.end_col() {
                    let Some(slot) = claimed.get_mut(r).and_then(|row| row.get_mut(c)) else {
                        return false;
                    };
                    if slot.is_some() {
                        // Two cells claim the same slot
                        return false;
                    }
                    *slot = Some(id);
                    if self.slot(r, c) != Some(id) {
                        return false;
                    }
                }
            }
        }
        true
    }
}
