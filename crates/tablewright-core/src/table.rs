//! Table type - the physical tree

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cell::{Cell, CellId};
use crate::row::Row;

/// A table: an ordered sequence of physical rows plus the cell-id
/// allocator.
///
/// The table is the single source of truth for the tree; "which row
/// owns this cell" and "which table owns this row" are answered by
/// lookup rather than stored back-pointers, so the structure has no
/// reference cycles. Lookups are linear in the number of cells, which
/// is fine for editor-sized tables (the grid map rebuild that precedes
/// every operation is already O(rows × columns)).
#[derive(Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Table {
    rows: Vec<Row>,
    next_cell_id: u64,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            next_cell_id: 0,
        }
    }

    /// Create a regular `rows` × `cols` table of 1×1 cells carrying the
    /// default style and empty content
    pub fn with_size(rows: usize, cols: usize) -> Self {
        let mut table = Self::new();
        for _ in 0..rows {
            let mut row = Row::new();
            for _ in 0..cols {
                let cell = table.new_cell();
                row.push(cell);
            }
            table.rows.push(row);
        }
        table
    }

    // === Row Access ===

    /// Number of physical rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rows in physical order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get a row by physical index
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Get a mutable row by physical index
    pub fn row_mut(&mut self, index: usize) -> Option<&mut Row> {
        self.rows.get_mut(index)
    }

    /// Insert a row at a physical index (clamped to the row count)
    pub fn insert_row(&mut self, index: usize, row: Row) {
        let index = index.min(self.rows.len());
        self.rows.insert(index, row);
    }

    /// Remove a row by physical index
    pub fn remove_row(&mut self, index: usize) -> Option<Row> {
        if index < self.rows.len() {
            Some(self.rows.remove(index))
        } else {
            None
        }
    }

    /// Remove every row (used when a deletion covers the whole table)
    pub fn clear_rows(&mut self) {
        self.rows.clear();
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    // === Cell Allocation ===

    /// Allocate a fresh 1×1 cell with empty content and the default
    /// style. The cell is not attached until spliced into a row.
    pub fn new_cell(&mut self) -> Cell {
        let id = CellId(self.next_cell_id);
        self.next_cell_id += 1;
        Cell::new(id)
    }

    /// Allocate a fresh cell with the given style
    pub fn new_cell_with_style(&mut self, style: &str) -> Cell {
        let mut cell = self.new_cell();
        cell.style = style.to_string();
        cell
    }

    /// Clone a cell's content, style, and spans into a fresh cell with
    /// its own id. Returns `None` if the source is not in this table.
    pub fn duplicate_cell(&mut self, id: CellId) -> Option<Cell> {
        let (content, style, row_span, col_span) = {
            let cell = self.cell(id)?;
            (
                cell.content.clone(),
                cell.style.clone(),
                cell.row_span,
                cell.col_span,
            )
        };
        let mut copy = self.new_cell();
        copy.content = content;
        copy.style = style;
        copy.row_span = row_span;
        copy.col_span = col_span;
        Some(copy)
    }

    // === Cell Lookup ===

    /// Locate a cell: (physical row index, physical cell index)
    pub fn find_cell(&self, id: CellId) -> Option<(usize, usize)> {
        for (r, row) in self.rows.iter().enumerate() {
            if let Some(i) = row.position_of(id) {
                return Some((r, i));
            }
        }
        None
    }

    /// Physical row index owning a cell
    pub fn row_of(&self, id: CellId) -> Option<usize> {
        self.find_cell(id).map(|(r, _)| r)
    }

    /// Get a cell by id
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        let (r, i) = self.find_cell(id)?;
        self.rows[r].cell(i)
    }

    /// Get a mutable cell by id
    pub fn cell_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        let (r, i) = self.find_cell(id)?;
        self.rows[r].cell_mut(i)
    }

    /// Detach and return a cell by id
    pub fn remove_cell(&mut self, id: CellId) -> Option<Cell> {
        let (r, i) = self.find_cell(id)?;
        Some(self.rows[r].remove(i))
    }

    /// Id of the cell at (physical row index, physical cell index)
    pub fn cell_id_at(&self, row: usize, index: usize) -> Option<CellId> {
        self.rows.get(row)?.cell(index).map(|c| c.id())
    }

    /// Iterate over all cell ids in physical (row-major) order
    pub fn cell_ids(&self) -> impl Iterator<Item = CellId> + '_ {
        self.rows.iter().flat_map(|row| row.iter().map(|c| c.id()))
    }

    /// Number of physical cells
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Row::len).sum()
    }

    /// Style of the first physical cell, used as the style fallback
    /// when a new cell has no displaced reference cell
    pub fn first_style(&self) -> Option<&str> {
        self.rows
            .iter()
            .flat_map(Row::iter)
            .next()
            .map(|c| c.style.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::DEFAULT_CELL_STYLE;

    #[test]
    fn test_with_size() {
        let table = Table::with_size(2, 3);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell_count(), 6);
        for row in table.rows() {
            assert_eq!(row.len(), 3);
            for cell in row.iter() {
                assert_eq!(cell.row_span, 1);
                assert_eq!(cell.col_span, 1);
                assert_eq!(cell.style, DEFAULT_CELL_STYLE);
            }
        }
    }

    #[test]
    fn test_cell_ids_are_unique() {
        let table = Table::with_size(3, 3);
        let mut ids: Vec<_> = table.cell_ids().collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 9);
    }

    #[test]
    fn test_find_cell() {
        let mut table = Table::with_size(2, 2);
        let id = table.cell_id_at(1, 1).unwrap();
        assert_eq!(table.find_cell(id), Some((1, 1)));
        assert_eq!(table.row_of(id), Some(1));

        let removed = table.remove_cell(id).unwrap();
        assert_eq!(removed.id(), id);
        assert_eq!(table.find_cell(id), None);
        assert_eq!(table.cell_count(), 3);
    }

    #[test]
    fn test_duplicate_cell_gets_fresh_id() {
        let mut table = Table::with_size(1, 1);
        let id = table.cell_id_at(0, 0).unwrap();
        {
            let cell = table.cell_mut(id).unwrap();
            cell.content = "hello".to_string();
            cell.row_span = 2;
        }
        let copy = table.duplicate_cell(id).unwrap();
        assert_ne!(copy.id(), id);
        assert_eq!(copy.content, "hello");
        assert_eq!(copy.row_span, 2);
        assert_eq!(copy.col_span, 1);
    }
}
