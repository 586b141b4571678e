//! Cell mutators: single-cell insertion and deletion
//!
//! Unlike the row/column mutators these perform **no** span repair:
//! insertion splices a plain 1×1 cell next to the reference cell, and
//! deletion removes nodes outright, holes and all. The asymmetry with
//! row/column deletion is deliberate (see DESIGN.md).

use crate::cell::CellId;
use crate::error::{Error, Result};
use crate::table::Table;

/// Insert a new 1×1 cell immediately before `reference` in its
/// physical row, copying the reference cell's style. Returns the new
/// cell's id.
pub fn insert_cell_before(table: &mut Table, reference: CellId) -> Result<CellId> {
    insert_adjacent(table, reference, 0)
}

/// Insert a new 1×1 cell immediately after `reference` in its physical
/// row, copying the reference cell's style. Returns the new cell's id.
pub fn insert_cell_after(table: &mut Table, reference: CellId) -> Result<CellId> {
    insert_adjacent(table, reference, 1)
}

fn insert_adjacent(table: &mut Table, reference: CellId, offset: usize) -> Result<CellId> {
    let (row, index) = table.find_cell(reference).ok_or(Error::CellNotFound)?;
    let style = table
        .cell(reference)
        .map(|c| c.style.clone())
        .ok_or(Error::CellNotFound)?;

    let cell = table.new_cell_with_style(&style);
    let id = cell.id();
    if let Some(physical_row) = table.row_mut(row) {
        physical_row.insert(index + offset, cell);
    }
    Ok(id)
}

/// Remove every listed cell outright. No span or hole repair runs;
/// cells that are already gone are skipped. Returns how many cells
/// were actually removed.
pub fn delete_cells(table: &mut Table, cells: &[CellId]) -> Result<usize> {
    if cells.is_empty() {
        return Err(Error::EmptySelection);
    }
    let mut removed = 0;
    for &id in cells {
        if table.remove_cell(id).is_some() {
            removed += 1;
        }
    }
    Ok(removed)
}
