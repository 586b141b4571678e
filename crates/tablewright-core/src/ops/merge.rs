//! Merge and split engine
//!
//! Rectangular merge with a validity check, directional merge helpers
//! that locate and validate a neighbor before delegating, and the
//! span-halving splits with their insert-row/column fallback.

use super::{columns, physical_insert_index, rows};
use crate::cell::{CellId, LINE_BREAK};
use crate::error::{Error, Result};
use crate::grid::GridMap;
use crate::range::{bounding_rect, cells_in_rect};
use crate::table::Table;

/// What a split actually did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitOutcome {
    /// The cell's span was halved; the id is the newly created sibling
    Split(CellId),
    /// The cell had nothing to split, so a row was inserted after it
    InsertedRow,
    /// The cell had nothing to split, so a column was inserted after it
    InsertedColumn,
}

/// Merge the selected cells into the first one.
///
/// The selection must tile a rectangle: the bounding rectangle over
/// every selected cell's extent is collected from a fresh grid map, and
/// if the number of distinct occupants differs from the selection size
/// the merge fails with no mutation. On success the first selected
/// cell becomes the anchor: non-blank contents of the other cells are
/// appended to it in selection order, joined by a line-break marker;
/// the other cells are removed; the anchor's spans become the
/// rectangle's height and width. Returns the anchor id.
pub fn merge_cells(table: &mut Table, cells: &[CellId]) -> Result<CellId> {
    if cells.len() < 2 {
        return Err(Error::TooFewCells);
    }
    let map = GridMap::build(table);
    let rect = bounding_rect(table, &map, cells).ok_or(Error::CellNotFound)?;
    let members = cells_in_rect(&map, &rect);
    if members.len() != cells.len() {
        return Err(Error::NonRectangularSelection);
    }

    let anchor = cells[0];
    let mut parts: Vec<String> = Vec::new();
    for &id in cells {
        if let Some(cell) = table.cell(id) {
            if !cell.is_blank() {
                parts.push(cell.content.clone());
            }
        }
    }
    for &id in &cells[1..] {
        if id != anchor {
            table.remove_cell(id);
        }
    }
    if let Some(cell) = table.cell_mut(anchor) {
        cell.content = parts.join(LINE_BREAK);
        cell.row_span = rect.height();
        cell.col_span = rect.width();
    }
    Ok(anchor)
}

/// Merge a cell with its neighbor to the right.
///
/// The neighbor is the cell anchored at (own row, own column +
/// col-span); it must exist and carry the same row-span.
pub fn merge_cell_right(table: &mut Table, id: CellId) -> Result<CellId> {
    let neighbor = right_neighbor(table, &GridMap::build(table), id)?;
    merge_cells(table, &[id, neighbor])
}

/// Merge a cell with its neighbor below.
///
/// The neighbor is the cell anchored at (own row + row-span, own
/// column); it must exist and carry the same col-span.
pub fn merge_cell_down(table: &mut Table, id: CellId) -> Result<CellId> {
    let neighbor = below_neighbor(table, &GridMap::build(table), id)?;
    merge_cells(table, &[id, neighbor])
}

fn right_neighbor(table: &Table, map: &GridMap, id: CellId) -> Result<CellId> {
    let pos = map.position(table, id).ok_or(Error::CellNotFound)?;
    let neighbor = map
        .slot(pos.row, pos.col + pos.col_span)
        .ok_or(Error::NoMergeNeighbor)?;
    let npos = map.position(table, neighbor).ok_or(Error::NoMergeNeighbor)?;
    if npos.row != pos.row || npos.col != pos.col + pos.col_span {
        return Err(Error::NoMergeNeighbor);
    }
    if npos.row_span != pos.row_span {
        return Err(Error::SpanMismatch);
    }
    Ok(neighbor)
}

fn below_neighbor(table: &Table, map: &GridMap, id: CellId) -> Result<CellId> {
    let pos = map.position(table, id).ok_or(Error::CellNotFound)?;
    let neighbor = map
        .slot(pos.row + pos.row_span, pos.col)
        .ok_or(Error::NoMergeNeighbor)?;
    let npos = map.position(table, neighbor).ok_or(Error::NoMergeNeighbor)?;
    if npos.col != pos.col || npos.row != pos.row + pos.row_span {
        return Err(Error::NoMergeNeighbor);
    }
    if npos.col_span != pos.col_span {
        return Err(Error::SpanMismatch);
    }
    Ok(neighbor)
}

/// Split a cell across its row-span.
///
/// The cell keeps the floor half of its span; a new cell with the same
/// style and col-span takes the remainder, anchored at the row just
/// past the shrunk span and spliced at the physical index matching the
/// original's logical column. A cell with row-span 1 has nothing to
/// split: the engine instead inserts a row after it (documented
/// fallback, reported as [`SplitOutcome::InsertedRow`]).
pub fn split_cell_horizontal(table: &mut Table, id: CellId) -> Result<SplitOutcome> {
    let map = GridMap::build(table);
    let pos = map.position(table, id).ok_or(Error::CellNotFound)?;

    // Clamp spans overhanging the bottom of a malformed table.
    let span = pos.row_span.min(table.row_count() - pos.row);
    if span <= 1 {
        rows::insert_row(table, pos.row + 1);
        return Ok(SplitOutcome::InsertedRow);
    }

    let kept = span / 2;
    let remainder = span - kept;
    let style = table
        .cell(id)
        .map(|c| c.style.clone())
        .ok_or(Error::CellNotFound)?;
    if let Some(cell) = table.cell_mut(id) {
        cell.row_span = kept;
    }

    let target_row = pos.row + kept;
    let map = GridMap::build(table);
    let splice = physical_insert_index(table, &map, target_row, pos.col);
    let mut cell = table.new_cell_with_style(&style);
    cell.row_span = remainder;
    cell.col_span = pos.col_span;
    let new_id = cell.id();
    if let Some(physical_row) = table.row_mut(target_row) {
        physical_row.insert(splice, cell);
    }
    Ok(SplitOutcome::Split(new_id))
}

/// Split a cell across its col-span.
///
/// Column analogue of [`split_cell_horizontal`]: the sibling carries
/// the remainder col-span and the original row-span and is spliced
/// immediately after the original in the same physical row. A cell
/// with col-span 1 gets a column inserted after it instead.
pub fn split_cell_vertical(table: &mut Table, id: CellId) -> Result<SplitOutcome> {
    let map = GridMap::build(table);
    let pos = map.position(table, id).ok_or(Error::CellNotFound)?;

    if pos.col_span <= 1 {
        columns::insert_column(table, pos.col + pos.col_span);
        return Ok(SplitOutcome::InsertedColumn);
    }

    let kept = pos.col_span / 2;
    let remainder = pos.col_span - kept;
    let style = table
        .cell(id)
        .map(|c| c.style.clone())
        .ok_or(Error::CellNotFound)?;
    if let Some(cell) = table.cell_mut(id) {
        cell.col_span = kept;
    }

    let mut cell = table.new_cell_with_style(&style);
    cell.row_span = pos.row_span;
    cell.col_span = remainder;
    let new_id = cell.id();
    if let Some((row, index)) = table.find_cell(id) {
        if let Some(physical_row) = table.row_mut(row) {
            physical_row.insert(index + 1, cell);
        }
    }
    Ok(SplitOutcome::Split(new_id))
}

// === Eligibility checks ===

/// Whether [`merge_cells`] would succeed for this selection
pub fn can_merge(table: &Table, cells: &[CellId]) -> bool {
    if cells.len() < 2 {
        return false;
    }
    let map = GridMap::build(table);
    match bounding_rect(table, &map, cells) {
        Some(rect) => cells_in_rect(&map, &rect).len() == cells.len(),
        None => false,
    }
}

/// Whether [`merge_cell_right`] would succeed for this cell
pub fn can_merge_right(table: &Table, id: CellId) -> bool {
    right_neighbor(table, &GridMap::build(table), id).is_ok()
}

/// Whether [`merge_cell_down`] would succeed for this cell
pub fn can_merge_down(table: &Table, id: CellId) -> bool {
    below_neighbor(table, &GridMap::build(table), id).is_ok()
}

/// Whether [`split_cell_horizontal`] would perform an edit.
///
/// True whenever the cell resolves in the grid map - a span-1 cell
/// still triggers the insert-row fallback.
pub fn can_split_horizontal(table: &Table, id: CellId) -> bool {
    GridMap::build(table).position(table, id).is_some()
}

/// Whether [`split_cell_vertical`] would perform an edit.
pub fn can_split_vertical(table: &Table, id: CellId) -> bool {
    GridMap::build(table).position(table, id).is_some()
}
