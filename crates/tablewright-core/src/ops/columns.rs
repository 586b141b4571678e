//! Column mutators: logical column insertion and deletion with span
//! repair
//!
//! Columns have no physical container of their own, so insertion must
//! splice one new cell into each physical row at the correct physical
//! index, and deletion edits or removes cells in place.

use ahash::AHashSet;

use super::{physical_insert_index, DeleteOutcome};
use crate::cell::{CellId, DEFAULT_CELL_STYLE};
use crate::error::{Error, Result};
use crate::grid::GridMap;
use crate::table::Table;

/// Insert a new logical column before column `index` (`index` may
/// equal the column count to append at the right edge).
///
/// Per physical row: a cell whose col-span crosses the boundary grows
/// by one column (once, not once per row it spans); a displaced cell's
/// row-span is copied onto the single new cell covering those rows;
/// otherwise the row gets a plain new cell. The splice index counts
/// only cells originating in the row left of the boundary.
pub fn insert_column(table: &mut Table, index: usize) {
    let map = GridMap::build(table);
    let index = index.min(map.column_count());

    let mut grown: AHashSet<CellId> = AHashSet::new();
    // (row, physical index, style source, row_span)
    let mut planned: Vec<(usize, usize, Option<String>, usize)> = Vec::new();

    let mut row = 0;
    while row < table.row_count() {
        let at = map.slot(row, index);
        let left = if index > 0 {
            map.slot(row, index - 1)
        } else {
            None
        };

        if let Some(id) = at {
            if left == Some(id) {
                // Span crosses the boundary: the cell absorbs the new
                // column; skip every row it covers.
                grown.insert(id);
                let skip = map
                    .position(table, id)
                    .map(|p| p.row + p.row_span)
                    .unwrap_or(row + 1);
                row = skip.max(row + 1);
                continue;
            }
            if let Some(pos) = map.position(table, id) {
                if pos.row < row {
                    // Already handled at the cell's anchor row
                    row = (pos.row + pos.row_span).max(row + 1);
                    continue;
                }
                // Displaced cell anchored here: the new cell mirrors
                // its row-span and covers the same rows.
                let style = table.cell(id).map(|c| c.style.clone());
                let splice = physical_insert_index(table, &map, row, index);
                planned.push((row, splice, style, pos.row_span.max(1)));
                row += pos.row_span.max(1);
                continue;
            }
        }

        // Empty slot (ragged row) or right-edge append
        let splice = physical_insert_index(table, &map, row, index);
        planned.push((row, splice, None, 1));
        row += 1;
    }

    let fallback = table.first_style().map(str::to_string);
    for (row, splice, style, row_span) in planned {
        let style = style
            .or_else(|| fallback.clone())
            .unwrap_or_else(|| DEFAULT_CELL_STYLE.to_string());
        let mut cell = table.new_cell_with_style(&style);
        cell.row_span = row_span;
        if let Some(physical_row) = table.row_mut(row) {
            physical_row.insert(splice, cell);
        }
    }
    for id in grown {
        if let Some(cell) = table.cell_mut(id) {
            cell.col_span += 1;
        }
    }
}

/// Delete the given logical columns.
///
/// Columns are processed right-to-left so earlier deletions never
/// invalidate later indices. Every distinct cell occupying a deleted
/// column either shrinks its col-span (if > 1) or is removed outright
/// (if == 1). Full coverage clears all rows and returns
/// [`DeleteOutcome::TableRemoved`].
pub fn delete_columns(table: &mut Table, cols: &[usize]) -> Result<DeleteOutcome> {
    let map = GridMap::build(table);
    let col_count = map.column_count();

    let mut targets: Vec<usize> = cols.iter().copied().filter(|&c| c < col_count).collect();
    targets.sort_unstable();
    targets.dedup();
    if targets.is_empty() {
        return Err(Error::EmptySelection);
    }

    if targets.len() == col_count {
        table.clear_rows();
        return Ok(DeleteOutcome::TableRemoved);
    }

    for &col in targets.iter().rev() {
        delete_single_column(table, col);
    }
    Ok(DeleteOutcome::Removed)
}

fn delete_single_column(table: &mut Table, col: usize) {
    let map = GridMap::build(table);

    let mut seen: AHashSet<CellId> = AHashSet::new();
    let mut shrink: Vec<CellId> = Vec::new();
    let mut remove: Vec<CellId> = Vec::new();

    for row in 0..map.row_count() {
        let Some(id) = map.slot(row, col) else {
            continue;
        };
        if !seen.insert(id) {
            continue;
        }
        let span = table.cell(id).map(|c| c.col_span.max(1)).unwrap_or(1);
        if span > 1 {
            shrink.push(id);
        } else {
            remove.push(id);
        }
    }

    for id in shrink {
        if let Some(cell) = table.cell_mut(id) {
            cell.col_span -= 1;
        }
    }
    for id in remove {
        table.remove_cell(id);
    }
}
