//! Row mutators: logical row insertion and deletion with span repair

use ahash::AHashSet;

use super::{physical_insert_index, DeleteOutcome};
use crate::cell::{CellId, DEFAULT_CELL_STYLE};
use crate::error::{Error, Result};
use crate::grid::GridMap;
use crate::row::Row;
use crate::table::Table;

/// Insert a new logical row before row `index` (`index` may equal the
/// row count to append below the last row).
///
/// For each unprocessed logical column at the boundary: a cell whose
/// row-span already crosses the boundary grows by one row instead of
/// being cut; every other position gets a new cell whose style comes
/// from the displaced occupant, else any cell in the table, else the
/// built-in default, and whose col-span mirrors the displaced
/// occupant's so the logical column count is preserved.
pub fn insert_row(table: &mut Table, index: usize) {
    let map = GridMap::build(table);
    let index = index.min(table.row_count());
    let col_count = map.column_count();

    let mut grown: AHashSet<CellId> = AHashSet::new();
    // (style source, col_span) for the new row's cells, left to right
    let mut planned: Vec<(Option<String>, usize)> = Vec::new();

    let mut col = 0;
    while col < col_count {
        let above = if index > 0 {
            map.slot(index - 1, col)
        } else {
            None
        };
        let at = map.slot(index, col);

        if let (Some(above_id), Some(at_id)) = (above, at) {
            if above_id == at_id {
                // Span crosses the boundary: the cell absorbs the new row
                let span = table
                    .cell(above_id)
                    .map(|c| c.col_span.max(1))
                    .unwrap_or(1);
                grown.insert(above_id);
                col += span;
                continue;
            }
        }

        let (style, span) = match at.and_then(|id| table.cell(id)) {
            Some(displaced) => (Some(displaced.style.clone()), displaced.col_span.max(1)),
            None => (None, 1),
        };
        planned.push((style, span));
        col += span;
    }

    let fallback = table.first_style().map(str::to_string);
    let mut cells = Vec::with_capacity(planned.len());
    for (style, span) in planned {
        let style = style
            .or_else(|| fallback.clone())
            .unwrap_or_else(|| DEFAULT_CELL_STYLE.to_string());
        let mut cell = table.new_cell_with_style(&style);
        cell.col_span = span;
        cells.push(cell);
    }

    for id in grown {
        if let Some(cell) = table.cell_mut(id) {
            cell.row_span += 1;
        }
    }
    table.insert_row(index, Row::from_cells(cells));
}

/// Delete the given physical rows.
///
/// Rows are processed bottom-up so earlier deletions never invalidate
/// later indices. If the targets cover every row, all rows are cleared
/// and [`DeleteOutcome::TableRemoved`] tells the caller to drop the
/// table itself.
pub fn delete_rows(table: &mut Table, rows: &[usize]) -> Result<DeleteOutcome> {
    let mut targets: Vec<usize> = rows
        .iter()
        .copied()
        .filter(|&r| r < table.row_count())
        .collect();
    targets.sort_unstable();
    targets.dedup();
    if targets.is_empty() {
        return Err(Error::EmptySelection);
    }

    if targets.len() == table.row_count() {
        table.clear_rows();
        return Ok(DeleteOutcome::TableRemoved);
    }

    for &row in targets.iter().rev() {
        delete_single_row(table, row);
    }
    Ok(DeleteOutcome::Removed)
}

/// Delete one physical row, repairing spans across the boundary:
/// spans reaching in from above shrink by one; cells anchored in the
/// row with a span continuing below are duplicated into the next row
/// (content and style, row-span − 1) at the physical index matching
/// their logical column.
fn delete_single_row(table: &mut Table, row: usize) {
    let map = GridMap::build(table);
    let col_count = map.column_count();

    let mut seen: AHashSet<CellId> = AHashSet::new();
    let mut shrink: Vec<CellId> = Vec::new();
    // (logical col, content, style, col_span, remaining row_span)
    let mut survivors: Vec<(usize, String, String, usize, usize)> = Vec::new();

    for col in 0..col_count {
        let Some(id) = map.slot(row, col) else {
            continue;
        };
        if !seen.insert(id) {
            continue;
        }
        let Some(pos) = map.position(table, id) else {
            continue;
        };
        if pos.row < row && pos.row + pos.row_span > row {
            shrink.push(id);
        } else if pos.row == row && pos.row_span > 1 {
            if let Some(cell) = table.cell(id) {
                survivors.push((
                    pos.col,
                    cell.content.clone(),
                    cell.style.clone(),
                    pos.col_span,
                    pos.row_span - 1,
                ));
            }
        }
    }

    for id in shrink {
        if let Some(cell) = table.cell_mut(id) {
            cell.row_span -= 1;
        }
    }
    table.remove_row(row);

    // The row that was below the deleted one now sits at `row`.
    for (col, content, style, col_span, row_span) in survivors {
        if row >= table.row_count() {
            // Deleted the last row; a span overhanging the bottom was
            // malformed to begin with, nothing to reinsert into.
            break;
        }
        let map = GridMap::build(table);
        let index = physical_insert_index(table, &map, row, col);
        let mut cell = table.new_cell_with_style(&style);
        cell.content = content;
        cell.col_span = col_span;
        cell.row_span = row_span;
        if let Some(physical_row) = table.row_mut(row) {
            physical_row.insert(index, cell);
        }
    }
}
