//! Range resolution: rectangles over the logical grid
//!
//! A range is described by an inclusive [`GridRect`] plus the set of
//! distinct cells occupying its slots. Rectangles come from either a
//! two-cell range (interactive shift/drag selection) or the union of a
//! whole selection's extents (merge).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cell::CellId;
use crate::grid::{CellPosition, GridMap};
use crate::table::Table;

/// An inclusive rectangle of logical grid slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridRect {
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
}

impl GridRect {
    /// The rectangle covered by a single cell's extent
    pub fn from_position(pos: &CellPosition) -> Self {
        Self {
            min_row: pos.row,
            max_row: pos.end_row(),
            min_col: pos.col,
            max_col: pos.end_col(),
        }
    }

    /// Smallest rectangle containing both rectangles
    pub fn union(&self, other: &GridRect) -> Self {
        Self {
            min_row: self.min_row.min(other.min_row),
            max_row: self.max_row.max(other.max_row),
            min_col: self.min_col.min(other.min_col),
            max_col: self.max_col.max(other.max_col),
        }
    }

    /// Whether a slot lies inside the rectangle
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.min_row && row <= self.max_row && col >= self.min_col && col <= self.max_col
    }

    /// Number of logical rows covered
    pub fn height(&self) -> usize {
        self.max_row - self.min_row + 1
    }

    /// Number of logical columns covered
    pub fn width(&self) -> usize {
        self.max_col - self.min_col + 1
    }
}

/// The result of resolving a range: its bounding rectangle and the
/// distinct member cells, in row-major first-encounter order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRange {
    pub rect: GridRect,
    pub cells: Vec<CellId>,
}

/// Resolve the range between two cells of the same table.
///
/// The rectangle is the union of both cells' full extents; the member
/// set is every distinct cell occupying a slot inside it. Returns
/// `None` if either cell is absent from the map.
///
/// Known limitation: the rectangle is computed once from the two input
/// cells and is *not* re-grown when a member cell discovered inside it
/// spans past its edge - such a cell is included even though part of
/// its area falls outside the returned rectangle.
pub fn resolve_range(table: &Table, map: &GridMap, a: CellId, b: CellId) -> Option<ResolvedRange> {
    let pos_a = map.position(table, a)?;
    let pos_b = map.position(table, b)?;
    let rect = GridRect::from_position(&pos_a).union(&GridRect::from_position(&pos_b));
    let cells = cells_in_rect(map, &rect);
    Some(ResolvedRange { rect, cells })
}

/// Bounding rectangle over the extents of every listed cell.
///
/// Returns `None` for an empty list or when any cell is absent from
/// the map.
pub fn bounding_rect(table: &Table, map: &GridMap, cells: &[CellId]) -> Option<GridRect> {
    let mut rect: Option<GridRect> = None;
    for &id in cells {
        let pos = map.position(table, id)?;
        let extent = GridRect::from_position(&pos);
        rect = Some(match rect {
            Some(r) => r.union(&extent),
            None => extent,
        });
    }
    rect
}

/// Distinct cells occupying any slot of a rectangle, in row-major
/// first-encounter order. Empty slots (ragged logical rows) are
/// skipped.
pub fn cells_in_rect(map: &GridMap, rect: &GridRect) -> Vec<CellId> {
    let mut cells = Vec::new();
    for row in rect.min_row..=rect.max_row {
        for col in rect.min_col..=rect.max_col {
            if let Some(id) = map.slot(row, col) {
                if !cells.contains(&id) {
                    cells.push(id);
                }
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_two_cell_range_plain_grid() {
        // Scenario: 3×3 table, range (0,0)..(1,1) → the four cells of
        // the top-left 2×2 block.
        let table = Table::with_size(3, 3);
        let map = GridMap::build(&table);
        let a = table.cell_id_at(0, 0).unwrap();
        let b = table.cell_id_at(1, 1).unwrap();

        let range = resolve_range(&table, &map, a, b).unwrap();
        assert_eq!(
            range.rect,
            GridRect {
                min_row: 0,
                max_row: 1,
                min_col: 0,
                max_col: 1
            }
        );
        assert_eq!(
            range.cells,
            vec![
                a,
                table.cell_id_at(0, 1).unwrap(),
                table.cell_id_at(1, 0).unwrap(),
                b
            ]
        );
    }

    #[test]
    fn test_range_order_is_symmetric() {
        let table = Table::with_size(3, 3);
        let map = GridMap::build(&table);
        let a = table.cell_id_at(0, 0).unwrap();
        let b = table.cell_id_at(2, 2).unwrap();

        let fwd = resolve_range(&table, &map, a, b).unwrap();
        let rev = resolve_range(&table, &map, b, a).unwrap();
        assert_eq!(fwd.rect, rev.rect);
        assert_eq!(fwd.cells, rev.cells);
    }

    #[test]
    fn test_range_covers_full_extent_of_inputs() {
        // b spans two rows, so the rect from (0,0) to b is 2 rows tall.
        let mut table = Table::with_size(2, 2);
        let b = table.cell_id_at(0, 1).unwrap();
        table.cell_mut(b).unwrap().row_span = 2;
        table.row_mut(1).unwrap().remove(1);

        let map = GridMap::build(&table);
        let a = table.cell_id_at(0, 0).unwrap();
        let range = resolve_range(&table, &map, a, b).unwrap();
        assert_eq!(range.rect.height(), 2);
        assert_eq!(range.cells.len(), 3);
    }

    #[test]
    fn test_rect_is_not_regrown_around_member_spans() {
        // Row 0 holds [a, b] with b spanning columns 1-2; row 1 holds
        // [d, e, f]. The range a..e covers columns 0-1 only, yet pulls
        // b in through its slot at (0,1) - part of b's area falls
        // outside the returned rect and the rect is not re-expanded.
        // Pinned on purpose: see the range-resolver note in DESIGN.md
        // before changing this.
        let mut table = Table::with_size(2, 3);
        let b = table.cell_id_at(0, 1).unwrap();
        table.cell_mut(b).unwrap().col_span = 2;
        table.row_mut(0).unwrap().remove(2);

        let map = GridMap::build(&table);
        let a = table.cell_id_at(0, 0).unwrap();
        let d = table.cell_id_at(1, 0).unwrap();
        let e = table.cell_id_at(1, 1).unwrap();

        let range = resolve_range(&table, &map, a, e).unwrap();
        assert_eq!(
            range.rect,
            GridRect {
                min_row: 0,
                max_row: 1,
                min_col: 0,
                max_col: 1
            }
        );
        assert_eq!(range.cells, vec![a, b, d, e]);
        // b's extent sticks out of the rect it was collected into.
        let pos_b = map.position(&table, b).unwrap();
        assert!(pos_b.end_col() > range.rect.max_col);
    }

    #[test]
    fn test_bounding_rect_over_selection() {
        let table = Table::with_size(3, 3);
        let map = GridMap::build(&table);
        let cells = [
            table.cell_id_at(0, 1).unwrap(),
            table.cell_id_at(2, 0).unwrap(),
        ];

        let rect = bounding_rect(&table, &map, &cells).unwrap();
        assert_eq!(
            rect,
            GridRect {
                min_row: 0,
                max_row: 2,
                min_col: 0,
                max_col: 1
            }
        );
        assert_eq!(bounding_rect(&table, &map, &[]), None);
    }

    #[test]
    fn test_detached_cell_fails_resolution() {
        let mut table = Table::with_size(2, 2);
        let a = table.cell_id_at(0, 0).unwrap();
        let b = table.cell_id_at(1, 1).unwrap();
        table.remove_cell(a);

        let map = GridMap::build(&table);
        assert_eq!(resolve_range(&table, &map, a, b), None);
        assert_eq!(bounding_rect(&table, &map, &[a, b]), None);
    }
}
