//! Interactive table-editing session
//!
//! A [`TableSession`] binds one table, one selection, and one drag
//! anchor. All interactive state lives here and nowhere else, so any
//! number of sessions (editors) can run side by side. The session is
//! also where the selection-driven command surface lives: it maps the
//! current selection onto the index/id arguments of the core mutators.
//!
//! Pointer and key handlers return `true` when the event was consumed;
//! the host should then suppress its default handling (native text
//! selection during a drag, native key behavior).

use log::{debug, trace};

use tablewright_core::grid::CellPosition;
use tablewright_core::{ops, resolve_range, CellId, DeleteOutcome, GridMap, SplitOutcome, Table};

use crate::events::{Key, KeyEvent, PointerEvent};
use crate::host::EditorHost;
use crate::selection::Selection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointerState {
    Idle,
    Dragging,
}

type SelectionObserver = Box<dyn FnMut(&[CellId])>;

/// One interactive editing session over one table.
pub struct TableSession {
    table: Option<Table>,
    selection: Selection,
    anchor: Option<CellId>,
    state: PointerState,
    observers: Vec<SelectionObserver>,
}

impl TableSession {
    /// Bind a session to a table
    pub fn new(table: Table) -> Self {
        Self {
            table: Some(table),
            selection: Selection::new(),
            anchor: None,
            state: PointerState::Idle,
            observers: Vec::new(),
        }
    }

    // === Accessors ===

    /// The bound table, `None` once it has been removed
    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    /// Mutable access to the bound table
    pub fn table_mut(&mut self) -> Option<&mut Table> {
        self.table.as_mut()
    }

    /// Give the table back, ending the session
    pub fn into_table(self) -> Option<Table> {
        self.table
    }

    /// Current selection snapshot, in insertion order
    pub fn selection(&self) -> &[CellId] {
        self.selection.cells()
    }

    /// The drag/shift anchor cell, if any
    pub fn anchor(&self) -> Option<CellId> {
        self.anchor
    }

    /// Whether a pointer drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.state == PointerState::Dragging
    }

    /// Register a selection-changed observer. Observers run
    /// synchronously with the new snapshot whenever the selection
    /// actually changes.
    pub fn on_selection_change(&mut self, observer: impl FnMut(&[CellId]) + 'static) {
        self.observers.push(Box::new(observer));
    }

    // === Pointer handling ===

    /// Pointer-down. No modifier starts a drag selection; ctrl/cmd
    /// toggles membership; shift selects the rectangle from the
    /// anchor. A press outside any cell clears the selection and is
    /// not consumed.
    pub fn pointer_down(&mut self, event: &PointerEvent) -> bool {
        let target = event.target.filter(|&id| self.cell_exists(id));
        let Some(cell) = target else {
            self.state = PointerState::Idle;
            if !self.selection.is_empty() {
                debug!("pointer down outside table, clearing selection");
                self.set_selection(Vec::new());
            }
            return false;
        };

        if event.modifiers.ctrl {
            self.selection.toggle(cell);
            self.notify();
            return true;
        }

        if event.modifiers.shift {
            if let Some(anchor) = self.anchor {
                if self.select_rect(anchor, cell) {
                    return true;
                }
            }
        }

        self.anchor = Some(cell);
        self.state = PointerState::Dragging;
        self.set_selection(vec![cell]);
        true
    }

    /// Pointer-move. While dragging, the rectangle from the anchor to
    /// the cell under the pointer is recomputed on every event.
    /// Returns `true` so the host cancels native text selection.
    pub fn pointer_move(&mut self, event: &PointerEvent) -> bool {
        if self.state != PointerState::Dragging {
            return false;
        }
        let Some(cell) = event.target else {
            return false;
        };
        if !self.cell_exists(cell) {
            return false;
        }
        let Some(anchor) = self.anchor else {
            return false;
        };
        trace!("drag over {cell:?}");
        self.select_rect(anchor, cell)
    }

    /// Pointer-up ends the drag; the anchor is kept for later
    /// shift-clicks.
    pub fn pointer_up(&mut self) {
        self.state = PointerState::Idle;
    }

    // === Keyboard handling ===

    /// Dispatch a key event. Returns `true` when consumed.
    pub fn key_down(&mut self, host: &mut dyn EditorHost, event: &KeyEvent) -> bool {
        if self.table.is_none() {
            return false;
        }
        match event.key {
            Key::Escape => {
                if self.selection.is_empty() {
                    false
                } else {
                    debug!("escape, clearing selection");
                    self.set_selection(Vec::new());
                    true
                }
            }
            Key::Char(c) if event.modifiers.ctrl && c.eq_ignore_ascii_case(&'a') => {
                self.select_all()
            }
            Key::Delete | Key::Backspace => self.blank_selected_cells(),
            Key::Tab => self.tab_navigate(host, event.modifiers.shift),
            Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight => {
                self.arrow_navigate(event.key, event.modifiers.shift)
            }
            Key::Char(_) => false,
        }
    }

    /// Select every physical cell of the table (Ctrl/Cmd+A)
    pub fn select_all(&mut self) -> bool {
        let Some(table) = self.table.as_ref() else {
            return false;
        };
        let cells: Vec<CellId> = table.cell_ids().collect();
        if cells.is_empty() {
            return false;
        }
        self.set_selection(cells);
        true
    }

    /// Programmatically select the rectangle between two cells
    pub fn select_range(&mut self, start: CellId, end: CellId) -> bool {
        if self.select_rect(start, end) {
            self.anchor = Some(start);
            true
        } else {
            false
        }
    }

    // === Structural commands (selection-driven) ===

    /// Insert a row above the topmost selected cell
    pub fn insert_row_before(&mut self) -> bool {
        let Some(table) = self.table.as_mut() else {
            return false;
        };
        let map = GridMap::build(table);
        let target = self
            .selection
            .iter()
            .filter_map(|id| map.position(table, id))
            .map(|p| p.row)
            .min();
        let Some(row) = target else {
            debug!("insert row before: nothing selected");
            return false;
        };
        ops::rows::insert_row(table, row);
        true
    }

    /// Insert a row below the deepest row touched by the selection
    /// (not merely below the first selected cell's row)
    pub fn insert_row_after(&mut self) -> bool {
        let Some(table) = self.table.as_mut() else {
            return false;
        };
        let map = GridMap::build(table);
        let target = self
            .selection
            .iter()
            .filter_map(|id| map.position(table, id))
            .map(|p| p.row + p.row_span)
            .max();
        let Some(row) = target else {
            debug!("insert row after: nothing selected");
            return false;
        };
        ops::rows::insert_row(table, row);
        true
    }

    /// Delete the physical rows owning the selected cells
    pub fn delete_rows(&mut self, host: &mut dyn EditorHost) -> bool {
        let outcome = {
            let Some(table) = self.table.as_mut() else {
                return false;
            };
            let rows: Vec<usize> = self
                .selection
                .iter()
                .filter_map(|id| table.row_of(id))
                .collect();
            ops::rows::delete_rows(table, &rows)
        };
        self.finish_delete("rows", outcome, host)
    }

    /// Insert a column left of the leftmost selected cell
    pub fn insert_column_before(&mut self) -> bool {
        let Some(table) = self.table.as_mut() else {
            return false;
        };
        let map = GridMap::build(table);
        let target = self
            .selection
            .iter()
            .filter_map(|id| map.position(table, id))
            .map(|p| p.col)
            .min();
        let Some(col) = target else {
            debug!("insert column before: nothing selected");
            return false;
        };
        ops::columns::insert_column(table, col);
        true
    }

    /// Insert a column right of the selection's widest extent
    pub fn insert_column_after(&mut self) -> bool {
        let Some(table) = self.table.as_mut() else {
            return false;
        };
        let map = GridMap::build(table);
        let target = self
            .selection
            .iter()
            .filter_map(|id| map.position(table, id))
            .map(|p| p.col + p.col_span)
            .max();
        let Some(col) = target else {
            debug!("insert column after: nothing selected");
            return false;
        };
        ops::columns::insert_column(table, col);
        true
    }

    /// Delete the logical columns anchoring the selected cells
    pub fn delete_columns(&mut self, host: &mut dyn EditorHost) -> bool {
        let outcome = {
            let Some(table) = self.table.as_mut() else {
                return false;
            };
            let map = GridMap::build(table);
            let cols: Vec<usize> = self
                .selection
                .iter()
                .filter_map(|id| map.position(table, id))
                .map(|p| p.col)
                .collect();
            ops::columns::delete_columns(table, &cols)
        };
        self.finish_delete("columns", outcome, host)
    }

    /// Insert a cell before the reference cell (first selected, else
    /// the host's focused cell). Returns the new cell's id.
    pub fn insert_cell_before(&mut self, host: &mut dyn EditorHost) -> Option<CellId> {
        let reference = self.selection.first().or_else(|| host.focused_cell())?;
        let table = self.table.as_mut()?;
        ops::cells::insert_cell_before(table, reference).ok()
    }

    /// Insert a cell after the reference cell (first selected, else
    /// the host's focused cell). Returns the new cell's id.
    pub fn insert_cell_after(&mut self, host: &mut dyn EditorHost) -> Option<CellId> {
        let reference = self.selection.first().or_else(|| host.focused_cell())?;
        let table = self.table.as_mut()?;
        ops::cells::insert_cell_after(table, reference).ok()
    }

    /// Delete the selected cells outright (no span repair)
    pub fn delete_cells(&mut self) -> bool {
        let ids = self.selection.cells().to_vec();
        let result = {
            let Some(table) = self.table.as_mut() else {
                return false;
            };
            ops::cells::delete_cells(table, &ids)
        };
        match result {
            Ok(_) => {
                self.anchor = None;
                self.set_selection(Vec::new());
                true
            }
            Err(err) => {
                debug!("delete cells rejected: {err}");
                false
            }
        }
    }

    /// Merge the selected cells into the first one
    pub fn merge_cells(&mut self, host: &mut dyn EditorHost) -> bool {
        let cells = self.selection.cells().to_vec();
        let result = {
            let Some(table) = self.table.as_mut() else {
                return false;
            };
            ops::merge::merge_cells(table, &cells)
        };
        self.finish_merge(result, host)
    }

    /// Merge the single selected cell with its right neighbor
    pub fn merge_cell_right(&mut self, host: &mut dyn EditorHost) -> bool {
        let Some(cell) = self.single_selected() else {
            return false;
        };
        let result = {
            let Some(table) = self.table.as_mut() else {
                return false;
            };
            ops::merge::merge_cell_right(table, cell)
        };
        self.finish_merge(result, host)
    }

    /// Merge the single selected cell with the cell below it
    pub fn merge_cell_down(&mut self, host: &mut dyn EditorHost) -> bool {
        let Some(cell) = self.single_selected() else {
            return false;
        };
        let result = {
            let Some(table) = self.table.as_mut() else {
                return false;
            };
            ops::merge::merge_cell_down(table, cell)
        };
        self.finish_merge(result, host)
    }

    /// Split the single selected cell across its row-span. A span-1
    /// cell gets a row inserted after it instead (documented
    /// fallback); the returned outcome says which edit ran.
    pub fn split_cell_horizontal(&mut self) -> Option<SplitOutcome> {
        let cell = self.single_selected()?;
        let table = self.table.as_mut()?;
        match ops::merge::split_cell_horizontal(table, cell) {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                debug!("split rejected: {err}");
                None
            }
        }
    }

    /// Split the single selected cell across its col-span. A span-1
    /// cell gets a column inserted after it instead.
    pub fn split_cell_vertical(&mut self) -> Option<SplitOutcome> {
        let cell = self.single_selected()?;
        let table = self.table.as_mut()?;
        match ops::merge::split_cell_vertical(table, cell) {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                debug!("split rejected: {err}");
                None
            }
        }
    }

    /// Remove the whole table
    pub fn delete_table(&mut self, host: &mut dyn EditorHost) -> bool {
        if self.table.take().is_none() {
            return false;
        }
        debug!("table deleted");
        self.anchor = None;
        self.set_selection(Vec::new());
        host.table_removed();
        true
    }

    // === Eligibility ===

    /// Whether merging the current selection would succeed
    pub fn can_merge(&self) -> bool {
        match &self.table {
            Some(table) => ops::merge::can_merge(table, self.selection.cells()),
            None => false,
        }
    }

    /// Whether the single selected cell can merge right
    pub fn can_merge_right(&self) -> bool {
        self.single_eligible(ops::merge::can_merge_right)
    }

    /// Whether the single selected cell can merge down
    pub fn can_merge_down(&self) -> bool {
        self.single_eligible(ops::merge::can_merge_down)
    }

    /// Whether a horizontal split would perform an edit (the insert-row
    /// fallback counts)
    pub fn can_split_horizontal(&self) -> bool {
        self.single_eligible(ops::merge::can_split_horizontal)
    }

    /// Whether a vertical split would perform an edit
    pub fn can_split_vertical(&self) -> bool {
        self.single_eligible(ops::merge::can_split_vertical)
    }

    // === Internals ===

    fn cell_exists(&self, id: CellId) -> bool {
        self.table.as_ref().is_some_and(|t| t.cell(id).is_some())
    }

    fn single_selected(&self) -> Option<CellId> {
        if self.selection.len() == 1 {
            self.selection.first()
        } else {
            None
        }
    }

    fn single_eligible(&self, check: impl Fn(&Table, CellId) -> bool) -> bool {
        match (self.single_selected(), &self.table) {
            (Some(cell), Some(table)) => check(table, cell),
            _ => false,
        }
    }

    /// Replace the selection, notifying observers only on change
    fn set_selection(&mut self, cells: Vec<CellId>) {
        if self.selection.cells() == cells.as_slice() {
            return;
        }
        self.selection.set(cells);
        self.notify();
    }

    fn notify(&mut self) {
        let snapshot = self.selection.cells().to_vec();
        for observer in &mut self.observers {
            observer(&snapshot);
        }
    }

    /// Select the rectangle between two cells from a fresh grid map
    fn select_rect(&mut self, start: CellId, end: CellId) -> bool {
        let cells = {
            let Some(table) = self.table.as_ref() else {
                return false;
            };
            let map = GridMap::build(table);
            let Some(range) = resolve_range(table, &map, start, end) else {
                return false;
            };
            range.cells
        };
        self.set_selection(cells);
        true
    }

    fn finish_merge(
        &mut self,
        result: tablewright_core::Result<CellId>,
        host: &mut dyn EditorHost,
    ) -> bool {
        match result {
            Ok(anchor) => {
                self.anchor = Some(anchor);
                self.set_selection(Vec::new());
                host.place_cursor(anchor);
                true
            }
            Err(err) => {
                debug!("merge rejected: {err}");
                false
            }
        }
    }

    fn finish_delete(
        &mut self,
        what: &str,
        outcome: tablewright_core::Result<DeleteOutcome>,
        host: &mut dyn EditorHost,
    ) -> bool {
        match outcome {
            Ok(DeleteOutcome::TableRemoved) => {
                debug!("{what} deletion removed the table");
                self.table = None;
                self.anchor = None;
                self.set_selection(Vec::new());
                host.table_removed();
                true
            }
            Ok(DeleteOutcome::Removed) => {
                self.anchor = None;
                self.set_selection(Vec::new());
                true
            }
            Err(err) => {
                debug!("delete {what} rejected: {err}");
                false
            }
        }
    }

    /// Delete/Backspace over a multi-cell selection blanks every
    /// selected cell; a single cell is left to the host's native text
    /// deletion.
    fn blank_selected_cells(&mut self) -> bool {
        if self.selection.len() <= 1 {
            return false;
        }
        let ids: Vec<CellId> = self.selection.cells().to_vec();
        let Some(table) = self.table.as_mut() else {
            return false;
        };
        for id in ids {
            if let Some(cell) = table.cell_mut(id) {
                cell.content.clear();
            }
        }
        true
    }

    fn arrow_navigate(&mut self, key: Key, extend: bool) -> bool {
        if extend {
            let (anchor, next) = {
                let Some(table) = self.table.as_ref() else {
                    return false;
                };
                let map = GridMap::build(table);
                let Some(anchor) = self.anchor.or_else(|| self.selection.first()) else {
                    return false;
                };
                let Some(end) = self.selection.last() else {
                    return false;
                };
                let Some(next) = arrow_target(table, &map, end, key) else {
                    return false;
                };
                (anchor, next)
            };
            self.anchor = Some(anchor);
            return self.select_rect(anchor, next);
        }

        let next = {
            let Some(table) = self.table.as_ref() else {
                return false;
            };
            let Some(current) = self.single_selected() else {
                return false;
            };
            let map = GridMap::build(table);
            let Some(next) = arrow_target(table, &map, current, key) else {
                return false;
            };
            next
        };
        self.anchor = Some(next);
        self.set_selection(vec![next]);
        true
    }

    fn tab_navigate(&mut self, host: &mut dyn EditorHost, backwards: bool) -> bool {
        let Some(current) = self.selection.last().or_else(|| host.focused_cell()) else {
            return false;
        };

        let found = {
            let Some(table) = self.table.as_ref() else {
                return false;
            };
            let map = GridMap::build(table);
            let Some(pos) = map.position(table, current) else {
                return false;
            };
            if backwards {
                prev_slot(&map, current, &pos)
            } else {
                next_slot(&map, current, &pos)
            }
        };

        let target = match found {
            Some(id) => id,
            None if backwards => return false,
            None => {
                // Tab at the last slot of the last row grows the table
                let Some(table) = self.table.as_mut() else {
                    return false;
                };
                let index = table.row_count();
                ops::rows::insert_row(table, index);
                let Some(id) = table.row(index).and_then(|r| r.cell(0)).map(|c| c.id()) else {
                    return false;
                };
                debug!("tab past end, inserted row {index}");
                id
            }
        };

        self.anchor = Some(target);
        self.set_selection(vec![target]);
        host.select_cell_content(target);
        true
    }
}

/// The adjacent grid slot in a direction, stepping past the cell's own
/// span: down moves by row-span, right by col-span, up/left by one.
fn arrow_target(table: &Table, map: &GridMap, from: CellId, key: Key) -> Option<CellId> {
    let pos = map.position(table, from)?;
    let (row, col) = match key {
        Key::ArrowDown => (pos.row + pos.row_span, pos.col),
        Key::ArrowUp => (pos.row.checked_sub(1)?, pos.col),
        Key::ArrowRight => (pos.row, pos.col + pos.col_span),
        Key::ArrowLeft => (pos.row, pos.col.checked_sub(1)?),
        _ => return None,
    };
    map.slot(row, col)
}

/// Next occupied slot in row-major order after the cell's extent,
/// wrapping to following rows. `None` means the cell holds the last
/// slot of the table.
fn next_slot(map: &GridMap, current: CellId, pos: &CellPosition) -> Option<CellId> {
    let cols = map.column_count();
    let mut row = pos.row;
    let mut col = pos.col + pos.col_span;
    while row < map.row_count() {
        while col < cols {
            if let Some(id) = map.slot(row, col) {
                if id != current {
                    return Some(id);
                }
            }
            col += 1;
        }
        row += 1;
        col = 0;
    }
    None
}

/// Previous occupied slot in row-major order before the cell's anchor,
/// wrapping to the end of earlier rows.
fn prev_slot(map: &GridMap, current: CellId, pos: &CellPosition) -> Option<CellId> {
    let cols = map.column_count();
    if cols == 0 {
        return None;
    }
    let mut row = pos.row;
    let mut col = pos.col;
    loop {
        if col == 0 {
            if row == 0 {
                return None;
            }
            row -= 1;
            col = cols;
        }
        col -= 1;
        if let Some(id) = map.slot(row, col) {
            if id != current {
                return Some(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Modifiers;
    use crate::host::NullHost;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn session_3x3() -> (TableSession, Vec<Vec<CellId>>) {
        let table = Table::with_size(3, 3);
        let ids = (0..3)
            .map(|r| (0..3).map(|c| table.cell_id_at(r, c).unwrap()).collect())
            .collect();
        (TableSession::new(table), ids)
    }

    #[test]
    fn test_click_selects_and_starts_drag() {
        let (mut session, ids) = session_3x3();
        assert!(session.pointer_down(&PointerEvent::on_cell(ids[1][1])));
        assert_eq!(session.selection(), &[ids[1][1]]);
        assert_eq!(session.anchor(), Some(ids[1][1]));
        assert!(session.is_dragging());

        session.pointer_up();
        assert!(!session.is_dragging());
        assert_eq!(session.anchor(), Some(ids[1][1]));
    }

    #[test]
    fn test_click_outside_clears() {
        let (mut session, ids) = session_3x3();
        session.pointer_down(&PointerEvent::on_cell(ids[0][0]));
        session.pointer_up();

        assert!(!session.pointer_down(&PointerEvent::outside()));
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_ctrl_click_toggles() {
        let (mut session, ids) = session_3x3();
        let ctrl = Modifiers::CTRL;
        session.pointer_down(&PointerEvent::on_cell(ids[0][0]).with_modifiers(ctrl));
        session.pointer_down(&PointerEvent::on_cell(ids[2][2]).with_modifiers(ctrl));
        assert_eq!(session.selection(), &[ids[0][0], ids[2][2]]);
        assert!(!session.is_dragging());

        session.pointer_down(&PointerEvent::on_cell(ids[0][0]).with_modifiers(ctrl));
        assert_eq!(session.selection(), &[ids[2][2]]);
    }

    #[test]
    fn test_shift_click_selects_rectangle() {
        let (mut session, ids) = session_3x3();
        session.pointer_down(&PointerEvent::on_cell(ids[0][0]));
        session.pointer_up();

        session.pointer_down(&PointerEvent::on_cell(ids[1][1]).with_modifiers(Modifiers::SHIFT));
        assert_eq!(
            session.selection(),
            &[ids[0][0], ids[0][1], ids[1][0], ids[1][1]]
        );
    }

    #[test]
    fn test_drag_recomputes_rectangle() {
        let (mut session, ids) = session_3x3();
        session.pointer_down(&PointerEvent::on_cell(ids[0][0]));
        assert!(session.pointer_move(&PointerEvent::on_cell(ids[0][1])));
        assert_eq!(session.selection().len(), 2);

        assert!(session.pointer_move(&PointerEvent::on_cell(ids[2][2])));
        assert_eq!(session.selection().len(), 9);

        // Dragging back shrinks the rectangle again
        assert!(session.pointer_move(&PointerEvent::on_cell(ids[1][0])));
        assert_eq!(session.selection(), &[ids[0][0], ids[1][0]]);
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let (mut session, ids) = session_3x3();
        assert!(!session.pointer_move(&PointerEvent::on_cell(ids[1][1])));
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_escape_clears_selection() {
        let (mut session, ids) = session_3x3();
        let mut host = NullHost;
        session.pointer_down(&PointerEvent::on_cell(ids[0][0]));

        assert!(session.key_down(&mut host, &KeyEvent::plain(Key::Escape)));
        assert!(session.selection().is_empty());
        assert!(!session.key_down(&mut host, &KeyEvent::plain(Key::Escape)));
    }

    #[test]
    fn test_ctrl_a_selects_all() {
        let (mut session, _) = session_3x3();
        let mut host = NullHost;
        let event = KeyEvent::plain(Key::Char('a')).with_modifiers(Modifiers::CTRL);
        assert!(session.key_down(&mut host, &event));
        assert_eq!(session.selection().len(), 9);
    }

    #[test]
    fn test_arrow_moves_single_selection() {
        let (mut session, ids) = session_3x3();
        let mut host = NullHost;
        session.pointer_down(&PointerEvent::on_cell(ids[1][1]));
        session.pointer_up();

        assert!(session.key_down(&mut host, &KeyEvent::plain(Key::ArrowRight)));
        assert_eq!(session.selection(), &[ids[1][2]]);
        assert!(session.key_down(&mut host, &KeyEvent::plain(Key::ArrowDown)));
        assert_eq!(session.selection(), &[ids[2][2]]);
        assert!(session.key_down(&mut host, &KeyEvent::plain(Key::ArrowUp)));
        assert_eq!(session.selection(), &[ids[1][2]]);

        // At the right edge the event is not consumed
        assert!(!session.key_down(&mut host, &KeyEvent::plain(Key::ArrowRight)));
        assert_eq!(session.selection(), &[ids[1][2]]);
    }

    #[test]
    fn test_arrow_steps_past_own_span() {
        // The selected cell spans two rows; ArrowDown lands below the
        // whole span, not inside it.
        let mut table = Table::with_size(3, 2);
        let a = table.cell_id_at(0, 0).unwrap();
        table.cell_mut(a).unwrap().row_span = 2;
        table.row_mut(1).unwrap().remove(0);
        let below = table.cell_id_at(2, 0).unwrap();

        let mut session = TableSession::new(table);
        let mut host = NullHost;
        session.pointer_down(&PointerEvent::on_cell(a));
        session.pointer_up();

        assert!(session.key_down(&mut host, &KeyEvent::plain(Key::ArrowDown)));
        assert_eq!(session.selection(), &[below]);
    }

    #[test]
    fn test_shift_arrow_extends_rectangle() {
        let (mut session, ids) = session_3x3();
        let mut host = NullHost;
        session.pointer_down(&PointerEvent::on_cell(ids[0][0]));
        session.pointer_up();

        let event = KeyEvent::plain(Key::ArrowDown).with_modifiers(Modifiers::SHIFT);
        assert!(session.key_down(&mut host, &event));
        assert_eq!(session.selection(), &[ids[0][0], ids[1][0]]);

        let event = KeyEvent::plain(Key::ArrowRight).with_modifiers(Modifiers::SHIFT);
        assert!(session.key_down(&mut host, &event));
        assert_eq!(session.selection().len(), 4);
        assert_eq!(session.anchor(), Some(ids[0][0]));
    }

    #[test]
    fn test_tab_wraps_to_next_row() {
        let (mut session, ids) = session_3x3();
        let mut host = NullHost;
        session.pointer_down(&PointerEvent::on_cell(ids[0][2]));
        session.pointer_up();

        assert!(session.key_down(&mut host, &KeyEvent::plain(Key::Tab)));
        assert_eq!(session.selection(), &[ids[1][0]]);
    }

    #[test]
    fn test_shift_tab_wraps_to_previous_row() {
        let (mut session, ids) = session_3x3();
        let mut host = NullHost;
        session.pointer_down(&PointerEvent::on_cell(ids[1][0]));
        session.pointer_up();

        let event = KeyEvent::plain(Key::Tab).with_modifiers(Modifiers::SHIFT);
        assert!(session.key_down(&mut host, &event));
        assert_eq!(session.selection(), &[ids[0][2]]);
    }

    #[test]
    fn test_shift_tab_at_start_is_noop() {
        let (mut session, ids) = session_3x3();
        let mut host = NullHost;
        session.pointer_down(&PointerEvent::on_cell(ids[0][0]));
        session.pointer_up();

        let event = KeyEvent::plain(Key::Tab).with_modifiers(Modifiers::SHIFT);
        assert!(!session.key_down(&mut host, &event));
        assert_eq!(session.selection(), &[ids[0][0]]);
    }

    #[test]
    fn test_tab_at_end_inserts_row() {
        let (mut session, ids) = session_3x3();
        let mut host = NullHost;
        session.pointer_down(&PointerEvent::on_cell(ids[2][2]));
        session.pointer_up();

        assert!(session.key_down(&mut host, &KeyEvent::plain(Key::Tab)));
        let table = session.table().unwrap();
        assert_eq!(table.row_count(), 4);
        let first_new = table.row(3).unwrap().cell(0).unwrap().id();
        assert_eq!(session.selection(), &[first_new]);
    }

    #[test]
    fn test_delete_key_blanks_multi_selection_only() {
        let (mut session, ids) = session_3x3();
        let mut host = NullHost;
        {
            let table = session.table_mut().unwrap();
            table.cell_mut(ids[0][0]).unwrap().content = "x".into();
            table.cell_mut(ids[0][1]).unwrap().content = "y".into();
        }

        // Single selection: deferred to the host
        session.pointer_down(&PointerEvent::on_cell(ids[0][0]));
        session.pointer_up();
        assert!(!session.key_down(&mut host, &KeyEvent::plain(Key::Delete)));
        assert_eq!(session.table().unwrap().cell(ids[0][0]).unwrap().content, "x");

        // Multi selection: contents blanked, cells kept
        session.select_range(ids[0][0], ids[0][1]);
        assert!(session.key_down(&mut host, &KeyEvent::plain(Key::Backspace)));
        let table = session.table().unwrap();
        assert_eq!(table.cell(ids[0][0]).unwrap().content, "");
        assert_eq!(table.cell(ids[0][1]).unwrap().content, "");
        assert_eq!(session.selection().len(), 2);
    }

    #[test]
    fn test_observers_fire_on_change_only() {
        let (mut session, ids) = session_3x3();
        let log: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        session.on_selection_change(move |cells| sink.borrow_mut().push(cells.len()));

        session.pointer_down(&PointerEvent::on_cell(ids[0][0]));
        // Re-selecting the same cell changes nothing and stays silent
        session.pointer_move(&PointerEvent::on_cell(ids[0][0]));
        session.pointer_move(&PointerEvent::on_cell(ids[1][1]));
        session.pointer_up();

        assert_eq!(*log.borrow(), vec![1, 4]);
    }

    #[test]
    fn test_structural_commands_from_selection() {
        let (mut session, ids) = session_3x3();
        let mut host = NullHost;

        session.pointer_down(&PointerEvent::on_cell(ids[1][1]));
        session.pointer_up();
        assert!(session.insert_row_before());
        assert_eq!(session.table().unwrap().row_count(), 4);

        assert!(session.insert_column_after());
        let map = GridMap::build(session.table().unwrap());
        assert_eq!(map.column_count(), 4);

        assert!(session.delete_rows(&mut host));
        assert_eq!(session.table().unwrap().row_count(), 3);
        assert!(session.selection().is_empty());

        // Commands without a selection are no-ops
        assert!(!session.insert_row_before());
        assert!(!session.delete_rows(&mut host));
    }

    #[test]
    fn test_merge_command_places_cursor() {
        struct CursorHost(Option<CellId>);
        impl EditorHost for CursorHost {
            fn place_cursor(&mut self, cell: CellId) {
                self.0 = Some(cell);
            }
        }

        let (mut session, ids) = session_3x3();
        let mut host = CursorHost(None);
        session.select_range(ids[0][0], ids[1][1]);
        assert!(session.can_merge());
        assert!(session.merge_cells(&mut host));

        assert_eq!(host.0, Some(ids[0][0]));
        assert!(session.selection().is_empty());
        let cell = session.table().unwrap().cell(ids[0][0]).unwrap();
        assert_eq!(cell.row_span, 2);
        assert_eq!(cell.col_span, 2);
    }

    #[test]
    fn test_delete_all_rows_removes_table() {
        struct RemovalHost(bool);
        impl EditorHost for RemovalHost {
            fn table_removed(&mut self) {
                self.0 = true;
            }
        }

        let (mut session, _) = session_3x3();
        let mut host = RemovalHost(false);
        session.select_all();
        assert!(session.delete_rows(&mut host));
        assert!(host.0);
        assert!(session.table().is_none());

        // Everything after removal is a no-op
        assert!(!session.select_all());
        assert!(!session.insert_row_before());
    }
}
