//! Host capability interface
//!
//! The session drives the table model itself; everything it needs from
//! the surrounding editor goes through this narrow trait, so the
//! engine stays independent of any concrete document or rendering
//! layer.

use tablewright_core::CellId;

/// Capabilities the surrounding editor provides to a session.
///
/// All methods have no-op defaults except [`focused_cell`], so a host
/// only implements what it actually surfaces.
///
/// [`focused_cell`]: EditorHost::focused_cell
pub trait EditorHost {
    /// Place the text cursor inside a cell (after merge, the cursor
    /// moves into the anchor).
    fn place_cursor(&mut self, _cell: CellId) {}

    /// Select the full content of a cell (Tab navigation).
    fn select_cell_content(&mut self, _cell: CellId) {}

    /// The cell containing the current text cursor, if any. Used as
    /// the reference for cell insertion when the selection is empty.
    fn focused_cell(&self) -> Option<CellId> {
        None
    }

    /// The whole table was removed; the host should detach its element
    /// from the document.
    fn table_removed(&mut self) {}
}

/// A host that provides nothing. Useful for tests and headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl EditorHost for NullHost {}
