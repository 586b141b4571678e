//! Error types for tablewright-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while editing a table.
///
/// Every error means the operation was a no-op: the physical tree is
/// exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The operation needs a non-empty selection
    #[error("Selection is empty")]
    EmptySelection,

    /// A cell was not found in its table's grid map (detached, or
    /// belongs to a different table)
    #[error("Cell not found in table grid")]
    CellNotFound,

    /// Merge requires at least two cells
    #[error("Merge requires at least two cells")]
    TooFewCells,

    /// The selected cells do not tile a rectangle of grid slots
    #[error("Selection is not rectangular")]
    NonRectangularSelection,

    /// No adjacent cell exists in the merge direction
    #[error("No adjacent cell to merge with")]
    NoMergeNeighbor,

    /// The adjacent cell's span does not match the merge direction
    #[error("Adjacent cell span does not match")]
    SpanMismatch,
}
