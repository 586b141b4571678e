//! Prelude module - common imports for tablewright users
//!
//! ```rust
//! use tablewright::prelude::*;
//! ```

pub use crate::{
    // Cell types
    Cell,
    CellId,
    CellPosition,
    DeleteOutcome,
    // Host interface
    EditorHost,
    // Error types
    Error,
    // Grid types
    GridMap,
    GridRect,
    // Events
    Key,
    KeyEvent,
    Modifiers,
    NullHost,
    PointerEvent,
    ResolvedRange,
    Result,
    Row,
    // Selection engine
    Selection,
    SplitOutcome,
    // Main types
    Table,
    TableSession,
};
