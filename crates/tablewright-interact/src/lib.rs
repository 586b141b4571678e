//! # tablewright-interact
//!
//! Interactive selection engine for tablewright tables: pointer and
//! keyboard handling, rectangular drag selection, and the
//! selection-driven structural command surface.
//!
//! The engine is host-agnostic. The surrounding editor delivers
//! already-hit-tested [`PointerEvent`]s and [`KeyEvent`]s, implements
//! the narrow [`EditorHost`] capability trait, and registers
//! selection-changed observers. All interactive state is scoped to one
//! [`TableSession`], so independent editors never share anything.
//!
//! ## Example
//!
//! ```rust
//! use tablewright_core::Table;
//! use tablewright_interact::{PointerEvent, TableSession};
//!
//! let table = Table::with_size(2, 2);
//! let first = table.cell_id_at(0, 0).unwrap();
//!
//! let mut session = TableSession::new(table);
//! session.pointer_down(&PointerEvent::on_cell(first));
//! session.pointer_up();
//! assert_eq!(session.selection(), &[first]);
//! ```

pub mod events;
pub mod host;
pub mod selection;
pub mod session;

// Re-exports for convenience
pub use events::{Key, KeyEvent, Modifiers, PointerEvent};
pub use host::{EditorHost, NullHost};
pub use selection::Selection;
pub use session::TableSession;
