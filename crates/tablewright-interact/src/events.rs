//! Input event types
//!
//! Events are plain data. The host owns real event wiring and
//! hit-testing: it resolves the element under the pointer to a
//! [`CellId`] (or `None` for anywhere outside the table) before
//! handing the event to the session.

use tablewright_core::CellId;

/// Modifier flags carried by pointer and keyboard events.
///
/// `ctrl` covers both Ctrl and Cmd; the session never distinguishes
/// them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
    };

    /// Ctrl/Cmd held
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
        alt: false,
    };

    /// Shift held
    pub const SHIFT: Modifiers = Modifiers {
        ctrl: false,
        shift: true,
        alt: false,
    };
}

/// A pointer event, already hit-tested by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// The cell under the pointer, or `None` outside the table
    pub target: Option<CellId>,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Event targeting a cell with no modifiers
    pub fn on_cell(cell: CellId) -> Self {
        Self {
            target: Some(cell),
            modifiers: Modifiers::NONE,
        }
    }

    /// Event landing outside the table
    pub fn outside() -> Self {
        Self {
            target: None,
            modifiers: Modifiers::NONE,
        }
    }

    /// Attach modifiers
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Keys the session reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Tab,
    Escape,
    Delete,
    Backspace,
    /// A printable key (used for Ctrl/Cmd+A)
    Char(char),
}

/// A keyboard event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Key press with no modifiers
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Attach modifiers
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
