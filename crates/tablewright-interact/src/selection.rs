//! Selection: an ordered set of cells
//!
//! Order of addition is irrelevant to membership but the first and
//! last cells matter: the first selected cell is the merge anchor, the
//! last is the moving end of shift/arrow extension.

use ahash::AHashSet;
use tablewright_core::CellId;

/// An ordered sequence of cells with set semantics for membership
#[derive(Debug, Default)]
pub struct Selection {
    order: Vec<CellId>,
    members: AHashSet<CellId>,
}

impl Selection {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected cells in insertion order
    pub fn cells(&self) -> &[CellId] {
        &self.order
    }

    /// Number of selected cells
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if nothing is selected
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Membership test
    pub fn contains(&self, id: CellId) -> bool {
        self.members.contains(&id)
    }

    /// First selected cell (the merge anchor)
    pub fn first(&self) -> Option<CellId> {
        self.order.first().copied()
    }

    /// Last selected cell (the moving end of an extension)
    pub fn last(&self) -> Option<CellId> {
        self.order.last().copied()
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }

    /// Add a cell; duplicates are ignored
    pub fn push(&mut self, id: CellId) {
        if self.members.insert(id) {
            self.order.push(id);
        }
    }

    /// Add or remove a cell (ctrl/cmd-click)
    pub fn toggle(&mut self, id: CellId) {
        if self.members.remove(&id) {
            self.order.retain(|c| *c != id);
        } else {
            self.members.insert(id);
            self.order.push(id);
        }
    }

    /// Replace the whole selection
    pub fn set(&mut self, cells: Vec<CellId>) {
        self.clear();
        for id in cells {
            self.push(id);
        }
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = CellId> + '_ {
        self.order.iter().copied()
    }
}
