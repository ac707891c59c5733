use serde::{Deserialize, Serialize};

/// Player mark on a hidden cell, a cell carries at most one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    #[default]
    None,
    Flag,
    Question,
}

/// Single square of the board.
///
/// Mutation goes through the grid so that revealing always drops marks and the hidden mine counter stays in sync.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    has_mine: bool,
    revealed: bool,
    mark: Mark,
    adjacent_mines: u8,
}

impl Cell {
    pub const fn has_mine(self) -> bool {
        self.has_mine
    }

    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.mark, Mark::Flag)
    }

    pub const fn is_questioned(self) -> bool {
        matches!(self.mark, Mark::Question)
    }

    pub const fn mark(self) -> Mark {
        self.mark
    }

    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    /// A blank cell has no mine in its clamped 3x3 block.
    pub const fn is_blank(self) -> bool {
        self.adjacent_mines == 0
    }

    pub(crate) fn arm(&mut self) {
        self.has_mine = true;
    }

    pub(crate) fn set_adjacent_mines(&mut self, count: u8) {
        self.adjacent_mines = count;
    }

    pub(crate) fn set_mark(&mut self, mark: Mark) {
        debug_assert!(!self.revealed || mark == Mark::None);
        self.mark = mark;
    }

    /// Reveals the cell and returns the mark it carried, `None` if it was already revealed.
    pub(crate) fn reveal(&mut self) -> Option<Mark> {
        if self.revealed {
            return None;
        }
        self.revealed = true;
        Some(core::mem::take(&mut self.mark))
    }
}
