//! Linear undo/redo history over whole-board snapshots.

use crate::board::Board;

/// Result of an undo or redo request.
///
/// Hitting either end of the log is reported, not treated as an error, so hosts
/// can disable the matching button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The cursor moved and the board was restored.
    Restored,
    /// Already at the oldest entry.
    NothingToUndo,
    /// Already at the newest entry.
    NothingToRedo,
}

impl Navigation {
    pub fn is_restored(self) -> bool {
        self == Navigation::Restored
    }
}

/// Ordered log of board snapshots with a cursor on the current one.
///
/// The first entry is always the empty board and the log is never empty.
#[derive(Debug, Clone)]
pub struct History {
    log: Vec<Board>,
    index: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            log: vec![Board::new()],
            index: 0,
        }
    }

    /// Record `board` as the newest entry.
    ///
    /// Returns false when `board` equals the current entry, in which case the log
    /// is left untouched. Otherwise any redo entries past the cursor are dropped.
    pub fn commit(&mut self, board: &Board) -> bool {
        if *board == self.log[self.index] {
            return false;
        }
        self.log.truncate(self.index + 1);
        self.log.push(board.clone());
        self.index = self.log.len() - 1;
        true
    }

    /// Step back one entry; read the restored board with [`History::current`].
    pub fn undo(&mut self) -> Navigation {
        if self.index == 0 {
            return Navigation::NothingToUndo;
        }
        self.index -= 1;
        Navigation::Restored
    }

    /// Step forward one entry; read the restored board with [`History::current`].
    pub fn redo(&mut self) -> Navigation {
        if self.index + 1 >= self.log.len() {
            return Navigation::NothingToRedo;
        }
        self.index += 1;
        Navigation::Restored
    }

    /// The entry under the cursor.
    pub fn current(&self) -> &Board {
        &self.log[self.index]
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.log.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// Always false: the log holds at least the empty board.
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }
}
