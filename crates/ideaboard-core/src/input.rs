//! Pointer and keyboard intents delivered by the host.

use crate::elements::ElementId;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event in board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    /// Press, with the element under the pointer if the host hit one.
    Down {
        position: Point,
        target: Option<ElementId>,
    },
    Move {
        position: Point,
    },
    Up,
    /// Double-click on an element; opens notes and text labels for editing.
    DoubleClick {
        target: ElementId,
    },
}

/// Key press with its modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Key name as reported by the host (`"Delete"`, `"z"`, ...).
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }

    /// Map the key press to an editor command.
    pub fn intent(&self) -> Option<KeyIntent> {
        let key = self.key.as_str();
        if key == "Delete" || key == "Backspace" {
            return Some(KeyIntent::DeleteSelected);
        }
        if !self.modifiers.command() {
            return None;
        }
        if key.eq_ignore_ascii_case("z") {
            Some(if self.modifiers.shift {
                KeyIntent::Redo
            } else {
                KeyIntent::Undo
            })
        } else if key.eq_ignore_ascii_case("y") {
            Some(KeyIntent::Redo)
        } else {
            None
        }
    }
}

/// Editor command bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyIntent {
    DeleteSelected,
    Undo,
    Redo,
}
