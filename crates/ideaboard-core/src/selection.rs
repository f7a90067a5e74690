//! Selection and text-edit focus.
//!
//! Elements remain pure data; which one is selected or being edited lives here.

use crate::elements::ElementId;

/// The UI state of a single element, as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    /// Normal display state.
    #[default]
    Normal,
    /// Selected (shows an outline, can be moved).
    Selected,
    /// Selected and open in the text editor.
    Editing,
}

impl FocusState {
    pub fn is_selected(self) -> bool {
        matches!(self, Self::Selected | Self::Editing)
    }
}

/// At most one selected element, and at most one element under text edit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<ElementId>,
    editing: Option<ElementId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn editing(&self) -> Option<ElementId> {
        self.editing
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected == Some(id)
    }

    pub fn is_editing(&self, id: ElementId) -> bool {
        self.editing == Some(id)
    }

    pub fn state(&self, id: ElementId) -> FocusState {
        if self.is_editing(id) {
            FocusState::Editing
        } else if self.is_selected(id) {
            FocusState::Selected
        } else {
            FocusState::Normal
        }
    }

    /// Select a single element.
    pub fn select(&mut self, id: ElementId) {
        self.selected = Some(id);
    }

    /// Select an element and open it for text editing.
    pub fn enter_editing(&mut self, id: ElementId) {
        self.selected = Some(id);
        self.editing = Some(id);
    }

    /// Close the text editor, keeping the selection. Returns the element that was being edited.
    pub fn exit_editing(&mut self) -> Option<ElementId> {
        self.editing.take()
    }

    /// Drop both the selection and the text editor.
    pub fn clear(&mut self) {
        self.selected = None;
        self.editing = None;
    }

    /// Forget an element that left the board.
    pub fn forget(&mut self, id: ElementId) {
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.editing == Some(id) {
            self.editing = None;
        }
    }
}
