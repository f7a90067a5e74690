//! Transient pointer interaction state.

use crate::elements::ElementId;
use kurbo::Point;

/// An in-progress drag or draw. Never part of history.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionSession {
    #[default]
    Idle,
    /// Moving an existing element.
    Dragging {
        id: ElementId,
        /// Pointer position at press.
        origin: Point,
        /// Element position at press.
        start_pos: Point,
    },
    /// Sizing a freshly created shape.
    Drawing { id: ElementId, origin: Point },
}

impl InteractionSession {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The element the session is acting on.
    pub fn element(&self) -> Option<ElementId> {
        match *self {
            Self::Idle => None,
            Self::Dragging { id, .. } | Self::Drawing { id, .. } => Some(id),
        }
    }

    /// Position of the dragged element for a pointer at `current`.
    pub fn drag_position(start_pos: Point, origin: Point, current: Point) -> Point {
        start_pos + (current - origin)
    }
}

/// What a pointer event did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// Nothing changed.
    Ignored,
    /// A note or text label was placed and committed; text edit is open on it.
    Placed(ElementId),
    /// A zero-size shape was added and is following the pointer.
    DrawStarted(ElementId),
    /// An existing element was selected and is following the pointer.
    DragStarted(ElementId),
    /// Press on empty canvas under the select tool.
    SelectionCleared,
    /// The assist tool was used; the host should open its idea-generation flow.
    AssistRequested,
    /// The element under the current session moved or resized.
    Updated(ElementId),
    /// The session ended.
    Released { committed: bool },
    /// Text edit was opened on an element.
    EditStarted(ElementId),
}
