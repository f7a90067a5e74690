//! Tool system for the whiteboard.

use crate::config::BoardConfig;
use crate::elements::{ElementKind, ElementStyle};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Rectangle,
    Circle,
    Triangle,
    Arrow,
    Cloud,
    Note,
    Text,
    /// Asks the host to run its idea-generation flow; creates nothing itself.
    Assist,
}

/// What a pointer-down does under a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolBehavior {
    /// Select and drag existing elements.
    Select,
    /// Create a full-size element on a single click.
    ClickToPlace(ElementKind),
    /// Create an element sized by pointer travel.
    DragToDraw(ElementKind),
    /// Signal the host; no board change.
    Assist,
}

impl ToolKind {
    pub const ALL: [ToolKind; 9] = [
        ToolKind::Select,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Triangle,
        ToolKind::Arrow,
        ToolKind::Cloud,
        ToolKind::Note,
        ToolKind::Text,
        ToolKind::Assist,
    ];

    /// The creation tool for an element kind.
    pub fn for_kind(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Rectangle => ToolKind::Rectangle,
            ElementKind::Circle => ToolKind::Circle,
            ElementKind::Triangle => ToolKind::Triangle,
            ElementKind::Arrow => ToolKind::Arrow,
            ElementKind::Cloud => ToolKind::Cloud,
            ElementKind::Note => ToolKind::Note,
            ElementKind::Text => ToolKind::Text,
        }
    }

    /// The element kind this tool creates, if any.
    pub fn element_kind(self) -> Option<ElementKind> {
        match self {
            ToolKind::Rectangle => Some(ElementKind::Rectangle),
            ToolKind::Circle => Some(ElementKind::Circle),
            ToolKind::Triangle => Some(ElementKind::Triangle),
            ToolKind::Arrow => Some(ElementKind::Arrow),
            ToolKind::Cloud => Some(ElementKind::Cloud),
            ToolKind::Note => Some(ElementKind::Note),
            ToolKind::Text => Some(ElementKind::Text),
            ToolKind::Select | ToolKind::Assist => None,
        }
    }

    pub fn behavior(self) -> ToolBehavior {
        match (self, self.element_kind()) {
            (ToolKind::Assist, _) => ToolBehavior::Assist,
            (_, Some(kind)) if kind.holds_text() => ToolBehavior::ClickToPlace(kind),
            (_, Some(kind)) => ToolBehavior::DragToDraw(kind),
            (_, None) => ToolBehavior::Select,
        }
    }

    pub fn creates_elements(self) -> bool {
        self.element_kind().is_some()
    }

    /// Toolbar label.
    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Select => "Select & Move",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Circle => "Circle",
            ToolKind::Triangle => "Triangle",
            ToolKind::Arrow => "Arrow",
            ToolKind::Cloud => "Cloud",
            ToolKind::Note => "Sticky Note",
            ToolKind::Text => "Text Label",
            ToolKind::Assist => "AI Brainstorm",
        }
    }
}

/// Tracks the active tool and the style override applied to new elements.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Style for new elements; `None` uses the configured default for each kind.
    current_style: Option<ElementStyle>,
}

impl ToolManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
    }

    /// Return to the select tool.
    pub fn reset(&mut self) {
        self.current_tool = ToolKind::Select;
    }

    pub fn set_style(&mut self, style: Option<ElementStyle>) {
        self.current_style = style;
    }

    pub fn current_style(&self) -> Option<&ElementStyle> {
        self.current_style.as_ref()
    }

    /// Style for a new element of `kind`.
    pub fn style_for(&self, kind: ElementKind, config: &BoardConfig) -> ElementStyle {
        self.current_style
            .clone()
            .unwrap_or_else(|| config.default_style(kind))
    }
}
