//! Element definitions for the whiteboard.

mod color;

pub use color::HexColor;

use crate::config::BoardConfig;
use crate::error::ElementError;
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// The seven element variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Rectangle,
    Circle,
    Triangle,
    Arrow,
    Cloud,
    Note,
    Text,
}

impl ElementKind {
    pub const ALL: [ElementKind; 7] = [
        ElementKind::Rectangle,
        ElementKind::Circle,
        ElementKind::Triangle,
        ElementKind::Arrow,
        ElementKind::Cloud,
        ElementKind::Note,
        ElementKind::Text,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Rectangle => "rectangle",
            ElementKind::Circle => "circle",
            ElementKind::Triangle => "triangle",
            ElementKind::Arrow => "arrow",
            ElementKind::Cloud => "cloud",
            ElementKind::Note => "note",
            ElementKind::Text => "text",
        }
    }

    /// Notes and text labels carry editable text and are placed with a single click.
    pub fn holds_text(self) -> bool {
        matches!(self, ElementKind::Note | ElementKind::Text)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementKind {
    type Err = ElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ElementError::invalid(format!("unknown element kind {s:?}")))
    }
}

/// Presentation attributes shared by every element kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyle {
    pub fill_color: HexColor,
    pub stroke_color: HexColor,
    pub stroke_width: f64,
}

impl ElementStyle {
    pub fn new(fill_color: HexColor, stroke_color: HexColor, stroke_width: f64) -> Self {
        Self {
            fill_color,
            stroke_color,
            stroke_width,
        }
    }

    pub fn validate(&self) -> Result<(), ElementError> {
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(ElementError::invalid(format!(
                "stroke width must be a non-negative number, got {}",
                self.stroke_width
            )));
        }
        Ok(())
    }
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self::new(HexColor::TRANSPARENT, HexColor::rgb(0x1e, 0x29, 0x3b), 2.0)
    }
}

/// A freshly created element, plus whether the caller should open a text editor on it.
#[derive(Debug, Clone, PartialEq)]
pub struct NewElement {
    pub element: Element,
    pub begins_text_edit: bool,
}

/// A whiteboard element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub(crate) id: ElementId,
    pub(crate) kind: ElementKind,
    /// Top-left corner position.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    #[serde(flatten)]
    pub style: ElementStyle,
    /// Only meaningful for notes and text labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Element {
    /// Create an element anchored at `anchor` with kind-specific defaults.
    ///
    /// Notes and text labels get their configured size, centered on the anchor,
    /// with empty text. Shapes start with zero size at the anchor and are sized by
    /// a following drag.
    pub fn create(
        kind: ElementKind,
        anchor: Point,
        style: ElementStyle,
        config: &BoardConfig,
    ) -> Result<NewElement, ElementError> {
        check_point(anchor, "anchor")?;
        style.validate()?;

        let element = if kind.holds_text() {
            let size = config.default_size(kind);
            let position = anchor - Vec2::new(size.width / 2.0, size.height / 2.0);
            Self::sized(kind, position, size.width, size.height, style)?.with_text("")
        } else {
            Self::sized(kind, anchor, 0.0, 0.0, style)?
        };

        Ok(NewElement {
            element,
            begins_text_edit: kind.holds_text(),
        })
    }

    /// Create an element with an explicit position and size.
    pub fn sized(
        kind: ElementKind,
        position: Point,
        width: f64,
        height: f64,
        style: ElementStyle,
    ) -> Result<Self, ElementError> {
        let element = Self {
            id: Uuid::new_v4(),
            kind,
            position,
            width,
            height,
            style,
            text: None,
        };
        element.validate()?;
        Ok(element)
    }

    /// Check geometry and style for malformed values.
    pub fn validate(&self) -> Result<(), ElementError> {
        check_point(self.position, "position")?;
        for (what, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ElementError::invalid(format!(
                    "{what} must be a non-negative number, got {value}"
                )));
            }
        }
        self.style.validate()
    }

    /// Set the text content, for kinds that hold text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        if self.kind.holds_text() {
            self.text = Some(text.into());
        }
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    /// Check if a point falls inside the element's box, edges included.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let rect = self.bounds().inflate(tolerance, tolerance);
        point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
    }

    /// Stretch the element between two corners, anchored at the smaller coordinate.
    pub fn span(&mut self, origin: Point, current: Point) {
        self.position = Point::new(origin.x.min(current.x), origin.y.min(current.y));
        self.width = (current.x - origin.x).abs();
        self.height = (current.y - origin.y).abs();
    }
}

pub(crate) fn check_point(point: Point, what: &str) -> Result<(), ElementError> {
    if point.x.is_finite() && point.y.is_finite() {
        Ok(())
    } else {
        Err(ElementError::invalid(format!(
            "{what} must be finite, got ({}, {})",
            point.x, point.y
        )))
    }
}
