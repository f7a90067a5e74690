//! Board state: the ordered element collection.

use crate::elements::{Element, ElementId};
use crate::error::ElementError;
use kurbo::{Point, Rect, Size};
use std::collections::HashMap;

/// All elements on the board, keyed by ID, with a separate paint order.
///
/// Equality is structural and order-sensitive: two boards holding the same
/// elements in a different paint order are not equal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    elements: HashMap<ElementId, Element>,
    /// Paint order (back to front).
    z_order: Vec<ElementId>,
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from elements in paint order.
    pub fn from_elements(elements: impl IntoIterator<Item = Element>) -> Result<Self, ElementError> {
        let mut board = Self::new();
        for element in elements {
            if board.contains(element.id()) {
                return Err(ElementError::invalid(format!(
                    "duplicate element id {}",
                    element.id()
                )));
            }
            board.push(element);
        }
        Ok(board)
    }

    /// Append an element on top of the paint order.
    ///
    /// Panics if an element with the same ID is already on the board.
    pub fn push(&mut self, element: Element) {
        let id = element.id();
        assert!(
            !self.elements.contains_key(&id),
            "element {id} is already on the board"
        );
        self.z_order.push(id);
        self.elements.insert(id, element);
    }

    /// Remove an element from the board.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let removed = self.elements.remove(&id)?;
        self.z_order.retain(|&element_id| element_id != id);
        Some(removed)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    /// Elements in paint order (back to front).
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.z_order.iter().filter_map(|id| self.elements.get(id))
    }

    /// Element IDs in paint order.
    pub fn ids(&self) -> &[ElementId] {
        &self.z_order
    }

    pub fn len(&self) -> usize {
        self.z_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z_order.is_empty()
    }

    /// Topmost element under a point, if any.
    pub fn topmost_at(&self, point: Point, tolerance: f64) -> Option<ElementId> {
        self.z_order.iter().rev().copied().find(|id| {
            self.elements
                .get(id)
                .is_some_and(|element| element.hit_test(point, tolerance))
        })
    }

    /// Bounding box of all elements.
    pub fn bounds(&self) -> Option<Rect> {
        self.elements()
            .map(Element::bounds)
            .reduce(|acc, bounds| acc.union(bounds))
    }

    /// Frame for an image export: the element bounds grown by `padding`, or an
    /// `empty_size` frame at the origin when the board has no elements.
    pub fn export_bounds(&self, padding: f64, empty_size: Size) -> Rect {
        match self.bounds() {
            Some(bounds) => bounds.inflate(padding, padding),
            None => Rect::from_origin_size(Point::ZERO, empty_size),
        }
    }

    /// Serialize the elements, in paint order, as a JSON array.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.elements().collect::<Vec<_>>())
    }

    /// Deserialize a JSON array of elements.
    pub fn from_json(json: &str) -> Result<Self, ElementError> {
        let elements: Vec<Element> = serde_json::from_str(json)
            .map_err(|e| ElementError::invalid(format!("malformed board: {e}")))?;
        for element in &elements {
            element.validate()?;
        }
        Self::from_elements(elements)
    }
}
