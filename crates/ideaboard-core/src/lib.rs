//! Ideaboard Core Library
//!
//! Element interaction engine for the Ideaboard whiteboard: the element model,
//! the pointer-driven state machine that creates, drags and sizes elements, and
//! the linear undo/redo history over board snapshots. Rendering, export
//! rasterization and idea generation are left to the host.

pub mod board;
pub mod config;
pub mod elements;
pub mod error;
pub mod history;
pub mod input;
pub mod interaction;
pub mod selection;
pub mod tools;
pub mod whiteboard;

pub use board::Board;
pub use config::{BoardConfig, PaletteColor};
pub use elements::{Element, ElementId, ElementKind, ElementStyle, HexColor, NewElement};
pub use error::{BoardError, BoardResult, ElementError};
pub use history::{History, Navigation};
pub use input::{KeyEvent, KeyIntent, Modifiers, PointerEvent};
pub use interaction::{InteractionSession, PointerOutcome};
pub use selection::{FocusState, Selection};
pub use tools::{ToolBehavior, ToolKind, ToolManager};
pub use whiteboard::{KeyOutcome, Whiteboard};
