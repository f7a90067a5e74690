//! Error types for the board core.

use thiserror::Error;

/// Errors raised while building or validating an element.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ElementError {
    #[error("Invalid element: {0}")]
    InvalidElement(String),
}

impl ElementError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidElement(reason.into())
    }
}

/// Errors raised by the whiteboard controller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoardError {
    #[error(transparent)]
    Element(#[from] ElementError),
    /// The operation is only accepted while no drag or draw is in progress.
    #[error("Interaction in progress: cannot {0} while dragging or drawing")]
    InteractionInProgress(&'static str),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for controller operations.
pub type BoardResult<T> = Result<T, BoardError>;
