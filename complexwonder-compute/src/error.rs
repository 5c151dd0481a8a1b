//! Session and renderer error types.

use complexwonder_core::{InputError, SyntaxError};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    #[error("Render context unavailable: {0}")]
    ResourceUnavailable(String),

    #[error("Draw failed: {0}")]
    Draw(String),
}

/// Why an input event was not applied.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Malformed input event: {0}")]
    MalformedEvent(String),
}
