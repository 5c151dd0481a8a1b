//! Expression compilation errors.

use thiserror::Error;

/// Why an expression string failed to compile.
///
/// Offsets are byte offsets into the submitted string.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SyntaxError {
    #[error("unexpected token '{found}' at offset {offset}")]
    UnexpectedToken { found: String, offset: usize },

    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unknown identifier '{name}' at offset {offset}")]
    UnknownIdentifier { name: String, offset: usize },

    #[error("missing closing parenthesis for '(' at offset {offset}")]
    MissingClosingParen { offset: usize },

    #[error("unexpected trailing input '{found}' at offset {offset}")]
    TrailingInput { found: String, offset: usize },

    #[error("expression nests deeper than {limit} levels")]
    NestingTooDeep { limit: usize },

    #[error("unrecognized character '{ch}' at offset {offset}")]
    UnrecognizedCharacter { ch: char, offset: usize },
}

/// A view mutation the input side asked for but that would break the
/// view invariants. The view is left unchanged.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum InputError {
    #[error("zoom factor must be finite and positive, got {factor}")]
    InvalidZoomFactor { factor: f64 },

    #[error("offset must be finite, got ({x}, {y})")]
    NonFiniteOffset { x: f64, y: f64 },

    #[error("zoom would move scale out of range: {scale}")]
    ScaleOutOfRange { scale: f64 },

    #[error("a {width}x{height} canvas needs {vertices} mesh vertices, limit is {limit}")]
    MeshTooLarge {
        width: u32,
        height: u32,
        vertices: u64,
        limit: u64,
    },
}
