//! Domain models for the encounter recorder.

mod draft;
mod encounter;
mod view;

pub use draft::*;
pub use encounter::*;
pub use view::*;

use thiserror::Error;

/// Errors raised when parsing names and codes supplied by a presentation layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unknown sex code: {0}")]
    UnknownSex(String),

    #[error("Unknown view: {0}")]
    UnknownView(String),

    #[error("Unknown draft field: {0}")]
    UnknownField(String),
}
