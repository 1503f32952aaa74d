//! Error types for Gantry operations.
//!
//! Two fatal error families exist, matching the two phases of a run:
//! [`ConstructionError`] for malformed graph descriptions and [`RenderError`]
//! for layout or output failures. [`GantryError`] is the facade type the
//! public API returns.

use std::io;

use thiserror::Error;

/// A malformed graph description.
///
/// Construction errors are fatal: the diagram that produced one cannot be
/// rendered.
#[derive(Debug, Error)]
pub enum ConstructionError {
    #[error(
        "node handle belongs to a different diagram session (handle session {actual}, this session {expected})"
    )]
    ForeignHandle { expected: u64, actual: u64 },

    #[error("node handle does not refer to a node in this diagram")]
    UnknownNode,

    #[error("cannot chain an empty sequence of nodes")]
    EmptyChain,
}

/// A failure while laying out or writing the diagram.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("layout failed: {0}")]
    Layout(String),

    #[error("invalid style: {0}")]
    Style(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// The main error type for Gantry operations.
#[derive(Debug, Error)]
pub enum GantryError {
    #[error("construction error: {0}")]
    Construction(#[from] ConstructionError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}
