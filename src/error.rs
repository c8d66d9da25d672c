//! Error types for the adfmd library.

use std::io;
use thiserror::Error;

/// Result type alias for adfmd operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building or rendering a document.
///
/// These never cross the total entry points in the crate root; they are
/// surfaced only by the typed API in [`crate::parser`] and [`crate::render`].
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading input.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not valid JSON.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A node in the tree does not have the expected shape.
    #[error("Malformed node at {path}: {reason}")]
    MalformedNode {
        /// Location of the node, e.g. `content[2].content[0]`
        path: String,
        /// What was wrong with it
        reason: String,
    },

    /// The tree nests deeper than the configured limit.
    #[error("Nesting depth {depth} exceeds the limit of {max}")]
    DepthExceeded {
        /// Depth of the offending node
        depth: usize,
        /// Configured maximum depth
        max: usize,
    },

    /// Error during Markdown rendering.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    pub(crate) fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedNode {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
