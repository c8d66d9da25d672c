//! Document model types for structured rich-text content.
//!
//! This module defines the typed tree the renderer walks. Input JSON is
//! converted into this model by [`crate::parser`]; nothing here performs
//! I/O or knows about Markdown.

mod document;
mod mark;
mod node;

pub use document::{Document, NodeId};
pub use mark::{Mark, TextStyle};
pub use node::{Media, MediaType, Node, NodeKind};
