//! Templating document model.
//!
//! Splits a templating document into its frontmatter script segment and
//! opaque markup nodes, and serializes the node sequence back to text.

pub mod document;
pub mod parser;

pub use document::{Document, FrontmatterNode, Node, RawNode, Span};
pub use parser::{parse, ParseError};
