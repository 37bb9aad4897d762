//! Shared engine types and the lowering seam.

use crate::mapping::PositionMap;
use thiserror::Error;

/// Result of rewriting one templating document.
#[derive(Debug, Clone)]
pub struct DocumentRewrite {
    /// Rewritten document text, or the original text when `changed` is false
    pub text: String,

    /// Whether any factory call was rewritten
    pub changed: bool,

    /// Document-level position mappings, present only after a rewrite
    pub map: Option<PositionMap>,
}

/// Errors that can occur while rewriting a document.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("Document error: {0}")]
    Document(#[from] graft_document::ParseError),

    #[error("Frontmatter parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Unsupported props argument shape: {0}")]
    UnsupportedPropsShape(String),

    #[error("Lowering failed: {0}")]
    Lowering(String),

    #[error("Failed to emit rewritten script: {0}")]
    Emit(String),
}

/// A frontmatter lowering step applied before the script parse.
///
/// Lowering turns syntax the script parser cannot digest (bracketed element
/// syntax, type annotations) into the plain call form the rewriter matches.
/// It runs once per frontmatter segment. Implementations that rewrite text
/// are responsible for their own position bookkeeping.
pub trait Lowering: Send + Sync {
    /// Lowering identifier used in diagnostics (e.g. "passthrough")
    fn name(&self) -> &'static str;

    /// Lower frontmatter text to plain script text.
    fn lower(&self, source: &str) -> Result<String, RewriteError>;
}

/// Default lowering that returns its input untouched.
#[derive(Debug, Default)]
pub struct PassthroughLowering;

impl Lowering for PassthroughLowering {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    fn lower(&self, source: &str) -> Result<String, RewriteError> {
        Ok(source.to_string())
    }
}
