//! Frontmatter factory-call rewrite engine.
//!
//! Finds `React.createElement(type, props, ...children)` calls in the
//! frontmatter of a templating document, rewrites them to `h(type, props)`
//! with children folded into the props object, and injects the runtime
//! import when anything changed.

pub mod adapter;
pub mod locator;
pub mod mapping;
pub mod matcher;
pub mod pipeline;
pub mod props;
pub mod rewriter;
pub mod traits;

pub use adapter::DocumentRewriter;
pub use mapping::{PositionMap, PositionMapping};
pub use pipeline::{rewrite_script, ScriptRewrite};
pub use traits::{DocumentRewrite, Lowering, PassthroughLowering, RewriteError};
