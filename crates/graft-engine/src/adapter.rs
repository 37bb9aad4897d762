//! Host boundary for whole-document rewriting.

use crate::locator;
use crate::pipeline;
use crate::traits::{DocumentRewrite, Lowering, PassthroughLowering, RewriteError};

/// Rewrites factory calls inside a templating document's frontmatter.
///
/// Stateless across invocations; one instance can serve many documents
/// concurrently.
pub struct DocumentRewriter {
    lowering: Box<dyn Lowering>,
}

impl Default for DocumentRewriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentRewriter {
    /// Create a rewriter with the passthrough lowering.
    pub fn new() -> Self {
        Self {
            lowering: Box::new(PassthroughLowering),
        }
    }

    /// Create a rewriter that lowers frontmatter text before matching.
    pub fn with_lowering(lowering: Box<dyn Lowering>) -> Self {
        Self { lowering }
    }

    /// Rewrite one document.
    ///
    /// Returns the original text with `changed: false` when the document has
    /// no frontmatter or its frontmatter contains no matching call. On a
    /// rewrite, the returned map is lifted into document coordinates.
    pub fn rewrite(&self, source: &str) -> Result<DocumentRewrite, RewriteError> {
        let mut doc = graft_document::parse(source)?;

        let Some(fm) = locator::first_frontmatter(&mut doc) else {
            tracing::debug!("No frontmatter segment, leaving document unchanged");
            return Ok(unchanged(source));
        };
        let original_line = fm.line;
        let lowered = self.lowering.lower(&fm.text)?;

        let rewrite = pipeline::rewrite_script(&lowered)?;
        if !rewrite.did_rewrite {
            return Ok(unchanged(source));
        }
        fm.text = rewrite.text;

        let generated_line = locator::lines_before_script(&doc);
        let map = rewrite
            .map
            .map(|m| m.offset_lines(generated_line, original_line - 1));
        let text = doc.serialize();

        Ok(DocumentRewrite {
            text,
            changed: true,
            map,
        })
    }
}

fn unchanged(source: &str) -> DocumentRewrite {
    DocumentRewrite {
        text: source.to_string(),
        changed: false,
        map: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOC: &str = "\
---
const el = React.createElement('div', null, 'hi');
---
<El />
";

    #[test]
    fn rewrites_document_frontmatter() {
        let result = DocumentRewriter::new().rewrite(DOC).unwrap();

        assert!(result.changed);
        assert!(result.text.starts_with("---\n"));
        assert!(result
            .text
            .contains("import { Fragment, jsx as h } from 'astro/jsx-runtime';"));
        assert!(result.text.contains("h('div'"));
        assert!(result.text.ends_with("---\n<El />\n"));
    }

    #[test]
    fn passes_through_documents_without_frontmatter() {
        let source = "<El />\n";
        let result = DocumentRewriter::new().rewrite(source).unwrap();

        assert!(!result.changed);
        assert!(result.map.is_none());
        assert_eq!(result.text, source);
    }

    #[test]
    fn passes_through_frontmatter_without_matches() {
        let source = "---\nconst title = 'home';\n---\n<h1>{title}</h1>\n";
        let result = DocumentRewriter::new().rewrite(source).unwrap();

        assert!(!result.changed);
        assert_eq!(result.text, source);
    }

    #[test]
    fn document_rewrite_is_idempotent() {
        let rewriter = DocumentRewriter::new();
        let first = rewriter.rewrite(DOC).unwrap();
        let second = rewriter.rewrite(&first.text).unwrap();

        assert!(first.changed);
        assert!(!second.changed);
        assert_eq!(second.text, first.text);
    }

    #[test]
    fn lifts_map_into_document_coordinates() {
        let result = DocumentRewriter::new().rewrite(DOC).unwrap();

        // The script sits on line 2 of the source document; the injected
        // import pushes its rewritten form to line 3 of the output.
        let map = result.map.unwrap();
        assert!(map
            .mappings
            .iter()
            .any(|m| m.original_line == 2 && m.generated_line == 3));
    }

    #[test]
    fn rejects_malformed_frontmatter_script() {
        let source = "---\nconst = ;\n---\n<El />\n";
        let result = DocumentRewriter::new().rewrite(source);

        assert!(matches!(result, Err(RewriteError::Parse { .. })));
    }

    #[test]
    fn rejects_unclosed_documents() {
        let result = DocumentRewriter::new().rewrite("---\nconst a = 1;\n");

        assert!(matches!(result, Err(RewriteError::Document(_))));
    }

    #[test]
    fn applies_lowering_before_matching() {
        struct BracketLowering;

        impl Lowering for BracketLowering {
            fn name(&self) -> &'static str {
                "bracket"
            }

            fn lower(&self, source: &str) -> Result<String, RewriteError> {
                Ok(source.replace("<div />", "React.createElement('div', null)"))
            }
        }

        let source = "---\nconst el = <div />;\n---\nbody\n";
        let rewriter = DocumentRewriter::with_lowering(Box::new(BracketLowering));
        let result = rewriter.rewrite(source).unwrap();

        assert!(result.changed);
        assert!(result.text.contains("h('div'"));
    }
}
