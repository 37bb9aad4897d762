//! Fence-based document parsing.

use crate::document::{Document, FrontmatterNode, Node, RawNode, Span};
use thiserror::Error;

/// Errors that can occur while parsing a templating document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unclosed frontmatter block - missing closing ---")]
    UnclosedFrontmatter,
}

/// Parse templating-file text into a document tree.
///
/// The opening fence must be the first non-whitespace content and must sit
/// alone on its line; leading whitespace is kept as a raw node. A document
/// without an opening fence parses to a single raw node. An opening fence
/// without a closing one is an error.
pub fn parse(source: &str) -> Result<Document, ParseError> {
    let lead_len = source.len() - source.trim_start().len();
    let body = &source[lead_len..];

    let Some(after_open) = body.strip_prefix("---") else {
        return Ok(raw_document(source));
    };
    let Some(open_end) = after_open.find('\n') else {
        if after_open.trim_end().is_empty() {
            return Err(ParseError::UnclosedFrontmatter);
        }
        return Ok(raw_document(source));
    };
    if !after_open[..open_end].trim_end().is_empty() {
        // Dashes followed by content on the same line are body text, not a fence.
        return Ok(raw_document(source));
    }

    let script_rel_start = open_end + 1;
    let mut pos = script_rel_start;
    let (script_rel_end, close_end) = loop {
        if pos >= after_open.len() {
            return Err(ParseError::UnclosedFrontmatter);
        }
        let line_end = match after_open[pos..].find('\n') {
            Some(i) => pos + i + 1,
            None => after_open.len(),
        };
        if after_open[pos..line_end].trim_end() == "---" {
            break (pos, line_end);
        }
        pos = line_end;
    };

    let script = &after_open[script_rel_start..script_rel_end];
    let tail = &after_open[close_end..];
    let script_start = lead_len + 3 + script_rel_start;
    let line = source[..script_start].matches('\n').count() + 1;

    let mut nodes = Vec::new();
    if lead_len > 0 {
        nodes.push(Node::Raw(RawNode {
            text: source[..lead_len].to_string(),
        }));
    }
    nodes.push(Node::Frontmatter(FrontmatterNode {
        text: script.to_string(),
        line,
        span: Span {
            start: script_start,
            end: script_start + script.len(),
        },
    }));
    if !tail.is_empty() {
        nodes.push(Node::Raw(RawNode {
            text: tail.to_string(),
        }));
    }

    Ok(Document { nodes })
}

fn raw_document(source: &str) -> Document {
    Document {
        nodes: vec![Node::Raw(RawNode {
            text: source.to_string(),
        })],
    }
}
