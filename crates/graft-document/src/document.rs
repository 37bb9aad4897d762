//! Document tree types and serialization.

/// Byte range within the source document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start offset, inclusive
    pub start: usize,

    /// End offset, exclusive
    pub end: usize,
}

/// The frontmatter script segment of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterNode {
    /// Verbatim script text between the fences, closing fence excluded
    pub text: String,

    /// 1-based line on which the script text starts in the source document
    pub line: usize,

    /// Byte range of the script text in the source document
    pub span: Span,
}

/// A run of document text the parser does not interpret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawNode {
    /// Verbatim text, preserved byte-for-byte
    pub text: String,
}

/// One top-level document node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Frontmatter script segment
    Frontmatter(FrontmatterNode),

    /// Opaque markup or whitespace
    Raw(RawNode),
}

/// A parsed templating document: an ordered sequence of top-level nodes.
///
/// The parser produces at most one `Frontmatter` node. Raw nodes carry their
/// text verbatim, so serializing an unmodified document reproduces the
/// original input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Top-level nodes in source order
    pub nodes: Vec<Node>,
}

impl Document {
    /// Serialize the document back to text, wrapping frontmatter text in
    /// `---` fence lines. A trailing newline is supplied when the script
    /// text lacks one so the closing fence sits on its own line.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            match node {
                Node::Raw(raw) => out.push_str(&raw.text),
                Node::Frontmatter(fm) => {
                    out.push_str("---\n");
                    out.push_str(&fm.text);
                    if !fm.text.is_empty() && !fm.text.ends_with('\n') {
                        out.push('\n');
                    }
                    out.push_str("---\n");
                }
            }
        }
        out
    }
}
