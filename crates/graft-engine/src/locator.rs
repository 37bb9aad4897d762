//! Frontmatter discovery within parsed documents.

use graft_document::{Document, FrontmatterNode, Node};

/// Find the first frontmatter node of a document.
///
/// The scan stops at the first match; later frontmatter-shaped nodes are
/// never considered.
pub fn first_frontmatter(doc: &mut Document) -> Option<&mut FrontmatterNode> {
    doc.nodes.iter_mut().find_map(|node| match node {
        Node::Frontmatter(fm) => Some(fm),
        Node::Raw(_) => None,
    })
}

/// Number of lines the serialized document emits ahead of the frontmatter
/// script text: raw nodes before the segment plus its opening fence line.
pub fn lines_before_script(doc: &Document) -> usize {
    let mut lines = 0;
    for node in &doc.nodes {
        match node {
            Node::Frontmatter(_) => return lines + 1,
            Node::Raw(raw) => lines += raw.text.matches('\n').count(),
        }
    }
    lines
}
