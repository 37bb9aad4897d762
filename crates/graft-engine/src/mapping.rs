//! Position mapping tables for rewritten documents.

use serde::Serialize;

/// One generated-to-original position pair.
///
/// Lines are 1-based, columns 0-based, on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PositionMapping {
    /// Line in the rewritten text
    pub generated_line: usize,

    /// Column in the rewritten text
    pub generated_column: usize,

    /// Line in the original text
    pub original_line: usize,

    /// Column in the original text
    pub original_column: usize,
}

/// Ordered position mappings from rewritten text back to its source.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PositionMap {
    pub mappings: Vec<PositionMapping>,
}

impl PositionMap {
    /// Shift every mapping by whole-line offsets. Used to lift
    /// script-relative mappings into document coordinates when the rewritten
    /// frontmatter is reinserted.
    pub fn offset_lines(mut self, generated: usize, original: usize) -> Self {
        for mapping in &mut self.mappings {
            mapping.generated_line += generated;
            mapping.original_line += original;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_both_sides_by_lines() {
        let map = PositionMap {
            mappings: vec![PositionMapping {
                generated_line: 2,
                generated_column: 6,
                original_line: 1,
                original_column: 11,
            }],
        };

        let shifted = map.offset_lines(2, 1);

        assert_eq!(
            shifted.mappings,
            vec![PositionMapping {
                generated_line: 4,
                generated_column: 6,
                original_line: 2,
                original_column: 11,
            }]
        );
    }

    #[test]
    fn zero_offset_is_identity() {
        let map = PositionMap {
            mappings: vec![PositionMapping {
                generated_line: 1,
                generated_column: 0,
                original_line: 1,
                original_column: 0,
            }],
        };

        let shifted = map.clone().offset_lines(0, 0);
        assert_eq!(shifted.mappings, map.mappings);
    }
}
