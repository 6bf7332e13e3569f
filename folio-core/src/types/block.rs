//! Content block types produced by the markdown decoder

use serde::{Deserialize, Serialize};

/// Glyph prepended to every flattened list item
pub const BULLET: &str = "• ";

/// Classification of a content block
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Heading1,
    Heading2,
    Heading3,
    Paragraph,
    /// Paragraph that contained emphasis
    Quote,
    /// One entry of an unordered list, already bullet-prefixed
    ListItem,
    /// Anything the decoder could not classify
    PlainText,
}

impl BlockKind {
    /// Whether this kind is one of the three heading levels
    pub fn is_heading(self) -> bool {
        matches!(
            self,
            BlockKind::Heading1 | BlockKind::Heading2 | BlockKind::Heading3
        )
    }

    /// Table of contents nesting level (0 = top level)
    pub fn toc_level(self) -> Option<u32> {
        match self {
            BlockKind::Heading1 => Some(0),
            BlockKind::Heading2 | BlockKind::Heading3 => Some(1),
            _ => None,
        }
    }

    /// Heading kind for an HTML heading level, if it is modeled
    pub fn heading(level: u8) -> Option<Self> {
        match level {
            1 => Some(BlockKind::Heading1),
            2 => Some(BlockKind::Heading2),
            3 => Some(BlockKind::Heading3),
            _ => None,
        }
    }
}

/// The atomic unit of document content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentBlock {
    pub kind: BlockKind,

    /// Text with structural markup stripped
    pub text: String,

    /// Position in the parsed sequence
    pub ordinal: usize,
}

impl ContentBlock {
    pub fn new(kind: BlockKind, text: impl Into<String>, ordinal: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            ordinal,
        }
    }

    /// Build a list item, prefixing the bullet glyph
    pub fn list_item(text: &str, ordinal: usize) -> Self {
        Self::new(BlockKind::ListItem, format!("{}{}", BULLET, text), ordinal)
    }

    /// Same block with different text, keeping kind and ordinal
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            kind: self.kind,
            text: text.into(),
            ordinal: self.ordinal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toc_levels() {
        assert_eq!(BlockKind::Heading1.toc_level(), Some(0));
        assert_eq!(BlockKind::Heading2.toc_level(), Some(1));
        assert_eq!(BlockKind::Heading3.toc_level(), Some(1));
        assert_eq!(BlockKind::Quote.toc_level(), None);
        assert!(!BlockKind::ListItem.is_heading());
    }

    #[test]
    fn test_list_item_prefix() {
        let block = ContentBlock::list_item("营收", 4);
        assert_eq!(block.text, "• 营收");
        assert_eq!(block.kind, BlockKind::ListItem);
        assert_eq!(block.ordinal, 4);
    }

    #[test]
    fn test_heading_levels_beyond_three_are_unmodeled() {
        assert_eq!(BlockKind::heading(3), Some(BlockKind::Heading3));
        assert_eq!(BlockKind::heading(4), None);
    }
}
