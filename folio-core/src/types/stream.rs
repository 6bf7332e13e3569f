//! The ordered render stream handed to a renderer

use super::{ContentBlock, Language};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Role of a structural text element, used to pick its paragraph style
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    CoverTitle,
    CoverSubtitle,
    CoverTagline,
    CoverDate,
    CoverNotice,
    TocHeading,
    SectionTitle,
}

/// One element of the render stream
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderItem {
    /// Image scaled to a fixed width, keeping its aspect ratio
    Image {
        path: PathBuf,
        width_mm: f64,
        fallback_aspect: f64,
    },

    /// Structural text (cover lines, section dividers, TOC heading)
    Text { text: String, role: TextRole },

    /// Vertical gap
    Spacer { height_mm: f64 },

    /// A content block from one side of a bilingual entry
    Block {
        block: ContentBlock,
        language: Language,
        anchor: Option<String>,
    },

    /// Filled with the collected TOC entries at render time
    TableOfContents,

    PageBreak,

    PageNumber,
}

impl RenderItem {
    pub fn text(text: impl Into<String>, role: TextRole) -> Self {
        RenderItem::Text {
            text: text.into(),
            role,
        }
    }

    pub fn spacer(height_mm: f64) -> Self {
        RenderItem::Spacer { height_mm }
    }

    pub fn is_page_break(&self) -> bool {
        matches!(self, RenderItem::PageBreak)
    }

    pub fn is_page_number(&self) -> bool {
        matches!(self, RenderItem::PageNumber)
    }

    /// The content block carried by this item, if any
    pub fn block(&self) -> Option<&ContentBlock> {
        match self {
            RenderItem::Block { block, .. } => Some(block),
            _ => None,
        }
    }
}

/// Ordered sequence of render items
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct RenderStream {
    items: Vec<RenderItem>,
}

impl RenderStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: RenderItem) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[RenderItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RenderItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn last(&self) -> Option<&RenderItem> {
        self.items.last()
    }

    /// Content blocks emitted for one language, in stream order
    pub fn blocks_for(&self, language: Language) -> impl Iterator<Item = &ContentBlock> {
        self.items.iter().filter_map(move |item| match item {
            RenderItem::Block {
                block,
                language: l,
                ..
            } if *l == language => Some(block),
            _ => None,
        })
    }

    /// Number of page breaks, one less than the minimum page count
    pub fn page_breaks(&self) -> usize {
        self.items.iter().filter(|i| i.is_page_break()).count()
    }
}

impl From<Vec<RenderItem>> for RenderStream {
    fn from(items: Vec<RenderItem>) -> Self {
        Self { items }
    }
}

impl IntoIterator for RenderStream {
    type Item = RenderItem;
    type IntoIter = std::vec::IntoIter<RenderItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a RenderStream {
    type Item = &'a RenderItem;
    type IntoIter = std::slice::Iter<'a, RenderItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
