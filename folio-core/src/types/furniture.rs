//! Per-document page furniture configuration

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Placeholder replaced by the page number in [`PageFurnitureSpec::page_label`]
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// Pages on which no furniture is drawn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SuppressedPages {
    /// Pages `1..=n`
    Leading(u32),

    /// An explicit set of page numbers
    Pages(BTreeSet<u32>),
}

impl SuppressedPages {
    /// Cover page only
    pub fn cover() -> Self {
        SuppressedPages::Leading(1)
    }

    /// Cover and table of contents
    pub fn cover_and_toc() -> Self {
        SuppressedPages::Leading(2)
    }

    pub fn contains(&self, page_number: u32) -> bool {
        match self {
            SuppressedPages::Leading(n) => page_number >= 1 && page_number <= *n,
            SuppressedPages::Pages(pages) => pages.contains(&page_number),
        }
    }
}

impl Default for SuppressedPages {
    fn default() -> Self {
        Self::cover()
    }
}

/// Immutable furniture settings read by the page decorator on every page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageFurnitureSpec {
    /// Logo drawn in the page header
    pub header_logo: Option<PathBuf>,

    /// Logo drawn on the cover page
    pub cover_logo: Option<PathBuf>,

    /// Report title, shown on the cover and in the header
    pub title: String,

    /// Date string, shown on the cover and in the header
    pub date: String,

    /// Footer disclaimer
    pub footer_text: String,

    /// Page number format, `{page}` is substituted
    pub page_label: String,

    pub suppressed: SuppressedPages,
}

impl PageFurnitureSpec {
    /// Create a spec with required fields
    pub fn new(title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            header_logo: None,
            cover_logo: None,
            title: title.into(),
            date: date.into(),
            footer_text: String::new(),
            page_label: format!("Page {}", PAGE_PLACEHOLDER),
            suppressed: SuppressedPages::default(),
        }
    }

    pub fn with_header_logo(mut self, path: impl Into<PathBuf>) -> Self {
        self.header_logo = Some(path.into());
        self
    }

    pub fn with_cover_logo(mut self, path: impl Into<PathBuf>) -> Self {
        self.cover_logo = Some(path.into());
        self
    }

    pub fn with_footer_text(mut self, text: impl Into<String>) -> Self {
        self.footer_text = text.into();
        self
    }

    pub fn with_suppressed(mut self, suppressed: SuppressedPages) -> Self {
        self.suppressed = suppressed;
        self
    }

    /// Render the page label for a page
    pub fn page_label_for(&self, page_number: u32) -> String {
        self.page_label
            .replace(PAGE_PLACEHOLDER, &page_number.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_suppression() {
        let suppressed = SuppressedPages::cover_and_toc();
        assert!(suppressed.contains(1));
        assert!(suppressed.contains(2));
        assert!(!suppressed.contains(3));
        assert!(!suppressed.contains(0));
    }

    #[test]
    fn test_explicit_suppression() {
        let suppressed = SuppressedPages::Pages([1, 4].into_iter().collect());
        assert!(suppressed.contains(4));
        assert!(!suppressed.contains(2));
    }

    #[test]
    fn test_page_label() {
        let spec = PageFurnitureSpec::new("Report", "February 2024");
        assert_eq!(spec.page_label_for(7), "Page 7");
    }
}
