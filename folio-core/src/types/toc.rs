//! Table of contents types

use serde::{Deserialize, Serialize};

/// A single entry in the table of contents
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TocEntry {
    /// Nesting level (0 = top level)
    pub level: u32,

    /// Display title
    pub title: String,

    /// Target anchor of the heading in the render stream
    pub anchor: String,
}

impl TocEntry {
    /// Create a new TOC entry
    pub fn new(level: u32, title: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            anchor: anchor.into(),
        }
    }
}
