//! Bilingual pairs of content blocks

use super::ContentBlock;
use serde::{Deserialize, Serialize};

/// Which half of a bilingual entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    /// The source language of the markdown
    #[default]
    Primary,

    /// The substituted counterpart
    Secondary,
}

impl Language {
    pub fn other(self) -> Self {
        match self {
            Language::Primary => Language::Secondary,
            Language::Secondary => Language::Primary,
        }
    }
}

/// A primary/secondary pair derived from one source block
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BilingualEntry {
    pub primary: ContentBlock,
    pub secondary: ContentBlock,
}

impl BilingualEntry {
    /// Source ordinal shared by both halves
    pub fn ordinal(&self) -> usize {
        self.primary.ordinal
    }

    pub fn side(&self, language: Language) -> &ContentBlock {
        match language {
            Language::Primary => &self.primary,
            Language::Secondary => &self.secondary,
        }
    }
}
