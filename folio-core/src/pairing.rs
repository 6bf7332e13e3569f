//! Bilingual pairing of content blocks

use crate::lexicon::Lexicon;
use crate::types::{BilingualEntry, ContentBlock};

/// Pairs each content block with its lexicon-substituted counterpart
pub struct BilingualPairer<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> BilingualPairer<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    /// Pair one block. Kind and ordinal carry over to the secondary block.
    pub fn pair(&self, block: &ContentBlock) -> BilingualEntry {
        BilingualEntry {
            primary: block.clone(),
            secondary: block.with_text(self.lexicon.translate(&block.text)),
        }
    }

    /// Pair every block, one entry per block, in source order
    pub fn pair_all(&self, blocks: &[ContentBlock]) -> Vec<BilingualEntry> {
        blocks.iter().map(|block| self.pair(block)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BlockKind;

    #[test]
    fn test_pair_translates_secondary_only() {
        let lexicon = Lexicon::empty().with_entry("苹果", "Apple");
        let pairer = BilingualPairer::new(&lexicon);
        let entry = pairer.pair(&ContentBlock::new(BlockKind::Paragraph, "苹果很好", 3));

        assert_eq!(entry.primary.text, "苹果很好");
        assert_eq!(entry.secondary.text, "Apple很好");
        assert_eq!(entry.secondary.ordinal, 3);
        assert_eq!(entry.ordinal(), 3);
    }

    #[test]
    fn test_kind_is_preserved() {
        let lexicon = Lexicon::financial();
        let pairer = BilingualPairer::new(&lexicon);

        for kind in [BlockKind::Heading2, BlockKind::Quote, BlockKind::PlainText] {
            let entry = pairer.pair(&ContentBlock::new(kind, "未来展望", 0));
            assert_eq!(entry.primary.kind, kind);
            assert_eq!(entry.secondary.kind, kind);
        }
    }

    #[test]
    fn test_list_item_keeps_bullet() {
        let lexicon = Lexicon::financial();
        let pairer = BilingualPairer::new(&lexicon);
        let entry = pairer.pair(&ContentBlock::list_item("毛利率：46.9%", 1));

        assert_eq!(entry.secondary.text, "• Gross Margin：46.9%");
        assert_eq!(entry.secondary.kind, BlockKind::ListItem);
    }

    #[test]
    fn test_pair_all_is_one_to_one() {
        let lexicon = Lexicon::financial();
        let pairer = BilingualPairer::new(&lexicon);
        let blocks: Vec<_> = (0..5)
            .map(|i| ContentBlock::new(BlockKind::Paragraph, format!("公司{}", i), i))
            .collect();

        let entries = pairer.pair_all(&blocks);
        assert_eq!(entries.len(), blocks.len());
        assert!(entries
            .iter()
            .enumerate()
            .all(|(i, e)| e.ordinal() == i && e.secondary.text == format!("Company{}", i)));
    }
}
