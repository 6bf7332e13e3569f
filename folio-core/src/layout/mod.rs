//! Layout assembly
//!
//! Turns bilingual entries into the ordered render stream: cover, optional
//! table of contents, the bilingual body and page-number markers. The
//! assembler walks a fixed sequence of [`SectionState`]s, each emitting its
//! items, and then hands the raw stream to [`paginate`].

mod paginate;

pub use paginate::paginate;

use crate::style::{CoverStyle, DocumentStyle, SectionStyle};
use crate::types::{
    BilingualEntry, Language, PageFurnitureSpec, RenderItem, RenderStream, TextRole, TocEntry,
};
use serde::{Deserialize, Serialize};

/// How the two languages are arranged in the body
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Arrangement {
    /// One full section per language, separated by a page break
    #[default]
    Sectioned,

    /// Each primary block directly followed by its secondary block
    Interleaved,
}

/// Text shown on the cover page besides title and date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CoverContent {
    pub subtitle: String,
    pub tagline: Option<String>,
    pub notice: String,
}

impl Default for CoverContent {
    fn default() -> Self {
        Self {
            subtitle: "Quarterly Financial Analysis".to_string(),
            tagline: None,
            notice: "CONFIDENTIAL - FOR INTERNAL USE ONLY".to_string(),
        }
    }
}

/// Options controlling the structure of the assembled document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutOptions {
    pub include_toc: bool,
    pub arrangement: Arrangement,
    /// Language of the first section; its headings feed the TOC
    pub lead: Language,
    pub primary_section_title: String,
    pub secondary_section_title: String,
    pub toc_title: String,
    pub cover: CoverContent,
    pub primary_tag: String,
    pub secondary_tag: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            include_toc: true,
            arrangement: Arrangement::Sectioned,
            lead: Language::Primary,
            primary_section_title: "中文版".to_string(),
            secondary_section_title: "English Version".to_string(),
            toc_title: "Table of Contents".to_string(),
            cover: CoverContent::default(),
            primary_tag: "zh".to_string(),
            secondary_tag: "en".to_string(),
        }
    }
}

impl LayoutOptions {
    /// Interleaved body, no table of contents
    pub fn basic() -> Self {
        Self {
            include_toc: false,
            arrangement: Arrangement::Interleaved,
            ..Self::default()
        }
    }

    /// Sectioned body behind a table of contents
    pub fn extended() -> Self {
        Self::default()
    }

    pub fn with_lead(mut self, lead: Language) -> Self {
        self.lead = lead;
        self
    }

    fn tag(&self, language: Language) -> &str {
        match language {
            Language::Primary => &self.primary_tag,
            Language::Secondary => &self.secondary_tag,
        }
    }

    fn section_title(&self, language: Language) -> &str {
        match language {
            Language::Primary => &self.primary_section_title,
            Language::Secondary => &self.secondary_section_title,
        }
    }
}

/// Anchor of a heading in the render stream
pub fn anchor_for(tag: &str, ordinal: usize) -> String {
    format!("section-{}-{}", tag, ordinal)
}

/// Output of the assembler
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Assembly {
    pub stream: RenderStream,
    pub toc: Vec<TocEntry>,
}

/// Stages of document assembly, visited strictly in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionState {
    Cover,
    TableOfContents,
    LeadingSection,
    SectionBreak,
    TrailingSection,
    Interleaved,
    Done,
}

impl SectionState {
    fn next(self, options: &LayoutOptions) -> Self {
        let body = match options.arrangement {
            Arrangement::Sectioned => SectionState::LeadingSection,
            Arrangement::Interleaved => SectionState::Interleaved,
        };
        match self {
            SectionState::Cover if options.include_toc => SectionState::TableOfContents,
            SectionState::Cover | SectionState::TableOfContents => body,
            SectionState::LeadingSection => SectionState::SectionBreak,
            SectionState::SectionBreak => SectionState::TrailingSection,
            SectionState::TrailingSection | SectionState::Interleaved | SectionState::Done => {
                SectionState::Done
            }
        }
    }
}

/// Builds the render stream for one document
pub struct LayoutAssembler {
    options: LayoutOptions,
    cover: CoverStyle,
    sections: SectionStyle,
}

impl LayoutAssembler {
    pub fn new(options: LayoutOptions, style: &DocumentStyle) -> Self {
        Self {
            options,
            cover: style.cover.clone(),
            sections: style.sections.clone(),
        }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Assemble the paginated stream and the TOC entries
    pub fn assemble(&self, entries: &[BilingualEntry], spec: &PageFurnitureSpec) -> Assembly {
        let mut sorted: Vec<&BilingualEntry> = entries.iter().collect();
        sorted.sort_by_key(|entry| entry.ordinal());

        let mut stream = RenderStream::new();
        let mut toc = Vec::new();
        let mut state = SectionState::Cover;

        while state != SectionState::Done {
            tracing::trace!("Assembling {:?}", state);
            match state {
                SectionState::Cover => self.emit_cover(spec, &mut stream),
                SectionState::TableOfContents => self.emit_toc(&mut stream),
                SectionState::LeadingSection => {
                    self.emit_section(&sorted, self.options.lead, Some(&mut toc), &mut stream)
                }
                SectionState::SectionBreak => stream.push(RenderItem::PageBreak),
                SectionState::TrailingSection => {
                    self.emit_section(&sorted, self.options.lead.other(), None, &mut stream)
                }
                SectionState::Interleaved => self.emit_interleaved(&sorted, &mut toc, &mut stream),
                SectionState::Done => {}
            }
            state = state.next(&self.options);
        }

        tracing::debug!(
            "Assembled {} items with {} TOC entries",
            stream.len(),
            toc.len()
        );

        Assembly {
            stream: paginate(stream),
            toc,
        }
    }

    fn emit_cover(&self, spec: &PageFurnitureSpec, stream: &mut RenderStream) {
        let cover = &self.options.cover;

        if let Some(logo) = &spec.cover_logo {
            stream.push(RenderItem::Image {
                path: logo.clone(),
                width_mm: self.cover.logo_width_mm,
                fallback_aspect: self.cover.logo_fallback_aspect,
            });
        }
        stream.push(RenderItem::spacer(self.cover.after_logo_mm));
        stream.push(RenderItem::text(&spec.title, TextRole::CoverTitle));
        stream.push(RenderItem::spacer(self.cover.after_title_mm));
        if !cover.subtitle.is_empty() {
            stream.push(RenderItem::text(&cover.subtitle, TextRole::CoverSubtitle));
        }
        stream.push(RenderItem::spacer(self.cover.after_subtitle_mm));
        if let Some(tagline) = cover.tagline.as_deref().filter(|t| !t.is_empty()) {
            stream.push(RenderItem::text(tagline, TextRole::CoverTagline));
        }
        stream.push(RenderItem::spacer(self.cover.before_date_mm));
        stream.push(RenderItem::text(&spec.date, TextRole::CoverDate));
        stream.push(RenderItem::spacer(self.cover.before_notice_mm));
        if !cover.notice.is_empty() {
            stream.push(RenderItem::text(&cover.notice, TextRole::CoverNotice));
        }
        stream.push(RenderItem::PageBreak);
    }

    fn emit_toc(&self, stream: &mut RenderStream) {
        stream.push(RenderItem::text(&self.options.toc_title, TextRole::TocHeading));
        stream.push(RenderItem::spacer(self.sections.after_toc_heading_mm));
        stream.push(RenderItem::TableOfContents);
        stream.push(RenderItem::PageBreak);
    }

    /// One language's full section; registers TOC entries when `toc` is given
    fn emit_section(
        &self,
        entries: &[&BilingualEntry],
        language: Language,
        mut toc: Option<&mut Vec<TocEntry>>,
        stream: &mut RenderStream,
    ) {
        stream.push(RenderItem::text(
            self.options.section_title(language),
            TextRole::SectionTitle,
        ));
        stream.push(RenderItem::spacer(self.sections.after_section_title_mm));

        for entry in entries {
            let item = self.block_item(entry, language, toc.as_deref_mut());
            stream.push(item);
        }
    }

    fn emit_interleaved(
        &self,
        entries: &[&BilingualEntry],
        toc: &mut Vec<TocEntry>,
        stream: &mut RenderStream,
    ) {
        for entry in entries {
            stream.push(self.block_item(entry, Language::Primary, Some(&mut *toc)));
            stream.push(self.block_item(entry, Language::Secondary, None));
            stream.push(RenderItem::spacer(self.sections.between_pairs_mm));
        }
    }

    fn block_item(
        &self,
        entry: &BilingualEntry,
        language: Language,
        toc: Option<&mut Vec<TocEntry>>,
    ) -> RenderItem {
        let block = entry.side(language);
        let anchor = block
            .kind
            .is_heading()
            .then(|| anchor_for(self.options.tag(language), block.ordinal));

        if let (Some(toc), Some(level), Some(anchor)) = (toc, block.kind.toc_level(), &anchor) {
            toc.push(TocEntry::new(level, &block.text, anchor));
        }

        RenderItem::Block {
            block: block.clone(),
            language,
            anchor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BlockKind, ContentBlock};

    fn entry(kind: BlockKind, primary: &str, secondary: &str, ordinal: usize) -> BilingualEntry {
        BilingualEntry {
            primary: ContentBlock::new(kind, primary, ordinal),
            secondary: ContentBlock::new(kind, secondary, ordinal),
        }
    }

    fn sample() -> Vec<BilingualEntry> {
        vec![
            entry(BlockKind::Heading1, "苹果财报", "Apple Report", 0),
            entry(BlockKind::Paragraph, "收入", "Revenue", 1),
            entry(BlockKind::Heading2, "美洲", "Americas", 2),
            entry(BlockKind::ListItem, "• 欧洲", "• Europe", 3),
        ]
    }

    fn spec() -> PageFurnitureSpec {
        PageFurnitureSpec::new("LLMQuant Financial Report", "February 2024")
    }

    fn section_texts(stream: &RenderStream) -> Vec<String> {
        stream
            .iter()
            .filter_map(|item| match item {
                RenderItem::Text {
                    text,
                    role: TextRole::SectionTitle,
                } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_state_sequence() {
        let extended = LayoutOptions::extended();
        let mut states = vec![SectionState::Cover];
        while *states.last().unwrap() != SectionState::Done {
            let next = states.last().unwrap().next(&extended);
            states.push(next);
        }
        assert_eq!(
            states,
            vec![
                SectionState::Cover,
                SectionState::TableOfContents,
                SectionState::LeadingSection,
                SectionState::SectionBreak,
                SectionState::TrailingSection,
                SectionState::Done,
            ]
        );

        let basic = LayoutOptions::basic();
        assert_eq!(SectionState::Cover.next(&basic), SectionState::Interleaved);
        assert_eq!(SectionState::Interleaved.next(&basic), SectionState::Done);
    }

    #[test]
    fn test_cover_comes_first() {
        let assembler = LayoutAssembler::new(LayoutOptions::default(), &DocumentStyle::default());
        let spec = spec().with_cover_logo("logo.png");
        let assembly = assembler.assemble(&sample(), &spec);

        assert!(matches!(assembly.stream.items()[0], RenderItem::Image { .. }));
        let first_break = assembly
            .stream
            .iter()
            .position(RenderItem::is_page_break)
            .unwrap();
        assert!(assembly.stream.items()[..first_break]
            .iter()
            .all(|item| item.block().is_none()));
        assert!(assembly.stream.items()[..first_break].contains(&RenderItem::text(
            "LLMQuant Financial Report",
            TextRole::CoverTitle
        )));
    }

    #[test]
    fn test_no_cover_logo_no_image() {
        let assembler = LayoutAssembler::new(LayoutOptions::default(), &DocumentStyle::default());
        let assembly = assembler.assemble(&sample(), &spec());
        assert!(!assembly
            .stream
            .iter()
            .any(|item| matches!(item, RenderItem::Image { .. })));
    }

    #[test]
    fn test_sections_follow_lead() {
        let style = DocumentStyle::default();
        let assembly =
            LayoutAssembler::new(LayoutOptions::default(), &style).assemble(&sample(), &spec());
        assert_eq!(section_texts(&assembly.stream), vec!["中文版", "English Version"]);

        let options = LayoutOptions::default().with_lead(Language::Secondary);
        let assembly = LayoutAssembler::new(options, &style).assemble(&sample(), &spec());
        assert_eq!(section_texts(&assembly.stream), vec!["English Version", "中文版"]);
    }

    #[test]
    fn test_toc_from_leading_section_only() {
        let assembler = LayoutAssembler::new(LayoutOptions::default(), &DocumentStyle::default());
        let assembly = assembler.assemble(&sample(), &spec());

        assert_eq!(
            assembly.toc,
            vec![
                TocEntry::new(0, "苹果财报", "section-zh-0"),
                TocEntry::new(1, "美洲", "section-zh-2"),
            ]
        );
        assert_eq!(
            assembly.stream.iter().filter(|i| **i == RenderItem::TableOfContents).count(),
            1
        );
    }

    #[test]
    fn test_secondary_lead_registers_secondary_headings() {
        let options = LayoutOptions::default().with_lead(Language::Secondary);
        let assembler = LayoutAssembler::new(options, &DocumentStyle::default());
        let assembly = assembler.assemble(&sample(), &spec());

        let titles: Vec<&str> = assembly.toc.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Apple Report", "Americas"]);
        assert_eq!(assembly.toc[0].anchor, "section-en-0");
    }

    #[test]
    fn test_headings_are_anchored_in_both_sections() {
        let assembler = LayoutAssembler::new(LayoutOptions::default(), &DocumentStyle::default());
        let assembly = assembler.assemble(&sample(), &spec());

        let anchors: Vec<&str> = assembly
            .stream
            .iter()
            .filter_map(|item| match item {
                RenderItem::Block {
                    anchor: Some(anchor),
                    ..
                } => Some(anchor.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            anchors,
            vec!["section-zh-0", "section-zh-2", "section-en-0", "section-en-2"]
        );
    }

    #[test]
    fn test_interleaved_pairs_blocks() {
        let assembler = LayoutAssembler::new(LayoutOptions::basic(), &DocumentStyle::default());
        let assembly = assembler.assemble(&sample(), &spec());

        assert!(!assembly.stream.iter().any(|i| *i == RenderItem::TableOfContents));
        assert!(section_texts(&assembly.stream).is_empty());

        let sides: Vec<(usize, Language)> = assembly
            .stream
            .iter()
            .filter_map(|item| match item {
                RenderItem::Block {
                    block, language, ..
                } => Some((block.ordinal, *language)),
                _ => None,
            })
            .collect();
        assert_eq!(sides.len(), 8);
        assert_eq!(sides[0], (0, Language::Primary));
        assert_eq!(sides[1], (0, Language::Secondary));
        assert_eq!(sides[7], (3, Language::Secondary));
        assert_eq!(assembly.toc.len(), 2);
    }

    #[test]
    fn test_entries_out_of_order_are_sorted() {
        let mut entries = sample();
        entries.reverse();
        let assembler = LayoutAssembler::new(LayoutOptions::default(), &DocumentStyle::default());
        let assembly = assembler.assemble(&entries, &spec());

        let ordinals: Vec<usize> = assembly
            .stream
            .blocks_for(Language::Primary)
            .map(|b| b.ordinal)
            .collect();
        assert_eq!(ordinals, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_empty_document_still_has_structure() {
        let assembler = LayoutAssembler::new(LayoutOptions::default(), &DocumentStyle::default());
        let assembly = assembler.assemble(&[], &spec());

        assert!(assembly.toc.is_empty());
        assert_eq!(assembly.stream.page_breaks(), 3);
        assert!(assembly.stream.last().unwrap().is_page_number());
    }
}
