//! Document styling
//!
//! One [`DocumentStyle`] is built at document-build start and handed to the
//! layout assembler, the page decorator and the renderer. All lengths are in
//! millimetres, font sizes in points.

use crate::types::{BlockKind, TextRole};
use serde::{Deserialize, Serialize};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const DARK_BLUE: Rgb = Rgb(0, 0, 139);
    pub const DARK_GREY: Rgb = Rgb(169, 169, 169);
    pub const LIGHT_GREY: Rgb = Rgb(211, 211, 211);
}

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Style of one kind of paragraph
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParagraphStyle {
    pub font_size: u8,
    /// Baseline-to-baseline distance in points
    pub leading: f64,
    pub space_after_mm: f64,
    pub indent_left_mm: f64,
    pub indent_right_mm: f64,
    pub align: Align,
    pub bold: bool,
    pub italic: bool,
    pub color: Rgb,
}

impl ParagraphStyle {
    pub fn new(font_size: u8) -> Self {
        Self {
            font_size,
            leading: f64::from(font_size) * 1.2,
            ..Self::default()
        }
    }

    pub fn with_leading(mut self, leading: f64) -> Self {
        self.leading = leading;
        self
    }

    pub fn with_space_after(mut self, mm: f64) -> Self {
        self.space_after_mm = mm;
        self
    }

    pub fn with_indents(mut self, left_mm: f64, right_mm: f64) -> Self {
        self.indent_left_mm = left_mm;
        self.indent_right_mm = right_mm;
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Line spacing factor relative to the font size
    pub fn line_spacing(&self) -> f64 {
        if self.font_size == 0 {
            1.0
        } else {
            self.leading / f64::from(self.font_size)
        }
    }
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        Self {
            font_size: 11,
            leading: 14.0,
            space_after_mm: 2.1,
            indent_left_mm: 0.0,
            indent_right_mm: 0.0,
            align: Align::Left,
            bold: false,
            italic: false,
            color: Rgb::BLACK,
        }
    }
}

/// Paper size and content margins
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageStyle {
    pub width_mm: f64,
    pub height_mm: f64,
    pub margin_top_mm: f64,
    pub margin_right_mm: f64,
    pub margin_bottom_mm: f64,
    pub margin_left_mm: f64,
}

impl Default for PageStyle {
    /// A4 with one-inch margins
    fn default() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_top_mm: 30.0,
            margin_right_mm: 25.4,
            margin_bottom_mm: 25.4,
            margin_left_mm: 25.4,
        }
    }
}

/// Sizes and positions of the per-page furniture, relative to the page edges
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FurnitureStyle {
    pub logo_width_mm: f64,
    /// Width / height used when the logo cannot be probed
    pub logo_fallback_aspect: f64,
    pub logo_top_mm: f64,
    pub title_left_mm: f64,
    pub header_text_top_mm: f64,
    pub header_rule_mm: f64,
    /// Distances from the bottom edge
    pub footer_rule_mm: f64,
    pub page_number_mm: f64,
    pub disclaimer_mm: f64,
    /// Inset of right-aligned text from the right margin
    pub right_inset_mm: f64,
    pub title_font_size: u8,
    pub meta_font_size: u8,
    pub footer_font_size: u8,
    pub rule_color: Rgb,
    pub footer_color: Rgb,
}

impl Default for FurnitureStyle {
    fn default() -> Self {
        Self {
            logo_width_mm: 38.1,
            logo_fallback_aspect: 3.0,
            logo_top_mm: 8.0,
            title_left_mm: 76.2,
            header_text_top_mm: 12.0,
            header_rule_mm: 24.0,
            footer_rule_mm: 20.3,
            page_number_mm: 14.7,
            disclaimer_mm: 9.6,
            right_inset_mm: 0.0,
            title_font_size: 12,
            meta_font_size: 9,
            footer_font_size: 7,
            rule_color: Rgb::LIGHT_GREY,
            footer_color: Rgb::DARK_GREY,
        }
    }
}

/// Cover page spacing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CoverStyle {
    pub logo_width_mm: f64,
    pub logo_fallback_aspect: f64,
    pub after_logo_mm: f64,
    pub after_title_mm: f64,
    pub after_subtitle_mm: f64,
    pub before_date_mm: f64,
    pub before_notice_mm: f64,
}

impl Default for CoverStyle {
    fn default() -> Self {
        Self {
            logo_width_mm: 101.6,
            logo_fallback_aspect: 2.0,
            after_logo_mm: 25.4,
            after_title_mm: 12.7,
            after_subtitle_mm: 12.7,
            before_date_mm: 38.1,
            before_notice_mm: 25.4,
        }
    }
}

/// Gaps around section dividers and interleaved pairs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SectionStyle {
    pub after_section_title_mm: f64,
    pub after_toc_heading_mm: f64,
    pub between_pairs_mm: f64,
}

impl Default for SectionStyle {
    fn default() -> Self {
        Self {
            after_section_title_mm: 7.6,
            after_toc_heading_mm: 5.1,
            between_pairs_mm: 5.1,
        }
    }
}

/// Complete style configuration for one document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DocumentStyle {
    pub page: PageStyle,
    pub furniture: FurnitureStyle,
    pub cover: CoverStyle,
    pub sections: SectionStyle,

    pub cover_title: ParagraphStyle,
    pub cover_subtitle: ParagraphStyle,
    pub cover_date: ParagraphStyle,
    pub notice: ParagraphStyle,
    pub heading1: ParagraphStyle,
    pub heading2: ParagraphStyle,
    pub normal: ParagraphStyle,
    pub list_item: ParagraphStyle,
    pub quote: ParagraphStyle,
    pub toc_heading: ParagraphStyle,
    pub toc_entry1: ParagraphStyle,
    pub toc_entry2: ParagraphStyle,
    pub section_title: ParagraphStyle,
    pub page_number: ParagraphStyle,
}

impl Default for DocumentStyle {
    fn default() -> Self {
        Self {
            page: PageStyle::default(),
            furniture: FurnitureStyle::default(),
            cover: CoverStyle::default(),
            sections: SectionStyle::default(),

            cover_title: ParagraphStyle::new(20)
                .with_leading(24.0)
                .with_space_after(4.2)
                .with_align(Align::Center),
            cover_subtitle: ParagraphStyle::new(14)
                .with_leading(16.0)
                .with_align(Align::Center)
                .with_color(Rgb::DARK_BLUE),
            cover_date: ParagraphStyle::new(11)
                .with_leading(14.0)
                .with_align(Align::Center),
            notice: ParagraphStyle::new(8)
                .with_leading(10.0)
                .with_align(Align::Center)
                .with_color(Rgb::DARK_GREY),
            heading1: ParagraphStyle::new(16)
                .with_leading(18.0)
                .with_space_after(7.2)
                .with_color(Rgb::DARK_BLUE),
            heading2: ParagraphStyle::new(14)
                .with_leading(16.0)
                .with_space_after(7.2)
                .with_color(Rgb::DARK_BLUE),
            normal: ParagraphStyle::new(11)
                .with_leading(14.0)
                .with_space_after(7.2),
            list_item: ParagraphStyle::new(11)
                .with_leading(14.0)
                .with_space_after(4.6),
            quote: ParagraphStyle::new(11)
                .with_leading(14.0)
                .with_space_after(7.2)
                .with_indents(7.1, 7.1)
                .italic(),
            toc_heading: ParagraphStyle::new(16)
                .with_leading(19.0)
                .with_space_after(7.1)
                .with_align(Align::Center),
            toc_entry1: ParagraphStyle::new(12)
                .with_leading(16.0)
                .with_space_after(2.1),
            toc_entry2: ParagraphStyle::new(10)
                .with_leading(14.0)
                .with_space_after(2.1)
                .with_indents(7.1, 0.0),
            section_title: ParagraphStyle::new(18)
                .with_leading(22.0)
                .with_space_after(4.2)
                .with_align(Align::Center)
                .with_color(Rgb::DARK_BLUE),
            page_number: ParagraphStyle::new(9)
                .with_leading(11.0)
                .with_space_after(0.0)
                .with_align(Align::Center),
        }
    }
}

impl DocumentStyle {
    /// Paragraph style for a structural text role
    pub fn for_role(&self, role: TextRole) -> &ParagraphStyle {
        match role {
            TextRole::CoverTitle => &self.cover_title,
            TextRole::CoverSubtitle | TextRole::CoverTagline => &self.cover_subtitle,
            TextRole::CoverDate => &self.cover_date,
            TextRole::CoverNotice => &self.notice,
            TextRole::TocHeading => &self.toc_heading,
            TextRole::SectionTitle => &self.section_title,
        }
    }

    /// Paragraph style for a content block
    pub fn for_block(&self, kind: BlockKind) -> &ParagraphStyle {
        match kind {
            BlockKind::Heading1 => &self.heading1,
            BlockKind::Heading2 | BlockKind::Heading3 => &self.heading2,
            BlockKind::Quote => &self.quote,
            BlockKind::ListItem => &self.list_item,
            BlockKind::Paragraph | BlockKind::PlainText => &self.normal,
        }
    }

    /// Paragraph style for a TOC line at a nesting level
    pub fn for_toc_level(&self, level: u32) -> &ParagraphStyle {
        if level == 0 {
            &self.toc_entry1
        } else {
            &self.toc_entry2
        }
    }
}
