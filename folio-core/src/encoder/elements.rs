//! genpdf elements for render stream items

use super::wrap::wrap_text;
use super::PageTracker;
use crate::style::{Align, DocumentStyle, ParagraphStyle, Rgb};
use crate::types::{PageFurnitureSpec, TocEntry};
use genpdf::error::Error;
use genpdf::render::Area;
use genpdf::style::{Color, Style};
use genpdf::{Context, Element, Margins, Mm, Position, RenderResult, Size};
use std::collections::HashMap;
use std::rc::Rc;

pub(crate) fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub(crate) fn text_style(paragraph: &ParagraphStyle) -> Style {
    let mut style = Style::new()
        .with_font_size(paragraph.font_size)
        .with_line_spacing(paragraph.line_spacing())
        .with_color(color(paragraph.color));
    if paragraph.bold {
        style = style.bold();
    }
    if paragraph.italic {
        style = style.italic();
    }
    style
}

fn min_mm(a: Mm, b: Mm) -> Mm {
    if a < b {
        a
    } else {
        b
    }
}

fn max_mm(a: Mm, b: Mm) -> Mm {
    if a > b {
        a
    } else {
        b
    }
}

/// X offset of a line of `width` inside `available`
fn aligned_x(align: Align, available: Mm, width: Mm) -> Mm {
    match align {
        Align::Left => Mm::from(0.0),
        Align::Center => (available - width) / 2.0,
        Align::Right => available - width,
    }
}

/// A wrapped paragraph that can continue on the next page
pub(crate) struct WrappedText {
    text: String,
    paragraph: ParagraphStyle,
    style: Style,
    lines: Option<Vec<String>>,
    next_line: usize,
    ordinal: Option<usize>,
    anchor: Option<String>,
    tracker: Rc<PageTracker>,
}

impl WrappedText {
    pub fn new(text: impl Into<String>, paragraph: &ParagraphStyle, tracker: Rc<PageTracker>) -> Self {
        Self {
            text: text.into(),
            paragraph: paragraph.clone(),
            style: text_style(paragraph),
            lines: None,
            next_line: 0,
            ordinal: None,
            anchor: None,
            tracker,
        }
    }

    /// Source block this paragraph renders, for error reporting
    pub fn with_ordinal(mut self, ordinal: usize) -> Self {
        self.ordinal = Some(ordinal);
        self
    }

    /// Record the page of the first line under `anchor`
    pub fn with_anchor(mut self, anchor: Option<String>) -> Self {
        self.anchor = anchor;
        self
    }
}

impl Element for WrappedText {
    fn render(
        &mut self,
        context: &Context,
        mut area: Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        if self.ordinal.is_some() {
            self.tracker.set_ordinal(self.ordinal);
        }

        area.add_margins(Margins::trbl(
            0.0,
            self.paragraph.indent_right_mm,
            0.0,
            self.paragraph.indent_left_mm,
        ));
        let available = area.size().width;
        let font_cache = &context.font_cache;
        let style = self.style;

        let text = &self.text;
        let lines = self
            .lines
            .get_or_insert_with(|| wrap_text(text, |line| style.str_width(font_cache, line) <= available));

        let line_height = style.line_height(font_cache);
        let usable = self.tracker.usable_height(area.size().height);
        let mut result = RenderResult::default();

        while self.next_line < lines.len() {
            if result.size.height + line_height > usable {
                result.has_more = true;
                return Ok(result);
            }

            let line = &lines[self.next_line];
            let x = aligned_x(self.paragraph.align, available, style.str_width(font_cache, line));
            area.print_str(font_cache, Position::new(x, result.size.height), style, line)?;

            if self.next_line == 0 {
                if let Some(anchor) = &self.anchor {
                    self.tracker.mark_anchor(anchor);
                }
            }
            result.size.height = result.size.height + line_height;
            self.next_line += 1;
        }

        let space_after = Mm::from(self.paragraph.space_after_mm);
        let remaining = max_mm(usable - result.size.height, Mm::from(0.0));
        result.size.height = result.size.height + min_mm(space_after, remaining);
        result.size.width = available;
        Ok(result)
    }
}

/// Fixed vertical gap, truncated at the page end
pub(crate) struct Spacer {
    height: Mm,
}

impl Spacer {
    pub fn new(height_mm: f64) -> Self {
        Self {
            height: Mm::from(height_mm),
        }
    }
}

impl Element for Spacer {
    fn render(&mut self, _: &Context, area: Area<'_>, _: Style) -> Result<RenderResult, Error> {
        let height = min_mm(self.height, area.size().height);
        Ok(RenderResult {
            size: Size::new(area.size().width, height),
            has_more: false,
        })
    }
}

/// Centered page label at the bottom of the content area. The band it
/// occupies is reserved so later content on the page stops above it.
pub(crate) struct PageNumberLine {
    spec: Rc<PageFurnitureSpec>,
    paragraph: ParagraphStyle,
    tracker: Rc<PageTracker>,
}

impl PageNumberLine {
    pub fn new(spec: Rc<PageFurnitureSpec>, paragraph: &ParagraphStyle, tracker: Rc<PageTracker>) -> Self {
        Self {
            spec,
            paragraph: paragraph.clone(),
            tracker,
        }
    }
}

impl Element for PageNumberLine {
    fn render(&mut self, context: &Context, area: Area<'_>, _: Style) -> Result<RenderResult, Error> {
        let page = self.tracker.page();
        if !self.tracker.claim_page_number(page) {
            return Ok(RenderResult::default());
        }

        let font_cache = &context.font_cache;
        let style = text_style(&self.paragraph);
        let label = self.spec.page_label_for(page);
        let size = area.size();
        let line_height = style.line_height(font_cache);
        let y = max_mm(size.height - line_height, Mm::from(0.0));
        let x = aligned_x(Align::Center, size.width, style.str_width(font_cache, &label));

        area.print_str(font_cache, Position::new(x, y), style, &label)?;
        self.tracker.reserve_bottom(page, line_height);
        Ok(RenderResult::default())
    }
}

/// Width reserved for the page number column of the TOC
const TOC_NUMBER_COLUMN_MM: f64 = 15.0;

/// Table of contents lines with right-aligned page numbers
pub(crate) struct TocBlock {
    entries: Vec<TocEntry>,
    pages: HashMap<String, u32>,
    style: DocumentStyle,
    next_entry: usize,
    tracker: Rc<PageTracker>,
}

impl TocBlock {
    pub fn new(
        entries: Vec<TocEntry>,
        pages: HashMap<String, u32>,
        style: &DocumentStyle,
        tracker: Rc<PageTracker>,
    ) -> Self {
        Self {
            entries,
            pages,
            style: style.clone(),
            next_entry: 0,
            tracker,
        }
    }
}

impl Element for TocBlock {
    fn render(&mut self, context: &Context, area: Area<'_>, _: Style) -> Result<RenderResult, Error> {
        let font_cache = &context.font_cache;
        let width = area.size().width;
        let usable = self.tracker.usable_height(area.size().height);
        let mut result = RenderResult::default();

        while self.next_entry < self.entries.len() {
            let entry = &self.entries[self.next_entry];
            let paragraph = self.style.for_toc_level(entry.level);
            let style = text_style(paragraph);
            let indent = Mm::from(paragraph.indent_left_mm);
            let title_width = width - indent - Mm::from(TOC_NUMBER_COLUMN_MM);

            let lines = wrap_text(&entry.title, |line| style.str_width(font_cache, line) <= title_width);
            let line_height = style.line_height(font_cache);
            let space_after = Mm::from(paragraph.space_after_mm);
            let needed = line_height * lines.len().max(1) as f64;

            if result.size.height + needed > usable {
                result.has_more = true;
                return Ok(result);
            }

            for (i, line) in lines.iter().enumerate() {
                let y = result.size.height + line_height * i as f64;
                area.print_str(font_cache, Position::new(indent, y), style, line)?;
            }

            let page = self
                .pages
                .get(&entry.anchor)
                .map(u32::to_string)
                .unwrap_or_default();
            let x = width - style.str_width(font_cache, &page);
            area.print_str(font_cache, Position::new(x, result.size.height), style, &page)?;

            result.size.height = result.size.height + needed + space_after;
            self.next_entry += 1;
        }

        result.size.width = width;
        Ok(result)
    }
}
