//! genpdf-based PDF renderer
//!
//! Rendering runs twice when the stream contains a table of contents: the
//! first pass records the page of every anchored heading, the second draws
//! the TOC with those page numbers. Page layout is identical in both passes
//! because TOC lines do not change height with their numbers.

use super::elements::{color, PageNumberLine, Spacer, TocBlock, WrappedText};
use super::{RenderedDocument, Renderer};
use crate::assets;
use crate::decorator::{PageDecorator, PageGeometry, PageSurface, Point, TextAnchor};
use crate::error::{AssetError, RenderError};
use crate::fonts::FontSource;
use crate::layout::Assembly;
use crate::style::{DocumentStyle, Rgb};
use crate::types::{PageFurnitureSpec, RenderItem, RenderStream};
use genpdf::elements::{Image, PageBreak};
use genpdf::fonts::{FontData, FontFamily};
use genpdf::render::Area;
use genpdf::style::Style;
use genpdf::{Alignment, Context, Document, Element, Margins, Mm, Position, Scale, Size};
use image::{DynamicImage, GenericImageView};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Resolution images are placed at before scaling
const IMAGE_DPI: f64 = 300.0;

/// Shared state of one render pass
#[derive(Debug, Default)]
pub(crate) struct PageTracker {
    page: Cell<u32>,
    numbered: Cell<u32>,
    ordinal: Cell<Option<usize>>,
    /// Band at the bottom of a page held by its page label
    reserved: Cell<Option<(u32, Mm)>>,
    anchors: RefCell<HashMap<String, u32>>,
}

impl PageTracker {
    fn next_page(&self) -> u32 {
        let page = self.page.get() + 1;
        self.page.set(page);
        page
    }

    pub fn page(&self) -> u32 {
        self.page.get()
    }

    /// True the first time a page number is requested for `page`
    pub fn claim_page_number(&self, page: u32) -> bool {
        if self.numbered.get() == page {
            false
        } else {
            self.numbered.set(page);
            true
        }
    }

    /// Keep the bottom `height` of `page` free of content
    pub fn reserve_bottom(&self, page: u32, height: Mm) {
        self.reserved.set(Some((page, height)));
    }

    /// Height of `available` that content may use on the current page
    pub fn usable_height(&self, available: Mm) -> Mm {
        match self.reserved.get() {
            Some((page, height)) if page == self.page.get() => {
                let usable = available - height;
                if usable > Mm::from(0.0) {
                    usable
                } else {
                    Mm::from(0.0)
                }
            }
            _ => available,
        }
    }

    pub fn set_ordinal(&self, ordinal: Option<usize>) {
        self.ordinal.set(ordinal);
    }

    pub fn ordinal(&self) -> Option<usize> {
        self.ordinal.get()
    }

    /// Remember the current page for `anchor`; the first mark wins
    pub fn mark_anchor(&self, anchor: &str) {
        let page = self.page.get();
        self.anchors
            .borrow_mut()
            .entry(anchor.to_string())
            .or_insert(page);
    }

    fn anchor_pages(&self) -> HashMap<String, u32> {
        self.anchors.borrow().clone()
    }
}

/// Renders an assembly to PDF with genpdf
pub struct PdfRenderer {
    style: DocumentStyle,
    font: FontSource,
}

impl PdfRenderer {
    pub fn new(style: DocumentStyle, font: FontSource) -> Self {
        Self { style, font }
    }

    pub fn font(&self) -> &FontSource {
        &self.font
    }

    /// Check that every content block can be drawn with the font
    pub fn preflight(&self, stream: &RenderStream) -> Result<(), RenderError> {
        for item in stream {
            match item {
                RenderItem::Block { block, .. } => {
                    if let Some(ch) = self.font.missing_glyph(&block.text) {
                        return Err(RenderError::UnencodableGlyph {
                            ordinal: block.ordinal,
                            ch,
                        });
                    }
                }
                RenderItem::Text { text, .. } => {
                    if let Some(ch) = self.font.missing_glyph(text) {
                        tracing::warn!("{:?} contains {:?}, which the font cannot encode", text, ch);
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn font_family(&self) -> Result<FontFamily<FontData>, RenderError> {
        let data = FontData::new(self.font.data.clone(), None)
            .map_err(|e| RenderError::NoFont(format!("{}: {}", self.font.path.display(), e)))?;
        Ok(FontFamily {
            regular: data.clone(),
            bold: data.clone(),
            italic: data.clone(),
            bold_italic: data,
        })
    }

    fn build(
        &self,
        assembly: &Assembly,
        spec: &Rc<PageFurnitureSpec>,
        decorator: &Rc<dyn PageDecorator>,
        tracker: &Rc<PageTracker>,
        toc_pages: &HashMap<String, u32>,
        announce: bool,
    ) -> Result<Document, RenderError> {
        let page = &self.style.page;
        let mut doc = Document::new(self.font_family()?);
        doc.set_title(spec.title.clone());
        doc.set_paper_size(Size::new(page.width_mm, page.height_mm));
        doc.set_page_decorator(DecoratorBridge {
            decorator: Rc::clone(decorator),
            spec: Rc::clone(spec),
            geometry: PageGeometry::from_style(page),
            margins: Margins::trbl(
                page.margin_top_mm,
                page.margin_right_mm,
                page.margin_bottom_mm,
                page.margin_left_mm,
            ),
            tracker: Rc::clone(tracker),
            images: HashMap::new(),
        });

        for item in assembly.stream.iter() {
            match item {
                RenderItem::Image {
                    path,
                    width_mm,
                    fallback_aspect,
                } => match scaled_image(path, *width_mm) {
                    Ok(image) => doc.push(image.with_alignment(Alignment::Center)),
                    Err(e) => {
                        if announce {
                            tracing::warn!("Leaving a gap for the cover image: {}", e);
                        }
                        doc.push(Spacer::new(width_mm / fallback_aspect));
                    }
                },
                RenderItem::Text { text, role } => doc.push(WrappedText::new(
                    text.as_str(),
                    self.style.for_role(*role),
                    Rc::clone(tracker),
                )),
                RenderItem::Spacer { height_mm } => doc.push(Spacer::new(*height_mm)),
                RenderItem::Block { block, anchor, .. } => doc.push(
                    WrappedText::new(
                        block.text.as_str(),
                        self.style.for_block(block.kind),
                        Rc::clone(tracker),
                    )
                    .with_ordinal(block.ordinal)
                    .with_anchor(anchor.clone()),
                ),
                RenderItem::TableOfContents => doc.push(TocBlock::new(
                    assembly.toc.clone(),
                    toc_pages.clone(),
                    &self.style,
                    Rc::clone(tracker),
                )),
                RenderItem::PageBreak => doc.push(PageBreak::new()),
                RenderItem::PageNumber => doc.push(PageNumberLine::new(
                    Rc::clone(spec),
                    &self.style.page_number,
                    Rc::clone(tracker),
                )),
            }
        }

        Ok(doc)
    }

    fn render_pass(
        &self,
        assembly: &Assembly,
        spec: &Rc<PageFurnitureSpec>,
        decorator: &Rc<dyn PageDecorator>,
        toc_pages: &HashMap<String, u32>,
        announce: bool,
    ) -> Result<(Vec<u8>, Rc<PageTracker>), RenderError> {
        let tracker = Rc::new(PageTracker::default());
        let doc = self.build(assembly, spec, decorator, &tracker, toc_pages, announce)?;

        let mut bytes = Vec::new();
        doc.render(&mut bytes).map_err(|e| RenderError::Engine {
            ordinal: tracker.ordinal(),
            message: e.to_string(),
        })?;
        Ok((bytes, tracker))
    }
}

impl Renderer for PdfRenderer {
    fn render(
        &self,
        assembly: &Assembly,
        spec: Rc<PageFurnitureSpec>,
        decorator: Rc<dyn PageDecorator>,
    ) -> Result<RenderedDocument, RenderError> {
        self.preflight(&assembly.stream)?;

        let has_toc = assembly
            .stream
            .iter()
            .any(|item| matches!(item, RenderItem::TableOfContents));

        let (mut bytes, mut tracker) =
            self.render_pass(assembly, &spec, &decorator, &HashMap::new(), true)?;
        if has_toc && !assembly.toc.is_empty() {
            let pages = tracker.anchor_pages();
            tracing::debug!("Rendering again with {} anchored headings", pages.len());
            (bytes, tracker) = self.render_pass(assembly, &spec, &decorator, &pages, false)?;
        }

        tracing::debug!("Rendered {} pages, {} bytes", tracker.page(), bytes.len());
        Ok(RenderedDocument {
            bytes,
            pages: tracker.page(),
            anchor_pages: tracker.anchor_pages(),
        })
    }

    fn format_name(&self) -> &str {
        "PDF"
    }

    fn file_extension(&self) -> &str {
        "pdf"
    }
}

/// Image element `width_mm` wide at its natural aspect ratio
fn scaled_image(path: &Path, width_mm: f64) -> Result<Image, AssetError> {
    let image = assets::load_flattened(path)?;
    image_element(path, image, width_mm)
}

fn image_element(path: &Path, image: DynamicImage, width_mm: f64) -> Result<Image, AssetError> {
    let natural_mm = f64::from(image.width()) * 25.4 / IMAGE_DPI;
    let scale = if natural_mm > 0.0 {
        width_mm / natural_mm
    } else {
        1.0
    };
    let element = Image::from_dynamic_image(image).map_err(|e| AssetError::Unreadable {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(element.with_dpi(IMAGE_DPI).with_scale(Scale::new(scale, scale)))
}

/// Adapts a core [`PageDecorator`] to genpdf's page decoration hook
struct DecoratorBridge {
    decorator: Rc<dyn PageDecorator>,
    spec: Rc<PageFurnitureSpec>,
    geometry: PageGeometry,
    margins: Margins,
    tracker: Rc<PageTracker>,
    images: HashMap<PathBuf, DynamicImage>,
}

impl genpdf::PageDecorator for DecoratorBridge {
    fn decorate_page<'a>(
        &mut self,
        context: &Context,
        mut area: Area<'a>,
        _style: Style,
    ) -> Result<Area<'a>, genpdf::error::Error> {
        let page = self.tracker.next_page();
        tracing::trace!("Decorating page {}", page);

        let mut surface = AreaSurface {
            area: &area,
            context,
            images: &mut self.images,
            error: None,
        };
        self.decorator
            .decorate(page, &self.geometry, &self.spec, &mut surface);
        if let Some(e) = surface.error {
            tracing::warn!("Page {} furniture is incomplete: {}", page, e);
        }

        area.add_margins(self.margins);
        Ok(area)
    }
}

/// [`PageSurface`] drawing on a full-page genpdf area
struct AreaSurface<'s, 'a> {
    area: &'s Area<'a>,
    context: &'s Context,
    images: &'s mut HashMap<PathBuf, DynamicImage>,
    error: Option<genpdf::error::Error>,
}

impl AreaSurface<'_, '_> {
    fn image(&mut self, path: &Path) -> Result<DynamicImage, AssetError> {
        if let Some(image) = self.images.get(path) {
            return Ok(image.clone());
        }
        let image = assets::load_flattened(path)?;
        self.images.insert(path.to_path_buf(), image.clone());
        Ok(image)
    }
}

impl PageSurface for AreaSurface<'_, '_> {
    fn draw_image(
        &mut self,
        path: &Path,
        origin: Point,
        width_mm: f64,
        _height_mm: f64,
    ) -> Result<(), AssetError> {
        let image = self.image(path)?;
        let mut element = image_element(path, image, width_mm)?;

        let mut area = self.area.clone();
        area.add_offset(Position::new(origin.x_mm, origin.y_mm));
        element
            .render(self.context, area, Style::new())
            .map_err(|e| AssetError::Unreadable {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    fn draw_text(&mut self, text: &str, origin: Point, anchor: TextAnchor, font_size: u8, rgb: Rgb) {
        if text.is_empty() || self.error.is_some() {
            return;
        }
        let font_cache = &self.context.font_cache;
        let style = Style::new().with_font_size(font_size).with_color(color(rgb));
        let width = style.str_width(font_cache, text);
        let x = match anchor {
            TextAnchor::Left => genpdf::Mm::from(origin.x_mm),
            TextAnchor::Center => genpdf::Mm::from(origin.x_mm) - width / 2.0,
            TextAnchor::Right => genpdf::Mm::from(origin.x_mm) - width,
        };
        let position = Position::new(x, origin.y_mm);
        if let Err(e) = self.area.print_str(font_cache, position, style, text) {
            self.error = Some(e);
        }
    }

    fn draw_line(&mut self, from: Point, to: Point, rgb: Rgb) {
        self.area.draw_line(
            vec![
                Position::new(from.x_mm, from.y_mm),
                Position::new(to.x_mm, to.y_mm),
            ],
            Style::new().with_color(color(rgb)),
        );
    }
}
