//! Per-page decoration
//!
//! The renderer invokes a [`PageDecorator`] once for every page it lays out.
//! Decorators only see the page number, the page geometry, the read-only
//! furniture spec and a [`PageSurface`] to draw on, so they stay independent
//! of the PDF engine.

use crate::assets;
use crate::error::AssetError;
use crate::style::{FurnitureStyle, PageStyle, Rgb};
use crate::types::PageFurnitureSpec;
use std::path::Path;

/// A point on the page in millimetres, measured from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x_mm: f64,
    pub y_mm: f64,
}

impl Point {
    pub fn new(x_mm: f64, y_mm: f64) -> Self {
        Self { x_mm, y_mm }
    }
}

/// Which point of a text line the origin refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Left,
    Center,
    Right,
}

/// Physical page size and margins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_mm: f64,
    pub height_mm: f64,
    pub margin_left_mm: f64,
    pub margin_right_mm: f64,
}

impl PageGeometry {
    pub fn from_style(page: &PageStyle) -> Self {
        Self {
            width_mm: page.width_mm,
            height_mm: page.height_mm,
            margin_left_mm: page.margin_left_mm,
            margin_right_mm: page.margin_right_mm,
        }
    }

    /// X coordinate of the right margin
    pub fn right_edge(&self) -> f64 {
        self.width_mm - self.margin_right_mm
    }
}

/// Drawing operations available to decorators.
///
/// Text origins are the top of the line box at the anchor point.
pub trait PageSurface {
    fn draw_image(
        &mut self,
        path: &Path,
        origin: Point,
        width_mm: f64,
        height_mm: f64,
    ) -> Result<(), AssetError>;

    fn draw_text(&mut self, text: &str, origin: Point, anchor: TextAnchor, font_size: u8, color: Rgb);

    /// Hairline rule between two points
    fn draw_line(&mut self, from: Point, to: Point, color: Rgb);
}

/// Draws recurring furniture onto a page
pub trait PageDecorator {
    fn decorate(
        &self,
        page_number: u32,
        geometry: &PageGeometry,
        spec: &PageFurnitureSpec,
        surface: &mut dyn PageSurface,
    );
}

/// Header logo, title, date, page label, rules and footer disclaimer
#[derive(Debug, Clone, Default)]
pub struct FurnitureDecorator {
    style: FurnitureStyle,
}

impl FurnitureDecorator {
    pub fn new(style: FurnitureStyle) -> Self {
        Self { style }
    }

    fn draw_logo(&self, path: &Path, geometry: &PageGeometry, surface: &mut dyn PageSurface) {
        let aspect = assets::aspect_ratio(path, self.style.logo_fallback_aspect);
        let width = self.style.logo_width_mm;
        let height = width / aspect;
        let origin = Point::new(geometry.margin_left_mm, self.style.logo_top_mm);

        if let Err(e) = surface.draw_image(path, origin, width, height) {
            tracing::warn!("Skipping header logo: {}", e);
        }
    }
}

impl PageDecorator for FurnitureDecorator {
    fn decorate(
        &self,
        page_number: u32,
        geometry: &PageGeometry,
        spec: &PageFurnitureSpec,
        surface: &mut dyn PageSurface,
    ) {
        if spec.suppressed.contains(page_number) {
            tracing::trace!("Page {} has no furniture", page_number);
            return;
        }

        let style = &self.style;
        let left = geometry.margin_left_mm;
        let right = geometry.right_edge() - style.right_inset_mm;
        let bottom = geometry.height_mm;

        if let Some(logo) = &spec.header_logo {
            self.draw_logo(logo, geometry, surface);
        }

        surface.draw_text(
            &spec.title,
            Point::new(style.title_left_mm, style.header_text_top_mm),
            TextAnchor::Left,
            style.title_font_size,
            Rgb::BLACK,
        );
        surface.draw_text(
            &spec.date,
            Point::new(right, style.header_text_top_mm),
            TextAnchor::Right,
            style.meta_font_size,
            Rgb::BLACK,
        );
        surface.draw_text(
            &spec.page_label_for(page_number),
            Point::new(right, bottom - style.page_number_mm),
            TextAnchor::Right,
            style.meta_font_size,
            Rgb::BLACK,
        );

        surface.draw_line(
            Point::new(left, style.header_rule_mm),
            Point::new(geometry.right_edge(), style.header_rule_mm),
            style.rule_color,
        );
        surface.draw_line(
            Point::new(left, bottom - style.footer_rule_mm),
            Point::new(geometry.right_edge(), bottom - style.footer_rule_mm),
            style.rule_color,
        );

        if !spec.footer_text.is_empty() {
            surface.draw_text(
                &spec.footer_text,
                Point::new(geometry.width_mm / 2.0, bottom - style.disclaimer_mm),
                TextAnchor::Center,
                style.footer_font_size,
                style.footer_color,
            );
        }
    }
}
