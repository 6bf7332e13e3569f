//! Renderers turning an assembled render stream into an output document

mod elements;
mod pdf;
mod wrap;

pub use pdf::PdfRenderer;
pub use wrap::wrap_text;

pub(crate) use pdf::PageTracker;

use crate::decorator::PageDecorator;
use crate::error::RenderError;
use crate::layout::Assembly;
use crate::types::PageFurnitureSpec;
use std::collections::HashMap;
use std::rc::Rc;

/// A finished document
#[derive(Debug, Clone, Default)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub pages: u32,
    /// Page on which each anchored heading starts
    pub anchor_pages: HashMap<String, u32>,
}

/// Trait for rendering an assembly to an output format
pub trait Renderer {
    /// Render the stream, invoking `decorator` once per page
    fn render(
        &self,
        assembly: &Assembly,
        spec: Rc<PageFurnitureSpec>,
        decorator: Rc<dyn PageDecorator>,
    ) -> Result<RenderedDocument, RenderError>;

    /// Format name (e.g., "PDF")
    fn format_name(&self) -> &str;

    /// File extension for this format
    fn file_extension(&self) -> &str;
}
