//! Folio Core Library
//!
//! This crate turns a markdown report into a paginated bilingual PDF. The
//! source is parsed into content blocks, each block is paired with a
//! lexicon-substituted counterpart, and the pairs are laid out into a render
//! stream (cover, table of contents, one section per language) that the PDF
//! renderer draws, decorating every page with headers and footers.

pub mod assets;
pub mod config;
pub mod decoder;
pub mod decorator;
pub mod encoder;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod lexicon;
pub mod pairing;
pub mod pipeline;
pub mod style;
pub mod types;

pub use config::{ReportConfig, Variant};
pub use decoder::MarkdownDecoder;
pub use decorator::{FurnitureDecorator, PageDecorator, PageGeometry, PageSurface};
pub use encoder::{PdfRenderer, RenderedDocument, Renderer};
pub use error::{AssetError, ConfigError, RenderError, ReportError, Result};
pub use layout::{Arrangement, Assembly, LayoutAssembler, LayoutOptions};
pub use lexicon::Lexicon;
pub use pairing::BilingualPairer;
pub use pipeline::{BuildSummary, ReportBuilder};
pub use style::DocumentStyle;
pub use types::{
    BilingualEntry, BlockKind, ContentBlock, Language, PageFurnitureSpec, RenderItem,
    RenderStream, SuppressedPages, TextRole, TocEntry,
};
