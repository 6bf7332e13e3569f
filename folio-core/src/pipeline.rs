//! The document assembly pipeline
//!
//! read -> parse -> pair -> assemble -> render -> write, as one linear call
//! chain. Any fatal error aborts the build; nothing is retried.

use crate::config::ReportConfig;
use crate::decoder::MarkdownDecoder;
use crate::decorator::{FurnitureDecorator, PageDecorator};
use crate::encoder::{PdfRenderer, Renderer};
use crate::error::{ConfigError, ReportError, Result};
use crate::fonts::FontSource;
use crate::layout::{Assembly, LayoutAssembler};
use crate::lexicon::Lexicon;
use crate::pairing::BilingualPairer;
use std::path::PathBuf;
use std::rc::Rc;

/// Outcome of a successful build
#[derive(Debug, Clone)]
pub struct BuildSummary {
    pub output_path: PathBuf,
    pub font_path: PathBuf,
    pub blocks: usize,
    pub toc_entries: usize,
    pub pages: u32,
    pub bytes: usize,
}

/// Builds one report from its configuration
pub struct ReportBuilder {
    config: ReportConfig,
    lexicon: Lexicon,
    decoder: MarkdownDecoder,
}

impl ReportBuilder {
    /// Create a builder, loading the configured lexicon
    pub fn new(config: ReportConfig) -> Result<Self> {
        let lexicon = config.lexicon()?;
        Ok(Self {
            config,
            lexicon,
            decoder: MarkdownDecoder::new(),
        })
    }

    /// Replace the lexicon
    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Read the whole input file
    pub fn read_input(&self) -> Result<String> {
        let path = &self.config.input_path;
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("input path is not set".to_string()).into());
        }
        std::fs::read_to_string(path).map_err(|source| ReportError::InputUnavailable {
            path: path.clone(),
            source,
        })
    }

    /// Parse, pair and assemble markdown text
    pub fn assemble_markdown(&self, markdown: &str) -> Assembly {
        let blocks = self.decoder.parse(markdown);
        tracing::debug!("Parsed {} blocks", blocks.len());

        let entries = BilingualPairer::new(&self.lexicon).pair_all(&blocks);

        let assembler = LayoutAssembler::new(self.config.layout_options(), &self.config.style);
        assembler.assemble(&entries, &self.config.furniture())
    }

    /// Assemble the input without rendering it
    pub fn outline(&self) -> Result<Assembly> {
        let markdown = self.read_input()?;
        Ok(self.assemble_markdown(&markdown))
    }

    /// Run the full pipeline and write the PDF
    pub fn build(&self) -> Result<BuildSummary> {
        self.config.validate()?;

        let markdown = self.read_input()?;
        tracing::info!(
            "Building {} from {}",
            self.config.output_path.display(),
            self.config.input_path.display()
        );
        let assembly = self.assemble_markdown(&markdown);
        let blocks = assembly.stream.iter().filter(|i| i.block().is_some()).count();

        let font = FontSource::resolve(self.config.font_path.as_deref())?;
        let renderer = PdfRenderer::new(self.config.style.clone(), font);
        let font_path = renderer.font().path.clone();

        let spec = Rc::new(self.config.furniture());
        let decorator: Rc<dyn PageDecorator> =
            Rc::new(FurnitureDecorator::new(self.config.style.furniture.clone()));
        let document = renderer.render(&assembly, spec, decorator)?;

        let output_path = &self.config.output_path;
        if output_path.extension().and_then(|e| e.to_str()) != Some(renderer.file_extension()) {
            tracing::warn!(
                "Writing {} output to {}, which lacks a .{} extension",
                renderer.format_name(),
                output_path.display(),
                renderer.file_extension()
            );
        }
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_path, &document.bytes)?;
        tracing::info!(
            "Wrote {} pages ({} bytes) to {}",
            document.pages,
            document.bytes.len(),
            output_path.display()
        );

        Ok(BuildSummary {
            output_path: output_path.clone(),
            font_path,
            blocks,
            toc_entries: assembly.toc.len(),
            pages: document.pages,
            bytes: document.bytes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Language, RenderItem};

    #[test]
    fn test_missing_input_is_fatal() {
        let config = ReportConfig::new("/nonexistent/report.md", "/tmp/out.pdf");
        let builder = ReportBuilder::new(config).unwrap();
        assert!(matches!(
            builder.outline(),
            Err(ReportError::InputUnavailable { .. })
        ));
        assert!(matches!(
            builder.build(),
            Err(ReportError::InputUnavailable { .. })
        ));
    }

    #[test]
    fn test_unset_input_is_a_config_error() {
        let builder = ReportBuilder::new(ReportConfig::default()).unwrap();
        assert!(matches!(builder.outline(), Err(ReportError::Config(_))));
    }

    #[test]
    fn test_assemble_markdown_uses_lexicon() {
        let builder = ReportBuilder::new(ReportConfig::new("a.md", "a.pdf"))
            .unwrap()
            .with_lexicon(Lexicon::empty().with_entry("苹果", "Apple"));
        let assembly = builder.assemble_markdown("苹果很好");

        let secondary: Vec<&str> = assembly
            .stream
            .blocks_for(Language::Secondary)
            .map(|b| b.text.as_str())
            .collect();
        assert_eq!(secondary, vec!["Apple很好"]);
        assert!(assembly.stream.iter().any(|i| *i == RenderItem::TableOfContents));
    }

    #[test]
    fn test_missing_lexicon_file() {
        let config = ReportConfig {
            lexicon_path: Some(PathBuf::from("/nonexistent/lexicon.json")),
            ..ReportConfig::new("a.md", "a.pdf")
        };
        assert!(matches!(
            ReportBuilder::new(config),
            Err(ReportError::Config(ConfigError::Read { .. }))
        ));
    }
}
