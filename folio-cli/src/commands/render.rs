//! Render command implementation

use super::parse_variant;
use anyhow::{Context, Result};
use folio_core::{ReportBuilder, ReportConfig};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

/// Arguments of `folio render`
pub struct RenderArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub config: Option<PathBuf>,
    pub font: Option<PathBuf>,
    pub title: Option<String>,
    pub date: Option<String>,
    pub variant: Option<String>,
    pub lexicon: Option<PathBuf>,
    pub header_logo: Option<PathBuf>,
    pub cover_logo: Option<PathBuf>,
}

impl RenderArgs {
    /// Load the config file, if any, and apply the command-line overrides
    fn into_config(self) -> Result<ReportConfig> {
        let mut config = match &self.config {
            Some(path) => ReportConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ReportConfig::default(),
        };

        config.input_path = self.input;
        config.output_path = self.output;
        if let Some(variant) = &self.variant {
            config.variant = parse_variant(variant)?;
        }
        if self.font.is_some() {
            config.font_path = self.font;
        }
        if let Some(title) = self.title {
            config.title = title;
        }
        if let Some(date) = self.date {
            config.date = date;
        }
        if self.lexicon.is_some() {
            config.lexicon_path = self.lexicon;
        }
        if self.header_logo.is_some() {
            config.header_logo = self.header_logo;
        }
        if self.cover_logo.is_some() {
            config.cover_logo = self.cover_logo;
        }
        Ok(config)
    }
}

/// Render a markdown report to PDF
pub fn render(args: RenderArgs) -> Result<()> {
    let config = args.into_config()?;
    let input = config.input_path.display().to_string();
    let output = config.output_path.display().to_string();

    let builder = ReportBuilder::new(config).context("Failed to prepare the report")?;

    // Set up progress bar with animation
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("Invalid progress template")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Rendering {}...", input));

    let summary = match builder.build() {
        Ok(summary) => summary,
        Err(e) => {
            pb.abandon_with_message(format!("Failed to render {}", input));
            return Err(e).with_context(|| format!("Failed to render {} to {}", input, output));
        }
    };

    tracing::info!(
        "Used font {} for {} blocks and {} TOC entries",
        summary.font_path.display(),
        summary.blocks,
        summary.toc_entries
    );

    pb.finish_with_message(format!(
        "Rendered {} pages ({} bytes) -> {}",
        summary.pages, summary.bytes, output
    ));

    Ok(())
}
