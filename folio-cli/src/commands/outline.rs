//! Outline command implementation

use super::parse_variant;
use anyhow::{Context, Result};
use folio_core::{Assembly, RenderItem, ReportBuilder, ReportConfig};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Outline output
#[derive(Serialize)]
struct Outline<'a> {
    input: String,
    variant: folio_core::Variant,
    blocks: usize,
    page_breaks: usize,
    toc: &'a [folio_core::TocEntry],
    stream: &'a folio_core::RenderStream,
}

/// Print the assembled render stream of a markdown report
pub fn outline(
    input: &Path,
    json: bool,
    variant: Option<&str>,
    lexicon: Option<PathBuf>,
) -> Result<()> {
    let mut config = ReportConfig {
        input_path: input.to_path_buf(),
        lexicon_path: lexicon,
        ..ReportConfig::default()
    };
    if let Some(variant) = variant {
        config.variant = parse_variant(variant)?;
    }
    let variant = config.variant;

    let builder = ReportBuilder::new(config).context("Failed to prepare the report")?;
    let assembly = builder
        .outline()
        .with_context(|| format!("Failed to assemble {}", input.display()))?;

    if json {
        let outline = Outline {
            input: input.display().to_string(),
            variant,
            blocks: count_blocks(&assembly),
            page_breaks: assembly.stream.page_breaks(),
            toc: &assembly.toc,
            stream: &assembly.stream,
        };
        println!("{}", serde_json::to_string_pretty(&outline)?);
    } else {
        print_text(&assembly);
    }

    Ok(())
}

fn count_blocks(assembly: &Assembly) -> usize {
    assembly
        .stream
        .iter()
        .filter(|item| item.block().is_some())
        .count()
}

fn print_text(assembly: &Assembly) {
    let mut page = 1;
    println!("--- page {} ---", page);
    for item in &assembly.stream {
        match item {
            RenderItem::Image { path, width_mm, .. } => {
                println!("[image {} @ {}mm]", path.display(), width_mm)
            }
            RenderItem::Text { text, role } => println!("{:?}: {}", role, text),
            RenderItem::Spacer { .. } => {}
            RenderItem::Block {
                block,
                language,
                anchor,
            } => {
                let anchor = anchor
                    .as_deref()
                    .map(|a| format!(" #{}", a))
                    .unwrap_or_default();
                println!(
                    "{:>4} {:?}/{:?}{}: {}",
                    block.ordinal, language, block.kind, anchor, block.text
                );
            }
            RenderItem::TableOfContents => {
                for entry in &assembly.toc {
                    let indent = "  ".repeat(entry.level as usize);
                    println!("  {}{} -> {}", indent, entry.title, entry.anchor);
                }
            }
            RenderItem::PageBreak => {
                page += 1;
                println!("--- page {} ---", page);
            }
            RenderItem::PageNumber => {}
        }
    }
}
