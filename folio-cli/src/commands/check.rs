//! Check command implementation

use anyhow::{bail, Result};
use folio_core::assets;
use folio_core::fonts::{self, FontSource};
use std::path::{Path, PathBuf};

/// Arguments of `folio check`
pub struct CheckArgs {
    pub input: Option<PathBuf>,
    pub font: Option<PathBuf>,
    pub header_logo: Option<PathBuf>,
    pub cover_logo: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

/// Check the environment a render depends on
pub fn check(args: CheckArgs) -> Result<()> {
    let mut failures = 0;

    println!("Fonts:");
    let usable: Vec<FontSource> = fonts::candidates(args.font.as_deref())
        .iter()
        .filter_map(|path| match FontSource::load(path) {
            Ok(font) => Some(font),
            Err(reason) => {
                tracing::debug!("{}", reason);
                None
            }
        })
        .collect();
    match usable.first() {
        Some(font) => {
            println!("  ok    {}", font.path.display());
            for other in &usable[1..] {
                println!("        also usable: {}", other.path.display());
            }
            if let Some(ch) = font.missing_glyph("中文版") {
                println!("  warn  {} has no glyph for '{}'", font.path.display(), ch);
            }
        }
        None => {
            println!("  FAIL  No usable font found");
            failures += 1;
        }
    }

    if let Some(input) = &args.input {
        println!("Input:");
        if input.is_file() {
            println!("  ok    {}", input.display());
        } else {
            println!("  FAIL  {} not found", input.display());
            failures += 1;
        }
    }

    let logos = [("Header logo", &args.header_logo), ("Cover logo", &args.cover_logo)];
    for (label, logo) in logos {
        if let Some(path) = logo {
            println!("{}:", label);
            if !check_logo(path) {
                failures += 1;
            }
        }
    }

    if let Some(dir) = &args.output_dir {
        println!("Output directory:");
        match std::fs::create_dir_all(dir) {
            Ok(()) => println!("  ok    {}", dir.display()),
            Err(e) => {
                println!("  FAIL  {}: {}", dir.display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} check(s) failed", failures);
    }

    println!();
    println!("Ready to render");
    Ok(())
}

/// A missing logo only degrades the output, but it is reported as a failure here
fn check_logo(path: &Path) -> bool {
    match assets::probe(path) {
        Ok((width, height)) => {
            println!("  ok    {} ({}x{})", path.display(), width, height);
            true
        }
        Err(e) => {
            println!("  FAIL  {}", e);
            false
        }
    }
}
