//! Font discovery and glyph coverage
//!
//! A single font family is used for both languages, so the chosen font must
//! cover CJK ideographs. Candidates are tried in order; the first readable,
//! parseable one wins.

use crate::error::RenderError;
use std::path::{Path, PathBuf};

/// Font file shipped next to the executable or in the working directory
pub const BUNDLED_FONT: &str = "font/STKaiti.ttf";

/// System fonts with CJK coverage
const CJK_FONTS: &[&str] = &[
    "/System/Library/Fonts/STHeiti Light.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "/Library/Fonts/Arial Unicode.ttf",
    "C:\\Windows\\Fonts\\simkai.ttf",
    "C:\\Windows\\Fonts\\simhei.ttf",
    "C:\\Windows\\Fonts\\msyh.ttc",
    "/usr/share/fonts/truetype/arphic/ukai.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
];

/// Latin-only fallbacks; CJK text will fail the glyph check with these
const LATIN_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// A loaded font file
#[derive(Clone)]
pub struct FontSource {
    pub path: PathBuf,
    pub data: Vec<u8>,
}

impl std::fmt::Debug for FontSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSource")
            .field("path", &self.path)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl FontSource {
    /// Load a specific font file
    pub fn load(path: &Path) -> Result<Self, String> {
        let data = std::fs::read(path).map_err(|e| format!("{}: {}", path.display(), e))?;
        ttf_parser::Face::parse(&data, 0).map_err(|e| format!("{}: {}", path.display(), e))?;
        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    /// Try every candidate in order and return the first usable font
    pub fn resolve(configured: Option<&Path>) -> Result<Self, RenderError> {
        let candidates = candidates(configured);
        for path in &candidates {
            if !path.is_file() {
                if Some(path.as_path()) == configured {
                    tracing::warn!("Configured font {} not found", path.display());
                }
                continue;
            }
            match Self::load(path) {
                Ok(font) => {
                    tracing::info!("Using font {}", path.display());
                    return Ok(font);
                }
                Err(e) => tracing::warn!("Skipping font {}", e),
            }
        }

        Err(RenderError::NoFont(format!(
            "none of {} candidate fonts could be loaded",
            candidates.len()
        )))
    }

    /// First non-whitespace character of `text` without a glyph in this font
    pub fn missing_glyph(&self, text: &str) -> Option<char> {
        let face = match ttf_parser::Face::parse(&self.data, 0) {
            Ok(face) => face,
            Err(_) => return text.chars().find(|c| !c.is_whitespace()),
        };
        text.chars()
            .filter(|c| !c.is_whitespace())
            .find(|&c| face.glyph_index(c).is_none())
    }
}

/// Candidate font paths in lookup order
pub fn candidates(configured: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(path) = configured {
        paths.push(path.to_path_buf());
    }

    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    if let Some(dir) = exe_dir {
        paths.push(dir.join(BUNDLED_FONT));
    }
    paths.push(PathBuf::from(BUNDLED_FONT));

    paths.extend(CJK_FONTS.iter().map(PathBuf::from));
    paths.extend(LATIN_FONTS.iter().map(PathBuf::from));
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_font_is_tried_first() {
        let configured = Path::new("/fonts/custom.ttf");
        let list = candidates(Some(configured));
        assert_eq!(list[0], configured);
        assert!(list.iter().any(|p| p.ends_with(BUNDLED_FONT)));
        assert!(list.len() > CJK_FONTS.len() + LATIN_FONTS.len());
    }

    #[test]
    fn test_unparsable_font_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();

        assert!(FontSource::load(&path).is_err());
    }

    #[test]
    fn test_missing_font_is_rejected() {
        assert!(FontSource::load(Path::new("/nonexistent/font.ttf")).is_err());
    }
}
