//! Report configuration
//!
//! Everything a document build needs, loadable from a JSON file. All fields
//! have defaults; only the input and output paths must be set before a build.

use crate::error::ConfigError;
use crate::layout::{Arrangement, CoverContent, LayoutOptions};
use crate::lexicon::Lexicon;
use crate::style::DocumentStyle;
use crate::types::{Language, PageFurnitureSpec, SuppressedPages};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Document layout preset
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Cover and interleaved body, no table of contents
    Basic,

    /// Cover, table of contents and one section per language
    #[default]
    Extended,
}

impl Variant {
    pub fn include_toc(self) -> bool {
        matches!(self, Variant::Extended)
    }

    pub fn arrangement(self) -> Arrangement {
        match self {
            Variant::Basic => Arrangement::Interleaved,
            Variant::Extended => Arrangement::Sectioned,
        }
    }

    /// Cover, plus the TOC page when there is one
    pub fn suppressed_pages(self) -> SuppressedPages {
        match self {
            Variant::Basic => SuppressedPages::cover(),
            Variant::Extended => SuppressedPages::cover_and_toc(),
        }
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" | "simple" => Ok(Variant::Basic),
            "extended" | "full" => Ok(Variant::Extended),
            other => Err(ConfigError::Invalid(format!("unknown variant '{}'", other))),
        }
    }
}

/// Full configuration of one report build
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub font_path: Option<PathBuf>,

    pub title: String,
    pub subtitle: String,
    pub tagline: Option<String>,
    pub date: String,
    /// Footer text on every decorated page
    pub disclaimer: String,
    /// Confidentiality notice on the cover
    pub notice: String,

    pub header_logo: Option<PathBuf>,
    pub cover_logo: Option<PathBuf>,

    pub variant: Variant,
    pub lead: Language,
    pub primary_section_title: String,
    pub secondary_section_title: String,
    pub toc_title: String,
    pub primary_tag: String,
    pub secondary_tag: String,

    /// JSON lexicon file; the built-in financial lexicon when unset
    pub lexicon_path: Option<PathBuf>,

    pub style: DocumentStyle,
}

impl Default for ReportConfig {
    fn default() -> Self {
        let layout = LayoutOptions::default();
        Self {
            input_path: PathBuf::new(),
            output_path: PathBuf::new(),
            font_path: None,
            title: "LLMQuant Financial Report".to_string(),
            subtitle: layout.cover.subtitle,
            tagline: Some("Fiscal Year 2025 - First Quarter".to_string()),
            date: current_month(),
            disclaimer: "Confidential - For internal use only. LLMQuant © 2024".to_string(),
            notice: layout.cover.notice,
            header_logo: None,
            cover_logo: None,
            variant: Variant::default(),
            lead: layout.lead,
            primary_section_title: layout.primary_section_title,
            secondary_section_title: layout.secondary_section_title,
            toc_title: layout.toc_title,
            primary_tag: layout.primary_tag,
            secondary_tag: layout.secondary_tag,
            lexicon_path: None,
            style: DocumentStyle::default(),
        }
    }
}

/// Current month as e.g. "February 2024"
pub fn current_month() -> String {
    chrono::Local::now().format("%B %Y").to_string()
}

impl ReportConfig {
    /// Create a config with required fields
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            ..Self::default()
        }
    }

    /// Load a JSON config file; absent fields take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check fields that have no usable default
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("input path is not set".to_string()));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("output path is not set".to_string()));
        }
        if self.primary_tag == self.secondary_tag {
            return Err(ConfigError::Invalid(format!(
                "language tags must differ, both are '{}'",
                self.primary_tag
            )));
        }
        Ok(())
    }

    /// Page furniture for this report
    pub fn furniture(&self) -> PageFurnitureSpec {
        let mut spec = PageFurnitureSpec::new(&self.title, &self.date)
            .with_footer_text(&self.disclaimer)
            .with_suppressed(self.variant.suppressed_pages());
        spec.header_logo = self.header_logo.clone();
        spec.cover_logo = self.cover_logo.clone();
        spec
    }

    /// Layout options for this report
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            include_toc: self.variant.include_toc(),
            arrangement: self.variant.arrangement(),
            lead: self.lead,
            primary_section_title: self.primary_section_title.clone(),
            secondary_section_title: self.secondary_section_title.clone(),
            toc_title: self.toc_title.clone(),
            cover: CoverContent {
                subtitle: self.subtitle.clone(),
                tagline: self.tagline.clone(),
                notice: self.notice.clone(),
            },
            primary_tag: self.primary_tag.clone(),
            secondary_tag: self.secondary_tag.clone(),
        }
    }

    /// The configured lexicon
    pub fn lexicon(&self) -> Result<Lexicon, ConfigError> {
        match &self.lexicon_path {
            Some(path) => Lexicon::from_json_file(path),
            None => Ok(Lexicon::financial()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ReportConfig = serde_json::from_str(
            r#"{"input_path": "report.md", "output_path": "out/report.pdf", "variant": "basic"}"#,
        )
        .unwrap();

        assert_eq!(config.input_path, PathBuf::from("report.md"));
        assert_eq!(config.variant, Variant::Basic);
        assert_eq!(config.primary_section_title, "中文版");
        assert_eq!(config.secondary_tag, "en");
        assert!(!config.date.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_variant_presets() {
        let basic = ReportConfig {
            variant: Variant::Basic,
            ..ReportConfig::new("a.md", "a.pdf")
        };
        let options = basic.layout_options();
        assert!(!options.include_toc);
        assert_eq!(options.arrangement, Arrangement::Interleaved);
        assert!(basic.furniture().suppressed.contains(1));
        assert!(!basic.furniture().suppressed.contains(2));

        let extended = ReportConfig::new("a.md", "a.pdf");
        assert!(extended.layout_options().include_toc);
        assert!(extended.furniture().suppressed.contains(2));
        assert!(!extended.furniture().suppressed.contains(3));
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!("Basic".parse::<Variant>().unwrap(), Variant::Basic);
        assert_eq!("extended".parse::<Variant>().unwrap(), Variant::Extended);
        assert!("fancy".parse::<Variant>().is_err());
    }

    #[test]
    fn test_validate_requires_paths() {
        assert!(ReportConfig::default().validate().is_err());

        let clashing = ReportConfig {
            secondary_tag: "zh".to_string(),
            ..ReportConfig::new("a.md", "a.pdf")
        };
        assert!(matches!(clashing.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_config_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            ReportConfig::from_json_file(&missing),
            Err(ConfigError::Read { .. })
        ));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(
            ReportConfig::from_json_file(&broken),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_furniture_carries_logos_and_footer() {
        let config = ReportConfig {
            header_logo: Some(PathBuf::from("logo-short.png")),
            cover_logo: Some(PathBuf::from("logo-b.png")),
            ..ReportConfig::new("a.md", "a.pdf")
        };
        let spec = config.furniture();
        assert_eq!(spec.header_logo, Some(PathBuf::from("logo-short.png")));
        assert_eq!(spec.cover_logo, Some(PathBuf::from("logo-b.png")));
        assert_eq!(spec.footer_text, config.disclaimer);
        assert_eq!(spec.title, "LLMQuant Financial Report");
    }
}
