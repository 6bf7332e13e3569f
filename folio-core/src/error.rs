//! Error types for Folio Core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using ReportError
pub type Result<T> = std::result::Result<T, ReportError>;

/// Top-level error type for a document build
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Input unavailable: {}: {source}", .path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while turning the render stream into a document
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Block {ordinal} contains {ch:?}, which the font cannot encode")]
    UnencodableGlyph { ordinal: usize, ch: char },

    #[error("Rendering engine failed{}: {message}", describe_ordinal(.ordinal))]
    Engine {
        ordinal: Option<usize>,
        message: String,
    },

    #[error("No usable font: {0}")]
    NoFont(String),
}

fn describe_ordinal(ordinal: &Option<usize>) -> String {
    match ordinal {
        Some(ordinal) => format!(" at block {}", ordinal),
        None => String::new(),
    }
}

/// Missing or unreadable assets; always recovered with a fallback
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Asset not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("Asset unreadable: {}: {message}", .path.display())]
    Unreadable { path: PathBuf, message: String },
}

/// Errors loading configuration or lexicon files
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_mentions_ordinal() {
        let err = RenderError::Engine {
            ordinal: Some(12),
            message: "page overflow".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Rendering engine failed at block 12: page overflow"
        );

        let err = RenderError::Engine {
            ordinal: None,
            message: "page overflow".to_string(),
        };
        assert_eq!(err.to_string(), "Rendering engine failed: page overflow");
    }

    #[test]
    fn test_glyph_error_display() {
        let err = RenderError::UnencodableGlyph { ordinal: 3, ch: '苹' };
        assert_eq!(
            err.to_string(),
            "Block 3 contains '苹', which the font cannot encode"
        );
    }
}
