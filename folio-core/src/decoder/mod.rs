//! Decoders for converting source markup into content blocks

mod markdown;

pub use markdown::MarkdownDecoder;
