//! Markdown decoder implementation
//!
//! Markdown is rendered to HTML first and the top-level HTML nodes are then
//! classified one by one, in document order.

use crate::types::{BlockKind, ContentBlock};
use ego_tree::NodeRef;
use pulldown_cmark::{html, Options, Parser};
use scraper::{Html, Node};

/// Decoder turning markdown into an ordered sequence of content blocks
pub struct MarkdownDecoder {
    /// Whether to enable tables extension
    enable_tables: bool,
    /// Whether to enable strikethrough extension
    enable_strikethrough: bool,
}

impl MarkdownDecoder {
    pub fn new() -> Self {
        Self {
            enable_tables: true,
            enable_strikethrough: true,
        }
    }

    /// Enable or disable tables parsing
    pub fn with_tables(mut self, enable: bool) -> Self {
        self.enable_tables = enable;
        self
    }

    /// Enable or disable strikethrough parsing
    pub fn with_strikethrough(mut self, enable: bool) -> Self {
        self.enable_strikethrough = enable;
        self
    }

    fn get_parser_options(&self) -> Options {
        let mut options = Options::empty();
        if self.enable_tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.enable_strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        options
    }

    /// Render markdown to the intermediate HTML representation
    pub fn to_html(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.get_parser_options());
        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, parser);
        output
    }

    /// Parse markdown into content blocks. Never fails: anything that cannot
    /// be classified becomes plain text.
    pub fn parse(&self, markdown: &str) -> Vec<ContentBlock> {
        let html = self.to_html(markdown);
        let fragment = Html::parse_fragment(&html);

        let mut state = ParserState::new();
        for node in fragment.root_element().children() {
            self.process_node(node, &mut state);
        }

        state.blocks
    }

    /// Classify one top-level node
    fn process_node(&self, node: NodeRef<Node>, state: &mut ParserState) {
        match node.value() {
            Node::Element(el) => match el.name() {
                "h1" | "h2" | "h3" => {
                    let level = el.name().as_bytes()[1] - b'0';
                    if let Some(kind) = BlockKind::heading(level) {
                        state.push(kind, &text_content(node));
                    }
                }
                "p" => {
                    let kind = if has_emphasis(node) {
                        BlockKind::Quote
                    } else {
                        BlockKind::Paragraph
                    };
                    state.push(kind, &text_content(node));
                }
                "ul" => self.process_list(node, state),
                other => {
                    tracing::debug!("Downgrading unmodeled <{}> element to plain text", other);
                    state.push(BlockKind::PlainText, &text_content(node));
                }
            },
            Node::Text(text) => state.push(BlockKind::PlainText, text),
            _ => {}
        }
    }

    /// Flatten an unordered list into one block per item
    fn process_list(&self, node: NodeRef<Node>, state: &mut ParserState) {
        for child in node.children() {
            let is_item = child
                .value()
                .as_element()
                .map(|el| el.name() == "li")
                .unwrap_or(false);
            if is_item {
                state.push_list_item(&text_content(child));
            }
        }
    }
}

impl Default for MarkdownDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Parser state for tracking context during parsing
struct ParserState {
    blocks: Vec<ContentBlock>,
}

impl ParserState {
    fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    fn push(&mut self, kind: BlockKind, raw: &str) {
        let text = normalize_whitespace(raw);
        if !text.is_empty() {
            let ordinal = self.blocks.len();
            self.blocks.push(ContentBlock::new(kind, text, ordinal));
        }
    }

    fn push_list_item(&mut self, raw: &str) {
        let text = normalize_whitespace(raw);
        if !text.is_empty() {
            let ordinal = self.blocks.len();
            self.blocks.push(ContentBlock::list_item(&text, ordinal));
        }
    }
}

/// Whether the node contains an `<em>` element
fn has_emphasis(node: NodeRef<Node>) -> bool {
    node.descendants().any(|d| {
        d.value()
            .as_element()
            .map(|el| el.name() == "em")
            .unwrap_or(false)
    })
}

/// Concatenated text of all descendant text nodes
fn text_content(node: NodeRef<Node>) -> String {
    let mut text = String::new();
    for descendant in node.descendants() {
        if let Node::Text(t) = descendant.value() {
            text.push_str(t);
        }
    }
    text
}

/// Trim and collapse whitespace runs (soft breaks) to single spaces
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(blocks: &[ContentBlock]) -> Vec<BlockKind> {
        blocks.iter().map(|b| b.kind).collect()
    }

    #[test]
    fn test_parse_simple_markdown() {
        let decoder = MarkdownDecoder::new();
        let blocks = decoder.parse("# Hello World\n\nThis is a paragraph.");

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], ContentBlock::new(BlockKind::Heading1, "Hello World", 0));
        assert_eq!(
            blocks[1],
            ContentBlock::new(BlockKind::Paragraph, "This is a paragraph.", 1)
        );
    }

    #[test]
    fn test_heading_levels() {
        let decoder = MarkdownDecoder::new();
        let blocks = decoder.parse("# 一\n\n## 二\n\n### 三");
        assert_eq!(
            kinds(&blocks),
            vec![BlockKind::Heading1, BlockKind::Heading2, BlockKind::Heading3]
        );
    }

    #[test]
    fn test_strong_is_not_a_quote() {
        let decoder = MarkdownDecoder::new();
        let blocks = decoder.parse("# Title\n\nSome **text**\n");

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text, "Title");
        assert_eq!(blocks[1].kind, BlockKind::Paragraph);
        assert_eq!(blocks[1].text, "Some text");
    }

    #[test]
    fn test_emphasis_becomes_quote() {
        let decoder = MarkdownDecoder::new();
        let blocks = decoder.parse("*text*\n\n蒂姆·库克表示：*我们很自豪*。");

        assert_eq!(blocks[0], ContentBlock::new(BlockKind::Quote, "text", 0));
        assert_eq!(blocks[1].kind, BlockKind::Quote);
        assert_eq!(blocks[1].text, "蒂姆·库克表示：我们很自豪。");
    }

    #[test]
    fn test_list_is_flattened() {
        let decoder = MarkdownDecoder::new();
        let blocks = decoder.parse("- Item 1\n- Item 2\n- Item 3");

        assert_eq!(blocks.len(), 3);
        assert!(blocks.iter().all(|b| b.kind == BlockKind::ListItem));
        assert_eq!(blocks[0].text, "• Item 1");
        assert_eq!(blocks[2].text, "• Item 3");
        assert_eq!(
            blocks.iter().map(|b| b.ordinal).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_loose_list_items_keep_their_text() {
        let decoder = MarkdownDecoder::new();
        let blocks = decoder.parse("- 美洲\n\n- 欧洲\n");

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text, "• 美洲");
        assert_eq!(blocks[1].text, "• 欧洲");
    }

    #[test]
    fn test_empty_list_item_is_dropped() {
        let decoder = MarkdownDecoder::new();
        let blocks = decoder.parse("- foo\n-\n- bar\n");

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].text, "• bar");
        assert_eq!(blocks[1].ordinal, 1);
    }

    #[test]
    fn test_unmodeled_elements_degrade_to_plain_text() {
        let decoder = MarkdownDecoder::new();
        let blocks = decoder.parse("#### Deep\n\n1. one\n2. two\n\n```\ncode\n```");

        assert_eq!(
            kinds(&blocks),
            vec![
                BlockKind::PlainText,
                BlockKind::PlainText,
                BlockKind::PlainText
            ]
        );
        assert_eq!(blocks[0].text, "Deep");
        assert_eq!(blocks[1].text, "one two");
        assert_eq!(blocks[2].text, "code");
    }

    #[test]
    fn test_whitespace_only_input() {
        let decoder = MarkdownDecoder::new();
        assert!(decoder.parse("").is_empty());
        assert!(decoder.parse("   \n\n\t\n").is_empty());
    }

    #[test]
    fn test_soft_breaks_collapse() {
        let decoder = MarkdownDecoder::new();
        let blocks = decoder.parse("first line\nsecond line");

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "first line second line");
    }

    #[test]
    fn test_strikethrough_extension_toggle() {
        let html = MarkdownDecoder::new().to_html("~~gone~~");
        assert!(html.contains("<del>"));

        let html = MarkdownDecoder::new()
            .with_strikethrough(false)
            .to_html("~~gone~~");
        assert!(!html.contains("<del>"));
    }

    #[test]
    fn test_table_degrades_to_plain_text() {
        let decoder = MarkdownDecoder::new();
        let blocks = decoder.parse("| A | B |\n|---|---|\n| 1 | 2 |");

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::PlainText);
        assert!(blocks[0].text.contains('A'));
        assert!(blocks[0].text.contains('2'));
    }

    #[test]
    fn test_tables_extension_toggle() {
        let table = "| A | B |\n|---|---|\n| 1 | 2 |";
        assert!(MarkdownDecoder::new().to_html(table).contains("<table>"));

        let blocks = MarkdownDecoder::new().with_tables(false).parse(table);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Paragraph);
        assert!(blocks[0].text.starts_with("| A | B |"));
    }
}
