//! Page-number insertion pass

use crate::types::{RenderItem, RenderStream};

/// Build a new stream with a `PageNumber` after every `PageBreak` and one at
/// the very end, unless the stream already ends with one.
pub fn paginate(stream: RenderStream) -> RenderStream {
    let mut out = Vec::with_capacity(stream.len() + stream.page_breaks() + 1);

    for item in stream {
        let is_break = item.is_page_break();
        out.push(item);
        if is_break {
            out.push(RenderItem::PageNumber);
        }
    }

    // A trailing break already got its marker above
    if !out.last().map(RenderItem::is_page_number).unwrap_or(false) {
        out.push(RenderItem::PageNumber);
    }

    RenderStream::from(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TextRole;

    fn text(s: &str) -> RenderItem {
        RenderItem::text(s, TextRole::SectionTitle)
    }

    fn is_well_numbered(stream: &RenderStream) -> bool {
        let items = stream.items();
        let breaks_ok = items
            .windows(2)
            .filter(|w| w[0].is_page_break())
            .all(|w| w[1].is_page_number());
        breaks_ok && items.last().map(RenderItem::is_page_number).unwrap_or(false)
    }

    #[test]
    fn test_marker_after_each_break() {
        let stream = RenderStream::from(vec![
            text("a"),
            RenderItem::PageBreak,
            text("b"),
            RenderItem::PageBreak,
            text("c"),
        ]);
        let out = paginate(stream);

        assert_eq!(
            out.items(),
            &[
                text("a"),
                RenderItem::PageBreak,
                RenderItem::PageNumber,
                text("b"),
                RenderItem::PageBreak,
                RenderItem::PageNumber,
                text("c"),
                RenderItem::PageNumber,
            ]
        );
        assert!(is_well_numbered(&out));
    }

    #[test]
    fn test_existing_final_marker_is_kept_single() {
        let stream = RenderStream::from(vec![text("a"), RenderItem::PageNumber]);
        let out = paginate(stream);
        assert_eq!(out.items(), &[text("a"), RenderItem::PageNumber]);
    }

    #[test]
    fn test_trailing_break() {
        let out = paginate(RenderStream::from(vec![text("a"), RenderItem::PageBreak]));
        assert_eq!(
            out.items(),
            &[text("a"), RenderItem::PageBreak, RenderItem::PageNumber]
        );
    }

    #[test]
    fn test_empty_stream() {
        let out = paginate(RenderStream::new());
        assert_eq!(out.items(), &[RenderItem::PageNumber]);
    }
}
