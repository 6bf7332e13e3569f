//! Line breaking for mixed CJK and Latin text
//!
//! Breaks happen at Unicode word boundaries, which fall between any two
//! ideographs and around Latin words. Closing punctuation is never moved to
//! the start of a line.

use unicode_segmentation::UnicodeSegmentation;

/// Punctuation that must stay on the line it closes
const NO_BREAK_BEFORE: &[char] = &[
    '，', '。', '、', '：', '；', '！', '？', '）', '》', '」', '』', '”', '’', ',', '.', ':',
    ';', '!', '?', ')', '%', '％',
];

/// Greedily break `text` into lines for which `fits` holds.
///
/// A segment that does not fit on an empty line is split by characters;
/// a single character that still does not fit gets a line of its own.
pub fn wrap_text(text: &str, fits: impl Fn(&str) -> bool) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for segment in text.split_word_bounds() {
        if line.is_empty() && segment.trim().is_empty() {
            continue;
        }

        let mut candidate = line.clone();
        candidate.push_str(segment);
        if fits(candidate.trim_end()) || (sticks_to_previous(segment) && !line.is_empty()) {
            line = candidate;
            continue;
        }

        if !line.trim().is_empty() {
            lines.push(line.trim_end().to_string());
        }
        line = String::new();

        let segment = segment.trim_start();
        if segment.is_empty() {
            continue;
        }
        if fits(segment) {
            line.push_str(segment);
        } else {
            for ch in segment.chars() {
                let mut candidate = line.clone();
                candidate.push(ch);
                if line.is_empty() || fits(&candidate) {
                    line = candidate;
                } else {
                    lines.push(std::mem::take(&mut line));
                    line.push(ch);
                }
            }
        }
    }

    if !line.trim().is_empty() {
        lines.push(line.trim_end().to_string());
    }
    lines
}

fn sticks_to_previous(segment: &str) -> bool {
    let mut chars = segment.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if NO_BREAK_BEFORE.contains(&c))
}
