//! Greedy word wrap against per-glyph widths.

use crate::layout::font_metrics::FontMetricTable;

/// Wraps `text` into lines no wider than `max_width_pt` at `size_pt`.
///
/// - `\n` always starts a new line; an empty paragraph yields an empty line.
/// - Runs of spaces collapse to one between words.
/// - A word wider than the whole line is broken at character boundaries.
///
/// Empty input returns no lines.
pub fn wrap_text(
    text: &str,
    metrics: &FontMetricTable,
    size_pt: f32,
    max_width_pt: f32,
) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let space_w = metrics.width_pt(" ", size_pt);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in paragraph.split_whitespace() {
            let word_w = metrics.width_pt(word, size_pt);

            if word_w > max_width_pt {
                // Flush what we have, then hard-break the long word.
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let mut pieces = break_word(word, metrics, size_pt, max_width_pt);
                // The last piece stays open so following words can join it.
                let tail = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
                current_width = metrics.width_pt(&tail, size_pt);
                current = tail;
                continue;
            }

            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
            } else if current_width + space_w + word_w > max_width_pt {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space_w + word_w;
            }
        }
        lines.push(current);
    }

    lines
}

/// Splits a single over-long word into pieces that each fit `max_width_pt`.
/// Every piece holds at least one character.
fn break_word(word: &str, metrics: &FontMetricTable, size_pt: f32, max_width_pt: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0_f32;

    for c in word.chars() {
        let w = metrics.char_width(c) * size_pt;
        if !piece.is_empty() && width + w > max_width_pt {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(c);
        width += w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}
