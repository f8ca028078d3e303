//! Conversions between LSP positions and engine byte offsets.
//!
//! LSP columns count UTF-16 code units; the engine works in UTF-8 byte
//! offsets. Positions past the end of a line clamp to the line end, and lines
//! past the end of the document clamp to the document end.

use jellyfish_editor::locator::is_word_char;
use tower_lsp::lsp_types::Position;

// ── Position ↔ offset ─────────────────────────────────────────────────────────

/// Byte offset of `pos` in `text`.
pub fn offset_at(text: &str, pos: &Position) -> usize {
    let mut line_start = 0;
    for _ in 0..pos.line {
        match text[line_start..].find('\n') {
            Some(i) => line_start += i + 1,
            None => return text.len(),
        }
    }
    let line_end = text[line_start..].find('\n').map_or(text.len(), |i| line_start + i);

    let mut units = 0u32;
    for (i, ch) in text[line_start..line_end].char_indices() {
        if units >= pos.character {
            return line_start + i;
        }
        units += ch.len_utf16() as u32;
    }
    line_end
}

/// LSP position of byte `offset` in `text`.
pub fn position_at(text: &str, offset: usize) -> Position {
    let offset = jellyfish_editor::locator::clamp_offset(text, offset);
    let before = &text[..offset];
    let line = before.bytes().filter(|&b| b == b'\n').count() as u32;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let character = before[line_start..].encode_utf16().count() as u32;
    Position::new(line, character)
}

// ── word_at ───────────────────────────────────────────────────────────────────

/// Extract the identifier (or partial identifier) that contains or immediately
/// precedes the cursor. Hyphens count, so `background-color` is one word.
///
/// Returns a sub-slice of `text`.
pub fn word_at<'t>(text: &'t str, pos: &Position) -> Option<&'t str> {
    let at = offset_at(text, pos);
    let start = text[..at]
        .rfind(|c: char| !is_word_char(c))
        .map_or(0, |i| i + 1);
    let end = text[at..]
        .find(|c: char| !is_word_char(c))
        .map_or(text.len(), |i| at + i);

    if start < end { Some(&text[start..end]) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_round_trip() {
        let text = "<p>\n  <di\n";
        let pos = Position::new(1, 5);
        assert_eq!(offset_at(text, &pos), 9);
        assert_eq!(position_at(text, 9), pos);
    }

    #[test]
    fn utf16_columns() {
        // `é` is one UTF-16 unit but two bytes; `😀` is two units, four bytes.
        let text = "é😀x";
        assert_eq!(offset_at(text, &Position::new(0, 1)), 2);
        assert_eq!(offset_at(text, &Position::new(0, 3)), 6);
        assert_eq!(position_at(text, 6), Position::new(0, 3));
    }

    #[test]
    fn positions_clamp() {
        let text = "ab\ncd";
        assert_eq!(offset_at(text, &Position::new(0, 99)), 2);
        assert_eq!(offset_at(text, &Position::new(7, 0)), 5);
        assert_eq!(position_at(text, 99), Position::new(1, 2));
    }

    #[test]
    fn word_under_cursor() {
        let text = "p {\n  background-color: red;\n}";
        assert_eq!(word_at(text, &Position::new(1, 4)), Some("background-color"));
        assert_eq!(word_at(text, &Position::new(1, 20)), Some("red"));
        assert_eq!(word_at(text, &Position::new(0, 2)), None);
    }
}
