use super::{Run, Scanner};
use crate::theme::TokenClass;

/// Scan CSS source.
///
/// Every stretch of text between `{`, `;` and `}` is classified by looking
/// ahead to its terminator: a segment closed by `{` is a selector, one that
/// holds a `:` is a declaration, anything else is a selector at top level or a
/// property inside a block. The lookahead skips comments and strings and the
/// scanner then consumes exactly that segment, so the pass stays linear.
pub(super) fn scan(src: &str) -> Vec<Run<'_>> {
    let mut s = Scanner::new(src);
    let mut depth = 0usize;

    while let Some(ch) = s.peek() {
        let rest = s.rest();
        if rest.starts_with("/*") {
            s.emit_comment("/*", "*/");
            continue;
        }
        match ch {
            '{' => {
                s.emit(1, TokenClass::Punctuation);
                depth += 1;
            }
            '}' => {
                s.emit(1, TokenClass::Punctuation);
                depth = depth.saturating_sub(1);
            }
            ';' => s.emit(1, TokenClass::Punctuation),
            c if c.is_whitespace() => {
                let len = rest.find(|c: char| !c.is_whitespace()).unwrap_or(rest.len());
                s.emit(len, TokenClass::Plain);
            }
            _ => segment(&mut s, depth),
        }
    }

    s.finish()
}

fn segment(s: &mut Scanner<'_>, depth: usize) {
    let rest = s.rest();
    let len = find_outside(rest, |b| matches!(b, b'{' | b';' | b'}')).unwrap_or(rest.len());
    let end = s.pos() + len;
    let seg = &rest[..len];

    if rest[len..].starts_with('{') {
        words(s, end, TokenClass::Selector);
        return;
    }
    match find_outside(seg, |b| b == b':') {
        Some(colon) => {
            let colon = s.pos() + colon;
            words(s, colon, TokenClass::Property);
            s.emit(1, TokenClass::Punctuation);
            words(s, end, TokenClass::Value);
        }
        None if depth == 0 => words(s, end, TokenClass::Selector),
        None => words(s, end, TokenClass::Property),
    }
}

/// Emit everything up to `end`: whitespace plain, comments as comments, and
/// each remaining word as `class`.
fn words(s: &mut Scanner<'_>, end: usize, class: TokenClass) {
    while s.pos() < end {
        let rest = s.rest();
        let limit = end - s.pos();
        if rest.starts_with("/*") {
            s.emit_comment("/*", "*/");
            continue;
        }
        let Some(ch) = s.peek() else { return };
        let window = &rest[..limit];
        if ch.is_whitespace() {
            let len = window.find(|c: char| !c.is_whitespace()).unwrap_or(limit);
            s.emit(len, TokenClass::Plain);
        } else {
            let len = window
                .char_indices()
                .skip(1)
                .find(|&(i, c)| c.is_whitespace() || window[i..].starts_with("/*"))
                .map(|(i, _)| i)
                .unwrap_or(limit);
            s.emit(len, class);
        }
    }
}

/// Byte index of the first byte matching `stop` outside comments and quoted
/// strings. Strings end at their closing quote or the end of their line.
fn find_outside(text: &str, stop: impl Fn(u8) -> bool) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = text[i + 2..]
                    .find("*/")
                    .map(|j| i + 2 + j + 2)
                    .unwrap_or(bytes.len());
            }
            q @ (b'"' | b'\'') => {
                i = match text[i + 1..].find(|c: char| c == q as char || c == '\n') {
                    Some(j) if bytes[i + 1 + j] == q => i + 1 + j + 1,
                    Some(j) => i + 1 + j,
                    None => bytes.len(),
                };
            }
            b if stop(b) => return Some(i),
            _ => i += 1,
        }
    }
    None
}
