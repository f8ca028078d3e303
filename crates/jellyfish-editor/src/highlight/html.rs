use super::{quoted_len, Run, Scanner};
use crate::theme::TokenClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Element content between tags.
    Text,
    /// Inside a start or end tag, after its name.
    Tag,
}

/// Scan HTML source.
///
/// Comments are consumed whole before anything else can look at them. Tag
/// state survives newlines so multi-line start tags keep their attribute
/// coloring; strings never cross a line.
pub(super) fn scan(src: &str) -> Vec<Run<'_>> {
    let mut s = Scanner::new(src);
    let mut state = State::Text;

    while let Some(ch) = s.peek() {
        let rest = s.rest();

        if rest.starts_with("<!--") {
            s.emit_comment("<!--", "-->");
            continue;
        }
        if let Some(bracket) = tag_open_len(rest) {
            s.emit(bracket, TokenClass::TagBracket);
            s.emit(tag_name_len(s.rest()), TokenClass::TagName);
            state = State::Tag;
            continue;
        }

        match state {
            State::Text => match ch {
                '"' | '\'' => match text_string_len(rest, ch) {
                    Some(len) => s.emit(len, TokenClass::String),
                    None => s.emit_char(TokenClass::Plain),
                },
                _ => {
                    // `ch` itself is never a stop character here.
                    let len = rest[ch.len_utf8()..]
                        .find(|c: char| matches!(c, '<' | '"' | '\''))
                        .map(|i| i + ch.len_utf8())
                        .unwrap_or(rest.len());
                    s.emit(len, TokenClass::Plain);
                }
            },
            State::Tag => match ch {
                '>' => {
                    s.emit(1, TokenClass::TagBracket);
                    state = State::Text;
                }
                '/' if rest.starts_with("/>") => {
                    s.emit(2, TokenClass::TagBracket);
                    state = State::Text;
                }
                '"' | '\'' => s.emit(quoted_len(rest, ch).0, TokenClass::String),
                c if is_attr_char(c) => {
                    let len = rest.find(|c: char| !is_attr_char(c)).unwrap_or(rest.len());
                    s.emit(len, TokenClass::AttrName);
                }
                _ => s.emit_char(TokenClass::Plain),
            },
        }
    }

    s.finish()
}

/// A quote in element content is a string only when it closes on the same
/// line with no tag or comment opening in between. Apostrophes in prose
/// never hide markup.
fn text_string_len(rest: &str, quote: char) -> Option<usize> {
    match quoted_len(rest, quote) {
        (len, true) if !opens_markup(&rest[quote.len_utf8()..len - quote.len_utf8()]) => Some(len),
        _ => None,
    }
}

fn opens_markup(s: &str) -> bool {
    s.match_indices('<')
        .any(|(i, _)| s[i..].starts_with("<!--") || tag_open_len(&s[i..]).is_some())
}

/// Length of `<`, `</` or `<!` when it opens a tag (a letter must follow).
fn tag_open_len(rest: &str) -> Option<usize> {
    let mut chars = rest.chars();
    if chars.next()? != '<' {
        return None;
    }
    match chars.next()? {
        '/' | '!' if chars.next()?.is_ascii_alphabetic() => Some(2),
        c if c.is_ascii_alphabetic() => Some(1),
        _ => None,
    }
}

fn tag_name_len(rest: &str) -> usize {
    rest.find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(rest.len())
}

fn is_attr_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '@' | '.')
}
