//! Cursor/word location for completion.
//!
//! Only the current line up to the caret is examined. The line start is found
//! with a reverse search from the caret, so the cost is bounded by the line
//! length rather than the buffer size.

use crate::mode::Mode;

// ── Context ───────────────────────────────────────────────────────────────

/// Lexical context of the word before the caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Context {
    /// Right after `<` (HTML).
    Tag,
    /// A bare word in element content (HTML).
    Text,
    /// Property name position (CSS).
    Property,
    /// After `prop:` (CSS).
    Value,
    #[default]
    None,
}

/// The word before the caret and its context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Located<'t> {
    pub word: &'t str,
    pub context: Context,
}

impl Located<'_> {
    pub const NONE: Located<'static> = Located { word: "", context: Context::None };
}

// ── Offsets ───────────────────────────────────────────────────────────────

/// Clamp `cursor` into `text` and down to a char boundary.
pub fn clamp_offset(text: &str, cursor: usize) -> usize {
    let mut at = cursor.min(text.len());
    while !text.is_char_boundary(at) {
        at -= 1;
    }
    at
}

/// Text of the caret's line, from line start up to the caret.
pub fn line_prefix(text: &str, cursor: usize) -> &str {
    let before = &text[..clamp_offset(text, cursor)];
    match before.rfind('\n') {
        Some(i) => &before[i + 1..],
        None => before,
    }
}

// ── Character classes ─────────────────────────────────────────────────────

fn is_html_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Identifier or hyphen: CSS words and the span replaced on accept.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Split `s` into `(head, tail)` where `tail` is the longest suffix of
/// characters matching `pred`.
fn split_trailing(s: &str, pred: impl Fn(char) -> bool) -> (&str, &str) {
    let head = s.trim_end_matches(|c: char| pred(c));
    (head, &s[head.len()..])
}

// ── locate ────────────────────────────────────────────────────────────────

/// Find the word being typed at `cursor` and what kind of symbol it names.
pub fn locate(text: &str, cursor: usize, mode: Mode) -> Located<'_> {
    let prefix = line_prefix(text, cursor);
    let located = match mode {
        Mode::Html => locate_html(prefix),
        Mode::Css => locate_css(prefix),
    };
    log::trace!("locate({}) -> {:?}", mode, located);
    located
}

fn locate_html(prefix: &str) -> Located<'_> {
    // Tag names may be custom elements (`my-el`); prose words stop at `-`.
    let (head, name) = split_trailing(prefix, is_word_char);
    if head.ends_with('<') {
        return Located { word: name, context: Context::Tag };
    }
    let (_, word) = split_trailing(prefix, is_html_word_char);
    if !word.is_empty() {
        // Plain words offer tags too.
        Located { word, context: Context::Text }
    } else {
        Located::NONE
    }
}

fn locate_css(prefix: &str) -> Located<'_> {
    let (head, word) = split_trailing(prefix, is_word_char);
    if head.trim_end().ends_with(':') {
        Located { word, context: Context::Value }
    } else if !word.is_empty() {
        Located { word, context: Context::Property }
    } else {
        Located::NONE
    }
}

// ── word_start ────────────────────────────────────────────────────────────

/// Start of the span an accepted suggestion replaces: the same word
/// [`locate`] reported for `context`, plus one `<` in tag context.
pub fn word_start(text: &str, cursor: usize, context: Context) -> usize {
    let before = &text[..clamp_offset(text, cursor)];
    let (head, _) = match context {
        Context::Text => split_trailing(before, is_html_word_char),
        _ => split_trailing(before, is_word_char),
    };
    match context {
        Context::Tag if head.ends_with('<') => head.len() - 1,
        _ => head.len(),
    }
}
