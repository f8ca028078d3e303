//! Tokenizer and highlighter.
//!
//! Each mode has a single-pass scanner that splits the source into a flat list
//! of classified [`Run`]s. Runs tile the source exactly: concatenating their
//! text gives back the input, so rendering can never add or drop characters.
//! Markup is produced from the runs in one pass by [`crate::markup`].

mod css;
mod html;

use crate::markup;
use crate::mode::Mode;
use crate::theme::{Theme, TokenClass};

// ── Run ───────────────────────────────────────────────────────────────────

/// A classified slice of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run<'s> {
    /// Byte offset of `text` in the source.
    pub start: usize,
    pub text: &'s str,
    pub class: TokenClass,
}

impl Run<'_> {
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

// ── Entry points ──────────────────────────────────────────────────────────

/// Split `src` into classified runs for `mode`.
pub fn tokenize(src: &str, mode: Mode) -> Vec<Run<'_>> {
    let runs = match mode {
        Mode::Html => html::scan(src),
        Mode::Css => css::scan(src),
    };
    log::trace!("tokenized {} bytes of {} into {} runs", src.len(), mode, runs.len());
    runs
}

/// Highlight `src` with the default theme.
pub fn highlight(src: &str, mode: Mode) -> String {
    highlight_with(src, mode, &Theme::default())
}

pub fn highlight_with(src: &str, mode: Mode, theme: &Theme) -> String {
    markup::render_runs(&tokenize(src, mode), theme)
}

// ── Unterminated constructs ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnterminatedKind {
    Comment,
    String,
}

/// A comment or string that runs to end of buffer (or line) without closing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unterminated {
    /// Byte offset of the opening delimiter.
    pub offset: usize,
    pub kind: UnterminatedKind,
}

pub fn unterminated(src: &str, mode: Mode) -> Vec<Unterminated> {
    let (open, close) = match mode {
        Mode::Html => ("<!--", "-->"),
        Mode::Css => ("/*", "*/"),
    };
    tokenize(src, mode)
        .into_iter()
        .filter_map(|run| {
            let kind = match run.class {
                TokenClass::Comment
                    if run.text.len() < open.len() + close.len() || !run.text.ends_with(close) =>
                {
                    UnterminatedKind::Comment
                }
                TokenClass::String if !string_closed(run.text) => UnterminatedKind::String,
                _ => return None,
            };
            Some(Unterminated { offset: run.start, kind })
        })
        .collect()
}

fn string_closed(text: &str) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open), Some(close)) => open == close,
        _ => false,
    }
}

// ── Scanner ───────────────────────────────────────────────────────────────

/// Cursor over the source shared by the mode scanners.
pub(crate) struct Scanner<'s> {
    src: &'s str,
    pos: usize,
    runs: Vec<Run<'s>>,
}

impl<'s> Scanner<'s> {
    pub(crate) fn new(src: &'s str) -> Self {
        Self { src, pos: 0, runs: Vec::new() }
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn rest(&self) -> &'s str {
        &self.src[self.pos..]
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Emit `src[pos..end]` as one run of `class` and advance to `end`.
    ///
    /// Adjacent plain runs are merged.
    pub(crate) fn emit_to(&mut self, end: usize, class: TokenClass) {
        let end = end.min(self.src.len());
        if end <= self.pos {
            return;
        }
        if class == TokenClass::Plain {
            if let Some(last) = self.runs.last_mut() {
                if last.class == TokenClass::Plain && last.end() == self.pos {
                    last.text = &self.src[last.start..end];
                    self.pos = end;
                    return;
                }
            }
        }
        self.runs.push(Run { start: self.pos, text: &self.src[self.pos..end], class });
        self.pos = end;
    }

    /// Emit the next `len` bytes.
    #[inline]
    pub(crate) fn emit(&mut self, len: usize, class: TokenClass) {
        self.emit_to(self.pos + len, class);
    }

    /// Emit the next character on its own.
    pub(crate) fn emit_char(&mut self, class: TokenClass) {
        if let Some(c) = self.peek() {
            self.emit(c.len_utf8(), class);
        }
    }

    /// Emit a block comment opened at the current position: everything up to
    /// and including `close`, or the rest of the source when unterminated.
    pub(crate) fn emit_comment(&mut self, open: &str, close: &str) {
        let body = &self.rest()[open.len()..];
        let len = body
            .find(close)
            .map(|i| open.len() + i + close.len())
            .unwrap_or(self.rest().len());
        self.emit(len, TokenClass::Comment);
    }

    pub(crate) fn finish(self) -> Vec<Run<'s>> {
        debug_assert_eq!(self.pos, self.src.len());
        self.runs
    }
}

/// Length of a quoted string starting at `rest[0]`, and whether it closed.
///
/// Strings never cross a newline: an unclosed string stops before it.
pub(crate) fn quoted_len(rest: &str, quote: char) -> (usize, bool) {
    let body = &rest[quote.len_utf8()..];
    match body.find(|c: char| c == quote || c == '\n') {
        Some(i) if body[i..].starts_with(quote) => (1 + i + 1, true),
        Some(i) => (1 + i, false),
        None => (rest.len(), false),
    }
}
