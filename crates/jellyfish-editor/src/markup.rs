//! Rendering runs to display markup, and stripping it back to text.
//!
//! The display layer receives escaped text with one `<span>` per classified
//! run. Runs that cross a newline are split so every line is self-contained,
//! and an empty line gets a non-collapsing placeholder so row heights match
//! the gutter.

use crate::highlight::Run;
use crate::theme::{Theme, TokenClass};

/// Placeholder rendered for an empty line.
pub const BLANK_LINE: &str = "<span class=\"jf-blank\">&nbsp;</span>";

/// Render runs into markup. Newlines are kept as literal `\n`.
pub fn render_runs(runs: &[Run<'_>], theme: &Theme) -> String {
    let len: usize = runs.iter().map(|r| r.text.len()).sum();
    let mut out = String::with_capacity(len * 2 + BLANK_LINE.len());
    let mut line_empty = true;

    for run in runs {
        for (i, piece) in run.text.split('\n').enumerate() {
            if i > 0 {
                if line_empty {
                    out.push_str(BLANK_LINE);
                }
                out.push('\n');
                line_empty = true;
            }
            if piece.is_empty() {
                continue;
            }
            line_empty = false;
            match run.class {
                TokenClass::Plain => escape_into(&mut out, piece),
                class => {
                    out.push_str("<span class=\"jf-");
                    out.push_str(class.name());
                    out.push_str("\" style=\"color:");
                    out.push_str(theme.color(class));
                    out.push_str("\">");
                    escape_into(&mut out, piece);
                    out.push_str("</span>");
                }
            }
        }
    }
    if line_empty {
        out.push_str(BLANK_LINE);
    }
    out
}

/// Render `src` as unhighlighted text, with the same line structure.
pub fn plain(src: &str, theme: &Theme) -> String {
    render_runs(&[Run { start: 0, text: src, class: TokenClass::Plain }], theme)
}

pub fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

/// Inverse of [`render_runs`]: drop tags and blank placeholders, decode
/// entities.
pub fn strip_markup(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;

    while let Some(ch) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix(BLANK_LINE) {
            rest = after;
            continue;
        }
        match ch {
            '<' => {
                rest = match rest.find('>') {
                    Some(i) => &rest[i + 1..],
                    None => "",
                };
            }
            '&' => {
                let decoded = ENTITIES
                    .iter()
                    .find(|(name, _)| rest.starts_with(name));
                match decoded {
                    Some((name, ch)) => {
                        out.push(*ch);
                        rest = &rest[name.len()..];
                    }
                    None => {
                        out.push('&');
                        rest = &rest[1..];
                    }
                }
            }
            c => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    out
}

const ENTITIES: &[(&str, char)] = &[
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&#39;", '\''),
    ("&nbsp;", '\u{a0}'),
];
