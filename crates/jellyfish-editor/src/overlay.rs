//! Overlay model: a transparent input layer stacked on a highlighted display
//! layer, with a line-number gutter beside them.
//!
//! The three surfaces share one [`LayerStyle`]; the input layer owns the
//! scroll position and every scroll is copied to the others in the same call.
//! Any toolkit with absolute positioning and scroll events can render this.

use std::ops::RangeInclusive;

use crate::error::EditorError;
use crate::locator::{clamp_offset, line_prefix};

// ── Geometry ──────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ScrollOffset {
    pub top: f32,
    pub left: f32,
}

/// Font and box metrics that must match across layers.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerStyle {
    pub font_family: String,
    pub font_size: f32,
    pub line_height: f32,
    /// Uniform inner padding (logical px).
    pub padding: f32,
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            font_family: "ui-monospace, SFMono-Regular, Menlo, Consolas, monospace".to_string(),
            font_size: 14.0,
            line_height: 21.0,
            padding: 12.0,
        }
    }
}

// ── Layers ────────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LayerKind {
    /// Editable, transparent glyphs, visible caret.
    Input,
    /// Highlighted text behind the input.
    Display,
    /// Line numbers.
    Gutter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub kind: LayerKind,
    pub style: LayerStyle,
    pub scroll: ScrollOffset,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    input: Layer,
    display: Layer,
    gutter: Layer,
}

impl Overlay {
    pub fn new(style: LayerStyle) -> Self {
        let layer = |kind: LayerKind| Layer { kind, style: style.clone(), scroll: ScrollOffset::default() };
        Self {
            input: layer(LayerKind::Input),
            display: layer(LayerKind::Display),
            gutter: layer(LayerKind::Gutter),
        }
    }

    pub fn layer(&self, kind: LayerKind) -> &Layer {
        match kind {
            LayerKind::Input => &self.input,
            LayerKind::Display => &self.display,
            LayerKind::Gutter => &self.gutter,
        }
    }

    pub fn layer_mut(&mut self, kind: LayerKind) -> &mut Layer {
        match kind {
            LayerKind::Input => &mut self.input,
            LayerKind::Display => &mut self.display,
            LayerKind::Gutter => &mut self.gutter,
        }
    }

    pub fn scroll(&self) -> ScrollOffset {
        self.input.scroll
    }

    /// Input layer scrolled: mirror it onto the display layer, and the
    /// vertical offset onto the gutter.
    pub fn on_scroll(&mut self, top: f32, left: f32) {
        let offset = ScrollOffset { top: top.max(0.0), left: left.max(0.0) };
        self.input.scroll = offset;
        self.display.scroll = offset;
        self.gutter.scroll.top = offset.top;
    }

    /// Restyle all layers at once.
    pub fn set_style(&mut self, style: LayerStyle) {
        self.input.style = style.clone();
        self.display.style = style.clone();
        self.gutter.style = style;
    }

    /// Check that highlighting will sit exactly under the caret.
    pub fn check_alignment(&self) -> Result<(), EditorError> {
        let (input, display, gutter) = (&self.input.style, &self.display.style, &self.gutter.style);
        if input.font_family != display.font_family {
            return Err(EditorError::misaligned(format!(
                "font family {:?} vs {:?}",
                input.font_family, display.font_family
            )));
        }
        if input.font_size != display.font_size {
            return Err(EditorError::misaligned(format!(
                "font size {} vs {}",
                input.font_size, display.font_size
            )));
        }
        if input.padding != display.padding {
            return Err(EditorError::misaligned(format!(
                "padding {} vs {}",
                input.padding, display.padding
            )));
        }
        for (name, other) in [("display", display), ("gutter", gutter)] {
            if input.line_height != other.line_height {
                return Err(EditorError::misaligned(format!(
                    "{} line height {} vs input {}",
                    name, other.line_height, input.line_height
                )));
            }
        }
        if self.input.scroll != self.display.scroll {
            return Err(EditorError::misaligned("display scroll offset drifted"));
        }
        if self.input.scroll.top != self.gutter.scroll.top {
            return Err(EditorError::misaligned("gutter scroll offset drifted"));
        }
        Ok(())
    }
}

// ── Rows ──────────────────────────────────────────────────────────────────

/// Number of rows in `text`; an empty buffer still has one.
pub fn line_count(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count() + 1
}

/// Gutter labels: one per line, padded to at least `min_lines` rows.
pub fn gutter_numbers(line_count: usize, min_lines: usize) -> RangeInclusive<usize> {
    1..=line_count.max(min_lines).max(1)
}

/// Split rendered markup into display rows.
pub fn display_lines(markup: &str) -> Vec<&str> {
    markup.split('\n').collect()
}

// ── Caret position ────────────────────────────────────────────────────────

/// Measures rendered text width. The default assumes a monospace font; a host
/// with a real layout engine can measure a hidden mirror element instead.
pub trait TextMeasure {
    /// Width in logical px of `text` laid out in `style`.
    fn width(&self, text: &str, style: &LayerStyle) -> f32;
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Monospace {
    /// Advance width as a fraction of the font size.
    pub char_width_ratio: f32,
    pub tab_size: usize,
}

impl Default for Monospace {
    fn default() -> Self {
        Self { char_width_ratio: 0.6, tab_size: 2 }
    }
}

impl TextMeasure for Monospace {
    fn width(&self, text: &str, style: &LayerStyle) -> f32 {
        let columns: usize = text
            .chars()
            .map(|c| if c == '\t' { self.tab_size } else { 1 })
            .sum();
        columns as f32 * style.font_size * self.char_width_ratio
    }
}

/// Top-left of the caret cell, relative to the input layer's origin.
pub fn caret_position(
    text: &str,
    cursor: usize,
    style: &LayerStyle,
    measure: &dyn TextMeasure,
    scroll: ScrollOffset,
) -> Point {
    let cursor = clamp_offset(text, cursor);
    let line = text[..cursor].bytes().filter(|&b| b == b'\n').count();
    let column_x = measure.width(line_prefix(text, cursor), style);
    Point::new(
        style.padding + column_x - scroll.left,
        style.padding + line as f32 * style.line_height - scroll.top,
    )
}

/// Where the suggestion popup opens: just below the caret's row, nudged by
/// `offset`.
pub fn popup_position(
    text: &str,
    cursor: usize,
    style: &LayerStyle,
    measure: &dyn TextMeasure,
    scroll: ScrollOffset,
    offset: Point,
) -> Point {
    let caret = caret_position(text, cursor, style, measure, scroll);
    Point::new(caret.x + offset.x, caret.y + style.line_height + offset.y)
}
