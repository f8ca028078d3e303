use crate::error::EditorError;
use crate::overlay::{LayerStyle, Monospace, Point};
use crate::theme::Theme;

/// Editor configuration.
///
/// `Default` gives the stock editor: 8 suggestions, 20 gutter rows, a 14px
/// monospace font and the dark theme.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Most suggestions shown in the popup.
    pub max_suggestions: usize,
    /// Gutter rows rendered even when the buffer is shorter.
    pub min_lines: usize,
    /// Offer tag completions while typing plain words in element content.
    pub text_context_completions: bool,
    pub style: LayerStyle,
    pub measure: Monospace,
    /// Popup nudge from the bottom-left of the caret's row.
    pub popup_offset: Point,
    pub theme: Theme,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_suggestions: 8,
            min_lines: 20,
            text_context_completions: true,
            style: LayerStyle::default(),
            measure: Monospace::default(),
            popup_offset: Point::new(4.0, 2.0),
            theme: Theme::default(),
        }
    }
}

impl EditorConfig {
    pub fn max_suggestions(mut self, v: usize) -> Self { self.max_suggestions = v; self }
    pub fn min_lines(mut self, v: usize) -> Self { self.min_lines = v; self }
    pub fn text_context_completions(mut self, v: bool) -> Self { self.text_context_completions = v; self }
    pub fn style(mut self, v: LayerStyle) -> Self { self.style = v; self }
    pub fn char_width_ratio(mut self, v: f32) -> Self { self.measure.char_width_ratio = v; self }
    pub fn popup_offset(mut self, v: Point) -> Self { self.popup_offset = v; self }
    pub fn theme(mut self, v: Theme) -> Self { self.theme = v; self }

    pub fn validate(&self) -> Result<(), EditorError> {
        if self.max_suggestions == 0 {
            return Err(EditorError::invalid("max_suggestions", "must be at least 1"));
        }
        let positive = [
            ("style.font_size", self.style.font_size),
            ("style.line_height", self.style.line_height),
            ("measure.char_width_ratio", self.measure.char_width_ratio),
        ];
        for (field, v) in positive {
            if !(v.is_finite() && v > 0.0) {
                return Err(EditorError::invalid(field, format!("must be a positive number, got {}", v)));
            }
        }
        if !(self.style.padding.is_finite() && self.style.padding >= 0.0) {
            return Err(EditorError::invalid("style.padding", "must be zero or more"));
        }
        if self.style.line_height < self.style.font_size {
            log::warn!(
                "line height {} is smaller than font size {}; rows will clip",
                self.style.line_height,
                self.style.font_size
            );
        }
        Ok(())
    }
}
