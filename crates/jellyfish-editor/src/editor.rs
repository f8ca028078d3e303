//! The editor component: buffers, overlay, highlighter and completion wired
//! together behind one event entry point.
//!
//! The host owns the buffers. The editor keeps a copy of each, reports every
//! edit through the `on_*_change` callbacks and expects the host to push the
//! new value back with [`Editor::set_html`] / [`Editor::set_css`].
//!
//! ```ignore
//! let mut editor = Editor::default()
//!     .html("<p></p>")
//!     .on_html_change(|v| store.borrow_mut().html = v);
//! editor.on_event(EditorEvent::Mounted);
//! editor.on_event(EditorEvent::Input { text: "<p></p>\n<di".into(), cursor: 11 });
//! let view = editor.view();
//! ```

use std::ops::RangeInclusive;
use std::panic::{self, AssertUnwindSafe};

use crate::completion::{Completion, KeyOutcome};
use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::highlight;
use crate::input::Key;
use crate::locator::clamp_offset;
use crate::markup;
use crate::mode::Mode;
use crate::overlay::{self, Layer, LayerKind, Overlay, Point, ScrollOffset, TextMeasure};
use crate::theme::Theme;

// ── Events ────────────────────────────────────────────────────────────────

/// Events the host forwards from the input layer.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// The input layer's value changed. `cursor` is the caret afterwards.
    Input { text: String, cursor: usize },
    /// Caret moved without an edit (click, arrow keys, selection).
    CursorMoved { cursor: usize },
    /// Key pressed in the input layer, before its default action.
    Key(Key),
    /// Input layer scrolled.
    Scroll { top: f32, left: f32 },
    /// A popup row was clicked.
    SuggestionClicked(usize),
    /// The HTML/CSS tab was switched.
    SwitchMode(Mode),
    /// Input layer attached.
    Mounted,
    /// Input layer detached.
    Unmounted,
}

/// Result returned by [`Editor::on_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Handled. For `Key` events the host must suppress the default action.
    Consumed,
    /// Not handled; let it through.
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}

// ── View ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct PopupItem {
    pub key: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopupView {
    pub items: Vec<PopupItem>,
    pub selected: usize,
    /// Top-left relative to the input layer's origin.
    pub position: Point,
}

/// Everything a host needs to paint one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorView {
    pub mode: Mode,
    /// Display-layer markup, one entry per source line.
    pub lines: Vec<String>,
    pub gutter: RangeInclusive<usize>,
    /// Input, display and gutter, in that order.
    pub layers: [Layer; 3],
    pub caret_color: &'static str,
    pub background: &'static str,
    pub gutter_color: &'static str,
    pub popup: Option<PopupView>,
    pub disabled: bool,
}

// ── Editor ────────────────────────────────────────────────────────────────

pub struct Editor {
    config: EditorConfig,
    mode: Mode,
    html: String,
    css: String,
    cursor: usize,
    disabled: bool,
    mounted: bool,
    focus_requested: bool,
    overlay: Overlay,
    completion: Completion,
    measure: Box<dyn TextMeasure>,
    on_html_change: Option<Box<dyn FnMut(String)>>,
    on_css_change: Option<Box<dyn FnMut(String)>>,
    on_mode_change: Option<Box<dyn FnMut(Mode)>>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::build(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Result<Self, EditorError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EditorConfig) -> Self {
        Self {
            overlay: Overlay::new(config.style.clone()),
            completion: Completion::new(&config),
            measure: Box::new(config.measure),
            config,
            mode: Mode::default(),
            html: String::new(),
            css: String::new(),
            cursor: 0,
            disabled: false,
            mounted: false,
            focus_requested: false,
            on_html_change: None,
            on_css_change: None,
            on_mode_change: None,
        }
    }

    pub fn mode(mut self, v: Mode) -> Self { self.mode = v; self }
    pub fn html(mut self, v: impl Into<String>) -> Self { self.html = v.into(); self }
    pub fn css(mut self, v: impl Into<String>) -> Self { self.css = v.into(); self }
    pub fn disabled(mut self, v: bool) -> Self { self.set_disabled(v); self }

    /// Replace the caret-measuring strategy (e.g. a host mirror element).
    pub fn measure(mut self, m: impl TextMeasure + 'static) -> Self {
        self.measure = Box::new(m);
        self
    }

    pub fn on_html_change(mut self, f: impl FnMut(String) + 'static) -> Self {
        self.on_html_change = Some(Box::new(f));
        self
    }

    pub fn on_css_change(mut self, f: impl FnMut(String) + 'static) -> Self {
        self.on_css_change = Some(Box::new(f));
        self
    }

    pub fn on_mode_change(mut self, f: impl FnMut(Mode) + 'static) -> Self {
        self.on_mode_change = Some(Box::new(f));
        self
    }

    // ── Props ─────────────────────────────────────────────────────────────

    /// Host pushed a new HTML buffer.
    pub fn set_html(&mut self, v: impl Into<String>) {
        self.html = v.into();
        self.clamp_cursor();
    }

    /// Host pushed a new CSS buffer.
    pub fn set_css(&mut self, v: impl Into<String>) {
        self.css = v.into();
        self.clamp_cursor();
    }

    /// Host switched the mode prop. Does not call `on_mode_change`.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            self.mode = mode;
            self.completion.close();
            self.cursor = self.text().len();
        }
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        self.completion.set_disabled(disabled);
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn current_mode(&self) -> Mode {
        self.mode
    }

    /// The active buffer.
    pub fn text(&self) -> &str {
        match self.mode {
            Mode::Html => &self.html,
            Mode::Css => &self.css,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn completion(&self) -> &Completion {
        &self.completion
    }

    /// Returns `true` once after an accept, asking the host to refocus the
    /// input layer.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    // ── Events ────────────────────────────────────────────────────────────

    pub fn on_event(&mut self, event: EditorEvent) -> EventResult {
        match event {
            EditorEvent::Input { text, cursor } => {
                let cursor = clamp_offset(&text, cursor);
                *self.buffer_mut() = text;
                self.cursor = cursor;
                self.notify_change();
                let (mode, cursor) = (self.mode, self.cursor);
                let text = match mode {
                    Mode::Html => &self.html,
                    Mode::Css => &self.css,
                };
                self.completion.on_text_changed(text, cursor, mode);
                EventResult::Consumed
            }
            EditorEvent::CursorMoved { cursor } => {
                let mode = self.mode;
                let text = match mode {
                    Mode::Html => &self.html,
                    Mode::Css => &self.css,
                };
                self.cursor = clamp_offset(text, cursor);
                self.completion.on_cursor_moved(text, self.cursor, mode);
                EventResult::Consumed
            }
            EditorEvent::Key(key) => match self.completion.on_key_down(key) {
                KeyOutcome::Ignored => EventResult::Ignored,
                KeyOutcome::Moved | KeyOutcome::Dismissed => EventResult::Consumed,
                // The key keeps its default action unless something was inserted.
                KeyOutcome::Accept(index) => {
                    if self.apply_suggestion(index) {
                        EventResult::Consumed
                    } else {
                        EventResult::Ignored
                    }
                }
            },
            EditorEvent::Scroll { top, left } => {
                self.overlay.on_scroll(top, left);
                EventResult::Consumed
            }
            EditorEvent::SuggestionClicked(index) => {
                if self.apply_suggestion(index) {
                    EventResult::Consumed
                } else {
                    EventResult::Ignored
                }
            }
            EditorEvent::SwitchMode(mode) => {
                if mode == self.mode {
                    return EventResult::Ignored;
                }
                self.set_mode(mode);
                log::debug!("editor switched to {}", mode);
                if let Some(f) = &mut self.on_mode_change {
                    f(mode);
                }
                EventResult::Consumed
            }
            EditorEvent::Mounted => {
                self.mounted = true;
                EventResult::Consumed
            }
            EditorEvent::Unmounted => {
                self.mounted = false;
                self.completion.close();
                EventResult::Consumed
            }
        }
    }

    /// Accept suggestion `index`: splice it into the active buffer, report
    /// the change, move the caret past it and close the popup.
    ///
    /// Silently does nothing (returns `false`) when the input layer is not
    /// mounted or `index` is out of range.
    pub fn apply_suggestion(&mut self, index: usize) -> bool {
        if !self.mounted {
            log::debug!("apply_suggestion({}) ignored: input layer not mounted", index);
            return false;
        }
        let Some(entry) = self.completion.suggestions().get(index).copied() else {
            return false;
        };
        let text = match self.mode {
            Mode::Html => &self.html,
            Mode::Css => &self.css,
        };
        let Some(applied) = self.completion.apply(text, self.cursor, entry) else {
            return false;
        };
        *self.buffer_mut() = applied.text;
        self.cursor = applied.cursor;
        self.notify_change();
        self.focus_requested = true;
        true
    }

    // ── Rendering ─────────────────────────────────────────────────────────

    pub fn view(&self) -> EditorView {
        if let Err(e) = self.overlay.check_alignment() {
            log::warn!("{}", e);
        }
        let text = self.text();
        let theme = &self.config.theme;
        let mode = self.mode;
        let markup = guarded(text, theme, || highlight::highlight_with(text, mode, theme));
        let lines: Vec<String> = overlay::display_lines(&markup).into_iter().map(str::to_owned).collect();

        let popup = self.completion.is_visible().then(|| PopupView {
            items: self
                .completion
                .suggestions()
                .iter()
                .map(|s| PopupItem { key: s.key, description: s.description })
                .collect(),
            selected: self.completion.selected(),
            position: overlay::popup_position(
                text,
                self.cursor,
                &self.overlay.layer(LayerKind::Input).style,
                &*self.measure,
                self.overlay.scroll(),
                self.config.popup_offset,
            ),
        });

        EditorView {
            mode,
            gutter: overlay::gutter_numbers(lines.len(), self.config.min_lines),
            lines,
            layers: [
                self.overlay.layer(LayerKind::Input).clone(),
                self.overlay.layer(LayerKind::Display).clone(),
                self.overlay.layer(LayerKind::Gutter).clone(),
            ],
            caret_color: theme.caret,
            background: theme.background,
            gutter_color: theme.gutter,
            popup,
            disabled: self.disabled,
        }
    }

    /// Current scroll of the input layer.
    pub fn scroll(&self) -> ScrollOffset {
        self.overlay.scroll()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn buffer_mut(&mut self) -> &mut String {
        match self.mode {
            Mode::Html => &mut self.html,
            Mode::Css => &mut self.css,
        }
    }

    fn clamp_cursor(&mut self) {
        self.cursor = clamp_offset(self.text(), self.cursor);
    }

    fn notify_change(&mut self) {
        let (callback, value) = match self.mode {
            Mode::Html => (&mut self.on_html_change, &self.html),
            Mode::Css => (&mut self.on_css_change, &self.css),
        };
        if let Some(f) = callback {
            f(value.clone());
        }
    }
}

/// Run `render`, falling back to plain escaped text if it panics.
fn guarded(src: &str, theme: &Theme, render: impl FnOnce() -> String) -> String {
    match panic::catch_unwind(AssertUnwindSafe(render)) {
        Ok(markup) => markup,
        Err(_) => {
            log::error!("highlighter panicked on {} bytes; showing plain text", src.len());
            markup::plain(src, theme)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::markup::strip_markup;

    fn mounted(editor: Editor) -> Editor {
        let mut editor = editor;
        editor.on_event(EditorEvent::Mounted);
        editor
    }

    fn type_text(editor: &mut Editor, text: &str) -> EventResult {
        editor.on_event(EditorEvent::Input { text: text.to_string(), cursor: text.len() })
    }

    #[test]
    fn input_reports_change_and_opens_popup() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut editor = mounted(Editor::default().on_html_change(move |v| sink.borrow_mut().push(v)));
        assert!(type_text(&mut editor, "<di").is_consumed());
        assert_eq!(*seen.borrow(), vec!["<di".to_string()]);
        let popup = editor.view().popup.unwrap();
        assert_eq!(popup.items[0].key, "div");
        assert_eq!(popup.selected, 0);
    }

    #[test]
    fn enter_accepts_and_moves_caret() {
        let seen = Rc::new(RefCell::new(String::new()));
        let sink = seen.clone();
        let mut editor = mounted(Editor::default().on_html_change(move |v| *sink.borrow_mut() = v));
        type_text(&mut editor, "<di");
        assert!(editor.on_event(EditorEvent::Key(Key::Enter)).is_consumed());
        assert_eq!(editor.text(), "<div></div>");
        assert_eq!(editor.cursor(), 11);
        assert_eq!(*seen.borrow(), "<div></div>");
        assert!(editor.view().popup.is_none());
        assert!(editor.take_focus_request());
        assert!(!editor.take_focus_request());
    }

    #[test]
    fn click_accepts_in_css() {
        let seen = Rc::new(RefCell::new(String::new()));
        let sink = seen.clone();
        let mut editor = mounted(Editor::default().mode(Mode::Css).on_css_change(move |v| *sink.borrow_mut() = v));
        type_text(&mut editor, "p { disp");
        assert!(editor.on_event(EditorEvent::SuggestionClicked(0)).is_consumed());
        assert_eq!(editor.text(), "p { display: ;");
        assert_eq!(*seen.borrow(), "p { display: ;");
    }

    #[test]
    fn apply_is_noop_when_unmounted() {
        let mut editor = Editor::default();
        type_text(&mut editor, "<di");
        assert!(!editor.apply_suggestion(0));
        assert_eq!(editor.text(), "<di");
        assert_eq!(editor.on_event(EditorEvent::SuggestionClicked(0)), EventResult::Ignored);
    }

    #[test]
    fn accept_keys_pass_through_when_unmounted() {
        let mut editor = Editor::default();
        type_text(&mut editor, "<di");
        assert!(editor.view().popup.is_some());
        assert_eq!(editor.on_event(EditorEvent::Key(Key::Enter)), EventResult::Ignored);
        assert_eq!(editor.on_event(EditorEvent::Key(Key::Tab)), EventResult::Ignored);
        assert_eq!(editor.text(), "<di");
        assert!(!editor.take_focus_request());
    }

    #[test]
    fn apply_out_of_range_is_noop() {
        let mut editor = mounted(Editor::default());
        type_text(&mut editor, "<di");
        assert!(!editor.apply_suggestion(5));
        assert_eq!(editor.text(), "<di");
    }

    #[test]
    fn unmount_closes_popup() {
        let mut editor = mounted(Editor::default());
        type_text(&mut editor, "<di");
        editor.on_event(EditorEvent::Unmounted);
        assert!(editor.view().popup.is_none());
        assert!(!editor.apply_suggestion(0));
    }

    #[test]
    fn keys_pass_through_without_popup() {
        let mut editor = mounted(Editor::default());
        type_text(&mut editor, "<p> ");
        assert_eq!(editor.on_event(EditorEvent::Key(Key::Enter)), EventResult::Ignored);
        assert_eq!(editor.on_event(EditorEvent::Key(Key::ArrowDown)), EventResult::Ignored);
    }

    #[test]
    fn escape_dismisses_without_edit() {
        let mut editor = mounted(Editor::default());
        type_text(&mut editor, "<di");
        assert!(editor.on_event(EditorEvent::Key(Key::Escape)).is_consumed());
        assert_eq!(editor.text(), "<di");
        assert!(editor.view().popup.is_none());
    }

    #[test]
    fn disabled_still_highlights() {
        let mut editor = mounted(Editor::default().disabled(true));
        type_text(&mut editor, "<di");
        let view = editor.view();
        assert!(view.popup.is_none());
        assert!(view.disabled);
        assert!(view.lines[0].contains("jf-tag"));
    }

    #[test]
    fn enabling_again_resumes_completion() {
        let mut editor = mounted(Editor::default().disabled(true));
        type_text(&mut editor, "<di");
        editor.set_disabled(false);
        type_text(&mut editor, "<sp");
        assert_eq!(editor.view().popup.unwrap().items[0].key, "span");
    }

    #[test]
    fn mode_switch_keeps_buffers_apart() {
        let modes = Rc::new(RefCell::new(Vec::new()));
        let sink = modes.clone();
        let mut editor = mounted(Editor::default().html("<p></p>").css("p {}").on_mode_change(move |m| sink.borrow_mut().push(m)));
        type_text(&mut editor, "<di");
        assert!(editor.on_event(EditorEvent::SwitchMode(Mode::Css)).is_consumed());
        assert_eq!(editor.text(), "p {}");
        assert_eq!(editor.cursor(), 4);
        assert!(editor.view().popup.is_none());
        assert_eq!(editor.on_event(EditorEvent::SwitchMode(Mode::Css)), EventResult::Ignored);
        assert_eq!(*modes.borrow(), vec![Mode::Css]);
        editor.set_mode(Mode::Html);
        assert_eq!(editor.text(), "<di");
        assert_eq!(*modes.borrow(), vec![Mode::Css]);
    }

    #[test]
    fn set_html_clamps_cursor() {
        let mut editor = Editor::default();
        type_text(&mut editor, "<section>");
        editor.set_html("<p>");
        assert_eq!(editor.cursor(), 3);
    }

    #[test]
    fn view_round_trips_and_pads_gutter() {
        let mut editor = Editor::default();
        let src = "<h1>Hi</h1>\n\n<p class=\"x\">a & b</p>";
        type_text(&mut editor, src);
        let view = editor.view();
        assert_eq!(view.lines.len(), 3);
        assert_eq!(view.gutter, 1..=20);
        assert_eq!(strip_markup(&view.lines.join("\n")), src);
    }

    #[test]
    fn scroll_is_mirrored() {
        let mut editor = Editor::default();
        editor.on_event(EditorEvent::Scroll { top: 42.0, left: 7.0 });
        let view = editor.view();
        assert_eq!(view.layers[1].scroll, ScrollOffset { top: 42.0, left: 7.0 });
        assert_eq!(view.layers[2].scroll.top, 42.0);
        assert_eq!(editor.scroll().top, 42.0);
    }

    #[test]
    fn popup_follows_caret() {
        let mut editor = mounted(Editor::default());
        type_text(&mut editor, "<p>\n<di");
        let at = editor.view().popup.unwrap().position;
        let style = &editor.config().style;
        assert_eq!(at.y, style.padding + 2.0 * style.line_height + editor.config().popup_offset.y);
    }

    #[test]
    fn cursor_move_closes_stale_popup() {
        let mut editor = mounted(Editor::default());
        type_text(&mut editor, "<di> x");
        editor.on_event(EditorEvent::CursorMoved { cursor: 3 });
        assert!(editor.view().popup.is_some());
        editor.on_event(EditorEvent::CursorMoved { cursor: 6 });
        assert!(editor.view().popup.is_none());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = Editor::new(EditorConfig::default().max_suggestions(0)).err().unwrap();
        assert!(matches!(err, EditorError::InvalidConfig { field: "max_suggestions", .. }));
    }

    #[test]
    fn highlighter_panic_falls_back_to_plain_text() {
        let theme = Theme::default();
        let out = guarded("<b>", &theme, || panic!("boom"));
        assert_eq!(out, "&lt;b&gt;");
    }
}
