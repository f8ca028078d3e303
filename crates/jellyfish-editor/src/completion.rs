//! Autocomplete engine: suggestion filtering, popup visibility, keyboard
//! navigation and accept-splicing.

use crate::config::EditorConfig;
use crate::input::Key;
use crate::locator::{self, clamp_offset, Context};
use crate::mode::Mode;
use crate::symbols::{self, Symbol};

/// What a key press did to the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not a completion key, or the popup is closed. Let the key through.
    Ignored,
    /// Selection moved.
    Moved,
    /// Accept the suggestion at this index.
    Accept(usize),
    /// Popup closed, buffer untouched.
    Dismissed,
}

impl KeyOutcome {
    /// Whether the host must suppress the key's default effect.
    pub fn suppresses_default(self) -> bool {
        self != KeyOutcome::Ignored
    }
}

/// Result of accepting a suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub text: String,
    pub cursor: usize,
}

/// Transient completion state of one editor instance.
#[derive(Debug, Clone)]
pub struct Completion {
    suggestions: Vec<&'static Symbol>,
    selected: usize,
    visible: bool,
    context: Context,
    disabled: bool,
    max_suggestions: usize,
    text_context: bool,
}

impl Completion {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            suggestions: Vec::new(),
            selected: 0,
            visible: false,
            context: Context::None,
            disabled: false,
            max_suggestions: config.max_suggestions,
            text_context: config.text_context_completions,
        }
    }

    pub fn suggestions(&self) -> &[&'static Symbol] {
        &self.suggestions
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn context(&self) -> Context {
        self.context
    }

    /// Disabling clears everything and keeps it cleared.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.close();
        }
    }

    pub fn close(&mut self) {
        self.suggestions.clear();
        self.selected = 0;
        self.visible = false;
        self.context = Context::None;
    }

    /// Recompute suggestions for the word before `cursor`.
    pub fn on_text_changed(&mut self, text: &str, cursor: usize, mode: Mode) {
        if self.disabled {
            return;
        }
        let located = locator::locate(text, cursor, mode);
        let context = match located.context {
            Context::Text if !self.text_context => Context::None,
            c => c,
        };
        self.context = context;
        self.suggestions = symbols::filter(symbols::table(mode, context), located.word, self.max_suggestions);
        self.selected = 0;
        self.visible = !located.word.is_empty() && !self.suggestions.is_empty();
        log::debug!(
            "completion: word {:?} in {:?} -> {} suggestions (visible: {})",
            located.word,
            context,
            self.suggestions.len(),
            self.visible
        );
    }

    /// The caret moved without typing; recheck whether the popup still applies.
    pub fn on_cursor_moved(&mut self, text: &str, cursor: usize, mode: Mode) {
        self.on_text_changed(text, cursor, mode);
    }

    pub fn on_key_down(&mut self, key: Key) -> KeyOutcome {
        if self.disabled || !self.visible {
            return KeyOutcome::Ignored;
        }
        let len = self.suggestions.len();
        match key {
            Key::ArrowDown if len > 0 => {
                self.selected = (self.selected + 1) % len;
                KeyOutcome::Moved
            }
            Key::ArrowUp if len > 0 => {
                self.selected = (self.selected + len - 1) % len;
                KeyOutcome::Moved
            }
            Key::Tab | Key::Enter if len > 0 => KeyOutcome::Accept(self.selected),
            Key::Escape => {
                self.close();
                KeyOutcome::Dismissed
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Splice `entry.insert_text` over the word before `cursor` and close the
    /// popup. The caret lands right after the inserted snippet.
    ///
    /// `None` while disabled.
    pub fn apply(&mut self, text: &str, cursor: usize, entry: &Symbol) -> Option<Applied> {
        if self.disabled {
            return None;
        }
        let cursor = clamp_offset(text, cursor);
        let start = locator::word_start(text, cursor, self.context);
        let mut out = String::with_capacity(text.len() - (cursor - start) + entry.insert_text.len());
        out.push_str(&text[..start]);
        out.push_str(entry.insert_text);
        out.push_str(&text[cursor..]);
        log::debug!("accepted {:?} over {}..{}", entry.key, start, cursor);
        self.close();
        Some(Applied { text: out, cursor: start + entry.insert_text.len() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Completion {
        Completion::new(&EditorConfig::default())
    }

    fn keys(c: &Completion) -> Vec<&'static str> {
        c.suggestions().iter().map(|s| s.key).collect()
    }

    #[test]
    fn typing_a_tag_opens_popup() {
        let mut c = engine();
        c.on_text_changed("<di", 3, Mode::Html);
        assert!(c.is_visible());
        assert_eq!(keys(&c), vec!["div"]);
        assert_eq!(c.context(), Context::Tag);
    }

    #[test]
    fn empty_word_keeps_popup_hidden() {
        let mut c = engine();
        c.on_text_changed("<", 1, Mode::Html);
        assert!(!c.is_visible());
        assert_eq!(c.suggestions().len(), 8);
        c.on_text_changed("color:", 6, Mode::Css);
        assert!(!c.is_visible());
    }

    #[test]
    fn no_match_hides_popup() {
        let mut c = engine();
        c.on_text_changed("<zz", 3, Mode::Html);
        assert!(!c.is_visible());
        assert!(c.suggestions().is_empty());
    }

    #[test]
    fn truncates_to_max() {
        let mut c = Completion::new(&EditorConfig::default().max_suggestions(2));
        c.on_text_changed("<h", 2, Mode::Html);
        assert_eq!(keys(&c), vec!["h1", "h2"]);
    }

    #[test]
    fn css_value_suggestions() {
        let mut c = engine();
        c.on_text_changed("color: bl", 9, Mode::Css);
        assert_eq!(keys(&c), vec!["block", "black", "blue"]);
    }

    #[test]
    fn arrow_keys_cycle() {
        let mut c = engine();
        c.on_text_changed("<s", 2, Mode::Html);
        assert_eq!(keys(&c), vec!["span", "section", "strong", "select", "style", "script"]);
        assert_eq!(c.on_key_down(Key::ArrowUp), KeyOutcome::Moved);
        assert_eq!(c.selected(), 5);
        assert_eq!(c.on_key_down(Key::ArrowDown), KeyOutcome::Moved);
        assert_eq!(c.selected(), 0);
        c.on_key_down(Key::ArrowDown);
        assert_eq!(c.selected(), 1);
    }

    #[test]
    fn arrow_up_wraps_with_three() {
        let mut c = engine();
        c.on_text_changed("<t", 2, Mode::Html);
        c.suggestions.truncate(3);
        assert_eq!(c.selected(), 0);
        c.on_key_down(Key::ArrowUp);
        assert_eq!(c.selected(), 2);
    }

    #[test]
    fn enter_and_tab_accept_selected() {
        let mut c = engine();
        c.on_text_changed("<h", 2, Mode::Html);
        c.on_key_down(Key::ArrowDown);
        assert_eq!(c.on_key_down(Key::Enter), KeyOutcome::Accept(1));
        assert_eq!(c.on_key_down(Key::Tab), KeyOutcome::Accept(1));
        assert!(KeyOutcome::Accept(1).suppresses_default());
    }

    #[test]
    fn escape_dismisses() {
        let mut c = engine();
        c.on_text_changed("<di", 3, Mode::Html);
        assert_eq!(c.on_key_down(Key::Escape), KeyOutcome::Dismissed);
        assert!(!c.is_visible());
        assert_eq!(c.on_key_down(Key::Enter), KeyOutcome::Ignored);
    }

    #[test]
    fn keys_pass_through_when_hidden() {
        let mut c = engine();
        assert_eq!(c.on_key_down(Key::ArrowDown), KeyOutcome::Ignored);
        assert_eq!(c.on_key_down(Key::Tab), KeyOutcome::Ignored);
        assert!(!KeyOutcome::Ignored.suppresses_default());
    }

    #[test]
    fn accept_replaces_partial_tag() {
        let mut c = engine();
        c.on_text_changed("<di", 3, Mode::Html);
        let div = c.suggestions()[0];
        let applied = c.apply("<di", 3, div);
        assert_eq!(applied, Some(Applied { text: "<div></div>".to_string(), cursor: 11 }));
        assert!(!c.is_visible());
    }

    #[test]
    fn accept_keeps_surrounding_text() {
        let mut c = engine();
        let text = "p {\n  backg\n}";
        c.on_text_changed(text, 11, Mode::Css);
        let entry = c.suggestions()[0];
        assert_eq!(entry.key, "background");
        let applied = c.apply(text, 11, entry).unwrap();
        assert_eq!(applied.text, "p {\n  background: ;\n}");
        assert_eq!(applied.cursor, 6 + "background: ;".len());
    }

    #[test]
    fn text_context_is_permissive_by_default() {
        let mut c = engine();
        c.on_text_changed("<p>di", 5, Mode::Html);
        assert_eq!(c.context(), Context::Text);
        assert!(c.is_visible());
        let applied = c.apply("<p>di", 5, c.suggestions()[0]).unwrap();
        assert_eq!(applied.text, "<p><div></div>");
    }

    #[test]
    fn hyphenated_tag_prefix_never_doubles_the_bracket() {
        let mut c = engine();
        c.on_text_changed("<my-d", 5, Mode::Html);
        assert_eq!(c.context(), Context::Tag);
        assert!(!c.is_visible());

        c.on_text_changed("<p>a-d", 6, Mode::Html);
        let applied = c.apply("<p>a-d", 6, c.suggestions()[0]).unwrap();
        assert_eq!(applied.text, "<p>a-<div></div>");
    }

    #[test]
    fn text_context_can_be_turned_off() {
        let mut c = Completion::new(&EditorConfig::default().text_context_completions(false));
        c.on_text_changed("<p>di", 5, Mode::Html);
        assert!(!c.is_visible());
        c.on_text_changed("<di", 3, Mode::Html);
        assert!(c.is_visible());
    }

    #[test]
    fn disabled_computes_nothing() {
        let mut c = engine();
        c.on_text_changed("<di", 3, Mode::Html);
        c.set_disabled(true);
        assert!(!c.is_visible());
        c.on_text_changed("<di", 3, Mode::Html);
        assert!(!c.is_visible());
        assert!(c.suggestions().is_empty());
        assert_eq!(c.on_key_down(Key::ArrowDown), KeyOutcome::Ignored);
        assert_eq!(c.apply("<di", 3, &symbols::HTML_TAGS[0]), None);
    }

    #[test]
    fn cursor_move_rechecks_visibility() {
        let mut c = engine();
        let text = "<di> x";
        c.on_text_changed(text, 3, Mode::Html);
        assert!(c.is_visible());
        c.on_cursor_moved(text, 5, Mode::Html);
        assert!(!c.is_visible());
    }
}
