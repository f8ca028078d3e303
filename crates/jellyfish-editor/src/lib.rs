//! Engine of the **Jellyfish** HTML/CSS code editor: highlighting, the
//! overlay model, word location and autocomplete.
//!
//! The crate has no UI toolkit dependency. A host renders [`EditorView`]s and
//! forwards input-layer events to [`Editor::on_event`]; the language server in
//! `jellyfish-lsp` drives the same engine over LSP.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`highlight`] | `tokenize`, `highlight`, `Run`, unterminated-construct scan |
//! | [`markup`] | run rendering, `strip_markup` |
//! | [`overlay`] | layers, scroll sync, gutter, caret and popup position |
//! | [`locator`] | `locate`, `word_start`, `Context` |
//! | [`symbols`] | `HTML_TAGS`, `CSS_PROPERTIES`, `CSS_VALUES` |
//! | [`completion`] | `Completion` state machine |
//! | [`editor`] | `Editor`, `EditorEvent`, `EditorView` |
//! | [`config`] | `EditorConfig` |
//! | [`error`] | `EditorError` |
//!
//! # Quick start
//!
//! ```rust
//! use jellyfish_editor::{highlight, markup::strip_markup, Mode};
//!
//! let src = "<h1>Hi</h1>";
//! let html = highlight(src, Mode::Html);
//! assert!(html.contains("jf-tag"));
//! assert_eq!(strip_markup(&html), src);
//! ```

pub mod completion;
pub mod config;
pub mod editor;
pub mod error;
pub mod highlight;
pub mod input;
pub mod locator;
pub mod markup;
pub mod mode;
pub mod overlay;
pub mod symbols;
pub mod theme;

pub use completion::{Applied, Completion, KeyOutcome};
pub use config::EditorConfig;
pub use editor::{Editor, EditorEvent, EditorView, EventResult, PopupView};
pub use error::EditorError;
pub use highlight::{highlight, tokenize, Run};
pub use input::Key;
pub use locator::{locate, Context, Located};
pub use mode::Mode;
pub use symbols::Symbol;
pub use theme::{Theme, TokenClass};

#[cfg(test)]
mod scenario_tests {
    use super::*;
    use crate::markup::strip_markup;

    #[test]
    fn heading_colors_tag_apart_from_text() {
        let runs = tokenize("<h1>Hi</h1>", Mode::Html);
        let class_of = |text: &str| runs.iter().find(|r| r.text == text).map(|r| r.class);
        assert_eq!(class_of("<"), Some(TokenClass::TagBracket));
        assert_eq!(class_of("h1"), Some(TokenClass::TagName));
        assert_eq!(class_of(">"), Some(TokenClass::TagBracket));
        assert_eq!(class_of("Hi"), Some(TokenClass::Plain));
        assert_eq!(strip_markup(&highlight("<h1>Hi</h1>", Mode::Html)), "<h1>Hi</h1>");
    }

    #[test]
    fn css_declaration_classes() {
        let runs = tokenize("color: red;", Mode::Css);
        let class_of = |text: &str| runs.iter().find(|r| r.text == text).map(|r| r.class);
        assert_eq!(class_of("color"), Some(TokenClass::Property));
        assert_eq!(class_of("red"), Some(TokenClass::Value));
        assert_eq!(class_of(":"), Some(TokenClass::Punctuation));
        assert_eq!(class_of(";"), Some(TokenClass::Punctuation));
    }

    #[test]
    fn type_accept_and_rehighlight() {
        let mut editor = Editor::default();
        editor.on_event(EditorEvent::Mounted);
        editor.on_event(EditorEvent::Input { text: "<ul>\n  <l".into(), cursor: 9 });
        assert_eq!(editor.view().popup.map(|p| p.items.len()), Some(3));
        editor.on_event(EditorEvent::Key(Key::ArrowDown));
        editor.on_event(EditorEvent::Key(Key::Tab));
        assert_eq!(editor.text(), "<ul>\n  <li></li>");
        let view = editor.view();
        assert_eq!(strip_markup(&view.lines.join("\n")), editor.text());
    }
}
