use std::fmt;

/// Keyboard key identifier.
///
/// Only the keys the editor reacts to get their own variant; the host maps
/// everything else to `Other`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Backspace,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    /// A printable character.
    Char(char),
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(name: &str) -> Key {
        match name {
            "Escape" | "Esc" => Key::Escape,
            "Enter" => Key::Enter,
            "Tab" => Key::Tab,
            "Backspace" => Key::Backspace,
            "Delete" => Key::Delete,
            "Home" => Key::Home,
            "End" => Key::End,
            "PageUp" => Key::PageUp,
            "PageDown" => Key::PageDown,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other,
                }
            }
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_dom_names() {
        assert_eq!(Key::from_dom("ArrowDown"), Key::ArrowDown);
        assert_eq!(Key::from_dom("Esc"), Key::Escape);
        assert_eq!(Key::from_dom("d"), Key::Char('d'));
        assert_eq!(Key::from_dom("é"), Key::Char('é'));
        assert_eq!(Key::from_dom("Shift"), Key::Other);
    }
}
