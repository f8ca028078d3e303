use std::fmt;
use std::str::FromStr;

use crate::error::EditorError;

/// Language mode of the active buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Html,
    Css,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Html => "html",
            Mode::Css => "css",
        }
    }

    /// Guess the mode from a file name or URI path by extension.
    pub fn from_path(path: &str) -> Option<Mode> {
        let ext = path.rsplit_once('.')?.1;
        match ext.to_ascii_lowercase().as_str() {
            "html" | "htm" => Some(Mode::Html),
            "css" => Some(Mode::Css),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(Mode::Html),
            "css" => Ok(Mode::Css),
            _ => Err(EditorError::UnknownMode(s.to_string())),
        }
    }
}
