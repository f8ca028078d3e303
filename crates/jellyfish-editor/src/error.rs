use std::fmt;

/// Errors surfaced by the editor engine.
///
/// Highlighting and completion never fail; these cover the edges where a host
/// hands the engine something it cannot use.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorError {
    /// A mode name other than `html` or `css`.
    UnknownMode(String),
    /// A configuration value out of its accepted range.
    InvalidConfig { field: &'static str, reason: String },
    /// The overlay layers no longer share geometry.
    Misaligned { what: String },
}

impl EditorError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig { field, reason: reason.into() }
    }

    pub(crate) fn misaligned(what: impl Into<String>) -> Self {
        Self::Misaligned { what: what.into() }
    }
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownMode(name) => {
                write!(f, "unknown editor mode {:?} (expected \"html\" or \"css\")", name)
            }
            Self::InvalidConfig { field, reason } => {
                write!(f, "invalid editor config `{}`: {}", field, reason)
            }
            Self::Misaligned { what } => write!(f, "overlay layers misaligned: {}", what),
        }
    }
}

impl std::error::Error for EditorError {}
