//! Error types for the shortcut engine.

use std::fmt;

use crate::dispatch::RegistryError;
use crate::shortcut::ShortcutParseError;

/// Convenience alias for core results.
pub type Result<T> = std::result::Result<T, CoreError>;

/// The main error type for shortcut-engine operations.
///
/// All variants are configuration errors: they are raised synchronously at
/// registration or edit time and never reach dispatch.
#[derive(Debug)]
pub enum CoreError {
    /// A shortcut string or captured combination had an invalid shape.
    Parse(ShortcutParseError),
    /// A table rebuild encountered a conflicting entry.
    Registry(RegistryError),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid shortcut: {err}"),
            Self::Registry(err) => write!(f, "shortcut registration failed: {err}"),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Registry(err) => Some(err),
        }
    }
}

impl From<ShortcutParseError> for CoreError {
    fn from(err: ShortcutParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<RegistryError> for CoreError {
    fn from(err: RegistryError) -> Self {
        Self::Registry(err)
    }
}
