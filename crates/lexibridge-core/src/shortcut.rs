//! Shortcut specification and normalization.
//!
//! This module provides the two shortcut representations the engine uses:
//!
//! - [`ShortcutSpec`]: a validated modifier set plus 1–2 non-modifier keys,
//!   preserving the user's key order for display
//! - [`NormalizedShortcut`]: the canonical string form used as the dispatch
//!   key, the conflict-detection unit, and the only persisted representation
//!
//! # Normalization
//!
//! Normalization applies, in order: numeric-pad digits fold onto base-row
//! digits; single alphanumeric keys are upper-cased; specs with no modifier
//! or with more than two non-modifier keys are rejected; non-modifier keys
//! are sorted lexicographically so key-order permutations (`T+1` vs `1+T`)
//! produce the same canonical form; the result is rendered as
//! `Mod1+Mod2+...+Key1[+Key2]` with modifiers in fixed order
//! (Ctrl, Alt, Shift, Meta).
//!
//! ```
//! use lexibridge_core::{Key, Modifiers, ShortcutSpec};
//!
//! let a = ShortcutSpec::pair(Modifiers::CTRL_ALT, Key::T, Key::Digit1);
//! let b = ShortcutSpec::pair(Modifiers::CTRL_ALT, Key::Digit1, Key::T);
//! assert_eq!(a.normalize(), b.normalize());
//! assert_eq!(a.normalize().as_str(), "Ctrl+Alt+1+T");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::keys::{Key, KeyPress, Modifiers};
use crate::logging::targets;

/// Maximum number of non-modifier keys in a shortcut.
pub const MAX_SHORTCUT_KEYS: usize = 2;

/// Error type for invalid or unparseable shortcuts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcutParseError {
    /// The string is empty.
    Empty,
    /// No non-modifier key was specified.
    NoKey,
    /// No modifier was specified (a bare-key shortcut would shadow every
    /// sequence beginning with that key).
    NoModifier,
    /// More than two non-modifier keys were specified.
    TooManyKeys,
    /// Unknown key name.
    UnknownKey(String),
}

impl fmt::Display for ShortcutParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty shortcut"),
            Self::NoKey => write!(f, "no key specified (only modifiers)"),
            Self::NoModifier => write!(f, "at least one modifier is required"),
            Self::TooManyKeys => {
                write!(f, "too many keys (max {MAX_SHORTCUT_KEYS})")
            }
            Self::UnknownKey(s) => write!(f, "unknown key: {s}"),
        }
    }
}

impl std::error::Error for ShortcutParseError {}

// =============================================================================
// Shortcut Spec
// =============================================================================

/// A validated key combination: a non-empty modifier set plus one or two
/// non-modifier keys.
///
/// The key order is preserved for display; equality treats the keys as a set,
/// so `Ctrl+Alt+T+1` and `Ctrl+Alt+1+T` compare equal.
#[derive(Debug, Clone)]
pub struct ShortcutSpec {
    modifiers: Modifiers,
    keys: Vec<Key>,
}

impl ShortcutSpec {
    /// Create a single-key shortcut.
    pub fn single(modifiers: Modifiers, key: Key) -> Self {
        Self {
            modifiers,
            keys: vec![key],
        }
    }

    /// Create a two-key shortcut, preserving the given key order for display.
    ///
    /// Equal keys collapse to a single-key shortcut, matching the set
    /// semantics of shortcut equality.
    pub fn pair(modifiers: Modifiers, first: Key, second: Key) -> Self {
        if first == second {
            return Self::single(modifiers, first);
        }
        Self {
            modifiers,
            keys: vec![first, second],
        }
    }

    /// Create a shortcut from raw parts, validating the shape.
    pub fn from_parts(modifiers: Modifiers, keys: Vec<Key>) -> Result<Self, ShortcutParseError> {
        if keys.is_empty() {
            return Err(ShortcutParseError::NoKey);
        }
        if modifiers.none() {
            return Err(ShortcutParseError::NoModifier);
        }
        let mut deduped: Vec<Key> = Vec::with_capacity(keys.len());
        for key in keys {
            if !deduped.contains(&key) {
                deduped.push(key);
            }
        }
        if deduped.len() > MAX_SHORTCUT_KEYS {
            return Err(ShortcutParseError::TooManyKeys);
        }
        Ok(Self {
            modifiers,
            keys: deduped,
        })
    }

    /// Create a single-key shortcut from a raw key press.
    pub fn from_press(press: KeyPress) -> Result<Self, ShortcutParseError> {
        Self::from_parts(press.modifiers, vec![press.key])
    }

    /// The modifier set.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// The non-modifier keys in display order.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Normalize into the canonical form.
    ///
    /// Validation has already happened at construction, so this cannot fail.
    pub fn normalize(&self) -> NormalizedShortcut {
        let mut keys: Vec<Key> = self.keys.iter().map(|k| k.fold_numpad()).collect();
        keys.sort_by(|a, b| a.name().cmp(b.name()));
        keys.dedup();

        let mut parts = self.modifiers.canonical_names();
        parts.extend(keys.iter().map(|k| k.name()));

        NormalizedShortcut {
            canonical: parts.join("+"),
            modifiers: self.modifiers,
            keys,
        }
    }
}

impl PartialEq for ShortcutSpec {
    fn eq(&self, other: &Self) -> bool {
        if self.modifiers != other.modifiers || self.keys.len() != other.keys.len() {
            return false;
        }
        // Key order is insignificant for equality (max two keys).
        self.keys.iter().all(|k| other.keys.contains(k))
    }
}

impl Eq for ShortcutSpec {}

impl fmt::Display for ShortcutSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = self.modifiers.canonical_names();
        parts.extend(self.keys.iter().map(|k| k.name()));
        write!(f, "{}", parts.join("+"))
    }
}

impl FromStr for ShortcutSpec {
    type Err = ShortcutParseError;

    /// Parse a shortcut from the wire format `Mod1+Mod2+...+Key1[+Key2]`.
    ///
    /// Modifier names are matched case-insensitively and accept the common
    /// aliases (`control`, `option`, `cmd`, `super`, ...). Key-order
    /// permutations parse to equal specs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ShortcutParseError::Empty);
        }

        let mut modifiers = Modifiers::NONE;
        let mut keys = Vec::new();

        for part in s.split('+') {
            let part = part.trim();
            if part.is_empty() {
                // A trailing "+" names the plus key on some layouts; the wire
                // format does not carry it, so treat it as unknown.
                return Err(ShortcutParseError::UnknownKey("+".to_string()));
            }
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" | "option" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                "meta" | "cmd" | "command" | "win" | "windows" | "super" => modifiers.meta = true,
                _ => match Key::from_name(part) {
                    Some(key) => keys.push(key),
                    None => {
                        tracing::debug!(
                            target: targets::SHORTCUT,
                            key = part,
                            "unknown key name in shortcut string"
                        );
                        return Err(ShortcutParseError::UnknownKey(part.to_string()));
                    }
                },
            }
        }

        Self::from_parts(modifiers, keys)
    }
}

// =============================================================================
// Normalized Shortcut
// =============================================================================

/// The canonical form of a shortcut.
///
/// Equality, ordering, and hashing are all defined over the canonical string,
/// which makes this the dispatch-table key and the conflict-detection unit.
/// The decomposed modifier set and sorted key list ride along so that
/// validators never need to re-parse.
#[derive(Debug, Clone)]
pub struct NormalizedShortcut {
    canonical: String,
    modifiers: Modifiers,
    keys: Vec<Key>,
}

impl NormalizedShortcut {
    /// The canonical string form.
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// The modifier set.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// The non-modifier keys, sorted lexicographically and numpad-folded.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Number of non-modifier keys (1 or 2).
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }
}

impl PartialEq for NormalizedShortcut {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for NormalizedShortcut {}

impl std::hash::Hash for NormalizedShortcut {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl fmt::Display for NormalizedShortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl FromStr for NormalizedShortcut {
    type Err = ShortcutParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<ShortcutSpec>()?.normalize())
    }
}

impl Serialize for NormalizedShortcut {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical)
    }
}

impl<'de> Deserialize<'de> for NormalizedShortcut {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ShortcutVisitor;

        impl<'de> Visitor<'de> for ShortcutVisitor {
            type Value = NormalizedShortcut;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a shortcut string like \"Ctrl+Alt+T\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(ShortcutVisitor)
    }
}
