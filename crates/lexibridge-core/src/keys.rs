//! Key and modifier types for the shortcut engine.
//!
//! This module defines the vocabulary every other part of the engine speaks:
//! [`Key`] identifies a physical non-modifier key, [`Modifiers`] records which
//! modifier keys are held, and [`KeyPress`] pairs the two into the unit that
//! key-down handlers receive.
//!
//! Modifier keys never appear as [`Key`] values. A bare modifier press carries
//! no `Key` and therefore cannot reach the sequence detector or the dispatch
//! table, which is exactly the behavior the shortcut model requires.

use std::fmt;

/// Modifier keys that may be held during a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Modifiers {
    /// The Control key is held.
    pub ctrl: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Shift key is held.
    pub shift: bool,
    /// The Meta/Super key is held (Windows key, Cmd on macOS).
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        ctrl: true,
        alt: false,
        shift: false,
        meta: false,
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        ctrl: false,
        alt: true,
        shift: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        ctrl: false,
        alt: false,
        shift: true,
        meta: false,
    };

    /// Meta modifier only.
    pub const META: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: true,
    };

    /// Control + Alt modifiers.
    pub const CTRL_ALT: Self = Self {
        ctrl: true,
        alt: true,
        shift: false,
        meta: false,
    };

    /// Control + Shift modifiers.
    pub const CTRL_SHIFT: Self = Self {
        ctrl: true,
        alt: false,
        shift: true,
        meta: false,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.ctrl || self.alt || self.shift || self.meta
    }

    /// Check if no modifiers are pressed.
    pub fn none(&self) -> bool {
        !self.any()
    }

    /// The canonical display names of the held modifiers, in fixed order
    /// (Ctrl, Alt, Shift, Meta).
    ///
    /// This order is part of the persisted wire format and must not change.
    pub fn canonical_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.ctrl {
            names.push("Ctrl");
        }
        if self.alt {
            names.push("Alt");
        }
        if self.shift {
            names.push("Shift");
        }
        if self.meta {
            names.push("Meta");
        }
        names
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_names().join("+"))
    }
}

// =============================================================================
// Key
// =============================================================================

/// A physical non-modifier key.
///
/// Numeric-pad digits are distinct variants so that raw input can be captured
/// faithfully; normalization folds them onto their base-row equivalents via
/// [`Key::fold_numpad`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum Key {
    // Letters
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Base-row digits
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,

    // Numeric-pad digits
    Numpad0,
    Numpad1,
    Numpad2,
    Numpad3,
    Numpad4,
    Numpad5,
    Numpad6,
    Numpad7,
    Numpad8,
    Numpad9,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    // Navigation
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,

    // Editing
    Backspace,
    Delete,
    Insert,
    Enter,
    Tab,
    Space,
    Escape,

    // Punctuation
    Minus,
    Equal,
    BracketLeft,
    BracketRight,
    Backslash,
    Semicolon,
    Quote,
    Comma,
    Period,
    Slash,
    Grave,
}

impl Key {
    /// Check whether this is a numeric-pad digit.
    pub fn is_numpad(self) -> bool {
        matches!(
            self,
            Self::Numpad0
                | Self::Numpad1
                | Self::Numpad2
                | Self::Numpad3
                | Self::Numpad4
                | Self::Numpad5
                | Self::Numpad6
                | Self::Numpad7
                | Self::Numpad8
                | Self::Numpad9
        )
    }

    /// Fold a numeric-pad digit onto its base-row equivalent.
    ///
    /// All other keys are returned unchanged.
    pub fn fold_numpad(self) -> Self {
        match self {
            Self::Numpad0 => Self::Digit0,
            Self::Numpad1 => Self::Digit1,
            Self::Numpad2 => Self::Digit2,
            Self::Numpad3 => Self::Digit3,
            Self::Numpad4 => Self::Digit4,
            Self::Numpad5 => Self::Digit5,
            Self::Numpad6 => Self::Digit6,
            Self::Numpad7 => Self::Digit7,
            Self::Numpad8 => Self::Digit8,
            Self::Numpad9 => Self::Digit9,
            other => other,
        }
    }

    /// The canonical display name of this key.
    ///
    /// Letters are upper-case, digits are their single character, numeric-pad
    /// digits carry a `Num` prefix (they only survive in raw, un-normalized
    /// form), named keys use their common English name.
    pub fn name(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
            Self::H => "H",
            Self::I => "I",
            Self::J => "J",
            Self::K => "K",
            Self::L => "L",
            Self::M => "M",
            Self::N => "N",
            Self::O => "O",
            Self::P => "P",
            Self::Q => "Q",
            Self::R => "R",
            Self::S => "S",
            Self::T => "T",
            Self::U => "U",
            Self::V => "V",
            Self::W => "W",
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
            Self::Digit0 => "0",
            Self::Digit1 => "1",
            Self::Digit2 => "2",
            Self::Digit3 => "3",
            Self::Digit4 => "4",
            Self::Digit5 => "5",
            Self::Digit6 => "6",
            Self::Digit7 => "7",
            Self::Digit8 => "8",
            Self::Digit9 => "9",
            Self::Numpad0 => "Num0",
            Self::Numpad1 => "Num1",
            Self::Numpad2 => "Num2",
            Self::Numpad3 => "Num3",
            Self::Numpad4 => "Num4",
            Self::Numpad5 => "Num5",
            Self::Numpad6 => "Num6",
            Self::Numpad7 => "Num7",
            Self::Numpad8 => "Num8",
            Self::Numpad9 => "Num9",
            Self::F1 => "F1",
            Self::F2 => "F2",
            Self::F3 => "F3",
            Self::F4 => "F4",
            Self::F5 => "F5",
            Self::F6 => "F6",
            Self::F7 => "F7",
            Self::F8 => "F8",
            Self::F9 => "F9",
            Self::F10 => "F10",
            Self::F11 => "F11",
            Self::F12 => "F12",
            Self::ArrowUp => "Up",
            Self::ArrowDown => "Down",
            Self::ArrowLeft => "Left",
            Self::ArrowRight => "Right",
            Self::Home => "Home",
            Self::End => "End",
            Self::PageUp => "PageUp",
            Self::PageDown => "PageDown",
            Self::Backspace => "Backspace",
            Self::Delete => "Delete",
            Self::Insert => "Insert",
            Self::Enter => "Enter",
            Self::Tab => "Tab",
            Self::Space => "Space",
            Self::Escape => "Escape",
            Self::Minus => "-",
            Self::Equal => "=",
            Self::BracketLeft => "[",
            Self::BracketRight => "]",
            Self::Backslash => "\\",
            Self::Semicolon => ";",
            Self::Quote => "'",
            Self::Comma => ",",
            Self::Period => ".",
            Self::Slash => "/",
            Self::Grave => "`",
        }
    }

    /// Parse a key from its name.
    ///
    /// Single alphanumeric characters are accepted in either case and
    /// upper-cased; named keys are matched case-insensitively and accept the
    /// common aliases (`"del"`, `"esc"`, `"pgup"`, ...).
    pub fn from_name(s: &str) -> Option<Self> {
        if s.len() == 1 {
            let ch = s.chars().next()?.to_ascii_uppercase();
            return match ch {
                'A' => Some(Self::A),
                'B' => Some(Self::B),
                'C' => Some(Self::C),
                'D' => Some(Self::D),
                'E' => Some(Self::E),
                'F' => Some(Self::F),
                'G' => Some(Self::G),
                'H' => Some(Self::H),
                'I' => Some(Self::I),
                'J' => Some(Self::J),
                'K' => Some(Self::K),
                'L' => Some(Self::L),
                'M' => Some(Self::M),
                'N' => Some(Self::N),
                'O' => Some(Self::O),
                'P' => Some(Self::P),
                'Q' => Some(Self::Q),
                'R' => Some(Self::R),
                'S' => Some(Self::S),
                'T' => Some(Self::T),
                'U' => Some(Self::U),
                'V' => Some(Self::V),
                'W' => Some(Self::W),
                'X' => Some(Self::X),
                'Y' => Some(Self::Y),
                'Z' => Some(Self::Z),
                '0' => Some(Self::Digit0),
                '1' => Some(Self::Digit1),
                '2' => Some(Self::Digit2),
                '3' => Some(Self::Digit3),
                '4' => Some(Self::Digit4),
                '5' => Some(Self::Digit5),
                '6' => Some(Self::Digit6),
                '7' => Some(Self::Digit7),
                '8' => Some(Self::Digit8),
                '9' => Some(Self::Digit9),
                '-' => Some(Self::Minus),
                '=' => Some(Self::Equal),
                '[' => Some(Self::BracketLeft),
                ']' => Some(Self::BracketRight),
                '\\' => Some(Self::Backslash),
                ';' => Some(Self::Semicolon),
                '\'' => Some(Self::Quote),
                ',' => Some(Self::Comma),
                '.' => Some(Self::Period),
                '/' => Some(Self::Slash),
                '`' => Some(Self::Grave),
                _ => None,
            };
        }

        match s.to_lowercase().as_str() {
            "num0" | "numpad0" => Some(Self::Numpad0),
            "num1" | "numpad1" => Some(Self::Numpad1),
            "num2" | "numpad2" => Some(Self::Numpad2),
            "num3" | "numpad3" => Some(Self::Numpad3),
            "num4" | "numpad4" => Some(Self::Numpad4),
            "num5" | "numpad5" => Some(Self::Numpad5),
            "num6" | "numpad6" => Some(Self::Numpad6),
            "num7" | "numpad7" => Some(Self::Numpad7),
            "num8" | "numpad8" => Some(Self::Numpad8),
            "num9" | "numpad9" => Some(Self::Numpad9),
            "f1" => Some(Self::F1),
            "f2" => Some(Self::F2),
            "f3" => Some(Self::F3),
            "f4" => Some(Self::F4),
            "f5" => Some(Self::F5),
            "f6" => Some(Self::F6),
            "f7" => Some(Self::F7),
            "f8" => Some(Self::F8),
            "f9" => Some(Self::F9),
            "f10" => Some(Self::F10),
            "f11" => Some(Self::F11),
            "f12" => Some(Self::F12),
            "up" | "arrowup" => Some(Self::ArrowUp),
            "down" | "arrowdown" => Some(Self::ArrowDown),
            "left" | "arrowleft" => Some(Self::ArrowLeft),
            "right" | "arrowright" => Some(Self::ArrowRight),
            "home" => Some(Self::Home),
            "end" => Some(Self::End),
            "pageup" | "pgup" => Some(Self::PageUp),
            "pagedown" | "pgdn" => Some(Self::PageDown),
            "backspace" | "back" => Some(Self::Backspace),
            "delete" | "del" => Some(Self::Delete),
            "insert" | "ins" => Some(Self::Insert),
            "enter" | "return" => Some(Self::Enter),
            "tab" => Some(Self::Tab),
            "space" | "spacebar" => Some(Self::Space),
            "escape" | "esc" => Some(Self::Escape),
            "minus" => Some(Self::Minus),
            "equal" | "equals" => Some(Self::Equal),
            "bracketleft" => Some(Self::BracketLeft),
            "bracketright" => Some(Self::BracketRight),
            "backslash" => Some(Self::Backslash),
            "semicolon" => Some(Self::Semicolon),
            "quote" => Some(Self::Quote),
            "comma" => Some(Self::Comma),
            "period" => Some(Self::Period),
            "slash" => Some(Self::Slash),
            "grave" => Some(Self::Grave),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Key Press
// =============================================================================

/// A single key-down observation: one non-modifier key plus the modifiers held
/// at the moment it was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    /// The non-modifier key.
    pub key: Key,
    /// The modifiers held during the press.
    pub modifiers: Modifiers,
}

impl KeyPress {
    /// Create a new key press.
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

impl fmt::Display for KeyPress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.any() {
            write!(f, "{}+{}", self.modifiers, self.key)
        } else {
            write!(f, "{}", self.key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_any_none() {
        assert!(Modifiers::NONE.none());
        assert!(!Modifiers::NONE.any());
        assert!(Modifiers::CTRL.any());
        assert!(Modifiers::CTRL_ALT.any());
    }

    #[test]
    fn test_modifiers_canonical_order() {
        let all = Modifiers {
            ctrl: true,
            alt: true,
            shift: true,
            meta: true,
        };
        assert_eq!(all.canonical_names(), vec!["Ctrl", "Alt", "Shift", "Meta"]);
        assert_eq!(all.to_string(), "Ctrl+Alt+Shift+Meta");
    }

    #[test]
    fn test_numpad_folding() {
        assert_eq!(Key::Numpad0.fold_numpad(), Key::Digit0);
        assert_eq!(Key::Numpad9.fold_numpad(), Key::Digit9);
        assert_eq!(Key::T.fold_numpad(), Key::T);
        assert!(Key::Numpad3.is_numpad());
        assert!(!Key::Digit3.is_numpad());
    }

    #[test]
    fn test_key_from_name_single_char() {
        assert_eq!(Key::from_name("t"), Some(Key::T));
        assert_eq!(Key::from_name("T"), Some(Key::T));
        assert_eq!(Key::from_name("7"), Some(Key::Digit7));
        assert_eq!(Key::from_name("?"), None);
    }

    #[test]
    fn test_key_from_name_named() {
        assert_eq!(Key::from_name("Enter"), Some(Key::Enter));
        assert_eq!(Key::from_name("esc"), Some(Key::Escape));
        assert_eq!(Key::from_name("num4"), Some(Key::Numpad4));
        assert_eq!(Key::from_name("bogus"), None);
    }

    #[test]
    fn test_key_name_round_trip() {
        for key in [Key::A, Key::Digit5, Key::F11, Key::Enter, Key::Numpad2] {
            assert_eq!(Key::from_name(key.name()), Some(key));
        }
    }

    #[test]
    fn test_key_press_display() {
        let press = KeyPress::new(Key::T, Modifiers::CTRL_ALT);
        assert_eq!(press.to_string(), "Ctrl+Alt+T");
        let bare = KeyPress::new(Key::Enter, Modifiers::NONE);
        assert_eq!(bare.to_string(), "Enter");
    }
}
