//! Multi-key sequence detection.
//!
//! A two-key shortcut is entered by pressing its first key with the modifiers
//! held, keeping the first key (or at least the modifiers) down, and pressing
//! the second key. The [`SequenceDetector`] is the small state machine that
//! recognizes this, while also resolving plain single-combination shortcuts
//! on the same key-down.
//!
//! The machine has two states and is re-entrant for the life of the document:
//!
//! ```text
//!            key-down, no 1-key match
//!   Idle ──────────────────────────────▶ Armed
//!     ▲                                   │
//!     │   second key-down (dispatch),     │
//!     │   armed key-up (abandon),         │
//!     └──────────────  blur  ─────────────┘
//! ```
//!
//! Abandonment is driven by physical key release, not wall-clock expiry; the
//! armed timestamp exists for tracing only. Document blur also resets the
//! machine, guarding against key-up events lost to focus changes.

use std::time::Instant;

use crate::dispatch::DispatchTable;
use crate::keys::{Key, KeyPress, Modifiers};
use crate::logging::targets;
use crate::shortcut::{NormalizedShortcut, ShortcutSpec};

/// The first keystroke of a potential two-key sequence.
#[derive(Debug, Clone, Copy)]
struct ArmedKey {
    key: Key,
    modifiers: Modifiers,
    armed_at: Instant,
}

/// What the detector decided for one physical key-down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyDownOutcome {
    /// A registered shortcut matched; the caller dispatches the action and
    /// suppresses the host's default handling.
    Dispatch(NormalizedShortcut),
    /// The press armed a potential two-key sequence; default handling
    /// proceeds (the press may still be ordinary typing).
    Armed,
    /// Nothing matched; default handling proceeds.
    Pass,
}

/// Per-document sequence recognition state machine.
///
/// One instance lives per document context, owned by the dispatcher; it holds
/// the only mutable sequence state in the system.
#[derive(Debug, Default)]
pub struct SequenceDetector {
    armed: Option<ArmedKey>,
}

impl SequenceDetector {
    /// Create a detector in the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a first keystroke is currently armed.
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Feed a key-down event.
    ///
    /// At most one action is dispatched per physical key-down. The 1-key
    /// candidate is checked first; if it misses and a different key is armed
    /// with the same modifiers still held, the order-independent 2-key
    /// candidate is checked next.
    pub fn key_down(&mut self, press: KeyPress, table: &DispatchTable) -> KeyDownOutcome {
        if press.modifiers.none() {
            // Unmodified typing can never form a shortcut. Leave any armed
            // state alone; the armed key's own key-up will clear it.
            return KeyDownOutcome::Pass;
        }

        // Two-key candidate: a different key while the original modifiers are
        // still held. Checked before the single candidate so the combined
        // shortcut wins over arming a fresh sequence, and resolved to Idle
        // regardless of whether the table has it.
        if let Some(armed) = self.armed {
            if press.key != armed.key && press.modifiers == armed.modifiers {
                let candidate =
                    ShortcutSpec::pair(armed.modifiers, armed.key, press.key).normalize();
                self.armed = None;
                if table.get(&candidate).is_some() {
                    tracing::trace!(
                        target: targets::SEQUENCE,
                        shortcut = %candidate,
                        "two-key sequence matched"
                    );
                    return KeyDownOutcome::Dispatch(candidate);
                }
                return KeyDownOutcome::Pass;
            }
        }

        // Single-combination candidate for this exact press.
        let single = ShortcutSpec::single(press.modifiers, press.key).normalize();
        if table.get(&single).is_some() {
            self.armed = None;
            tracing::trace!(
                target: targets::SEQUENCE,
                shortcut = %single,
                "single combination matched"
            );
            return KeyDownOutcome::Dispatch(single);
        }

        // No single match: this press becomes the armed first keystroke.
        self.armed = Some(ArmedKey {
            key: press.key,
            modifiers: press.modifiers,
            armed_at: Instant::now(),
        });
        KeyDownOutcome::Armed
    }

    /// Feed a key-up event. Releasing the armed key abandons the sequence.
    pub fn key_up(&mut self, key: Key) {
        if let Some(armed) = self.armed {
            if armed.key == key {
                tracing::trace!(
                    target: targets::SEQUENCE,
                    key = %key,
                    held_ms = armed.armed_at.elapsed().as_millis() as u64,
                    "sequence abandoned on key release"
                );
                self.armed = None;
            }
        }
    }

    /// Reset on document blur.
    ///
    /// Focus loss can swallow the armed key's key-up; without this reset the
    /// machine could stay armed indefinitely.
    pub fn blur(&mut self) {
        if self.armed.take().is_some() {
            tracing::trace!(target: targets::SEQUENCE, "sequence reset on blur");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{ActionKind, RegisteredAction};

    fn table(entries: &[(&str, &str)]) -> DispatchTable {
        DispatchTable::build(
            entries
                .iter()
                .map(|(shortcut, id)| RegisteredAction {
                    shortcut: shortcut.parse().unwrap(),
                    action_id: id.to_string(),
                    display_name: id.to_string(),
                    kind: ActionKind::Transformation,
                })
                .collect(),
        )
        .unwrap()
    }

    fn press(key: Key, modifiers: Modifiers) -> KeyPress {
        KeyPress::new(key, modifiers)
    }

    #[test]
    fn test_single_combination_dispatches_immediately() {
        let table = table(&[("Ctrl+Alt+T", "translate")]);
        let mut detector = SequenceDetector::new();

        let outcome = detector.key_down(press(Key::T, Modifiers::CTRL_ALT), &table);
        assert_eq!(
            outcome,
            KeyDownOutcome::Dispatch("Ctrl+Alt+T".parse().unwrap())
        );
        assert!(!detector.is_armed());
    }

    #[test]
    fn test_two_key_sequence_dispatches() {
        let table = table(&[("Ctrl+Alt+T+1", "formal")]);
        let mut detector = SequenceDetector::new();

        let first = detector.key_down(press(Key::T, Modifiers::CTRL_ALT), &table);
        assert_eq!(first, KeyDownOutcome::Armed);
        assert!(detector.is_armed());

        let second = detector.key_down(press(Key::Digit1, Modifiers::CTRL_ALT), &table);
        assert_eq!(
            second,
            KeyDownOutcome::Dispatch("Ctrl+Alt+1+T".parse().unwrap())
        );
        assert!(!detector.is_armed());
    }

    #[test]
    fn test_two_key_sequence_order_independent() {
        let table = table(&[("Ctrl+Alt+T+1", "formal")]);
        let mut detector = SequenceDetector::new();

        detector.key_down(press(Key::Digit1, Modifiers::CTRL_ALT), &table);
        let outcome = detector.key_down(press(Key::T, Modifiers::CTRL_ALT), &table);
        assert!(matches!(outcome, KeyDownOutcome::Dispatch(_)));
    }

    #[test]
    fn test_abandoned_sequence_does_not_leak() {
        let table = table(&[("Ctrl+Alt+T+1", "formal"), ("Ctrl+Alt+2", "casual")]);
        let mut detector = SequenceDetector::new();

        // Arm T, release it without a second key.
        detector.key_down(press(Key::T, Modifiers::CTRL_ALT), &table);
        detector.key_up(Key::T);
        assert!(!detector.is_armed());

        // The next press must resolve on its own, not combine with T.
        let outcome = detector.key_down(press(Key::Digit2, Modifiers::CTRL_ALT), &table);
        assert_eq!(
            outcome,
            KeyDownOutcome::Dispatch("Ctrl+Alt+2".parse().unwrap())
        );
    }

    #[test]
    fn test_failed_combination_resets_to_idle() {
        let table = table(&[("Ctrl+Alt+T+1", "formal")]);
        let mut detector = SequenceDetector::new();

        detector.key_down(press(Key::T, Modifiers::CTRL_ALT), &table);
        // A second key that forms no registered pair: back to idle.
        let outcome = detector.key_down(press(Key::Digit9, Modifiers::CTRL_ALT), &table);
        assert_eq!(outcome, KeyDownOutcome::Pass);
        assert!(!detector.is_armed());
    }

    #[test]
    fn test_modifier_change_blocks_combination() {
        let table = table(&[("Ctrl+Alt+T+1", "formal")]);
        let mut detector = SequenceDetector::new();

        detector.key_down(press(Key::T, Modifiers::CTRL_ALT), &table);
        // Modifiers no longer match the armed ones: no combination.
        let outcome = detector.key_down(press(Key::Digit1, Modifiers::CTRL), &table);
        assert_ne!(
            outcome,
            KeyDownOutcome::Dispatch("Ctrl+Alt+1+T".parse().unwrap())
        );
    }

    #[test]
    fn test_unmodified_typing_passes_through() {
        let table = table(&[("Ctrl+Alt+T", "translate")]);
        let mut detector = SequenceDetector::new();

        let outcome = detector.key_down(press(Key::T, Modifiers::NONE), &table);
        assert_eq!(outcome, KeyDownOutcome::Pass);
        assert!(!detector.is_armed());
    }

    #[test]
    fn test_blur_resets_armed_state() {
        let table = table(&[("Ctrl+Alt+T+1", "formal")]);
        let mut detector = SequenceDetector::new();

        detector.key_down(press(Key::T, Modifiers::CTRL_ALT), &table);
        assert!(detector.is_armed());
        detector.blur();
        assert!(!detector.is_armed());
    }

    #[test]
    fn test_unrelated_key_up_keeps_armed_state() {
        let table = table(&[("Ctrl+Alt+T+1", "formal")]);
        let mut detector = SequenceDetector::new();

        detector.key_down(press(Key::T, Modifiers::CTRL_ALT), &table);
        detector.key_up(Key::Digit5);
        assert!(detector.is_armed());
    }
}
