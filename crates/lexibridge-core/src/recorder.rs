//! Incremental shortcut capture for the settings UI.
//!
//! A [`ShortcutRecorder`] turns live key events into a [`ShortcutSpec`]:
//! the settings surface starts a recording, forwards key-downs while the user
//! holds a modifier combination and presses up to two keys, and then calls
//! [`finish`](ShortcutRecorder::finish) to obtain the captured spec (or the
//! same validation error the normalizer would raise).
//!
//! The recorder is deliberately value-returning: it renders nothing and
//! stores nothing, so any configuration surface can drive it.

use crate::keys::{Key, KeyPress, Modifiers};
use crate::logging::targets;
use crate::shortcut::{ShortcutParseError, ShortcutSpec};

/// Captures a shortcut from a stream of key-down events.
#[derive(Debug, Default)]
pub struct ShortcutRecorder {
    recording: bool,
    modifiers: Modifiers,
    keys: Vec<Key>,
}

impl ShortcutRecorder {
    /// Create an idle recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) a recording, discarding any captured state.
    pub fn begin(&mut self) {
        self.recording = true;
        self.modifiers = Modifiers::NONE;
        self.keys.clear();
    }

    /// Whether a recording is in progress.
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Feed a key-down event into the recording.
    ///
    /// The first press fixes the modifier set; a press with different
    /// modifiers, or a third key, restarts the capture from that press. A
    /// bare Escape cancels the recording.
    ///
    /// Events arriving while no recording is active are ignored.
    pub fn key_down(&mut self, press: KeyPress) {
        if !self.recording {
            return;
        }

        if press.key == Key::Escape && press.modifiers.none() {
            self.cancel();
            return;
        }

        let restart = self.keys.is_empty()
            || press.modifiers != self.modifiers
            || (self.keys.len() == 2 && !self.keys.contains(&press.key));
        if restart && !self.keys.is_empty() {
            self.keys.clear();
        }

        self.modifiers = press.modifiers;
        if !self.keys.contains(&press.key) {
            self.keys.push(press.key);
        }
    }

    /// Abort the recording and discard captured state.
    pub fn cancel(&mut self) {
        self.recording = false;
        self.modifiers = Modifiers::NONE;
        self.keys.clear();
    }

    /// A display string of what has been captured so far, in press order.
    pub fn preview(&self) -> String {
        let mut parts = self.modifiers.canonical_names();
        parts.extend(self.keys.iter().map(|k| k.name()));
        parts.join("+")
    }

    /// End the recording and validate the captured combination.
    pub fn finish(&mut self) -> Result<ShortcutSpec, ShortcutParseError> {
        self.recording = false;
        let keys = std::mem::take(&mut self.keys);
        let modifiers = std::mem::replace(&mut self.modifiers, Modifiers::NONE);
        let spec = ShortcutSpec::from_parts(modifiers, keys);
        match &spec {
            Ok(captured) => tracing::trace!(
                target: targets::RECORDER,
                shortcut = %captured,
                "recording finished"
            ),
            Err(err) => tracing::trace!(
                target: targets::RECORDER,
                error = %err,
                "recording finished with an invalid combination"
            ),
        }
        spec
    }
}
