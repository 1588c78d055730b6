//! Core systems for Lexibridge.
//!
//! This crate provides the shortcut engine underneath the Lexibridge text
//! dispatcher:
//!
//! - **Key Model**: physical keys and modifier sets ([`Key`], [`Modifiers`])
//! - **Normalization**: canonical shortcut strings with numpad folding and
//!   order-independent two-key combinations ([`ShortcutSpec`],
//!   [`NormalizedShortcut`])
//! - **Conflict Validation**: duplicate and prefix detection with owner
//!   attribution ([`conflict::check`])
//! - **Sequence Detection**: the per-document state machine that recognizes
//!   held-key two-key sequences ([`SequenceDetector`])
//! - **Dispatch Table**: a conflict-free shortcut → action mapping rebuilt
//!   from configuration ([`DispatchTable`])
//! - **Shortcut Capture**: incremental recording for settings surfaces
//!   ([`ShortcutRecorder`])
//!
//! Everything here is pure and synchronous; the async operation driver and
//! all host-surface knowledge live in the `lexibridge` crate.
//!
//! # Example
//!
//! ```
//! use lexibridge_core::{
//!     ActionKind, DispatchTable, Key, KeyDownOutcome, KeyPress, Modifiers,
//!     RegisteredAction, SequenceDetector,
//! };
//!
//! let table = DispatchTable::build(vec![RegisteredAction {
//!     shortcut: "Ctrl+Alt+T".parse().unwrap(),
//!     action_id: "translate".into(),
//!     display_name: "Translate".into(),
//!     kind: ActionKind::Translation,
//! }])
//! .unwrap();
//!
//! let mut detector = SequenceDetector::new();
//! let outcome = detector.key_down(KeyPress::new(Key::T, Modifiers::CTRL_ALT), &table);
//! assert!(matches!(outcome, KeyDownOutcome::Dispatch(_)));
//! ```

pub mod conflict;
mod dispatch;
mod error;
mod keys;
pub mod logging;
mod recorder;
mod sequence;
mod shortcut;

pub use conflict::ConflictCheck;
pub use dispatch::{ActionKind, DispatchTable, RegisteredAction, RegistryError};
pub use error::{CoreError, Result};
pub use keys::{Key, KeyPress, Modifiers};
pub use recorder::ShortcutRecorder;
pub use sequence::{KeyDownOutcome, SequenceDetector};
pub use shortcut::{NormalizedShortcut, ShortcutParseError, ShortcutSpec, MAX_SHORTCUT_KEYS};

// The engine's value types cross the content-script boundary freely.
static_assertions::assert_impl_all!(NormalizedShortcut: Send, Sync);
static_assertions::assert_impl_all!(RegisteredAction: Send, Sync);
static_assertions::assert_impl_all!(DispatchTable: Send, Sync);
