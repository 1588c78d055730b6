//! Lexibridge: shortcut-driven text transformation for heterogeneous host
//! editing surfaces.
//!
//! Lexibridge lets a user trigger text operations (translation, stylistic
//! transformation, LLM-driven rewriting) on arbitrary text fields via
//! configurable keyboard shortcuts, plus a word-by-word selection extender.
//! The hard problems it owns are:
//!
//! - **Conflict-free multi-key dispatch**: shortcut normalization, prefix
//!   and duplicate conflict validation, and a held-key two-key sequence
//!   detector (all in the `lexibridge-core` crate, re-exported here).
//! - **Reliable text mutation**: a fallback chain of insertion strategies
//!   with post-attempt verification, snapshot rollback, and forced
//!   reconciliation for rich editing frameworks that intercept standard
//!   mutation mechanisms ([`mutation::MutationPipeline`]).
//! - **Selection manipulation**: direction-aware word-boundary extension
//!   over plain fields, delegated to native primitives on rich surfaces
//!   ([`wordsel::extend`]).
//!
//! The transform functions themselves, persistence, and the configuration UI
//! are external collaborators behind the [`engine::Transformer`],
//! [`engine::Notifier`], and [`config::EngineConfig`] seams.
//!
//! # Example
//!
//! ```
//! use futures_util::future::BoxFuture;
//! use lexibridge::config::{ActionConfig, EngineConfig};
//! use lexibridge::engine::{Dispatcher, Notifier, Transformer};
//! use lexibridge::error::TransformError;
//! use lexibridge_core::{ActionKind, RegisteredAction};
//!
//! struct Reverse;
//!
//! impl Transformer for Reverse {
//!     fn transform<'a>(
//!         &'a self,
//!         _action: &RegisteredAction,
//!         text: String,
//!     ) -> BoxFuture<'a, Result<String, TransformError>> {
//!         Box::pin(async move { Ok(text.chars().rev().collect()) })
//!     }
//! }
//!
//! struct StderrNotifier;
//!
//! impl Notifier for StderrNotifier {
//!     fn error(&self, message: &str) {
//!         eprintln!("{message}");
//!     }
//! }
//!
//! let config = EngineConfig {
//!     actions: vec![ActionConfig {
//!         shortcut: "Ctrl+Alt+R".parse().unwrap(),
//!         id: "reverse".into(),
//!         name: "Reverse".into(),
//!         kind: ActionKind::Transformation,
//!     }],
//!     extend_modifier: Default::default(),
//! };
//!
//! let dispatcher = Dispatcher::new(&config, Box::new(Reverse), Box::new(StderrNotifier));
//! assert!(dispatcher.is_ok());
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod field;
pub mod logging;
pub mod mutation;
pub mod prelude;
pub mod wordsel;

pub use config::{ActionConfig, EngineConfig, ExtendModifier};
pub use engine::{Dispatcher, KeyDisposition, Notifier, Transformer};
pub use error::{BridgeError, MutationError, Result, TransformError};
pub use field::{
    DocumentScope, EditableTarget, FieldSnapshot, PlainField, SelectionDirection,
    SelectionOffsets, TargetKind, WordDirection,
};
pub use mutation::{MutationPipeline, ReplaceScope};

// Re-export the shortcut engine so hosts depend on one crate.
pub use lexibridge_core;
