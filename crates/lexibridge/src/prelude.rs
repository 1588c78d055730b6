//! Prelude module for Lexibridge.
//!
//! Re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use lexibridge::prelude::*;
//! ```

// ============================================================================
// Shortcut Engine
// ============================================================================

pub use lexibridge_core::{
    ActionKind, ConflictCheck, DispatchTable, Key, KeyDownOutcome, KeyPress, Modifiers,
    NormalizedShortcut, RegisteredAction, SequenceDetector, ShortcutRecorder, ShortcutSpec,
};

// ============================================================================
// Fields and Selection
// ============================================================================

pub use crate::field::{
    DataTransfer, DocumentScope, EditIntent, EditSignal, EditableTarget, FieldSnapshot, FocusNode,
    PlainField, Resolution, SelectionDirection, SelectionOffsets, SignalResponse, TargetKind,
    WordDirection,
};

// ============================================================================
// Mutation and Dispatch
// ============================================================================

pub use crate::config::{ActionConfig, EngineConfig, ExtendModifier};
pub use crate::engine::{Dispatcher, KeyDisposition, Notifier, Transformer};
pub use crate::error::{BridgeError, MutationError, TransformError};
pub use crate::mutation::{InsertionStrategy, MutationPipeline, ReplaceScope};
