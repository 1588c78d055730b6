//! The operation dispatcher.
//!
//! [`Dispatcher`] is the single owner of all mutable engine state in a
//! document context: the dispatch table, the sequence detector, and the busy
//! flag. Host key events enter through [`key_down`](Dispatcher::key_down) /
//! [`key_up`](Dispatcher::key_up) / [`blur`](Dispatcher::blur); a matched
//! shortcut drives the full operation:
//!
//! 1. resolve the focused editable target (or the static page selection),
//! 2. capture a [`FieldSnapshot`] and the source text,
//! 3. await the transform collaborator, bounded by a fixed timeout,
//! 4. commit the result through the mutation pipeline,
//! 5. on any failure, restore the snapshot and surface one notification.
//!
//! Only one operation may be in flight at a time: the busy flag rejects new
//! triggers while one is pending, so two mutation pipelines can never race
//! on the same field. Every await re-resolves the focused target afterwards,
//! because the document may have changed while the operation was suspended.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use futures_util::future::BoxFuture;
use parking_lot::{Mutex, RwLock};

use lexibridge_core::{
    ConflictCheck, DispatchTable, Key, KeyDownOutcome, KeyPress, Modifiers, NormalizedShortcut,
    RegisteredAction, RegistryError, SequenceDetector,
};

use crate::config::EngineConfig;
use crate::error::{BridgeError, TransformError};
use crate::field::{
    self, DocumentScope, FieldSnapshot, Resolution, SelectionDirection, SelectionOffsets,
    WordDirection,
};
use crate::logging::targets;
use crate::mutation::{MutationPipeline, ReplaceScope};
use crate::wordsel;

/// Upper bound on a single transform, network-backed or not.
const TRANSFORM_TIMEOUT: Duration = Duration::from_secs(10);

/// The external transform collaborator.
///
/// Local transforms resolve their future immediately; network-backed ones
/// suspend. The dispatcher awaits both uniformly and applies the timeout
/// either way.
pub trait Transformer {
    /// Produce the replacement text for `text` under the given action.
    fn transform<'a>(
        &'a self,
        action: &RegisteredAction,
        text: String,
    ) -> BoxFuture<'a, Result<String, TransformError>>;
}

/// The user-notification collaborator.
pub trait Notifier {
    /// Surface a single human-readable failure message.
    fn error(&self, message: &str);

    /// Deliver a transform result that had nowhere to be written (static
    /// page selections are readable but not editable).
    fn result(&self, text: &str) {
        let _ = text;
    }
}

/// Whether the host should suppress its default handling of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// The engine consumed the event; suppress default handling.
    Handled,
    /// Not ours; let the host proceed.
    Pass,
}

/// Per-document operation dispatcher.
pub struct Dispatcher {
    table: RwLock<DispatchTable>,
    detector: Mutex<SequenceDetector>,
    extend_modifier: RwLock<Modifiers>,
    busy: AtomicBool,
    pipeline: MutationPipeline,
    transformer: Box<dyn Transformer>,
    notifier: Box<dyn Notifier>,
    transform_timeout: Duration,
    placeholder: Option<String>,
}

impl Dispatcher {
    /// Create a dispatcher from a validated configuration.
    pub fn new(
        config: &EngineConfig,
        transformer: Box<dyn Transformer>,
        notifier: Box<dyn Notifier>,
    ) -> Result<Self, RegistryError> {
        Ok(Self {
            table: RwLock::new(config.build_table()?),
            detector: Mutex::new(SequenceDetector::new()),
            extend_modifier: RwLock::new(config.extend_modifier.modifiers()),
            busy: AtomicBool::new(false),
            pipeline: MutationPipeline::new(),
            transformer,
            notifier,
            transform_timeout: TRANSFORM_TIMEOUT,
            placeholder: None,
        })
    }

    /// Replace the mutation pipeline (tests, unusual hosts).
    pub fn with_pipeline(mut self, pipeline: MutationPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Override the transform timeout.
    pub fn with_transform_timeout(mut self, timeout: Duration) -> Self {
        self.transform_timeout = timeout;
        self
    }

    /// Show an interim placeholder in the field while a transform is
    /// pending. The placeholder write is awaited to completion before the
    /// final result write begins.
    pub fn with_placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Whether an operation is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Rebuild the dispatch table and word-extension trigger from a new
    /// configuration. Resets any armed sequence.
    pub fn apply_config(&self, config: &EngineConfig) -> Result<(), RegistryError> {
        let table = config.build_table()?;
        *self.table.write() = table;
        *self.extend_modifier.write() = config.extend_modifier.modifiers();
        self.detector.lock().blur();
        Ok(())
    }

    /// Validate a candidate shortcut against the live table, for the
    /// settings UI.
    pub fn check_candidate(&self, candidate: &NormalizedShortcut) -> ConflictCheck {
        self.table.read().check_candidate(candidate)
    }

    /// Feed a key-up event.
    pub fn key_up(&self, key: Key) {
        self.detector.lock().key_up(key);
    }

    /// Feed a document blur.
    pub fn blur(&self) {
        self.detector.lock().blur();
    }

    /// Feed a key-down event.
    ///
    /// Returns [`KeyDisposition::Handled`] only when the event matched a
    /// registered shortcut or the word-extension trigger; arming a sequence
    /// does not suppress default handling.
    pub async fn key_down(
        &self,
        press: KeyPress,
        scope: &mut dyn DocumentScope,
    ) -> KeyDisposition {
        if press.modifiers == *self.extend_modifier.read() {
            let direction = match press.key {
                Key::ArrowRight => Some(WordDirection::Next),
                Key::ArrowLeft => Some(WordDirection::Previous),
                _ => None,
            };
            if let Some(direction) = direction {
                return match field::resolve_target(scope) {
                    Some(target) => {
                        wordsel::extend(target, direction);
                        KeyDisposition::Handled
                    }
                    None => KeyDisposition::Pass,
                };
            }
        }

        let outcome = {
            let table = self.table.read();
            self.detector.lock().key_down(press, &table)
        };

        match outcome {
            KeyDownOutcome::Dispatch(shortcut) => {
                let action = self.table.read().get(&shortcut).cloned();
                match action {
                    Some(action) => {
                        self.run_operation(action, scope).await;
                        KeyDisposition::Handled
                    }
                    None => KeyDisposition::Pass,
                }
            }
            KeyDownOutcome::Armed | KeyDownOutcome::Pass => KeyDisposition::Pass,
        }
    }

    /// Run one dispatched operation end to end, holding the busy flag.
    async fn run_operation(&self, action: RegisteredAction, scope: &mut dyn DocumentScope) {
        if self.busy.swap(true, Ordering::AcqRel) {
            tracing::debug!(
                target: targets::ENGINE,
                action = %action.display_name,
                "trigger rejected: an operation is already in flight"
            );
            return;
        }

        let outcome = self.operate(&action, scope).await;
        self.busy.store(false, Ordering::Release);

        if let Err(err) = outcome {
            tracing::warn!(
                target: targets::ENGINE,
                action = %action.display_name,
                error = %err,
                "operation failed"
            );
            self.notifier
                .error(&format!("{}: {err}", action.display_name));
        }
    }

    /// The single outer boundary of a dispatched action. Every transform and
    /// mutation failure funnels through the returned error; resolution
    /// failures are a silent no-op.
    async fn operate(
        &self,
        action: &RegisteredAction,
        scope: &mut dyn DocumentScope,
    ) -> Result<(), BridgeError> {
        let (source, snapshot, replace_scope) = match field::resolve(scope) {
            Resolution::None => return Ok(()),
            Resolution::StaticSelection(text) => {
                // Readable but not writable: transform and report.
                let result = self.run_transform(action, text).await?;
                self.notifier.result(&result);
                return Ok(());
            }
            Resolution::Editable(target) => {
                let snapshot = FieldSnapshot::capture(target);
                let selection = target.selection();
                if selection.is_collapsed() {
                    (target.text(), snapshot, ReplaceScope::FullText)
                } else {
                    (target.selected_text(), snapshot, ReplaceScope::Selection)
                }
            }
        };

        if source.is_empty() {
            return Ok(());
        }

        // Interim placeholder, fully awaited before the transform result may
        // be written: two interleaved in-flight writes would corrupt the
        // field.
        let mut placeholder_span = None;
        if let Some(placeholder) = &self.placeholder {
            if let Some(target) = field::resolve_target(scope) {
                match self.pipeline.commit(target, placeholder, replace_scope).await {
                    Ok(()) => {
                        let start = match replace_scope {
                            ReplaceScope::FullText => 0,
                            ReplaceScope::Selection => snapshot.selection().start(),
                        };
                        placeholder_span = Some((start, start + placeholder.chars().count()));
                    }
                    Err(err) => {
                        tracing::debug!(
                            target: targets::ENGINE,
                            error = %err,
                            "placeholder write failed; continuing without it"
                        );
                    }
                }
            }
        }

        let transformed = self.run_transform(action, source).await;

        // The operation was suspended: the focused target must be resolved
        // afresh before anything touches the document again.
        match (transformed, field::resolve_target(scope)) {
            (Ok(result), Some(target)) => {
                let commit_scope = match placeholder_span {
                    Some((start, end)) => {
                        target.set_selection(SelectionOffsets::new(
                            start,
                            end,
                            SelectionDirection::Forward,
                        ));
                        ReplaceScope::Selection
                    }
                    None => replace_scope,
                };
                match self.pipeline.commit(target, &result, commit_scope).await {
                    Ok(()) => Ok(()),
                    Err(err) => {
                        target.restore(&snapshot);
                        Err(err.into())
                    }
                }
            }
            (Ok(_), None) => Err(BridgeError::TargetLost),
            (Err(err), Some(target)) => {
                target.restore(&snapshot);
                Err(err.into())
            }
            (Err(err), None) => Err(err.into()),
        }
    }

    async fn run_transform(
        &self,
        action: &RegisteredAction,
        text: String,
    ) -> Result<String, TransformError> {
        match tokio::time::timeout(
            self.transform_timeout,
            self.transformer.transform(action, text),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(TransformError::TimedOut(self.transform_timeout)),
        }
    }
}
