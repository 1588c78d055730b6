//! Insertion strategies.
//!
//! Host surfaces differ in which mutation mechanism they honor: some respect
//! a structured edit command, some only consume paste-like signals, and some
//! frameworks listen for the raw mutation-event pair and reconcile their own
//! document model. Each mechanism is one [`InsertionStrategy`]; the pipeline
//! tries them in a fixed order and verifies the surface after each attempt.

use crate::field::{DataTransfer, EditIntent, EditSignal, EditableTarget, SignalResponse};

/// What a single strategy attempt reported.
///
/// The attempt outcome says how the delivery went; whether the text actually
/// landed is decided separately by the pipeline's verification step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The host canceled the pre-mutation signal, claiming the insertion for
    /// itself. No further strategies may touch the surface: pushing more
    /// events at a host that claimed the edit risks double insertion.
    HostClaimed,
    /// The strategy delivered its mechanism to the surface.
    Delivered,
    /// The surface does not support this mechanism at all.
    Unsupported,
}

/// A single insertion mechanism with a uniform attempt interface.
pub trait InsertionStrategy {
    /// Short name used in logs and failure messages.
    fn name(&self) -> &'static str;

    /// Try to insert `text` at the target's current selection.
    fn attempt(&self, target: &mut dyn EditableTarget, text: &str) -> AttemptOutcome;
}

// =============================================================================
// Strategy 1: Structured edit signal
// =============================================================================

/// Pre-mutation intent signal, then a direct structured replacement command,
/// then the post-mutation signal.
pub struct StructuredEditStrategy;

impl InsertionStrategy for StructuredEditStrategy {
    fn name(&self) -> &'static str {
        "structured-edit"
    }

    fn attempt(&self, target: &mut dyn EditableTarget, text: &str) -> AttemptOutcome {
        let intent = EditIntent::InsertText {
            text: text.to_string(),
        };

        if target.dispatch_edit(&EditSignal::BeforeInput(intent.clone())) == SignalResponse::Canceled
        {
            return AttemptOutcome::HostClaimed;
        }

        let supported = target.exec_insert_text(text);
        target.dispatch_edit(&EditSignal::Input(intent));

        if supported {
            AttemptOutcome::Delivered
        } else {
            AttemptOutcome::Unsupported
        }
    }
}

// =============================================================================
// Strategy 2: Clipboard-style signal
// =============================================================================

/// A synthesized paste-like signal carrying the text in an in-memory transfer
/// object. The OS clipboard is never involved, so no permission is required.
pub struct ClipboardSignalStrategy;

impl InsertionStrategy for ClipboardSignalStrategy {
    fn name(&self) -> &'static str {
        "clipboard-signal"
    }

    fn attempt(&self, target: &mut dyn EditableTarget, text: &str) -> AttemptOutcome {
        target.dispatch_edit(&EditSignal::Paste(DataTransfer::plain_text(text)));
        AttemptOutcome::Delivered
    }
}

// =============================================================================
// Strategy 3: Raw mutation-event pair
// =============================================================================

/// Pre- and post-mutation signals only, for hosts that consume these events
/// directly and perform the insertion themselves.
pub struct RawEventStrategy;

impl InsertionStrategy for RawEventStrategy {
    fn name(&self) -> &'static str {
        "raw-events"
    }

    fn attempt(&self, target: &mut dyn EditableTarget, text: &str) -> AttemptOutcome {
        let intent = EditIntent::InsertText {
            text: text.to_string(),
        };

        if target.dispatch_edit(&EditSignal::BeforeInput(intent.clone())) == SignalResponse::Canceled
        {
            return AttemptOutcome::HostClaimed;
        }
        target.dispatch_edit(&EditSignal::Input(intent));
        AttemptOutcome::Delivered
    }
}

/// The default strategy order: structured edit, clipboard-style signal, raw
/// event pair.
pub fn default_strategies() -> Vec<Box<dyn InsertionStrategy>> {
    vec![
        Box::new(StructuredEditStrategy),
        Box::new(ClipboardSignalStrategy),
        Box::new(RawEventStrategy),
    ]
}
