//! The text mutation pipeline.
//!
//! Committing text into an arbitrary host surface is unreliable: rich
//! editing frameworks intercept standard mutation mechanisms and each honors
//! a different one. The pipeline therefore tries an ordered list of
//! [`InsertionStrategy`] values and verifies the surface after every attempt,
//! stopping at the first attempt that demonstrably landed.
//!
//! Verification is deliberately loose: the inserted text must appear as a
//! substring of the field, *or* the field's total length must have changed
//! from its pre-attempt value. The second clause catches hosts that normalize
//! whitespace or line breaks during insertion, where the exact substring
//! check would false-negative on an insertion that in fact succeeded.
//!
//! The pipeline never leaves a field half-mutated on purpose: if every
//! strategy fails verification it reports the failure and the caller restores
//! the pre-operation [`FieldSnapshot`](crate::field::FieldSnapshot).

mod strategies;

pub use strategies::{
    default_strategies, AttemptOutcome, ClipboardSignalStrategy, InsertionStrategy,
    RawEventStrategy, StructuredEditStrategy,
};

use std::time::Duration;

use crate::error::MutationError;
use crate::field::{EditableTarget, SelectionDirection, SelectionOffsets, TargetKind};
use crate::logging::targets;

/// Delay between the select-all and the first insertion attempt, giving host
/// frameworks a chance to observe the selection change.
const SELECT_GRACE: Duration = Duration::from_millis(10);

/// Settle delay inside the focus-cycle reconciliation forced on rich
/// surfaces after a successful mutation.
const SETTLE_DELAY: Duration = Duration::from_millis(25);

/// What part of the target an operation replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceScope {
    /// Replace the current (non-collapsed) selection.
    Selection,
    /// Replace the entire content.
    FullText,
}

/// Verification predicate applied after each insertion attempt.
///
/// `pre_len` is the field's character count captured immediately before the
/// attempt.
pub fn verify_insertion(current: &str, inserted: &str, pre_len: usize) -> bool {
    current.contains(inserted) || current.chars().count() != pre_len
}

/// The ordered-strategy text committer.
pub struct MutationPipeline {
    strategies: Vec<Box<dyn InsertionStrategy>>,
    select_grace: Duration,
    settle_delay: Duration,
}

impl Default for MutationPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl MutationPipeline {
    /// Create a pipeline with the default strategy order and delays.
    pub fn new() -> Self {
        Self {
            strategies: default_strategies(),
            select_grace: SELECT_GRACE,
            settle_delay: SETTLE_DELAY,
        }
    }

    /// Override the delays. Used by hosts with unusually slow frameworks and
    /// by tests.
    pub fn with_delays(mut self, select_grace: Duration, settle_delay: Duration) -> Self {
        self.select_grace = select_grace;
        self.settle_delay = settle_delay;
        self
    }

    /// Commit `new_text` into the target, replacing the given scope.
    ///
    /// On success the cursor is collapsed after the inserted text: by offset
    /// for plain fields, via the last text node for rich surfaces. Rich
    /// surfaces additionally get a focus-cycle reconciliation so frameworks
    /// that cache their document model re-read the surface.
    ///
    /// On failure the field may or may not have been touched by a host
    /// framework; the caller owns the snapshot and must restore it.
    pub async fn commit(
        &self,
        target: &mut dyn EditableTarget,
        new_text: &str,
        scope: ReplaceScope,
    ) -> Result<(), MutationError> {
        if scope == ReplaceScope::FullText {
            let len = target.char_len();
            target.set_selection(SelectionOffsets::new(0, len, SelectionDirection::Forward));
            tokio::time::sleep(self.select_grace).await;
        }
        let insert_at = target.selection().start();

        let mut attempted = Vec::new();
        let mut landed = false;
        let mut host_claimed = false;

        for strategy in &self.strategies {
            let pre_len = target.char_len();
            attempted.push(strategy.name());
            let outcome = strategy.attempt(target, new_text);
            let verified = verify_insertion(&target.text(), new_text, pre_len);
            tracing::debug!(
                target: targets::MUTATION,
                strategy = strategy.name(),
                ?outcome,
                verified,
                "insertion attempt"
            );

            match outcome {
                AttemptOutcome::HostClaimed => {
                    // The host owns the edit now; dispatching further
                    // strategies at it could insert twice.
                    landed = verified;
                    host_claimed = !verified;
                    break;
                }
                AttemptOutcome::Delivered | AttemptOutcome::Unsupported => {
                    if verified {
                        landed = true;
                        break;
                    }
                }
            }
        }

        if !landed {
            return Err(if host_claimed {
                MutationError::HostClaimedWithoutEffect
            } else {
                MutationError::AllStrategiesFailed { attempted }
            });
        }

        match target.kind() {
            TargetKind::Plain => {
                let end = insert_at + new_text.chars().count();
                target.set_selection(SelectionOffsets::collapsed(end));
            }
            TargetKind::Rich => {
                target.set_focused(false);
                tokio::time::sleep(self.settle_delay).await;
                target.set_focused(true);
                target.collapse_to_last_text_node();
            }
        }
        Ok(())
    }
}
