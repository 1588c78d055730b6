//! Error types for the text engine.
//!
//! The taxonomy follows the recovery policy, not the module layout:
//!
//! 1. Configuration errors ([`lexibridge_core::CoreError`]) are rejected
//!    synchronously at registration and never reach dispatch.
//! 2. Resolution failures (no editable target, no page selection) are a
//!    silent no-op and have no error type at all.
//! 3. Transform errors ([`TransformError`]) and mutation errors
//!    ([`MutationError`]) are caught at the single outer boundary of the
//!    dispatched action, recovered by restoring the pre-operation snapshot,
//!    and surfaced as one human-readable notification.

use std::time::Duration;

/// Convenience alias for engine results.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Failure of the external transform collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    /// The collaborator reported a failure.
    #[error("transform failed: {0}")]
    Failed(String),

    /// A network-backed transform exceeded the fixed upper-bound timeout.
    #[error("transform timed out after {}s", .0.as_secs())]
    TimedOut(Duration),
}

/// Failure of the text mutation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MutationError {
    /// Every insertion strategy failed verification.
    #[error("could not write into the field (strategies tried: {})", .attempted.join(", "))]
    AllStrategiesFailed {
        /// Names of the strategies attempted, in order.
        attempted: Vec<&'static str>,
    },

    /// A host framework claimed the edit but the field never changed.
    #[error("the host editor claimed the edit but did not apply it")]
    HostClaimedWithoutEffect,
}

/// The main error type for dispatched operations.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// Invalid or conflicting configuration.
    #[error(transparent)]
    Config(#[from] lexibridge_core::CoreError),

    /// The transform collaborator failed or timed out.
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// All insertion strategies failed verification.
    #[error(transparent)]
    Mutation(#[from] MutationError),

    /// The focused target disappeared while an operation was suspended.
    #[error("the text field lost focus before the result arrived")]
    TargetLost,
}
