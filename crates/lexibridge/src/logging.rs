//! Logging facilities for the text engine.
//!
//! The shortcut-engine targets live in `lexibridge_core::logging`; these
//! cover the host-surface side. Install a `tracing` subscriber in the host
//! application to see logs.

/// Target names for log filtering.
pub mod targets {
    /// Focus resolution through shadow hosts.
    pub const FOCUS: &str = "lexibridge::focus";
    /// Mutation pipeline attempts and verification.
    pub const MUTATION: &str = "lexibridge::mutation";
    /// Word-boundary selection.
    pub const WORDSEL: &str = "lexibridge::wordsel";
    /// Operation dispatch and lifecycle.
    pub const ENGINE: &str = "lexibridge::engine";
}
