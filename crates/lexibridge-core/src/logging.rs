//! Logging facilities for the shortcut engine.
//!
//! Lexibridge instruments with the `tracing` crate. To see logs, install a
//! subscriber in the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem, e.g.
/// `RUST_LOG=lexibridge::sequence=trace`.
pub mod targets {
    /// Shortcut parsing and normalization.
    pub const SHORTCUT: &str = "lexibridge::shortcut";
    /// Sequence detector transitions.
    pub const SEQUENCE: &str = "lexibridge::sequence";
    /// Dispatch table rebuilds and lookups.
    pub const DISPATCH: &str = "lexibridge::dispatch";
    /// Shortcut capture for the settings UI.
    pub const RECORDER: &str = "lexibridge::recorder";
}
