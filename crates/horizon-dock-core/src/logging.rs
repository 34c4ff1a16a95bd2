//! Logging facilities for Horizon Dock.
//!
//! Horizon Dock uses the `tracing` crate for instrumentation and never
//! installs a subscriber itself. To see logs, install one in the host:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_dock::reveal=debug")
//!     .init();
//! ```
//!
//! Every log line carries one of the [`targets`] so subsystems can be
//! filtered independently.

/// Target names for log filtering.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "horizon_dock_core";
    /// Timer queue target.
    pub const TIMER: &str = "horizon_dock_core::timer";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_dock_core::signal";
    /// Dock composition root target.
    pub const DOCK: &str = "horizon_dock::dock";
    /// List reconciliation target.
    pub const RECONCILE: &str = "horizon_dock::reconcile";
    /// Edge reveal state machine target.
    pub const REVEAL: &str = "horizon_dock::reveal";
    /// Performance spans target.
    pub const PERF: &str = "horizon_dock::perf";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to time a reconciliation pass.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Trace-level event under an explicit dock target.
#[macro_export]
macro_rules! dock_trace {
    ($target:expr, $($arg:tt)*) => {
        tracing::trace!(target: $target, $($arg)*)
    };
}

/// Debug-level event under an explicit dock target.
#[macro_export]
macro_rules! dock_debug {
    ($target:expr, $($arg:tt)*) => {
        tracing::debug!(target: $target, $($arg)*)
    };
}

/// Warn-level event under an explicit dock target.
#[macro_export]
macro_rules! dock_warn {
    ($target:expr, $($arg:tt)*) => {
        tracing::warn!(target: $target, $($arg)*)
    };
}

/// Error-level event under an explicit dock target.
#[macro_export]
macro_rules! dock_error {
    ($target:expr, $($arg:tt)*) => {
        tracing::error!(target: $target, $($arg)*)
    };
}
