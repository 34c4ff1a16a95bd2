//! Error types for the dock.

use crate::config::ConfigError;
use crate::reconcile::ReconcileError;

/// Result type alias for dock operations.
pub type Result<T> = std::result::Result<T, DockError>;

/// Errors that can occur in the dock.
#[derive(Debug, thiserror::Error)]
pub enum DockError {
    /// The favorites or the visual list violated a reconciliation precondition.
    #[error("Reconciliation failed: {0}")]
    Reconcile(#[from] ReconcileError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The dock was already shut down.
    #[error("The dock has been shut down")]
    ShutDown,
}
