//! Horizon Dock - a favorites dock for desktop shells.
//!
//! The dock mirrors an ordered list of favorite applications into host
//! items and hides itself against a screen edge until pointer pressure
//! reveals it. Rendering, icons and barrier geometry belong to the host;
//! the dock reaches them only through the traits in [`host`].
//!
//! - [`reconcile`]: keeps the item list in step with the favorites using
//!   few insertions and removals, without recreating untouched items.
//! - [`reveal`]: the hidden/revealed state machine and its auto-hide poll.
//! - [`Dock`]: wires both to a [`FavoritesModel`] and a [`DockHost`].
//!
//! # Example
//!
//! ```ignore
//! use horizon_dock::{Dock, DockConfig};
//!
//! let config = DockConfig::load("dock.toml")?;
//! let mut dock = Dock::from_config(shell_host, &config)?;
//!
//! // In the host's event loop:
//! dock.handle_event(event)?;
//! dock.process_pending()?;
//! ```

pub mod config;
mod dock;
mod error;
pub mod favorites;
pub mod host;
pub mod reconcile;
pub mod reveal;

pub use config::{ConfigError, DockConfig, ItemsConfig, RevealConfig};
pub use dock::Dock;
pub use error::{DockError, Result};
pub use favorites::{AppId, FavoriteApp, FavoritesModel};
pub use host::{
    DockHost, OverviewHost, OverviewState, PressureConfig, PressureSensor, RevealSurface,
    TimerDriver, TimerHost, VisualEntry, VisualHost,
};
pub use reconcile::{Insertion, ListReconciler, ReconcileDiff, ReconcileError, Removal};
pub use reveal::{RevealController, RevealHost, RevealState};

pub use horizon_dock_core::{DockEvent, Signal, TimerAction, TimerId};
