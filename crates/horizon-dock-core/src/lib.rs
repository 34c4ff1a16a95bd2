//! Core systems for Horizon Dock.
//!
//! This crate provides the plumbing the dock runs on:
//!
//! - **Signal/Slot System**: Typed notifications in place of named callbacks
//! - **Timers**: A one-shot timer queue driven by an explicit clock
//! - **Events**: The [`DockEvent`] enum delivered by the host's dispatch queue
//! - **Logging**: `tracing` targets and helper macros
//!
//! # Timer Example
//!
//! ```
//! use horizon_dock_core::{DockEvent, TimerQueue};
//! use std::time::{Duration, Instant};
//!
//! let start = Instant::now();
//! let mut timers = TimerQueue::new();
//! let id = timers.start_one_shot(start, Duration::from_millis(550));
//!
//! let fired = timers.process_expired(start + Duration::from_millis(600));
//! assert_eq!(fired, vec![DockEvent::Timer { id }]);
//! ```

mod error;
mod event;
pub mod logging;
pub mod signal;
mod timer;

pub use error::{Error, Result, SignalError, TimerError};
pub use event::{sort_by_priority, DockEvent, EventPriority};
pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use timer::{TimerAction, TimerId, TimerQueue};
