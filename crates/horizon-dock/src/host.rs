//! Capabilities the dock needs from its host toolkit.
//!
//! The dock never renders anything itself. It talks to the shell through
//! the traits in this module, which a concrete toolkit binding implements.
//! Nothing here requires the host's item type to extend a base class; it
//! only has to say which entity it represents.

use std::time::{Duration, Instant};

use horizon_dock_core::{DockEvent, TimerId, TimerQueue};

use crate::favorites::{AppId, FavoriteApp};

/// A host-side item that represents exactly one model entity.
pub trait VisualEntry {
    /// The model entity type, compared by identity.
    type Entity;

    /// The entity this entry represents.
    fn entity(&self) -> &Self::Entity;
}

/// Creates, orders and destroys dock items.
pub trait VisualHost {
    /// The host's item type.
    type Entry: VisualEntry<Entity = AppId>;

    /// Build a new item for `app`. The item is not shown yet.
    fn create_visual(&mut self, app: &FavoriteApp) -> Self::Entry;

    /// Destroy an item, optionally animating it out first.
    ///
    /// The entry is moved in; the dock never touches it again.
    fn destroy_visual(&mut self, entry: Self::Entry, animated: bool);

    /// Reorder the host container to match `entries`.
    fn apply_order(&mut self, entries: &[Self::Entry]);

    /// Show a freshly inserted item.
    fn show_visual(&mut self, entry: &Self::Entry, animated: bool);
}

/// The revealable dock surface.
pub trait RevealSurface {
    /// Make the surface visible. Calling this while visible is harmless.
    fn show_surface(&mut self);

    /// Hide the surface.
    fn hide_surface(&mut self);

    /// Whether the pointer is over the surface.
    fn is_hovered(&self) -> bool;

    /// Whether some window outside the dock currently has focus.
    fn has_external_focus_target(&self) -> bool;
}

/// One-shot timer scheduling.
///
/// Fired timers come back to the dock as [`DockEvent::Timer`].
pub trait TimerHost {
    /// Schedule a timer that fires once after `delay`.
    fn schedule_timer(&mut self, delay: Duration) -> TimerId;

    /// Cancel a pending timer. Returns `false` if it already fired or was cancelled.
    fn cancel_timer(&mut self, id: TimerId) -> bool;
}

/// Visibility of the shell overview and the action that toggles it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverviewState {
    /// The overview is on screen.
    pub visible: bool,
    /// The overview is animating in or out.
    pub animating: bool,
}

impl OverviewState {
    /// Whether item animations should play right now.
    pub fn allows_animation(self) -> bool {
        self.visible && !self.animating
    }
}

/// Access to the shell overview.
pub trait OverviewHost {
    /// Current overview state.
    fn overview_state(&self) -> OverviewState;

    /// Open the overview on the application grid.
    fn show_apps(&mut self);

    /// Close the overview.
    fn hide_overview(&mut self);
}

/// Parameters for the host's edge pressure sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressureConfig {
    /// Accumulated pointer pressure needed to trigger.
    pub threshold: u32,
    /// Window over which pressure accumulates before decaying.
    pub timeout: Duration,
}

/// The edge pressure sensor.
///
/// Once armed, the host delivers [`DockEvent::PressureTrigger`] whenever
/// the sensor fires.
pub trait PressureSensor {
    /// Start watching the screen edge.
    fn arm_pressure(&mut self, config: PressureConfig);

    /// Stop watching the screen edge.
    fn disarm_pressure(&mut self);
}

/// Everything the dock needs from its host.
pub trait DockHost: VisualHost + RevealSurface + TimerHost + OverviewHost + PressureSensor {}

impl<T> DockHost for T where T: VisualHost + RevealSurface + TimerHost + OverviewHost + PressureSensor {}

/// A [`TimerHost`] backed by a [`TimerQueue`] and a manually advanced clock.
///
/// Useful for hosts without a native timer source, and for driving the dock
/// deterministically.
#[derive(Debug)]
pub struct TimerDriver {
    queue: TimerQueue,
    now: Instant,
    scheduled: usize,
}

impl TimerDriver {
    /// Create a driver whose clock starts at `now`.
    pub fn new(now: Instant) -> Self {
        Self {
            queue: TimerQueue::new(),
            now,
            scheduled: 0,
        }
    }

    /// Advance the clock and collect the timers that fired.
    pub fn advance(&mut self, by: Duration) -> Vec<DockEvent> {
        self.now += by;
        self.queue.process_expired(self.now)
    }

    /// Number of timers still pending.
    pub fn pending(&self) -> usize {
        self.queue.active_count()
    }

    /// Total number of timers ever scheduled.
    pub fn scheduled_total(&self) -> usize {
        self.scheduled
    }

    /// Whether `id` is still pending.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.queue.is_active(id)
    }

    /// The delay a pending timer was scheduled with.
    pub fn delay_of(&self, id: TimerId) -> Option<Duration> {
        self.queue.delay(id)
    }
}

impl TimerHost for TimerDriver {
    fn schedule_timer(&mut self, delay: Duration) -> TimerId {
        self.scheduled += 1;
        self.queue.start_one_shot(self.now, delay)
    }

    fn cancel_timer(&mut self, id: TimerId) -> bool {
        self.queue.stop(id).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overview_allows_animation() {
        let idle = OverviewState {
            visible: true,
            animating: false,
        };
        assert!(idle.allows_animation());
        assert!(!OverviewState::default().allows_animation());
        assert!(!OverviewState {
            visible: true,
            animating: true
        }
        .allows_animation());
    }

    #[test]
    fn test_timer_driver() {
        let mut timers = TimerDriver::new(Instant::now());
        let id = timers.schedule_timer(Duration::from_millis(550));
        assert_eq!(timers.pending(), 1);
        assert!(timers.advance(Duration::from_millis(500)).is_empty());
        assert_eq!(
            timers.advance(Duration::from_millis(50)),
            vec![DockEvent::Timer { id }]
        );
        assert!(!timers.cancel_timer(id));
        assert_eq!(timers.scheduled_total(), 1);
    }
}
