//! Edge reveal state machine.
//!
//! The dock starts [`RevealState::Hidden`]. A pressure trigger from the
//! host's edge sensor shows the surface and arms a poll timer. Each poll
//! tick hides the surface again once nothing holds it open: no interaction
//! in progress, no pointer over the dock, and some other window focused.
//! Otherwise the tick schedules the next one.
//!
//! At most one poll timer is outstanding at any time. Ticks are
//! continuations, not a loop: a tick answers [`TimerAction::Continue`] or
//! [`TimerAction::Remove`] and arms the follow-up itself.

use std::time::Duration;

use horizon_dock_core::logging::targets;
use horizon_dock_core::{dock_debug, dock_trace, Signal, TimerAction, TimerId};

use crate::host::{RevealSurface, TimerHost};

/// Visibility state of the dock surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RevealState {
    /// Surface hidden, waiting for a pressure trigger.
    #[default]
    Hidden,
    /// Surface shown, auto-hide poll running.
    Revealed,
}

/// What the reveal controller needs from the host.
pub trait RevealHost: RevealSurface + TimerHost {}

impl<T> RevealHost for T where T: RevealSurface + TimerHost {}

/// Drives show/hide of the dock surface.
///
/// Owns the host adapter it operates on. Dropping the controller cancels
/// any outstanding poll.
pub struct RevealController<H: RevealHost> {
    host: H,
    state: RevealState,
    interaction_in_progress: bool,
    poll_timer: Option<TimerId>,
    poll_interval: Duration,
    state_changed: Signal<RevealState>,
}

impl<H: RevealHost> RevealController<H> {
    /// Create a hidden controller that polls every `poll_interval` while revealed.
    pub fn new(host: H, poll_interval: Duration) -> Self {
        Self {
            host,
            state: RevealState::Hidden,
            interaction_in_progress: false,
            poll_timer: None,
            poll_interval,
            state_changed: Signal::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Returns `true` while revealed.
    pub fn is_revealed(&self) -> bool {
        self.state == RevealState::Revealed
    }

    /// Whether an interaction is holding the dock open.
    pub fn interaction_in_progress(&self) -> bool {
        self.interaction_in_progress
    }

    /// The outstanding poll timer, if any.
    pub fn poll_timer(&self) -> Option<TimerId> {
        self.poll_timer
    }

    /// The delay between polls.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Signal emitted on every state transition.
    pub fn state_changed(&self) -> &Signal<RevealState> {
        &self.state_changed
    }

    /// The host adapter.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host adapter.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Handle a pressure trigger from the edge sensor.
    ///
    /// Always shows the surface. Only arms a poll if none is outstanding, so
    /// repeated triggers never stack timers.
    pub fn on_pressure_trigger(&mut self) {
        self.host.show_surface();

        if self.state == RevealState::Hidden {
            dock_debug!(targets::REVEAL, "revealed by pressure");
            self.set_state(RevealState::Revealed);
        }
        if self.poll_timer.is_none() {
            self.arm_poll();
        }
    }

    /// An interaction (such as a drag) started.
    pub fn on_interaction_began(&mut self) {
        dock_trace!(targets::REVEAL, "interaction began");
        self.interaction_in_progress = true;
    }

    /// The current interaction ended.
    pub fn on_interaction_ended(&mut self) {
        dock_trace!(targets::REVEAL, "interaction ended");
        self.interaction_in_progress = false;
    }

    /// Route a fired timer.
    ///
    /// Returns `None` if `id` is not this controller's poll.
    pub fn on_timer(&mut self, id: TimerId) -> Option<TimerAction> {
        if self.poll_timer != Some(id) {
            return None;
        }
        Some(self.poll_tick())
    }

    /// Evaluate the auto-hide condition once.
    ///
    /// The fired timer is consumed before the host is queried, so even a
    /// panicking query leaves no stale timer behind and the next trigger
    /// re-arms cleanly.
    pub fn poll_tick(&mut self) -> TimerAction {
        self.poll_timer = None;

        if self.state != RevealState::Revealed {
            return TimerAction::Remove;
        }

        let hide = !self.interaction_in_progress
            && !self.host.is_hovered()
            && self.host.has_external_focus_target();

        if hide {
            dock_debug!(targets::REVEAL, "auto-hide");
            self.set_state(RevealState::Hidden);
            self.host.hide_surface();
            TimerAction::Remove
        } else {
            dock_trace!(
                targets::REVEAL,
                interaction = self.interaction_in_progress,
                "still in use, polling again"
            );
            self.arm_poll();
            TimerAction::Continue
        }
    }

    /// Cancel the outstanding poll, if any.
    ///
    /// The state is left as is; the surface itself belongs to the caller.
    pub fn shutdown(&mut self) {
        if let Some(id) = self.poll_timer.take() {
            dock_debug!(targets::REVEAL, ?id, "cancelling poll");
            self.host.cancel_timer(id);
        }
    }

    fn arm_poll(&mut self) {
        let id = self.host.schedule_timer(self.poll_interval);
        dock_trace!(targets::REVEAL, ?id, "poll armed");
        self.poll_timer = Some(id);
    }

    fn set_state(&mut self, state: RevealState) {
        self.state = state;
        self.state_changed.emit(state);
    }
}

impl<H: RevealHost> Drop for RevealController<H> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
