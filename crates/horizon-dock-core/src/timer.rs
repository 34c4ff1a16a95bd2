//! Timer queue for Horizon Dock.
//!
//! Provides one-shot timers keyed by [`TimerId`]. Firing a timer produces a
//! [`DockEvent::Timer`] for the host to dispatch; nothing re-arms on its own.
//! A consumer that wants a recurring poll answers each fire with a
//! [`TimerAction`] and schedules the next one itself, which keeps at most one
//! timer outstanding per poll.
//!
//! The current time is always passed in, so the queue never reads a clock.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use slotmap::{new_key_type, SlotMap};

use crate::error::{Result, TimerError};
use crate::event::DockEvent;
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

/// What a timer callback wants to happen after it ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Schedule the same callback again after the same delay.
    Continue,
    /// Do not reschedule.
    Remove,
}

#[derive(Debug)]
struct TimerData {
    fire_time: Instant,
    delay: Duration,
}

/// An entry in the timer queue (min-heap by fire time).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_time: Instant,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other.fire_time.cmp(&self.fire_time)
    }
}

/// Pending one-shot timers.
#[derive(Debug, Default)]
pub struct TimerQueue {
    timers: SlotMap<TimerId, TimerData>,
    queue: BinaryHeap<TimerQueueEntry>,
}

impl TimerQueue {
    /// Create an empty timer queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a one-shot timer that fires `delay` after `now`.
    pub fn start_one_shot(&mut self, now: Instant, delay: Duration) -> TimerId {
        let fire_time = now + delay;
        let id = self.timers.insert(TimerData { fire_time, delay });
        self.queue.push(TimerQueueEntry { id, fire_time });
        tracing::trace!(target: targets::TIMER, ?id, ?delay, "timer started");
        id
    }

    /// Stop and remove a timer.
    ///
    /// Fails with [`TimerError::InvalidTimerId`] if the timer already fired
    /// or was stopped.
    pub fn stop(&mut self, id: TimerId) -> Result<()> {
        match self.timers.remove(id) {
            Some(_) => {
                tracing::trace!(target: targets::TIMER, ?id, "timer stopped");
                Ok(())
            }
            None => Err(TimerError::InvalidTimerId.into()),
        }
    }

    /// Check if a timer is still pending.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// The delay a pending timer was started with.
    pub fn delay(&self, id: TimerId) -> Option<Duration> {
        self.timers.get(id).map(|t| t.delay)
    }

    /// Get the duration until the next timer fires, if any.
    pub fn time_until_next(&mut self, now: Instant) -> Option<Duration> {
        self.discard_stale();
        self.queue
            .peek()
            .map(|entry| entry.fire_time.saturating_duration_since(now))
    }

    /// Fire every timer whose deadline is at or before `now`.
    ///
    /// Timers fire in deadline order and are removed as they fire.
    #[tracing::instrument(skip(self), target = "horizon_dock_core::timer", level = "trace")]
    pub fn process_expired(&mut self, now: Instant) -> Vec<DockEvent> {
        let mut events = Vec::new();

        while let Some(entry) = self.queue.peek().copied() {
            if entry.fire_time > now {
                break;
            }
            self.queue.pop();

            // Stopped timers leave their heap entry behind.
            if self.timers.remove(entry.id).is_none() {
                continue;
            }

            tracing::trace!(target: targets::TIMER, id = ?entry.id, "timer fired");
            events.push(DockEvent::Timer { id: entry.id });
        }

        events
    }

    /// Get the number of pending timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// Cancel every pending timer.
    pub fn clear(&mut self) {
        self.timers.clear();
        self.queue.clear();
    }

    fn discard_stale(&mut self) {
        while let Some(entry) = self.queue.peek() {
            if self.timers.contains_key(entry.id) {
                break;
            }
            self.queue.pop();
        }
    }
}
