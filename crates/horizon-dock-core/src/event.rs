//! Event types delivered to the dock by the host's dispatch queue.

use crate::timer::TimerId;

/// Priority levels for dock events.
/// Higher priority events are processed first when a host drains a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum EventPriority {
    /// Most dock events.
    #[default]
    Normal = 0,
    /// Pointer pressure and timers.
    High = 1,
    /// Teardown.
    Critical = 2,
}

/// Events dispatched to the dock.
///
/// The host serializes these on its single dispatch queue, so handlers run
/// to completion one at a time and never observe a partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockEvent {
    /// The edge pressure sensor fired.
    PressureTrigger,

    /// A drag or other interaction with dock items started.
    InteractionBegan,

    /// The interaction started by [`DockEvent::InteractionBegan`] ended.
    InteractionEnded,

    /// A timer has fired.
    Timer {
        /// The timer that fired.
        id: TimerId,
    },

    /// The favorites list changed and the visual list needs reconciling.
    FavoritesChanged,

    /// The show-applications button was released.
    ShowAppsClicked,

    /// The dock is being disabled.
    Shutdown,
}

impl DockEvent {
    /// Get the priority of this event.
    pub fn priority(&self) -> EventPriority {
        match self {
            Self::Shutdown => EventPriority::Critical,
            Self::Timer { .. } | Self::PressureTrigger => EventPriority::High,
            Self::InteractionBegan
            | Self::InteractionEnded
            | Self::FavoritesChanged
            | Self::ShowAppsClicked => EventPriority::Normal,
        }
    }
}

/// Sort a batch of events so that higher priority events come first.
///
/// Events of equal priority keep their arrival order.
pub fn sort_by_priority(events: &mut [DockEvent]) {
    events.sort_by(|a, b| b.priority().cmp(&a.priority()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        assert!(DockEvent::Shutdown.priority() > DockEvent::PressureTrigger.priority());
        assert!(DockEvent::PressureTrigger.priority() > DockEvent::FavoritesChanged.priority());
    }

    #[test]
    fn test_sort_is_stable_within_priority() {
        let mut events = vec![
            DockEvent::InteractionBegan,
            DockEvent::PressureTrigger,
            DockEvent::InteractionEnded,
            DockEvent::Shutdown,
        ];
        sort_by_priority(&mut events);
        assert_eq!(
            events,
            vec![
                DockEvent::Shutdown,
                DockEvent::PressureTrigger,
                DockEvent::InteractionBegan,
                DockEvent::InteractionEnded,
            ]
        );
    }
}
