//! Event queues between the driver and the systems of a manager
//!
//! Input reaches systems as queued values rather than through subscribed
//! callbacks: the world stack routes each frame's inbound events to the
//! managers that update that frame, and systems queue outbound events for
//! the driver to act on after the frame.

use crate::foundation::math::Vec2;

/// Screen navigation requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Start a local game
    StartSingle,
    /// Open the connect screen or start a networked game
    StartMulti,
    /// Pause the running game
    Pause,
    /// Leave the pause menu
    Resume,
    /// Leave the current screen
    Exit,
}

/// One frame of avatar input
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AvatarInput {
    /// Horizontal movement axis, `-1..=1`
    pub x_input: i8,
    /// Vertical movement axis, `-1..=1`
    pub y_input: i8,
    /// Cursor position in world space
    pub mouse: Vec2,
    /// Melee swing pressed
    pub swing: bool,
    /// Throw pressed
    pub throw: bool,
}

/// Events exchanged with a manager
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Navigation request, usually emitted by menu systems
    Navigate(Navigation),
    /// Avatar input, consumed by input systems
    Avatar(AvatarInput),
}

/// FIFO event queue with optional deferred delivery
#[derive(Debug, Clone)]
pub struct EventQueue<E> {
    immediate: Vec<E>,
    deferred: Vec<(f64, E)>,
}

impl<E> EventQueue<E> {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            immediate: Vec::new(),
            deferred: Vec::new(),
        }
    }

    /// Queue an event for the next drain
    pub fn send(&mut self, event: E) {
        self.immediate.push(event);
    }

    /// Queue an event that becomes due at `delivery_time` seconds
    pub fn post(&mut self, delivery_time: f64, event: E) {
        self.deferred.push((delivery_time, event));
    }

    /// Move deferred events that are due at `now` into the immediate queue,
    /// keeping their posting order
    pub fn dispatch_due(&mut self, now: f64) {
        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.deferred)
            .into_iter()
            .partition(|(time, _)| *time <= now);
        self.deferred = pending;
        self.immediate.extend(due.into_iter().map(|(_, event)| event));
    }

    /// Take every immediate event, oldest first
    pub fn drain(&mut self) -> Vec<E> {
        std::mem::take(&mut self.immediate)
    }

    /// Immediate events currently queued
    pub fn pending(&self) -> &[E] {
        &self.immediate
    }

    /// Number of immediate events
    pub fn len(&self) -> usize {
        self.immediate.len()
    }

    /// True when no immediate event is queued
    pub fn is_empty(&self) -> bool {
        self.immediate.is_empty()
    }

    /// Number of events still waiting for their delivery time
    pub fn deferred_len(&self) -> usize {
        self.deferred.len()
    }

    /// Clear all queued events (useful for state transitions)
    pub fn clear(&mut self) {
        self.immediate.clear();
        self.deferred.clear();
    }
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_and_drain_in_order() {
        let mut queue = EventQueue::new();
        queue.send(GameEvent::Navigate(Navigation::Pause));
        queue.send(GameEvent::Navigate(Navigation::Resume));
        assert_eq!(queue.len(), 2);

        let drained = queue.drain();
        assert_eq!(
            drained,
            vec![
                GameEvent::Navigate(Navigation::Pause),
                GameEvent::Navigate(Navigation::Resume),
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_deferred_dispatch() {
        let mut queue = EventQueue::new();
        queue.post(1.0, Navigation::Exit);

        // Event should not dispatch at t=0.5
        queue.dispatch_due(0.5);
        assert!(queue.is_empty());
        assert_eq!(queue.deferred_len(), 1);

        // Event should dispatch at t=1.0
        queue.dispatch_due(1.0);
        assert_eq!(queue.drain(), vec![Navigation::Exit]);
        assert_eq!(queue.deferred_len(), 0);
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut queue = EventQueue::new();
        queue.send(1);
        queue.post(5.0, 2);
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.deferred_len(), 0);
    }
}
