//! Deferred events requested by the controller and timed by the host

use tracing::debug;

/// Events the controller asks the host to fire later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredEvent {
    /// Reload the scene/session after the character died
    ResetScene,
}

/// Host-side scheduler the controller hands deferred events to
///
/// Fire-and-forget: the controller never cancels or tracks what it scheduled.
pub trait Scheduler {
    /// Fire `event` once, `delay` seconds of simulation time from now
    fn schedule(&mut self, event: DeferredEvent, delay: f32);
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    event: DeferredEvent,
    remaining: f32,
}

/// Simple timer queue for deferred events
#[derive(Debug, Default)]
pub struct DeferredEvents {
    pending: Vec<Pending>,
}

impl DeferredEvents {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance all timers by `dt` and return the events that became due,
    /// in the order they were scheduled
    pub fn advance(&mut self, dt: f32) -> Vec<DeferredEvent> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let mut due = Vec::new();
        self.pending.retain_mut(|pending| {
            pending.remaining -= dt;
            if pending.remaining <= 0.0 {
                due.push(pending.event);
                false
            } else {
                true
            }
        });
        due
    }

    /// Drop everything still pending (the owning character went away)
    pub fn cancel_all(&mut self) {
        if !self.pending.is_empty() {
            debug!(count = self.pending.len(), "cancelled deferred events");
        }
        self.pending.clear();
    }

    /// Number of events waiting to fire
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is waiting to fire
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Scheduler for DeferredEvents {
    fn schedule(&mut self, event: DeferredEvent, delay: f32) {
        let remaining = if delay.is_finite() { delay.max(0.0) } else { 0.0 };
        self.pending.push(Pending { event, remaining });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_fires_after_delay() {
        let mut queue = DeferredEvents::new();
        queue.schedule(DeferredEvent::ResetScene, 2.0);

        assert!(queue.advance(1.0).is_empty());
        assert!(queue.advance(0.5).is_empty());
        assert_eq!(queue.advance(0.5), vec![DeferredEvent::ResetScene]);
        assert!(queue.is_empty());
        assert!(queue.advance(10.0).is_empty());
    }

    #[test]
    fn test_cancel_all() {
        let mut queue = DeferredEvents::new();
        queue.schedule(DeferredEvent::ResetScene, 2.0);
        assert_eq!(queue.len(), 1);

        queue.cancel_all();
        assert!(queue.advance(5.0).is_empty());
    }

    #[test]
    fn test_non_finite_delay_fires_next_advance() {
        let mut queue = DeferredEvents::new();
        queue.schedule(DeferredEvent::ResetScene, f32::NAN);
        assert_eq!(queue.advance(0.0), vec![DeferredEvent::ResetScene]);
    }
}
