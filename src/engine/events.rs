//! Engine output: log lines, warnings, speed updates and body positions.
//!
//! Every event goes to the registered subscribers first, in registration
//! order, and is then queued until [`EventBus::drain`] is called. The queue
//! holds at most [`MAX_PENDING_EVENTS`]; past that the oldest are dropped,
//! so a host that only subscribes never has to drain.

use std::collections::VecDeque;
use std::fmt;

use bevy::log::debug;

use crate::types::BodyState;

/// Something the engine wants its host to know about.
#[derive(Clone, Debug, PartialEq)]
pub enum SimulationEvent {
    /// Human-readable status line (mode selection, per-tick state).
    Log(String),
    /// Recoverable fault; the tick that produced it was skipped.
    Warning(String),
    /// Current speed of the secondary in km/s.
    SpeedUpdated(f64),
    /// Positions and velocities after a successful tick.
    BodiesMoved {
        primary: BodyState,
        secondary: BodyState,
    },
}

impl SimulationEvent {
    /// Text for `Log` and `Warning` events.
    pub fn text(&self) -> Option<&str> {
        match self {
            SimulationEvent::Log(text) | SimulationEvent::Warning(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, SimulationEvent::Warning(_))
    }
}

/// Callback invoked synchronously for every published event.
pub type Subscriber = Box<dyn FnMut(&SimulationEvent) + Send + Sync>;

/// Queued events kept for [`EventBus::drain`].
pub const MAX_PENDING_EVENTS: usize = 1024;

/// Observer list plus a bounded pull queue.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Subscriber>,
    pending: VecDeque<SimulationEvent>,
    /// Events dropped from the queue since the last drain
    dropped: usize,
}

impl EventBus {
    pub fn subscribe(&mut self, subscriber: Subscriber) {
        self.subscribers.push(subscriber);
    }

    pub fn publish(&mut self, event: SimulationEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(&event);
        }
        if self.pending.len() == MAX_PENDING_EVENTS {
            if self.dropped == 0 {
                debug!("Event queue full ({MAX_PENDING_EVENTS}), dropping oldest until drained");
            }
            self.pending.pop_front();
            self.dropped += 1;
        }
        self.pending.push_back(event);
    }

    /// Take all queued events, oldest first.
    pub fn drain(&mut self) -> Vec<SimulationEvent> {
        self.dropped = 0;
        self.pending.drain(..).collect()
    }

    /// Number of queued events.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Events lost to the queue cap since the last drain.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .field("pending", &self.pending.len())
            .field("dropped", &self.dropped)
            .finish()
    }
}
