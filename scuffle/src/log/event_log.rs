use std::mem;

use crate::log::Event;

/// An append-only log of battle events with a read cursor.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<Event>,
    last_read: usize,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        ::log::trace!("battle event: {event}");
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn has_new_events(&self) -> bool {
        self.last_read < self.events.len()
    }

    /// All events ever logged.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events logged since the last read, advancing the read cursor.
    pub fn read_out(&mut self) -> &[Event] {
        let start = mem::replace(&mut self.last_read, self.events.len());
        &self.events[start..]
    }
}
