use crate::event::Event;

/// Append-only, in-memory record of applied events.
///
/// The session keeps one journal per aggregate kind so that every accepted
/// command can be traced back without a persistent store.
#[derive(Debug, Clone)]
pub struct Journal<E> {
    entries: Vec<E>,
}

impl<E: Event> Journal<E> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn record(&mut self, event: E) {
        self.entries.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = E>) {
        for event in events {
            self.record(event);
        }
    }

    /// Events in the order they were applied.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &E> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Event type names in application order.
    pub fn event_types(&self) -> Vec<&'static str> {
        self.entries.iter().map(Event::event_type).collect()
    }
}

impl<E: Event> Default for Journal<E> {
    fn default() -> Self {
        Self::new()
    }
}
