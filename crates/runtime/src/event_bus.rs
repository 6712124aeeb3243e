use std::collections::VecDeque;

/// Handler invoked synchronously for every emitted event.
pub type Subscriber<E> = Box<dyn FnMut(&E) + Send>;

/// Journal length used by [`EventBus::new`].
pub const DEFAULT_JOURNAL_CAPACITY: usize = 256;

/// Typed outbound event channel.
///
/// Subscribers run inline on `emit`, so a listener sees every event in order
/// without any buffering or debouncing. Events are also kept in a bounded
/// journal that hosts and tests can inspect or drain; once it is full the
/// oldest entry is dropped.
///
/// Subscribers must not call back into whatever owns the bus.
pub struct EventBus<E> {
    events: VecDeque<E>,
    capacity: usize,
    subscribers: Vec<Subscriber<E>>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::with_journal_capacity(DEFAULT_JOURNAL_CAPACITY)
    }
}

impl<E> std::fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("events", &self.events.len())
            .field("capacity", &self.capacity)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A capacity of zero disables the journal.
    pub fn with_journal_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::new(),
            capacity,
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&E) + Send + 'static) {
        self.subscribers.push(Box::new(handler));
    }

    pub fn emit(&mut self, event: E) {
        for handler in &mut self.subscribers {
            handler(&event);
        }
        if self.capacity == 0 {
            return;
        }
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Journaled events, oldest first.
    pub fn events(&self) -> impl ExactSizeIterator<Item = &E> {
        self.events.iter()
    }

    pub fn drain(&mut self) -> Vec<E> {
        self.events.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::EventBus;
    use std::sync::{Arc, Mutex};

    #[test]
    fn records_events_in_order() {
        let mut bus = EventBus::new();
        bus.emit(1);
        bus.emit(2);
        assert_eq!(bus.events().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn drain_clears_events() {
        let mut bus = EventBus::new();
        bus.emit("m");
        let drained = bus.drain();
        assert_eq!(drained, vec!["m"]);
        assert_eq!(bus.events().len(), 0);
    }

    #[test]
    fn subscribers_see_every_event_inline() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        let sink = Arc::clone(&seen);
        bus.subscribe(move |e: &u32| sink.lock().unwrap().push(*e));
        bus.emit(10);
        assert_eq!(*seen.lock().unwrap(), vec![10]);
        bus.emit(20);
        assert_eq!(*seen.lock().unwrap(), vec![10, 20]);
    }

    #[test]
    fn journal_keeps_only_the_newest_events() {
        let seen = Arc::new(Mutex::new(0usize));
        let mut bus = EventBus::with_journal_capacity(3);
        let sink = Arc::clone(&seen);
        bus.subscribe(move |_: &u32| *sink.lock().unwrap() += 1);
        for e in 0..10_000 {
            bus.emit(e);
        }
        assert_eq!(*seen.lock().unwrap(), 10_000);
        assert_eq!(bus.drain(), vec![9_997, 9_998, 9_999]);
    }

    #[test]
    fn zero_capacity_only_notifies() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::with_journal_capacity(0);
        let sink = Arc::clone(&seen);
        bus.subscribe(move |e: &&str| sink.lock().unwrap().push(*e));
        bus.emit("a");
        assert_eq!(bus.events().len(), 0);
        assert_eq!(*seen.lock().unwrap(), vec!["a"]);
    }
}
