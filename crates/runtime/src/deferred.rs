/// Next-tick task queue.
///
/// Work pushed during tick `n` becomes due at tick `n + 1`, when the host
/// calls [`DeferredQueue::advance`] after it has committed layout. Due items
/// come out in insertion order. Cancellation does not perturb the order of
/// remaining items.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeferredId(pub u64);

#[derive(Debug)]
struct Item<T> {
    id: DeferredId,
    due_tick: u64,
    payload: T,
}

#[derive(Debug)]
pub struct DeferredQueue<T> {
    tick: u64,
    next_id: u64,
    items: Vec<Item<T>>,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self {
            tick: 0,
            next_id: 0,
            items: Vec::new(),
        }
    }
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Schedules `payload` for the next tick.
    pub fn defer(&mut self, payload: T) -> DeferredId {
        let id = DeferredId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.items.push(Item {
            id,
            due_tick: self.tick + 1,
            payload,
        });
        id
    }

    /// Cancels a pending item. Returns `true` if it was still queued.
    pub fn cancel(&mut self, id: DeferredId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        before != self.items.len()
    }

    /// Moves to the next tick and returns everything that became due.
    pub fn advance(&mut self) -> Vec<T> {
        self.tick += 1;
        let tick = self.tick;
        let (due, pending): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.items)
                .into_iter()
                .partition(|i| i.due_tick <= tick);
        self.items = pending;
        if !due.is_empty() {
            tracing::trace!(tick, count = due.len(), "running deferred work");
        }
        due.into_iter().map(|i| i.payload).collect()
    }
}
