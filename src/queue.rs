use std::collections::VecDeque;

/// A FIFO queue with a hard capacity limit.
///
/// Unlike `VecDeque` itself, pushing onto a full queue is rejected rather
/// than growing the buffer. All access happens under the pool lock, so the
/// queue itself carries no synchronization.
pub(crate) struct BoundedQueue<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedQueue<T> {
    /// Creates an empty queue. `capacity` must be non-zero; the pool
    /// validates this before construction.
    pub(crate) fn new(capacity: usize) -> Self {
        BoundedQueue {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends an item at the tail, or hands it back if the queue is full.
    pub(crate) fn push_back(&mut self, item: T) -> Result<(), T> {
        if self.items.len() == self.capacity {
            return Err(item);
        }
        self.items.push_back(item);
        Ok(())
    }

    /// Removes and returns the oldest item, if any.
    pub(crate) fn pop_front(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Discards all queued items, returning how many were dropped.
    pub(crate) fn clear(&mut self) -> usize {
        let discarded = self.items.len();
        self.items.clear();
        discarded
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }
}
