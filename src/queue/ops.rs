use super::{ELEMENT_SIZE, Element, QueueError, RingQueue};
use tracing::{debug, error, trace, warn};

#[inline(always)]
fn advance(index: usize, by: usize, capacity: usize) -> usize {
    (index + by) % capacity
}

#[inline(always)]
fn queued(head: usize, tail: usize, capacity: usize) -> usize {
    (tail + capacity - head) % capacity
}

impl RingQueue {
    /// An uninitialized queue. Every operation on it is a no-op until [`Self::initialize`].
    pub const fn new() -> Self {
        Self {
            storage: None,
            head: 0,
            tail: 0,
        }
    }

    pub fn with_capacity_bytes(capacity_bytes: usize) -> Result<Self, QueueError> {
        let mut queue = Self::new();
        queue.initialize(capacity_bytes)?;
        Ok(queue)
    }

    /// Allocates `capacity_bytes / ELEMENT_SIZE` slots, releasing any storage held before.
    ///
    /// On failure the queue is left uninitialized.
    pub fn initialize(&mut self, capacity_bytes: usize) -> Result<(), QueueError> {
        self.finalize();

        if capacity_bytes < ELEMENT_SIZE {
            warn!(capacity_bytes, "invalid memory size for queue initialization");
            return Err(QueueError::InvalidCapacity {
                capacity_bytes,
                reason: "smaller than one element",
            });
        }

        let slots = capacity_bytes / ELEMENT_SIZE;
        let mut storage: Vec<Element> = Vec::new();
        if storage.try_reserve_exact(slots).is_err() {
            error!(slots, "queue storage allocation failed");
            return Err(QueueError::AllocationFailure { slots });
        }
        storage.resize(slots, 0);

        self.storage = Some(storage.into_boxed_slice());
        self.head = 0;
        self.tail = 0;
        debug!(capacity = slots, "queue initialized");
        Ok(())
    }

    /// Releases storage and resets indices. Safe to call any number of times.
    pub fn finalize(&mut self) {
        if let Some(storage) = self.storage.take() {
            debug!(capacity = storage.len(), "queue finalized");
        }
        self.head = 0;
        self.tail = 0;
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.storage.is_some()
    }

    /// Slot count, including the reserved slot. Zero when uninitialized.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.as_ref().map_or(0, |s| s.len())
    }

    /// `true` when nothing is queued, which includes the uninitialized queue.
    /// Use [`Self::state`] to tell the two apart.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.is_initialized() && self.count_queueable() == 0
    }

    #[inline]
    pub fn count_queued(&self) -> usize {
        match self.capacity() {
            0 => 0,
            capacity => queued(self.head, self.tail, capacity),
        }
    }

    #[inline]
    pub fn count_queueable(&self) -> usize {
        match self.capacity() {
            0 => 0,
            capacity => capacity - self.count_queued() - 1,
        }
    }

    pub fn enqueue(&mut self, value: Element) -> Result<(), QueueError> {
        let Some(storage) = self.storage.as_deref_mut() else {
            trace!(op = "enqueue", "queue not initialized");
            return Err(QueueError::Uninitialized);
        };

        let next = advance(self.tail, 1, storage.len());
        if next == self.head {
            debug!(value, "queue overflow");
            return Err(QueueError::CapacityExceeded {
                required: 1,
                available: 0,
            });
        }

        storage[self.tail] = value;
        self.tail = next;
        Ok(())
    }

    /// Appends every value in order, or none of them.
    pub fn enqueue_array(&mut self, values: &[Element]) -> Result<(), QueueError> {
        let Some(storage) = self.storage.as_deref_mut() else {
            trace!(op = "enqueue_array", "queue not initialized");
            return Err(QueueError::Uninitialized);
        };
        if values.is_empty() {
            return Err(QueueError::EmptyInput);
        }

        let capacity = storage.len();
        let available = capacity - queued(self.head, self.tail, capacity) - 1;
        if values.len() > available {
            debug!(required = values.len(), available, "bulk enqueue rejected");
            return Err(QueueError::CapacityExceeded {
                required: values.len(),
                available,
            });
        }

        let start = self.tail;
        let contiguous = capacity - start;
        if values.len() <= contiguous {
            storage[start..start + values.len()].copy_from_slice(values);
        } else {
            let (first, rest) = values.split_at(contiguous);
            storage[start..].copy_from_slice(first);
            storage[..rest.len()].copy_from_slice(rest);
        }

        self.tail = advance(start, values.len(), capacity);
        Ok(())
    }

    #[inline]
    pub fn dequeue(&mut self) -> Option<Element> {
        let Some(storage) = self.storage.as_deref() else {
            trace!(op = "dequeue", "queue not initialized");
            return None;
        };
        if self.head == self.tail {
            return None;
        }

        let value = storage[self.head];
        self.head = advance(self.head, 1, storage.len());
        Some(value)
    }

    /// Moves up to `out.len()` values into `out`, oldest first. Returns how many were moved.
    pub fn dequeue_array(&mut self, out: &mut [Element]) -> usize {
        let Some(storage) = self.storage.as_deref() else {
            trace!(op = "dequeue_array", "queue not initialized");
            return 0;
        };

        let capacity = storage.len();
        let count = out.len().min(queued(self.head, self.tail, capacity));
        if count == 0 {
            return 0;
        }

        let start = self.head;
        let contiguous = capacity - start;
        if count <= contiguous {
            out[..count].copy_from_slice(&storage[start..start + count]);
        } else {
            let rest = count - contiguous;
            out[..contiguous].copy_from_slice(&storage[start..]);
            out[contiguous..count].copy_from_slice(&storage[..rest]);
        }

        self.head = advance(start, count, capacity);
        count
    }
}
