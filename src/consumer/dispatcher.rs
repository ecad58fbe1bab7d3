use super::ValueConsumer;
use crate::queue::{Element, RingQueue};
use tracing::trace;

pub const DEFAULT_BATCH_SIZE: usize = 256;

/// Drains a [`RingQueue`] in bulk and hands every value to each registered consumer.
pub struct Dispatcher {
    consumers: Vec<Box<dyn ValueConsumer>>,
    scratch: Vec<Element>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::with_batch_size(DEFAULT_BATCH_SIZE)
    }

    pub fn with_batch_size(batch_size: usize) -> Self {
        Self {
            consumers: Vec::new(),
            scratch: vec![0; batch_size.max(1)],
        }
    }

    pub fn add_consumer<C: ValueConsumer + 'static>(&mut self, consumer: C) {
        self.consumers.push(Box::new(consumer));
    }

    #[inline]
    pub fn batch_size(&self) -> usize {
        self.scratch.len()
    }

    pub fn drain(&mut self, queue: &mut RingQueue) -> DrainStats {
        let mut stats = DrainStats::default();
        loop {
            let read = queue.dequeue_array(&mut self.scratch);
            if read == 0 {
                break;
            }
            self.deliver(read, &mut stats);
        }
        for consumer in &mut self.consumers {
            consumer.flush();
        }
        stats
    }

    /// Like [`Self::drain`] but stops after `limit` values and does not flush.
    pub fn drain_batch(&mut self, queue: &mut RingQueue, limit: usize) -> DrainStats {
        let mut stats = DrainStats::default();
        let mut remaining = limit;
        while remaining > 0 {
            let want = remaining.min(self.scratch.len());
            let read = queue.dequeue_array(&mut self.scratch[..want]);
            if read == 0 {
                break;
            }
            self.deliver(read, &mut stats);
            remaining -= read;
        }
        stats
    }

    fn deliver(&mut self, read: usize, stats: &mut DrainStats) {
        trace!(read, "dispatching batch");
        stats.values_read += read as u64;
        for &value in &self.scratch[..read] {
            for consumer in &mut self.consumers {
                if consumer.consume(value) {
                    stats.values_delivered += 1;
                } else {
                    stats.values_failed += 1;
                }
            }
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DrainStats {
    pub values_read: u64,
    pub values_delivered: u64,
    pub values_failed: u64,
}

impl DrainStats {
    #[inline]
    pub fn success_rate(&self) -> f64 {
        let total = self.values_delivered + self.values_failed;
        if total == 0 {
            1.0
        } else {
            self.values_delivered as f64 / total as f64
        }
    }

    pub fn merge(&mut self, other: DrainStats) {
        self.values_read += other.values_read;
        self.values_delivered += other.values_delivered;
        self.values_failed += other.values_failed;
    }
}
