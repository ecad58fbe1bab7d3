use super::RingQueue;

/// Occupancy of a queue, including the case where it has no storage at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueState {
    Uninitialized,
    Empty,
    Partial,
    Full,
}

impl RingQueue {
    pub fn state(&self) -> QueueState {
        if !self.is_initialized() {
            QueueState::Uninitialized
        } else if self.head == self.tail {
            QueueState::Empty
        } else if self.count_queueable() == 0 {
            QueueState::Full
        } else {
            QueueState::Partial
        }
    }
}
