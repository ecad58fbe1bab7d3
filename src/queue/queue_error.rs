use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    InvalidCapacity {
        capacity_bytes: usize,
        reason: &'static str,
    },
    Uninitialized,
    EmptyInput,
    CapacityExceeded {
        required: usize,
        available: usize,
    },
    AllocationFailure {
        slots: usize,
    },
}

impl QueueError {
    /// Caller-side mistakes, as opposed to a full queue or an exhausted allocator.
    #[inline]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidCapacity { .. } | Self::Uninitialized | Self::EmptyInput
        )
    }
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCapacity {
                capacity_bytes,
                reason,
            } => {
                write!(f, "Invalid capacity {} bytes: {}", capacity_bytes, reason)
            }
            Self::Uninitialized => write!(f, "Queue is not initialized"),
            Self::EmptyInput => write!(f, "No values supplied"),
            Self::CapacityExceeded {
                required,
                available,
            } => {
                write!(
                    f,
                    "Not enough space in queue: required {} slots, available {} slots",
                    required, available
                )
            }
            Self::AllocationFailure { slots } => {
                write!(f, "Failed to allocate storage for {} slots", slots)
            }
        }
    }
}

impl std::error::Error for QueueError {}
