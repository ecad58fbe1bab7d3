pub mod buffer;
pub mod ops;
pub mod queue_error;
pub mod state;

pub use buffer::{ELEMENT_SIZE, Element, RingQueue};
pub use queue_error::*;
pub use state::QueueState;
