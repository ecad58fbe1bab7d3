pub mod consumer;
pub mod logging;
pub mod queue;
pub mod stress;
