use crate::queue::Element;
pub mod dispatcher;

pub trait ValueConsumer: Send {
    fn consume(&mut self, value: Element) -> bool;

    fn flush(&mut self) {}

    fn name(&self) -> &str;
}
