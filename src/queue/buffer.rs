/// Element type stored by [`RingQueue`].
pub type Element = i32;

/// Width of one slot in bytes. Capacities are requested in bytes and divided by this.
pub const ELEMENT_SIZE: usize = std::mem::size_of::<Element>();

/// Fixed-capacity circular FIFO of [`Element`]s.
///
/// One slot is always left unused so that `head == tail` only ever means empty; a queue
/// created with `n` slots accepts at most `n - 1` values. `storage` is `None` until
/// [`RingQueue::initialize`] succeeds and again after [`RingQueue::finalize`].
#[derive(Debug, Default)]
pub struct RingQueue {
    pub(crate) storage: Option<Box<[Element]>>,
    pub(crate) head: usize,
    pub(crate) tail: usize,
}
