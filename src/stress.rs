use crate::queue::{Element, QueueError, RingQueue};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Default, Clone, Copy)]
pub struct StressReport {
    pub written: u64,
    pub read: u64,
    pub out_of_order: u64,
    pub elapsed: Duration,
}

impl StressReport {
    /// Every enqueued value came back, in sequence.
    #[inline]
    pub fn is_consistent(&self) -> bool {
        self.out_of_order == 0 && self.written == self.read
    }

    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.written as f64 / secs
        }
    }
}

/// Runs one writer and one reader over a mutex-guarded queue until `duration` elapses or
/// `running` is cleared. The reader keeps draining until the writer has exited and the queue
/// is empty.
pub fn run(
    queue: RingQueue,
    chunk: usize,
    duration: Duration,
    running: &AtomicBool,
) -> Result<StressReport, QueueError> {
    let usable = queue.count_queueable();
    if usable == 0 {
        return Err(QueueError::CapacityExceeded {
            required: 1,
            available: 0,
        });
    }
    let chunk = chunk.clamp(1, usable);
    let queue = Mutex::new(queue);
    let writer_done = AtomicBool::new(false);
    let started = Instant::now();

    let (written, mut report) = std::thread::scope(|scope| {
        let writer = scope.spawn(|| -> Result<u64, QueueError> {
            let mut next: Element = 0;
            let mut buf = vec![0; chunk];
            let mut count = 0u64;

            while running.load(Ordering::Relaxed) {
                for slot in buf.iter_mut() {
                    *slot = next;
                    next = next.wrapping_add(1);
                }
                let Ok(mut q) = queue.lock() else {
                    break;
                };
                match q.enqueue_array(&buf) {
                    Ok(()) => count += buf.len() as u64,
                    Err(QueueError::CapacityExceeded { .. }) => {
                        next = next.wrapping_sub(buf.len() as Element);
                    }
                    Err(e) => return Err(e),
                }
            }

            Ok(count)
        });

        let reader = scope.spawn(|| {
            let mut report = StressReport::default();
            let mut buf = vec![0; chunk];
            let mut expected: Element = 0;

            loop {
                // Loaded before the lock: once set, no enqueue can follow this dequeue.
                let done = writer_done.load(Ordering::Acquire);
                let (read, drained) = match queue.lock() {
                    Ok(mut q) => {
                        let read = q.dequeue_array(&mut buf);
                        (read, q.is_empty())
                    }
                    Err(_) => break,
                };
                for &value in &buf[..read] {
                    if value != expected {
                        report.out_of_order += 1;
                    }
                    expected = value.wrapping_add(1);
                }
                report.read += read as u64;

                if done && drained {
                    break;
                }
            }

            report
        });

        while running.load(Ordering::Relaxed) && started.elapsed() < duration {
            std::thread::sleep(Duration::from_millis(10).min(duration));
        }
        running.store(false, Ordering::SeqCst);

        let written = writer.join();
        writer_done.store(true, Ordering::Release);
        let report = reader
            .join()
            .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
        (written, report)
    });

    let written = written.unwrap_or_else(|payload| std::panic::resume_unwind(payload))?;
    report.written = written;
    report.elapsed = started.elapsed();
    debug!(
        written = report.written,
        read = report.read,
        out_of_order = report.out_of_order,
        "stress run finished"
    );
    Ok(report)
}
