use clap::Parser;
use ringqueue::consumer::ValueConsumer;
use ringqueue::consumer::dispatcher::{Dispatcher, DrainStats};
use ringqueue::logging;
use ringqueue::queue::{Element, QueueError, RingQueue};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[arg(long, default_value_t = 64 * 1024)]
    capacity_bytes: usize,

    #[arg(long, default_value_t = 256)]
    batch_size: usize,

    #[arg(long, default_value_t = 5)]
    report_secs: u64,

    #[arg(long, default_value_t = 1)]
    produce_interval_ms: u64,

    #[arg(long, default_value = "info")]
    log: String,
}

struct SumConsumer {
    sum: i64,
}

impl ValueConsumer for SumConsumer {
    fn consume(&mut self, value: Element) -> bool {
        self.sum = self.sum.wrapping_add(value as i64);
        true
    }

    fn flush(&mut self) {
        tracing::trace!(sum = self.sum, "running sum");
    }

    fn name(&self) -> &str {
        "sum"
    }
}

struct CountingConsumer {
    count: u64,
}

impl ValueConsumer for CountingConsumer {
    fn consume(&mut self, _value: Element) -> bool {
        self.count += 1;
        true
    }

    fn flush(&mut self) {
        tracing::trace!(count = self.count, "values seen");
    }

    fn name(&self) -> &str {
        "counter"
    }
}

fn main() {
    let args = Args::parse();
    logging::init(&args.log);

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    info!("ringqueue v{}", env!("CARGO_PKG_VERSION"));
    info!("Press Ctrl+C to stop");

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .map_err(|e| format!("Failed to set Ctrl+C handler: {}", e))?;

    let queue = Arc::new(Mutex::new(RingQueue::with_capacity_bytes(
        args.capacity_bytes,
    )?));
    let capacity = queue.lock().map_err(|_| "queue lock poisoned")?.capacity();
    info!(capacity, "queue ready");

    let mut dispatcher = Dispatcher::with_batch_size(args.batch_size);
    dispatcher.add_consumer(SumConsumer { sum: 0 });
    dispatcher.add_consumer(CountingConsumer { count: 0 });

    let chunk_len = args.batch_size.clamp(1, capacity.saturating_sub(1).max(1));
    let interval = Duration::from_millis(args.produce_interval_ms);
    let report_every = Duration::from_secs(args.report_secs.max(1));

    std::thread::scope(|scope| -> Result<(), Box<dyn std::error::Error>> {
        let producer_queue = Arc::clone(&queue);
        let producer_running = running.clone();
        let producer = scope.spawn(move || {
            let mut next: Element = 0;
            let mut chunk = vec![0; chunk_len];
            let mut produced = 0u64;
            let mut rejected = 0u64;

            while producer_running.load(Ordering::Relaxed) {
                for slot in chunk.iter_mut() {
                    *slot = next;
                    next = next.wrapping_add(1);
                }
                let result = match producer_queue.lock() {
                    Ok(mut q) => q.enqueue_array(&chunk),
                    Err(_) => break,
                };
                match result {
                    Ok(()) => produced += chunk.len() as u64,
                    Err(QueueError::CapacityExceeded { .. }) => {
                        next = next.wrapping_sub(chunk.len() as Element);
                        rejected += 1;
                    }
                    Err(e) => {
                        warn!("producer stopping: {}", e);
                        break;
                    }
                }
                std::thread::sleep(interval);
            }

            (produced, rejected)
        });

        let mut total = DrainStats::default();
        let mut last_report = Instant::now();

        while running.load(Ordering::SeqCst) {
            let stats = {
                let mut q = queue.lock().map_err(|_| "queue lock poisoned")?;
                dispatcher.drain(&mut q)
            };
            total.merge(stats);

            if last_report.elapsed() >= report_every {
                let (queued, queueable) = {
                    let q = queue.lock().map_err(|_| "queue lock poisoned")?;
                    (q.count_queued(), q.count_queueable())
                };
                info!(
                    values_read = total.values_read,
                    success_rate = total.success_rate(),
                    queued,
                    queueable,
                    "status"
                );
                last_report = Instant::now();
            }

            std::thread::sleep(Duration::from_millis(10));
        }

        let (produced, rejected) = producer.join().map_err(|_| "producer thread panicked")?;

        let mut q = queue.lock().map_err(|_| "queue lock poisoned")?;
        total.merge(dispatcher.drain(&mut q));
        q.finalize();

        info!("Shutting down");
        info!(
            produced,
            rejected_batches = rejected,
            consumed = total.values_read,
            "totals"
        );
        Ok(())
    })
}
