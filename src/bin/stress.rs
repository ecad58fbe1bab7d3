use clap::Parser;
use ringqueue::logging;
use ringqueue::queue::RingQueue;
use ringqueue::stress;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Two-thread bulk throughput run over a mutex-guarded queue")]
struct Args {
    #[arg(long, default_value_t = 1024 * 1024)]
    capacity_bytes: usize,

    #[arg(long, default_value_t = 1024)]
    chunk: usize,

    #[arg(long, default_value_t = 5)]
    duration_secs: u64,
}

fn main() {
    logging::init("info");

    if let Err(e) = run(Args::parse()) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    info!("ringqueue stress test");

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .map_err(|e| format!("Failed to set Ctrl+C handler: {}", e))?;

    let queue = RingQueue::with_capacity_bytes(args.capacity_bytes)?;
    if queue.count_queueable() == 0 {
        return Err(format!(
            "capacity of {} bytes leaves no usable slots",
            args.capacity_bytes
        )
        .into());
    }

    info!("Running for {} seconds...", args.duration_secs);
    let report = stress::run(
        queue,
        args.chunk,
        Duration::from_secs(args.duration_secs),
        &running,
    )?;

    info!("Results:");
    info!("  Enqueued: {} values", report.written);
    info!("  Dequeued: {} values", report.read);
    info!("  Out of order: {}", report.out_of_order);
    info!(
        "  Throughput: {:.2}M values/sec",
        report.throughput() / 1_000_000.0
    );

    if !report.is_consistent() {
        return Err("FIFO verification failed".into());
    }
    Ok(())
}
