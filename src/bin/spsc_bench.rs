//! SPSC queue throughput and round-trip latency benchmark.
//!
//! Usage:
//!     cargo run --release --features bench --bin spsc_bench
//!
//! Environment variables:
//!     PRODUCER_CPU=0          Pin producer to CPU 0 (default: 0)
//!     CONSUMER_CPU=1          Pin consumer to CPU 1 (default: 1)
//!     ITERATIONS=10000000     Values sent per run (default: 10_000_000)
//!     QUEUE_SLOTS=32768       Ring size (default: recommended slots for u64)
//!     RUST_LOG=info           Log filter

use std::env;
use std::hint::black_box;
use std::str::FromStr;
use std::thread;
use std::time::Instant;

use tracing::{info, warn};
use turbo_spsc::{recommended_slots, Queue};

type Payload = u64;

struct BenchConfig {
    producer_cpu: usize,
    consumer_cpu: usize,
    iterations: u64,
    slots: usize,
}

impl BenchConfig {
    fn from_env() -> Self {
        BenchConfig {
            producer_cpu: env_or("PRODUCER_CPU", 0),
            consumer_cpu: env_or("CONSUMER_CPU", 1),
            iterations: env_or("ITERATIONS", 10_000_000),
            slots: env_or("QUEUE_SLOTS", recommended_slots::<Payload>()),
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "unparsable value, using default");
            default
        }),
        Err(_) => default,
    }
}

fn pin_to_cpu(id: usize) {
    if !core_affinity::set_for_current(core_affinity::CoreId { id }) {
        warn!(cpu = id, "failed to pin thread");
    }
}

fn bench_throughput(config: &BenchConfig) {
    let (mut tx, mut rx) = Queue::<Payload>::new(config.slots).split();
    let iterations = config.iterations;
    let consumer_cpu = config.consumer_cpu;

    let consumer = thread::spawn(move || {
        pin_to_cpu(consumer_cpu);
        for expected in 0..iterations {
            let value = rx.pop();
            if value != expected {
                panic!("Data corruption: expected {expected}, got {value}");
            }
        }
    });

    pin_to_cpu(config.producer_cpu);
    let start = Instant::now();
    for i in 0..iterations {
        tx.push(i);
    }
    consumer.join().expect("consumer thread panicked");
    let elapsed = start.elapsed();

    let ops_per_ms = u128::from(iterations) * 1_000_000 / elapsed.as_nanos().max(1);
    info!(ops_per_ms = ops_per_ms as u64, elapsed_ms = elapsed.as_millis() as u64, "throughput");
}

fn bench_rtt(config: &BenchConfig) {
    let (mut ping_tx, mut ping_rx) = Queue::<Payload>::new(config.slots).split();
    let (mut pong_tx, mut pong_rx) = Queue::<Payload>::new(config.slots).split();
    let iterations = config.iterations;
    let consumer_cpu = config.consumer_cpu;

    let responder = thread::spawn(move || {
        pin_to_cpu(consumer_cpu);
        for _ in 0..iterations {
            let value = ping_rx.pop();
            pong_tx.push(value);
        }
    });

    pin_to_cpu(config.producer_cpu);
    let start = Instant::now();
    for i in 0..iterations {
        ping_tx.push(i);
        black_box(pong_rx.pop());
    }
    let elapsed = start.elapsed();
    responder.join().expect("responder thread panicked");

    let rtt_ns = elapsed.as_nanos() / u128::from(iterations.max(1));
    info!(rtt_ns = rtt_ns as u64, "round trip");
}

fn main() {
    turbo_spsc::init_tracing();
    let config = BenchConfig::from_env();

    info!(
        slots = config.slots,
        iterations = config.iterations,
        producer_cpu = config.producer_cpu,
        consumer_cpu = config.consumer_cpu,
        "turbo_spsc benchmark"
    );
    bench_throughput(&config);
    bench_rtt(&config);
}
