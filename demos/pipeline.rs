//! Three-stage pipeline: parse -> square -> sum, one SPSC queue per hop.
//!
//! Each stage owns exactly one consumer end and one producer end, which is
//! the only topology an SPSC queue supports.

use std::thread;
use std::time::{Duration, Instant};
use turbo_spsc::{PopError, Queue};

const JOBS: u64 = 100_000;

fn main() {
    println!("Pipeline Example\n");

    let (mut raw_tx, mut raw_rx) = Queue::<String>::with_recommended_capacity().split();
    let (mut num_tx, mut num_rx) = Queue::<u64>::with_recommended_capacity().split();

    println!("stage 1 ring: {} slots", raw_tx.capacity());
    println!("stage 2 ring: {} slots\n", num_tx.capacity());

    let start = Instant::now();

    let source = thread::spawn(move || {
        for i in 0..JOBS {
            raw_tx.push(i.to_string());
        }
    });

    let square = thread::spawn(move || {
        for _ in 0..JOBS {
            let line = raw_rx.pop();
            let n: u64 = line.parse().expect("stage 1 only sends numbers");
            num_tx.push(n * n);
        }
    });

    let monitor = num_rx.observer();
    let sink = thread::spawn(move || {
        let mut sum = 0u64;
        let mut received = 0;
        while received < JOBS {
            match num_rx.try_pop() {
                Ok(value) => {
                    sum += value;
                    received += 1;
                }
                // Nothing ready: a real sink might do other work here.
                Err(PopError) => std::hint::spin_loop(),
            }
        }
        sum
    });

    for _ in 0..3 {
        println!("backlog before sink: {}", monitor.size());
        thread::sleep(Duration::from_millis(1));
    }

    source.join().unwrap();
    square.join().unwrap();
    let sum = sink.join().unwrap();

    let expected: u64 = (0..JOBS).map(|n| n * n).sum();
    assert_eq!(sum, expected);
    println!("\nsum of squares 0..{JOBS} = {sum} in {:?}", start.elapsed());
}
