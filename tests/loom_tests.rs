#![cfg(loom)]

use loom::thread;
use turbo_spsc::{channel, PopError, PushError};

#[test]
fn loom_spsc_fifo() {
    loom::model(|| {
        let (mut tx, mut rx) = channel::<i32>(4);

        let producer = thread::spawn(move || {
            for i in 0..3 {
                let mut value = i;
                while let Err(PushError(back)) = tx.try_push(value) {
                    value = back;
                    thread::yield_now();
                }
            }
        });

        let consumer = thread::spawn(move || {
            let mut received = vec![];
            while received.len() < 3 {
                match rx.try_pop() {
                    Ok(val) => received.push(val),
                    Err(PopError) => thread::yield_now(),
                }
            }
            received
        });

        producer.join().unwrap();
        let received = consumer.join().unwrap();
        assert_eq!(received, vec![0, 1, 2]);
    });
}

#[test]
fn loom_full_ring_slot_reuse() {
    // Capacity 2 holds one element, so every push reuses the slot the
    // consumer just released.
    loom::model(|| {
        let (mut tx, mut rx) = channel::<String>(2);

        let producer = thread::spawn(move || {
            for i in 0..3 {
                tx.push(i.to_string());
            }
        });

        for i in 0..3 {
            assert_eq!(rx.pop(), i.to_string());
        }
        producer.join().unwrap();
    });
}

#[test]
fn loom_blocking_roundtrip() {
    loom::model(|| {
        let (mut req_tx, mut req_rx) = channel::<u32>(2);
        let (mut resp_tx, mut resp_rx) = channel::<u32>(2);

        let echo = thread::spawn(move || {
            for _ in 0..2 {
                let value = req_rx.pop();
                resp_tx.push(value + 1);
            }
        });

        for i in 0..2 {
            req_tx.push(i);
            assert_eq!(resp_rx.pop(), i + 1);
        }
        echo.join().unwrap();
    });
}

#[test]
fn loom_try_push_on_full_keeps_content() {
    loom::model(|| {
        let (mut tx, mut rx) = channel::<u8>(2);
        tx.push(1);

        let producer = thread::spawn(move || {
            // Either rejected (consumer not done yet) or accepted after the pop.
            tx.try_push(2).is_ok()
        });

        assert_eq!(rx.pop(), 1);
        let accepted = producer.join().unwrap();
        if accepted {
            assert_eq!(rx.pop(), 2);
        } else {
            assert_eq!(rx.try_pop(), Err(PopError));
        }
    });
}

#[test]
fn loom_observer_snapshot() {
    loom::model(|| {
        let (mut tx, mut rx) = channel::<u8>(4);
        let observer = tx.observer();

        let producer = thread::spawn(move || {
            tx.push(1);
            tx.push(2);
        });

        // Never more than two elements exist, whatever the interleaving of
        // the observer's two cursor loads with the pushes and pops.
        let watcher = thread::spawn(move || {
            assert!(observer.size() <= 2);
        });

        assert_eq!(rx.pop(), 1);
        assert_eq!(rx.pop(), 2);
        producer.join().unwrap();
        watcher.join().unwrap();
    });
}

#[test]
fn loom_drop_with_leftovers() {
    loom::model(|| {
        let (mut tx, rx) = channel::<std::sync::Arc<()>>(4);
        let tracker = std::sync::Arc::new(());
        let clone = tracker.clone();

        let producer = thread::spawn(move || {
            tx.push(clone);
        });
        producer.join().unwrap();
        drop(rx);
        assert_eq!(std::sync::Arc::strong_count(&tracker), 1);
    });
}
