//! Simple usage example

use std::thread;
use std::time::Duration;
use turbo_spsc::{channel, PopError, PushError};

fn main() {
    println!("turbo_spsc - Simple Example\n");

    // 16 slots, room for 15 messages in flight
    let (mut tx, mut rx) = channel::<String>(16);

    // Producer thread
    let producer = thread::spawn(move || {
        for i in 0..10 {
            let mut message = format!("Message {}", i);
            println!("Sending: {}", message);

            // Queue is full, take the message back and retry
            while let Err(PushError(back)) = tx.try_push(message) {
                message = back;
                std::hint::spin_loop();
            }

            // Small delay to make output readable
            thread::sleep(Duration::from_millis(100));
        }
        println!("Producer finished!");
    });

    // Consumer thread
    let consumer = thread::spawn(move || {
        for _ in 0..10 {
            loop {
                match rx.try_pop() {
                    Ok(message) => {
                        println!("Received: {}", message);
                        break;
                    }
                    Err(PopError) => {
                        // Queue is empty, spin and retry
                        std::hint::spin_loop();
                    }
                }
            }
        }
        println!("Consumer finished!");
    });

    producer.join().unwrap();
    consumer.join().unwrap();

    println!("\nExample completed successfully!");
}
