//! turbo_spsc - Bounded lock-free single-producer/single-consumer ring buffer
//!
//! Two cache-padded cursors, one per side, handed off with Release stores and
//! Acquire loads. No locks, no CAS, no allocation after construction. Each side
//! keeps a private snapshot of the other side's cursor and only touches the
//! remote cache line when the snapshot says the ring is full or empty.
//!
//! The queue is split into a [`Producer`] and a [`Consumer`]. Neither can be
//! cloned and their mutating methods take `&mut self`, so the single-producer,
//! single-consumer discipline is checked by the compiler.
//!
//! ```
//! use std::thread;
//!
//! let (mut tx, mut rx) = turbo_spsc::channel::<u64>(1024);
//!
//! let producer = thread::spawn(move || {
//!     for i in 0..10_000 {
//!         tx.push(i);
//!     }
//! });
//!
//! for i in 0..10_000 {
//!     assert_eq!(rx.pop(), i);
//! }
//! producer.join().unwrap();
//! ```
#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

mod capacity;
mod config;
mod error;
mod queue;
mod ring;
mod sync;
mod trace;

pub use capacity::{
    recommended_slots, recommended_slots_for, CACHE_LINE, MIN_CAPACITY, SWEET_SPOT_BYTES,
};
pub use config::QueueConfig;
pub use error::{CapacityError, PopError, PushError};
pub use queue::{channel, Consumer, Observer, Producer, Queue};
pub use trace::init_tracing;
