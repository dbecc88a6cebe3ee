//! The cursor protocol.
//!
//! ```text
//! producer: write slot[w]      -> store(producer = w + 1, Release)
//! consumer: load(producer, Acquire) -> read slot[r] -> store(consumer = r + 1, Release)
//! producer: load(consumer, Acquire) before reusing slot[r]
//! ```
//!
//! Each cursor has exactly one writer and sits on its own cache line. Each
//! handle keeps a private snapshot of the peer's cursor and only reloads it
//! when the snapshot says the ring is full (producer) or empty (consumer). A
//! stale snapshot can only make those checks more pessimistic.

use core::fmt;

use crossbeam_utils::CachePadded;

use crate::capacity::{recommended_slots, validate};
use crate::config::QueueConfig;
use crate::error::{CapacityError, PopError, PushError};
use crate::ring::Ring;
use crate::sync::{spin_wait, Arc, AtomicUsize, Ordering};
use crate::trace::{debug, trace};

struct Shared<T> {
    /// Next slot the producer writes. Written by the producer only.
    producer: CachePadded<AtomicUsize>,
    /// Next slot the consumer reads. Written by the consumer only.
    consumer: CachePadded<AtomicUsize>,
    ring: Ring<T>,
}

// SAFETY: slots are handed between the two threads through the Release/Acquire
// pair on the cursors; at any instant a slot is touched by at most one side.
unsafe impl<T: Send> Send for Shared<T> {}
unsafe impl<T: Send> Sync for Shared<T> {}

impl<T> Shared<T> {
    fn new(capacity: usize) -> Self {
        Shared {
            producer: CachePadded::new(AtomicUsize::new(0)),
            consumer: CachePadded::new(AtomicUsize::new(0)),
            ring: Ring::new(capacity),
        }
    }

    /// Advisory: both cursors may move right after the loads.
    ///
    /// The consumer cursor is loaded first. Its Acquire makes the producer
    /// cursor read afterwards at least as new as the one the consumer had
    /// seen, so the write cursor never trails the read cursor.
    #[inline]
    fn size(&self) -> usize {
        let read = self.consumer.load(Ordering::Acquire);
        let write = self.producer.load(Ordering::Acquire);
        self.ring.occupied(write, read)
    }

    #[inline]
    fn is_empty(&self) -> bool {
        let read = self.consumer.load(Ordering::Acquire);
        let write = self.producer.load(Ordering::Acquire);
        write == read
    }
}

impl<T> Drop for Shared<T> {
    fn drop(&mut self) {
        let write = self.producer.load(Ordering::Relaxed);
        let mut read = self.consumer.load(Ordering::Relaxed);
        if core::mem::needs_drop::<T>() {
            while read != write {
                // SAFETY: `&mut self` means both handles are gone, and every slot
                // in [read, write) holds a value that was never popped.
                unsafe { self.ring.drop_in_place(read) };
                read = self.ring.next_index(read);
            }
        }
        trace!(
            capacity = self.ring.capacity(),
            leftover = self.ring.occupied(write, self.consumer.load(Ordering::Relaxed)),
            "spsc queue dropped"
        );
    }
}

/// A bounded SPSC queue before it is split into its two endpoints.
///
/// A queue with capacity `n` holds at most `n - 1` elements.
///
/// ```
/// use turbo_spsc::Queue;
///
/// let (mut tx, mut rx) = Queue::<u32>::new(8).split();
/// tx.push(7);
/// assert_eq!(rx.pop(), 7);
/// ```
pub struct Queue<T> {
    shared: Arc<Shared<T>>,
    config: QueueConfig,
}

impl<T> Queue<T> {
    /// Creates a queue with `capacity` slots.
    ///
    /// # Panics
    ///
    /// If `capacity` is not a power of two or is smaller than 2. A malformed
    /// ring cannot be operated safely, so this is not a recoverable condition;
    /// use [`Queue::try_new`] to validate untrusted input first.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(queue) => queue,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible form of [`Queue::new`].
    pub fn try_new(capacity: usize) -> Result<Self, CapacityError> {
        Self::with_config(QueueConfig::default().with_capacity(capacity))
    }

    /// Creates a queue sized by [`recommended_slots`] for `T`.
    pub fn with_recommended_capacity() -> Self {
        Self::new(recommended_slots::<T>())
    }

    /// Creates a queue from explicit settings.
    pub fn with_config(config: QueueConfig) -> Result<Self, CapacityError> {
        let capacity = validate(config.capacity)?;
        debug!(
            capacity,
            elem_size = core::mem::size_of::<T>(),
            footprint = capacity * core::mem::size_of::<T>(),
            "spsc queue created"
        );
        Ok(Queue {
            shared: Arc::new(Shared::new(capacity)),
            config,
        })
    }

    /// Hands out the only producer and the only consumer of this queue.
    pub fn split(self) -> (Producer<T>, Consumer<T>) {
        trace!(capacity = self.capacity(), "spsc queue split");
        let producer = Producer {
            shared: self.shared.clone(),
            cached_consumer: 0,
            spin_hint: self.config.producer_spin_hint,
        };
        let consumer = Consumer {
            shared: self.shared,
            cached_producer: 0,
            spin_hint: self.config.consumer_spin_hint,
        };
        (producer, consumer)
    }

    /// Slot count; at most `capacity() - 1` elements fit.
    pub fn capacity(&self) -> usize {
        self.shared.ring.capacity()
    }

    /// Number of queued elements.
    pub fn size(&self) -> usize {
        self.shared.size()
    }

    /// Advisory emptiness check.
    pub fn is_empty(&self) -> bool {
        self.shared.is_empty()
    }
}

impl<T> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queue")
            .field("capacity", &self.capacity())
            .field("size", &self.size())
            .finish()
    }
}

/// Shorthand for `Queue::new(capacity).split()`.
///
/// # Panics
///
/// Same as [`Queue::new`].
pub fn channel<T>(capacity: usize) -> (Producer<T>, Consumer<T>) {
    Queue::new(capacity).split()
}

/// Write end of the queue. There is exactly one per queue.
pub struct Producer<T> {
    shared: Arc<Shared<T>>,
    /// Last observed consumer cursor.
    cached_consumer: usize,
    spin_hint: bool,
}

impl<T> Producer<T> {
    /// Enqueues `value`, spinning while the ring is full.
    ///
    /// Never fails, but spins forever if the consumer stops popping.
    #[inline]
    pub fn push(&mut self, value: T) {
        let shared = &*self.shared;
        let cursor = shared.producer.load(Ordering::Relaxed);
        let next = shared.ring.next_index(cursor);

        if next == self.cached_consumer {
            loop {
                self.cached_consumer = shared.consumer.load(Ordering::Acquire);
                if next != self.cached_consumer {
                    break;
                }
                spin_wait(self.spin_hint);
            }
        }

        // SAFETY: `cursor` is outside [consumer, producer), so the consumer is
        // done with it and will not look at it until the store below.
        unsafe { shared.ring.write(cursor, value) };
        shared.producer.store(next, Ordering::Release);
    }

    /// Enqueues `value` if there is room.
    ///
    /// On a full ring nothing is written and the value comes back in the error.
    #[inline]
    pub fn try_push(&mut self, value: T) -> Result<(), PushError<T>> {
        let shared = &*self.shared;
        let cursor = shared.producer.load(Ordering::Relaxed);
        let next = shared.ring.next_index(cursor);

        if next == self.cached_consumer {
            self.cached_consumer = shared.consumer.load(Ordering::Acquire);
            if next == self.cached_consumer {
                return Err(PushError(value));
            }
        }

        // SAFETY: as in `push`.
        unsafe { shared.ring.write(cursor, value) };
        shared.producer.store(next, Ordering::Release);
        Ok(())
    }

    /// Slot count; at most `capacity() - 1` elements fit.
    pub fn capacity(&self) -> usize {
        self.shared.ring.capacity()
    }

    /// Advisory element count.
    pub fn size(&self) -> usize {
        self.shared.size()
    }

    /// Advisory emptiness check.
    pub fn is_empty(&self) -> bool {
        self.shared.is_empty()
    }

    /// Read-only view for a third thread.
    pub fn observer(&self) -> Observer<T> {
        Observer {
            shared: self.shared.clone(),
        }
    }
}

impl<T> fmt::Debug for Producer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer")
            .field("capacity", &self.capacity())
            .field("cached_consumer", &self.cached_consumer)
            .finish()
    }
}

/// Read end of the queue. There is exactly one per queue.
pub struct Consumer<T> {
    shared: Arc<Shared<T>>,
    /// Last observed producer cursor.
    cached_producer: usize,
    spin_hint: bool,
}

impl<T> Consumer<T> {
    /// Dequeues the oldest element, spinning while the ring is empty.
    ///
    /// Never fails, but spins forever if the producer stops pushing.
    #[inline]
    pub fn pop(&mut self) -> T {
        let shared = &*self.shared;
        let cursor = shared.consumer.load(Ordering::Relaxed);

        if cursor == self.cached_producer {
            loop {
                self.cached_producer = shared.producer.load(Ordering::Acquire);
                if cursor != self.cached_producer {
                    break;
                }
                spin_wait(self.spin_hint);
            }
        }

        // The value must be out of the slot before the cursor store hands the
        // slot back to the producer.
        // SAFETY: `cursor` is inside [consumer, producer) as published by the
        // Acquire load above, so the slot is initialized and ours.
        let value = unsafe { shared.ring.read(cursor) };
        shared
            .consumer
            .store(shared.ring.next_index(cursor), Ordering::Release);
        value
    }

    /// Dequeues the oldest element if there is one.
    ///
    /// On an empty ring neither storage nor the cursor is touched.
    #[inline]
    pub fn try_pop(&mut self) -> Result<T, PopError> {
        let shared = &*self.shared;
        let cursor = shared.consumer.load(Ordering::Relaxed);

        if cursor == self.cached_producer {
            self.cached_producer = shared.producer.load(Ordering::Acquire);
            if cursor == self.cached_producer {
                return Err(PopError);
            }
        }

        // SAFETY: as in `pop`.
        let value = unsafe { shared.ring.read(cursor) };
        shared
            .consumer
            .store(shared.ring.next_index(cursor), Ordering::Release);
        Ok(value)
    }

    /// Slot count; at most `capacity() - 1` elements fit.
    pub fn capacity(&self) -> usize {
        self.shared.ring.capacity()
    }

    /// Advisory element count.
    pub fn size(&self) -> usize {
        self.shared.size()
    }

    /// Advisory emptiness check.
    pub fn is_empty(&self) -> bool {
        self.shared.is_empty()
    }

    /// Read-only view for a third thread.
    pub fn observer(&self) -> Observer<T> {
        Observer {
            shared: self.shared.clone(),
        }
    }
}

impl<T> Iterator for Consumer<T> {
    type Item = T;

    /// Non-blocking: yields until the ring is observed empty.
    fn next(&mut self) -> Option<T> {
        self.try_pop().ok()
    }
}

impl<T> fmt::Debug for Consumer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Consumer")
            .field("capacity", &self.capacity())
            .field("cached_producer", &self.cached_producer)
            .finish()
    }
}

/// Size and emptiness queries from any thread.
///
/// Results are snapshots and can be stale by the time they are used.
pub struct Observer<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Observer<T> {
    /// Slot count; at most `capacity() - 1` elements fit.
    pub fn capacity(&self) -> usize {
        self.shared.ring.capacity()
    }

    /// Advisory element count.
    pub fn size(&self) -> usize {
        self.shared.size()
    }

    /// Advisory emptiness check.
    pub fn is_empty(&self) -> bool {
        self.shared.is_empty()
    }
}

impl<T> Clone for Observer<T> {
    fn clone(&self) -> Self {
        Observer {
            shared: self.shared.clone(),
        }
    }
}

impl<T> fmt::Debug for Observer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("capacity", &self.capacity())
            .field("size", &self.size())
            .finish()
    }
}
