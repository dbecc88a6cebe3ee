use crate::capacity::recommended_slots;

/// Construction-time settings for a [`Queue`](crate::Queue).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueConfig {
    /// Slot count. Must be a power of two and at least 2; the ring holds one
    /// element less than this.
    pub capacity: usize,
    /// Issue the CPU spin hint while the producer waits on a full ring.
    ///
    /// Off by default: the consumer is expected to be the hotter side, so the
    /// producer re-polls without backing off.
    pub producer_spin_hint: bool,
    /// Issue the CPU spin hint while the consumer waits on an empty ring.
    pub consumer_spin_hint: bool,
}

impl QueueConfig {
    /// Slot count used by [`QueueConfig::default`].
    pub const DEFAULT_CAPACITY: usize = 1024;

    /// Default settings with the slot count sized for `T`.
    pub const fn recommended<T>() -> Self {
        QueueConfig {
            capacity: recommended_slots::<T>(),
            producer_spin_hint: false,
            consumer_spin_hint: true,
        }
    }

    /// Replaces the slot count.
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Replaces [`QueueConfig::producer_spin_hint`].
    pub const fn with_producer_spin_hint(mut self, enabled: bool) -> Self {
        self.producer_spin_hint = enabled;
        self
    }

    /// Replaces [`QueueConfig::consumer_spin_hint`].
    pub const fn with_consumer_spin_hint(mut self, enabled: bool) -> Self {
        self.consumer_spin_hint = enabled;
        self
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        QueueConfig {
            capacity: Self::DEFAULT_CAPACITY,
            producer_spin_hint: false,
            consumer_spin_hint: true,
        }
    }
}
