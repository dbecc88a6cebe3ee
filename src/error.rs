use thiserror::Error;

/// Returned by [`Producer::try_push`](crate::Producer::try_push) when the ring is full.
///
/// Carries the rejected value back to the caller untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("queue is full")]
pub struct PushError<T>(pub T);

impl<T> PushError<T> {
    /// Recover the value that could not be enqueued.
    pub fn into_inner(self) -> T {
        self.0
    }
}

/// Returned by [`Consumer::try_pop`](crate::Consumer::try_pop) when the ring is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("queue is empty")]
pub struct PopError;

/// Invalid slot count handed to a queue constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CapacityError {
    /// Masked indexing needs a power-of-two slot count.
    #[error("capacity must be a power of 2, got {0}")]
    NotPowerOfTwo(usize),
    /// One slot always stays empty, so fewer than two slots hold nothing.
    #[error("capacity must be at least 2, got {0}")]
    TooSmall(usize),
}
