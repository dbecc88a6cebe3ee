//! Synchronization primitives, swapped for `loom` equivalents under `--cfg loom`.

#[cfg(loom)]
pub(crate) use loom::sync::atomic::{AtomicUsize, Ordering};
#[cfg(loom)]
pub(crate) use loom::sync::Arc;
#[cfg(loom)]
pub(crate) use loom::cell::UnsafeCell;

#[cfg(not(loom))]
pub(crate) use std::sync::atomic::{AtomicUsize, Ordering};
#[cfg(not(loom))]
pub(crate) use std::sync::Arc;

/// `std` cell exposing the closure API of `loom::cell::UnsafeCell`.
#[cfg(not(loom))]
#[derive(Debug)]
#[repr(transparent)]
pub(crate) struct UnsafeCell<T>(core::cell::UnsafeCell<T>);

#[cfg(not(loom))]
impl<T> UnsafeCell<T> {
    #[inline(always)]
    pub(crate) const fn new(value: T) -> Self {
        UnsafeCell(core::cell::UnsafeCell::new(value))
    }

    #[inline(always)]
    pub(crate) fn with<R>(&self, f: impl FnOnce(*const T) -> R) -> R {
        f(self.0.get())
    }

    #[inline(always)]
    pub(crate) fn with_mut<R>(&self, f: impl FnOnce(*mut T) -> R) -> R {
        f(self.0.get())
    }
}

/// One busy-wait iteration.
///
/// With `hint` set this issues the CPU's spin-wait instruction (`pause` on x86,
/// `isb`/`yield` on ARM, nothing where the ISA has no such hint). Without it the
/// loop re-reads the peer cursor as fast as it can.
#[cfg(not(loom))]
#[inline(always)]
pub(crate) fn spin_wait(hint: bool) {
    if hint {
        core::hint::spin_loop();
    }
}

/// Under the model checker every spin must yield, or the explored execution
/// never reaches the peer thread.
#[cfg(loom)]
#[inline(always)]
pub(crate) fn spin_wait(_hint: bool) {
    loom::thread::yield_now();
}
