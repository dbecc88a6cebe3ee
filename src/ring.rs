//! Fixed slot storage addressed by masked cursors.

use core::mem::MaybeUninit;

use crate::sync::UnsafeCell;

struct Slot<T> {
    value: UnsafeCell<MaybeUninit<T>>,
}

impl<T> Slot<T> {
    fn new() -> Self {
        Slot {
            value: UnsafeCell::new(MaybeUninit::uninit()),
        }
    }
}

/// `capacity` slots, allocated once. Which slots hold a live value is decided
/// entirely by the cursors; the ring itself keeps no occupancy state.
pub(crate) struct Ring<T> {
    slots: Box<[Slot<T>]>,
    mask: usize,
}

impl<T> Ring<T> {
    /// `capacity` must already be validated as a power of two.
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity.is_power_of_two());
        let slots = (0..capacity).map(|_| Slot::new()).collect();
        Ring {
            slots,
            mask: capacity - 1,
        }
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.mask + 1
    }

    #[inline(always)]
    pub(crate) fn next_index(&self, index: usize) -> usize {
        index.wrapping_add(1) & self.mask
    }

    /// Occupied slot count between a write and a read cursor.
    #[inline(always)]
    pub(crate) fn occupied(&self, write: usize, read: usize) -> usize {
        write.wrapping_sub(read) & self.mask
    }

    /// # Safety
    ///
    /// The caller must own slot `index` (the consumer has released it) and the
    /// slot must not hold a live value.
    #[inline(always)]
    pub(crate) unsafe fn write(&self, index: usize, value: T) {
        self.slots[index].value.with_mut(|slot| {
            // SAFETY: exclusive slot ownership is guaranteed by the caller.
            unsafe { (*slot).write(value) };
        });
    }

    /// Moves the value out, leaving the slot logically empty.
    ///
    /// # Safety
    ///
    /// The caller must own slot `index` (the producer has published it) and the
    /// slot must hold a live value that is not read again.
    #[inline(always)]
    pub(crate) unsafe fn read(&self, index: usize) -> T {
        self.slots[index]
            .value
            // SAFETY: the slot is initialized and exclusively owned per the caller.
            .with(|slot| unsafe { (*slot).assume_init_read() })
    }

    /// # Safety
    ///
    /// Same contract as [`Ring::read`].
    pub(crate) unsafe fn drop_in_place(&self, index: usize) {
        self.slots[index].value.with_mut(|slot| {
            // SAFETY: see caller contract.
            unsafe { (*slot).assume_init_drop() };
        });
    }
}
