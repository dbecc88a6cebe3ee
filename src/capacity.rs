//! Slot-count selection.
//!
//! The ring indexes with `cursor & (capacity - 1)`, so every capacity handed to
//! a queue must be a power of two. One slot always stays empty to tell "full"
//! from "empty", which makes 2 the smallest usable ring.

use core::mem::size_of;

use crate::error::CapacityError;

/// Assumed destructive-interference size.
pub const CACHE_LINE: usize = 64;

/// Target total ring footprint: 4096 cache lines (256 KiB).
pub const SWEET_SPOT_BYTES: usize = 4096 * CACHE_LINE;

/// Smallest ring that can hold an element.
pub const MIN_CAPACITY: usize = 2;

/// Default slot count for elements of `elem_size` bytes.
///
/// Rounds `SWEET_SPOT_BYTES / elem_size` down to a power of two, so the
/// resulting footprint is at most the sweet spot and at least half of it
/// (until the `MIN_CAPACITY` floor kicks in for huge elements). Zero-sized
/// elements count as one byte.
pub const fn recommended_slots_for(elem_size: usize) -> usize {
    let elem_size = if elem_size == 0 { 1 } else { elem_size };
    let raw = SWEET_SPOT_BYTES / elem_size;
    let slots = if raw < MIN_CAPACITY {
        MIN_CAPACITY
    } else {
        1usize << (usize::BITS - 1 - raw.leading_zeros())
    };
    assert!(slots.is_power_of_two(), "recommended slot count must be a power of 2");
    slots
}

/// Default slot count for `T`, see [`recommended_slots_for`].
pub const fn recommended_slots<T>() -> usize {
    recommended_slots_for(size_of::<T>())
}

/// Checks a requested slot count.
pub fn validate(capacity: usize) -> Result<usize, CapacityError> {
    if capacity < MIN_CAPACITY {
        return Err(CapacityError::TooSmall(capacity));
    }
    if !capacity.is_power_of_two() {
        return Err(CapacityError::NotPowerOfTwo(capacity));
    }
    Ok(capacity)
}
