//! # Storage — Fixed-Capacity Word Slots
//!
//! The buffer is shared by both domains but access is partitioned by
//! construction: the producer only writes the slot under its write
//! position, the consumer only reads the slot under its read position,
//! and the full/empty gating keeps those two slots apart.
//!
//! Slots are atomics so that the partitioning needs no `unsafe`. Each slot
//! access is `Relaxed`; ordering comes from the Gray position that is
//! published after the access.

use std::sync::atomic::{AtomicU64, Ordering};

pub(crate) struct Storage {
    slots: Box<[AtomicU64]>,
}

impl Storage {
    /// Allocate `capacity` zeroed slots. Never resized.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| AtomicU64::new(0)).collect(),
        }
    }

    #[inline]
    pub(crate) fn write(&self, index: usize, word: u64) {
        self.slots[index].store(word, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn read(&self, index: usize) -> u64 {
        self.slots[index].load(Ordering::Relaxed)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_storage_is_zeroed() {
        let s = Storage::new(8);
        assert_eq!(s.len(), 8);
        assert!((0..8).all(|i| s.read(i) == 0));
    }

    #[test]
    fn test_write_then_read_slot() {
        let s = Storage::new(4);
        s.write(3, 0xDEAD_BEEF);
        assert_eq!(s.read(3), 0xDEAD_BEEF);
        assert_eq!(s.read(2), 0);
    }
}
