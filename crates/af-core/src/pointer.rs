//! # Pointer — The `(address_width + 1)`-bit Position Domain
//!
//! Write and read positions carry one bit more than the buffer index. When
//! the low `address_width` bits of both positions coincide, that extra
//! wrap bit tells "full" (it differs) from "empty" (it matches).
//!
//! Positions only ever increment, modulo `2^(address_width + 1)`.

use crate::gray::{bin2gray, gray2bin};

/// Arithmetic over positions of one FIFO geometry.
///
/// Obtained from [`FifoConfig::pointer_space`](crate::FifoConfig::pointer_space),
/// which guarantees `address_width >= 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerSpace {
    address_width: u32,
}

impl PointerSpace {
    #[inline]
    pub(crate) const fn new(address_width: u32) -> Self {
        Self { address_width }
    }

    #[inline]
    pub const fn address_width(&self) -> u32 {
        self.address_width
    }

    /// Width of a position in bits.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.address_width + 1
    }

    #[inline]
    pub const fn mask(&self) -> u32 {
        (1 << self.width()) - 1
    }

    #[inline]
    pub const fn capacity(&self) -> u32 {
        1 << self.address_width
    }

    #[inline]
    pub const fn wrap(&self, pos: u32) -> u32 {
        pos & self.mask()
    }

    #[inline]
    pub const fn increment(&self, pos: u32) -> u32 {
        self.wrap(pos.wrapping_add(1))
    }

    /// Buffer slot addressed by a position (its low `address_width` bits).
    #[inline]
    pub const fn index(&self, pos: u32) -> usize {
        (pos & (self.capacity() - 1)) as usize
    }

    /// `(write - read) mod 2^(address_width + 1)`.
    #[inline]
    pub const fn occupancy(&self, write: u32, read: u32) -> u32 {
        self.wrap(write.wrapping_sub(read))
    }

    #[inline]
    pub const fn to_gray(&self, pos: u32) -> u32 {
        bin2gray(self.wrap(pos))
    }

    #[inline]
    pub const fn from_gray(&self, gray: u32) -> u32 {
        gray2bin(gray, self.width())
    }

    /// `gray` with its two most-significant bits inverted.
    ///
    /// `bin2gray(p + capacity)` equals `full_pattern(bin2gray(p))`: adding
    /// `capacity` flips the binary MSB, which flips the top two Gray bits and
    /// leaves the rest untouched.
    #[inline]
    pub const fn full_pattern(&self, gray: u32) -> u32 {
        self.wrap(gray ^ (0b11 << (self.address_width - 1)))
    }

    /// Full: the write position is exactly one lap ahead of the read position.
    #[inline]
    pub const fn is_full(&self, write_gray: u32, read_gray: u32) -> bool {
        write_gray == self.full_pattern(read_gray)
    }

    /// Empty: both positions have caught up exactly.
    #[inline]
    pub const fn is_empty(&self, read_gray: u32, write_gray: u32) -> bool {
        read_gray == write_gray
    }
}

#[cfg(kani)]
mod proofs {
    use super::*;

    /// **Proof: full and empty are mutually exclusive and exact**
    ///
    /// For every pair of positions in a 4-bit address space, the Gray-only
    /// comparisons agree with binary occupancy.
    #[kani::proof]
    fn verify_flags_match_occupancy() {
        let space = PointerSpace::new(4);
        let write: u32 = kani::any();
        let read: u32 = kani::any();
        kani::assume(write <= space.mask());
        kani::assume(read <= space.mask());

        let wg = space.to_gray(write);
        let rg = space.to_gray(read);
        let occupancy = space.occupancy(write, read);

        assert_eq!(space.is_full(wg, rg), occupancy == space.capacity());
        assert_eq!(space.is_empty(rg, wg), occupancy == 0);
        assert!(!(space.is_full(wg, rg) && space.is_empty(rg, wg)));
    }
}
