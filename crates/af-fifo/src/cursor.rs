//! # Cursor — Per-Domain Position Tracker
//!
//! Holds one domain's binary position together with its Gray mirror. The
//! producer owns a write cursor, the consumer a read cursor; neither cursor
//! ever looks at the other. Comparing them is the job of the relayed Gray
//! values, see [`crate::relay`].

use af_core::PointerSpace;

/// A binary position and its Gray encoding, always kept in step.
#[derive(Debug)]
pub(crate) struct Cursor {
    /// Current position, `address_width + 1` bits.
    pos: u32,

    /// `bin2gray(pos)`, the value published to the peer domain.
    gray: u32,

    space: PointerSpace,
}

impl Cursor {
    pub(crate) fn new(space: PointerSpace) -> Self {
        Self {
            pos: 0,
            gray: 0,
            space,
        }
    }

    #[inline]
    pub(crate) fn position(&self) -> u32 {
        self.pos
    }

    #[inline]
    pub(crate) fn gray(&self) -> u32 {
        self.gray
    }

    /// Claim the slot under the current position and move one step forward.
    ///
    /// Returns the claimed slot index. Gating against the peer is the
    /// caller's business; a cursor cannot tell full from empty on its own.
    #[inline]
    pub(crate) fn advance(&mut self) -> usize {
        let slot = self.space.index(self.pos);
        self.pos = self.space.increment(self.pos);
        self.gray = self.space.to_gray(self.pos);
        slot
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.pos = 0;
        self.gray = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use af_core::{gray_distance, FifoConfig};

    fn cursor(address_width: u32) -> Cursor {
        Cursor::new(FifoConfig::new(32, address_width).unwrap().pointer_space())
    }

    #[test]
    fn test_new_cursor_is_at_zero() {
        let c = cursor(2);
        assert_eq!(c.position(), 0);
        assert_eq!(c.gray(), 0);
    }

    #[test]
    fn test_advance_returns_slot() {
        let mut c = cursor(2);
        assert_eq!(c.advance(), 0);
        assert_eq!(c.advance(), 1);
        assert_eq!(c.advance(), 2);
        assert_eq!(c.advance(), 3);
        // Second lap: same slots, wrap bit set.
        assert_eq!(c.advance(), 0);
        assert_eq!(c.position(), 5);
    }

    #[test]
    fn test_position_wraps_after_two_laps() {
        let mut c = cursor(2);
        for _ in 0..8 {
            c.advance();
        }
        assert_eq!(c.position(), 0);
        assert_eq!(c.gray(), 0);
    }

    #[test]
    fn test_gray_changes_one_bit_per_advance() {
        let mut c = cursor(3);
        for _ in 0..64 {
            let before = c.gray();
            c.advance();
            assert_eq!(gray_distance(before, c.gray()), 1);
        }
    }

    #[test]
    fn test_clear_returns_to_origin() {
        let mut c = cursor(2);
        c.advance();
        c.advance();
        c.clear();
        assert_eq!(c.position(), 0);
        assert_eq!(c.gray(), 0);
    }
}
