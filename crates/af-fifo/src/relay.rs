//! # Relay — Two-Stage Cross-Domain Import
//!
//! The importing domain samples the peer's published Gray position into
//! `stage1` on every one of its own ticks, and shifts `stage1` into
//! `stage2` on the same tick. Only `stage2` is trusted for flag and
//! occupancy derivation, so a peer update becomes usable no sooner than
//! two local ticks after it was published.
//!
//! The chain is a pass-through: every sample reaches `stage2` exactly one
//! tick later. Nothing is decimated or dropped.

/// Delay chain owned by the importing domain.
#[derive(Debug, Default)]
pub(crate) struct Relay {
    stage1: u32,
    stage2: u32,
}

impl Relay {
    pub(crate) const fn new() -> Self {
        Self {
            stage1: 0,
            stage2: 0,
        }
    }

    /// One local tick: `stage2 <- stage1`, `stage1 <- sample`.
    #[inline]
    pub(crate) fn shift(&mut self, sample: u32) {
        self.stage2 = self.stage1;
        self.stage1 = sample;
    }

    /// The settled peer position.
    #[inline]
    pub(crate) fn settled(&self) -> u32 {
        self.stage2
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.stage1 = 0;
        self.stage2 = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_settles_after_two_shifts() {
        let mut r = Relay::new();
        r.shift(5);
        assert_eq!(r.settled(), 0);
        r.shift(5);
        assert_eq!(r.settled(), 5);
    }

    #[test]
    fn test_every_sample_passes_through() {
        let mut r = Relay::new();
        let mut seen = Vec::new();
        for sample in [1, 3, 2, 6, 7] {
            r.shift(sample);
            seen.push(r.settled());
        }
        r.shift(0);
        seen.push(r.settled());
        assert_eq!(seen, vec![0, 1, 3, 2, 6, 7]);
    }

    #[test]
    fn test_clear_flushes_both_stages() {
        let mut r = Relay::new();
        r.shift(4);
        r.shift(4);
        r.clear();
        assert_eq!(r.settled(), 0);
        r.shift(9);
        assert_eq!(r.settled(), 0);
    }
}
