//! # Config — Construction-Time Validation
//!
//! A malformed FIFO geometry is rejected before any storage exists. At run
//! time nothing can fail; full and empty are plain negative results.

use crate::pointer::PointerSpace;

/// Default bit-width of one stored word.
pub const DEFAULT_WORD_WIDTH: u32 = 32;

/// Default `log2(capacity)`: 4096 slots.
pub const DEFAULT_ADDRESS_WIDTH: u32 = 12;

/// Widest word a slot can hold.
pub const MAX_WORD_WIDTH: u32 = 64;

/// The full comparison inverts two distinct MSBs of the pointer, so the
/// address needs at least two bits.
pub const MIN_ADDRESS_WIDTH: u32 = 2;

/// Largest supported `log2(capacity)` (one million slots).
pub const MAX_ADDRESS_WIDTH: u32 = 20;

/// Reasons a FIFO geometry is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("word width must be at least one bit")]
    ZeroWordWidth,

    #[error("word width {0} exceeds the {max}-bit slot", max = MAX_WORD_WIDTH)]
    WordWidthTooLarge(u32),

    #[error("address width {0} is below the minimum of {min}", min = MIN_ADDRESS_WIDTH)]
    AddressWidthTooSmall(u32),

    #[error("address width {0} exceeds the maximum of {max}", max = MAX_ADDRESS_WIDTH)]
    AddressWidthTooLarge(u32),

    #[error("capacity {0} is not a power of two")]
    CapacityNotPowerOfTwo(usize),
}

/// Validated FIFO geometry.
///
/// Fields are private: a `FifoConfig` that exists is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FifoConfig {
    word_width: u32,
    address_width: u32,
}

impl FifoConfig {
    /// Validate a `(word_width, address_width)` pair.
    pub const fn new(word_width: u32, address_width: u32) -> Result<Self, ConfigError> {
        if word_width == 0 {
            return Err(ConfigError::ZeroWordWidth);
        }
        if word_width > MAX_WORD_WIDTH {
            return Err(ConfigError::WordWidthTooLarge(word_width));
        }
        if address_width < MIN_ADDRESS_WIDTH {
            return Err(ConfigError::AddressWidthTooSmall(address_width));
        }
        if address_width > MAX_ADDRESS_WIDTH {
            return Err(ConfigError::AddressWidthTooLarge(address_width));
        }
        Ok(Self {
            word_width,
            address_width,
        })
    }

    /// Build a geometry from a slot count instead of its logarithm.
    pub const fn with_capacity(word_width: u32, capacity: usize) -> Result<Self, ConfigError> {
        if !capacity.is_power_of_two() {
            return Err(ConfigError::CapacityNotPowerOfTwo(capacity));
        }
        Self::new(word_width, capacity.trailing_zeros())
    }

    #[inline]
    pub const fn word_width(&self) -> u32 {
        self.word_width
    }

    #[inline]
    pub const fn address_width(&self) -> u32 {
        self.address_width
    }

    /// Number of slots, `2^address_width`.
    #[inline]
    pub const fn capacity(&self) -> usize {
        1 << self.address_width
    }

    /// Mask applied to every pushed word.
    #[inline]
    pub const fn word_mask(&self) -> u64 {
        if self.word_width == MAX_WORD_WIDTH {
            u64::MAX
        } else {
            (1 << self.word_width) - 1
        }
    }

    /// The `(address_width + 1)`-bit position domain for this geometry.
    #[inline]
    pub const fn pointer_space(&self) -> PointerSpace {
        PointerSpace::new(self.address_width)
    }
}

impl Default for FifoConfig {
    fn default() -> Self {
        Self {
            word_width: DEFAULT_WORD_WIDTH,
            address_width: DEFAULT_ADDRESS_WIDTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry() {
        let c = FifoConfig::default();
        assert_eq!(c.word_width(), 32);
        assert_eq!(c.address_width(), 12);
        assert_eq!(c.capacity(), 4096);
        assert_eq!(c.word_mask(), 0xFFFF_FFFF);
    }

    #[test]
    fn test_rejects_zero_word_width() {
        assert_eq!(FifoConfig::new(0, 4), Err(ConfigError::ZeroWordWidth));
    }

    #[test]
    fn test_rejects_oversized_word() {
        assert_eq!(FifoConfig::new(65, 4), Err(ConfigError::WordWidthTooLarge(65)));
        assert_eq!(FifoConfig::new(64, 4).map(|c| c.word_mask()), Ok(u64::MAX));
    }

    #[test]
    fn test_rejects_narrow_address() {
        assert_eq!(FifoConfig::new(32, 0), Err(ConfigError::AddressWidthTooSmall(0)));
        assert_eq!(FifoConfig::new(32, 1), Err(ConfigError::AddressWidthTooSmall(1)));
        assert!(FifoConfig::new(32, 2).is_ok());
    }

    #[test]
    fn test_rejects_wide_address() {
        assert_eq!(FifoConfig::new(32, 21), Err(ConfigError::AddressWidthTooLarge(21)));
    }

    #[test]
    fn test_with_capacity() {
        let c = FifoConfig::with_capacity(16, 4).unwrap();
        assert_eq!(c.address_width(), 2);
        assert_eq!(c.word_mask(), 0xFFFF);

        assert_eq!(
            FifoConfig::with_capacity(16, 12),
            Err(ConfigError::CapacityNotPowerOfTwo(12))
        );
        assert_eq!(
            FifoConfig::with_capacity(16, 0),
            Err(ConfigError::CapacityNotPowerOfTwo(0))
        );
        // Power of two but below the two-bit address minimum.
        assert_eq!(
            FifoConfig::with_capacity(16, 2),
            Err(ConfigError::AddressWidthTooSmall(1))
        );
    }
}
