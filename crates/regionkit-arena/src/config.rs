//! Region configuration parameters.

use std::alloc::Layout;

use crate::error::RegionError;

/// Configuration for a [`Region`](crate::Region).
///
/// Validated at construction; all values are immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionConfig {
    /// Size of the region's single buffer in bytes.
    ///
    /// Default: 65_536 (64 KiB).
    pub capacity: usize,

    /// Whether an exhausted region may reset itself and retry.
    ///
    /// A resettable region that runs out of space on the handle path resets
    /// its cursor to zero, which invalidates every span issued so far. A
    /// non-resettable region treats exhaustion as fatal and rejects
    /// [`Region::reset`](crate::Region::reset).
    ///
    /// Default: `false`.
    pub resettable: bool,

    /// Alignment of the buffer's base address in bytes.
    ///
    /// Must be a power of two. Default: 16.
    pub align: usize,
}

impl RegionConfig {
    /// Default buffer size: 64 KiB.
    pub const DEFAULT_CAPACITY: usize = 64 * 1024;

    /// Default base alignment, enough for any primitive element type.
    pub const DEFAULT_ALIGN: usize = 16;

    /// Create a config for a non-resettable region of `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            resettable: false,
            align: Self::DEFAULT_ALIGN,
        }
    }

    /// Set the [`resettable`](Self::resettable) flag.
    pub fn resettable(mut self, resettable: bool) -> Self {
        self.resettable = resettable;
        self
    }

    /// Set the base [`align`](Self::align)ment.
    pub fn align(mut self, align: usize) -> Self {
        self.align = align;
        self
    }

    /// Check the parameters and build the buffer layout.
    pub(crate) fn layout(&self) -> Result<Layout, RegionError> {
        if !self.align.is_power_of_two() {
            return Err(RegionError::InvalidConfig {
                reason: format!("align must be a power of two (got {})", self.align),
            });
        }
        Layout::from_size_align(self.capacity, self.align).map_err(|_| RegionError::InvalidConfig {
            reason: format!(
                "capacity {} with align {} does not form a valid layout",
                self.capacity, self.align
            ),
        })
    }
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_64k_non_resettable() {
        let config = RegionConfig::default();
        assert_eq!(config.capacity, 64 * 1024);
        assert!(!config.resettable);
        assert_eq!(config.align, 16);
    }

    #[test]
    fn builder_sets_flags() {
        let config = RegionConfig::new(128).resettable(true).align(64);
        assert!(config.resettable);
        assert_eq!(config.align, 64);
        assert_eq!(config.layout().unwrap().size(), 128);
    }

    #[test]
    fn non_power_of_two_align_rejected() {
        let config = RegionConfig::new(128).align(12);
        assert!(matches!(config.layout(), Err(RegionError::InvalidConfig { .. })));
    }

    #[test]
    fn oversized_capacity_rejected() {
        let config = RegionConfig::new(usize::MAX);
        assert!(matches!(config.layout(), Err(RegionError::InvalidConfig { .. })));
    }
}
