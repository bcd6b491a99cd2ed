//! Log geometry
//!
//! Where the log page lives and how big it is. The defaults match the last
//! 2KB page of a 128KB STM32G071.

use keepsake_hal::NvmDevice;

use crate::error::ConfigError;
use crate::record::STATE_SIZE;

/// Placement of the log page in flash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LogConfig {
    /// Absolute address of the first byte of the page
    pub base_addr: u32,
    /// Page size in bytes
    pub page_size: u32,
}

impl LogConfig {
    /// Last page of STM32G071 flash (128KB - 2KB)
    pub const STM32G071: Self = Self::new(0x0801_F800, 2048);

    /// Create a config for the page at `base_addr`
    pub const fn new(base_addr: u32, page_size: u32) -> Self {
        Self {
            base_addr,
            page_size,
        }
    }

    /// One past the last byte of the page
    pub const fn end_addr(&self) -> u32 {
        self.base_addr + self.page_size
    }

    /// Number of record slots in the page
    pub const fn slot_count(&self) -> u32 {
        self.page_size / STATE_SIZE as u32
    }

    /// Check the geometry against a device's erase and program units
    pub fn validate<D: NvmDevice>(&self) -> Result<(), ConfigError> {
        if self.page_size != D::PAGE_SIZE {
            return Err(ConfigError::PageSizeMismatch);
        }
        if self.page_size == 0 || self.page_size % STATE_SIZE as u32 != 0 {
            return Err(ConfigError::PageNotSlotMultiple);
        }
        if self.base_addr % self.page_size != 0 {
            return Err(ConfigError::UnalignedBase);
        }
        if D::PROGRAM_GRANULARITY == 0 || STATE_SIZE % D::PROGRAM_GRANULARITY != 0 {
            return Err(ConfigError::SlotNotProgrammable);
        }
        if self.base_addr.checked_add(self.page_size).is_none() {
            return Err(ConfigError::AddressOverflow);
        }
        Ok(())
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::STM32G071
    }
}
