//! Store error types

use keepsake_hal::FlashError;

/// Errors surfaced by the state log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// The flash device rejected an erase or program
    Flash(FlashError),
    /// Log geometry does not fit the device
    InvalidConfig(ConfigError),
}

/// Reasons a [`LogConfig`](crate::config::LogConfig) is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Page size differs from the device's erase unit
    PageSizeMismatch,
    /// Page cannot be split into whole slots
    PageNotSlotMultiple,
    /// Base address is not page-aligned
    UnalignedBase,
    /// Slot size is not a multiple of the program granularity
    SlotNotProgrammable,
    /// Page end overflows the address space
    AddressOverflow,
}

impl From<FlashError> for StoreError {
    fn from(e: FlashError) -> Self {
        StoreError::Flash(e)
    }
}

impl From<ConfigError> for StoreError {
    fn from(e: ConfigError) -> Self {
        StoreError::InvalidConfig(e)
    }
}
