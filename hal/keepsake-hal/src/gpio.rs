//! GPIO pin abstractions
//!
//! Provides the digital input trait used by the button driver.

/// Electrical level that means "asserted"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Asserted when the pin reads high
    High,
    /// Asserted when the pin reads low (button to ground, pull-up)
    Low,
}

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }

    /// Check if the pin is at its asserted level
    fn is_active(&self, level: ActiveLevel) -> bool {
        match level {
            ActiveLevel::High => self.is_high(),
            ActiveLevel::Low => self.is_low(),
        }
    }
}
