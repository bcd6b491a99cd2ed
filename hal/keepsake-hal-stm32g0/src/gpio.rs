//! GPIO inputs for STM32G0

use embassy_stm32::gpio::{Input, Pin, Pull};
use embassy_stm32::Peri;
use keepsake_hal::gpio::InputPin;

/// Digital input wrapped for `keepsake-hal` consumers
pub struct ButtonPin<'d> {
    input: Input<'d>,
}

impl<'d> ButtonPin<'d> {
    /// Configure `pin` as an input
    ///
    /// The NUCLEO user button (PC13) has an external pull-up, so `Pull::None`
    /// is the usual choice.
    pub fn new(pin: Peri<'d, impl Pin>, pull: Pull) -> Self {
        Self {
            input: Input::new(pin, pull),
        }
    }
}

impl InputPin for ButtonPin<'_> {
    fn is_high(&self) -> bool {
        self.input.is_high()
    }
}
