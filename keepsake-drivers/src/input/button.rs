//! Debounced push-button
//!
//! Blocking scan: sample, wait out the bounce, confirm, then hold until
//! the button is released so one press yields exactly one `Down`.

use embedded_hal::delay::DelayNs;
use keepsake_hal::gpio::{ActiveLevel, InputPin};

/// Debounced key state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyState {
    /// Not pressed (or a bounce shorter than the debounce delay)
    Up,
    /// Confirmed press, reported once per press
    Down,
}

/// Button timing configuration
#[derive(Debug, Clone)]
pub struct ButtonConfig {
    /// Level that means "pressed"
    pub active: ActiveLevel,
    /// Settle time before re-reading the pin (ms)
    pub debounce_ms: u32,
    /// Give up waiting for release after this long (ms)
    pub release_timeout_ms: u32,
    /// Poll period while waiting for release (ms)
    pub poll_ms: u32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            active: ActiveLevel::Low, // to ground, external pull-up
            debounce_ms: 20,
            release_timeout_ms: 5_000,
            poll_ms: 1,
        }
    }
}

/// Push-button with software debounce
pub struct DebouncedButton<P, D> {
    pin: P,
    delay: D,
    config: ButtonConfig,
}

impl<P: InputPin, D: DelayNs> DebouncedButton<P, D> {
    /// Create a new button driver
    pub fn new(pin: P, delay: D, config: ButtonConfig) -> Self {
        Self { pin, delay, config }
    }

    /// Check whether the pin currently reads pressed (no debounce)
    pub fn is_pressed(&self) -> bool {
        self.pin.is_active(self.config.active)
    }

    /// Sample the button
    ///
    /// Returns immediately with `Up` when the button is idle. On a confirmed
    /// press, blocks until release (bounded by the release timeout).
    pub fn scan(&mut self) -> KeyState {
        if !self.is_pressed() {
            return KeyState::Up;
        }

        self.delay.delay_ms(self.config.debounce_ms);
        if !self.is_pressed() {
            return KeyState::Up;
        }

        self.wait_for_release();
        KeyState::Down
    }

    /// Block until the button is released
    ///
    /// Returns `false` if the release timeout expired first.
    pub fn wait_for_release(&mut self) -> bool {
        let poll = self.config.poll_ms.max(1);
        let mut waited = 0u32;

        while self.is_pressed() {
            if waited >= self.config.release_timeout_ms {
                return false;
            }
            self.delay.delay_ms(poll);
            waited = waited.saturating_add(poll);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::ops::Range;
    use std::rc::Rc;

    /// Pin that reads pressed (low) while the shared clock is inside `held`
    struct MockPin {
        clock: Rc<Cell<u64>>,
        held: Range<u64>,
        active: ActiveLevel,
    }

    impl InputPin for MockPin {
        fn is_high(&self) -> bool {
            let pressed = self.held.contains(&self.clock.get());
            match self.active {
                ActiveLevel::Low => !pressed,
                ActiveLevel::High => pressed,
            }
        }
    }

    /// Delay that advances the shared clock in milliseconds
    struct MockDelay {
        clock: Rc<Cell<u64>>,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.clock.set(self.clock.get() + u64::from(ns / 1_000_000));
        }

        fn delay_ms(&mut self, ms: u32) {
            self.clock.set(self.clock.get() + u64::from(ms));
        }
    }

    fn button(held: Range<u64>, config: ButtonConfig) -> (DebouncedButton<MockPin, MockDelay>, Rc<Cell<u64>>) {
        let clock = Rc::new(Cell::new(0));
        let pin = MockPin {
            clock: clock.clone(),
            held,
            active: config.active,
        };
        let delay = MockDelay {
            clock: clock.clone(),
        };
        (DebouncedButton::new(pin, delay, config), clock)
    }

    #[test]
    fn test_idle_button() {
        let (mut button, clock) = button(0..0, ButtonConfig::default());
        assert_eq!(button.scan(), KeyState::Up);
        assert_eq!(clock.get(), 0);
    }

    #[test]
    fn test_bounce_rejected() {
        let (mut button, clock) = button(0..5, ButtonConfig::default());
        assert_eq!(button.scan(), KeyState::Up);
        assert_eq!(clock.get(), 20);
    }

    #[test]
    fn test_press_waits_for_release() {
        let (mut button, clock) = button(0..150, ButtonConfig::default());
        assert_eq!(button.scan(), KeyState::Down);
        assert_eq!(clock.get(), 150);

        // Released: next scan sees nothing
        assert_eq!(button.scan(), KeyState::Up);
    }

    #[test]
    fn test_stuck_button_times_out() {
        let config = ButtonConfig {
            release_timeout_ms: 100,
            ..ButtonConfig::default()
        };
        let (mut button, clock) = button(0..u64::MAX, config);
        assert_eq!(button.scan(), KeyState::Down);
        assert_eq!(clock.get(), 20 + 100);
        assert!(!button.wait_for_release());
    }

    #[test]
    fn test_active_high() {
        let config = ButtonConfig {
            active: ActiveLevel::High,
            ..ButtonConfig::default()
        };
        let (mut button, _clock) = button(0..40, config);
        assert!(button.is_pressed());
        assert_eq!(button.scan(), KeyState::Down);
        assert!(!button.is_pressed());
    }
}
