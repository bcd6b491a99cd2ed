//! STM32G0-specific HAL for the Keepsake firmware
//!
//! Binds the `keepsake-hal` traits to embassy-stm32 peripherals:
//!
//! - [`flash::Stm32g0Flash`] - internal flash as an [`NvmDevice`](keepsake_hal::NvmDevice)
//! - [`gpio::ButtonPin`] - digital input for the user button
//!
//! # Features
//!
//! - `stm32g071rb` - STM32G071RB (NUCLEO-G071RB)
//! - `stm32g071kb` - STM32G071KB
//! - `defmt` - Enable debug formatting support

#![no_std]
#![deny(unsafe_code)]

pub mod flash;
pub mod gpio;

// Re-export shared types from keepsake-hal
pub use keepsake_hal::{FlashError, NvmDevice};
