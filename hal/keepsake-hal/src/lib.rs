//! Keepsake Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the state log is written against.
//! Chip-specific crates implement them so the same log engine runs on real
//! flash and on the host test simulator.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (keepsake-firmware)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  keepsake-core / keepsake-drivers       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  keepsake-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ keepsake-hal- │
//!             │   stm32g0     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`flash::NvmDevice`] - Page-erasable NOR flash
//! - [`gpio::InputPin`] - Digital input

#![no_std]
#![deny(unsafe_code)]

pub mod flash;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use flash::{FlashError, NvmDevice};
pub use gpio::{ActiveLevel, InputPin};
