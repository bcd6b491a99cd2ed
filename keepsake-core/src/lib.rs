//! Wear-leveled state persistence for a single flash page
//!
//! This crate contains the board-agnostic storage logic:
//!
//! - Fixed 16-byte record codec with checksum
//! - Append-only slot log with erase-and-wrap
//! - Boot-time recovery scan
//! - State store API owning the cached record
//!
//! Hardware access goes through [`keepsake_hal::NvmDevice`].

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod device;
pub mod error;
pub mod log;
pub mod record;
pub mod store;

#[cfg(test)]
mod mock;

pub use config::LogConfig;
pub use error::{ConfigError, StoreError};
pub use log::{BootOutcome, PageState, SaveOutcome};
pub use record::{StateRecord, STATE_SIZE};
pub use store::StateStore;
