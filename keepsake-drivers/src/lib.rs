//! Peripheral driver implementations
//!
//! This crate provides concrete drivers built on the traits defined
//! in keepsake-hal:
//!
//! - Debounced push-button input

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod input;
