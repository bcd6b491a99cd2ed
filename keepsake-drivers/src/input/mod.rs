//! Operator input drivers

pub mod button;

pub use button::{ButtonConfig, DebouncedButton, KeyState};
