//! Append-only record log within one flash page
//!
//! Per-page lifecycle:
//!
//! ```text
//! EMPTY ──save──► APPENDING(1..127) ──save──► FULL
//!   ▲                                           │
//!   └──────────── erase (on next save) ─────────┘
//! ```

pub mod allocator;
pub mod cursor;
pub mod scanner;

pub use allocator::{SaveOutcome, SlotAllocator};
pub use cursor::{LogCursor, PageState};
pub use scanner::{recover, scan, BootOutcome, Recovery, ScanResult};
