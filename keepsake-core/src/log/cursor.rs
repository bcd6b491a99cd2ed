//! Write cursor within the log page

use crate::config::LogConfig;
use crate::record::STATE_SIZE;

const SLOT: u32 = STATE_SIZE as u32;

/// Page fill state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PageState {
    /// No slot written since the last erase
    Empty,
    /// Some slots written, at least one free
    Appending(u32),
    /// Every slot written; the next save erases the page
    Full,
}

/// Address of the next free slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LogCursor {
    base: u32,
    end: u32,
    addr: u32,
}

impl LogCursor {
    /// Cursor at the start of an empty page
    pub const fn new(config: &LogConfig) -> Self {
        Self {
            base: config.base_addr,
            end: config.end_addr(),
            addr: config.base_addr,
        }
    }

    /// Cursor placed at an arbitrary address
    pub const fn at(config: &LogConfig, addr: u32) -> Self {
        Self {
            base: config.base_addr,
            end: config.end_addr(),
            addr,
        }
    }

    /// Next free slot address
    pub const fn addr(&self) -> u32 {
        self.addr
    }

    /// First slot of the page
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Number of slots written since the last erase
    pub const fn slots_used(&self) -> u32 {
        (self.addr - self.base) / SLOT
    }

    /// Address of the most recently written slot, if any
    pub const fn previous(&self) -> Option<u32> {
        if self.addr > self.base {
            Some(self.addr - SLOT)
        } else {
            None
        }
    }

    /// Whether writing one more slot would run past the page end
    pub const fn is_full(&self) -> bool {
        self.addr + SLOT > self.end
    }

    /// Whether the cursor points beyond the page end
    pub const fn is_overrun(&self) -> bool {
        self.addr > self.end
    }

    /// Move past the slot just written
    pub fn advance(&mut self) {
        self.addr += SLOT;
    }

    /// Back to the page base after an erase
    pub fn reset(&mut self) {
        self.addr = self.base;
    }

    /// Current fill state
    pub const fn state(&self) -> PageState {
        if self.addr == self.base {
            PageState::Empty
        } else if self.is_full() {
            PageState::Full
        } else {
            PageState::Appending(self.slots_used())
        }
    }
}
