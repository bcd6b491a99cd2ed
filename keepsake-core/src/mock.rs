//! RAM-backed NOR flash simulator for tests

use keepsake_hal::flash::{check_program_len, ERASED_BYTE};
use keepsake_hal::{FlashError, NvmDevice};

use crate::config::LogConfig;
use crate::record::{Slot, StateRecord, STATE_SIZE};

pub const BASE: u32 = 0x0801_F800;
pub const PAGE: u32 = 2048;
pub const CONFIG: LogConfig = LogConfig::new(BASE, PAGE);

/// One simulated 2KB page
///
/// Programming ANDs data into the cells like real NOR flash, so writing
/// over a non-erased slot produces garbage instead of the new record.
pub struct MockFlash {
    pub cells: [u8; PAGE as usize],
    pub erase_count: usize,
    pub program_count: usize,
    pub read_count: usize,
    /// Fail every program while set
    pub fail_program: bool,
    /// Fail every erase while set
    pub fail_erase: bool,
}

impl MockFlash {
    pub fn new() -> Self {
        Self {
            cells: [ERASED_BYTE; PAGE as usize],
            erase_count: 0,
            program_count: 0,
            read_count: 0,
            fail_program: false,
            fail_erase: false,
        }
    }

    /// Page holding `records` in consecutive slots from the base
    pub fn with_records(records: &[StateRecord]) -> Self {
        let mut flash = Self::new();
        for (i, record) in records.iter().enumerate() {
            flash.put_slot(i, &record.encode());
        }
        flash
    }

    /// Overwrite a slot directly, bypassing NOR semantics
    pub fn put_slot(&mut self, index: usize, raw: &Slot) {
        let start = index * STATE_SIZE;
        self.cells[start..start + STATE_SIZE].copy_from_slice(raw);
    }

    pub fn slot(&self, index: usize) -> Slot {
        let start = index * STATE_SIZE;
        let mut raw = [0u8; STATE_SIZE];
        raw.copy_from_slice(&self.cells[start..start + STATE_SIZE]);
        raw
    }

    fn offset(addr: u32, len: usize) -> Result<usize, FlashError> {
        let offset = addr.checked_sub(BASE).ok_or(FlashError::OutOfRange)? as usize;
        if offset + len > PAGE as usize {
            return Err(FlashError::OutOfRange);
        }
        Ok(offset)
    }
}

impl NvmDevice for MockFlash {
    const PROGRAM_GRANULARITY: usize = 8;
    const PAGE_SIZE: u32 = PAGE;

    fn erase_page(&mut self, page_addr: u32) -> Result<(), FlashError> {
        if page_addr != BASE {
            return Err(FlashError::OutOfRange);
        }
        if self.fail_erase {
            return Err(FlashError::Busy);
        }
        self.cells = [ERASED_BYTE; PAGE as usize];
        self.erase_count += 1;
        Ok(())
    }

    fn program(&mut self, addr: u32, data: &[u8]) -> Result<(), FlashError> {
        check_program_len(data.len(), Self::PROGRAM_GRANULARITY)?;
        let offset = Self::offset(addr, data.len())?;
        if self.fail_program {
            return Err(FlashError::Busy);
        }
        for (cell, byte) in self.cells[offset..offset + data.len()].iter_mut().zip(data) {
            *cell &= *byte;
        }
        self.program_count += 1;
        Ok(())
    }

    fn read(&mut self, addr: u32, buf: &mut [u8]) {
        self.read_count += 1;
        // Reads outside the page return erased bytes
        match Self::offset(addr, buf.len()) {
            Ok(offset) => buf.copy_from_slice(&self.cells[offset..offset + buf.len()]),
            Err(_) => buf.fill(ERASED_BYTE),
        }
    }
}
