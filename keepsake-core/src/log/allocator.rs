//! Write path: slot allocation, erase-and-wrap, programming

use embassy_sync::blocking_mutex::raw::RawMutex;
use keepsake_hal::flash::is_erased;
use keepsake_hal::{FlashError, NvmDevice};

use super::cursor::LogCursor;
use crate::device::GuardedDevice;
use crate::error::StoreError;
use crate::record::{Slot, StateRecord, STATE_SIZE};

/// What a save did to flash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SaveOutcome {
    /// Record matched the latest slot; nothing written
    Unchanged,
    /// Record appended at `addr`
    Appended { addr: u32 },
    /// Page erased, record written at the base `addr`
    Wrapped { addr: u32 },
}

/// Owns the log cursor and appends records behind it
#[derive(Debug, Clone)]
pub struct SlotAllocator {
    cursor: LogCursor,
}

impl SlotAllocator {
    /// Start appending at `cursor`
    pub const fn new(cursor: LogCursor) -> Self {
        Self { cursor }
    }

    /// Current write position
    pub const fn cursor(&self) -> &LogCursor {
        &self.cursor
    }

    /// Persist `record` unless it matches the latest slot
    ///
    /// The checksum is always restamped from the field values before the
    /// comparison, so a stale caller-supplied checksum never reaches flash.
    pub fn save<M: RawMutex, D: NvmDevice>(
        &mut self,
        device: &GuardedDevice<M, D>,
        record: &mut StateRecord,
    ) -> Result<SaveOutcome, StoreError> {
        record.seal();
        let raw = record.encode();

        if let Some(previous) = self.cursor.previous() {
            if device.read_slot(previous) == raw {
                return Ok(SaveOutcome::Unchanged);
            }
        }

        self.append(device, &raw)
    }

    /// Write `raw` at the cursor, erasing the page first if needed
    ///
    /// The page is erased when it is full or when the target slot is not
    /// blank. On failure the cursor stays on a slot consistent with flash.
    pub fn append<M: RawMutex, D: NvmDevice>(
        &mut self,
        device: &GuardedDevice<M, D>,
        raw: &Slot,
    ) -> Result<SaveOutcome, StoreError> {
        let cursor = &mut self.cursor;

        let outcome = device.exclusive(|dev| -> Result<SaveOutcome, FlashError> {
            let wrapped = cursor.is_full() || !slot_is_blank(dev, cursor.addr());
            if wrapped {
                dev.erase_page(cursor.base())?;
                cursor.reset();
            }

            let addr = cursor.addr();
            dev.program(addr, raw)?;
            cursor.advance();

            Ok(if wrapped {
                SaveOutcome::Wrapped { addr }
            } else {
                SaveOutcome::Appended { addr }
            })
        })?;

        Ok(outcome)
    }

    /// Erase the page and restart at its base
    pub fn wipe<M: RawMutex, D: NvmDevice>(
        &mut self,
        device: &GuardedDevice<M, D>,
    ) -> Result<(), StoreError> {
        let cursor = &mut self.cursor;
        device.exclusive(|dev| {
            dev.erase_page(cursor.base())?;
            cursor.reset();
            Ok(())
        })
    }
}

fn slot_is_blank<D: NvmDevice>(device: &mut D, addr: u32) -> bool {
    let mut raw = [0u8; STATE_SIZE];
    device.read(addr, &mut raw);
    is_erased(&raw)
}
