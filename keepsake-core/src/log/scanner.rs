//! Boot-time recovery
//!
//! Walks the page from its base, trusting slots only while they validate.
//! The log is append-only, so the first blank or corrupt slot is the write
//! frontier and nothing past it is read.

use embassy_sync::blocking_mutex::raw::RawMutex;
use keepsake_hal::NvmDevice;

use super::allocator::SlotAllocator;
use super::cursor::LogCursor;
use crate::config::LogConfig;
use crate::device::GuardedDevice;
use crate::error::StoreError;
use crate::record::{StateRecord, STATE_SIZE};

/// How the store came up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootOutcome {
    /// Latest of `count` valid slots found at `addr`
    Recovered { addr: u32, count: u32 },
    /// No valid slot; the default record was written to the base
    ColdStart,
    /// Cursor overran the page; the page was erased
    Healed,
}

/// Result of walking the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanResult {
    /// Address and contents of the last valid slot
    pub latest: Option<(u32, StateRecord)>,
    /// Length of the valid run
    pub count: u32,
}

impl ScanResult {
    /// Where the next record should go
    pub fn cursor(&self, config: &LogConfig) -> LogCursor {
        match self.latest {
            Some((addr, _)) => LogCursor::at(config, addr + STATE_SIZE as u32),
            None => LogCursor::new(config),
        }
    }
}

/// Store state reconstructed at boot
#[derive(Debug, Clone)]
pub struct Recovery {
    pub record: StateRecord,
    pub allocator: SlotAllocator,
    pub outcome: BootOutcome,
}

/// Walk the contiguous run of valid slots from the page base
pub fn scan<M: RawMutex, D: NvmDevice>(
    device: &GuardedDevice<M, D>,
    config: &LogConfig,
) -> ScanResult {
    let mut result = ScanResult {
        latest: None,
        count: 0,
    };

    let mut addr = config.base_addr;
    while addr < config.end_addr() {
        match StateRecord::from_slot(&device.read_slot(addr)) {
            Some(record) => {
                result.latest = Some((addr, record));
                result.count += 1;
            }
            None => break,
        }
        addr += STATE_SIZE as u32;
    }

    result
}

/// Rebuild the cached record and write cursor
///
/// Falls back to [`StateRecord::DEFAULT`] when nothing valid is stored,
/// writing it to the base so the next boot recovers it.
pub fn recover<M: RawMutex, D: NvmDevice>(
    device: &GuardedDevice<M, D>,
    config: &LogConfig,
) -> Result<Recovery, StoreError> {
    let scanned = scan(device, config);
    let mut allocator = SlotAllocator::new(scanned.cursor(config));

    let healed = allocator.cursor().is_overrun();
    if healed {
        allocator.wipe(device)?;
    }

    let (record, outcome) = match scanned.latest {
        Some((addr, record)) => (
            record,
            BootOutcome::Recovered {
                addr,
                count: scanned.count,
            },
        ),
        None => {
            let record = StateRecord::DEFAULT;
            allocator.append(device, &record.encode())?;
            (record, BootOutcome::ColdStart)
        }
    };

    Ok(Recovery {
        record,
        allocator,
        outcome: if healed { BootOutcome::Healed } else { outcome },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockFlash, BASE, CONFIG};
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    fn guarded(flash: MockFlash) -> GuardedDevice<NoopRawMutex, MockFlash> {
        GuardedDevice::new(flash)
    }

    fn records(n: usize) -> [StateRecord; 128] {
        let mut out = [StateRecord::DEFAULT; 128];
        let mut record = StateRecord::DEFAULT;
        for slot in out.iter_mut().take(n) {
            *slot = record;
            record = record.advanced();
        }
        out
    }

    #[test]
    fn test_scan_blank_page() {
        let device = guarded(MockFlash::new());
        let result = scan(&device, &CONFIG);
        assert_eq!(result.latest, None);
        assert_eq!(result.count, 0);
        assert_eq!(result.cursor(&CONFIG).addr(), BASE);
    }

    #[test]
    fn test_recover_after_reset() {
        let stored = records(5);
        let device = guarded(MockFlash::with_records(&stored[..5]));

        let recovery = recover(&device, &CONFIG).unwrap();
        assert_eq!(recovery.record, stored[4]);
        assert_eq!(recovery.allocator.cursor().addr(), BASE + 16 * 5);
        assert_eq!(
            recovery.outcome,
            BootOutcome::Recovered {
                addr: BASE + 16 * 4,
                count: 5
            }
        );
        assert_eq!(device.into_inner().program_count, 0);
    }

    #[test]
    fn test_corrupted_tail_stops_scan() {
        let stored = records(4);
        let mut flash = MockFlash::with_records(&stored[..4]);
        let mut corrupt = stored[3].advanced().encode();
        corrupt[15] ^= 0x04;
        flash.put_slot(3, &corrupt);
        // A valid-looking slot past the hole is never trusted
        flash.put_slot(4, &stored[3].advanced().advanced().encode());
        let device = guarded(flash);

        let recovery = recover(&device, &CONFIG).unwrap();
        assert_eq!(recovery.record, stored[2]);
        assert_eq!(recovery.allocator.cursor().addr(), BASE + 16 * 3);
    }

    #[test]
    fn test_cold_start_writes_default() {
        let device = guarded(MockFlash::new());

        let recovery = recover(&device, &CONFIG).unwrap();
        assert_eq!(recovery.outcome, BootOutcome::ColdStart);
        assert_eq!(recovery.record, StateRecord::DEFAULT);
        assert_eq!(recovery.allocator.cursor().addr(), BASE + 16);

        let flash = device.into_inner();
        assert_eq!(flash.slot(0), StateRecord::DEFAULT.encode());
        assert_eq!(flash.erase_count, 0);
    }

    #[test]
    fn test_cold_start_over_garbage_erases_first() {
        let mut flash = MockFlash::new();
        // Checksum byte 0x5A never matches a 0x5A fill
        flash.put_slot(0, &[0x5A; STATE_SIZE]);
        flash.put_slot(1, &[0x00; STATE_SIZE]);
        let device = guarded(flash);

        let recovery = recover(&device, &CONFIG).unwrap();
        assert_eq!(recovery.outcome, BootOutcome::ColdStart);

        let flash = device.into_inner();
        assert_eq!(flash.erase_count, 1);
        assert_eq!(flash.slot(0), StateRecord::DEFAULT.encode());
        assert_eq!(flash.slot(1), [0xFF; STATE_SIZE]);
    }

    #[test]
    fn test_full_page_recovers_last_slot() {
        let stored = records(128);
        let device = guarded(MockFlash::with_records(&stored));

        let recovery = recover(&device, &CONFIG).unwrap();
        assert_eq!(recovery.record, stored[127]);
        assert_eq!(recovery.allocator.cursor().addr(), CONFIG.end_addr());
        assert!(recovery.allocator.cursor().is_full());
        assert!(!recovery.allocator.cursor().is_overrun());
    }

    #[test]
    fn test_cold_start_write_failure_propagates() {
        let mut flash = MockFlash::new();
        flash.fail_program = true;
        let device = guarded(flash);

        assert!(matches!(
            recover(&device, &CONFIG),
            Err(StoreError::Flash(keepsake_hal::FlashError::Busy))
        ));
    }
}
