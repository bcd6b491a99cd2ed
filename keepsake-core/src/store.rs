//! State store
//!
//! Composes recovery, the slot allocator and the record codec behind a
//! small API. The store owns the device, the write cursor and the cached
//! current record; reads are served from the cache.

use embassy_sync::blocking_mutex::raw::RawMutex;
use keepsake_hal::NvmDevice;

use crate::config::LogConfig;
use crate::device::GuardedDevice;
use crate::error::StoreError;
use crate::log::{recover, BootOutcome, LogCursor, PageState, SaveOutcome, SlotAllocator};
use crate::record::StateRecord;

/// Persistent state backed by one flash page
pub struct StateStore<M: RawMutex, D> {
    device: GuardedDevice<M, D>,
    config: LogConfig,
    allocator: SlotAllocator,
    current: StateRecord,
    boot: BootOutcome,
}

impl<M: RawMutex, D: NvmDevice> StateStore<M, D> {
    /// Validate the geometry, recover the latest record and position the cursor
    ///
    /// Writes the default record when the page holds nothing valid.
    pub fn init(device: D, config: LogConfig) -> Result<Self, StoreError> {
        config.validate::<D>()?;

        let device = GuardedDevice::new(device);
        let recovery = recover(&device, &config)?;

        Ok(Self {
            device,
            config,
            allocator: recovery.allocator,
            current: recovery.record,
            boot: recovery.outcome,
        })
    }

    /// Copy of the current record
    pub fn get(&self) -> StateRecord {
        self.current
    }

    /// Apply the update transform to `record` and save the result
    pub fn update(&mut self, record: StateRecord) -> Result<SaveOutcome, StoreError> {
        self.save(record.advanced())
    }

    /// Persist `record` and make it current
    ///
    /// Skips the write when the latest slot already holds the same bytes.
    /// On error the cached record and cursor are left as they were.
    pub fn save(&mut self, mut record: StateRecord) -> Result<SaveOutcome, StoreError> {
        let outcome = self.allocator.save(&self.device, &mut record)?;
        self.current = record;
        Ok(outcome)
    }

    /// How the store came up
    pub fn boot_outcome(&self) -> BootOutcome {
        self.boot
    }

    /// Write position
    pub fn cursor(&self) -> &LogCursor {
        self.allocator.cursor()
    }

    /// Address of the slot holding the current record
    pub fn last_slot_addr(&self) -> Option<u32> {
        self.cursor().previous()
    }

    /// Slots written since the page was last erased
    pub fn slots_used(&self) -> u32 {
        self.cursor().slots_used()
    }

    /// Fill state of the page
    pub fn page_state(&self) -> PageState {
        self.cursor().state()
    }

    /// Log geometry
    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Release the device
    pub fn into_device(self) -> D {
        self.device.into_inner()
    }
}
