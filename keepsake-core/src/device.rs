//! Scoped exclusive access to the flash device
//!
//! Every erase and program runs inside [`GuardedDevice::exclusive`]. The raw
//! mutex decides what "exclusive" means: `CriticalSectionRawMutex` masks
//! interrupts on target, `NoopRawMutex` is enough on the host. The guard is a
//! closure, so it is released on every exit path including early returns.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use keepsake_hal::NvmDevice;

use crate::record::{Slot, STATE_SIZE};

/// Flash device behind a blocking mutex
pub struct GuardedDevice<M: RawMutex, D> {
    inner: Mutex<M, RefCell<D>>,
}

impl<M: RawMutex, D: NvmDevice> GuardedDevice<M, D> {
    /// Wrap a device
    pub fn new(device: D) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(device)),
        }
    }

    /// Run `f` with exclusive access to the device
    pub fn exclusive<R>(&self, f: impl FnOnce(&mut D) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Read one slot at `addr`
    pub fn read_slot(&self, addr: u32) -> Slot {
        let mut raw = [0u8; STATE_SIZE];
        self.exclusive(|device| device.read(addr, &mut raw));
        raw
    }

    /// Direct access when no other borrower can exist
    pub fn get_mut(&mut self) -> &mut D {
        self.inner.get_mut().get_mut()
    }

    /// Unwrap the device
    pub fn into_inner(self) -> D {
        self.inner.into_inner().into_inner()
    }
}
