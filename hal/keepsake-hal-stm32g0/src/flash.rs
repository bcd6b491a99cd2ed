//! Internal flash for STM32G0
//!
//! STM32G071 has 128KB of flash in 2KB pages, programmed one 64-bit
//! double word at a time. The state log lives in the last page.

use embassy_stm32::flash::{Blocking, Flash};
use embassy_stm32::peripherals::FLASH;
use embassy_stm32::Peri;
use embedded_storage::nor_flash::{NorFlash, NorFlashError, NorFlashErrorKind, ReadNorFlash};
use keepsake_hal::flash::{check_program_len, ERASED_BYTE};
use keepsake_hal::{FlashError, NvmDevice};

/// Absolute address flash offsets are relative to
pub const FLASH_ORIGIN: u32 = 0x0800_0000;

/// Total flash on STM32G071xB
pub const FLASH_SIZE: u32 = 128 * 1024;

/// Erase unit
pub const FLASH_PAGE_SIZE: u32 = 2048;

/// Program unit (one double word)
pub const FLASH_WRITE_SIZE: usize = 8;

/// Base of the page reserved for the state log (last page)
pub const STATE_PAGE_ADDR: u32 = FLASH_ORIGIN + FLASH_SIZE - FLASH_PAGE_SIZE;

/// Any blocking NOR flash addressed by absolute address
///
/// `embedded-storage` drivers take offsets from the start of flash; this
/// adapter translates the absolute addresses the log works with.
pub struct NorFlashDevice<F> {
    flash: F,
    origin: u32,
}

impl<F: NorFlash> NorFlashDevice<F> {
    /// Wrap `flash` whose offset 0 maps to `origin`
    pub fn new(flash: F, origin: u32) -> Self {
        Self { flash, origin }
    }

    /// Get the raw flash driver for low-level access
    pub fn flash(&mut self) -> &mut F {
        &mut self.flash
    }

    fn offset(&self, addr: u32) -> Result<u32, FlashError> {
        addr.checked_sub(self.origin).ok_or(FlashError::OutOfRange)
    }
}

fn map_error<E: NorFlashError>(e: E) -> FlashError {
    match e.kind() {
        NorFlashErrorKind::NotAligned => FlashError::MisalignedLength,
        NorFlashErrorKind::OutOfBounds => FlashError::OutOfRange,
        _ => FlashError::Busy,
    }
}

impl<F: NorFlash> NvmDevice for NorFlashDevice<F> {
    const PROGRAM_GRANULARITY: usize = F::WRITE_SIZE;
    const PAGE_SIZE: u32 = F::ERASE_SIZE as u32;

    fn erase_page(&mut self, page_addr: u32) -> Result<(), FlashError> {
        let from = self.offset(page_addr)?;
        self.flash
            .erase(from, from + Self::PAGE_SIZE)
            .map_err(map_error)
    }

    fn program(&mut self, addr: u32, data: &[u8]) -> Result<(), FlashError> {
        check_program_len(data.len(), Self::PROGRAM_GRANULARITY)?;
        let offset = self.offset(addr)?;
        self.flash.write(offset, data).map_err(map_error)
    }

    fn read(&mut self, addr: u32, buf: &mut [u8]) {
        // An unreadable range looks blank, which ends a recovery scan
        let ok = match self.offset(addr) {
            Ok(offset) => ReadNorFlash::read(&mut self.flash, offset, buf).is_ok(),
            Err(_) => false,
        };
        if !ok {
            buf.fill(ERASED_BYTE);
        }
    }
}

/// STM32G0 internal flash in blocking mode
pub type Stm32g0Flash<'d> = NorFlashDevice<Flash<'d, Blocking>>;

impl<'d> Stm32g0Flash<'d> {
    /// Take the flash peripheral
    pub fn new_blocking(flash: Peri<'d, FLASH>) -> Self {
        NorFlashDevice::new(Flash::new_blocking(flash), FLASH_ORIGIN)
    }
}
