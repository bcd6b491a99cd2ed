//! Non-volatile memory abstractions
//!
//! Raw page-erasable flash as seen by the state log. Implementations wrap
//! the chip's flash controller; the log itself decides what goes where.

/// Value every byte reads as after an erase
pub const ERASED_BYTE: u8 = 0xFF;

/// Errors from flash device operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Controller busy, locked or write-protected
    Busy,
    /// Program length is not a multiple of the program granularity
    MisalignedLength,
    /// Address range falls outside the device
    OutOfRange,
}

/// Page-erasable NOR flash
///
/// Programming may only clear bits (1 → 0). Restoring bits to 1 requires
/// erasing the whole page that contains them.
pub trait NvmDevice {
    /// Smallest programmable unit in bytes
    const PROGRAM_GRANULARITY: usize;

    /// Size of one erasable page in bytes
    const PAGE_SIZE: u32;

    /// Erase the page starting at `page_addr`
    ///
    /// After success every byte of the page reads as [`ERASED_BYTE`].
    fn erase_page(&mut self, page_addr: u32) -> Result<(), FlashError>;

    /// Program `data` at `addr`
    ///
    /// `data.len()` must be a multiple of [`Self::PROGRAM_GRANULARITY`].
    fn program(&mut self, addr: u32, data: &[u8]) -> Result<(), FlashError>;

    /// Copy `buf.len()` bytes starting at `addr` into `buf`
    ///
    /// Reads are plain memory copies and cannot fail.
    fn read(&mut self, addr: u32, buf: &mut [u8]);
}

/// Reject a program request whose length does not fit the granularity
///
/// Drivers call this before touching the controller so a bad request
/// never reaches hardware.
pub fn check_program_len(len: usize, granularity: usize) -> Result<(), FlashError> {
    if granularity == 0 || len % granularity != 0 {
        return Err(FlashError::MisalignedLength);
    }
    Ok(())
}

/// Check whether a buffer reads as freshly erased flash
pub fn is_erased(bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| b == ERASED_BYTE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_len_check() {
        assert_eq!(check_program_len(16, 8), Ok(()));
        assert_eq!(check_program_len(8, 8), Ok(()));
        assert_eq!(check_program_len(12, 8), Err(FlashError::MisalignedLength));
        assert_eq!(check_program_len(16, 0), Err(FlashError::MisalignedLength));
    }

    #[test]
    fn test_is_erased() {
        assert!(is_erased(&[0xFF; 16]));
        assert!(is_erased(&[]));

        let mut bytes = [0xFF; 16];
        bytes[15] = 0xFE;
        assert!(!is_erased(&bytes));
    }
}
