//! Persisted state record and its on-flash encoding
//!
//! Each record occupies one 16-byte slot:
//!
//! ```text
//! offset  0      4        8     9       10        15
//!         ┌──────┬────────┬─────┬───────┬─────────┬──────────┐
//!         │color │seconds │mode │ seq   │reserved │ checksum │
//!         │ u32  │  u32   │ u8  │  u8   │ 5 bytes │    u8    │
//!         └──────┴────────┴─────┴───────┴─────────┴──────────┘
//! ```
//!
//! Multi-byte fields are little-endian.

use keepsake_hal::flash::is_erased;

/// Encoded size of one record (and of one log slot)
pub const STATE_SIZE: usize = 16;

/// Number of reserved padding bytes between the sequence number and checksum
pub const RESERVED_LEN: usize = 5;

const COLOR: usize = 0;
const SECONDS: usize = 4;
const MODE: usize = 8;
const SEQUENCE: usize = 9;
const RESERVED: usize = 10;
const CHECKSUM: usize = 15;

/// One slot's worth of raw bytes
pub type Slot = [u8; STATE_SIZE];

/// Application state persisted across power cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StateRecord {
    /// Color value
    pub color: u32,
    /// Elapsed time in seconds
    pub elapsed_seconds: u32,
    /// Operating mode
    pub mode: u8,
    /// Sequence number, bumped on each update
    pub sequence: u8,
    /// Padding carried through unchanged, never validated
    pub reserved: [u8; RESERVED_LEN],
    /// Checksum as last stamped or decoded
    checksum: u8,
}

impl Default for StateRecord {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl StateRecord {
    /// Record synthesized when the page holds no valid data
    pub const DEFAULT: Self = Self::new(100, 200, 1, 1);

    /// Create a record with a stamped checksum and zeroed padding
    pub const fn new(color: u32, elapsed_seconds: u32, mode: u8, sequence: u8) -> Self {
        Self {
            color,
            elapsed_seconds,
            mode,
            sequence,
            reserved: [0; RESERVED_LEN],
            checksum: compute_checksum(color, elapsed_seconds, mode, sequence),
        }
    }

    /// Checksum over the current field values
    ///
    /// Full-width XOR of all fields, truncated to the low byte.
    pub const fn compute_checksum(&self) -> u8 {
        compute_checksum(self.color, self.elapsed_seconds, self.mode, self.sequence)
    }

    /// Checksum carried by this record
    pub const fn checksum(&self) -> u8 {
        self.checksum
    }

    /// Check whether the carried checksum matches the fields
    pub const fn checksum_ok(&self) -> bool {
        self.checksum == self.compute_checksum()
    }

    /// Recompute and store the checksum from the current fields
    pub fn seal(&mut self) {
        self.checksum = self.compute_checksum();
    }

    /// Copy of this record with a freshly stamped checksum
    pub fn sealed(mut self) -> Self {
        self.seal();
        self
    }

    /// Apply the per-update transform
    ///
    /// Every field wraps at its width.
    pub fn advanced(self) -> Self {
        let mut next = self;
        next.color = self.color.wrapping_add(2);
        next.elapsed_seconds = self.elapsed_seconds.wrapping_add(1);
        next.mode = self.mode.wrapping_add(1);
        next.sequence = self.sequence.wrapping_add(1);
        next.sealed()
    }

    /// Serialize into the fixed slot layout
    ///
    /// The carried checksum is written as-is; call [`seal`](Self::seal) first
    /// if the fields changed.
    pub fn encode(&self) -> Slot {
        let mut raw = [0u8; STATE_SIZE];
        raw[COLOR..SECONDS].copy_from_slice(&self.color.to_le_bytes());
        raw[SECONDS..MODE].copy_from_slice(&self.elapsed_seconds.to_le_bytes());
        raw[MODE] = self.mode;
        raw[SEQUENCE] = self.sequence;
        raw[RESERVED..CHECKSUM].copy_from_slice(&self.reserved);
        raw[CHECKSUM] = self.checksum;
        raw
    }

    /// Deserialize a slot without validating it
    pub fn decode(raw: &Slot) -> Self {
        let mut reserved = [0u8; RESERVED_LEN];
        reserved.copy_from_slice(&raw[RESERVED..CHECKSUM]);

        Self {
            color: u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]),
            elapsed_seconds: u32::from_le_bytes([raw[4], raw[5], raw[6], raw[7]]),
            mode: raw[MODE],
            sequence: raw[SEQUENCE],
            reserved,
            checksum: raw[CHECKSUM],
        }
    }

    /// Decode a slot, returning `None` unless it holds a valid record
    pub fn from_slot(raw: &Slot) -> Option<Self> {
        if !is_valid(raw) {
            return None;
        }
        Some(Self::decode(raw))
    }
}

const fn compute_checksum(color: u32, elapsed_seconds: u32, mode: u8, sequence: u8) -> u8 {
    (color ^ elapsed_seconds ^ mode as u32 ^ sequence as u32) as u8
}

/// Check whether raw slot bytes hold a valid record
///
/// A blank (all-erased) slot is never valid.
pub fn is_valid(raw: &Slot) -> bool {
    !is_erased(raw) && StateRecord::decode(raw).checksum_ok()
}
