//! Single-bit error correction by exhaustive trial flips.
//!
//! The CRC has minimum distance 4 for frames far longer than a subchannel
//! frame, so a frame with exactly one flipped bit has exactly one position
//! whose flip brings the syndrome back to zero. Two or more flipped bits are
//! detected but never repaired.

use super::crc::syndrome;

/// Single-bit mask for each bit index within a byte.
pub const FLIP_MASKS: [u8; 8] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80];

/// Outcome of [`repair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repair {
    /// The frame already verified.
    Clean,
    /// Bit `bit` (byte `bit / 8`, mask `FLIP_MASKS[bit % 8]`) was flipped back.
    Corrected { bit: usize },
    /// No single flip zeroes the syndrome; the frame is unchanged.
    Uncorrectable { syndrome: u16 },
}

impl Repair {
    /// Whether the frame verifies after the repair attempt.
    pub fn is_valid(&self) -> bool {
        !matches!(self, Repair::Uncorrectable { .. })
    }
}

/// Search for the lowest bit whose flip makes `frame` verify.
///
/// On `Some(bit)` that flip is left applied. On `None` every trial flip has
/// been undone and the frame is byte-for-byte what it was.
pub fn find_single_bit_error(frame: &mut [u8]) -> Option<usize> {
    for bit in 0..frame.len() * 8 {
        let byte = bit / 8;
        let mask = FLIP_MASKS[bit % 8];

        frame[byte] ^= mask;
        if syndrome(frame) == 0 {
            return Some(bit);
        }
        frame[byte] ^= mask;
    }
    None
}

/// Try to repair a single flipped bit in `frame`.
///
/// `observed` is the syndrome of the whole frame as read. Returns 0 when the
/// frame verifies (either already, or after the repair), otherwise returns
/// `observed` unchanged and leaves the frame untouched.
pub fn correct(frame: &mut [u8], observed: u16) -> u16 {
    if observed == 0 {
        return 0;
    }
    match find_single_bit_error(frame) {
        Some(_) => 0,
        None => observed,
    }
}

/// Verify `frame` and repair a single-bit error in place if there is one.
pub fn repair(frame: &mut [u8]) -> Repair {
    let observed = syndrome(frame);
    if observed == 0 {
        return Repair::Clean;
    }
    match find_single_bit_error(frame) {
        Some(bit) => Repair::Corrected { bit },
        None => Repair::Uncorrectable { syndrome: observed },
    }
}
