//! Checksum core for Q-subchannel frames.
//!
//! Frames are caller-owned byte slices: the payload followed by a 2-byte
//! big-endian CRC trailer stored inverted. Nothing here allocates.

pub mod correct;
pub mod crc;
pub mod frame;

pub use correct::{correct, repair, Repair, FLIP_MASKS};
pub use crc::{compute, syndrome, verify, CRC_TABLE};
pub use frame::{finalize, FrameError, Q_FRAME_LEN};
