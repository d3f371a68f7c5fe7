use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::protocol::correct::{repair, Repair};
use crate::protocol::crc::{syndrome, CRC_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("frame length {0} is shorter than the 2-byte CRC trailer")]
    FrameLength(usize),
}

/// How to walk a buffer of frames.
#[derive(Debug, Clone, Copy)]
pub struct ScanOptions {
    /// Size of every frame, trailer included.
    pub frame_len: usize,
    /// Repair single-bit errors in place.
    pub correct: bool,
}

/// A frame that was repaired by flipping one bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrectedFrame {
    pub index: usize,
    pub offset: usize,
    pub bit: usize,
}

/// A frame that does not verify and was left as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadFrame {
    pub index: usize,
    pub offset: usize,
    pub syndrome: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Number of complete frames examined.
    pub frames: usize,
    pub clean: usize,
    pub corrected: Vec<CorrectedFrame>,
    pub bad: Vec<BadFrame>,
    /// Bytes past the last complete frame, not checked.
    pub trailing_bytes: usize,
}

impl ScanReport {
    /// True when every complete frame verifies (possibly after repair).
    pub fn is_clean(&self) -> bool {
        self.bad.is_empty()
    }
}

impl std::fmt::Display for ScanReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} frames: {} clean, {} corrected, {} bad",
            self.frames,
            self.clean,
            self.corrected.len(),
            self.bad.len()
        )?;
        if self.trailing_bytes > 0 {
            write!(f, " ({} trailing bytes ignored)", self.trailing_bytes)?;
        }
        Ok(())
    }
}

/// Where repaired scan data goes: `output` if given, otherwise
/// `<input>.repaired` when `write_repaired` is set, otherwise nowhere.
pub fn repaired_output(input: &Path, output: Option<&Path>, write_repaired: bool) -> Option<PathBuf> {
    match output {
        Some(path) => Some(path.to_path_buf()),
        None if write_repaired => {
            let mut name = input.as_os_str().to_owned();
            name.push(".repaired");
            Some(PathBuf::from(name))
        }
        None => None,
    }
}

/// Verify every complete frame in `data`, repairing in place if asked to.
pub fn scan(data: &mut [u8], options: ScanOptions) -> Result<ScanReport, ScanError> {
    if options.frame_len < CRC_LEN {
        return Err(ScanError::FrameLength(options.frame_len));
    }

    let mut report = ScanReport {
        trailing_bytes: data.len() % options.frame_len,
        ..Default::default()
    };

    for (index, frame) in data.chunks_exact_mut(options.frame_len).enumerate() {
        let offset = index * options.frame_len;
        report.frames += 1;

        let outcome = if options.correct {
            repair(frame)
        } else {
            match syndrome(frame) {
                0 => Repair::Clean,
                s => Repair::Uncorrectable { syndrome: s },
            }
        };

        match outcome {
            Repair::Clean => report.clean += 1,
            Repair::Corrected { bit } => {
                debug!(
                    "Frame {} @{:#x}: corrected bit {} (byte {})",
                    index,
                    offset,
                    bit,
                    bit / 8
                );
                report.corrected.push(CorrectedFrame { index, offset, bit });
            }
            Repair::Uncorrectable { syndrome } => {
                warn!(
                    "Frame {} @{:#x}: CRC error, syndrome 0x{:04X}",
                    index, offset, syndrome
                );
                report.bad.push(BadFrame {
                    index,
                    offset,
                    syndrome,
                });
            }
        }
    }

    Ok(report)
}
