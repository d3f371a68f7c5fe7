use thiserror::Error;

use super::crc::{compute, CRC_LEN};

/// Length of a Q-subchannel frame: 10 data bytes followed by the CRC.
pub const Q_FRAME_LEN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("frame of {len} bytes has no room for the 2-byte CRC trailer")]
    TooShort { len: usize },
}

/// Fill in the CRC trailer of `frame`.
///
/// Wire format:
/// ```text
/// [payload: len - 2 bytes] [!CRC16: 2 bytes BE]
/// ```
///
/// The remainder over the payload is inverted before it is stored. Only the
/// last two bytes are written; the stored (inverted) value is returned.
pub fn finalize(frame: &mut [u8]) -> Result<u16, FrameError> {
    let Some(payload_len) = frame.len().checked_sub(CRC_LEN) else {
        return Err(FrameError::TooShort { len: frame.len() });
    };

    let (payload, trailer) = frame.split_at_mut(payload_len);
    let crc = compute(payload) ^ 0xFFFF;
    trailer.copy_from_slice(&crc.to_be_bytes());
    Ok(crc)
}

/// Read the stored (inverted) trailer of `frame`, if it has one.
pub fn stored_crc(frame: &[u8]) -> Option<u16> {
    let payload_len = frame.len().checked_sub(CRC_LEN)?;
    Some(u16::from_be_bytes([frame[payload_len], frame[payload_len + 1]]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::crc::{syndrome, RESIDUE};
    use proptest::prelude::*;

    fn sample_payload() -> [u8; 14] {
        let mut frame = [0u8; 14];
        frame[0] = 0x41;
        frame[2] = 0x01;
        frame
    }

    #[test]
    fn test_finalize_known_trailer() {
        let mut frame = sample_payload();
        let stored = finalize(&mut frame).unwrap();

        assert_eq!(stored, 0x4E8F);
        assert_eq!(&frame[12..], &[0x4E, 0x8F]);
        assert_eq!(&frame[..12], &sample_payload()[..12]);
        assert_eq!(stored_crc(&frame), Some(0x4E8F));
    }

    #[test]
    fn test_finalize_overwrites_trailer() {
        let mut frame = sample_payload();
        frame[12] = 0xAA;
        frame[13] = 0x55;
        finalize(&mut frame).unwrap();
        assert_eq!(&frame[12..], &[0x4E, 0x8F]);
    }

    #[test]
    fn test_finalize_q_frame() {
        // Track 1, index 1, absolute time 00:02:00
        let mut frame = [0x01, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00];
        assert_eq!(frame.len(), Q_FRAME_LEN);
        assert_eq!(finalize(&mut frame).unwrap(), 0x5A28);
        assert_eq!(syndrome(&frame), 0);
    }

    #[test]
    fn test_finalize_trailer_only() {
        let mut frame = [0x12, 0x34];
        assert_eq!(finalize(&mut frame).unwrap(), 0xFFFF);
        assert_eq!(frame, [0xFF, 0xFF]);
        assert_eq!(syndrome(&frame), 0);
    }

    #[test]
    fn test_finalize_too_short() {
        let mut frame = [0x5A];
        assert_eq!(finalize(&mut frame), Err(FrameError::TooShort { len: 1 }));
        assert_eq!(frame, [0x5A]);
        assert!(finalize(&mut [0u8; 0]).is_err());
        assert_eq!(stored_crc(&frame), None);
    }

    proptest! {
        #[test]
        fn test_zero_over_self(payload in proptest::collection::vec(any::<u8>(), 0..=64)) {
            let mut frame = payload.clone();
            frame.extend_from_slice(&[0, 0]);
            finalize(&mut frame).unwrap();

            prop_assert_eq!(&frame[..payload.len()], payload.as_slice());
            prop_assert_eq!(syndrome(&frame), 0);
            prop_assert_eq!(compute(&frame), RESIDUE);
        }
    }
}
