//! Q-subchannel CRC-16.
//!
//! Polynomial p(x) = x^16 + x^12 + x^5 + 1 (0x1021), initial value 0, MSB
//! first, no final XOR. These are the CRC-16/XMODEM parameters. On the disc
//! the two CRC bytes are stored inverted, see [`super::frame::finalize`].

/// Generator polynomial, MSB-first, implicit x^16 term.
pub const POLY: u16 = 0x1021;

/// Size of the CRC trailer at the end of every frame.
pub const CRC_LEN: usize = 2;

/// Byte-wise lookup table for [`POLY`], built at compile time.
pub const CRC_TABLE: [u16; 256] = generate_table(POLY);

/// Raw remainder over any correctly finalized frame.
///
/// The trailer holds the complement of the payload remainder, and the
/// computation is linear with a zero initial value, so the raw CRC over
/// payload + trailer always collapses to the CRC of `[0xFF, 0xFF]`.
pub const RESIDUE: u16 = compute(&[0xFF, 0xFF]);

const fn table_entry(poly: u16, index: u8) -> u16 {
    let mut crc = (index as u16) << 8;
    let mut i = 0;
    while i < 8 {
        if crc & 0x8000 != 0 {
            crc = (crc << 1) ^ poly;
        } else {
            crc <<= 1;
        }
        i += 1;
    }
    crc
}

const fn generate_table(poly: u16) -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = table_entry(poly, i as u8);
        i += 1;
    }
    table
}

/// Continue a running remainder over `bytes`.
pub const fn update(crc: u16, bytes: &[u8]) -> u16 {
    let mut crc = crc;
    let mut i = 0;
    while i < bytes.len() {
        let index = ((crc >> 8) as u8) ^ bytes[i];
        crc = (crc << 8) ^ CRC_TABLE[index as usize];
        i += 1;
    }
    crc
}

/// Raw CRC-16 of `bytes`, starting from a zero remainder.
pub const fn compute(bytes: &[u8]) -> u16 {
    update(0x0000, bytes)
}

/// Verification remainder of a complete frame (payload + inverted trailer).
///
/// Equivalent to computing the CRC with the trailer inversion undone. Zero
/// means the frame verifies. A buffer shorter than [`CRC_LEN`] has no
/// trailer, so its raw remainder is returned as is.
pub fn syndrome(frame: &[u8]) -> u16 {
    let crc = compute(frame);
    if frame.len() < CRC_LEN {
        crc
    } else {
        crc ^ RESIDUE
    }
}

/// Whether `frame` carries a valid trailer.
pub fn verify(frame: &[u8]) -> bool {
    syndrome(frame) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::crc::{Crc, CRC_16_XMODEM};
    use proptest::prelude::*;

    const XMODEM: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

    #[test]
    fn test_table_known_entries() {
        assert_eq!(CRC_TABLE[0x00], 0x0000);
        assert_eq!(CRC_TABLE[0x01], 0x1021);
        assert_eq!(CRC_TABLE[0x10], 0x1231);
        assert_eq!(CRC_TABLE[0x80], 0x9188);
        assert_eq!(CRC_TABLE[0xFF], 0x1EF0);
    }

    #[test]
    fn test_check_value() {
        assert_eq!(compute(b"123456789"), 0x31C3);
    }

    #[test]
    fn test_crc_empty() {
        assert_eq!(compute(&[]), 0x0000);
        assert_eq!(compute(&[0x00]), 0x0000);
    }

    #[test]
    fn test_residue() {
        assert_eq!(RESIDUE, 0x1D0F);
    }

    #[test]
    fn test_order_dependent() {
        assert_eq!(compute(&[0x01, 0x02]), 0x1373);
        assert_eq!(compute(&[0x02, 0x01]), 0x7643);
    }

    #[test]
    fn test_deterministic() {
        let data = [0x41, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x00];
        assert_eq!(compute(&data), compute(&data));
    }

    #[test]
    fn test_syndrome_short_buffer() {
        assert_eq!(syndrome(&[]), 0);
        assert_eq!(syndrome(&[0x80]), 0x9188);
    }

    #[test]
    fn test_verify_complemented_trailer() {
        // Payload remainder 0xB170, stored inverted as 0x4E8F.
        let frame = [
            0x41, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x4E, 0x8F,
        ];
        assert_eq!(compute(&frame), RESIDUE);
        assert!(verify(&frame));

        let mut plain = frame;
        plain[12] = 0xB1;
        plain[13] = 0x70;
        assert_eq!(compute(&plain), 0);
        assert!(!verify(&plain));
    }

    proptest! {
        #[test]
        fn test_matches_xmodem(data in proptest::collection::vec(any::<u8>(), 0..=512)) {
            prop_assert_eq!(compute(&data), XMODEM.checksum(&data));
        }

        #[test]
        fn test_update_chains(
            data in proptest::collection::vec(any::<u8>(), 0..=256),
            split in any::<usize>()
        ) {
            let split = split % (data.len() + 1);
            let (a, b) = data.split_at(split);
            prop_assert_eq!(update(compute(a), b), compute(&data));
        }
    }
}
