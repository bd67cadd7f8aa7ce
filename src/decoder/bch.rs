/// BCH(15,5) code protecting the QR format information
use crate::decoder::tables::FORMAT_INFO_GENERATOR;
use crate::error::{QrError, Result};

/// Candidates farther than this from both samples together are never accepted.
const MAX_DISTANCE: u32 = 29;

/// BCH(15,5) code protecting the format information
pub struct BchDecoder;

impl BchDecoder {
    /// BCH remainder of a 15-bit word: 0 for a valid codeword. Given a 5-bit value
    /// shifted left by 10, returns the 10 check bits that complete it.
    pub fn check(codeword: u16) -> u16 {
        let mut rem = codeword;
        for i in (0..5).rev() {
            if rem & (1 << (i + 10)) != 0 {
                rem ^= FORMAT_INFO_GENERATOR << i;
            }
        }
        rem
    }

    /// Full 15-bit codeword (unmasked) for a 5-bit value
    pub fn encode(value: u8) -> u16 {
        let data = u16::from(value & 0x1F) << 10;
        data | Self::check(data)
    }

    /// Recover the 5-bit value from two independent samples of the same codeword.
    ///
    /// Both samples valid and equal is accepted as is. Otherwise the nearest codeword,
    /// measured over both samples at once, wins; a tie is reported as corruption.
    pub fn recover(first: u16, second: u16) -> Result<u8> {
        if first == second && Self::check(first) == 0 {
            return Ok((first >> 10) as u8);
        }

        let observed = (u32::from(first) << 15) | u32::from(second);
        let mut best = None;
        let mut best_distance = MAX_DISTANCE;
        for value in 0..32u8 {
            let code = u32::from(Self::encode(value));
            let distance = (observed ^ (code | (code << 15))).count_ones();
            if distance < best_distance {
                best_distance = distance;
                best = Some(value);
            } else if distance == best_distance {
                best = None;
            }
        }
        best.ok_or(QrError::FormatInfoCorrupt)
    }
}
