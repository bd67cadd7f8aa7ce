//! Format information: EC level and mask id, stored twice around the finder patterns
use log::{debug, warn};

use crate::decoder::bch::BchDecoder;
use crate::decoder::tables::FORMAT_INFO_MASK;
use crate::error::Result;
use crate::models::{ECLevel, MaskPattern};

/// Format info is 15 bits (5 data + 10 ECC)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    /// Error correction level
    pub ec_level: ECLevel,
    /// Data mask applied to the symbol
    pub mask_pattern: MaskPattern,
}

impl FormatInfo {
    /// Format info for an EC level and mask
    pub fn new(ec_level: ECLevel, mask_pattern: MaskPattern) -> Self {
        Self {
            ec_level,
            mask_pattern,
        }
    }

    /// Split a recovered 5-bit value into EC level (high 2 bits) and mask id
    pub fn from_value(value: u8) -> Result<Self> {
        Ok(Self {
            ec_level: ECLevel::from_format_bits(value >> 3),
            mask_pattern: MaskPattern::from_bits(value & 0x07)?,
        })
    }

    /// The 5-bit value carried by the format info
    pub fn value(&self) -> u8 {
        (self.ec_level.format_bits() << 3) | self.mask_pattern.id()
    }

    /// The 15-bit word as stored in the symbol, after masking
    pub fn encode(&self) -> u16 {
        BchDecoder::encode(self.value()) ^ FORMAT_INFO_MASK
    }

    /// Read both stored copies through `module(x, y)`, where negative coordinates
    /// count back from the far edge of the symbol.
    pub fn read(module: impl Fn(i64, i64) -> bool) -> Result<Self> {
        let (first, second) = Self::read_samples(&module);
        if first != second {
            warn!("format info copies disagree: {first:#017b} vs {second:#017b}");
        }
        let value = BchDecoder::recover(first ^ FORMAT_INFO_MASK, second ^ FORMAT_INFO_MASK)?;
        let info = Self::from_value(value)?;
        debug!(
            "format info: ec {}, mask {}",
            info.ec_level,
            info.mask_pattern.id()
        );
        Ok(info)
    }

    /// Raw (still masked) samples: the copy split between the top-right and
    /// bottom-left finders, then the copy wrapped around the top-left finder.
    pub fn read_samples(module: &impl Fn(i64, i64) -> bool) -> (u16, u16) {
        let split = (straight_bits(module, (8, -7), 7, (0, 1), None) << 8)
            | straight_bits(module, (-1, 8), 8, (-1, 0), None);
        let wrapped = (straight_bits(module, (7, 8), 8, (-1, 0), Some(1)) << 8)
            | straight_bits(module, (8, 0), 9, (0, 1), Some(6));
        (split, wrapped)
    }
}

/// The masked 15-bit format word stored in a symbol with this EC level and mask
pub fn encode_format_info(ec_level: ECLevel, mask_pattern: MaskPattern) -> u16 {
    FormatInfo::new(ec_level, mask_pattern).encode()
}

/// Read `length` modules from `start` along `step`, least significant bit first.
/// The module at index `skip` (a timing line) is stepped over without producing a bit.
fn straight_bits(
    module: &impl Fn(i64, i64) -> bool,
    start: (i64, i64),
    length: usize,
    step: (i64, i64),
    skip: Option<usize>,
) -> u16 {
    let (mut x, mut y) = start;
    let mut result = 0u16;
    let mut counted = 0;
    for i in 0..length {
        if skip != Some(i) {
            if module(x, y) {
                result |= 1 << counted;
            }
            counted += 1;
        }
        x += step.0;
        y += step.1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BitMatrix;

    /// Place a format word the way an encoder lays it out, returning the grid.
    fn grid_with_format(size: usize, word: u16, second: u16) -> BitMatrix {
        let bit = |w: u16, i: usize| (w >> i) & 1 != 0;
        let mut grid = BitMatrix::new(size, size);
        for i in 0..6 {
            grid.set(8, i, bit(second, i));
        }
        grid.set(8, 7, bit(second, 6));
        grid.set(8, 8, bit(second, 7));
        grid.set(7, 8, bit(second, 8));
        for i in 9..15 {
            grid.set(14 - i, 8, bit(second, i));
        }
        for i in 0..8 {
            grid.set(size - 1 - i, 8, bit(word, i));
        }
        for i in 8..15 {
            grid.set(8, size - 15 + i, bit(word, i));
        }
        grid.set(8, size - 8, true);
        grid
    }

    fn reader(grid: &BitMatrix) -> impl Fn(i64, i64) -> bool + '_ {
        let size = grid.width() as i64;
        move |x, y| grid.get(x.rem_euclid(size) as usize, y.rem_euclid(size) as usize)
    }

    #[test]
    fn test_read_both_copies() {
        let info = FormatInfo::new(ECLevel::H, MaskPattern::Pattern4);
        let word = info.encode();
        let grid = grid_with_format(25, word, word);
        assert_eq!(FormatInfo::read_samples(&reader(&grid)), (word, word));
        assert_eq!(FormatInfo::read(reader(&grid)).unwrap(), info);
    }

    #[test]
    fn test_one_damaged_copy() {
        let info = FormatInfo::new(ECLevel::Q, MaskPattern::Pattern6);
        let word = info.encode();
        let grid = grid_with_format(21, word ^ 0b100_0000_0110_0001, word);
        assert_eq!(FormatInfo::read(reader(&grid)).unwrap(), info);
    }

    #[test]
    fn test_value_layout() {
        let info = FormatInfo::from_value(0b01100).unwrap();
        assert_eq!(info.ec_level, ECLevel::L);
        assert_eq!(info.mask_pattern, MaskPattern::Pattern4);
        assert_eq!(info.value(), 0b01100);
        // L, mask 0 as printed in the standard's table
        assert_eq!(FormatInfo::from_value(0b01000).unwrap().encode(), 0b111011111000100);
        assert_eq!(encode_format_info(ECLevel::L, MaskPattern::Pattern0), 0b111011111000100);
    }
}
