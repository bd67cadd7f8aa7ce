/// Per-version geometry: alignment centers, field widths, codeword layout
use crate::decoder::tables::{ALIGNMENT_POSITIONS, BLOCK_LAYOUT, BlockLayout, CHAR_COUNT_BITS};
use crate::error::{QrError, Result};
use crate::models::{ECLevel, Mode, Version};

impl Version {
    /// Size tier used by the character count table: 0 for 1-9, 1 for 10-26, 2 for 27-40
    pub fn tier(&self) -> usize {
        match self.number() {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        }
    }

    /// Alignment pattern center coordinates along either axis
    pub fn alignment_positions(&self) -> &'static [u8] {
        ALIGNMENT_POSITIONS[self.number() as usize - 1]
    }

    /// Every candidate alignment center: both orderings of each coordinate pair,
    /// then the diagonal. Some of these sit on finder patterns and are dropped later.
    pub fn alignment_centers(&self) -> Vec<(u32, u32)> {
        let positions = self.alignment_positions();
        let mut centers = Vec::with_capacity(positions.len() * positions.len());
        for (i, &a) in positions.iter().enumerate() {
            for (j, &b) in positions.iter().enumerate() {
                if i != j {
                    centers.push((u32::from(a), u32::from(b)));
                }
            }
        }
        centers.extend(positions.iter().map(|&p| (u32::from(p), u32::from(p))));
        centers
    }

    /// Width of the character count field for `mode`
    pub fn char_count_bits(&self, mode: Mode) -> Result<usize> {
        let column = mode.count_table_index().ok_or(QrError::Unsupported(match mode {
            Mode::StructuredAppend => "Structured append",
            _ => "Extended Channel Interpretation",
        }))?;
        Ok(CHAR_COUNT_BITS[self.tier()][column] as usize)
    }

    /// Codeword layout for this version at `ec_level`
    pub fn block_layout(&self, ec_level: ECLevel) -> BlockLayout {
        BLOCK_LAYOUT[self.number() as usize - 1][ec_level.table_index()]
    }

    /// Modules left for data and EC codewords once every function pattern is placed
    pub fn raw_data_modules(&self) -> usize {
        let v = self.number() as usize;
        let mut modules = (16 * v + 128) * v + 64;
        if v >= 2 {
            let align = v / 7 + 2;
            modules -= (25 * align - 10) * align - 55;
            if v >= 7 {
                modules -= 36;
            }
        }
        modules
    }

    /// Zero bits after the last codeword that fill the final partial column pair
    pub fn remainder_bits(&self) -> usize {
        self.raw_data_modules() % 8
    }

    /// Whether the symbol carries the two 6x3 version information blocks
    pub fn has_version_info(&self) -> bool {
        self.number() >= 7
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: i64) -> Version {
        Version::new(n).unwrap()
    }

    #[test]
    fn test_remainder_bits() {
        let expected = [(1, 0), (2, 7), (6, 7), (7, 0), (13, 0), (14, 3), (20, 3), (21, 4)];
        for (version, bits) in expected {
            assert_eq!(v(version).remainder_bits(), bits, "version {version}");
        }
        assert_eq!(v(27).remainder_bits(), 4);
        assert_eq!(v(28).remainder_bits(), 3);
        assert_eq!(v(34).remainder_bits(), 3);
        assert_eq!(v(35).remainder_bits(), 0);
        assert_eq!(v(40).remainder_bits(), 0);
    }

    #[test]
    fn test_raw_modules_match_layout() {
        for version in Version::all() {
            let layout = version.block_layout(ECLevel::M);
            assert_eq!(
                version.raw_data_modules(),
                layout.total_codewords() * 8 + version.remainder_bits()
            );
        }
    }

    #[test]
    fn test_char_count_bits() {
        assert_eq!(v(1).char_count_bits(Mode::Numeric).unwrap(), 10);
        assert_eq!(v(9).char_count_bits(Mode::Byte).unwrap(), 8);
        assert_eq!(v(10).char_count_bits(Mode::Alphanumeric).unwrap(), 11);
        assert_eq!(v(26).char_count_bits(Mode::Byte).unwrap(), 16);
        assert_eq!(v(27).char_count_bits(Mode::Kanji).unwrap(), 12);
        assert_eq!(v(40).char_count_bits(Mode::Numeric).unwrap(), 14);
        assert!(matches!(
            v(3).char_count_bits(Mode::Eci),
            Err(QrError::Unsupported(_))
        ));
    }

    #[test]
    fn test_alignment_centers() {
        assert!(v(1).alignment_centers().is_empty());
        assert_eq!(v(2).alignment_centers(), vec![(6, 18), (18, 6), (6, 6), (18, 18)]);
        assert_eq!(v(7).alignment_centers().len(), 9);
    }
}
