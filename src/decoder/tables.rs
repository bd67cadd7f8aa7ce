//! Normative per-version tables (ISO/IEC 18004 Model 2).

/// BCH(15,5) generator polynomial for format information
pub const FORMAT_INFO_GENERATOR: u16 = 0b101_0011_0111;

/// XOR mask applied to both stored copies of the format information
pub const FORMAT_INFO_MASK: u16 = 0b101_0100_0001_0010;

/// The 45 characters of alphanumeric mode, indexed by value
pub const ALPHANUMERIC_CHARS: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Alignment pattern center coordinates, indexed by `version - 1`
pub const ALIGNMENT_POSITIONS: [&[u8]; 40] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];

/// Character count field widths `[numeric, alphanumeric, byte, kanji]` per version tier
/// (1-9, 10-26, 27-40)
pub const CHAR_COUNT_BITS: [[u8; 4]; 3] = [[10, 9, 8, 8], [12, 11, 16, 10], [14, 13, 16, 12]];

/// Codeword layout of one (version, EC level) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    /// EC codewords appended to every block
    pub ec_per_block: usize,
    /// Data codewords in a short block; long blocks carry one more
    pub short_data: usize,
    /// Number of short blocks (they come first)
    pub short_blocks: usize,
    /// Number of long blocks
    pub long_blocks: usize,
}

impl BlockLayout {
    /// Total number of blocks
    pub fn block_count(&self) -> usize {
        self.short_blocks + self.long_blocks
    }

    /// Data codewords in block `index`
    pub fn data_len(&self, index: usize) -> usize {
        if index < self.short_blocks {
            self.short_data
        } else {
            self.short_data + 1
        }
    }

    /// Data codewords across all blocks
    pub fn data_codewords(&self) -> usize {
        self.short_data * self.block_count() + self.long_blocks
    }

    /// Data plus EC codewords across all blocks
    pub fn total_codewords(&self) -> usize {
        self.data_codewords() + self.ec_per_block * self.block_count()
    }
}

const fn b(
    ec_per_block: usize,
    short_data: usize,
    short_blocks: usize,
    long_blocks: usize,
) -> BlockLayout {
    BlockLayout {
        ec_per_block,
        short_data,
        short_blocks,
        long_blocks,
    }
}

/// Block layout indexed by `[version - 1][L, M, Q, H]`
pub const BLOCK_LAYOUT: [[BlockLayout; 4]; 40] = [
    [b(7, 19, 1, 0), b(10, 16, 1, 0), b(13, 13, 1, 0), b(17, 9, 1, 0)], // 1
    [b(10, 34, 1, 0), b(16, 28, 1, 0), b(22, 22, 1, 0), b(28, 16, 1, 0)], // 2
    [b(15, 55, 1, 0), b(26, 44, 1, 0), b(18, 17, 2, 0), b(22, 13, 2, 0)], // 3
    [b(20, 80, 1, 0), b(18, 32, 2, 0), b(26, 24, 2, 0), b(16, 9, 4, 0)], // 4
    [b(26, 108, 1, 0), b(24, 43, 2, 0), b(18, 15, 2, 2), b(22, 11, 2, 2)], // 5
    [b(18, 68, 2, 0), b(16, 27, 4, 0), b(24, 19, 4, 0), b(28, 15, 4, 0)], // 6
    [b(20, 78, 2, 0), b(18, 31, 4, 0), b(18, 14, 2, 4), b(26, 13, 4, 1)], // 7
    [b(24, 97, 2, 0), b(22, 38, 2, 2), b(22, 18, 4, 2), b(26, 14, 4, 2)], // 8
    [b(30, 116, 2, 0), b(22, 36, 3, 2), b(20, 16, 4, 4), b(24, 12, 4, 4)], // 9
    [b(18, 68, 2, 2), b(26, 43, 4, 1), b(24, 19, 6, 2), b(28, 15, 6, 2)], // 10
    [b(20, 81, 4, 0), b(30, 50, 1, 4), b(28, 22, 4, 4), b(24, 12, 3, 8)], // 11
    [b(24, 92, 2, 2), b(22, 36, 6, 2), b(26, 20, 4, 6), b(28, 14, 7, 4)], // 12
    [b(26, 107, 4, 0), b(22, 37, 8, 1), b(24, 20, 8, 4), b(22, 11, 12, 4)], // 13
    [b(30, 115, 3, 1), b(24, 40, 4, 5), b(20, 16, 11, 5), b(24, 12, 11, 5)], // 14
    [b(22, 87, 5, 1), b(24, 41, 5, 5), b(30, 24, 5, 7), b(24, 12, 11, 7)], // 15
    [b(24, 98, 5, 1), b(28, 45, 7, 3), b(24, 19, 15, 2), b(30, 15, 3, 13)], // 16
    [b(28, 107, 1, 5), b(28, 46, 10, 1), b(28, 22, 1, 15), b(28, 14, 2, 17)], // 17
    [b(30, 120, 5, 1), b(26, 43, 9, 4), b(28, 22, 17, 1), b(28, 14, 2, 19)], // 18
    [b(28, 113, 3, 4), b(26, 44, 3, 11), b(26, 21, 17, 4), b(26, 13, 9, 16)], // 19
    [b(28, 107, 3, 5), b(26, 41, 3, 13), b(30, 24, 15, 5), b(28, 15, 15, 10)], // 20
    [b(28, 116, 4, 4), b(26, 42, 17, 0), b(28, 22, 17, 6), b(30, 16, 19, 6)], // 21
    [b(28, 111, 2, 7), b(28, 46, 17, 0), b(30, 24, 7, 16), b(24, 13, 34, 0)], // 22
    [b(30, 121, 4, 5), b(28, 47, 4, 14), b(30, 24, 11, 14), b(30, 15, 16, 14)], // 23
    [b(30, 117, 6, 4), b(28, 45, 6, 14), b(30, 24, 11, 16), b(30, 16, 30, 2)], // 24
    [b(26, 106, 8, 4), b(28, 47, 8, 13), b(30, 24, 7, 22), b(30, 15, 22, 13)], // 25
    [b(28, 114, 10, 2), b(28, 46, 19, 4), b(28, 22, 28, 6), b(30, 16, 33, 4)], // 26
    [b(30, 122, 8, 4), b(28, 45, 22, 3), b(30, 23, 8, 26), b(30, 15, 12, 28)], // 27
    [b(30, 117, 3, 10), b(28, 45, 3, 23), b(30, 24, 4, 31), b(30, 15, 11, 31)], // 28
    [b(30, 116, 7, 7), b(28, 45, 21, 7), b(30, 23, 1, 37), b(30, 15, 19, 26)], // 29
    [b(30, 115, 5, 10), b(28, 47, 19, 10), b(30, 24, 15, 25), b(30, 15, 23, 25)], // 30
    [b(30, 115, 13, 3), b(28, 46, 2, 29), b(30, 24, 42, 1), b(30, 15, 23, 28)], // 31
    [b(30, 115, 17, 0), b(28, 46, 10, 23), b(30, 24, 10, 35), b(30, 15, 19, 35)], // 32
    [b(30, 115, 17, 1), b(28, 46, 14, 21), b(30, 24, 29, 19), b(30, 15, 11, 46)], // 33
    [b(30, 115, 13, 6), b(28, 46, 14, 23), b(30, 24, 44, 7), b(30, 16, 59, 1)], // 34
    [b(30, 121, 12, 7), b(28, 47, 12, 26), b(30, 24, 39, 14), b(30, 15, 22, 41)], // 35
    [b(30, 121, 6, 14), b(28, 47, 6, 34), b(30, 24, 46, 10), b(30, 15, 2, 64)], // 36
    [b(30, 122, 17, 4), b(28, 46, 29, 14), b(30, 24, 49, 10), b(30, 15, 24, 46)], // 37
    [b(30, 122, 4, 18), b(28, 46, 13, 32), b(30, 24, 48, 14), b(30, 15, 42, 32)], // 38
    [b(30, 117, 20, 4), b(28, 47, 40, 7), b(30, 24, 43, 22), b(30, 15, 10, 67)], // 39
    [b(30, 118, 19, 6), b(28, 47, 18, 31), b(30, 24, 34, 34), b(30, 15, 20, 61)], // 40
];
