use std::fmt;

use super::Rect;
use crate::error::{QrError, Result};

/// QR code version (1-40, Model 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    /// Smallest version
    pub const MIN: Version = Version(1);
    /// Largest version
    pub const MAX: Version = Version(40);

    /// Validate a raw version number
    pub fn new(number: i64) -> Result<Self> {
        if (1..=40).contains(&number) {
            Ok(Version(number as u8))
        } else {
            Err(QrError::IllegalVersion(number))
        }
    }

    /// Recover the version from a symbol side length in modules
    pub fn from_side_length(side: u32) -> Result<Self> {
        let side = i64::from(side);
        if side < 21 || (side - 17) % 4 != 0 {
            return Err(QrError::IllegalVersion((side - 17).div_euclid(4)));
        }
        Self::new((side - 17) / 4)
    }

    /// Get the version number (1-40)
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Get the size in modules (width = height)
    pub fn side_length(&self) -> u32 {
        17 + 4 * u32::from(self.0)
    }

    /// Iterate every valid version
    pub fn all() -> impl Iterator<Item = Version> {
        (1..=40).map(Version)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    L,
    /// Medium (~15% recovery capacity)
    M,
    /// Quartile (~25% recovery capacity)
    Q,
    /// High (~30% recovery capacity)
    H,
}

impl ECLevel {
    /// Level from the two format-info bits (01=L, 00=M, 11=Q, 10=H)
    pub fn from_format_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0b01 => ECLevel::L,
            0b00 => ECLevel::M,
            0b11 => ECLevel::Q,
            _ => ECLevel::H,
        }
    }

    /// The two format-info bits for this level
    pub fn format_bits(&self) -> u8 {
        match self {
            ECLevel::L => 0b01,
            ECLevel::M => 0b00,
            ECLevel::Q => 0b11,
            ECLevel::H => 0b10,
        }
    }

    /// Row of this level in the per-version tables (L, M, Q, H order)
    pub(crate) fn table_index(&self) -> usize {
        match self {
            ECLevel::L => 0,
            ECLevel::M => 1,
            ECLevel::Q => 2,
            ECLevel::H => 3,
        }
    }
}

impl fmt::Display for ECLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ECLevel::L => "L",
            ECLevel::M => "M",
            ECLevel::Q => "Q",
            ECLevel::H => "H",
        };
        f.write_str(name)
    }
}

/// Mask pattern (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskPattern {
    /// (i + j) % 2 == 0
    Pattern0 = 0,
    /// i % 2 == 0
    Pattern1 = 1,
    /// j % 3 == 0
    Pattern2 = 2,
    /// (i + j) % 3 == 0
    Pattern3 = 3,
    /// (i/2 + j/3) % 2 == 0
    Pattern4 = 4,
    /// (i*j)%2 + (i*j)%3 == 0
    Pattern5 = 5,
    /// ((i*j)%2 + (i*j)%3) % 2 == 0
    Pattern6 = 6,
    /// ((i+j)%2 + (i*j)%3) % 2 == 0
    Pattern7 = 7,
}

impl MaskPattern {
    /// Get mask pattern from its id, rejecting anything outside 0-7
    pub fn from_bits(bits: u8) -> Result<Self> {
        match bits {
            0 => Ok(MaskPattern::Pattern0),
            1 => Ok(MaskPattern::Pattern1),
            2 => Ok(MaskPattern::Pattern2),
            3 => Ok(MaskPattern::Pattern3),
            4 => Ok(MaskPattern::Pattern4),
            5 => Ok(MaskPattern::Pattern5),
            6 => Ok(MaskPattern::Pattern6),
            7 => Ok(MaskPattern::Pattern7),
            other => Err(QrError::BadMaskPattern(other)),
        }
    }

    /// Mask id (0-7)
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// Check if module at row `i`, column `j` should be inverted
    pub fn is_masked(&self, i: usize, j: usize) -> bool {
        match self {
            MaskPattern::Pattern0 => (i + j) % 2 == 0,
            MaskPattern::Pattern1 => i % 2 == 0,
            MaskPattern::Pattern2 => j % 3 == 0,
            MaskPattern::Pattern3 => (i + j) % 3 == 0,
            MaskPattern::Pattern4 => (i / 2 + j / 3) % 2 == 0,
            MaskPattern::Pattern5 => ((i * j) % 2 + (i * j) % 3) == 0,
            MaskPattern::Pattern6 => (((i * j) % 2) + ((i * j) % 3)) % 2 == 0,
            MaskPattern::Pattern7 => (((i + j) % 2) + ((i * j) % 3)) % 2 == 0,
        }
    }
}

/// Where the symbol sits in the image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Bounding box of the symbol in pixels
    pub canvas: Rect,
    /// Width and height of one module in pixels
    pub module_size: (u32, u32),
}

/// Resolved per-symbol metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolInfo {
    /// QR code version
    pub version: Version,
    /// Error correction level
    pub ec_level: ECLevel,
    /// Mask pattern applied to the data modules
    pub mask: MaskPattern,
    /// Image placement, absent for symbols that did not come from an image
    pub geometry: Option<Geometry>,
}

impl SymbolInfo {
    /// Metadata for a symbol known without an image
    pub fn new(version: Version, ec_level: ECLevel, mask: MaskPattern) -> Self {
        Self {
            version,
            ec_level,
            mask,
            geometry: None,
        }
    }

    /// Modules per side
    pub fn side_length(&self) -> u32 {
        self.version.side_length()
    }
}

impl fmt::Display for SymbolInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<version {}, ec {}, mask {}>",
            self.version,
            self.ec_level,
            self.mask.id()
        )
    }
}
