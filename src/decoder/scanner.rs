//! Bit sources for the segment decoder
//!
//! A [`Scanner`] knows the symbol's metadata and hands out its corrected data
//! bits through a read cursor. [`ImageScanner`] derives both from a pixel
//! source on first use; [`PrecomputedBitScanner`] is given them up front.
use log::debug;
use std::mem;

use crate::decoder::blocks;
use crate::decoder::bitstream::ZigZag;
use crate::decoder::config;
use crate::decoder::format::FormatInfo;
use crate::decoder::function_mask::DataMask;
use crate::detector::finder::FinderDetector;
use crate::detector::transform::ModuleSampler;
use crate::error::{QrError, Result};
use crate::models::{BitMatrix, Geometry, SymbolInfo, Version};
use crate::utils::pixel_source::PixelSource;

/// Read position over a fixed bit sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitCursor {
    bits: Vec<bool>,
    position: usize,
}

impl BitCursor {
    /// Cursor at the first of `bits`
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits, position: 0 }
    }

    /// Every bit, regardless of position
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Index of the next bit to read
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bits left to read
    pub fn remaining(&self) -> usize {
        self.bits.len() - self.position
    }

    /// Read one bit, `EndOfData` past the end
    pub fn read_bit(&mut self) -> Result<bool> {
        let bit = *self.bits.get(self.position).ok_or(QrError::EndOfData)?;
        self.position += 1;
        Ok(bit)
    }

    /// Read `count` bits (at most 32) as a big-endian integer. Fails without
    /// consuming anything when fewer than `count` bits remain.
    pub fn read_int(&mut self, count: usize) -> Result<u32> {
        debug_assert!(count <= 32, "read_int supports up to 32 bits");
        if count > self.remaining() {
            return Err(QrError::EndOfData);
        }
        let end = self.position + count;
        let value = self.bits[self.position..end]
            .iter()
            .fold(0u32, |acc, &bit| (acc << 1) | u32::from(bit));
        self.position = end;
        Ok(value)
    }

    /// Back to the first bit
    pub fn reset(&mut self) {
        self.position = 0;
    }
}

/// A source of symbol metadata and corrected data bits.
pub trait Scanner {
    /// Symbol metadata, resolving the symbol first if needed
    fn info(&mut self) -> Result<&SymbolInfo>;

    /// Cursor over the corrected data bits, resolving the symbol first if needed
    fn cursor(&mut self) -> Result<&mut BitCursor>;

    /// Rewind the read position to the first data bit
    fn reset(&mut self);

    /// Every corrected data bit, regardless of the read position
    fn bits(&mut self) -> Result<&[bool]> {
        Ok(self.cursor()?.bits())
    }

    /// Read the next data bit
    fn read_bit(&mut self) -> Result<bool> {
        self.cursor()?.read_bit()
    }

    /// Read `count` bits most significant first
    fn read_int(&mut self, count: usize) -> Result<u32> {
        self.cursor()?.read_int(count)
    }

    /// Data bits left after the read position
    fn remaining(&mut self) -> Result<usize> {
        Ok(self.cursor()?.remaining())
    }
}

impl<S: Scanner + ?Sized> Scanner for &mut S {
    fn info(&mut self) -> Result<&SymbolInfo> {
        (**self).info()
    }

    fn cursor(&mut self) -> Result<&mut BitCursor> {
        (**self).cursor()
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

/// Progress of an [`ImageScanner`] through its pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScanState {
    /// Nothing read yet
    Unread,
    /// Canvas, module size and version known
    GeometryResolved,
    /// EC level and mask known
    FormatResolved,
    /// Unmasked data and EC bits collected
    DataTraversed,
    /// Blocks corrected, data bits ready to read
    Ready,
}

#[derive(Debug, Clone)]
enum Stage {
    Unread,
    GeometryResolved {
        geometry: Geometry,
        version: Version,
    },
    FormatResolved {
        info: SymbolInfo,
    },
    DataTraversed {
        info: SymbolInfo,
        raw: Vec<bool>,
    },
    Ready {
        info: SymbolInfo,
        raw: Vec<bool>,
        cursor: BitCursor,
    },
}

impl Stage {
    fn state(&self) -> ScanState {
        match self {
            Stage::Unread => ScanState::Unread,
            Stage::GeometryResolved { .. } => ScanState::GeometryResolved,
            Stage::FormatResolved { .. } => ScanState::FormatResolved,
            Stage::DataTraversed { .. } => ScanState::DataTraversed,
            Stage::Ready { .. } => ScanState::Ready,
        }
    }
}

/// Scanner that reads a single axis-aligned symbol from a pixel source.
///
/// Nothing is read until metadata or bits are first requested. Each stage is
/// computed once; a failing stage is retried (and fails again) on the next
/// request, while stages already resolved are kept.
pub struct ImageScanner<'a, P: PixelSource + ?Sized> {
    source: &'a P,
    threshold: u8,
    search_limit: Option<u32>,
    stage: Stage,
}

impl<'a, P: PixelSource + ?Sized> ImageScanner<'a, P> {
    /// Scanner using the configured luminance threshold
    pub fn new(source: &'a P) -> Self {
        Self::with_threshold(source, config::luminance_threshold())
    }

    /// Scanner classing pixels below `threshold` as dark
    pub fn with_threshold(source: &'a P, threshold: u8) -> Self {
        Self {
            source,
            threshold,
            search_limit: config::corner_search_limit(),
            stage: Stage::Unread,
        }
    }

    /// Luminance below which a pixel is dark
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// How far the pipeline has got
    pub fn state(&self) -> ScanState {
        self.stage.state()
    }

    /// Resolve geometry and format info only, without reading the data modules
    pub fn format_info(&mut self) -> Result<SymbolInfo> {
        self.run_until(ScanState::FormatResolved)?;
        match &self.stage {
            Stage::FormatResolved { info }
            | Stage::DataTraversed { info, .. }
            | Stage::Ready { info, .. } => Ok(*info),
            _ => unreachable!("format info is resolved past this point"),
        }
    }

    /// Every module of the located symbol as sampled, mask still applied
    pub fn module_matrix(&mut self) -> Result<BitMatrix> {
        self.run_until(ScanState::GeometryResolved)?;
        let located = match &self.stage {
            Stage::GeometryResolved { geometry, version } => Some((*geometry, *version)),
            Stage::FormatResolved { info }
            | Stage::DataTraversed { info, .. }
            | Stage::Ready { info, .. } => info.geometry.map(|geometry| (geometry, info.version)),
            Stage::Unread => None,
        };
        let Some((geometry, version)) = located else {
            unreachable!("geometry is resolved past this point")
        };
        Ok(self.sampler(geometry, version).to_matrix())
    }

    /// Traversed data and EC bits with the mask removed, before error correction
    pub fn raw_bits(&mut self) -> Result<&[bool]> {
        self.run_until(ScanState::DataTraversed)?;
        match &self.stage {
            Stage::DataTraversed { raw, .. } | Stage::Ready { raw, .. } => Ok(raw),
            _ => unreachable!("data is traversed past this point"),
        }
    }

    fn ready(&mut self) -> Result<(&SymbolInfo, &mut BitCursor)> {
        self.run_until(ScanState::Ready)?;
        match &mut self.stage {
            Stage::Ready { info, cursor, .. } => Ok((info, cursor)),
            _ => unreachable!("scanner pipeline stopped before the ready state"),
        }
    }

    fn run_until(&mut self, target: ScanState) -> Result<()> {
        while self.stage.state() < target {
            self.advance()?;
        }
        Ok(())
    }

    fn advance(&mut self) -> Result<()> {
        let next = match &self.stage {
            Stage::Unread => {
                let detector = FinderDetector::new(self.source, self.threshold, self.search_limit);
                let (geometry, version) = detector.locate()?;
                debug!("geometry resolved: version {version}, canvas {:?}", geometry.canvas);
                Stage::GeometryResolved { geometry, version }
            }
            Stage::GeometryResolved { geometry, version } => {
                let sampler = self.sampler(*geometry, *version);
                let format = FormatInfo::read(|x, y| sampler.module(x, y))?;
                let info = SymbolInfo {
                    version: *version,
                    ec_level: format.ec_level,
                    mask: format.mask_pattern,
                    geometry: Some(*geometry),
                };
                debug!("format info resolved: {info}");
                Stage::FormatResolved { info }
            }
            Stage::FormatResolved { info } => {
                let raw = self.traverse(info);
                debug!("data traversed: {} bits", raw.len());
                Stage::DataTraversed { info: *info, raw }
            }
            Stage::DataTraversed { info, raw } => {
                let data = blocks::correct(raw, info.version, info.ec_level)?;
                debug!("blocks corrected: {} data bits", data.len());
                let Stage::DataTraversed { info, raw } = mem::replace(&mut self.stage, Stage::Unread)
                else {
                    unreachable!("stage changed while correcting blocks")
                };
                Stage::Ready {
                    info,
                    raw,
                    cursor: BitCursor::new(data),
                }
            }
            Stage::Ready { .. } => return Ok(()),
        };
        self.stage = next;
        Ok(())
    }

    fn sampler(&self, geometry: Geometry, version: Version) -> ModuleSampler<'a, P> {
        ModuleSampler::new(self.source, geometry, version.side_length(), self.threshold)
    }

    fn traverse(&self, info: &SymbolInfo) -> Vec<bool> {
        let Some(geometry) = info.geometry else {
            return Vec::new();
        };
        let sampler = self.sampler(geometry, info.version);
        let mask = DataMask::new(info.version, info.mask);
        ZigZag::new(mask.function_mask())
            .map(|(x, y)| {
                let flip = mask.get(x, y).unwrap_or(false);
                sampler.module(x as i64, y as i64) ^ flip
            })
            .collect()
    }
}

impl<P: PixelSource + ?Sized> Scanner for ImageScanner<'_, P> {
    fn info(&mut self) -> Result<&SymbolInfo> {
        Ok(self.ready()?.0)
    }

    fn cursor(&mut self) -> Result<&mut BitCursor> {
        Ok(self.ready()?.1)
    }

    fn reset(&mut self) {
        if let Stage::Ready { cursor, .. } = &mut self.stage {
            cursor.reset();
        }
    }
}

/// Scanner over bits that were decoded elsewhere, or written by hand in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecomputedBitScanner {
    info: SymbolInfo,
    cursor: BitCursor,
}

impl PrecomputedBitScanner {
    /// Scanner over already corrected data bits
    pub fn new(info: SymbolInfo, bits: Vec<bool>) -> Self {
        Self {
            info,
            cursor: BitCursor::new(bits),
        }
    }

    /// Bits written as `0`/`1` characters; whitespace is ignored
    pub fn from_bit_str(info: SymbolInfo, text: &str) -> Result<Self> {
        let bits = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(QrError::InvalidCharacter {
                    mode: "bit string",
                    value: u32::from(other),
                }),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(info, bits))
    }

    /// Corrected data codewords, most significant bit first
    pub fn from_codewords(info: SymbolInfo, codewords: &[u8]) -> Self {
        Self::new(info, blocks::codewords_to_bits(codewords))
    }
}

impl Scanner for PrecomputedBitScanner {
    fn info(&mut self) -> Result<&SymbolInfo> {
        Ok(&self.info)
    }

    fn cursor(&mut self) -> Result<&mut BitCursor> {
        Ok(&mut self.cursor)
    }

    fn reset(&mut self) {
        self.cursor.reset();
    }
}
