//! Segment decoder: turns a scanner's corrected bitstream into segments
use log::trace;

use crate::decoder::modes::alphanumeric::AlphanumericDecoder;
use crate::decoder::modes::byte::ByteDecoder;
use crate::decoder::modes::kanji::KanjiDecoder;
use crate::decoder::modes::numeric::NumericDecoder;
use crate::decoder::scanner::Scanner;
use crate::error::{QrError, Result};
use crate::models::{Mode, Payload, Segment, SymbolInfo};

/// Width of a mode indicator
const MODE_BITS: usize = 4;

/// Reads the segments of one symbol from a [`Scanner`].
///
/// Iteration yields segments in stream order and ends at the terminator, when
/// too few bits remain for another mode indicator, or after the first error.
pub struct QrDecoder<S: Scanner> {
    scanner: S,
    finished: bool,
}

impl<S: Scanner> QrDecoder<S> {
    /// Decoder positioned at the first segment of `scanner`
    pub fn new(scanner: S) -> Self {
        Self {
            scanner,
            finished: false,
        }
    }

    /// Symbol metadata from the underlying scanner
    pub fn info(&mut self) -> Result<SymbolInfo> {
        self.scanner.info().copied()
    }

    /// The scanner segments are read from
    pub fn scanner(&mut self) -> &mut S {
        &mut self.scanner
    }

    /// Give the scanner back
    pub fn into_inner(self) -> S {
        self.scanner
    }

    /// Start again from the first segment
    pub fn reset(&mut self) {
        self.scanner.reset();
        self.finished = false;
    }

    /// The first segment of the symbol
    pub fn first(&mut self) -> Result<Segment> {
        self.next().unwrap_or(Err(QrError::EndOfData))
    }

    /// Every remaining segment, failing on the first broken one
    pub fn decode_all(&mut self) -> Result<Vec<Segment>> {
        self.by_ref().collect()
    }

    /// Read a mode indicator and the segment it introduces; `None` at the end
    /// of the message.
    pub fn next_segment(&mut self) -> Result<Option<Segment>> {
        if self.scanner.remaining()? < MODE_BITS {
            return Ok(None);
        }
        let indicator = self.scanner.read_int(MODE_BITS)?;
        if indicator == 0 {
            return Ok(None);
        }
        let mode = Mode::from_indicator(indicator)?;
        trace!("segment mode {mode:?}");
        self.decode_segment(mode).map(Some)
    }

    /// Decode a segment body (character count and data) for a known mode
    pub fn decode_segment(&mut self, mode: Mode) -> Result<Segment> {
        let version = self.scanner.info()?.version;
        let count_bits = version.char_count_bits(mode)?;
        let char_count = self.scanner.read_int(count_bits)? as usize;
        let scanner = &mut self.scanner;
        let payload = match mode {
            Mode::Numeric => Payload::Number(NumericDecoder::decode(scanner, char_count)?),
            Mode::Alphanumeric => Payload::Text(AlphanumericDecoder::decode(scanner, char_count)?),
            Mode::Byte => ByteDecoder::decode(scanner, char_count)?,
            Mode::Kanji => Payload::Text(KanjiDecoder::decode(scanner, char_count)?),
            Mode::StructuredAppend => return Err(QrError::Unsupported("Structured append")),
            Mode::Eci => return Err(QrError::Unsupported("Extended Channel Interpretation")),
        };
        Ok(Segment {
            mode,
            char_count,
            payload,
        })
    }
}

impl<S: Scanner> Iterator for QrDecoder<S> {
    type Item = Result<Segment>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_segment() {
            Ok(Some(segment)) => Some(Ok(segment)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}
