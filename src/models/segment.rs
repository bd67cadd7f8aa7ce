use std::fmt;

use crate::decoder::vcard::VCard;
use crate::error::{QrError, Result};

/// Segment mode, from the 4-bit mode indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Digits 0-9, three per 10 bits
    Numeric,
    /// 45-character alphabet, two per 11 bits
    Alphanumeric,
    /// Raw 8-bit data
    Byte,
    /// Shift-JIS double-byte characters, 13 bits each
    Kanji,
    /// Symbol is one part of a sequence
    StructuredAppend,
    /// Extended Channel Interpretation designator
    Eci,
}

impl Mode {
    /// Map a mode indicator to a mode. The terminator (0) is not a mode.
    pub fn from_indicator(id: u32) -> Result<Self> {
        match id {
            0b0001 => Ok(Mode::Numeric),
            0b0010 => Ok(Mode::Alphanumeric),
            0b0011 => Ok(Mode::StructuredAppend),
            0b0100 => Ok(Mode::Byte),
            0b0111 => Ok(Mode::Eci),
            0b1000 => Ok(Mode::Kanji),
            other => Err(QrError::IllegalModeId(other)),
        }
    }

    /// The 4-bit indicator for this mode
    pub fn indicator(&self) -> u32 {
        match self {
            Mode::Numeric => 0b0001,
            Mode::Alphanumeric => 0b0010,
            Mode::StructuredAppend => 0b0011,
            Mode::Byte => 0b0100,
            Mode::Eci => 0b0111,
            Mode::Kanji => 0b1000,
        }
    }

    /// Column of this mode in the character-count width table
    pub(crate) fn count_table_index(&self) -> Option<usize> {
        match self {
            Mode::Numeric => Some(0),
            Mode::Alphanumeric => Some(1),
            Mode::Byte => Some(2),
            Mode::Kanji => Some(3),
            Mode::StructuredAppend | Mode::Eci => None,
        }
    }
}

/// Non-negative integer of unbounded size, kept as its decimal digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Numeric {
    digits: String,
}

impl Numeric {
    /// Build from ASCII digits; leading zeros are dropped as for any integer.
    pub(crate) fn from_digits(raw: &str) -> Self {
        let trimmed = raw.trim_start_matches('0');
        let digits = if trimmed.is_empty() { "0" } else { trimmed };
        Self {
            digits: digits.to_string(),
        }
    }

    /// Decimal representation without leading zeros
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Value as `u64`, if it fits
    pub fn to_u64(&self) -> Option<u64> {
        self.digits.parse().ok()
    }

    /// Value as `u128`, if it fits
    pub fn to_u128(&self) -> Option<u128> {
        self.digits.parse().ok()
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

impl From<u64> for Numeric {
    fn from(value: u64) -> Self {
        Self {
            digits: value.to_string(),
        }
    }
}

/// Decoded content of one segment
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Numeric mode value
    Number(Numeric),
    /// Alphanumeric, byte or kanji text
    Text(String),
    /// Byte-mode text that carried a vCard
    VCard(Box<VCard>),
}

impl Payload {
    /// Text content, if this payload is plain text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Number, if this payload came from a numeric segment
    pub fn as_number(&self) -> Option<&Numeric> {
        match self {
            Payload::Number(n) => Some(n),
            _ => None,
        }
    }

    /// vCard record, if the byte payload was one
    pub fn as_vcard(&self) -> Option<&VCard> {
        match self {
            Payload::VCard(card) => Some(card),
            _ => None,
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Number(n) => write!(f, "{n}"),
            Payload::Text(text) => f.write_str(text),
            Payload::VCard(card) => write!(f, "{card}"),
        }
    }
}

/// One mode-tagged unit of the decoded bitstream
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Mode the segment was encoded in
    pub mode: Mode,
    /// Character count field as read from the stream
    pub char_count: usize,
    /// Decoded content
    pub payload: Payload,
}
