/// Kanji mode decoder (Mode 1000)
/// Each character is a 13-bit compaction of a double-byte Shift-JIS code
use encoding_rs::SHIFT_JIS;

use crate::decoder::scanner::Scanner;
use crate::error::{QrError, Result};

/// Kanji mode (1000)
pub struct KanjiDecoder;

impl KanjiDecoder {
    /// Decode `character_count` characters of 13 bits each
    pub fn decode<S: Scanner + ?Sized>(scanner: &mut S, character_count: usize) -> Result<String> {
        let mut result = String::with_capacity(character_count * 3);
        for _ in 0..character_count {
            let value = scanner.read_int(13)?;
            let pair = Self::to_shift_jis(value).to_be_bytes();
            let decoded = SHIFT_JIS
                .decode_without_bom_handling_and_without_replacement(&pair)
                .ok_or(QrError::InvalidCharacter {
                    mode: "kanji",
                    value,
                })?;
            result.push_str(&decoded);
        }
        Ok(result)
    }

    /// Expand a 13-bit value back to its two-byte Shift-JIS code
    pub fn to_shift_jis(value: u32) -> u16 {
        let compact = ((value / 0xC0) << 8) | (value % 0xC0);
        let code = if compact < 0x1F00 {
            compact + 0x8140
        } else {
            compact + 0xC140
        };
        code as u16
    }
}
