/// Alphanumeric mode decoder (Mode 0010)
/// Pairs = 11 bits, single = 6 bits
use crate::decoder::scanner::Scanner;
use crate::decoder::tables::ALPHANUMERIC_CHARS;
use crate::error::{QrError, Result};

/// Alphanumeric mode (0010)
pub struct AlphanumericDecoder;

impl AlphanumericDecoder {
    /// Decode `character_count` characters, two per 11 bits
    pub fn decode<S: Scanner + ?Sized>(scanner: &mut S, character_count: usize) -> Result<String> {
        let mut result = String::with_capacity(character_count);
        let mut chars_remaining = character_count;

        while chars_remaining > 0 {
            if chars_remaining >= 2 {
                let value = scanner.read_int(11)?;
                result.push(char_at(value / 45, value)?);
                result.push(char_at(value % 45, value)?);
                chars_remaining -= 2;
            } else {
                let value = scanner.read_int(6)?;
                result.push(char_at(value, value)?);
                chars_remaining -= 1;
            }
        }

        Ok(result)
    }
}

fn char_at(index: u32, raw: u32) -> Result<char> {
    ALPHANUMERIC_CHARS
        .get(index as usize)
        .map(|&c| char::from(c))
        .ok_or(QrError::InvalidCharacter {
            mode: "alphanumeric",
            value: raw,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::scanner::PrecomputedBitScanner;
    use crate::models::{ECLevel, MaskPattern, SymbolInfo, Version};

    fn scanner(bits: &str) -> PrecomputedBitScanner {
        let info = SymbolInfo::new(Version::new(1).unwrap(), ECLevel::M, MaskPattern::Pattern0);
        PrecomputedBitScanner::from_bit_str(info, bits).unwrap()
    }

    #[test]
    fn test_pairs_and_single() {
        // "AC-42": AC = 10*45+12 = 462, -4 = 41*45+4 = 1849, 2 = 2
        let mut s = scanner("00111001110 11100111001 000010");
        assert_eq!(AlphanumericDecoder::decode(&mut s, 5).unwrap(), "AC-42");
    }

    #[test]
    fn test_symbols() {
        // " :" = 36*45+44 = 1664
        let mut s = scanner("11010000000");
        assert_eq!(AlphanumericDecoder::decode(&mut s, 2).unwrap(), " :");
    }

    #[test]
    fn test_index_out_of_alphabet() {
        // 2047 / 45 = 45
        let mut s = scanner("11111111111");
        assert!(matches!(
            AlphanumericDecoder::decode(&mut s, 2),
            Err(QrError::InvalidCharacter { value: 2047, .. })
        ));
        let mut s = scanner("101101");
        assert!(AlphanumericDecoder::decode(&mut s, 1).is_err());
    }
}
