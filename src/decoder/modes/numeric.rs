/// Numeric mode decoder (Mode 0001)
/// Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits
use crate::decoder::scanner::Scanner;
use crate::error::{QrError, Result};
use crate::models::Numeric;

/// Numeric mode (0001)
pub struct NumericDecoder;

impl NumericDecoder {
    /// Decode `character_count` digits into one unbounded integer
    pub fn decode<S: Scanner + ?Sized>(scanner: &mut S, character_count: usize) -> Result<Numeric> {
        let mut digits = String::with_capacity(character_count);
        let mut chars_remaining = character_count;

        while chars_remaining > 0 {
            let group_size = chars_remaining.min(3);
            let (bits_needed, limit) = match group_size {
                3 => (10, 999),
                2 => (7, 99),
                _ => (4, 9),
            };

            let value = scanner.read_int(bits_needed)?;
            if value > limit {
                return Err(QrError::InvalidCharacter {
                    mode: "numeric",
                    value,
                });
            }
            digits.push_str(&format!("{value:0group_size$}"));
            chars_remaining -= group_size;
        }

        Ok(Numeric::from_digits(&digits))
    }
}
