/// Byte mode decoder (Mode 0100) for 8-bit data
use crate::decoder::scanner::Scanner;
use crate::decoder::vcard::VCard;
use crate::error::Result;
use crate::models::Payload;

/// Text starting with this line is parsed as a vCard
const VCARD_HEADER: &str = "BEGIN:VCARD";

/// Byte mode (0100)
pub struct ByteDecoder;

impl ByteDecoder {
    /// Decode `character_count` bytes as text, or as a vCard when the text
    /// carries a vCard header.
    pub fn decode<S: Scanner + ?Sized>(scanner: &mut S, character_count: usize) -> Result<Payload> {
        let bytes = Self::read_bytes(scanner, character_count)?;
        let text = Self::decode_text(&bytes);
        if text.starts_with(VCARD_HEADER) {
            return Ok(Payload::VCard(Box::new(VCard::from_text(&text)?)));
        }
        Ok(Payload::Text(text))
    }

    /// Read `character_count` raw bytes
    pub fn read_bytes<S: Scanner + ?Sized>(scanner: &mut S, character_count: usize) -> Result<Vec<u8>> {
        (0..character_count)
            .map(|_| scanner.read_int(8).map(|byte| byte as u8))
            .collect()
    }

    /// UTF-8 if the bytes are valid UTF-8, otherwise Latin-1
    pub fn decode_text(bytes: &[u8]) -> String {
        match std::str::from_utf8(bytes) {
            Ok(text) => text.to_string(),
            Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
        }
    }
}
