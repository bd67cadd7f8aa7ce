//! QR code data mode decoders
//!
//! This module contains decoders for the QR data modes, each reading one
//! segment body from a [`Scanner`](crate::decoder::scanner::Scanner):
//! - Numeric: Efficient encoding for digits (0-9)
//! - Alphanumeric: Letters, numbers, and symbols
//! - Byte: 8-bit data (UTF-8 or Latin-1, vCards recognized)
//! - Kanji: Shift-JIS double-byte characters

/// Alphanumeric mode
pub mod alphanumeric;
/// Byte mode
pub mod byte;
/// Kanji mode
pub mod kanji;
/// Numeric mode
pub mod numeric;
