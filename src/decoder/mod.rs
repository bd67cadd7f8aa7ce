//! QR code decoding modules
//!
//! This module contains all the logic for decoding a located symbol:
//! - Error correction (Reed-Solomon, BCH)
//! - Format information and per-version geometry
//! - Bitstream traversal and scanners
//! - Data mode decoding (numeric, alphanumeric, byte, kanji) and vCards

/// BCH error correction for format info
pub mod bch;
/// Zig-zag traversal of data modules
pub mod bitstream;
/// Codeword de-interleaving and per-block correction
pub mod blocks;
/// Environment configuration (threshold, search limit)
pub mod config;
/// Format information extraction (mask pattern, EC level)
pub mod format;
/// Function module mask builder (finder/timing/format/alignment/version)
pub mod function_mask;
/// Data mode decoders (numeric, alphanumeric, byte, kanji)
pub mod modes;
/// Segment decoder over a scanner
pub mod qr_decoder;
/// Reed-Solomon error correction
pub mod reed_solomon;
/// Bit sources: image-backed and precomputed scanners
pub mod scanner;
/// QR specification tables (ECC codewords/blocks)
pub mod tables;
/// vCard parsing for byte payloads
pub mod vcard;
/// Per-version geometry and capacities
pub mod version;
