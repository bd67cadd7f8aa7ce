//! rust_qreader - QR code reader for clean, axis-aligned symbols
//!
//! Reads a single Model 2 QR code (versions 1-40) from a grayscale pixel
//! source: locates the symbol, recovers its format information, undoes the
//! data mask, corrects every Reed-Solomon block and decodes the segments.
//!
//! ```no_run
//! use rust_qreader::{LumaBuffer, decode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pixels = vec![255u8; 64 * 64];
//! let image = LumaBuffer::from_luma(64, 64, pixels).ok_or("size mismatch")?;
//! let segment = decode(&image)?;
//! println!("{}", segment.payload);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// QR code decoding modules (error correction, format extraction, data modes)
pub mod decoder;
/// Symbol location (finder corners, module sampling)
pub mod detector;
/// Error types
pub mod error;
/// Core data structures (Version, SymbolInfo, BitMatrix, Segment, etc.)
pub mod models;
/// Helpers for decoding image files
pub mod tools;
/// Utility functions (pixel sources, grayscale, binarization)
pub mod utils;

pub use decoder::format::encode_format_info;
pub use decoder::qr_decoder::QrDecoder;
pub use decoder::scanner::{BitCursor, ImageScanner, PrecomputedBitScanner, ScanState, Scanner};
pub use decoder::vcard::{PropertyValue, VCard};
pub use error::{ErrorKind, QrError, Result, VCardError};
pub use models::{
    BitMatrix, ECLevel, Geometry, MaskPattern, Mode, Numeric, Payload, Point, Rect, Segment,
    SymbolInfo, Version,
};
pub use utils::pixel_source::{LumaBuffer, PixelSource};

/// Decode the first segment of the QR code in `source`
///
/// Pixels darker than the configured luminance threshold (128 unless
/// `QR_LUMINANCE_THRESHOLD` says otherwise) are dark modules.
pub fn decode<P: PixelSource + ?Sized>(source: &P) -> Result<Segment> {
    QrDecoder::new(ImageScanner::new(source)).first()
}

/// Decode every segment of the QR code in `source`
pub fn decode_all<P: PixelSource + ?Sized>(source: &P) -> Result<Vec<Segment>> {
    QrDecoder::new(ImageScanner::new(source)).decode_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_image_is_a_geometry_error() {
        let image = LumaBuffer::from_fn(50, 50, |_, _| 255);
        let err = decode(&image).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Geometry);
        assert_eq!(err.to_string(), "Couldn't find one of the edges (top-left)");
    }

    #[test]
    fn test_transparent_image_is_blank() {
        let image = LumaBuffer::from_rgba(10, 10, &[0u8; 400]).unwrap();
        assert!(matches!(decode_all(&image), Err(QrError::EdgeNotFound { .. })));
    }

    #[test]
    fn test_small_square_is_not_a_symbol() {
        // a solid 9x9 block measures as 2 px modules, far too few for any version
        let image = LumaBuffer::from_fn(30, 30, |x, y| {
            if (5..14).contains(&x) && (5..14).contains(&y) { 0 } else { 255 }
        });
        let err = decode(&image).unwrap_err();
        assert!(matches!(err, QrError::IrregularSize { extent: 9, module: 2 }));
        assert_eq!(err.kind(), ErrorKind::IllegalVersion);
    }
}
