//! Error types shared by every decoding stage.

use thiserror::Error;

/// Coarse classification of a [`QrError`], for callers that only need to branch on
/// the kind of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The symbol could not be located or measured in the image.
    Geometry,
    /// Both format-info copies are too damaged to identify one codeword.
    FormatInfoCorrupt,
    /// Codeword or padding damage beyond what error correction can repair.
    DataCorrupt,
    /// A mode indicator outside the defined set.
    IllegalMode,
    /// A version outside 1-40, or a symbol size that is not a QR side length.
    IllegalVersion,
    /// Structurally invalid payload (bad mask id, out-of-range characters).
    Format,
    /// A valid but unimplemented feature.
    Unsupported,
    /// Read past the end of the bitstream.
    EndOfData,
    /// Malformed vCard text.
    VCard,
    /// Image file could not be loaded.
    Image,
}

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum QrError {
    /// The diagonal corner search found no dark pixel.
    #[error("Couldn't find one of the edges ({corner})")]
    EdgeNotFound {
        /// Which corner was searched for
        corner: &'static str,
    },

    /// A found corner does not line up with the top-left one.
    #[error("Top-left position pattern not aligned with the {other} one")]
    PatternMisaligned {
        /// The corner that is out of line
        other: &'static str,
    },

    /// No light pixel was found while measuring a finder pattern edge.
    #[error("Couldn't measure the module {axis} along the top-left finder pattern")]
    ModuleSizeNotFound {
        /// `width` or `height`
        axis: &'static str,
    },

    /// The canvas extent is not a whole number of modules of a valid QR side.
    #[error("Canvas of {extent} px with {module} px modules is not a QR symbol side")]
    IrregularSize {
        /// Canvas width in pixels
        extent: u32,
        /// Measured module width in pixels
        module: u32,
    },

    /// Neither format-info copy is close enough to a single codeword.
    #[error("QR meta-info is too corrupt to read")]
    FormatInfoCorrupt,

    /// Reed-Solomon could not repair a block.
    #[error("Uncorrectable codeword block {block}: {reason}")]
    UncorrectableBlock {
        /// Block index in interleaving order
        block: usize,
        /// What the decoder gave up on
        reason: &'static str,
    },

    /// Remainder bits after the last codeword must be zero.
    #[error("Non-zero padding after the last codeword ({bits} bits)")]
    NonZeroPadding {
        /// Number of remainder bits
        bits: usize,
    },

    /// The traversal produced a different number of bits than the version holds.
    #[error("Data length mismatch: expected {expected} bits, but found {found}")]
    DataLength {
        /// Bits the version holds
        expected: usize,
        /// Bits actually read
        found: usize,
    },

    /// A mode indicator outside the defined set.
    #[error("Unknown mode number: {0}")]
    IllegalModeId(u32),

    /// A version number outside 1-40.
    #[error("Illegal QR version: {0} (should be integer between 1-40)")]
    IllegalVersion(i64),

    /// A mask id outside 0-7.
    #[error("Bad mask pattern: {0}")]
    BadMaskPattern(u8),

    /// A character group decoded to a value outside its mode's alphabet.
    #[error("Invalid {mode} data: {value:#x}")]
    InvalidCharacter {
        /// Mode being decoded
        mode: &'static str,
        /// The offending group value
        value: u32,
    },

    /// Structured append or ECI.
    #[error("{0} encoding not implemented yet")]
    Unsupported(&'static str),

    /// A read went past the last bit of the stream.
    #[error("Reached the end of the QR bitstream")]
    EndOfData,

    /// A byte segment looked like a vCard but did not parse.
    #[error(transparent)]
    VCard(#[from] VCardError),

    /// The image file could not be opened or decoded.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl QrError {
    /// Returns the coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            QrError::EdgeNotFound { .. }
            | QrError::PatternMisaligned { .. }
            | QrError::ModuleSizeNotFound { .. } => ErrorKind::Geometry,
            QrError::IrregularSize { .. } | QrError::IllegalVersion(_) => ErrorKind::IllegalVersion,
            QrError::FormatInfoCorrupt => ErrorKind::FormatInfoCorrupt,
            QrError::UncorrectableBlock { .. }
            | QrError::NonZeroPadding { .. }
            | QrError::DataLength { .. } => ErrorKind::DataCorrupt,
            QrError::IllegalModeId(_) => ErrorKind::IllegalMode,
            QrError::BadMaskPattern(_) | QrError::InvalidCharacter { .. } => ErrorKind::Format,
            QrError::Unsupported(_) => ErrorKind::Unsupported,
            QrError::EndOfData => ErrorKind::EndOfData,
            QrError::VCard(_) => ErrorKind::VCard,
            QrError::Image(_) => ErrorKind::Image,
        }
    }
}

/// Errors raised while parsing vCard text found in a byte segment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VCardError {
    /// Text is not framed by `BEGIN:VCARD` and `END:VCARD`.
    #[error("Not a valid vCard format")]
    InvalidEnvelope,

    /// A property name outside the supported set.
    #[error("Unknown vCard field: {0}. This implementation only supports basic properties")]
    UnknownField(String),

    /// A content line without a `:` separator.
    #[error("Malformed vCard line: {0}")]
    MalformedLine(String),

    /// A date property in no recognized ISO 8601 form.
    #[error("Invalid vCard date: {0}")]
    InvalidDate(String),
}

/// A convenience `Result` type alias using the crate's `QrError` type.
pub type Result<T> = std::result::Result<T, QrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_value() {
        assert_eq!(QrError::IllegalModeId(15).to_string(), "Unknown mode number: 15");
        assert_eq!(QrError::BadMaskPattern(8).to_string(), "Bad mask pattern: 8");
        assert_eq!(
            QrError::EdgeNotFound { corner: "top-left" }.to_string(),
            "Couldn't find one of the edges (top-left)"
        );
        assert_eq!(
            QrError::from(VCardError::UnknownField("EWINO".into())).to_string(),
            "Unknown vCard field: EWINO. This implementation only supports basic properties"
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(QrError::FormatInfoCorrupt.kind(), ErrorKind::FormatInfoCorrupt);
        assert_eq!(
            QrError::UncorrectableBlock { block: 2, reason: "x" }.kind(),
            ErrorKind::DataCorrupt
        );
        assert_eq!(QrError::Unsupported("ECI").kind(), ErrorKind::Unsupported);
        assert_eq!(QrError::IllegalVersion(41).kind(), ErrorKind::IllegalVersion);
    }
}
