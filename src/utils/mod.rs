//! Utility functions for image processing
//!
//! This module provides helper functions for reading pixels:
//! - Pixel sources (the luminance/alpha view the detector samples)
//! - Grayscale conversion (RGB/RGBA to luminance)
//! - Binarization (Otsu's method and threshold-based)

/// Otsu threshold estimation
pub mod binarization;
/// RGB/RGBA to luminance conversion
pub mod grayscale;
/// Luminance and alpha views over pixel data
pub mod pixel_source;
