//! Symbol location in a pixel source
//!
//! - Finder corner search and module measurement
//! - Module sampling over the located grid

/// Finder corner search and module size measurement
pub mod finder;
/// Module sampling of a located symbol
pub mod transform;
