/// Binary module grid
pub mod matrix;
/// Pixel coordinates and rectangles
pub mod point;
/// Version, EC level, mask and symbol metadata
pub mod qr_code;
/// Modes and decoded segments
pub mod segment;

pub use matrix::BitMatrix;
pub use point::{Point, Rect};
pub use qr_code::{ECLevel, Geometry, MaskPattern, SymbolInfo, Version};
pub use segment::{Mode, Numeric, Payload, Segment};
