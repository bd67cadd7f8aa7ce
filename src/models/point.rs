/// Pixel position in the source image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Point {
    /// X coordinate
    pub x: u32,
    /// Y coordinate
    pub y: u32,
}

impl Point {
    /// Create a new point
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle with inclusive bounds.
///
/// Used both for the symbol canvas (pixels) and for reserved zones (modules).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rect {
    /// Leftmost column
    pub left: u32,
    /// Topmost row
    pub top: u32,
    /// Rightmost column (inclusive)
    pub right: u32,
    /// Bottom row (inclusive)
    pub bottom: u32,
}

impl Rect {
    /// Create a rectangle from inclusive corner coordinates
    pub const fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Square of `2 * radius + 1` cells centered on `(cx, cy)`
    pub fn around(cx: u32, cy: u32, radius: u32) -> Self {
        Self::new(
            cx.saturating_sub(radius),
            cy.saturating_sub(radius),
            cx + radius,
            cy + radius,
        )
    }

    /// Number of columns covered
    pub fn width(&self) -> u32 {
        self.right - self.left + 1
    }

    /// Number of rows covered
    pub fn height(&self) -> u32 {
        self.bottom - self.top + 1
    }

    /// Two rectangles overlap iff their projections overlap on both axes
    pub fn overlaps(&self, other: &Rect) -> bool {
        let horizontal = self.left <= other.right && other.left <= self.right;
        let vertical = self.top <= other.bottom && other.top <= self.bottom;
        horizontal && vertical
    }
}
