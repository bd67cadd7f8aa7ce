use super::Rect;

/// Compact square-or-rectangular bit grid, addressed as (x, y)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create a cleared matrix with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Build a matrix by evaluating `f(x, y)` for every cell
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut matrix = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if f(x, y) {
                    matrix.set(x, y, true);
                }
            }
        }
        matrix
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> Option<(usize, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y * self.width + x;
        Some((index / 8, 1 << (index % 8)))
    }

    /// Get bit at (x, y); cells outside the matrix read as unset
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.index(x, y)
            .is_some_and(|(byte, bit)| self.data[byte] & bit != 0)
    }

    /// Set bit at (x, y); writes outside the matrix are ignored
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if let Some((byte, bit)) = self.index(x, y) {
            if value {
                self.data[byte] |= bit;
            } else {
                self.data[byte] &= !bit;
            }
        }
    }

    /// Set every cell of an inclusive rectangle, clipped to the matrix
    pub fn fill_rect(&mut self, rect: &Rect) {
        let right = (rect.right as usize).min(self.width.saturating_sub(1));
        let bottom = (rect.bottom as usize).min(self.height.saturating_sub(1));
        for y in rect.top as usize..=bottom {
            for x in rect.left as usize..=right {
                self.set(x, y, true);
            }
        }
    }

    /// Whether every cell of column `x` is set
    pub fn column_is_full(&self, x: usize) -> bool {
        x < self.width && (0..self.height).all(|y| self.get(x, y))
    }

    /// Number of set cells
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_matrix() {
        let mut matrix = BitMatrix::new(8, 8);
        assert_eq!(matrix.width(), 8);
        assert_eq!(matrix.height(), 8);

        matrix.set(3, 4, true);
        assert!(matrix.get(3, 4));
        assert!(!matrix.get(3, 3));
        assert_eq!(matrix.count_ones(), 1);

        matrix.set(3, 4, false);
        assert!(!matrix.get(3, 4));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut matrix = BitMatrix::new(8, 8);
        matrix.set(10, 10, true); // Should not panic
        assert!(!matrix.get(10, 10));
        assert_eq!(matrix.count_ones(), 0);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut matrix = BitMatrix::new(5, 5);
        matrix.fill_rect(&Rect::new(3, 0, 9, 9));
        assert_eq!(matrix.count_ones(), 10);
        assert!(matrix.column_is_full(4));
        assert!(!matrix.column_is_full(2));
        assert!(!matrix.column_is_full(7));
    }

    #[test]
    fn test_from_fn() {
        let diagonal = BitMatrix::from_fn(4, 4, |x, y| x == y);
        assert_eq!(diagonal.count_ones(), 4);
        assert!(diagonal.get(2, 2));
        assert!(!diagonal.get(2, 1));
    }
}
