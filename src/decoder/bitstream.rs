/// Zig-zag traversal of the data and EC modules of a symbol
use crate::decoder::function_mask::FunctionMask;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

/// Lazy iterator over data module coordinates `(x, y)` in reading order.
///
/// Starts at the bottom-right column pair and snakes upward and downward two
/// columns at a time, skipping reserved modules. Passing the vertical timing
/// column costs one extra column shift and flips which column of each pair is
/// visited first.
#[derive(Debug, Clone)]
pub struct ZigZag<'a> {
    reserved: &'a FunctionMask,
    size: i64,
    current: (i64, i64),
    direction: Direction,
    shifted_parity: bool,
}

impl<'a> ZigZag<'a> {
    /// Traversal skipping every module set in `reserved`
    pub fn new(reserved: &'a FunctionMask) -> Self {
        let size = reserved.size() as i64;
        Self {
            reserved,
            size,
            current: (size - 2, size),
            direction: Direction::Up,
            shifted_parity: false,
        }
    }

    /// Rewind to the first module
    pub fn reset(&mut self) {
        self.current = (self.size - 2, self.size);
        self.direction = Direction::Up;
        self.shifted_parity = false;
    }

    fn is_reserved(&self, (x, y): (i64, i64)) -> bool {
        x >= 0 && y >= 0 && self.reserved.is_function(x as usize, y as usize)
    }

    fn step(&mut self, (x, y): (i64, i64)) -> (i64, i64) {
        // The right column of a pair moves left; the left column moves to the next row.
        let on_left_column = ((self.size - x) % 2 == 0) ^ self.shifted_parity;
        if !on_left_column {
            return (x - 1, y);
        }
        let at_edge = match self.direction {
            Direction::Up => y == 0,
            Direction::Down => y == self.size - 1,
        };
        if !at_edge {
            let dy = if self.direction == Direction::Up { -1 } else { 1 };
            return (x + 1, y + dy);
        }
        self.direction = match self.direction {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        };
        if x > 0 && self.reserved.is_full_column(x as usize - 1) {
            self.shifted_parity = !self.shifted_parity;
            (x - 2, y)
        } else {
            (x - 1, y)
        }
    }
}

impl Iterator for ZigZag<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let mut pos = self.current;
        loop {
            if pos.0 < 0 {
                self.current = pos;
                return None;
            }
            if pos != self.current && !self.is_reserved(pos) {
                break;
            }
            pos = self.step(pos);
        }
        self.current = pos;
        Some((pos.0 as usize, pos.1 as usize))
    }
}
