use crate::models::{BitMatrix, MaskPattern, Rect, Version};

/// Reserved ("dead") module rectangles of one version, grouped by what they hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadZones {
    /// Finder patterns with separators and format info, the dark module, and both timing lines
    pub fixed: Vec<Rect>,
    /// The two 6x3 version information blocks (versions 7+)
    pub version_info: Vec<Rect>,
    /// Alignment patterns clear of every other zone
    pub alignment: Vec<Rect>,
    /// Alignment patterns sitting on a timing line
    pub timing_alignment: Vec<Rect>,
}

impl DeadZones {
    /// Every reserved zone of `version`
    pub fn new(version: Version) -> Self {
        let s = version.side_length();
        let fixed = vec![
            Rect::new(0, 0, 8, 8),
            Rect::new(s - 8, 0, s - 1, 8),
            Rect::new(0, s - 8, 7, s - 1),
            Rect::new(8, s - 8, 8, s - 1),
            Rect::new(8, 6, s - 9, 6),
            Rect::new(6, 8, 6, s - 9),
        ];
        let version_info = if version.has_version_info() {
            vec![Rect::new(s - 11, 0, s - 9, 5), Rect::new(0, s - 11, 5, s - 9)]
        } else {
            Vec::new()
        };

        // Finder corners and format info always win over an alignment square.
        let (corners, timing) = fixed.split_at(4);
        let mut alignment = Vec::new();
        let mut timing_alignment = Vec::new();
        for (cx, cy) in version.alignment_centers() {
            let zone = Rect::around(cx, cy, 2);
            let blocked = corners
                .iter()
                .chain(version_info.iter())
                .any(|z| z.overlaps(&zone));
            if blocked {
                continue;
            }
            if timing.iter().any(|z| z.overlaps(&zone)) {
                timing_alignment.push(zone);
            } else {
                alignment.push(zone);
            }
        }

        Self {
            fixed,
            version_info,
            alignment,
            timing_alignment,
        }
    }

    /// Every zone, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Rect> {
        self.fixed
            .iter()
            .chain(&self.version_info)
            .chain(&self.alignment)
            .chain(&self.timing_alignment)
    }
}

/// Function module mask for a specific QR version.
/// true = function module (not data), false = data module.
#[derive(Debug, Clone)]
pub struct FunctionMask {
    mask: BitMatrix,
}

impl FunctionMask {
    /// Mask with every dead zone of `version` set
    pub fn new(version: Version) -> Self {
        let size = version.side_length() as usize;
        let mut mask = BitMatrix::new(size, size);
        for zone in DeadZones::new(version).iter() {
            mask.fill_rect(zone);
        }
        Self { mask }
    }

    /// Side length in modules
    pub fn size(&self) -> usize {
        self.mask.width()
    }

    /// Out-of-range coordinates are not function modules
    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.mask.get(x, y)
    }

    /// Whether column `x` holds no data module at all
    pub fn is_full_column(&self, x: usize) -> bool {
        self.mask.column_is_full(x)
    }

    /// Modules left for data and EC codewords
    pub fn data_modules_count(&self) -> usize {
        self.size() * self.size() - self.mask.count_ones()
    }
}

/// Per-module data mask: `None` for reserved modules, otherwise whether the
/// module's bit is inverted by the symbol's mask pattern.
#[derive(Debug, Clone)]
pub struct DataMask {
    reserved: FunctionMask,
    pattern: MaskPattern,
}

impl DataMask {
    /// Mask for `version` under `pattern`
    pub fn new(version: Version, pattern: MaskPattern) -> Self {
        Self {
            reserved: FunctionMask::new(version),
            pattern,
        }
    }

    /// `None` on reserved modules
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        if self.reserved.is_function(x, y) {
            None
        } else {
            Some(self.pattern.is_masked(y, x))
        }
    }

    /// The reserved-module mask underneath
    pub fn function_mask(&self) -> &FunctionMask {
        &self.reserved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: i64) -> Version {
        Version::new(n).unwrap()
    }

    #[test]
    fn test_version_one_zones() {
        let zones = DeadZones::new(v(1));
        assert_eq!(zones.fixed.len(), 6);
        assert!(zones.version_info.is_empty());
        assert!(zones.alignment.is_empty());
        assert!(zones.timing_alignment.is_empty());
    }

    #[test]
    fn test_zone_counts_per_bracket() {
        let brackets = [(1, 1), (2, 6), (7, 13), (14, 20), (21, 27), (28, 34), (35, 40)];
        for (k, (first, last)) in brackets.into_iter().enumerate() {
            for n in first..=last {
                let zones = DeadZones::new(v(n));
                assert_eq!(zones.fixed.len(), 6);
                assert_eq!(zones.version_info.len(), if n >= 7 { 2 } else { 0 });
                assert_eq!(zones.alignment.len(), k * k, "version {n}");
                let crossing = if k >= 2 { 2 * (k - 1) } else { 0 };
                assert_eq!(zones.timing_alignment.len(), crossing, "version {n}");
            }
        }
    }

    #[test]
    fn test_data_modules_match_capacity() {
        for version in Version::all() {
            let mask = FunctionMask::new(version);
            assert_eq!(mask.data_modules_count(), version.raw_data_modules());
        }
    }

    #[test]
    fn test_reserved_modules() {
        let mask = FunctionMask::new(v(2));
        // dark module and timing lines
        assert!(mask.is_function(8, 25 - 8));
        assert!(mask.is_function(12, 6));
        assert!(mask.is_function(6, 12));
        // alignment pattern at (18, 18)
        assert!(mask.is_function(16, 20));
        assert!(!mask.is_function(15, 20));
        assert!(mask.is_full_column(6));
        assert!(!mask.is_full_column(7));
    }

    #[test]
    fn test_data_mask() {
        let mask = DataMask::new(v(1), MaskPattern::Pattern1);
        assert_eq!(mask.get(0, 0), None);
        // row 10 is even, so pattern 1 inverts it
        assert_eq!(mask.get(20, 10), Some(true));
        assert_eq!(mask.get(20, 11), Some(false));
    }
}
