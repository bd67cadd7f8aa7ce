/// Finder pattern location by diagonal corner search and module measurement
use log::debug;

use crate::error::{QrError, Result};
use crate::models::{Geometry, Point, Rect, Version};
use crate::utils::pixel_source::PixelSource;

/// Width of a finder pattern in modules
const FINDER_MODULES: u32 = 7;

/// One of the three symbol corners that carry a finder pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    /// Searched from the image's top-left
    TopLeft,
    /// Searched from the image's top-right
    TopRight,
    /// Searched from the image's bottom-left
    BottomLeft,
}

impl Corner {
    /// Name used in error messages
    pub fn name(self) -> &'static str {
        match self {
            Corner::TopLeft => "top-left",
            Corner::TopRight => "top-right",
            Corner::BottomLeft => "bottom-left",
        }
    }

    /// Image corner the search starts from and the direction it sweeps in
    fn origin_and_vector(self, width: u32, height: u32) -> ((i64, i64), (i64, i64)) {
        let (w, h) = (i64::from(width), i64::from(height));
        match self {
            Corner::TopLeft => ((0, 0), (1, 1)),
            Corner::TopRight => ((w - 1, 0), (-1, 1)),
            Corner::BottomLeft => ((0, h - 1), (1, -1)),
        }
    }
}

/// Locates a single, axis-aligned symbol in a pixel source.
///
/// The symbol may sit on any light border. Each finder corner is found by
/// sweeping anti-diagonals outward from the matching image corner and taking the
/// first dark pixel.
pub struct FinderDetector<'a, P: PixelSource + ?Sized> {
    source: &'a P,
    threshold: u8,
    max_distance: u32,
}

impl<'a, P: PixelSource + ?Sized> FinderDetector<'a, P> {
    /// Search at most `max_distance` anti-diagonals from each corner, or the
    /// shorter image side when `None`.
    pub fn new(source: &'a P, threshold: u8, max_distance: Option<u32>) -> Self {
        let shorter_side = source.width().min(source.height());
        Self {
            source,
            threshold,
            max_distance: max_distance.unwrap_or(shorter_side),
        }
    }

    /// Resolve the canvas, the module size and the version of the symbol
    pub fn locate(&self) -> Result<(Geometry, Version)> {
        let top_left = self.corner_pixel(Corner::TopLeft)?;
        let top_right = self.corner_pixel(Corner::TopRight)?;
        let bottom_left = self.corner_pixel(Corner::BottomLeft)?;

        if top_right.y != top_left.y {
            return Err(QrError::PatternMisaligned {
                other: Corner::TopRight.name(),
            });
        }
        if bottom_left.x != top_left.x {
            return Err(QrError::PatternMisaligned {
                other: Corner::BottomLeft.name(),
            });
        }

        let canvas = Rect::new(top_left.x, top_left.y, top_right.x, bottom_left.y);
        let module_size = self.module_size(top_left)?;
        let geometry = Geometry {
            canvas,
            module_size,
        };
        let version = version_for(&geometry)?;
        debug!(
            "symbol at {:?}, modules {}x{} px, version {}",
            canvas, module_size.0, module_size.1, version
        );
        Ok((geometry, version))
    }

    /// First dark pixel met while sweeping outward from an image corner
    pub fn corner_pixel(&self, corner: Corner) -> Result<Point> {
        let ((cx, cy), (vx, vy)) = corner.origin_and_vector(self.source.width(), self.source.height());
        for dist in 0..i64::from(self.max_distance) {
            for step in 0..=dist {
                let x = cx + vx * step;
                let y = cy + vy * (dist - step);
                if self.is_dark(x, y) {
                    return Ok(Point::new(x as u32, y as u32));
                }
            }
        }
        Err(QrError::EdgeNotFound {
            corner: corner.name(),
        })
    }

    /// Module width and height in pixels, measured along the outer edges of the
    /// top-left finder pattern.
    ///
    /// The finder is 7 modules wide, so probing every 7th pixel finds the first
    /// light pixel after it exactly when the step equals the module size.
    pub fn module_size(&self, top_left: Point) -> Result<(u32, u32)> {
        let (left, top) = (top_left.x, top_left.y);
        let width_limit = self.source.width().saturating_sub(left) / FINDER_MODULES;
        let height_limit = self.source.height().saturating_sub(top) / FINDER_MODULES;

        let width = (1..width_limit)
            .find(|&i| !self.is_dark(i64::from(left + i * FINDER_MODULES), i64::from(top)))
            .ok_or(QrError::ModuleSizeNotFound { axis: "width" })?;
        let height = (1..height_limit)
            .find(|&i| !self.is_dark(i64::from(left), i64::from(top + i * FINDER_MODULES)))
            .ok_or(QrError::ModuleSizeNotFound { axis: "height" })?;
        Ok((width, height))
    }

    fn is_dark(&self, x: i64, y: i64) -> bool {
        match (u32::try_from(x), u32::try_from(y)) {
            (Ok(x), Ok(y)) => self.source.is_dark(x, y, self.threshold),
            _ => false,
        }
    }
}

/// Modules per side, rounded to the nearest whole module, mapped to a version
fn version_for(geometry: &Geometry) -> Result<Version> {
    let extent = geometry.canvas.width();
    let module = geometry.module_size.0;
    let side = (extent + module / 2) / module;
    Version::from_side_length(side).map_err(|_| QrError::IrregularSize { extent, module })
}
