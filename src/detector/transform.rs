/// Module sampling: the located symbol seen as a grid of dark/light modules
use crate::models::{BitMatrix, Geometry};
use crate::utils::pixel_source::PixelSource;

/// Reads modules of a located symbol straight from the pixel source.
///
/// Each module is sampled at its top-left pixel. Negative module coordinates
/// count back from the far edge, so `(-1, 8)` is the last module of row 8.
pub struct ModuleSampler<'a, P: PixelSource + ?Sized> {
    source: &'a P,
    geometry: Geometry,
    side: i64,
    threshold: u8,
}

impl<'a, P: PixelSource + ?Sized> ModuleSampler<'a, P> {
    /// Sampler over a located symbol of `side` modules
    pub fn new(source: &'a P, geometry: Geometry, side: u32, threshold: u8) -> Self {
        Self {
            source,
            geometry,
            side: i64::from(side),
            threshold,
        }
    }

    /// Side length in modules
    pub fn side(&self) -> u32 {
        self.side as u32
    }

    /// Whether module `(x, y)` is dark
    pub fn module(&self, x: i64, y: i64) -> bool {
        let x = if x < 0 { x + self.side } else { x };
        let y = if y < 0 { y + self.side } else { y };
        let (module_w, module_h) = self.geometry.module_size;
        let px = i64::from(self.geometry.canvas.left) + x * i64::from(module_w);
        let py = i64::from(self.geometry.canvas.top) + y * i64::from(module_h);
        match (u32::try_from(px), u32::try_from(py)) {
            (Ok(px), Ok(py)) => self.source.is_dark(px, py, self.threshold),
            _ => false,
        }
    }

    /// Sample every module into a matrix
    pub fn to_matrix(&self) -> BitMatrix {
        let side = self.side as usize;
        BitMatrix::from_fn(side, side, |x, y| self.module(x as i64, y as i64))
    }
}
