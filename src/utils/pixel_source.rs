//! Grayscale pixel access for the detector
//!
//! The decoder only ever asks "is this pixel dark?", so any image type that can
//! report a luminance and alpha value per pixel can be scanned.
use image::{ImageBuffer, Luma, LumaA};
use std::ops::Deref;

use crate::utils::grayscale::{
    PARALLEL_THRESHOLD, rgb_to_grayscale, rgb_to_grayscale_parallel, rgba_to_luma_alpha,
    rgba_to_luma_alpha_parallel,
};

/// A rectangular grid of grayscale pixels with an alpha channel.
pub trait PixelSource {
    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// Luminance and alpha at `(x, y)`, or `None` outside the image
    fn luma_alpha(&self, x: u32, y: u32) -> Option<(u8, u8)>;

    /// A pixel is dark when it is visible and its luminance is below `threshold`.
    /// Pixels outside the image are white.
    fn is_dark(&self, x: u32, y: u32, threshold: u8) -> bool {
        match self.luma_alpha(x, y) {
            Some((luma, alpha)) => luma < threshold && alpha > 0,
            None => false,
        }
    }
}

impl<T: PixelSource + ?Sized> PixelSource for &T {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn luma_alpha(&self, x: u32, y: u32) -> Option<(u8, u8)> {
        (**self).luma_alpha(x, y)
    }
}

/// Owned luminance plane with an optional alpha plane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LumaBuffer {
    width: u32,
    height: u32,
    luma: Vec<u8>,
    alpha: Option<Vec<u8>>,
}

impl LumaBuffer {
    /// Fully opaque grayscale pixels, row-major. `None` if the length does not match.
    pub fn from_luma(width: u32, height: u32, luma: Vec<u8>) -> Option<Self> {
        if luma.len() != pixel_count(width, height) {
            return None;
        }
        Some(Self {
            width,
            height,
            luma,
            alpha: None,
        })
    }

    /// Interleaved luminance/alpha pairs, row-major
    pub fn from_luma_alpha(width: u32, height: u32, pairs: &[u8]) -> Option<Self> {
        if pairs.len() != pixel_count(width, height) * 2 {
            return None;
        }
        let (luma, alpha) = pairs.chunks_exact(2).map(|p| (p[0], p[1])).unzip();
        Some(Self {
            width,
            height,
            luma,
            alpha: Some(alpha),
        })
    }

    /// Packed RGB bytes, converted to luminance
    pub fn from_rgb(width: u32, height: u32, rgb: &[u8]) -> Option<Self> {
        let count = pixel_count(width, height);
        if rgb.len() != count * 3 {
            return None;
        }
        let (w, h) = (width as usize, height as usize);
        let luma = if count >= PARALLEL_THRESHOLD {
            rgb_to_grayscale_parallel(rgb, w, h)
        } else {
            rgb_to_grayscale(rgb, w, h)
        };
        Self::from_luma(width, height, luma)
    }

    /// Packed RGBA bytes, converted to luminance with the alpha channel kept
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Option<Self> {
        let count = pixel_count(width, height);
        if rgba.len() != count * 4 {
            return None;
        }
        let (w, h) = (width as usize, height as usize);
        let (luma, alpha) = if count >= PARALLEL_THRESHOLD {
            rgba_to_luma_alpha_parallel(rgba, w, h)
        } else {
            rgba_to_luma_alpha(rgba, w, h)
        };
        Some(Self {
            width,
            height,
            luma,
            alpha: Some(alpha),
        })
    }

    /// Build an opaque buffer by evaluating `f(x, y)` for every pixel
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> Self {
        let luma = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self {
            width,
            height,
            luma,
            alpha: None,
        }
    }

    /// Raw luminance plane
    pub fn luma(&self) -> &[u8] {
        &self.luma
    }
}

fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

impl PixelSource for LumaBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn luma_alpha(&self, x: u32, y: u32) -> Option<(u8, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * self.width as usize + x as usize;
        let alpha = self.alpha.as_ref().map_or(u8::MAX, |a| a[idx]);
        Some((self.luma[idx], alpha))
    }
}

impl<C: Deref<Target = [u8]>> PixelSource for ImageBuffer<Luma<u8>, C> {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn luma_alpha(&self, x: u32, y: u32) -> Option<(u8, u8)> {
        self.get_pixel_checked(x, y).map(|p| (p.0[0], u8::MAX))
    }
}

impl<C: Deref<Target = [u8]>> PixelSource for ImageBuffer<LumaA<u8>, C> {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn luma_alpha(&self, x: u32, y: u32) -> Option<(u8, u8)> {
        self.get_pixel_checked(x, y).map(|p| (p.0[0], p.0[1]))
    }
}
