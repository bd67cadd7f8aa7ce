/// Convert RGB/RGBA pixels to luminance (and alpha) planes
/// Y = 0.299*R + 0.587*G + 0.114*B
/// Uses fast integer arithmetic: Y = (76*R + 150*G + 29*B) >> 8
use rayon::prelude::*;

/// Coefficients for grayscale conversion: Y = (76*R + 150*G + 29*B) >> 8
const COEF_R: u32 = 76;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

/// Images with at least this many pixels are converted row-parallel
pub const PARALLEL_THRESHOLD: usize = 512 * 512;

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    let lum = (COEF_R * u32::from(r) + COEF_G * u32::from(g) + COEF_B * u32::from(b)) >> 8;
    lum.min(255) as u8
}

/// Convert packed RGB bytes to one luminance byte per pixel
pub fn rgb_to_grayscale(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    rgb.chunks_exact(3)
        .take(width * height)
        .map(|px| luma(px[0], px[1], px[2]))
        .collect()
}

/// Convert packed RGBA bytes to separate luminance and alpha planes
pub fn rgba_to_luma_alpha(rgba: &[u8], width: usize, height: usize) -> (Vec<u8>, Vec<u8>) {
    rgba.chunks_exact(4)
        .take(width * height)
        .map(|px| (luma(px[0], px[1], px[2]), px[3]))
        .unzip()
}

/// Convert RGB to grayscale using parallel processing
/// Processes rows in parallel for multi-core speedup
pub fn rgb_to_grayscale_parallel(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut gray = vec![0u8; width * height];
    if width == 0 {
        return gray;
    }
    gray.par_chunks_mut(width)
        .zip(rgb.par_chunks(width * 3))
        .for_each(|(row, src)| {
            for (out, px) in row.iter_mut().zip(src.chunks_exact(3)) {
                *out = luma(px[0], px[1], px[2]);
            }
        });
    gray
}

/// Convert RGBA to luminance and alpha planes using parallel processing
pub fn rgba_to_luma_alpha_parallel(rgba: &[u8], width: usize, height: usize) -> (Vec<u8>, Vec<u8>) {
    let mut gray = vec![0u8; width * height];
    let mut alpha = vec![0u8; width * height];
    if width == 0 {
        return (gray, alpha);
    }
    gray.par_chunks_mut(width)
        .zip(alpha.par_chunks_mut(width))
        .zip(rgba.par_chunks(width * 4))
        .for_each(|((row, alpha_row), src)| {
            for ((out, a), px) in row.iter_mut().zip(alpha_row.iter_mut()).zip(src.chunks_exact(4)) {
                *out = luma(px[0], px[1], px[2]);
                *a = px[3];
            }
        });
    (gray, alpha)
}
