use crate::utils::pixel_source::PixelSource;

/// Calculate Otsu's optimal threshold over the visible pixels of a source.
///
/// The result is the smallest luminance classed as light, so it can be handed
/// straight to [`PixelSource::is_dark`].
pub fn otsu_threshold<P: PixelSource + ?Sized>(source: &P) -> u8 {
    let mut histogram = [0u64; 256];
    for y in 0..source.height() {
        for x in 0..source.width() {
            match source.luma_alpha(x, y) {
                Some((luma, alpha)) if alpha > 0 => histogram[luma as usize] += 1,
                _ => {}
            }
        }
    }
    otsu_from_histogram(&histogram)
}

fn otsu_from_histogram(histogram: &[u64; 256]) -> u8 {
    let total: u64 = histogram.iter().sum();
    let total_sum: u64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &count)| i as u64 * count)
        .sum();

    let mut max_variance = 0.0;
    let mut optimal_threshold = 128u8;
    let mut dark_pixels = 0u64;
    let mut dark_sum = 0u64;

    // Everything below `threshold` is dark
    for threshold in 1..=255usize {
        dark_pixels += histogram[threshold - 1];
        dark_sum += (threshold as u64 - 1) * histogram[threshold - 1];
        let light_pixels = total - dark_pixels;
        if dark_pixels == 0 || light_pixels == 0 {
            continue;
        }

        let dark_mean = dark_sum as f64 / dark_pixels as f64;
        let light_mean = (total_sum - dark_sum) as f64 / light_pixels as f64;
        let weight_dark = dark_pixels as f64 / total as f64;
        let weight_light = light_pixels as f64 / total as f64;
        let variance = weight_dark * weight_light * (dark_mean - light_mean).powi(2);

        if variance > max_variance {
            max_variance = variance;
            optimal_threshold = threshold as u8;
        }
    }

    optimal_threshold
}
