use image::GrayAlphaImage;
use log::debug;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::decoder::config;
use crate::decoder::qr_decoder::QrDecoder;
use crate::decoder::scanner::ImageScanner;
use crate::error::{ErrorKind, Result};
use crate::models::Segment;
use crate::utils::binarization::otsu_threshold;
use crate::utils::pixel_source::PixelSource;

/// Load an image file as luminance and alpha.
pub fn load_luma_alpha<P: AsRef<Path>>(path: P) -> Result<GrayAlphaImage> {
    Ok(image::open(path)?.to_luma_alpha8())
}

/// Run `decode` with the configured threshold, then once more with an Otsu
/// threshold if the symbol could not be located.
fn with_threshold_retry<S, T>(
    source: &S,
    decode: impl Fn(&mut QrDecoder<ImageScanner<'_, S>>) -> Result<T>,
) -> Result<T>
where
    S: PixelSource + ?Sized,
{
    let threshold = config::luminance_threshold();
    match decode(&mut QrDecoder::new(ImageScanner::with_threshold(source, threshold))) {
        Err(err) if matches!(err.kind(), ErrorKind::Geometry | ErrorKind::IllegalVersion) => {
            let estimated = otsu_threshold(source);
            if estimated == threshold {
                return Err(err);
            }
            debug!("retrying with threshold {estimated} after: {err}");
            decode(&mut QrDecoder::new(ImageScanner::with_threshold(source, estimated)))
        }
        other => other,
    }
}

/// Decode the first segment, retrying with an estimated threshold on a
/// geometry failure.
pub fn decode_with_retry<S: PixelSource + ?Sized>(source: &S) -> Result<Segment> {
    with_threshold_retry(source, |decoder| decoder.first())
}

/// Decode every segment, retrying with an estimated threshold on a geometry
/// failure.
pub fn decode_all_with_retry<S: PixelSource + ?Sized>(source: &S) -> Result<Vec<Segment>> {
    with_threshold_retry(source, |decoder| decoder.decode_all())
}

/// Decode the first segment of the QR code in an image file.
pub fn read<P: AsRef<Path>>(path: P) -> Result<Segment> {
    decode_with_retry(&load_luma_alpha(path)?)
}

/// Decode every segment of the QR code in an image file.
pub fn read_all<P: AsRef<Path>>(path: P) -> Result<Vec<Segment>> {
    decode_all_with_retry(&load_luma_alpha(path)?)
}

/// Decode many image files in parallel, one scanner per image.
pub fn read_many<P: AsRef<Path> + Sync>(paths: &[P]) -> Vec<Result<Segment>> {
    paths.par_iter().map(read).collect()
}

/// Image files under `root`, recursively, sorted by path.
pub fn collect_images<P: AsRef<Path>>(root: P) -> Vec<PathBuf> {
    let mut stack = vec![root.as_ref().to_path_buf()];
    let mut images = Vec::new();

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            if let Some(ext) = path.extension() {
                let ext = ext.to_string_lossy().to_lowercase();
                if matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "bmp") {
                    images.push(path);
                }
            }
        }
    }

    images.sort();
    images
}
