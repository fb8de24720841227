/// Image decoding module
///
/// This module handles:
/// - Decoding image files and shrinking them to a bounding box
/// - The in-memory thumbnail cache used by the grid
/// - Full-size previews for the detached viewer

pub mod preview;
pub mod thumbnail;

use image::imageops::FilterType;
use image::DynamicImage;
use std::path::Path;

use crate::error::{BrowseError, BrowseResult};

/// Size of `(width, height)` scaled down to fit into `max_width` x `max_height`.
///
/// Aspect ratio is preserved, images that already fit are left alone and
/// neither side drops below one pixel.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width.max(1), height.max(1));
    }
    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let scale = f64::min(max_width as f64 / width as f64, max_height as f64 / height as f64);
    let new_width = ((width as f64 * scale).round() as u32).clamp(1, max_width.max(1));
    let new_height = ((height as f64 * scale).round() as u32).clamp(1, max_height.max(1));
    (new_width, new_height)
}

/// A decoded image converted to tightly packed RGBA8
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Decode `path` and shrink it into the given box using Lanczos3
pub fn decode_fitted(path: &Path, max_width: u32, max_height: u32) -> BrowseResult<DecodedImage> {
    let img = image::open(path).map_err(|source| BrowseError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let img = shrink(img, max_width, max_height);
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(DecodedImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

fn shrink(img: DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    let (width, height) = (img.width(), img.height());
    let (new_width, new_height) = fit_within(width, height, max_width, max_height);
    if (new_width, new_height) == (width, height) {
        img
    } else {
        img.resize_exact(new_width, new_height, FilterType::Lanczos3)
    }
}
