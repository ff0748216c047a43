//! Raster resizing, used when drawing a viewport onto the canvas.
//!
//! Uses the `image` crate's algorithms and returns new `Raster` instances
//! without modifying the input.

use super::{DecodeError, FilterType, Raster};

/// Resize a raster to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` for a zero target size and
/// `DecodeError::CorruptedFile` if the pixel buffer does not match the
/// declared dimensions.
pub fn resize(
    image: &Raster,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<Raster, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbImage".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(Raster::from_rgb_image(resized))
}

/// Copy a sub-rectangle out of a raster.
///
/// The region is clamped to the raster bounds and is at least 1x1. An empty
/// raster yields an empty raster.
///
/// # Errors
///
/// Returns `DecodeError::CorruptedFile` if the pixel buffer does not match the
/// declared dimensions.
pub fn crop_region(
    image: &Raster,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Result<Raster, DecodeError> {
    if !image.has_valid_buffer() {
        return Err(DecodeError::CorruptedFile(format!(
            "{}x{} raster carries {} bytes",
            image.width,
            image.height,
            image.pixels.len()
        )));
    }
    if image.is_empty() {
        return Ok(Raster::new(0, 0, Vec::new()));
    }
    let x = x.min(image.width.saturating_sub(1));
    let y = y.min(image.height.saturating_sub(1));
    let out_width = width.min(image.width - x).max(1);
    let out_height = height.min(image.height - y).max(1);

    let mut output = Vec::with_capacity((out_width * out_height * 3) as usize);
    for row in y..y + out_height {
        let start = ((row * image.width + x) * 3) as usize;
        let end = start + (out_width * 3) as usize;
        output.extend_from_slice(&image.pixels[start..end]);
    }

    Ok(Raster::new(out_width, out_height, output))
}
