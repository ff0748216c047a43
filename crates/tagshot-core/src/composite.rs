//! Drawing the cropped layers onto the output canvas.
//!
//! Each layer contributes its committed [`Viewport`], scaled to fill the
//! canvas. Parts of a viewport outside the source image are left
//! transparent (black in the RGB output), the same way a 2D canvas clips
//! `drawImage` source rectangles.

use serde::{Deserialize, Serialize};

use crate::decode::{crop_region, resize, DecodeError, FilterType, Raster};
use crate::layer::Viewport;

/// Size and horizontal offset of the output canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasPlacement {
    pub width: f64,
    pub height: f64,
    /// Offset that centers the canvas in its container, whole pixels.
    pub margin_left: f64,
}

impl CanvasPlacement {
    /// Canvas size in whole pixels, at least 1x1.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width.round() as u32).max(1),
            (self.height.round() as u32).max(1),
        )
    }
}

/// Fit a viewport's aspect ratio into the canvas container.
///
/// The canvas keeps `canvas_width` unless the resulting height would exceed
/// `container_height`, in which case both sides shrink.
///
/// # Arguments
///
/// * `canvas_width` - Current rendered width of the canvas
/// * `container_width` / `container_height` - Size of the element holding it
/// * `viewport` - Viewport of the layer that sets the aspect ratio
pub fn canvas_placement(
    canvas_width: f64,
    container_width: f64,
    container_height: f64,
    viewport: &Viewport,
) -> CanvasPlacement {
    if viewport.is_empty() {
        return CanvasPlacement {
            width: 0.0,
            height: 0.0,
            margin_left: (container_width / 2.0).round(),
        };
    }

    let scale = canvas_width / viewport.width;
    let mut width = canvas_width;
    let mut height = viewport.height * scale;

    if height > container_height {
        width *= container_height / height;
        height = container_height;
    }

    CanvasPlacement {
        width,
        height,
        margin_left: ((container_width - width) / 2.0).round(),
    }
}

/// Draw every layer's viewport onto a new canvas, in order.
///
/// Later layers paint over earlier ones. Layers without a committed
/// viewport, or whose viewport misses the image entirely, are skipped.
///
/// # Errors
///
/// Returns `DecodeError::CorruptedFile` for a layer whose pixel buffer does
/// not match its dimensions, and propagates resize failures.
pub fn composite(
    layers: &[(Raster, Viewport)],
    placement: &CanvasPlacement,
    filter: FilterType,
) -> Result<Raster, DecodeError> {
    let (canvas_width, canvas_height) = placement.pixel_size();
    let mut canvas = Raster::blank(canvas_width, canvas_height);

    for (index, (source, viewport)) in layers.iter().enumerate() {
        if viewport.is_empty() || source.is_empty() {
            log::debug!("layer {} has nothing to draw", index);
            continue;
        }
        let Some(visible) = viewport.clamped(source.width, source.height) else {
            log::debug!("layer {} viewport lies outside the image", index);
            continue;
        };

        let scale_x = canvas_width as f64 / viewport.width;
        let scale_y = canvas_height as f64 / viewport.height;
        let dest_x = ((visible.x - viewport.x) * scale_x).round() as i64;
        let dest_y = ((visible.y - viewport.y) * scale_y).round() as i64;
        let dest_width = ((visible.width * scale_x).round() as u32).max(1);
        let dest_height = ((visible.height * scale_y).round() as u32).max(1);

        // Source pixels covering every fractional edge of the visible area.
        let (left, top) = (visible.x.floor(), visible.y.floor());
        let right = (visible.x + visible.width).ceil();
        let bottom = (visible.y + visible.height).ceil();
        let region = crop_region(
            source,
            left as u32,
            top as u32,
            (right - left) as u32,
            (bottom - top) as u32,
        )?;
        let scaled = resize(&region, dest_width, dest_height, filter)?;
        blit(&mut canvas, &scaled, dest_x, dest_y);
    }

    Ok(canvas)
}

/// Copy `source` into `target` at `(x, y)`, clipping at the target edges.
fn blit(target: &mut Raster, source: &Raster, x: i64, y: i64) {
    for row in 0..source.height as i64 {
        let ty = y + row;
        if ty < 0 || ty >= target.height as i64 {
            continue;
        }
        let first = x.max(0);
        let last = (x + source.width as i64).min(target.width as i64);
        if first >= last {
            return;
        }

        let src_start = ((row * source.width as i64 + (first - x)) * 3) as usize;
        let dst_start = ((ty * target.width as i64 + first) * 3) as usize;
        let len = ((last - first) * 3) as usize;
        target.pixels[dst_start..dst_start + len]
            .copy_from_slice(&source.pixels[src_start..src_start + len]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, color: [u8; 3]) -> Raster {
        let pixels = color
            .iter()
            .copied()
            .cycle()
            .take((width * height * 3) as usize)
            .collect();
        Raster::new(width, height, pixels)
    }

    #[test]
    fn test_placement_keeps_width() {
        let placement = canvas_placement(400.0, 500.0, 600.0, &Viewport::new(0.0, 0.0, 200.0, 100.0));
        assert_eq!(placement.width, 400.0);
        assert_eq!(placement.height, 200.0);
        assert_eq!(placement.margin_left, 50.0);
    }

    #[test]
    fn test_placement_shrinks_to_container_height() {
        let placement = canvas_placement(400.0, 400.0, 300.0, &Viewport::new(0.0, 0.0, 100.0, 200.0));
        assert_eq!(placement.height, 300.0);
        assert_eq!(placement.width, 150.0);
        assert_eq!(placement.margin_left, 125.0);
    }

    #[test]
    fn test_placement_empty_viewport() {
        let placement = canvas_placement(400.0, 400.0, 300.0, &Viewport::default());
        assert_eq!(placement.pixel_size(), (1, 1));
    }

    #[test]
    fn test_composite_scales_viewport_to_canvas() {
        let source = solid(100, 100, [200, 10, 10]);
        let placement = CanvasPlacement {
            width: 20.0,
            height: 20.0,
            margin_left: 0.0,
        };
        let canvas = composite(
            &[(source, Viewport::new(25.0, 25.0, 50.0, 50.0))],
            &placement,
            FilterType::Nearest,
        )
        .unwrap();

        assert_eq!((canvas.width, canvas.height), (20, 20));
        assert_eq!(canvas.pixel(0, 0), Some([200, 10, 10]));
        assert_eq!(canvas.pixel(19, 19), Some([200, 10, 10]));
    }

    #[test]
    fn test_composite_clips_outside_image() {
        let source = solid(10, 10, [255, 255, 255]);
        let placement = CanvasPlacement {
            width: 20.0,
            height: 20.0,
            margin_left: 0.0,
        };
        // Left half of the viewport lies outside the image.
        let canvas = composite(
            &[(source, Viewport::new(-10.0, 0.0, 20.0, 10.0))],
            &placement,
            FilterType::Nearest,
        )
        .unwrap();

        assert_eq!(canvas.pixel(5, 5), Some([0, 0, 0]));
        assert_eq!(canvas.pixel(15, 5), Some([255, 255, 255]));
    }

    #[test]
    fn test_composite_rejects_short_buffer() {
        let placement = CanvasPlacement {
            width: 4.0,
            height: 4.0,
            margin_left: 0.0,
        };
        let source = Raster {
            width: 4,
            height: 4,
            pixels: vec![0u8; 3],
        };
        let result = composite(
            &[(source, Viewport::new(0.0, 0.0, 4.0, 4.0))],
            &placement,
            FilterType::Nearest,
        );
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_composite_fractional_viewport_covers_edges() {
        // Columns 0..2 are red, column 3 is blue.
        let mut source = solid(4, 1, [255, 0, 0]);
        source.pixels[9..12].copy_from_slice(&[0, 0, 255]);
        let placement = CanvasPlacement {
            width: 4.0,
            height: 1.0,
            margin_left: 0.0,
        };
        // Spans x 0.6..3.4, so the sampled region must reach column 3.
        let canvas = composite(
            &[(source, Viewport::new(0.6, 0.0, 2.8, 1.0))],
            &placement,
            FilterType::Nearest,
        )
        .unwrap();
        assert_eq!(canvas.pixel(3, 0), Some([0, 0, 255]));
    }

    #[test]
    fn test_later_layers_paint_over() {
        let placement = CanvasPlacement {
            width: 4.0,
            height: 4.0,
            margin_left: 0.0,
        };
        let viewport = Viewport::new(0.0, 0.0, 4.0, 4.0);
        let canvas = composite(
            &[
                (solid(4, 4, [1, 1, 1]), viewport),
                (solid(4, 4, [9, 9, 9]), viewport),
            ],
            &placement,
            FilterType::Nearest,
        )
        .unwrap();
        assert_eq!(canvas.pixel(2, 2), Some([9, 9, 9]));
    }

    #[test]
    fn test_uncropped_layer_is_skipped() {
        let placement = CanvasPlacement {
            width: 4.0,
            height: 4.0,
            margin_left: 0.0,
        };
        let canvas = composite(
            &[(solid(4, 4, [7, 7, 7]), Viewport::default())],
            &placement,
            FilterType::Nearest,
        )
        .unwrap();
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0]));
    }

    #[test]
    fn test_blit_clips_negative_offset() {
        let mut target = Raster::blank(3, 3);
        blit(&mut target, &solid(2, 2, [5, 5, 5]), -1, -1);
        assert_eq!(target.pixel(0, 0), Some([5, 5, 5]));
        assert_eq!(target.pixel(1, 1), Some([0, 0, 0]));
    }
}
