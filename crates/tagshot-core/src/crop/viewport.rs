//! Mapping the committed crop box into each layer's natural pixel space.

use thiserror::Error;

use crate::geometry::ClientRect;
use crate::layer::{Layer, Viewport};

/// Errors raised while committing a crop to the layers.
#[derive(Debug, Error, PartialEq)]
pub enum ViewportError {
    /// The layer's rendered image could not be measured.
    #[error("No rendered image for layer {0}")]
    MissingImage(String),

    /// The layer or its rendered image has no area.
    #[error("Layer {id} has a zero-sized image")]
    DegenerateImage { id: String },

    /// The image is not drawn with the same scale on both axes.
    #[error("Layer {id} is scaled non-uniformly ({width_ratio} horizontally, {height_ratio} vertically)")]
    NonUniformScale {
        id: String,
        width_ratio: f64,
        height_ratio: f64,
    },
}

/// Map a crop box onto one layer.
///
/// `block` and `image` are the measured client rectangles of the crop box
/// and of the layer's rendered image. The render ratio is taken from the
/// height; the width-based ratio must agree within `tolerance` (relative).
/// The result is not clamped to the natural image bounds.
///
/// # Example
///
/// ```ignore
/// let layer = Layer::new("a", uri, 2000, 2000);
/// let image = ClientRect::new(10.0, 10.0, 500.0, 500.0);
/// let block = ClientRect::new(60.0, 60.0, 100.0, 100.0);
/// let viewport = map_viewport(&layer, &block, &image, 0.01)?;
/// assert_eq!(viewport, Viewport::new(200.0, 200.0, 400.0, 400.0));
/// ```
pub fn map_viewport(
    layer: &Layer,
    block: &ClientRect,
    image: &ClientRect,
    tolerance: f64,
) -> Result<Viewport, ViewportError> {
    if layer.natural_width == 0
        || layer.natural_height == 0
        || image.width <= 0.0
        || image.height <= 0.0
    {
        return Err(ViewportError::DegenerateImage {
            id: layer.id.clone(),
        });
    }

    let height_ratio = image.height / layer.natural_height as f64;
    let width_ratio = image.width / layer.natural_width as f64;

    if (width_ratio - height_ratio).abs() > tolerance * height_ratio {
        return Err(ViewportError::NonUniformScale {
            id: layer.id.clone(),
            width_ratio,
            height_ratio,
        });
    }

    let ratio = height_ratio;
    Ok(Viewport::new(
        (block.left - image.left) / ratio,
        (block.top - image.top) / ratio,
        block.width / ratio,
        block.height / ratio,
    ))
}

/// Commit a crop box to every layer.
///
/// `measure` returns the client rectangle of a layer's rendered image. All
/// viewports are computed before any layer is touched, so a failure leaves
/// every layer unchanged.
pub fn commit_crop<F>(
    layers: &mut [Layer],
    block: &ClientRect,
    tolerance: f64,
    mut measure: F,
) -> Result<(), ViewportError>
where
    F: FnMut(&Layer) -> Option<ClientRect>,
{
    let viewports = layers
        .iter()
        .map(|layer| {
            let image =
                measure(layer).ok_or_else(|| ViewportError::MissingImage(layer.id.clone()))?;
            map_viewport(layer, block, &image, tolerance)
        })
        .collect::<Result<Vec<_>, _>>()?;

    for (layer, viewport) in layers.iter_mut().zip(viewports) {
        log::debug!("layer {} viewport {:?}", layer.id, viewport);
        layer.viewport = viewport;
    }
    Ok(())
}
