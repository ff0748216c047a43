//! Placement of layer images inside the crop container.

use crate::geometry::{ClientRect, ContainerDimension};

/// Where an image of the given natural size is drawn inside `container`.
///
/// The image keeps its aspect ratio and is centered. A portrait container
/// fits the image to its width, otherwise to its height; the result is then
/// shrunk until it fits on both axes. The returned rectangle is in viewport
/// coordinates, like a measured bounding box.
pub fn fit_image(
    container: &ContainerDimension,
    natural_width: u32,
    natural_height: u32,
) -> ClientRect {
    if natural_width == 0 || natural_height == 0 {
        return ClientRect::new(container.left, container.top, 0.0, 0.0);
    }

    let ratio = natural_width as f64 / natural_height as f64;
    let is_portrait = container.width < container.height;

    let (mut width, mut height) = if is_portrait {
        (container.width, container.width / ratio)
    } else {
        (container.height * ratio, container.height)
    };

    if height > container.height {
        let scale = container.height / height;
        height = container.height;
        width *= scale;
    }
    if width > container.width {
        let scale = container.width / width;
        width = container.width;
        height *= scale;
    }

    let margin_x = (container.width - width) / 2.0;
    let margin_y = (container.height - height) / 2.0;

    ClientRect::new(
        container.left + margin_x,
        container.top + margin_y,
        width,
        height,
    )
}
