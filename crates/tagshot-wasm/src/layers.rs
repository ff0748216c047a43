//! WASM bindings for layer admission, crop commit and compositing.

use tagshot_core::composite::{canvas_placement as core_placement, composite, CanvasPlacement};
use tagshot_core::crop::commit_crop as core_commit;
use tagshot_core::decode::{decode_data_uri, decode_raster, Raster};
use tagshot_core::geometry::ClientRect;
use tagshot_core::layer::{Layer, Viewport};
use wasm_bindgen::prelude::*;

use crate::types::{filter_from_u8, from_js, js_error, to_js, JsRaster};

/// Admit a data URI as a layer: `{id, imageData, naturalWidth, naturalHeight, viewPort*}`.
#[wasm_bindgen]
pub fn layer_from_data_uri(id: &str, uri: &str) -> Result<JsValue, JsValue> {
    let layer = Layer::from_data_uri(id, uri).map_err(js_error)?;
    to_js(&layer)
}

/// Commit the crop box to every layer.
///
/// `image_rects[i]` is the measured rectangle of `layers[i]`'s rendered
/// image, or `null` if it is not on screen. Returns the updated layers; on
/// error no layer is changed.
#[wasm_bindgen]
pub fn commit_crop(
    layers: JsValue,
    block: JsValue,
    image_rects: JsValue,
    tolerance: f64,
) -> Result<JsValue, JsValue> {
    let mut layers: Vec<Layer> = from_js(layers)?;
    let block: ClientRect = from_js(block)?;
    let image_rects: Vec<Option<ClientRect>> = from_js(image_rects)?;

    let mut rects = image_rects.into_iter();
    core_commit(&mut layers, &block, tolerance, |_| rects.next().flatten()).map_err(js_error)?;
    to_js(&layers)
}

/// Canvas size for a viewport (`{x, y, width, height}`), as
/// `{width, height, marginLeft}`.
#[wasm_bindgen]
pub fn canvas_placement(
    canvas_width: f64,
    container_width: f64,
    container_height: f64,
    viewport: JsValue,
) -> Result<JsValue, JsValue> {
    let viewport: Viewport = from_js(viewport)?;
    to_js(&core_placement(
        canvas_width,
        container_width,
        container_height,
        &viewport,
    ))
}

/// Decode the image carried by a data URI.
#[wasm_bindgen]
pub fn decode_image(uri: &str) -> Result<JsRaster, JsValue> {
    let bytes = decode_data_uri(uri).map_err(js_error)?;
    let raster = decode_raster(&bytes).map_err(js_error)?;
    Ok(JsRaster::from_raster(raster))
}

/// Collects cropped layers and draws them onto one canvas.
#[wasm_bindgen]
#[derive(Default)]
pub struct JsCompositor {
    layers: Vec<(Raster, Viewport)>,
}

#[wasm_bindgen]
impl JsCompositor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsCompositor {
        Self::default()
    }

    /// Queue a decoded layer with its committed viewport.
    pub fn add_layer(&mut self, image: &JsRaster, x: f64, y: f64, width: f64, height: f64) {
        self.layers
            .push((image.to_raster(), Viewport::new(x, y, width, height)));
    }

    #[wasm_bindgen(getter)]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Draw every queued layer onto a `width` x `height` canvas.
    ///
    /// `filter`: 0 = nearest, 1 = bilinear, 2 = lanczos3.
    pub fn render(&self, width: f64, height: f64, filter: u8) -> Result<JsRaster, JsValue> {
        let placement = CanvasPlacement {
            width,
            height,
            margin_left: 0.0,
        };
        let canvas = composite(&self.layers, &placement, filter_from_u8(filter)).map_err(js_error)?;
        Ok(JsRaster::from_raster(canvas))
    }
}
