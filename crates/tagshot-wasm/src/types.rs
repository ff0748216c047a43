//! WASM-compatible wrapper types shared by the bindings.

use std::fmt::Display;

use tagshot_core::decode::{FilterType, Raster};
use tagshot_core::gesture::{ListenerKind, ListenerSet};
use wasm_bindgen::prelude::*;

/// An RGB raster for JavaScript.
///
/// The pixel data stays in WASM memory; `pixels()` copies it out as a
/// `Uint8Array`.
#[wasm_bindgen]
pub struct JsRaster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRaster {
    /// Create a raster from RGB pixel data (3 bytes per pixel, row-major).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRaster {
        JsRaster {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Copy of the RGB pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// RGBA copy of the pixels, ready for `new ImageData(...)`.
    pub fn rgba_pixels(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.pixels.len() / 3 * 4);
        for rgb in self.pixels.chunks_exact(3) {
            rgba.extend_from_slice(rgb);
            rgba.push(255);
        }
        rgba
    }
}

impl JsRaster {
    pub(crate) fn from_raster(raster: Raster) -> Self {
        Self {
            width: raster.width,
            height: raster.height,
            pixels: raster.pixels,
        }
    }

    /// Convert back to a core raster. Clones the pixel data.
    pub(crate) fn to_raster(&self) -> Raster {
        Raster {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// Convert a u8 filter value to the core FilterType.
///
/// 0 = Nearest, 1 = Bilinear, 2 = Lanczos3. Anything else is Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}

/// Turn a core error into a JavaScript `Error`.
pub(crate) fn js_error(err: impl Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Serialize a value for JavaScript as plain objects (maps included).
pub(crate) fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(js_error)
}

/// Deserialize a value coming from JavaScript.
pub(crate) fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(js_error)
}

/// Global listeners provided by the UI as a pair of callbacks.
///
/// Both are called with the listener kind (`"drag"` or `"pinch"`).
#[derive(Clone)]
pub(crate) struct JsListeners {
    attach: js_sys::Function,
    detach: js_sys::Function,
}

impl JsListeners {
    pub(crate) fn new(attach: js_sys::Function, detach: js_sys::Function) -> Self {
        Self { attach, detach }
    }

    fn call(callback: &js_sys::Function, kind: ListenerKind) {
        if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(kind.as_str())) {
            log::warn!("{} listener callback failed: {:?}", kind.as_str(), err);
        }
    }
}

impl ListenerSet for JsListeners {
    fn attach(&mut self, kind: ListenerKind) {
        Self::call(&self.attach, kind);
    }

    fn detach(&mut self, kind: ListenerKind) {
        Self::call(&self.detach, kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_raster_creation() {
        let img = JsRaster::new(100, 50, vec![0u8; 100 * 50 * 3]);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.byte_length(), 15000);
    }

    #[test]
    fn test_rgba_pixels() {
        let img = JsRaster::new(2, 1, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(img.rgba_pixels(), vec![1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn test_raster_round_trip() {
        let raster = Raster::blank(4, 3);
        let js = JsRaster::from_raster(raster);
        let back = js.to_raster();
        assert_eq!((back.width, back.height), (4, 3));
        assert_eq!(back.pixels.len(), 36);
    }

    #[test]
    fn test_filter_from_u8() {
        assert!(matches!(filter_from_u8(0), FilterType::Nearest));
        assert!(matches!(filter_from_u8(1), FilterType::Bilinear));
        assert!(matches!(filter_from_u8(2), FilterType::Lanczos3));
        assert!(matches!(filter_from_u8(255), FilterType::Bilinear));
    }
}
