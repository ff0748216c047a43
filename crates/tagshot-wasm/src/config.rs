//! WASM binding for the editor configuration.

use tagshot_core::config::EditorConfig;
use wasm_bindgen::prelude::*;

use crate::types::{from_js, js_error, to_js};

/// Editor settings, shared by the crop box and the label board.
#[wasm_bindgen]
#[derive(Debug, Clone, Default)]
pub struct JsEditorConfig {
    inner: EditorConfig,
}

#[wasm_bindgen]
impl JsEditorConfig {
    /// Configuration with every default.
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsEditorConfig {
        Self::default()
    }

    /// Parse and validate a (possibly partial) configuration object.
    pub fn from_json(value: JsValue) -> Result<JsEditorConfig, JsValue> {
        let inner: EditorConfig = from_js(value)?;
        inner.validate().map_err(js_error)?;
        Ok(Self { inner })
    }

    /// Serialize to a plain object.
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner)
    }

    #[wasm_bindgen(getter)]
    pub fn ratio_tolerance(&self) -> f64 {
        self.inner.viewport.ratio_tolerance
    }

    #[wasm_bindgen(getter)]
    pub fn separator(&self) -> String {
        self.inner.publish.separator.clone()
    }
}

impl JsEditorConfig {
    pub(crate) fn inner(&self) -> &EditorConfig {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = JsEditorConfig::new();
        assert_eq!(config.ratio_tolerance(), 0.01);
        assert_eq!(config.separator(), "/image/");
        assert_eq!(config.inner().crop.handle_offset, 20.0);
    }
}
