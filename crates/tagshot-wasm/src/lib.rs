//! Tagshot WASM - WebAssembly bindings for Tagshot
//!
//! This crate exposes the tagshot-core crop box, label board, publish path
//! codec and compositor to the browser UI.
//!
//! # Module Structure
//!
//! - `config` - Editor configuration
//! - `crop` - Crop box driven by raw pointer samples
//! - `labels` - Label board with resize/move/rotate and pinch gestures
//! - `layers` - Layer admission, crop commit and compositing
//! - `publish` - Publish path encoding and parsing
//! - `types` - Shared wrapper types and conversions
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropBox, JsEditorConfig } from '@tagshot/wasm';
//!
//! await init();
//!
//! const rect = container.getBoundingClientRect();
//! const crop = new JsCropBox(rect.width, rect.height, rect.left, rect.top, new JsEditorConfig());
//! crop.begin(4, event.clientX, event.clientY, attachListeners, detachListeners);
//! ```

use wasm_bindgen::prelude::*;

mod config;
mod crop;
mod labels;
mod layers;
mod logging;
mod publish;
mod types;

pub use config::JsEditorConfig;
pub use crop::JsCropBox;
pub use labels::JsLabelBoard;
pub use layers::{canvas_placement, commit_crop, decode_image, layer_from_data_uri, JsCompositor};
pub use logging::set_log_level;
pub use publish::{data_uri_payload, encode_publish_path, parse_publish_path, remote_image_path};
pub use types::JsRaster;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::install(log::LevelFilter::Warn);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_init_twice() {
        init();
        init();
        assert_eq!(log::max_level(), log::LevelFilter::Warn);
    }
}
