//! WASM bindings for the publish path and upload payload.

use tagshot_core::decode::data_uri_payload as core_payload;
use tagshot_core::geometry::AbsoluteRect;
use tagshot_core::publish::{
    encode_publish_path as core_encode, parse_publish_path as core_parse,
    remote_image_path as core_remote,
};
use wasm_bindgen::prelude::*;

use crate::types::{from_js, js_error, to_js};

/// Encode label rectangles (`[{top, left, width, height, rotation}]`) and a
/// hosted image path into a publish path.
#[wasm_bindgen]
pub fn encode_publish_path(
    labels: JsValue,
    remote_path: &str,
    separator: &str,
) -> Result<String, JsValue> {
    let labels: Vec<AbsoluteRect> = from_js(labels)?;
    Ok(core_encode(&labels, remote_path, separator))
}

/// Parse a publish path into `{labels, imagePath}`.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const { labels, imagePath } = parse_publish_path(location.pathname, '/', '/image/');
/// ```
#[wasm_bindgen]
pub fn parse_publish_path(path: &str, prefix: &str, separator: &str) -> Result<JsValue, JsValue> {
    let parsed = core_parse(path, prefix, separator).map_err(js_error)?;
    let result = js_sys::Object::new();
    js_sys::Reflect::set(&result, &"labels".into(), &to_js(&parsed.labels)?)?;
    js_sys::Reflect::set(&result, &"imagePath".into(), &parsed.image_path.into())?;
    Ok(result.into())
}

/// Strip the host's viewer domain from a display URL.
#[wasm_bindgen]
pub fn remote_image_path(display_url: &str, viewer_domain: &str) -> String {
    core_remote(display_url, viewer_domain).to_string()
}

/// Base64 payload of a data URI, as submitted to the image host.
#[wasm_bindgen]
pub fn data_uri_payload(uri: &str) -> Result<String, JsValue> {
    core_payload(uri).map(str::to_string).map_err(js_error)
}
