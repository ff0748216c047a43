//! Uploaded images and the source rectangle each one contributes.

use serde::{Deserialize, Serialize};

use crate::decode::{decode_data_uri, probe_dimensions, DecodeError};

/// Source rectangle in an image's natural pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the viewport has a drawable area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Intersection with the image bounds `[0, width] x [0, height]`.
    ///
    /// Returns `None` when the viewport lies entirely outside the image.
    pub fn clamped(&self, natural_width: u32, natural_height: u32) -> Option<Viewport> {
        let x0 = self.x.max(0.0);
        let y0 = self.y.max(0.0);
        let x1 = (self.x + self.width).min(natural_width as f64);
        let y1 = (self.y + self.height).min(natural_height as f64);

        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Viewport::new(x0, y0, x1 - x0, y1 - y0))
    }
}

/// One selected image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub id: String,
    /// The image as a data URI, as read from the file input.
    pub image_data: String,
    pub natural_width: u32,
    pub natural_height: u32,
    /// Zero until a crop is committed.
    #[serde(flatten, with = "viewport_fields")]
    pub viewport: Viewport,
}

impl Layer {
    pub fn new(
        id: impl Into<String>,
        image_data: impl Into<String>,
        natural_width: u32,
        natural_height: u32,
    ) -> Self {
        Self {
            id: id.into(),
            image_data: image_data.into(),
            natural_width,
            natural_height,
            viewport: Viewport::default(),
        }
    }

    /// Admit a data URI as a layer, reading its natural size from the payload.
    pub fn from_data_uri(id: impl Into<String>, uri: &str) -> Result<Self, DecodeError> {
        let bytes = decode_data_uri(uri)?;
        let (width, height) = probe_dimensions(&bytes)?;
        Ok(Self::new(id, uri, width, height))
    }

    /// Whether a crop has been committed for this layer.
    pub fn is_cropped(&self) -> bool {
        !self.viewport.is_empty()
    }
}

/// Wire format keeps the flat `viewPortX`/`viewPortY`/... fields the UI uses.
mod viewport_fields {
    use super::Viewport;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Flat {
        #[serde(default)]
        view_port_x: f64,
        #[serde(default)]
        view_port_y: f64,
        #[serde(default)]
        view_port_width: f64,
        #[serde(default)]
        view_port_height: f64,
    }

    pub fn serialize<S: Serializer>(viewport: &Viewport, serializer: S) -> Result<S::Ok, S::Error> {
        Flat {
            view_port_x: viewport.x,
            view_port_y: viewport.y,
            view_port_width: viewport.width,
            view_port_height: viewport.height,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Viewport, D::Error> {
        let flat = Flat::deserialize(deserializer)?;
        Ok(Viewport::new(
            flat.view_port_x,
            flat.view_port_y,
            flat.view_port_width,
            flat.view_port_height,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::test_support::png_data_uri;

    #[test]
    fn test_new_layer_has_no_viewport() {
        let layer = Layer::new("a", "data:image/png;base64,", 10, 20);
        assert!(!layer.is_cropped());
        assert_eq!(layer.viewport, Viewport::default());
    }

    #[test]
    fn test_from_data_uri_reads_dimensions() {
        let uri = png_data_uri(12, 9);
        let layer = Layer::from_data_uri("photo", &uri).unwrap();
        assert_eq!(layer.id, "photo");
        assert_eq!((layer.natural_width, layer.natural_height), (12, 9));
        assert_eq!(layer.image_data, uri);
    }

    #[test]
    fn test_from_data_uri_rejects_plain_url() {
        assert!(matches!(
            Layer::from_data_uri("x", "https://example.com/x.png"),
            Err(DecodeError::NotDataUri)
        ));
    }

    #[test]
    fn test_viewport_clamped_inside() {
        let viewport = Viewport::new(10.0, 10.0, 20.0, 20.0);
        assert_eq!(viewport.clamped(100, 100), Some(viewport));
    }

    #[test]
    fn test_viewport_clamped_partial() {
        let viewport = Viewport::new(-10.0, 90.0, 50.0, 50.0);
        assert_eq!(
            viewport.clamped(100, 100),
            Some(Viewport::new(0.0, 90.0, 40.0, 10.0))
        );
    }

    #[test]
    fn test_viewport_clamped_outside() {
        let viewport = Viewport::new(150.0, 0.0, 20.0, 20.0);
        assert_eq!(viewport.clamped(100, 100), None);
    }

    #[test]
    fn test_layer_wire_format() {
        let mut layer = Layer::new("a", "data:", 4, 3);
        layer.viewport = Viewport::new(1.0, 2.0, 3.0, 4.0);
        let json = serde_json::to_value(&layer).unwrap();

        assert_eq!(json["naturalWidth"], 4);
        assert_eq!(json["viewPortX"], 1.0);
        assert_eq!(json["viewPortHeight"], 4.0);

        let back: Layer = serde_json::from_value(json).unwrap();
        assert_eq!(back, layer);
    }

    #[test]
    fn test_layer_without_viewport_fields_deserializes() {
        let json = r#"{ "id": "a", "imageData": "", "naturalWidth": 2, "naturalHeight": 2 }"#;
        let layer: Layer = serde_json::from_str(json).unwrap();
        assert!(!layer.is_cropped());
    }
}
