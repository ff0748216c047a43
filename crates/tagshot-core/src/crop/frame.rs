//! Rendered positions of the crop box, its handles and overlay panes.

use serde::{Deserialize, Serialize};

use crate::geometry::InsetRect;
use crate::units::number_to_pixels;

/// Absolutely positioned box, as a subset of CSS offset properties.
///
/// `None` means the property is left to the stylesheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl BoxStyle {
    /// CSS declarations for every property that is set, in a stable order.
    pub fn css(&self) -> Vec<(&'static str, String)> {
        [
            ("left", self.left),
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("width", self.width),
            ("height", self.height),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, number_to_pixels(v))))
        .collect()
    }
}

/// Everything drawn for the crop selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropFrame {
    pub block: BoxStyle,
    pub left_pane: BoxStyle,
    pub right_pane: BoxStyle,
    pub top_pane: BoxStyle,
    pub bottom_pane: BoxStyle,
    pub left_handle: BoxStyle,
    pub right_handle: BoxStyle,
    pub top_handle: BoxStyle,
    pub bottom_handle: BoxStyle,
    #[serde(skip)]
    handle_offset: f64,
}

impl CropFrame {
    /// Create a frame with the panes anchored to their container edges.
    ///
    /// `handle_offset` is how far each edge handle sits outside the border.
    pub fn new(handle_offset: f64) -> Self {
        let anchored = |left, top, right, bottom| BoxStyle {
            left,
            top,
            right,
            bottom,
            ..BoxStyle::default()
        };
        Self {
            block: BoxStyle::default(),
            left_pane: anchored(Some(0.0), Some(0.0), None, Some(0.0)),
            right_pane: anchored(None, Some(0.0), Some(0.0), Some(0.0)),
            top_pane: anchored(None, Some(0.0), None, None),
            bottom_pane: anchored(None, None, None, Some(0.0)),
            left_handle: BoxStyle::default(),
            right_handle: BoxStyle::default(),
            top_handle: BoxStyle::default(),
            bottom_handle: BoxStyle::default(),
            handle_offset,
        }
    }

    /// Render `rect`, skipping any axis with a negative inset.
    ///
    /// A skipped axis keeps whatever was rendered for it last.
    pub fn render(&mut self, rect: &InsetRect) {
        if rect.horizontal_non_negative() {
            self.render_horizontal(rect.left, rect.right);
        }
        if rect.vertical_non_negative() {
            self.render_vertical(rect.top, rect.bottom);
        }
    }

    fn render_horizontal(&mut self, left: f64, right: f64) {
        self.left_pane.width = Some(left);
        self.right_pane.width = Some(right);
        for style in [
            &mut self.block,
            &mut self.top_pane,
            &mut self.bottom_pane,
            &mut self.top_handle,
            &mut self.bottom_handle,
        ] {
            style.left = Some(left);
            style.right = Some(right);
        }
        self.left_handle.left = Some(left - self.handle_offset);
        self.right_handle.right = Some(right - self.handle_offset);
    }

    fn render_vertical(&mut self, top: f64, bottom: f64) {
        self.top_pane.height = Some(top);
        self.bottom_pane.height = Some(bottom);
        for style in [&mut self.block, &mut self.left_handle, &mut self.right_handle] {
            style.top = Some(top);
            style.bottom = Some(bottom);
        }
        self.top_handle.top = Some(top - self.handle_offset);
        self.bottom_handle.bottom = Some(bottom - self.handle_offset);
    }
}
