//! Two-finger pinch preview.
//!
//! The pinch scales and translates the widget visually. It never changes the
//! committed rectangle.

use serde::{Deserialize, Serialize};

use crate::config::PinchConfig;
use crate::geometry::Point;

/// Live visual transform produced by a pinch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinchPreview {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl Default for PinchPreview {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale: 1.0,
        }
    }
}

impl PinchPreview {
    /// CSS `transform` value for the preview.
    pub fn css_transform(&self) -> String {
        format!(
            "translate3d({}px,{}px,0) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

/// State captured when exactly two contacts touch down.
#[derive(Debug, Clone, PartialEq)]
pub struct PinchGesture {
    start_midpoint: Point,
    start_distance: f64,
    config: PinchConfig,
    last: PinchPreview,
}

impl PinchGesture {
    /// Start a pinch. Returns `None` unless exactly two distinct contacts
    /// are active.
    pub fn start(touches: &[Point], config: PinchConfig) -> Option<Self> {
        let [first, second] = touches else {
            return None;
        };
        let start_distance = first.distance_to(*second);
        if start_distance <= 0.0 {
            return None;
        }
        Some(Self {
            start_midpoint: first.midpoint(*second),
            start_distance,
            config,
            last: PinchPreview::default(),
        })
    }

    /// Preview for the current contacts.
    ///
    /// `native_scale` is the platform's own gesture scale, when the event
    /// carries a finite one; otherwise the ratio of contact distances is used. Returns
    /// `None`, and keeps the previous preview, unless two contacts are active.
    pub fn update(&mut self, touches: &[Point], native_scale: Option<f64>) -> Option<PinchPreview> {
        let [first, second] = touches else {
            return None;
        };

        let raw_scale = native_scale
            .filter(|scale| scale.is_finite())
            .unwrap_or_else(|| first.distance_to(*second) / self.start_distance);
        // max/min rather than clamp: an unvalidated range must not panic.
        let scale = raw_scale
            .max(self.config.min_scale)
            .min(self.config.max_scale);

        // Doubled because the midpoint moves half as far as each finger.
        let shift = first.midpoint(*second).delta_from(self.start_midpoint);
        self.last = PinchPreview {
            translate_x: shift.x * 2.0,
            translate_y: shift.y * 2.0,
            scale,
        };
        Some(self.last)
    }

    /// Most recent preview.
    pub fn preview(&self) -> PinchPreview {
        self.last
    }
}
