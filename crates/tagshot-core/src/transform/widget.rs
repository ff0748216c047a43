//! Resize/move/rotate widget state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::handle::Handle;
use super::pinch::{PinchGesture, PinchPreview};
use crate::config::PinchConfig;
use crate::geometry::{AbsoluteRect, Point};
use crate::gesture::{MovementTracker, PointerInput};
use crate::units::{degrees_to_rotation, number_to_pixels, pixels_to_number, rotation_degrees};

/// Errors raised when starting a transform gesture.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    /// Handles are hidden while the widget is only being viewed.
    #[error("Widget is not in edit mode")]
    NotEditing,

    /// A drag or pinch is already running on this widget.
    #[error("A gesture is already in progress")]
    GestureInProgress,
}

/// Whether the widget's handles are shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditMode {
    #[default]
    Viewing,
    Editing,
}

/// Inline style strings for an [`AbsoluteRect`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RectStyle {
    pub top: String,
    pub left: String,
    pub width: String,
    pub height: String,
    pub transform: String,
}

impl RectStyle {
    pub fn from_rect(rect: &AbsoluteRect) -> Self {
        Self {
            top: number_to_pixels(rect.top),
            left: number_to_pixels(rect.left),
            width: number_to_pixels(rect.width),
            height: number_to_pixels(rect.height),
            transform: degrees_to_rotation(rect.rotation),
        }
    }

    /// Read the geometry back. Unparseable values become zero.
    pub fn to_rect(&self) -> AbsoluteRect {
        AbsoluteRect::new(
            pixels_to_number(&self.top),
            pixels_to_number(&self.left),
            pixels_to_number(&self.width),
            pixels_to_number(&self.height),
            rotation_degrees(Some(&self.transform)),
        )
    }
}

#[derive(Debug, Clone)]
struct ActiveDrag {
    handle: Handle,
    preview: AbsoluteRect,
    tracker: MovementTracker,
}

/// Gesture state of one resizable, rotatable widget.
///
/// The widget does not own the committed rectangle. A drag starts from the
/// owner's rectangle, keeps a private preview while it runs, and hands the
/// final preview back on release. Cancelling discards it.
#[derive(Debug, Clone, Default)]
pub struct TransformWidget {
    mode: EditMode,
    drag: Option<ActiveDrag>,
    pinch: Option<PinchGesture>,
}

impl TransformWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Show or hide the handles. Leaving edit mode cancels any gesture.
    pub fn set_mode(&mut self, mode: EditMode) {
        if mode == EditMode::Viewing {
            self.cancel();
        }
        self.mode = mode;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_pinching(&self) -> bool {
        self.pinch.is_some()
    }

    /// Handle of the running drag.
    pub fn active_handle(&self) -> Option<Handle> {
        self.drag.as_ref().map(|drag| drag.handle)
    }

    /// Start dragging `handle` from the committed rectangle `from`.
    pub fn begin(&mut self, handle: Handle, from: AbsoluteRect) -> Result<(), TransformError> {
        if self.mode != EditMode::Editing {
            return Err(TransformError::NotEditing);
        }
        if self.drag.is_some() || self.pinch.is_some() {
            return Err(TransformError::GestureInProgress);
        }
        self.drag = Some(ActiveDrag {
            handle,
            preview: from,
            tracker: MovementTracker::new(),
        });
        Ok(())
    }

    /// Apply a pointer sample to the preview and return it.
    pub fn drag(&mut self, input: &PointerInput) -> Option<AbsoluteRect> {
        let drag = self.drag.as_mut()?;
        let delta = drag.tracker.movement(input);
        drag.preview = drag.handle.apply(&drag.preview, delta);
        Some(drag.preview)
    }

    /// Current preview, while a drag runs.
    pub fn preview(&self) -> Option<AbsoluteRect> {
        self.drag.as_ref().map(|drag| drag.preview)
    }

    /// Preview as inline style, while a drag runs.
    pub fn preview_style(&self) -> Option<RectStyle> {
        self.preview().map(|rect| RectStyle::from_rect(&rect))
    }

    /// End the drag and return the rectangle to commit.
    pub fn release(&mut self) -> Option<AbsoluteRect> {
        self.drag.take().map(|drag| drag.preview)
    }

    /// Drop any running gesture without producing a commit.
    pub fn cancel(&mut self) {
        self.drag = None;
        self.pinch = None;
    }

    /// Start a two-finger pinch. Returns `Ok(false)` when the contacts do not
    /// form a pinch.
    pub fn pinch_start(
        &mut self,
        touches: &[Point],
        config: &PinchConfig,
    ) -> Result<bool, TransformError> {
        if self.drag.is_some() || self.pinch.is_some() {
            return Err(TransformError::GestureInProgress);
        }
        self.pinch = PinchGesture::start(touches, config.clone());
        Ok(self.pinch.is_some())
    }

    pub fn pinch_move(&mut self, touches: &[Point], native_scale: Option<f64>) -> Option<PinchPreview> {
        self.pinch.as_mut()?.update(touches, native_scale)
    }

    /// End the pinch. The preview is visual only, nothing is committed.
    pub fn pinch_end(&mut self) -> Option<PinchPreview> {
        self.pinch.take().map(|pinch| pinch.preview())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editing() -> TransformWidget {
        let mut widget = TransformWidget::new();
        widget.set_mode(EditMode::Editing);
        widget
    }

    fn rect() -> AbsoluteRect {
        AbsoluteRect::new(20.0, 20.0, 120.0, 25.0, 0.0)
    }

    fn mouse(dx: f64, dy: f64) -> PointerInput {
        PointerInput::mouse(Point::default(), Point::new(dx, dy))
    }

    #[test]
    fn test_begin_requires_edit_mode() {
        let mut widget = TransformWidget::new();
        assert_eq!(
            widget.begin(Handle::Move, rect()),
            Err(TransformError::NotEditing)
        );
    }

    #[test]
    fn test_second_begin_is_rejected() {
        let mut widget = editing();
        widget.begin(Handle::Move, rect()).unwrap();
        assert_eq!(
            widget.begin(Handle::Right, rect()),
            Err(TransformError::GestureInProgress)
        );
        assert_eq!(widget.active_handle(), Some(Handle::Move));
    }

    #[test]
    fn test_drag_accumulates_preview() {
        let mut widget = editing();
        widget.begin(Handle::BottomRight, rect()).unwrap();
        widget.drag(&mouse(5.0, 2.0));
        let preview = widget.drag(&mouse(5.0, 3.0)).unwrap();
        assert_eq!(preview, AbsoluteRect::new(20.0, 20.0, 130.0, 30.0, 0.0));

        assert_eq!(widget.release(), Some(preview));
        assert!(!widget.is_dragging());
        assert_eq!(widget.release(), None);
    }

    #[test]
    fn test_touch_drag_uses_position_deltas() {
        let mut widget = editing();
        widget.begin(Handle::Move, rect()).unwrap();
        widget.drag(&PointerInput::touch(Point::new(100.2, 100.0)));
        let preview = widget
            .drag(&PointerInput::touch(Point::new(110.0, 95.4)))
            .unwrap();
        assert_eq!(preview.left, 30.0);
        assert_eq!(preview.top, 15.0);
    }

    #[test]
    fn test_drag_without_begin_is_ignored() {
        let mut widget = editing();
        assert_eq!(widget.drag(&mouse(5.0, 5.0)), None);
    }

    #[test]
    fn test_leaving_edit_mode_cancels() {
        let mut widget = editing();
        widget.begin(Handle::Rotate, rect()).unwrap();
        widget.drag(&mouse(3.0, 4.0));
        widget.set_mode(EditMode::Viewing);
        assert!(!widget.is_dragging());
        assert_eq!(widget.release(), None);
    }

    #[test]
    fn test_preview_style() {
        let mut widget = editing();
        widget.begin(Handle::Rotate, rect()).unwrap();
        widget.drag(&mouse(3.0, 4.0));
        let style = widget.preview_style().unwrap();
        assert_eq!(style.width, "120px");
        assert_eq!(style.transform, "rotate(5deg)");
        assert_eq!(style.to_rect(), AbsoluteRect::new(20.0, 20.0, 120.0, 25.0, 5.0));
    }

    #[test]
    fn test_style_with_missing_transform_reads_zero_rotation() {
        let style = RectStyle {
            top: "1px".into(),
            left: "2px".into(),
            width: "3px".into(),
            height: "4px".into(),
            transform: String::new(),
        };
        assert_eq!(style.to_rect(), AbsoluteRect::new(1.0, 2.0, 3.0, 4.0, 0.0));
    }

    #[test]
    fn test_pinch_blocks_drag() {
        let mut widget = editing();
        let started = widget
            .pinch_start(
                &[Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
                &PinchConfig::default(),
            )
            .unwrap();
        assert!(started);
        assert_eq!(
            widget.begin(Handle::Move, rect()),
            Err(TransformError::GestureInProgress)
        );

        let preview = widget
            .pinch_move(&[Point::new(-50.0, 0.0), Point::new(150.0, 0.0)], None)
            .unwrap();
        assert_eq!(preview.scale, 2.0);
        assert_eq!(widget.pinch_end(), Some(preview));
        assert!(!widget.is_pinching());
    }

    #[test]
    fn test_single_touch_does_not_pinch() {
        let mut widget = editing();
        let started = widget
            .pinch_start(&[Point::new(0.0, 0.0)], &PinchConfig::default())
            .unwrap();
        assert!(!started);
        assert!(widget.begin(Handle::Move, rect()).is_ok());
    }
}
