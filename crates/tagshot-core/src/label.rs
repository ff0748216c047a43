//! Text labels placed over the composited image.
//!
//! [`LabelBoard`] owns every label's committed geometry plus one
//! [`TransformWidget`] per label. At most one label is focused, and only the
//! focused label is in [`EditMode::Editing`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{EditorConfig, LabelDefaults, PinchConfig};
use crate::geometry::{AbsoluteRect, Point};
use crate::gesture::PointerInput;
use crate::transform::{EditMode, Handle, PinchPreview, TransformError, TransformWidget};

/// Identifier of a label, unique within one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelId(pub u32);

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "label-{}", self.0)
    }
}

/// Errors raised by label operations.
#[derive(Debug, Error, PartialEq)]
pub enum LabelError {
    #[error("Unknown label {0}")]
    UnknownLabel(LabelId),

    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// A text label's committed state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLayer {
    pub id: LabelId,
    pub width: f64,
    pub height: f64,
    pub top: f64,
    pub left: f64,
    pub rotation: f64,
    pub font_size: f64,
    pub font_family: String,
}

impl TextLayer {
    fn with_defaults(id: LabelId, defaults: &LabelDefaults) -> Self {
        Self {
            id,
            width: defaults.width,
            height: defaults.height,
            top: defaults.top,
            left: defaults.left,
            rotation: 0.0,
            font_size: defaults.font_size,
            font_family: defaults.font_family.clone(),
        }
    }

    pub fn rect(&self) -> AbsoluteRect {
        AbsoluteRect::new(self.top, self.left, self.width, self.height, self.rotation)
    }

    fn set_rect(&mut self, rect: AbsoluteRect) {
        self.top = rect.top;
        self.left = rect.left;
        self.width = rect.width;
        self.height = rect.height;
        self.rotation = rect.rotation;
    }
}

/// Focus transition caused by pressing a label.
///
/// `blurred` left edit mode before `focused` entered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusChange {
    pub blurred: Option<LabelId>,
    pub focused: LabelId,
}

#[derive(Debug, Clone)]
struct Entry {
    layer: TextLayer,
    widget: TransformWidget,
}

/// Ordered collection of labels with a single focus.
#[derive(Debug, Clone)]
pub struct LabelBoard {
    entries: Vec<Entry>,
    focused: Option<LabelId>,
    next_id: u32,
    defaults: LabelDefaults,
    pinch: PinchConfig,
}

impl Default for LabelBoard {
    fn default() -> Self {
        Self::new(LabelDefaults::default(), PinchConfig::default())
    }
}

impl LabelBoard {
    pub fn new(defaults: LabelDefaults, pinch: PinchConfig) -> Self {
        Self {
            entries: Vec::new(),
            focused: None,
            next_id: 1,
            defaults,
            pinch,
        }
    }

    /// Board using the label and pinch settings of `config`.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.labels.clone(), config.pinch.clone())
    }

    /// Append a label with the default geometry and font.
    pub fn add_label(&mut self) -> LabelId {
        let id = LabelId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            layer: TextLayer::with_defaults(id, &self.defaults),
            widget: TransformWidget::new(),
        });
        log::debug!("added {}", id);
        id
    }

    /// Remove a label, dropping any gesture it was running.
    pub fn remove_label(&mut self, id: LabelId) -> Result<TextLayer, LabelError> {
        let index = self.index_of(id)?;
        if self.focused == Some(id) {
            self.focused = None;
        }
        Ok(self.entries.remove(index).layer)
    }

    pub fn labels(&self) -> impl Iterator<Item = &TextLayer> {
        self.entries.iter().map(|entry| &entry.layer)
    }

    pub fn label(&self, id: LabelId) -> Option<&TextLayer> {
        self.entry(id).map(|entry| &entry.layer)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn focused(&self) -> Option<LabelId> {
        self.focused
    }

    pub fn mode_of(&self, id: LabelId) -> Option<EditMode> {
        self.entry(id).map(|entry| entry.widget.mode())
    }

    /// Pointer down on a label body.
    ///
    /// Focuses the label if needed and arms a move, so the same gesture
    /// both selects and drags.
    pub fn press_label(&mut self, id: LabelId) -> Result<FocusChange, LabelError> {
        let change = self.focus(id)?;
        let entry = self.entry_mut(id)?;
        let rect = entry.layer.rect();
        entry.widget.begin(Handle::Move, rect)?;
        Ok(change)
    }

    /// Pointer down outside every label: leave edit mode.
    pub fn press_background(&mut self) -> Option<LabelId> {
        let blurred = self.focused.take();
        if let Some(id) = blurred {
            if let Ok(entry) = self.entry_mut(id) {
                entry.widget.set_mode(EditMode::Viewing);
            }
        }
        blurred
    }

    /// Start dragging one of the focused label's handles.
    pub fn begin_handle(&mut self, id: LabelId, handle: Handle) -> Result<(), LabelError> {
        let entry = self.entry_mut(id)?;
        let rect = entry.layer.rect();
        entry.widget.begin(handle, rect)?;
        Ok(())
    }

    /// Feed a pointer sample to the running drag.
    pub fn drag(&mut self, input: &PointerInput) -> Option<(LabelId, AbsoluteRect)> {
        let entry = self.focused_entry_mut()?;
        let id = entry.layer.id;
        entry.widget.drag(input).map(|rect| (id, rect))
    }

    /// Current drag preview of the focused label.
    pub fn preview(&self) -> Option<(LabelId, AbsoluteRect)> {
        let entry = self.entry(self.focused?)?;
        entry.widget.preview().map(|rect| (entry.layer.id, rect))
    }

    /// End the running drag and commit its geometry into the label.
    pub fn release(&mut self) -> Option<TextLayer> {
        let entry = self.focused_entry_mut()?;
        let rect = entry.widget.release()?;
        entry.layer.set_rect(rect);
        log::debug!("committed {} at {:?}", entry.layer.id, rect);
        Some(entry.layer.clone())
    }

    /// Abandon the running gesture; the label keeps its committed geometry.
    pub fn cancel(&mut self) {
        if let Some(entry) = self.focused_entry_mut() {
            entry.widget.cancel();
        }
    }

    /// Two contacts touched a label. Focuses it without arming a move.
    ///
    /// Returns `Ok(false)` if the contacts do not form a pinch.
    pub fn pinch_start(&mut self, id: LabelId, touches: &[Point]) -> Result<bool, LabelError> {
        self.focus(id)?;
        let pinch = self.pinch.clone();
        let entry = self.entry_mut(id)?;
        // A one-finger touch on the same label may already have armed a move.
        entry.widget.cancel();
        Ok(entry.widget.pinch_start(touches, &pinch)?)
    }

    pub fn pinch_move(&mut self, touches: &[Point], native_scale: Option<f64>) -> Option<PinchPreview> {
        self.focused_entry_mut()?
            .widget
            .pinch_move(touches, native_scale)
    }

    /// End the pinch. Nothing is committed.
    pub fn pinch_end(&mut self) -> Option<PinchPreview> {
        self.focused_entry_mut()?.widget.pinch_end()
    }

    /// Committed geometry of every label, in board order.
    pub fn publish_geometry(&self) -> Vec<AbsoluteRect> {
        self.labels().map(TextLayer::rect).collect()
    }

    fn focus(&mut self, id: LabelId) -> Result<FocusChange, LabelError> {
        self.index_of(id)?;
        if self.focused == Some(id) {
            return Ok(FocusChange {
                blurred: None,
                focused: id,
            });
        }

        let blurred = self.press_background();
        self.entry_mut(id)?.widget.set_mode(EditMode::Editing);
        self.focused = Some(id);
        Ok(FocusChange {
            blurred,
            focused: id,
        })
    }

    fn index_of(&self, id: LabelId) -> Result<usize, LabelError> {
        self.entries
            .iter()
            .position(|entry| entry.layer.id == id)
            .ok_or(LabelError::UnknownLabel(id))
    }

    fn entry(&self, id: LabelId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.layer.id == id)
    }

    fn entry_mut(&mut self, id: LabelId) -> Result<&mut Entry, LabelError> {
        self.entries
            .iter_mut()
            .find(|entry| entry.layer.id == id)
            .ok_or(LabelError::UnknownLabel(id))
    }

    fn focused_entry_mut(&mut self) -> Option<&mut Entry> {
        let id = self.focused?;
        self.entry_mut(id).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> LabelBoard {
        LabelBoard::new(LabelDefaults::default(), PinchConfig::default())
    }

    fn mouse(dx: f64, dy: f64) -> PointerInput {
        PointerInput::mouse(Point::default(), Point::new(dx, dy))
    }

    #[test]
    fn test_new_label_uses_defaults() {
        let mut board = board();
        let id = board.add_label();
        let label = board.label(id).unwrap();
        assert_eq!(label.rect(), AbsoluteRect::new(20.0, 20.0, 120.0, 25.0, 0.0));
        assert_eq!(label.font_size, 16.0);
        assert_eq!(board.mode_of(id), Some(EditMode::Viewing));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut board = board();
        let a = board.add_label();
        board.remove_label(a).unwrap();
        let b = board.add_label();
        assert_ne!(a, b);
        assert_eq!(b.to_string(), "label-2");
    }

    #[test]
    fn test_press_focuses_and_moves() {
        let mut board = board();
        let id = board.add_label();

        let change = board.press_label(id).unwrap();
        assert_eq!(change, FocusChange { blurred: None, focused: id });
        assert_eq!(board.mode_of(id), Some(EditMode::Editing));

        board.drag(&mouse(10.0, 5.0));
        let committed = board.release().unwrap();
        assert_eq!(committed.left, 30.0);
        assert_eq!(committed.top, 25.0);
        assert_eq!(board.label(id).unwrap().left, 30.0);
    }

    #[test]
    fn test_focus_is_exclusive() {
        let mut board = board();
        let a = board.add_label();
        let b = board.add_label();

        board.press_label(a).unwrap();
        board.release();
        let change = board.press_label(b).unwrap();

        assert_eq!(change, FocusChange { blurred: Some(a), focused: b });
        assert_eq!(board.mode_of(a), Some(EditMode::Viewing));
        assert_eq!(board.mode_of(b), Some(EditMode::Editing));
        assert_eq!(board.focused(), Some(b));
    }

    #[test]
    fn test_switching_focus_mid_drag_discards_preview() {
        let mut board = board();
        let a = board.add_label();
        let b = board.add_label();

        board.press_label(a).unwrap();
        board.drag(&mouse(50.0, 50.0));
        board.press_label(b).unwrap();

        assert_eq!(board.label(a).unwrap().left, 20.0);
    }

    #[test]
    fn test_background_press_blurs() {
        let mut board = board();
        let id = board.add_label();
        board.press_label(id).unwrap();
        board.release();

        assert_eq!(board.press_background(), Some(id));
        assert_eq!(board.mode_of(id), Some(EditMode::Viewing));
        assert_eq!(board.focused(), None);
        assert_eq!(board.press_background(), None);
    }

    #[test]
    fn test_handle_requires_focus() {
        let mut board = board();
        let id = board.add_label();
        assert_eq!(
            board.begin_handle(id, Handle::Right),
            Err(LabelError::Transform(TransformError::NotEditing))
        );
    }

    #[test]
    fn test_resize_commits_on_release_only() {
        let mut board = board();
        let id = board.add_label();
        board.press_label(id).unwrap();
        board.release();

        board.begin_handle(id, Handle::Right).unwrap();
        let (_, preview) = board.drag(&mouse(30.0, 0.0)).unwrap();
        assert_eq!(preview.width, 150.0);
        assert_eq!(board.label(id).unwrap().width, 120.0);

        board.release();
        assert_eq!(board.label(id).unwrap().width, 150.0);
    }

    #[test]
    fn test_cancel_keeps_committed() {
        let mut board = board();
        let id = board.add_label();
        board.press_label(id).unwrap();
        board.drag(&mouse(10.0, 10.0));
        board.cancel();
        assert_eq!(board.release(), None);
        assert_eq!(board.label(id).unwrap().left, 20.0);
    }

    #[test]
    fn test_unknown_label() {
        let mut board = board();
        assert_eq!(
            board.press_label(LabelId(9)),
            Err(LabelError::UnknownLabel(LabelId(9)))
        );
        assert!(board.remove_label(LabelId(9)).is_err());
    }

    #[test]
    fn test_remove_focused_label() {
        let mut board = board();
        let id = board.add_label();
        board.press_label(id).unwrap();
        board.remove_label(id).unwrap();
        assert_eq!(board.focused(), None);
        assert!(board.is_empty());
        assert_eq!(board.drag(&mouse(1.0, 1.0)), None);
    }

    #[test]
    fn test_pinch_is_visual_only() {
        let mut board = board();
        let id = board.add_label();
        let touches = [Point::new(0.0, 0.0), Point::new(100.0, 0.0)];

        assert!(board.pinch_start(id, &touches).unwrap());
        assert_eq!(board.mode_of(id), Some(EditMode::Editing));

        let preview = board
            .pinch_move(&[Point::new(-100.0, 0.0), Point::new(200.0, 0.0)], None)
            .unwrap();
        assert_eq!(preview.scale, 3.0);
        assert!(board.pinch_end().is_some());
        assert_eq!(
            board.label(id).unwrap().rect(),
            AbsoluteRect::new(20.0, 20.0, 120.0, 25.0, 0.0)
        );
    }

    #[test]
    fn test_publish_geometry_in_board_order() {
        let mut board = board();
        let a = board.add_label();
        board.add_label();
        board.press_label(a).unwrap();
        board.drag(&mouse(0.0, 100.0));
        board.release();

        let geometry = board.publish_geometry();
        assert_eq!(geometry.len(), 2);
        assert_eq!(geometry[0].top, 120.0);
        assert_eq!(geometry[1].top, 20.0);
    }
}
