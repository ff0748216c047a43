//! WASM bindings for the label board.
//!
//! Label ids cross the boundary as plain numbers. Handle codes follow
//! [`Handle::from_code`]: 0 top-left, 1 top, 2 top-right, 3 left, 4 right,
//! 5 bottom-left, 6 bottom, 7 bottom-right, 8 move, 9 rotate.

use tagshot_core::geometry::Point;
use tagshot_core::gesture::{ListenerGuard, ListenerKind, PointerInput};
use tagshot_core::label::{LabelBoard, LabelId};
use tagshot_core::publish::encode_publish_path;
use tagshot_core::transform::{EditMode, Handle, RectStyle};
use wasm_bindgen::prelude::*;

use crate::config::JsEditorConfig;
use crate::types::{from_js, js_error, to_js, JsListeners};

/// Labels over the composited image, with single focus.
#[wasm_bindgen]
pub struct JsLabelBoard {
    inner: LabelBoard,
    separator: String,
    listeners: Option<ListenerGuard<JsListeners>>,
}

#[wasm_bindgen]
impl JsLabelBoard {
    #[wasm_bindgen(constructor)]
    pub fn new(config: &JsEditorConfig) -> JsLabelBoard {
        JsLabelBoard {
            inner: LabelBoard::from_config(config.inner()),
            separator: config.inner().publish.separator.clone(),
            listeners: None,
        }
    }

    /// Add a label with default geometry and return its id.
    pub fn add_label(&mut self) -> u32 {
        self.inner.add_label().0
    }

    pub fn remove_label(&mut self, id: u32) -> Result<(), JsValue> {
        if self.inner.focused() == Some(LabelId(id)) {
            self.listeners = None;
        }
        self.inner.remove_label(LabelId(id)).map_err(js_error)?;
        Ok(())
    }

    /// Every label's committed state, in order.
    pub fn labels(&self) -> Result<JsValue, JsValue> {
        let labels: Vec<_> = self.inner.labels().collect();
        to_js(&labels)
    }

    /// Id of the label in edit mode, if any.
    #[wasm_bindgen(getter)]
    pub fn focused(&self) -> Option<u32> {
        self.inner.focused().map(|id| id.0)
    }

    pub fn is_editing(&self, id: u32) -> bool {
        self.inner.mode_of(LabelId(id)) == Some(EditMode::Editing)
    }

    /// Pointer down on a label body: focus it and start moving it.
    ///
    /// Returns `{blurred, focused}`.
    pub fn press_label(
        &mut self,
        id: u32,
        attach: js_sys::Function,
        detach: js_sys::Function,
    ) -> Result<JsValue, JsValue> {
        let change = self.inner.press_label(LabelId(id)).map_err(js_error)?;
        self.listen(attach, detach, ListenerKind::Drag);
        to_js(&change)
    }

    /// Pointer down outside every label. Returns the blurred label id.
    pub fn press_background(&mut self) -> Option<u32> {
        self.listeners = None;
        self.inner.press_background().map(|id| id.0)
    }

    /// Pointer down on one of the focused label's handles.
    pub fn begin_handle(
        &mut self,
        id: u32,
        handle: u8,
        attach: js_sys::Function,
        detach: js_sys::Function,
    ) -> Result<(), JsValue> {
        let handle = parse_handle(handle).map_err(js_error)?;
        self.inner
            .begin_handle(LabelId(id), handle)
            .map_err(js_error)?;
        self.listen(attach, detach, ListenerKind::Drag);
        Ok(())
    }

    /// Feed a pointer sample. Returns the preview style
    /// `{top, left, width, height, transform}` or `undefined`.
    pub fn drag(&mut self, input: JsValue) -> Result<JsValue, JsValue> {
        let input: PointerInput = from_js(input)?;
        match self.inner.drag(&input) {
            Some((_, rect)) => to_js(&RectStyle::from_rect(&rect)),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// End the drag. Returns the committed label or `undefined`.
    pub fn release(&mut self) -> Result<JsValue, JsValue> {
        self.listeners = None;
        match self.inner.release() {
            Some(label) => to_js(&label),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    pub fn cancel(&mut self) {
        self.listeners = None;
        self.inner.cancel();
    }

    /// Two fingers went down on a label. `touches` is `[{x, y}, {x, y}]`.
    pub fn pinch_start(
        &mut self,
        id: u32,
        touches: JsValue,
        attach: js_sys::Function,
        detach: js_sys::Function,
    ) -> Result<bool, JsValue> {
        let touches: Vec<Point> = from_js(touches)?;
        let started = self
            .inner
            .pinch_start(LabelId(id), &touches)
            .map_err(js_error)?;
        if started {
            self.listen(attach, detach, ListenerKind::Pinch);
        }
        Ok(started)
    }

    /// Returns the CSS transform for the pinch preview, if two fingers are
    /// still down.
    pub fn pinch_move(
        &mut self,
        touches: JsValue,
        native_scale: Option<f64>,
    ) -> Result<Option<String>, JsValue> {
        let touches: Vec<Point> = from_js(touches)?;
        Ok(self
            .inner
            .pinch_move(&touches, native_scale)
            .map(|preview| preview.css_transform()))
    }

    pub fn pinch_end(&mut self) {
        self.listeners = None;
        self.inner.pinch_end();
    }

    /// Publish path for the current labels and a hosted image path.
    pub fn publish_path(&self, remote_path: &str) -> String {
        encode_publish_path(&self.inner.publish_geometry(), remote_path, &self.separator)
    }

    #[wasm_bindgen(getter)]
    pub fn is_listening(&self) -> bool {
        self.listeners
            .as_ref()
            .is_some_and(|guard| guard.is_attached())
    }
}

impl JsLabelBoard {
    /// Replace any previous listeners with a fresh guard.
    fn listen(&mut self, attach: js_sys::Function, detach: js_sys::Function, kind: ListenerKind) {
        self.listeners = None;
        self.listeners = Some(ListenerGuard::attach(JsListeners::new(attach, detach), kind));
    }
}

fn parse_handle(code: u8) -> Result<Handle, String> {
    Handle::from_code(code).ok_or_else(|| format!("Unknown label handle {}", code))
}
