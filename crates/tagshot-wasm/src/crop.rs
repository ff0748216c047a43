//! WASM bindings for the crop box.
//!
//! The UI forwards raw pointer samples; the box answers with the styles to
//! apply. Global move/release listeners are attached through the callbacks
//! passed to `begin` and detached on release, cancel or when the box is
//! freed.

use tagshot_core::crop::{fit_image, CropBox, CropHandle};
use tagshot_core::geometry::{ContainerDimension, Point};
use tagshot_core::gesture::{ListenerGuard, ListenerKind, PointerInput, ReleaseInput};
use wasm_bindgen::prelude::*;

use crate::config::JsEditorConfig;
use crate::types::{from_js, js_error, to_js, JsListeners};

/// Crop selection over the layer container.
#[wasm_bindgen]
pub struct JsCropBox {
    inner: CropBox,
    listeners: Option<ListenerGuard<JsListeners>>,
}

#[wasm_bindgen]
impl JsCropBox {
    /// Create the box for a measured container (`getBoundingClientRect`).
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: f64,
        height: f64,
        left: f64,
        top: f64,
        config: &JsEditorConfig,
    ) -> JsCropBox {
        let container = ContainerDimension::new(width, height, left, top);
        JsCropBox {
            inner: CropBox::from_config(container, config.inner()),
            listeners: None,
        }
    }

    /// Start a gesture on a handle (0 = top, 1 = right, 2 = bottom,
    /// 3 = left, 4 = body).
    ///
    /// `attach` is called with `"drag"` right away and `detach` once the
    /// gesture ends.
    pub fn begin(
        &mut self,
        handle: u8,
        client_x: f64,
        client_y: f64,
        attach: js_sys::Function,
        detach: js_sys::Function,
    ) -> Result<(), JsValue> {
        let handle = CropHandle::from_code(handle)
            .ok_or_else(|| js_error(format!("Unknown crop handle {}", handle)))?;
        self.inner
            .begin(handle, Point::new(client_x, client_y))
            .map_err(js_error)?;
        self.listeners = Some(ListenerGuard::attach(
            JsListeners::new(attach, detach),
            ListenerKind::Drag,
        ));
        Ok(())
    }

    /// Feed a pointer sample (`{kind: "mouse", client, movement}` or
    /// `{kind: "touch", touches}`). Returns whether the frame changed.
    pub fn drag(&mut self, input: JsValue) -> Result<bool, JsValue> {
        let input: PointerInput = from_js(input)?;
        Ok(self.inner.drag(&input))
    }

    /// Finish the gesture. Returns the committed insets.
    pub fn release(&mut self, input: JsValue) -> Result<JsValue, JsValue> {
        let input: ReleaseInput = from_js(input)?;
        let committed = self.inner.release(&input);
        self.listeners = None;
        to_js(&committed)
    }

    /// Abandon the gesture and restore the committed frame.
    pub fn cancel(&mut self) {
        self.inner.cancel();
        self.listeners = None;
    }

    #[wasm_bindgen(getter)]
    pub fn is_dragging(&self) -> bool {
        self.inner.is_dragging()
    }

    /// Whether the global drag listeners are currently attached.
    #[wasm_bindgen(getter)]
    pub fn is_listening(&self) -> bool {
        self.listeners
            .as_ref()
            .is_some_and(|guard| guard.is_attached())
    }

    /// Styles for the box, panes and handles.
    pub fn frame(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.frame())
    }

    /// Committed insets `{left, top, right, bottom}`.
    pub fn committed(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.committed())
    }

    /// Committed selection in viewport coordinates.
    pub fn block_rect(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.block_rect())
    }

    /// Where an image of the given natural size is drawn in the container.
    pub fn fit_image(&self, natural_width: u32, natural_height: u32) -> Result<JsValue, JsValue> {
        to_js(&fit_image(
            self.inner.container(),
            natural_width,
            natural_height,
        ))
    }
}
