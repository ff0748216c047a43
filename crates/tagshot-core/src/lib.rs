//! Tagshot Core - crop and label engine
//!
//! This crate holds the editing logic behind Tagshot: a crop box over a stack
//! of images, resizable and rotatable text labels, the publish path that
//! carries label geometry, and the compositing of cropped layers onto a
//! canvas. It has no DOM dependency; the `tagshot-wasm` crate binds it to the
//! browser.
//!
//! # Flow
//!
//! 1. Images are admitted as [`Layer`]s from data URIs
//! 2. A [`CropBox`] selects a region; [`commit_crop`] maps it into each
//!    layer's natural pixel space
//! 3. [`composite`] draws the cropped layers onto a canvas
//! 4. A [`LabelBoard`] places labels; [`encode_publish_path`] encodes them

pub mod composite;
pub mod config;
pub mod crop;
pub mod decode;
pub mod geometry;
pub mod gesture;
pub mod label;
pub mod layer;
pub mod publish;
pub mod transform;
pub mod units;

pub use composite::{canvas_placement, composite, CanvasPlacement};
pub use config::{ConfigError, EditorConfig};
pub use crop::{commit_crop, fit_image, map_viewport, CropBox, CropError, CropHandle, ViewportError};
pub use decode::{DecodeError, FilterType, Raster};
pub use geometry::{AbsoluteRect, ClientRect, ContainerDimension, InsetRect, Point};
pub use gesture::{ListenerGuard, ListenerKind, ListenerSet, PointerInput, ReleaseInput};
pub use label::{FocusChange, LabelBoard, LabelError, LabelId, TextLayer};
pub use layer::{Layer, Viewport};
pub use publish::{encode_publish_path, parse_publish_path, PublishError, PublishedImage};
pub use transform::{EditMode, Handle, TransformError, TransformWidget};
