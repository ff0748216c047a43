//! Resize, move and rotate gestures for labels.
//!
//! A [`TransformWidget`] wraps one label. In edit mode it exposes ten
//! [`Handle`]s: four corners, four edges, the body (move) and a rotation
//! knob. Each pointer sample is applied to a private preview rectangle; the
//! owner only sees a new rectangle when the drag is released.
//!
//! # Handle effects
//!
//! Deltas are the pointer movement since the previous sample.
//!
//! | Handle       | top | left | width | height |
//! |--------------|-----|------|-------|--------|
//! | top-left     | +dy | +dx  | -dx   | -dy    |
//! | top          | +dy |      |       | -dy    |
//! | left         |     | +dx  | -dx   |        |
//! | right        |     |      | +dx   |        |
//! | bottom       |     |      |       | +dy    |
//! | bottom-left  |     | +dx  | -dx   | +dy    |
//! | top-right    | +dy |      | +dx   | -dy    |
//! | bottom-right |     |      | +dx   | +dy    |
//! | move         | +dy | +dx  |       |        |
//!
//! The rotation knob adds `hypot(dx, dy)` degrees, signed by `dx`.
//!
//! A two-finger pinch ([`PinchGesture`]) is a separate, visual-only path.

mod handle;
mod pinch;
mod widget;

pub use handle::Handle;
pub use pinch::{PinchGesture, PinchPreview};
pub use widget::{EditMode, RectStyle, TransformError, TransformWidget};
