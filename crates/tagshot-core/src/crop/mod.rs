//! Crop selection: a draggable box over the stacked layer images.
//!
//! The box is held as an [`InsetRect`](crate::geometry::InsetRect) relative to
//! the layer container. Four edge handles resize it, dragging the body moves
//! it, and four overlay panes darken everything outside it.
//!
//! # Preview and commit
//!
//! Pointer moves only update the rendered [`CropFrame`]. The committed
//! rectangle changes on release, after validation. An axis whose proposed
//! insets are negative or cross each other is rolled back as a whole to its
//! pre-drag values.
//!
//! # Coordinate Spaces
//!
//! - Client: viewport pixels, as delivered by pointer events
//! - Container-local: client minus the container's top-left corner
//! - Natural: the source image's own pixels (see [`viewport`])

mod engine;
mod frame;
pub mod layout;
pub mod viewport;

pub use engine::{validate_inset, CropBox, CropError, CropHandle};
pub use frame::{BoxStyle, CropFrame};
pub use layout::fit_image;
pub use viewport::{commit_crop, map_viewport, ViewportError};
