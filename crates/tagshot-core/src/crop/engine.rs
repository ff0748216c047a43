//! Crop box state machine: edge drags, body moves, validation and commit.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::frame::CropFrame;
use crate::config::EditorConfig;
use crate::geometry::{ClientRect, ContainerDimension, InsetRect, Point};
use crate::gesture::{PointerInput, ReleaseInput};

/// Errors raised by the crop box.
#[derive(Debug, Error, PartialEq)]
pub enum CropError {
    /// Only one pointer sequence is tracked at a time.
    #[error("A crop gesture is already in progress")]
    GestureInProgress,
}

/// The interactive regions of the crop selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CropHandle {
    Top,
    Right,
    Bottom,
    Left,
    /// The box itself; dragging it moves the selection without resizing.
    Body,
}

impl CropHandle {
    /// Decode the numeric handle code used by the bindings.
    ///
    /// 0 = top, 1 = right, 2 = bottom, 3 = left, 4 = body.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(CropHandle::Top),
            1 => Some(CropHandle::Right),
            2 => Some(CropHandle::Bottom),
            3 => Some(CropHandle::Left),
            4 => Some(CropHandle::Body),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
enum CropDrag {
    Edge {
        handle: CropHandle,
        preview: InsetRect,
    },
    Body {
        /// Container-local pointer position when the drag started.
        origin: Point,
        preview: InsetRect,
    },
}

/// The crop selection over a layer container.
#[derive(Debug, Clone)]
pub struct CropBox {
    container: ContainerDimension,
    committed: InsetRect,
    frame: CropFrame,
    drag: Option<CropDrag>,
}

impl CropBox {
    /// Create the selection for a freshly measured container.
    ///
    /// The initial box is the largest centered square that fits.
    pub fn new(container: ContainerDimension, handle_offset: f64) -> Self {
        let side = container.width.min(container.height).max(0.0);
        let margin_x = (container.width - side) / 2.0;
        let margin_y = (container.height - side) / 2.0;
        let centered = InsetRect::new(margin_x, margin_y, margin_x, margin_y);

        let committed = validate_inset(&centered, &InsetRect::default(), &container);
        let mut frame = CropFrame::new(handle_offset);
        frame.render(&committed);

        Self {
            container,
            committed,
            frame,
            drag: None,
        }
    }

    pub fn container(&self) -> &ContainerDimension {
        &self.container
    }

    /// The last committed selection.
    pub fn committed(&self) -> &InsetRect {
        &self.committed
    }

    /// What should currently be drawn, including any live drag.
    pub fn frame(&self) -> &CropFrame {
        &self.frame
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Bounding box of the committed selection in viewport coordinates.
    pub fn block_rect(&self) -> ClientRect {
        ClientRect::from_inset(&self.committed, &self.container)
    }

    /// Crop box using the handle offset of `config`.
    pub fn from_config(container: ContainerDimension, config: &EditorConfig) -> Self {
        Self::new(container, config.crop.handle_offset)
    }

    /// Start dragging `handle` with the pointer at `client`.
    pub fn begin(&mut self, handle: CropHandle, client: Point) -> Result<(), CropError> {
        if self.drag.is_some() {
            return Err(CropError::GestureInProgress);
        }
        let preview = self.committed;
        self.drag = Some(match handle {
            CropHandle::Body => CropDrag::Body {
                origin: self.container.to_local(client),
                preview,
            },
            _ => CropDrag::Edge { handle, preview },
        });
        Ok(())
    }

    /// Apply a pointer move to the live frame.
    ///
    /// Returns `false` when the sample was ignored: no drag in progress, no
    /// touch contact, or an edge drag outside the container.
    pub fn drag(&mut self, input: &PointerInput) -> bool {
        let Some(client) = input.primary() else {
            return false;
        };
        let local = self.container.to_local(client);
        let container = self.container;
        let committed = self.committed;

        let preview = match &mut self.drag {
            None => return false,
            Some(CropDrag::Edge { handle, preview }) => {
                if !container.contains_local(local) {
                    return false;
                }
                match handle {
                    CropHandle::Top => preview.top = local.y,
                    CropHandle::Left => preview.left = local.x,
                    CropHandle::Bottom if local.y > 0.0 => {
                        preview.bottom = container.height - local.y;
                    }
                    CropHandle::Right if local.x > 0.0 => {
                        preview.right = container.width - local.x;
                    }
                    _ => return false,
                }
                *preview
            }
            Some(CropDrag::Body { origin, preview }) => {
                let movement = origin.delta_from(local);
                *preview = committed.translated(-movement.x, -movement.y);
                *preview
            }
        };

        self.frame.render(&preview);
        true
    }

    /// Finish the gesture and commit the validated rectangle.
    ///
    /// Edge drags commit their last rendered position. Body moves are
    /// recomputed from the release position; a touch release that carries
    /// no contact keeps the previous committed rectangle.
    pub fn release(&mut self, input: &ReleaseInput) -> InsetRect {
        match self.drag.take() {
            None => {}
            Some(CropDrag::Edge { preview, .. }) => self.commit(preview),
            Some(CropDrag::Body { origin, .. }) => match input.position() {
                Some(client) => {
                    let movement = origin.delta_from(self.container.to_local(client));
                    let moved = self.committed.translated(-movement.x, -movement.y);
                    self.commit(moved);
                }
                None => {
                    log::warn!("crop move ended without touch data; keeping previous selection");
                    self.frame.render(&self.committed);
                }
            },
        }
        self.committed
    }

    /// Abandon the gesture and redraw the committed selection.
    pub fn cancel(&mut self) {
        if self.drag.take().is_some() {
            self.frame.render(&self.committed);
        }
    }

    fn commit(&mut self, proposed: InsetRect) {
        let validated = validate_inset(&proposed, &self.committed, &self.container);
        if validated != proposed {
            log::debug!("crop selection {:?} rolled back to {:?}", proposed, validated);
        }
        self.committed = validated;
        self.frame.render(&self.committed);
    }
}

/// Validate a proposed selection against the previous one.
///
/// Each axis is checked independently. If either inset on an axis is
/// negative, or the two insets together exceed the container extent, both
/// insets on that axis revert to `original`.
pub fn validate_inset(
    proposed: &InsetRect,
    original: &InsetRect,
    container: &ContainerDimension,
) -> InsetRect {
    let mut result = *proposed;

    let horizontal_valid =
        proposed.horizontal_non_negative() && proposed.left + proposed.right <= container.width;
    if !horizontal_valid {
        result.left = original.left;
        result.right = original.right;
    }

    let vertical_valid =
        proposed.vertical_non_negative() && proposed.top + proposed.bottom <= container.height;
    if !vertical_valid {
        result.top = original.top;
        result.bottom = original.bottom;
    }

    result
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn container_strategy() -> impl Strategy<Value = ContainerDimension> {
        (1u32..=2000, 1u32..=2000, -500i32..=500, -500i32..=500).prop_map(|(w, h, l, t)| {
            ContainerDimension::new(w as f64, h as f64, l as f64, t as f64)
        })
    }

    fn handle_strategy() -> impl Strategy<Value = CropHandle> {
        prop_oneof![
            Just(CropHandle::Top),
            Just(CropHandle::Right),
            Just(CropHandle::Bottom),
            Just(CropHandle::Left),
            Just(CropHandle::Body),
        ]
    }

    proptest! {
        /// Property: the initial selection is a centered square of the shorter side.
        #[test]
        fn prop_initial_selection_centered_square(container in container_strategy()) {
            let crop = CropBox::new(container, 20.0);
            let rect = crop.committed();
            let side = container.width.min(container.height);

            prop_assert_eq!(rect.left, rect.right);
            prop_assert_eq!(rect.top, rect.bottom);
            prop_assert!((rect.width_within(container.width) - side).abs() < 1e-9);
            prop_assert!((rect.height_within(container.height) - side).abs() < 1e-9);
        }

        /// Property: any sequence of drags leaves a selection inside the container.
        #[test]
        fn prop_committed_selection_stays_inside(
            container in container_strategy(),
            gestures in prop::collection::vec(
                (handle_strategy(), -0.5f64..=1.5, -0.5f64..=1.5, -0.5f64..=1.5, -0.5f64..=1.5),
                1..12,
            ),
        ) {
            let mut crop = CropBox::new(container, 20.0);
            let at = |fx: f64, fy: f64| Point::new(
                container.left + fx * container.width,
                container.top + fy * container.height,
            );

            for (handle, sx, sy, ex, ey) in gestures {
                crop.begin(handle, at(sx, sy)).unwrap();
                crop.drag(&PointerInput::mouse(at(ex, ey), Point::default()));
                let rect = crop.release(&ReleaseInput::Mouse { client: at(ex, ey) });

                prop_assert!(rect.horizontal_non_negative());
                prop_assert!(rect.vertical_non_negative());
                prop_assert!(rect.left + rect.right <= container.width);
                prop_assert!(rect.top + rect.bottom <= container.height);
            }
        }

        /// Property: a commit that would make `left` negative restores both
        /// horizontal insets.
        #[test]
        fn prop_negative_left_rolls_back_axis(
            container in container_strategy(),
            overshoot in 1u32..=500,
        ) {
            let mut crop = CropBox::new(container, 20.0);
            let before = *crop.committed();
            let start = Point::new(container.left + container.width / 2.0, container.top);
            let end = Point::new(start.x - before.left - overshoot as f64, start.y);

            crop.begin(CropHandle::Body, start).unwrap();
            let after = crop.release(&ReleaseInput::Mouse { client: end });

            prop_assert_eq!(after.left, before.left);
            prop_assert_eq!(after.right, before.right);
        }
    }
}
