//! Resize, move and rotate handles and their effect on a rectangle.

use serde::{Deserialize, Serialize};

use crate::geometry::{AbsoluteRect, Point};

/// Interactive region of a transform widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Handle {
    TopLeft,
    Top,
    TopRight,
    Left,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
    /// The widget body.
    Move,
    Rotate,
}

impl Handle {
    /// All handles, in code order.
    pub const ALL: [Handle; 10] = [
        Handle::TopLeft,
        Handle::Top,
        Handle::TopRight,
        Handle::Left,
        Handle::Right,
        Handle::BottomLeft,
        Handle::Bottom,
        Handle::BottomRight,
        Handle::Move,
        Handle::Rotate,
    ];

    /// Handle for a numeric code as used across the wasm boundary (0-9).
    pub fn from_code(code: u8) -> Option<Handle> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Apply one movement sample to `rect`.
    ///
    /// Edge and corner handles move the edges they sit on; the opposite
    /// edges stay put. Rotation adds the length of the movement, signed by
    /// its horizontal direction. A purely vertical movement leaves the
    /// rotation unchanged.
    pub fn apply(self, rect: &AbsoluteRect, delta: Point) -> AbsoluteRect {
        let Point { x: dx, y: dy } = delta;
        let mut next = *rect;

        match self {
            Handle::TopLeft => {
                next.top += dy;
                next.left += dx;
                next.width -= dx;
                next.height -= dy;
            }
            Handle::Top => {
                next.top += dy;
                next.height -= dy;
            }
            Handle::TopRight => {
                next.top += dy;
                next.width += dx;
                next.height -= dy;
            }
            Handle::Left => {
                next.left += dx;
                next.width -= dx;
            }
            Handle::Right => next.width += dx,
            Handle::BottomLeft => {
                next.left += dx;
                next.width -= dx;
                next.height += dy;
            }
            Handle::Bottom => next.height += dy,
            Handle::BottomRight => {
                next.width += dx;
                next.height += dy;
            }
            Handle::Move => {
                next.top += dy;
                next.left += dx;
            }
            Handle::Rotate => {
                if dx != 0.0 {
                    next.rotation += dx.hypot(dy) * dx.signum();
                }
            }
        }

        next
    }
}


// =============================================================================
// Property-Based Tests
// =============================================================================
