//! Per-gesture pointer state.
//!
//! Mouse events report a movement delta directly, touch events only report
//! absolute positions. [`MovementTracker`] hides that difference by diffing
//! consecutive touch samples.
//!
//! Global move/release listeners live exactly as long as one gesture.
//! [`ListenerGuard`] attaches them on creation and detaches them once, on
//! release or drop, so an abandoned gesture cannot leak handlers.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// One pointer sample delivered during a gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PointerInput {
    /// Mouse or pen sample with the native movement delta.
    Mouse { client: Point, movement: Point },
    /// Touch sample with every active contact.
    Touch { touches: Vec<Point> },
}

impl PointerInput {
    /// Convenience constructor for a mouse sample.
    pub fn mouse(client: Point, movement: Point) -> Self {
        PointerInput::Mouse { client, movement }
    }

    /// Convenience constructor for a single-contact touch sample.
    pub fn touch(point: Point) -> Self {
        PointerInput::Touch {
            touches: vec![point],
        }
    }

    /// Position of the primary contact, if any.
    pub fn primary(&self) -> Option<Point> {
        match self {
            PointerInput::Mouse { client, .. } => Some(*client),
            PointerInput::Touch { touches } => touches.first().copied(),
        }
    }
}

/// The sample delivered when a gesture ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ReleaseInput {
    Mouse {
        client: Point,
    },
    /// Touch end carries the contacts that were lifted; browsers occasionally
    /// deliver none.
    Touch {
        #[serde(rename = "changedTouches")]
        changed_touches: Vec<Point>,
    },
}

impl ReleaseInput {
    /// Position where the gesture ended, if the event carried one.
    pub fn position(&self) -> Option<Point> {
        match self {
            ReleaseInput::Mouse { client } => Some(*client),
            ReleaseInput::Touch { changed_touches } => changed_touches.first().copied(),
        }
    }
}

/// Derives frame-to-frame movement for both mouse and touch input.
#[derive(Debug, Clone, Default)]
pub struct MovementTracker {
    last_touch: Option<Point>,
}

impl MovementTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Movement since the previous sample.
    ///
    /// Touch positions are rounded to whole pixels before diffing. The first
    /// touch sample of a gesture has no predecessor and yields zero movement.
    pub fn movement(&mut self, input: &PointerInput) -> Point {
        match input {
            PointerInput::Mouse { movement, .. } => *movement,
            PointerInput::Touch { touches } => {
                let Some(current) = touches.first().map(|point| point.rounded()) else {
                    return Point::default();
                };
                let delta = match self.last_touch {
                    Some(previous) => current.delta_from(previous),
                    None => Point::default(),
                };
                self.last_touch = Some(current);
                delta
            }
        }
    }

    /// Forget the previous touch sample.
    pub fn reset(&mut self) {
        self.last_touch = None;
    }
}

/// Global listeners needed while a gesture is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListenerKind {
    /// Single-pointer drag (mouse or one finger).
    Drag,
    /// Two-finger pinch.
    Pinch,
}

impl ListenerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ListenerKind::Drag => "drag",
            ListenerKind::Pinch => "pinch",
        }
    }
}

/// Something that can register and unregister global gesture listeners.
pub trait ListenerSet {
    fn attach(&mut self, kind: ListenerKind);
    fn detach(&mut self, kind: ListenerKind);
}

/// Keeps a gesture's global listeners attached for its lifetime.
///
/// The listeners are detached exactly once, when the guard is dropped.
pub struct ListenerGuard<S: ListenerSet> {
    listeners: S,
    kind: ListenerKind,
    attached: bool,
}

impl<S: ListenerSet> ListenerGuard<S> {
    /// Attach the listeners for `kind`.
    pub fn attach(mut listeners: S, kind: ListenerKind) -> Self {
        listeners.attach(kind);
        Self {
            listeners,
            kind,
            attached: true,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    fn detach_once(&mut self) {
        if self.attached {
            self.attached = false;
            self.listeners.detach(self.kind);
        }
    }
}

impl<S: ListenerSet> Drop for ListenerGuard<S> {
    fn drop(&mut self) {
        self.detach_once();
    }
}
