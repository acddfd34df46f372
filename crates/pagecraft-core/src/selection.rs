//! Selection state and resize handles.

use crate::element::{ElementId, Geometry};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Handle hit tolerance in viewport pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 8.0;

/// Resize handle, named by compass direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

/// Which edges of the box a handle drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::N,
        ResizeHandle::Ne,
        ResizeHandle::E,
        ResizeHandle::Se,
        ResizeHandle::S,
        ResizeHandle::Sw,
        ResizeHandle::W,
        ResizeHandle::Nw,
    ];

    /// The edges this handle moves.
    pub fn edges(self) -> Edges {
        let (top, right, bottom, left) = match self {
            ResizeHandle::N => (true, false, false, false),
            ResizeHandle::Ne => (true, true, false, false),
            ResizeHandle::E => (false, true, false, false),
            ResizeHandle::Se => (false, true, true, false),
            ResizeHandle::S => (false, false, true, false),
            ResizeHandle::Sw => (false, false, true, true),
            ResizeHandle::W => (false, false, false, true),
            ResizeHandle::Nw => (true, false, false, true),
        };
        Edges { top, right, bottom, left }
    }

    /// Handle position on a bounding rectangle.
    pub fn position(self, bounds: Rect) -> Point {
        let c = bounds.center();
        match self {
            ResizeHandle::N => Point::new(c.x, bounds.y0),
            ResizeHandle::Ne => Point::new(bounds.x1, bounds.y0),
            ResizeHandle::E => Point::new(bounds.x1, c.y),
            ResizeHandle::Se => Point::new(bounds.x1, bounds.y1),
            ResizeHandle::S => Point::new(c.x, bounds.y1),
            ResizeHandle::Sw => Point::new(bounds.x0, bounds.y1),
            ResizeHandle::W => Point::new(bounds.x0, c.y),
            ResizeHandle::Nw => Point::new(bounds.x0, bounds.y0),
        }
    }
}

/// Find which resize handle (if any) is hit at the given canvas point.
/// `tolerance` should already be adjusted for the viewport scale.
pub fn hit_test_handles(geometry: &Geometry, point: Point, tolerance: f64) -> Option<ResizeHandle> {
    let bounds = geometry.as_rect();
    // Corners first so they win where they overlap edge midpoints on small boxes.
    const ORDER: [ResizeHandle; 8] = [
        ResizeHandle::Nw,
        ResizeHandle::Ne,
        ResizeHandle::Se,
        ResizeHandle::Sw,
        ResizeHandle::N,
        ResizeHandle::E,
        ResizeHandle::S,
        ResizeHandle::W,
    ];
    ORDER.into_iter().find(|handle| {
        let pos = handle.position(bounds);
        let dx = point.x - pos.x;
        let dy = point.y - pos.y;
        dx * dx + dy * dy <= tolerance * tolerance
    })
}

/// Primary selection plus an independent multi-select set.
///
/// The multi-select set never contains the primary element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    primary: Option<ElementId>,
    multi: Vec<ElementId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primary(&self) -> Option<ElementId> {
        self.primary
    }

    /// Multi-selected IDs in the order they were added.
    pub fn multi(&self) -> &[ElementId] {
        &self.multi
    }

    /// Make `id` the sole selection.
    pub fn select(&mut self, id: ElementId) {
        self.primary = Some(id);
        self.multi.clear();
    }

    /// Toggle multi-select membership, leaving the primary untouched.
    /// Returns false when `id` is the primary and nothing changed.
    pub fn toggle_multi(&mut self, id: ElementId) -> bool {
        if self.primary == Some(id) {
            return false;
        }
        if let Some(pos) = self.multi.iter().position(|&m| m == id) {
            self.multi.remove(pos);
        } else {
            self.multi.push(id);
        }
        true
    }

    pub fn clear(&mut self) {
        self.primary = None;
        self.multi.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.multi.is_empty()
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.primary == Some(id) || self.multi.contains(&id)
    }

    /// Drop references to elements that no longer exist.
    /// Returns true if anything was removed.
    pub fn retain(&mut self, mut exists: impl FnMut(ElementId) -> bool) -> bool {
        let before = (self.primary, self.multi.len());
        if self.primary.is_some_and(|id| !exists(id)) {
            self.primary = None;
        }
        self.multi.retain(|&id| exists(id));
        before != (self.primary, self.multi.len())
    }
}

/// State of an in-flight move or resize of one element.
#[derive(Debug, Clone)]
pub struct ManipulationState {
    /// The element being manipulated.
    pub element_id: ElementId,
    /// The handle being dragged (None = moving the whole element).
    pub handle: Option<ResizeHandle>,
    /// Pointer position at gesture start, canvas space.
    pub start_point: Point,
    /// Latest pointer position, canvas space.
    pub current_point: Point,
    /// Geometry when the gesture started.
    pub original: Geometry,
}

impl ManipulationState {
    pub fn new(element_id: ElementId, handle: Option<ResizeHandle>, start_point: Point, original: Geometry) -> Self {
        Self {
            element_id,
            handle,
            start_point,
            current_point: start_point,
            original,
        }
    }

    /// Pointer offset from the element origin, fixed for the whole drag.
    pub fn anchor(&self) -> Vec2 {
        self.start_point - self.original.origin()
    }

    /// Get the drag delta.
    pub fn delta(&self) -> Vec2 {
        self.current_point - self.start_point
    }
}
