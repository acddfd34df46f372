//! Placement, move, resize, alignment and nudge math in canvas space.
//!
//! Every function here is pure and clamps rather than rejects: the result
//! always lies inside the canvas, given a start geometry that already did.

use crate::element::{EdgeAnchor, ElementKind, Geometry, MIN_ELEMENT_SIZE};
use crate::selection::ResizeHandle;
use crate::snap::snap_point;
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Canvas alignment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Top,
    Middle,
    Bottom,
}

/// Arrow-key direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NudgeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl NudgeDirection {
    /// Unit vector in canvas space (y grows downwards).
    pub fn unit(self) -> Vec2 {
        match self {
            NudgeDirection::Up => Vec2::new(0.0, -1.0),
            NudgeDirection::Down => Vec2::new(0.0, 1.0),
            NudgeDirection::Left => Vec2::new(-1.0, 0.0),
            NudgeDirection::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Clamp an origin so a box of `size` stays on the canvas.
/// Oversized boxes are pinned to 0.
pub fn clamp_origin(origin: Point, size: Size, canvas: Size) -> Point {
    Point::new(
        origin.x.min(canvas.width - size.width).max(0.0),
        origin.y.min(canvas.height - size.height).max(0.0),
    )
}

/// Shrink a size so it fits the canvas.
pub fn fit_size(size: Size, canvas: Size) -> Size {
    Size::new(size.width.min(canvas.width), size.height.min(canvas.height))
}

/// Bring a geometry inside the canvas, shrinking only if it cannot fit.
pub fn clamp_geometry(geometry: Geometry, canvas: Size) -> Geometry {
    let size = fit_size(geometry.size(), canvas);
    Geometry::from_origin_size(clamp_origin(geometry.origin(), size, canvas), size)
}

/// Geometry for a palette item dropped at `point` (canvas space).
///
/// Full-bleed types take the canvas width at x = 0 and anchor to their edge;
/// everything else is grid-snapped when a grid is given. The result is
/// clamped to the canvas.
pub fn place(kind: ElementKind, point: Point, size: Size, canvas: Size, grid: Option<f64>) -> Geometry {
    let (origin, size) = if kind.is_full_bleed() {
        let size = Size::new(canvas.width, size.height);
        let y = match kind.edge_anchor() {
            EdgeAnchor::Top => 0.0,
            EdgeAnchor::Bottom => canvas.height - size.height,
            EdgeAnchor::Free => point.y,
        };
        (Point::new(0.0, y), size)
    } else {
        (snap_point(point, grid).point, size)
    };
    clamp_geometry(Geometry::from_origin_size(origin, size), canvas)
}

/// Geometry for a quick-add: centred horizontally on the canvas and
/// vertically within the first fold, then placed like a drop without snapping.
pub fn place_centered(kind: ElementKind, size: Size, canvas: Size, fold_height: f64) -> Geometry {
    let fold = fold_height.min(canvas.height);
    let point = Point::new(
        (canvas.width - size.width) / 2.0,
        (fold - size.height) / 2.0,
    );
    place(kind, point, size, canvas, None)
}

/// New origin while dragging.
///
/// `anchor` is the pointer offset from the element origin captured at drag
/// start; the element follows the pointer, optionally snapped, then clamped.
pub fn drag_origin(anchor: Vec2, pointer: Point, size: Size, canvas: Size, grid: Option<f64>) -> Point {
    let raw = pointer - anchor;
    clamp_origin(snap_point(raw, grid).point, size, canvas)
}

/// Resize along a leading (left/top) edge, keeping the trailing edge fixed.
/// Returns `(origin, size)`; the start values if the origin would go negative.
fn resize_leading(origin: f64, size: f64, delta: f64) -> (f64, f64) {
    let proposed = (size - delta).max(MIN_ELEMENT_SIZE);
    let proposed_origin = origin + (size - proposed);
    if proposed_origin < 0.0 {
        (origin, size)
    } else {
        (proposed_origin, proposed)
    }
}

/// Apply a resize handle drag of `delta` to the start geometry.
pub fn resize(start: Geometry, handle: ResizeHandle, delta: Vec2, canvas: Size) -> Geometry {
    let edges = handle.edges();
    let mut g = start;

    if edges.right {
        g.width = (start.width + delta.x).max(MIN_ELEMENT_SIZE);
    }
    if edges.bottom {
        g.height = (start.height + delta.y).max(MIN_ELEMENT_SIZE);
    }
    if edges.left {
        (g.x, g.width) = resize_leading(start.x, start.width, delta.x);
    }
    if edges.top {
        (g.y, g.height) = resize_leading(start.y, start.height, delta.y);
    }

    // Far edges shrink; the origin never moves here.
    if g.x + g.width > canvas.width {
        g.width = canvas.width - g.x;
    }
    if g.y + g.height > canvas.height {
        g.height = canvas.height - g.y;
    }
    g
}

/// Origin that aligns the element to a canvas edge or centre. Never snapped.
pub fn align(geometry: Geometry, alignment: Alignment, canvas: Size) -> Point {
    let mut origin = geometry.origin();
    match alignment {
        Alignment::Left => origin.x = 0.0,
        Alignment::Center => origin.x = (canvas.width - geometry.width) / 2.0,
        Alignment::Right => origin.x = canvas.width - geometry.width,
        Alignment::Top => origin.y = 0.0,
        Alignment::Middle => origin.y = (canvas.height - geometry.height) / 2.0,
        Alignment::Bottom => origin.y = canvas.height - geometry.height,
    }
    origin
}

/// Origin after an arrow-key nudge of `step` units, clamped like a drag.
pub fn nudge(geometry: Geometry, direction: NudgeDirection, step: f64, canvas: Size) -> Point {
    clamp_origin(geometry.origin() + direction.unit() * step, geometry.size(), canvas)
}

/// Floor a requested size at the minimum and clamp it into the canvas
/// (used for geometry coming from the properties editor).
pub fn sanitize(geometry: Geometry, canvas: Size) -> Geometry {
    let size = Size::new(
        geometry.width.max(MIN_ELEMENT_SIZE),
        geometry.height.max(MIN_ELEMENT_SIZE),
    );
    clamp_geometry(Geometry::from_origin_size(geometry.origin(), size), canvas)
}
