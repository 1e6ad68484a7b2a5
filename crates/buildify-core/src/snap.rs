//! Snap functionality for aligning components to the grid, plus the
//! geometry helpers used by moves and resizes.

use crate::component::{ComponentId, Registry};
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest width or height a resize can produce, in document units.
pub const MIN_COMPONENT_SIZE: f64 = 20.0;

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The snapped point.
    pub point: Point,
    /// Whether the X coordinate was snapped.
    pub snapped_x: bool,
    /// Whether the Y coordinate was snapped.
    pub snapped_y: bool,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self {
            point,
            snapped_x: false,
            snapped_y: false,
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Snap a point to the nearest grid intersection.
///
/// A non-positive or non-finite grid size leaves the point untouched.
pub fn snap_to_grid(point: Point, grid_size: f64) -> SnapResult {
    if !(grid_size.is_finite() && grid_size > 0.0) {
        return SnapResult::none(point);
    }

    let snapped_x = (point.x / grid_size).round() * grid_size;
    let snapped_y = (point.y / grid_size).round() * grid_size;

    SnapResult {
        point: Point::new(snapped_x, snapped_y),
        snapped_x: true,
        snapped_y: true,
    }
}

/// Snap a point when `enabled`, otherwise return it unchanged.
pub fn snap_point(point: Point, grid_size: f64, enabled: bool) -> Point {
    if enabled {
        snap_to_grid(point, grid_size).point
    } else {
        point
    }
}

/// Axis-aligned box in document space, in the shape the read model exposes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl From<Rect> for Bounds {
    fn from(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }
}

impl From<Bounds> for Rect {
    fn from(bounds: Bounds) -> Self {
        Rect::from_origin_size(bounds.origin(), bounds.size())
    }
}

/// Minimal box covering every component in `ids` that exists in `registry`.
///
/// Returns `None` when nothing resolves, including for an empty id list.
pub fn bounding_box(ids: &[ComponentId], registry: &Registry) -> Option<Bounds> {
    ids.iter()
        .filter_map(|id| registry.get(id))
        .map(|component| component.bounds())
        .reduce(|acc, rect| acc.union(rect))
        .map(Bounds::from)
}

/// Apply the minimum size floor to both axes.
pub fn clamp_min_size(size: Size) -> Size {
    Size::new(
        size.width.max(MIN_COMPONENT_SIZE),
        size.height.max(MIN_COMPONENT_SIZE),
    )
}

/// Resize a box by a scale factor.
///
/// The size is scaled and floored first; the position is snapped on its own
/// afterwards, so snapping never feeds back into the size.
pub fn normalize_resize(
    position: Point,
    size: Size,
    scale: Vec2,
    grid_size: f64,
    snap_enabled: bool,
) -> (Point, Size) {
    let scaled = clamp_min_size(Size::new(size.width * scale.x, size.height * scale.y));
    (snap_point(position, grid_size, snap_enabled), scaled)
}
