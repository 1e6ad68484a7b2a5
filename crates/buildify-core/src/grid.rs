//! Grid configuration and ruler guides.

use crate::snap::snap_point;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Default grid cell size (matches the visual grid).
pub const DEFAULT_GRID_SIZE: f64 = 20.0;
/// Smallest accepted grid cell size.
pub const MIN_GRID_SIZE: f64 = 5.0;
/// Largest accepted grid cell size.
pub const MAX_GRID_SIZE: f64 = 50.0;

/// Grid display and snapping settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSettings {
    /// Whether the grid is shown.
    pub enabled: bool,
    size: f64,
    /// Whether pointer positions snap to the grid.
    #[serde(alias = "snap")]
    pub snap_enabled: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            size: DEFAULT_GRID_SIZE,
            snap_enabled: true,
        }
    }
}

impl GridSettings {
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Set the cell size, clamped to [`MIN_GRID_SIZE`, `MAX_GRID_SIZE`].
    pub fn set_size(&mut self, size: f64) {
        self.size = if size.is_nan() {
            DEFAULT_GRID_SIZE
        } else {
            size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE)
        };
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    pub fn toggle_snap(&mut self) {
        self.snap_enabled = !self.snap_enabled;
    }

    /// Snapping only applies while the grid is both shown and snapping.
    pub fn snaps(&self) -> bool {
        self.enabled && self.snap_enabled
    }

    /// Snap a document point with these settings.
    pub fn snap(&self, point: Point) -> Point {
        snap_point(point, self.size, self.snaps())
    }
}

/// Orientation of a ruler guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Advisory ruler lines. They never own or constrain components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Guides {
    pub horizontal: Vec<f64>,
    pub vertical: Vec<f64>,
}

impl Guides {
    fn lines_mut(&mut self, axis: Axis) -> &mut Vec<f64> {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }

    /// Add a guide unless one already sits at `position`. Non-finite
    /// positions are ignored.
    pub fn add(&mut self, axis: Axis, position: f64) {
        if !position.is_finite() {
            log::debug!("Ignoring guide at non-finite position {position}");
            return;
        }
        let lines = self.lines_mut(axis);
        if !lines.iter().any(|&p| p == position) {
            lines.push(position);
        }
    }

    /// Remove the guide at `position`. Returns true if one was removed.
    pub fn remove(&mut self, axis: Axis, position: f64) -> bool {
        let lines = self.lines_mut(axis);
        let before = lines.len();
        lines.retain(|&p| p != position);
        lines.len() != before
    }

    pub fn clear(&mut self) {
        self.horizontal.clear();
        self.vertical.clear();
    }
}
