//! Buildify Core Library
//!
//! Platform-agnostic document model for the Buildify visual UI builder:
//! components, selection, grid snapping, viewport and undo history.

pub mod component;
pub mod document;
pub mod grid;
pub mod history;
pub mod intent;
pub mod snap;
pub mod snapshot;
pub mod viewport;

pub use component::{
    Component, ComponentId, ComponentKind, ComponentPatch, FontWeight, Insets, NewComponent, Properties,
    Registry, Style, StylePatch, TextAlign,
};
pub use document::{DUPLICATE_OFFSET, Document};
pub use grid::{Axis, DEFAULT_GRID_SIZE, GridSettings, Guides, MAX_GRID_SIZE, MIN_GRID_SIZE};
pub use history::{History, Snapshot};
pub use intent::{DropPayload, Intent, PayloadError};
pub use snap::{
    Bounds, MIN_COMPONENT_SIZE, SnapResult, bounding_box, clamp_min_size, normalize_resize, snap_point,
    snap_to_grid,
};
pub use snapshot::{DocumentSnapshot, SNAPSHOT_VERSION, SnapshotError};
pub use viewport::{MAX_ZOOM, MIN_ZOOM, Viewport};
