//! Serializable document snapshots for save/load.

use crate::component::{Component, ComponentId, non_negative};
use crate::document::Document;
use crate::grid::{GridSettings, Guides};
use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Snapshot format version written by this crate.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors that can occur while loading or saving a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Unsupported snapshot version {found} (expected {SNAPSHOT_VERSION})")]
    UnsupportedVersion { found: u32 },
}

/// Everything a document persists: components plus view settings.
/// History and selection are not part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub version: u32,
    pub components: Vec<Component>,
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub grid: GridSettings,
    #[serde(default)]
    pub guides: Guides,
}

impl DocumentSnapshot {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON. Version checks happen in [`Document::from_snapshot`].
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Document {
    /// Capture the persisted state of this document.
    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            version: SNAPSHOT_VERSION,
            components: self.components_ordered().cloned().collect(),
            viewport: *self.viewport(),
            grid: *self.grid(),
            guides: self.guides().clone(),
        }
    }

    /// Build a document from a snapshot, repairing broken links.
    ///
    /// The loaded state becomes the initial history state: nothing can be
    /// undone right after loading.
    pub fn from_snapshot(snapshot: DocumentSnapshot) -> Result<Self, SnapshotError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
            });
        }

        let mut viewport = snapshot.viewport;
        viewport.set_zoom(viewport.zoom());
        let mut grid = snapshot.grid;
        grid.set_size(grid.size());

        let components = repair(snapshot.components);
        log::debug!("Loaded snapshot with {} components", components.len());
        Ok(Document::from_parts(components, viewport, grid, snapshot.guides))
    }

    /// Parse and load a JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Self::from_snapshot(DocumentSnapshot::from_json(json)?)
    }
}

/// Drop duplicate ids, dangling links and parent cycles.
///
/// A component's `parent` field is authoritative; children lists are
/// rebuilt to agree with it, keeping the stored order where possible.
fn repair(components: Vec<Component>) -> Vec<Component> {
    let mut seen = HashSet::new();
    let mut components: Vec<Component> = components
        .into_iter()
        .filter(|component| {
            let fresh = seen.insert(component.id.clone());
            if !fresh {
                log::warn!("Dropping duplicate component {}", component.id);
            }
            fresh
        })
        .collect();

    for component in &mut components {
        component.style.size = non_negative(component.style.size);
        let dangling = component
            .parent
            .as_ref()
            .is_some_and(|parent| *parent == component.id || !seen.contains(parent));
        if dangling {
            log::warn!("Detaching component {} from a missing parent", component.id);
            component.parent = None;
        }
    }

    break_cycles(&mut components);

    let mut expected: HashMap<ComponentId, Vec<ComponentId>> = HashMap::new();
    for component in &components {
        if let Some(parent) = &component.parent {
            expected
                .entry(parent.clone())
                .or_default()
                .push(component.id.clone());
        }
    }

    for component in &mut components {
        let actual = expected.remove(&component.id).unwrap_or_default();
        let mut children: Vec<ComponentId> = Vec::with_capacity(actual.len());
        for child in component.children.iter().chain(actual.iter()) {
            if actual.contains(child) && !children.contains(child) {
                children.push(child.clone());
            }
        }
        if children != component.children {
            log::warn!("Repaired children of component {}", component.id);
            component.children = children;
        }
    }

    components
}

/// Clear the parent link of the first component found on each cycle.
fn break_cycles(components: &mut [Component]) {
    let index: HashMap<ComponentId, usize> = components
        .iter()
        .enumerate()
        .map(|(i, component)| (component.id.clone(), i))
        .collect();
    for start in 0..components.len() {
        let mut current = parent_index(components, &index, start);
        let mut steps = 0;
        while let Some(i) = current {
            if i == start {
                log::warn!("Breaking parent cycle at component {}", components[start].id);
                components[start].parent = None;
                break;
            }
            steps += 1;
            if steps > components.len() {
                break;
            }
            current = parent_index(components, &index, i);
        }
    }
}

fn parent_index(components: &[Component], index: &HashMap<ComponentId, usize>, i: usize) -> Option<usize> {
    components[i]
        .parent
        .as_ref()
        .and_then(|parent| index.get(parent))
        .copied()
}
