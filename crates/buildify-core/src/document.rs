//! The editable document: component registry, selection and view state.

use crate::component::{Component, ComponentId, ComponentPatch, NewComponent, Registry};
use crate::grid::{Axis, GridSettings, Guides};
use crate::history::{History, Snapshot};
use crate::snap::{self, Bounds, clamp_min_size, normalize_resize};
use crate::viewport::Viewport;
use kurbo::{Point, Vec2};
use std::collections::HashMap;
use std::sync::Arc;

/// Offset applied to duplicated components so the copy does not hide the source.
pub const DUPLICATE_OFFSET: Vec2 = Vec2::new(20.0, 20.0);

/// Single source of truth for the scene being edited.
///
/// Every operation that changes the component set records exactly one
/// history checkpoint. Selection, viewport, grid and guides are view state
/// and never enter history.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// All components, keyed by ID.
    components: Registry,
    /// Insertion order, used wherever the read model is iterated.
    order: Vec<ComponentId>,
    /// Selected IDs; every entry exists in `components`.
    selection: Vec<ComponentId>,
    viewport: Viewport,
    grid: GridSettings,
    guides: Guides,
    history: History,
    /// Unsnapped remainder of an ongoing pointer drag, per component.
    /// Cleared by every other change to the component set.
    drag_residuals: HashMap<ComponentId, Vec2>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document whose history keeps at most `limit` undo states.
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            history: History::with_limit(limit),
            ..Self::default()
        }
    }

    // ---- read model -------------------------------------------------------

    /// Get a component by ID.
    pub fn component(&self, id: &ComponentId) -> Option<&Component> {
        self.components.get(id).map(|component| component.as_ref())
    }

    pub fn contains(&self, id: &ComponentId) -> bool {
        self.components.contains_key(id)
    }

    /// Get components in insertion order.
    pub fn components_ordered(&self) -> impl Iterator<Item = &Component> {
        self.order
            .iter()
            .filter_map(|id| self.components.get(id))
            .map(|component| component.as_ref())
    }

    pub fn registry(&self) -> &Registry {
        &self.components
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Get the number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn selection(&self) -> &[ComponentId] {
        &self.selection
    }

    pub fn is_selected(&self, id: &ComponentId) -> bool {
        self.selection.contains(id)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn grid(&self) -> &GridSettings {
        &self.grid
    }

    pub fn guides(&self) -> &Guides {
        &self.guides
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Minimal box covering the given components.
    pub fn bounding_box(&self, ids: &[ComponentId]) -> Option<Bounds> {
        snap::bounding_box(ids, &self.components)
    }

    /// Box covering the current selection, for the combined selection outline.
    pub fn selection_bounds(&self) -> Option<Bounds> {
        self.bounding_box(&self.selection)
    }

    // ---- component mutations ----------------------------------------------

    /// Insert a new component, select it and record a checkpoint.
    pub fn add(&mut self, draft: NewComponent) -> ComponentId {
        let id = self.fresh_id();
        let mut component = Component::with_id(id.clone(), draft);
        if let Some(parent) = component.parent.clone() {
            if !self.link_child(&parent, &id) {
                log::debug!("Ignoring unknown parent {parent} for new component {id}");
                component.parent = None;
            }
        }

        self.insert(component);
        self.selection = vec![id.clone()];
        self.commit();
        id
    }

    /// Merge `patch` into a component.
    /// Returns false, and changes nothing, if the component does not exist.
    pub fn update(&mut self, id: &ComponentId, patch: ComponentPatch) -> bool {
        let Some(component) = self.component_mut(id) else {
            log::debug!("Ignoring update of unknown component {id}");
            return false;
        };
        component.apply(&patch);
        self.commit();
        true
    }

    /// Remove a component.
    /// Returns false if the component does not exist.
    pub fn delete(&mut self, id: &ComponentId) -> bool {
        if !self.detach(id) {
            log::debug!("Ignoring delete of unknown component {id}");
            return false;
        }
        self.commit();
        true
    }

    /// Delete every selected component as a single undoable step.
    pub fn delete_selected(&mut self) -> usize {
        let ids = std::mem::take(&mut self.selection);
        let removed = ids.iter().filter(|id| self.detach(id)).count();
        if removed > 0 {
            self.commit();
        }
        removed
    }

    /// Copy a component under a new ID, offset by [`DUPLICATE_OFFSET`].
    ///
    /// The copy joins the same parent and starts without children.
    pub fn duplicate(&mut self, id: &ComponentId) -> Option<ComponentId> {
        let Some(source) = self.components.get(id) else {
            log::debug!("Ignoring duplicate of unknown component {id}");
            return None;
        };

        let mut copy = Component::clone(source);
        let new_id = self.fresh_id();
        copy.id = new_id.clone();
        copy.style.position += DUPLICATE_OFFSET;
        copy.children.clear();
        if let Some(parent) = copy.parent.clone() {
            if !self.link_child(&parent, &new_id) {
                copy.parent = None;
            }
        }

        self.insert(copy);
        self.selection = vec![new_id.clone()];
        self.commit();
        Some(new_id)
    }

    /// Move components by `delta`, snapping each resulting position.
    ///
    /// Consecutive calls accumulate the unsnapped pointer offset, so a drag
    /// made of steps smaller than a grid cell still moves. Locked and unknown
    /// components are skipped. All moves form one undoable step, recorded only
    /// if some position changed. Returns how many components moved.
    pub fn move_by(&mut self, ids: &[ComponentId], delta: Vec2) -> usize {
        let grid = self.grid;
        let mut seen: Vec<&ComponentId> = Vec::with_capacity(ids.len());
        let mut residuals = Vec::with_capacity(ids.len());
        let mut moved = 0;

        for id in ids {
            if seen.contains(&id) || !self.is_movable(id) {
                continue;
            }
            seen.push(id);
            let residual = self.drag_residuals.get(id).copied().unwrap_or(Vec2::ZERO);
            let Some(component) = self.component_mut(id) else {
                continue;
            };
            let raw = component.style.position + residual + delta;
            let snapped = grid.snap(raw);
            if snapped != component.style.position {
                component.style.position = snapped;
                moved += 1;
            }
            residuals.push((id.clone(), raw - snapped));
        }

        if moved > 0 {
            self.commit();
        }
        self.drag_residuals.extend(residuals);
        moved
    }

    /// Finish a drag: store the snapped drop position.
    pub fn drag_end(&mut self, id: &ComponentId, position: Point) -> bool {
        if !self.is_movable(id) {
            return false;
        }
        let position = self.grid.snap(position);
        let Some(component) = self.component_mut(id) else {
            return false;
        };
        component.style.position = position;
        self.commit();
        true
    }

    /// Finish a resize/move gesture with the proposed box.
    ///
    /// The size is floored at the minimum first, then the position is snapped.
    pub fn transform_end(&mut self, id: &ComponentId, proposed: Bounds) -> bool {
        if !self.is_movable(id) {
            return false;
        }
        let size = clamp_min_size(proposed.size());
        let position = self.grid.snap(proposed.origin());
        let Some(component) = self.component_mut(id) else {
            return false;
        };
        component.style.position = position;
        component.style.size = size;
        self.commit();
        true
    }

    /// Finish a resize expressed as a scale of the current size.
    pub fn resize_by_scale(&mut self, id: &ComponentId, position: Point, scale: Vec2) -> bool {
        if !self.is_movable(id) {
            return false;
        }
        let grid = self.grid;
        let Some(component) = self.component_mut(id) else {
            return false;
        };
        let (position, size) = normalize_resize(
            position,
            component.style.size,
            scale,
            grid.size(),
            grid.snaps(),
        );
        component.style.position = position;
        component.style.size = size;
        self.commit();
        true
    }

    /// Move `id` under `parent`, or to the top level with `None`.
    ///
    /// Rejected, returning false, when either ID is unknown, when the link
    /// would make a component its own ancestor, or when nothing would change.
    pub fn set_parent(&mut self, id: &ComponentId, parent: Option<&ComponentId>) -> bool {
        let Some(current) = self.components.get(id) else {
            return false;
        };
        if current.parent.as_ref() == parent {
            return false;
        }
        if let Some(parent) = parent {
            if !self.contains(parent) || parent == id || self.is_ancestor(id, parent) {
                log::debug!("Rejecting parent {parent} for component {id}");
                return false;
            }
        }

        if let Some(old_parent) = current.parent.clone() {
            if let Some(old) = self.component_mut(&old_parent) {
                old.children.retain(|child| child != id);
            }
        }
        if let Some(parent) = parent {
            self.link_child(parent, id);
        }
        if let Some(component) = self.component_mut(id) {
            component.parent = parent.cloned();
        }
        self.commit();
        true
    }

    // ---- selection ----------------------------------------------------------

    /// Select a component.
    ///
    /// Non-additive selection replaces the current selection. Additive
    /// selection toggles membership. Unknown IDs are ignored.
    pub fn select(&mut self, id: &ComponentId, additive: bool) {
        if !self.contains(id) {
            log::debug!("Ignoring selection of unknown component {id}");
            return;
        }

        if !additive {
            self.selection = vec![id.clone()];
        } else if let Some(index) = self.selection.iter().position(|selected| selected == id) {
            self.selection.remove(index);
        } else {
            self.selection.push(id.clone());
        }
    }

    /// Clear selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Select all components.
    pub fn select_all(&mut self) {
        self.selection = self.order.clone();
    }

    // ---- view state -------------------------------------------------------

    /// Set the zoom level, clamped to the viewport's range.
    pub fn set_viewport_zoom(&mut self, zoom: f64) {
        self.viewport.set_zoom(zoom);
    }

    pub fn set_viewport_pan(&mut self, pan: Vec2) {
        self.viewport.pan = pan;
    }

    pub fn pan_viewport_by(&mut self, delta: Vec2) {
        self.viewport.pan_by(delta);
    }

    /// Zoom around a screen-space anchor.
    pub fn zoom_viewport_at(&mut self, anchor: Point, factor: f64) {
        self.viewport.zoom_at(anchor, factor);
    }

    pub fn reset_viewport(&mut self) {
        self.viewport.reset();
    }

    pub fn toggle_grid(&mut self) {
        self.grid.toggle();
    }

    pub fn toggle_snap(&mut self) {
        self.grid.toggle_snap();
    }

    /// Set the grid size, clamped to the allowed range.
    pub fn set_grid_size(&mut self, size: f64) {
        self.grid.set_size(size);
    }

    pub fn add_guide(&mut self, axis: Axis, position: f64) {
        self.guides.add(axis, position);
    }

    pub fn remove_guide(&mut self, axis: Axis, position: f64) -> bool {
        self.guides.remove(axis, position)
    }

    pub fn clear_guides(&mut self) {
        self.guides.clear();
    }

    // ---- history ----------------------------------------------------------

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo().cloned() {
            Some(snapshot) => {
                self.restore(&snapshot);
                true
            }
            None => false,
        }
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo().cloned() {
            Some(snapshot) => {
                self.restore(&snapshot);
                true
            }
            None => false,
        }
    }

    // ---- internals ----------------------------------------------------------

    /// Assemble a document from already validated parts, with fresh history.
    pub(crate) fn from_parts(
        components: Vec<Component>,
        viewport: Viewport,
        grid: GridSettings,
        guides: Guides,
    ) -> Self {
        let mut document = Self {
            viewport,
            grid,
            guides,
            ..Self::default()
        };
        for component in components {
            document.insert(component);
        }
        let present = document.current_snapshot();
        document.history.reset(present);
        document
    }

    fn fresh_id(&self) -> ComponentId {
        let mut id = ComponentId::generate();
        while self.contains(&id) {
            id = ComponentId::generate();
        }
        id
    }

    fn insert(&mut self, component: Component) {
        let id = component.id.clone();
        if self.components.insert(id.clone(), Arc::new(component)).is_none() {
            self.order.push(id);
        }
    }

    /// Copy-on-write access to a component.
    fn component_mut(&mut self, id: &ComponentId) -> Option<&mut Component> {
        self.components.get_mut(id).map(Arc::make_mut)
    }

    /// Append `child` to `parent`'s children. Returns false if `parent` is unknown.
    fn link_child(&mut self, parent: &ComponentId, child: &ComponentId) -> bool {
        match self.component_mut(parent) {
            Some(parent) => {
                if !parent.children.contains(child) {
                    parent.children.push(child.clone());
                }
                true
            }
            None => false,
        }
    }

    fn is_movable(&self, id: &ComponentId) -> bool {
        self.components.get(id).is_some_and(|component| !component.locked)
    }

    /// Whether `ancestor` appears on `node`'s parent chain.
    fn is_ancestor(&self, ancestor: &ComponentId, node: &ComponentId) -> bool {
        let mut current = self.components.get(node).and_then(|c| c.parent.as_ref());
        // Bounded walk: a damaged chain cannot loop forever.
        for _ in 0..self.components.len() {
            match current {
                Some(id) if id == ancestor => return true,
                Some(id) => current = self.components.get(id).and_then(|c| c.parent.as_ref()),
                None => return false,
            }
        }
        false
    }

    /// Remove a component and every reference to it, without recording history.
    fn detach(&mut self, id: &ComponentId) -> bool {
        let Some(removed) = self.components.remove(id) else {
            return false;
        };
        self.order.retain(|other| other != id);
        self.selection.retain(|other| other != id);

        if let Some(parent) = &removed.parent {
            if let Some(parent) = self.component_mut(parent) {
                parent.children.retain(|child| child != id);
            }
        }
        for child in &removed.children {
            if let Some(child) = self.component_mut(child) {
                child.parent = None;
            }
        }
        true
    }

    fn current_snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.order
                .iter()
                .filter_map(|id| self.components.get(id).cloned())
                .collect(),
        )
    }

    fn commit(&mut self) {
        self.drag_residuals.clear();
        let snapshot = self.current_snapshot();
        self.history.checkpoint(snapshot);
    }

    /// Replace the registry wholesale with `snapshot` and prune the selection.
    fn restore(&mut self, snapshot: &Snapshot) {
        self.components = snapshot
            .shared()
            .iter()
            .map(|component| (component.id.clone(), Arc::clone(component)))
            .collect();
        self.order = snapshot.components().map(|c| c.id.clone()).collect();
        let components = &self.components;
        self.selection.retain(|id| components.contains_key(id));
        self.drag_residuals.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ComponentKind, StylePatch};
    use kurbo::Size;

    fn button(x: f64, y: f64) -> NewComponent {
        NewComponent::new(ComponentKind::Button).at(x, y).sized(100.0, 40.0)
    }

    #[test]
    fn test_document_creation() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert!(doc.selection().is_empty());
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_add_component() {
        let mut doc = Document::new();
        let id = doc.add(button(0.0, 0.0));

        assert_eq!(doc.len(), 1);
        assert!(doc.component(&id).is_some());
        assert_eq!(doc.selection(), &[id.clone()]);
        assert_eq!(doc.component(&id).unwrap().display_name, "Button");
        assert_eq!(doc.history().past_len(), 1);
    }

    #[test]
    fn test_update_unknown_is_no_op() {
        let mut doc = Document::new();
        assert!(!doc.update(&ComponentId::from("missing"), ComponentPatch::locked(true)));
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_update_merges_style() {
        let mut doc = Document::new();
        let id = doc.add(button(10.0, 10.0));

        assert!(doc.update(
            &id,
            ComponentPatch::style(StylePatch {
                color: Some("#111111".to_string()),
                ..StylePatch::default()
            }),
        ));

        let component = doc.component(&id).unwrap();
        assert_eq!(component.style.color, "#111111");
        assert_eq!(component.style.position, Point::new(10.0, 10.0));
        assert_eq!(doc.history().past_len(), 2);
    }

    #[test]
    fn test_remove_component() {
        let mut doc = Document::new();
        let id = doc.add(button(0.0, 0.0));

        assert!(doc.delete(&id));
        assert!(doc.is_empty());
        assert!(doc.selection().is_empty());
        assert!(!doc.delete(&id));
    }

    #[test]
    fn test_canvas_selection() {
        let mut doc = Document::new();
        let id = doc.add(button(0.0, 0.0));
        doc.clear_selection();

        assert!(!doc.is_selected(&id));
        doc.select(&id, false);
        assert!(doc.is_selected(&id));
        doc.clear_selection();
        assert!(!doc.is_selected(&id));
    }

    #[test]
    fn test_select_unknown_is_ignored() {
        let mut doc = Document::new();
        let id = doc.add(button(0.0, 0.0));
        doc.select(&ComponentId::from("ghost"), false);
        assert_eq!(doc.selection(), &[id]);
    }

    #[test]
    fn test_delete_selected() {
        let mut doc = Document::new();
        let a = doc.add(button(0.0, 0.0));
        let b = doc.add(button(50.0, 0.0));
        let c = doc.add(button(100.0, 0.0));
        doc.select(&a, false);
        doc.select(&b, true);
        let past = doc.history().past_len();

        assert_eq!(doc.delete_selected(), 2);
        assert_eq!(doc.len(), 1);
        assert!(doc.component(&c).is_some());
        assert!(doc.selection().is_empty());
        assert_eq!(doc.history().past_len(), past + 1);
    }

    #[test]
    fn test_select_all() {
        let mut doc = Document::new();
        let a = doc.add(button(0.0, 0.0));
        let b = doc.add(button(50.0, 0.0));
        doc.select_all();
        assert_eq!(doc.selection(), &[a, b]);
    }

    #[test]
    fn test_undo_add_component() {
        let mut doc = Document::new();
        let id = doc.add(button(0.0, 0.0));

        assert!(doc.can_undo());
        assert!(doc.undo());
        assert!(doc.is_empty());
        assert!(doc.selection().is_empty());
        assert!(doc.can_redo());

        assert!(doc.redo());
        assert_eq!(doc.len(), 1);
        assert!(doc.component(&id).is_some());
    }

    #[test]
    fn test_undo_remove_component() {
        let mut doc = Document::new();
        let id = doc.add(button(0.0, 0.0));
        doc.delete(&id);

        assert!(doc.undo());
        assert_eq!(doc.len(), 1);
        assert!(doc.component(&id).is_some());
    }

    #[test]
    fn test_undo_clears_redo() {
        let mut doc = Document::new();
        doc.add(button(0.0, 0.0));
        assert!(doc.undo());
        assert!(doc.can_redo());

        doc.add(button(50.0, 50.0));
        assert!(!doc.can_redo());
        assert!(!doc.redo());
    }

    #[test]
    fn test_undo_empty_stack() {
        let mut doc = Document::new();
        assert!(!doc.undo());
        assert!(!doc.redo());
    }

    #[test]
    fn test_undo_keeps_older_snapshot_intact() {
        let mut doc = Document::new();
        let id = doc.add(button(0.0, 0.0));
        doc.update(&id, ComponentPatch::property("text", "Changed"));

        doc.undo();
        assert!(!doc.component(&id).unwrap().properties.contains_key("text"));
        doc.redo();
        assert_eq!(doc.component(&id).unwrap().properties["text"], "Changed");
    }

    #[test]
    fn test_view_state_is_not_versioned() {
        let mut doc = Document::new();
        doc.add(button(0.0, 0.0));
        doc.set_viewport_zoom(3.0);
        doc.set_viewport_pan(Vec2::new(10.0, 10.0));
        doc.toggle_snap();
        doc.set_grid_size(40.0);
        doc.add_guide(Axis::Vertical, 100.0);
        assert_eq!(doc.history().past_len(), 1);

        doc.undo();
        assert!((doc.viewport().zoom() - 3.0).abs() < f64::EPSILON);
        assert_eq!(doc.viewport().pan, Vec2::new(10.0, 10.0));
        assert!(!doc.grid().snap_enabled);
        assert_eq!(doc.grid().size(), 40.0);
        assert_eq!(doc.guides().vertical, vec![100.0]);
    }

    #[test]
    fn test_zoom_and_grid_clamps() {
        let mut doc = Document::new();
        doc.set_viewport_zoom(10.0);
        assert_eq!(doc.viewport().zoom(), 5.0);
        doc.set_viewport_zoom(0.0);
        assert_eq!(doc.viewport().zoom(), 0.1);
        doc.set_grid_size(2.0);
        assert_eq!(doc.grid().size(), 5.0);
        doc.set_grid_size(80.0);
        assert_eq!(doc.grid().size(), 50.0);

        doc.reset_viewport();
        assert_eq!(doc.viewport().zoom(), 1.0);
        assert_eq!(doc.viewport().pan, Vec2::ZERO);
    }

    #[test]
    fn test_move_by_snaps_and_skips_locked() {
        let mut doc = Document::new();
        let free = doc.add(button(20.0, 20.0));
        let locked = doc.add(button(100.0, 100.0).locked(true));
        let past = doc.history().past_len();

        let moved = doc.move_by(&[free.clone(), locked.clone(), free.clone()], Vec2::new(13.0, 27.0));

        assert_eq!(moved, 1);
        assert_eq!(doc.component(&free).unwrap().style.position, Point::new(40.0, 40.0));
        assert_eq!(doc.component(&locked).unwrap().style.position, Point::new(100.0, 100.0));
        assert_eq!(doc.history().past_len(), past + 1);
    }

    #[test]
    fn test_move_by_nothing_records_nothing() {
        let mut doc = Document::new();
        let locked = doc.add(button(0.0, 0.0).locked(true));
        let past = doc.history().past_len();
        assert_eq!(doc.move_by(&[locked], Vec2::new(5.0, 5.0)), 0);
        assert_eq!(doc.history().past_len(), past);
    }

    #[test]
    fn test_small_drag_steps_accumulate() {
        let mut doc = Document::new();
        let id = doc.add(button(100.0, 60.0));
        let past = doc.history().past_len();

        // The first step stays inside the snap radius: no move, no checkpoint.
        assert_eq!(doc.move_by(&[id.clone()], Vec2::new(5.0, 5.0)), 0);
        assert_eq!(doc.history().past_len(), past);

        for _ in 0..11 {
            doc.move_by(&[id.clone()], Vec2::new(5.0, 5.0));
        }

        assert_eq!(doc.component(&id).unwrap().style.position, Point::new(160.0, 120.0));
        let recorded = doc.history().past_len() - past;
        assert!(recorded > 0 && recorded < 12, "{recorded}");
    }

    #[test]
    fn test_drag_residual_resets_after_other_edits() {
        let mut doc = Document::new();
        let id = doc.add(button(0.0, 0.0));
        doc.move_by(&[id.clone()], Vec2::new(8.0, 0.0));
        doc.drag_end(&id, Point::new(0.0, 0.0));

        // A fresh gesture starts from the stored position only.
        assert_eq!(doc.move_by(&[id.clone()], Vec2::new(8.0, 0.0)), 0);
        assert_eq!(doc.component(&id).unwrap().style.position, Point::ZERO);
    }

    #[test]
    fn test_duplicates_get_distinct_ids() {
        let mut doc = Document::new();
        let first = doc.add(button(0.0, 0.0));
        let mut ids = vec![first.clone()];
        for _ in 0..20 {
            ids.push(doc.duplicate(&first).unwrap());
        }
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        ids.dedup();
        assert_eq!(ids.len(), 21);
        assert_eq!(doc.len(), 21);
    }

    #[test]
    fn test_transform_end_floors_size_then_snaps() {
        let mut doc = Document::new();
        let id = doc.add(button(0.0, 0.0));

        assert!(doc.transform_end(&id, Bounds::new(33.0, 47.0, 5.0, 300.0)));

        let style = &doc.component(&id).unwrap().style;
        assert_eq!(style.position, Point::new(40.0, 40.0));
        assert_eq!(style.size, Size::new(20.0, 300.0));
    }

    #[test]
    fn test_transform_end_ignores_locked() {
        let mut doc = Document::new();
        let id = doc.add(button(0.0, 0.0).locked(true));
        assert!(!doc.transform_end(&id, Bounds::new(40.0, 40.0, 50.0, 50.0)));
        assert!(!doc.drag_end(&id, Point::new(40.0, 40.0)));
        assert_eq!(doc.component(&id).unwrap().style.position, Point::ZERO);
    }

    #[test]
    fn test_resize_by_scale() {
        let mut doc = Document::new();
        let id = doc.add(button(0.0, 0.0));

        assert!(doc.resize_by_scale(&id, Point::new(18.0, 3.0), Vec2::new(2.0, 0.1)));

        let style = &doc.component(&id).unwrap().style;
        assert_eq!(style.size, Size::new(200.0, 20.0));
        assert_eq!(style.position, Point::new(20.0, 0.0));
    }

    #[test]
    fn test_set_parent_links_and_rejects_cycles() {
        let mut doc = Document::new();
        let outer = doc.add(NewComponent::new(ComponentKind::Container));
        let inner = doc.add(NewComponent::new(ComponentKind::Container));
        let leaf = doc.add(button(0.0, 0.0));

        assert!(doc.set_parent(&inner, Some(&outer)));
        assert!(doc.set_parent(&leaf, Some(&inner)));
        assert_eq!(doc.component(&outer).unwrap().children(), &[inner.clone()]);
        assert_eq!(doc.component(&leaf).unwrap().parent(), Some(&inner));

        assert!(!doc.set_parent(&outer, Some(&leaf)));
        assert!(!doc.set_parent(&outer, Some(&outer)));
        assert!(!doc.set_parent(&leaf, Some(&ComponentId::from("ghost"))));
        assert!(!doc.set_parent(&leaf, Some(&inner)));

        assert!(doc.set_parent(&leaf, None));
        assert!(doc.component(&inner).unwrap().children().is_empty());
        assert_eq!(doc.component(&leaf).unwrap().parent(), None);
    }

    #[test]
    fn test_add_with_parent() {
        let mut doc = Document::new();
        let card = doc.add(NewComponent::new(ComponentKind::Card));
        let child = doc.add(button(0.0, 0.0).child_of(card.clone()));
        let orphan = doc.add(button(0.0, 0.0).child_of("ghost"));

        assert_eq!(doc.component(&card).unwrap().children(), &[child.clone()]);
        assert_eq!(doc.component(&child).unwrap().parent(), Some(&card));
        assert_eq!(doc.component(&orphan).unwrap().parent(), None);
    }

    #[test]
    fn test_delete_unlinks_parent_and_children() {
        let mut doc = Document::new();
        let outer = doc.add(NewComponent::new(ComponentKind::Container));
        let middle = doc.add(NewComponent::new(ComponentKind::Container).child_of(outer.clone()));
        let leaf = doc.add(button(0.0, 0.0).child_of(middle.clone()));

        doc.delete(&middle);

        assert!(doc.component(&outer).unwrap().children().is_empty());
        assert_eq!(doc.component(&leaf).unwrap().parent(), None);
    }

    #[test]
    fn test_duplicate_joins_parent_without_children() {
        let mut doc = Document::new();
        let card = doc.add(NewComponent::new(ComponentKind::Card));
        let child = doc.add(button(0.0, 0.0).child_of(card.clone()));

        let copy = doc.duplicate(&child).unwrap();
        assert_eq!(doc.component(&card).unwrap().children(), &[child, copy.clone()]);

        let card_copy = doc.duplicate(&card).unwrap();
        assert!(doc.component(&card_copy).unwrap().children().is_empty());
        assert!(doc.duplicate(&ComponentId::from("ghost")).is_none());
    }

    #[test]
    fn test_undo_prunes_selection() {
        let mut doc = Document::new();
        let a = doc.add(button(0.0, 0.0));
        let b = doc.add(button(50.0, 0.0));
        doc.select(&a, false);
        doc.select(&b, true);

        doc.undo();
        assert_eq!(doc.selection(), &[a]);
    }

    #[test]
    fn test_history_limit() {
        let mut doc = Document::with_history_limit(1);
        doc.add(button(0.0, 0.0));
        doc.add(button(0.0, 0.0));
        assert!(doc.undo());
        assert!(!doc.undo());
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_selection_bounds() {
        let mut doc = Document::new();
        assert_eq!(doc.selection_bounds(), None);
        let a = doc.add(button(0.0, 0.0));
        let b = doc.add(button(200.0, 100.0));
        doc.select(&a, false);
        doc.select(&b, true);
        assert_eq!(doc.selection_bounds(), Some(Bounds::new(0.0, 0.0, 300.0, 140.0)));
    }
}
