//! End-to-end editing sessions driven through the public document API.

use buildify_core::{
    Bounds, ComponentId, ComponentKind, ComponentPatch, Document, Intent, NewComponent, StylePatch,
};
use kurbo::{Point, Size, Vec2};
use pretty_assertions::assert_eq;

fn button_at(x: f64, y: f64) -> NewComponent {
    NewComponent::new(ComponentKind::Button).at(x, y)
}

#[test]
fn drag_snaps_drop_position_to_grid() {
    let mut doc = Document::new();
    let id = doc.add(button_at(13.0, 27.0));
    assert_eq!(doc.component(&id).unwrap().style.position, Point::new(13.0, 27.0));

    doc.apply(Intent::DragEnd {
        id: id.clone(),
        position: Point::new(101.0, 58.0),
    });

    assert_eq!(doc.component(&id).unwrap().style.position, Point::new(100.0, 60.0));
}

#[test]
fn live_drag_in_small_steps_follows_the_pointer() {
    let mut doc = Document::new();
    let id = doc.add(button_at(100.0, 60.0));
    let steps = doc.history().past_len();

    for _ in 0..8 {
        doc.apply(Intent::PointerDragDelta {
            ids: vec![id.clone()],
            delta: Vec2::new(5.0, 5.0),
        });
    }

    assert_eq!(doc.component(&id).unwrap().style.position, Point::new(140.0, 100.0));
    assert!(doc.history().past_len() - steps < 8);

    doc.undo();
    assert_ne!(doc.component(&id).unwrap().style.position, Point::new(140.0, 100.0));
}

#[test]
fn transform_end_with_snap_disabled_keeps_raw_position() {
    let mut doc = Document::new();
    doc.toggle_snap();
    let id = doc.add(button_at(0.0, 0.0));

    doc.apply(Intent::TransformEnd {
        id: id.clone(),
        bounds: Bounds::new(101.0, 58.0, 3.0, 45.0),
    });

    let style = &doc.component(&id).unwrap().style;
    assert_eq!(style.position, Point::new(101.0, 58.0));
    assert_eq!(style.size, Size::new(20.0, 45.0));
}

#[test]
fn duplicate_offsets_copy_and_selects_it() {
    let mut doc = Document::new();
    let original = doc.add(
        button_at(50.0, 50.0)
            .named("Primary")
            .with_property("text", "Save"),
    );

    let copy = doc.duplicate(&original).unwrap();

    assert_ne!(copy, original);
    assert_eq!(doc.selection(), &[copy.clone()]);

    let source = doc.component(&original).unwrap();
    let duplicated = doc.component(&copy).unwrap();
    assert_eq!(duplicated.style.position, Point::new(70.0, 70.0));
    assert_eq!(duplicated.style.size, source.style.size);
    assert_eq!(duplicated.style.background_color, source.style.background_color);
    assert_eq!(duplicated.display_name, "Primary");
    assert_eq!(duplicated.properties, source.properties);
}

#[test]
fn deleting_selected_component_empties_selection() {
    let mut doc = Document::new();
    let a = doc.add(button_at(0.0, 0.0));
    let b = doc.add(button_at(200.0, 0.0));
    doc.select(&a, false);

    doc.delete(&b);
    assert_eq!(doc.selection(), &[a.clone()]);

    doc.delete(&a);
    assert!(doc.selection().is_empty());
}

#[test]
fn additive_selection_toggles() {
    let mut doc = Document::new();
    let a = doc.add(button_at(0.0, 0.0));
    let b = doc.add(button_at(200.0, 0.0));

    doc.select(&a, false);
    doc.select(&b, true);
    assert_eq!(doc.selection(), &[a.clone(), b.clone()]);

    doc.select(&a, true);
    assert_eq!(doc.selection(), &[b]);
}

#[test]
fn undo_walks_back_to_empty_and_redo_replays() {
    let mut doc = Document::new();
    let a = doc.add(button_at(0.0, 0.0));
    doc.update(
        &a,
        ComponentPatch::style(StylePatch::position(Point::new(40.0, 40.0))),
    );
    let b = doc.duplicate(&a).unwrap();
    let before_undo = doc.snapshot();

    let mut undone = 0;
    while doc.undo() {
        undone += 1;
    }
    assert_eq!(undone, 3);
    assert!(doc.is_empty());
    assert!(doc.selection().is_empty());

    while doc.redo() {}
    assert_eq!(doc.snapshot(), before_undo);
    assert!(doc.contains(&b));
}

#[test]
fn new_edit_after_undo_discards_redo_branch() {
    let mut doc = Document::new();
    doc.add(button_at(0.0, 0.0));
    doc.add(button_at(40.0, 0.0));
    doc.undo();
    assert!(doc.can_redo());

    doc.add(NewComponent::new(ComponentKind::Card));

    assert!(!doc.can_redo());
    assert_eq!(doc.len(), 2);
}

#[test]
fn view_changes_do_not_create_undo_steps() {
    let mut doc = Document::new();
    doc.apply(Intent::ViewportPan {
        delta: Vec2::new(100.0, 50.0),
    });
    doc.set_viewport_zoom(2.5);
    doc.toggle_grid();
    doc.set_grid_size(10.0);
    doc.select_all();
    doc.clear_selection();

    assert!(!doc.can_undo());
}

#[test]
fn locked_components_ignore_pointer_edits() {
    let mut doc = Document::new();
    let locked = doc.add(button_at(20.0, 20.0).locked(true));
    let free = doc.add(button_at(100.0, 20.0));

    doc.apply(Intent::PointerDragDelta {
        ids: vec![locked.clone(), free.clone()],
        delta: Vec2::new(20.0, 20.0),
    });
    doc.apply(Intent::DragEnd {
        id: locked.clone(),
        position: Point::new(400.0, 400.0),
    });

    assert_eq!(doc.component(&locked).unwrap().style.position, Point::new(20.0, 20.0));
    assert_eq!(doc.component(&free).unwrap().style.position, Point::new(120.0, 40.0));

    // Programmatic edits still reach locked components.
    doc.update(&locked, ComponentPatch::locked(false));
    assert!(!doc.component(&locked).unwrap().locked);
}

#[test]
fn bounding_box_of_nothing_is_none() {
    let mut doc = Document::new();
    assert_eq!(doc.bounding_box(&[]), None);
    doc.add(button_at(0.0, 0.0));
    assert_eq!(doc.bounding_box(&[ComponentId::from("unknown")]), None);
}

#[test]
fn reparenting_into_own_subtree_is_rejected() {
    let mut doc = Document::new();
    let root = doc.add(NewComponent::new(ComponentKind::Container));
    let child = doc.add(NewComponent::new(ComponentKind::Container).child_of(root.clone()));
    let grandchild = doc.add(NewComponent::new(ComponentKind::Text).child_of(child.clone()));
    let steps = doc.history().past_len();

    assert!(!doc.set_parent(&root, Some(&grandchild)));
    assert_eq!(doc.history().past_len(), steps);
    assert_eq!(doc.component(&root).unwrap().parent(), None);
}

#[test]
fn saved_document_reloads_identically() {
    let mut doc = Document::new();
    let card = doc.add(NewComponent::new(ComponentKind::Card).at(100.0, 100.0));
    doc.add(
        NewComponent::from_palette(ComponentKind::Input)
            .at(120.0, 140.0)
            .child_of(card),
    );
    doc.add(NewComponent::new("rating-stars").visible(false));

    let json = doc.snapshot().to_json().unwrap();
    let reloaded = Document::from_json(&json).unwrap();

    assert_eq!(reloaded.snapshot(), doc.snapshot());
    assert_eq!(
        reloaded.components_ordered().map(|c| c.kind.clone()).collect::<Vec<_>>(),
        vec![
            ComponentKind::Card,
            ComponentKind::Input,
            ComponentKind::Other("rating-stars".to_string())
        ]
    );
}
