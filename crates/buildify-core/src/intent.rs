//! Inbound intents emitted by the editor surfaces, and palette drop payloads.

use crate::component::{ComponentId, ComponentKind, ComponentPatch, NewComponent};
use crate::document::Document;
use crate::snap::Bounds;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A user intention, decoupled from the widget that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    AddComponent {
        component: NewComponent,
    },
    UpdateComponent {
        id: ComponentId,
        patch: ComponentPatch,
    },
    DeleteComponent {
        id: ComponentId,
    },
    DeleteSelected,
    DuplicateComponent {
        id: ComponentId,
    },
    /// Pointer selection; locked components ignore it.
    Select {
        id: ComponentId,
        #[serde(default)]
        additive: bool,
    },
    SelectAll,
    ClearSelection,
    /// Live drag step applied to several components at once.
    PointerDragDelta {
        ids: Vec<ComponentId>,
        delta: Vec2,
    },
    DragEnd {
        id: ComponentId,
        position: Point,
    },
    TransformEnd {
        id: ComponentId,
        bounds: Bounds,
    },
    /// Wheel zoom around a screen-space anchor.
    ViewportZoom {
        factor: f64,
        anchor: Point,
    },
    ViewportPan {
        delta: Vec2,
    },
    Undo,
    Redo,
}

impl Document {
    /// Dispatch an intent. Returns the id of a component it created, if any.
    pub fn apply(&mut self, intent: Intent) -> Option<ComponentId> {
        match intent {
            Intent::AddComponent { component } => return Some(self.add(component)),
            Intent::DuplicateComponent { id } => return self.duplicate(&id),
            Intent::UpdateComponent { id, patch } => {
                self.update(&id, patch);
            }
            Intent::DeleteComponent { id } => {
                self.delete(&id);
            }
            Intent::DeleteSelected => {
                self.delete_selected();
            }
            Intent::Select { id, additive } => {
                if self.component(&id).is_some_and(|component| component.locked) {
                    log::debug!("Ignoring pointer selection of locked component {id}");
                } else {
                    self.select(&id, additive);
                }
            }
            Intent::SelectAll => self.select_all(),
            Intent::ClearSelection => self.clear_selection(),
            Intent::PointerDragDelta { ids, delta } => {
                self.move_by(&ids, delta);
            }
            Intent::DragEnd { id, position } => {
                self.drag_end(&id, position);
            }
            Intent::TransformEnd { id, bounds } => {
                self.transform_end(&id, bounds);
            }
            Intent::ViewportZoom { factor, anchor } => self.zoom_viewport_at(anchor, factor),
            Intent::ViewportPan { delta } => self.pan_viewport_by(delta),
            Intent::Undo => {
                self.undo();
            }
            Intent::Redo => {
                self.redo();
            }
        }
        None
    }

    /// Create a component from palette drag data dropped at `screen_point`.
    ///
    /// Malformed data is logged and leaves the document untouched.
    pub fn drop_component(&mut self, data: &str, screen_point: Point) -> Result<ComponentId, PayloadError> {
        let payload = DropPayload::parse(data).inspect_err(|err| {
            log::warn!("Rejected drop payload: {err}");
        })?;

        let position = self.grid().snap(self.viewport().screen_to_document(screen_point));
        let draft = NewComponent::from_palette(payload.kind).at(position.x, position.y);
        Ok(self.add(draft))
    }
}

/// Errors reading external drag data.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("drop payload is empty")]
    Empty,
    #[error("malformed drop payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("drop payload names an empty component kind")]
    EmptyKind,
}

/// Data carried by a palette drag: `{"type": "<kind>"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropPayload {
    #[serde(rename = "type")]
    pub kind: ComponentKind,
}

impl DropPayload {
    pub fn new(kind: ComponentKind) -> Self {
        Self { kind }
    }

    pub fn parse(data: &str) -> Result<Self, PayloadError> {
        if data.trim().is_empty() {
            return Err(PayloadError::Empty);
        }
        let payload: DropPayload = serde_json::from_str(data)?;
        if payload.kind.as_str().is_empty() {
            return Err(PayloadError::EmptyKind);
        }
        Ok(payload)
    }

    pub fn to_json(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_drop_payload() {
        let payload = DropPayload::parse(r#"{"type":"card"}"#).unwrap();
        assert_eq!(payload.kind, ComponentKind::Card);

        let unknown = DropPayload::parse(r#"{"type":"slider"}"#).unwrap();
        assert_eq!(unknown.kind, ComponentKind::Other("slider".to_string()));
    }

    #[test]
    fn test_parse_rejects_bad_payloads() {
        assert!(matches!(DropPayload::parse(""), Err(PayloadError::Empty)));
        assert!(matches!(DropPayload::parse("not json"), Err(PayloadError::Malformed(_))));
        assert!(matches!(DropPayload::parse(r#"{"kind":"card"}"#), Err(PayloadError::Malformed(_))));
        assert!(matches!(DropPayload::parse(r#"{"type":""}"#), Err(PayloadError::EmptyKind)));
    }

    #[test]
    fn test_payload_round_trip() {
        let json = DropPayload::new(ComponentKind::Chart).to_json().unwrap();
        assert_eq!(json, r#"{"type":"chart"}"#);
    }

    #[test]
    fn test_drop_lands_on_snapped_document_point() {
        let mut doc = Document::new();
        doc.set_viewport_zoom(2.0);
        doc.set_viewport_pan(Vec2::new(10.0, 10.0));

        let id = doc.drop_component(r#"{"type":"button"}"#, Point::new(96.0, 130.0)).unwrap();

        let component = doc.component(&id).unwrap();
        // (96 - 10) / 2 = 43 -> 40, (130 - 10) / 2 = 60 -> 60
        assert_eq!(component.style.position, Point::new(40.0, 60.0));
        assert_eq!(component.properties["text"], "New Button");
        assert_eq!(doc.selection(), &[id]);
    }

    #[test]
    fn test_bad_drop_leaves_document_untouched() {
        let mut doc = Document::new();
        assert!(doc.drop_component("{", Point::ZERO).is_err());
        assert!(doc.is_empty());
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_intent_wire_format() {
        let intent: Intent = serde_json::from_value(json!({
            "type": "pointer_drag_delta",
            "ids": ["a", "b"],
            "delta": { "x": 5.0, "y": -5.0 }
        }))
        .unwrap();
        assert_eq!(
            intent,
            Intent::PointerDragDelta {
                ids: vec![ComponentId::from("a"), ComponentId::from("b")],
                delta: Vec2::new(5.0, -5.0),
            }
        );

        let undo: Intent = serde_json::from_value(json!({ "type": "undo" })).unwrap();
        assert_eq!(undo, Intent::Undo);
    }

    #[test]
    fn test_apply_add_returns_id() {
        let mut doc = Document::new();
        let id = doc
            .apply(Intent::AddComponent {
                component: NewComponent::new(ComponentKind::Text),
            })
            .unwrap();
        assert!(doc.contains(&id));
        assert_eq!(doc.apply(Intent::ClearSelection), None);
        assert!(doc.selection().is_empty());
    }

    #[test]
    fn test_pointer_select_ignores_locked() {
        let mut doc = Document::new();
        let locked = doc.add(NewComponent::new(ComponentKind::Image).locked(true));
        doc.clear_selection();

        doc.apply(Intent::Select {
            id: locked.clone(),
            additive: false,
        });
        assert!(doc.selection().is_empty());

        doc.select(&locked, false);
        assert_eq!(doc.selection(), &[locked]);
    }

    #[test]
    fn test_apply_viewport_intents_skip_history() {
        let mut doc = Document::new();
        doc.apply(Intent::ViewportPan {
            delta: Vec2::new(20.0, 0.0),
        });
        doc.apply(Intent::ViewportZoom {
            factor: 100.0,
            anchor: Point::ZERO,
        });
        assert_eq!(doc.viewport().zoom(), 5.0);
        assert!(!doc.can_undo());
    }
}
