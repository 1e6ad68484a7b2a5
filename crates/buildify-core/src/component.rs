//! Component definitions for the editor document.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Free-form per-kind payload. The store and history never look inside it.
pub type Properties = serde_json::Map<String, serde_json::Value>;

/// Id → component lookup shared by the store and its snapshots.
pub type Registry = HashMap<ComponentId, Arc<Component>>;

/// Unique identifier for components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    /// Generate a fresh id.
    ///
    /// UUID v7 carries a millisecond timestamp followed by random bits, so ids
    /// minted by one store never collide in practice.
    pub fn generate() -> Self {
        Self(format!("component_{}", Uuid::now_v7().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ComponentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ComponentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ComponentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Element variant of a component.
///
/// Unknown names survive a load/save cycle as [`ComponentKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComponentKind {
    Button,
    Card,
    Text,
    Image,
    Container,
    Input,
    Select,
    Checkbox,
    Radio,
    Table,
    Chart,
    Spacer,
    Other(String),
}

impl ComponentKind {
    /// Every built-in kind, in palette order.
    pub const BUILTIN: [ComponentKind; 12] = [
        ComponentKind::Button,
        ComponentKind::Card,
        ComponentKind::Text,
        ComponentKind::Image,
        ComponentKind::Container,
        ComponentKind::Input,
        ComponentKind::Select,
        ComponentKind::Checkbox,
        ComponentKind::Radio,
        ComponentKind::Table,
        ComponentKind::Chart,
        ComponentKind::Spacer,
    ];

    /// Wire name of this kind.
    pub fn as_str(&self) -> &str {
        match self {
            ComponentKind::Button => "button",
            ComponentKind::Card => "card",
            ComponentKind::Text => "text",
            ComponentKind::Image => "image",
            ComponentKind::Container => "container",
            ComponentKind::Input => "input",
            ComponentKind::Select => "select",
            ComponentKind::Checkbox => "checkbox",
            ComponentKind::Radio => "radio",
            ComponentKind::Table => "table",
            ComponentKind::Chart => "chart",
            ComponentKind::Spacer => "spacer",
            ComponentKind::Other(name) => name,
        }
    }

    /// Human readable label, used as the default display name.
    pub fn label(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => "Component".to_string(),
        }
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, ComponentKind::Other(_))
    }
}

impl From<String> for ComponentKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "button" => ComponentKind::Button,
            "card" => ComponentKind::Card,
            "text" => ComponentKind::Text,
            "image" => ComponentKind::Image,
            "container" => ComponentKind::Container,
            "input" => ComponentKind::Input,
            "select" => ComponentKind::Select,
            "checkbox" => ComponentKind::Checkbox,
            "radio" => ComponentKind::Radio,
            "table" => ComponentKind::Table,
            "chart" => ComponentKind::Chart,
            "spacer" => ComponentKind::Spacer,
            _ => ComponentKind::Other(name),
        }
    }
}

impl From<&str> for ComponentKind {
    fn from(name: &str) -> Self {
        ComponentKind::from(name.to_string())
    }
}

impl From<ComponentKind> for String {
    fn from(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Other(name) => name,
            builtin => builtin.as_str().to_string(),
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
    Justify,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
        }
    }
}

/// Font weight, either numeric (`500`) or a keyword (`"bold"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontWeight {
    Numeric(u16),
    Keyword(String),
}

impl Default for FontWeight {
    fn default() -> Self {
        FontWeight::Numeric(500)
    }
}

/// Four-sided spacing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Insets {
    pub const ZERO: Insets = Insets::uniform(0.0);

    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Vertical and horizontal insets, CSS shorthand order.
    pub const fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }
}

/// Visual and layout properties shared by every component kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Style {
    /// Top-left corner in document space.
    pub position: Point,
    /// Width and height, never negative.
    pub size: Size,
    pub z_index: i32,

    pub background_color: String,
    pub border_color: String,
    pub border_width: f64,
    pub border_radius: f64,
    /// 0.0 = fully transparent, 1.0 = fully opaque.
    pub opacity: f64,

    pub font_family: String,
    pub font_size: f64,
    pub font_weight: FontWeight,
    pub color: String,
    pub text_align: TextAlign,
    pub line_height: f64,
    pub letter_spacing: f64,

    pub padding: Insets,
    pub margin: Insets,

    // Effects are opaque CSS text.
    pub box_shadow: String,
    pub transform: String,
    pub filter: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            size: Size::new(100.0, 40.0),
            z_index: 1,
            background_color: "#3b82f6".to_string(),
            border_color: "#1d4ed8".to_string(),
            border_width: 0.0,
            border_radius: 6.0,
            opacity: 1.0,
            font_family: "Inter, sans-serif".to_string(),
            font_size: 14.0,
            font_weight: FontWeight::default(),
            color: "#ffffff".to_string(),
            text_align: TextAlign::default(),
            line_height: 1.5,
            letter_spacing: 0.0,
            padding: Insets::symmetric(8.0, 16.0),
            margin: Insets::ZERO,
            box_shadow: "0 1px 3px 0 rgba(0, 0, 0, 0.1)".to_string(),
            transform: "none".to_string(),
            filter: "none".to_string(),
        }
    }
}

impl Style {
    /// Box covered by this style in document space.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Merge every field present in `patch`.
    pub fn apply(&mut self, patch: &StylePatch) {
        macro_rules! merge {
            ($($field:ident),* $(,)?) => {
                $(
                    if let Some(value) = &patch.$field {
                        self.$field = value.clone();
                    }
                )*
            };
        }

        merge!(
            position,
            size,
            z_index,
            background_color,
            border_color,
            border_width,
            border_radius,
            opacity,
            font_family,
            font_size,
            font_weight,
            color,
            text_align,
            line_height,
            letter_spacing,
            padding,
            margin,
            box_shadow,
            transform,
            filter,
        );
        self.size = non_negative(self.size);
    }
}

/// Clamp both axes of a size to zero.
pub(crate) fn non_negative(size: Size) -> Size {
    Size::new(size.width.max(0.0), size.height.max(0.0))
}

/// Partial style update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StylePatch {
    pub position: Option<Point>,
    pub size: Option<Size>,
    pub z_index: Option<i32>,
    pub background_color: Option<String>,
    pub border_color: Option<String>,
    pub border_width: Option<f64>,
    pub border_radius: Option<f64>,
    pub opacity: Option<f64>,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<FontWeight>,
    pub color: Option<String>,
    pub text_align: Option<TextAlign>,
    pub line_height: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub padding: Option<Insets>,
    pub margin: Option<Insets>,
    pub box_shadow: Option<String>,
    pub transform: Option<String>,
    pub filter: Option<String>,
}

impl StylePatch {
    pub fn position(position: Point) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn bounds(position: Point, size: Size) -> Self {
        Self {
            position: Some(position),
            size: Some(size),
            ..Self::default()
        }
    }
}

/// A placeable element of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub(crate) id: ComponentId,
    #[serde(alias = "type")]
    pub kind: ComponentKind,
    #[serde(alias = "name")]
    pub display_name: String,
    #[serde(default)]
    pub style: Style,
    #[serde(default, alias = "props")]
    pub properties: Properties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) parent: Option<ComponentId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) children: Vec<ComponentId>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl Component {
    /// Build a component with an explicit id.
    ///
    /// Stores mint their own ids; this is for read-model consumers such as
    /// code generation tests or importers.
    pub fn with_id(id: impl Into<ComponentId>, draft: NewComponent) -> Self {
        Self {
            id: id.into(),
            display_name: draft
                .display_name
                .unwrap_or_else(|| draft.kind.label()),
            kind: draft.kind,
            style: Style {
                size: non_negative(draft.style.size),
                ..draft.style
            },
            properties: draft.properties,
            parent: draft.parent,
            children: Vec::new(),
            locked: draft.locked,
            visible: draft.visible,
        }
    }

    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    pub fn parent(&self) -> Option<&ComponentId> {
        self.parent.as_ref()
    }

    pub fn children(&self) -> &[ComponentId] {
        &self.children
    }

    /// Bounding box in document space.
    pub fn bounds(&self) -> Rect {
        self.style.rect()
    }

    /// Merge a partial update into this component.
    pub fn apply(&mut self, patch: &ComponentPatch) {
        if let Some(name) = &patch.display_name {
            self.display_name = name.clone();
        }
        if let Some(style) = &patch.style {
            self.style.apply(style);
        }
        if let Some(properties) = &patch.properties {
            for (key, value) in properties {
                self.properties.insert(key.clone(), value.clone());
            }
        }
        if let Some(locked) = patch.locked {
            self.locked = locked;
        }
        if let Some(visible) = patch.visible {
            self.visible = visible;
        }
    }
}

/// A component that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComponent {
    #[serde(alias = "type")]
    pub kind: ComponentKind,
    #[serde(default, alias = "name")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub style: Style,
    #[serde(default, alias = "props")]
    pub properties: Properties,
    #[serde(default)]
    pub parent: Option<ComponentId>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl NewComponent {
    /// A component of `kind` with the default palette style.
    pub fn new(kind: impl Into<ComponentKind>) -> Self {
        Self {
            kind: kind.into(),
            display_name: None,
            style: Style::default(),
            properties: Properties::new(),
            parent: None,
            locked: false,
            visible: true,
        }
    }

    /// A component as the palette creates it: default style plus starter text.
    pub fn from_palette(kind: impl Into<ComponentKind>) -> Self {
        let draft = Self::new(kind);
        let label = draft.kind.label();
        draft
            .with_property("text", format!("New {label}"))
            .with_property("placeholder", "Type here...")
            .with_property("title", format!("{label} title"))
            .with_property("description", format!("{label} description goes here..."))
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.style.position = Point::new(x, y);
        self
    }

    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.style.size = Size::new(width, height);
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn child_of(mut self, parent: impl Into<ComponentId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// Partial component update.
///
/// Style fields merge one by one, properties merge key by key, everything
/// else is replaced when present. Structural links are changed through
/// [`crate::Document::set_parent`] only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentPatch {
    #[serde(alias = "name")]
    pub display_name: Option<String>,
    pub style: Option<StylePatch>,
    #[serde(alias = "props")]
    pub properties: Option<Properties>,
    pub locked: Option<bool>,
    pub visible: Option<bool>,
}

impl ComponentPatch {
    pub fn style(style: StylePatch) -> Self {
        Self {
            style: Some(style),
            ..Self::default()
        }
    }

    pub fn property(key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        let mut properties = Properties::new();
        properties.insert(key.into(), value.into());
        Self {
            properties: Some(properties),
            ..Self::default()
        }
    }

    pub fn locked(locked: bool) -> Self {
        Self {
            locked: Some(locked),
            ..Self::default()
        }
    }

    pub fn visible(visible: bool) -> Self {
        Self {
            visible: Some(visible),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = ComponentId::generate();
        let b = ComponentId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("component_"));
    }

    #[test]
    fn test_kind_round_trips_unknown_names() {
        let kind: ComponentKind = serde_json::from_value(json!("slider")).unwrap();
        assert_eq!(kind, ComponentKind::Other("slider".to_string()));
        assert_eq!(serde_json::to_value(&kind).unwrap(), json!("slider"));

        let button: ComponentKind = serde_json::from_value(json!("button")).unwrap();
        assert_eq!(button, ComponentKind::Button);
    }

    #[test]
    fn test_kind_label() {
        assert_eq!(ComponentKind::Checkbox.label(), "Checkbox");
        assert_eq!(ComponentKind::Other(String::new()).label(), "Component");
    }

    #[test]
    fn test_style_patch_preserves_unspecified_fields() {
        let mut style = Style::default();
        style.apply(&StylePatch {
            background_color: Some("#000000".to_string()),
            ..StylePatch::default()
        });

        assert_eq!(style.background_color, "#000000");
        assert_eq!(style.border_color, Style::default().border_color);
        assert_eq!(style.size, Size::new(100.0, 40.0));
    }

    #[test]
    fn test_style_patch_clamps_negative_size() {
        let mut style = Style::default();
        style.apply(&StylePatch {
            size: Some(Size::new(-5.0, 12.0)),
            ..StylePatch::default()
        });
        assert_eq!(style.size, Size::new(0.0, 12.0));
    }

    #[test]
    fn test_component_patch_merges_properties() {
        let draft = NewComponent::new(ComponentKind::Button)
            .with_property("text", "Save")
            .with_property("variant", "primary");
        let mut component = Component::with_id("a", draft);

        component.apply(&ComponentPatch::property("text", "Submit"));

        assert_eq!(component.properties["text"], json!("Submit"));
        assert_eq!(component.properties["variant"], json!("primary"));
        assert_eq!(component.display_name, "Button");
    }

    #[test]
    fn test_component_deserializes_legacy_field_names() {
        let component: Component = serde_json::from_value(json!({
            "id": "a",
            "type": "text",
            "name": "Heading",
            "props": { "text": "Hello" },
            "style": { "position": { "x": 10.0, "y": 20.0 } },
            "locked": false
        }))
        .unwrap();

        assert_eq!(component.kind, ComponentKind::Text);
        assert_eq!(component.display_name, "Heading");
        assert_eq!(component.style.position, Point::new(10.0, 20.0));
        assert_eq!(component.style.font_size, 14.0);
        assert!(component.visible);
    }

    #[test]
    fn test_font_weight_accepts_numbers_and_keywords() {
        let numeric: FontWeight = serde_json::from_value(json!(700)).unwrap();
        let keyword: FontWeight = serde_json::from_value(json!("bold")).unwrap();
        assert_eq!(numeric, FontWeight::Numeric(700));
        assert_eq!(keyword, FontWeight::Keyword("bold".to_string()));
    }
}
