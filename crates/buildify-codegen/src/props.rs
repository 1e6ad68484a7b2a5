//! Typed view of the free-form component properties.
//!
//! The store treats properties as opaque JSON; only code generation reads
//! them. Missing, empty or malformed values fall back to defaults.

use buildify_core::{ComponentKind, Properties};
use serde::de::DeserializeOwned;
use serde_json::Value;

const INPUT_TYPES: [&str; 8] = ["text", "email", "password", "number", "tel", "url", "search", "date"];

/// Element content per component kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementProps {
    Button { text: String },
    Card { title: String, description: String },
    Text { text: String },
    Image { src: String, alt: String },
    Container,
    Input { placeholder: String, input_type: String },
    Select { options: Vec<String> },
    Checkbox { label: String, checked: bool },
    Radio { label: String, name: String, checked: bool },
    Table { columns: Vec<String>, rows: Vec<Vec<String>> },
    Chart { title: String },
    Spacer,
    Unknown { kind: String },
}

impl ElementProps {
    pub fn decode(kind: &ComponentKind, props: &Properties) -> Self {
        match kind {
            ComponentKind::Button => ElementProps::Button {
                text: text(props, &["text", "label"], "Button"),
            },
            ComponentKind::Card => ElementProps::Card {
                title: text(props, &["title"], "Card title"),
                description: text(props, &["description"], "Card description goes here..."),
            },
            ComponentKind::Text => ElementProps::Text {
                text: text(props, &["text"], "Text"),
            },
            ComponentKind::Image => ElementProps::Image {
                src: text(props, &["src"], "#"),
                alt: text(props, &["alt"], "Image"),
            },
            ComponentKind::Container => ElementProps::Container,
            ComponentKind::Input => {
                let requested = text(props, &["inputType", "type"], "text");
                ElementProps::Input {
                    placeholder: text(props, &["placeholder"], "Type here..."),
                    input_type: if INPUT_TYPES.contains(&requested.as_str()) {
                        requested
                    } else {
                        "text".to_string()
                    },
                }
            }
            ComponentKind::Select => ElementProps::Select {
                options: decoded(props, "options")
                    .filter(|options: &Vec<String>| !options.is_empty())
                    .unwrap_or_else(|| strings(&["Option 1", "Option 2"])),
            },
            ComponentKind::Checkbox => ElementProps::Checkbox {
                label: text(props, &["label", "text"], "Checkbox"),
                checked: flag(props, "checked"),
            },
            ComponentKind::Radio => ElementProps::Radio {
                label: text(props, &["label", "text"], "Radio"),
                name: text(props, &["name"], "radio"),
                checked: flag(props, "checked"),
            },
            ComponentKind::Table => ElementProps::Table {
                columns: decoded(props, "columns")
                    .filter(|columns: &Vec<String>| !columns.is_empty())
                    .unwrap_or_else(|| strings(&["Column 1", "Column 2"])),
                rows: decoded(props, "rows").unwrap_or_else(|| vec![strings(&["Data 1", "Data 2"])]),
            },
            ComponentKind::Chart => ElementProps::Chart {
                title: text(props, &["title"], "Chart"),
            },
            ComponentKind::Spacer => ElementProps::Spacer,
            ComponentKind::Other(name) => ElementProps::Unknown { kind: name.clone() },
        }
    }
}

/// First non-empty string (or number) under any of `keys`.
fn text(props: &Properties, keys: &[&str], default: &str) -> String {
    keys.iter()
        .filter_map(|key| match props.get(*key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .next()
        .unwrap_or_else(|| default.to_string())
}

fn flag(props: &Properties, key: &str) -> bool {
    props.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn decoded<T: DeserializeOwned>(props: &Properties, key: &str) -> Option<T> {
    let value = props.get(key)?;
    match serde_json::from_value(value.clone()) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            log::debug!("Ignoring malformed property '{key}': {err}");
            None
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
