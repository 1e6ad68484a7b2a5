//! Per-kind markup templates.
//!
//! Fragments are format-neutral; the emitters decide how attributes, styles
//! and comments are spelled.

use crate::props::ElementProps;
use crate::style::Declaration;
use buildify_core::ComponentKind;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Attr {
    Text(&'static str, String),
    /// Boolean attribute that is present only when set.
    Flag(&'static str),
}

/// How an element receives its styles.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Decoration {
    Class(String),
    Inline(Vec<Declaration>),
    /// A script expression evaluating to a style object.
    Binding(String),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Element {
    pub tag: String,
    pub attrs: Vec<Attr>,
    pub decoration: Option<Decoration>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            decoration: None,
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push(Attr::Text(name, value.into()));
        self
    }

    pub fn flag(mut self, name: &'static str, set: bool) -> Self {
        if set {
            self.attrs.push(Attr::Flag(name));
        }
        self
    }

    pub fn inline(mut self, declarations: Vec<Declaration>) -> Self {
        self.decoration = Some(Decoration::Inline(declarations));
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn is_void(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "img" | "br" | "hr")
    }
}

/// Whether nested components can be placed inside this kind's element.
///
/// Only `div`-rooted kinds accept arbitrary content. Children of the others
/// (`button`, `p`, `input`, `select`, `label`, `table`) are emitted as
/// following siblings in the parent's frame.
pub(crate) fn hosts_children(kind: &ComponentKind) -> bool {
    matches!(
        kind,
        ComponentKind::Card
            | ComponentKind::Image
            | ComponentKind::Container
            | ComponentKind::Chart
            | ComponentKind::Spacer
            | ComponentKind::Other(_)
    )
}

/// Tag of the outermost element rendered for `props`.
pub(crate) fn root_tag(props: &ElementProps) -> &'static str {
    match props {
        ElementProps::Button { .. } => "button",
        ElementProps::Text { .. } => "p",
        ElementProps::Input { .. } => "input",
        ElementProps::Select { .. } => "select",
        ElementProps::Checkbox { .. } | ElementProps::Radio { .. } => "label",
        ElementProps::Table { .. } => "table",
        ElementProps::Card { .. }
        | ElementProps::Image { .. }
        | ElementProps::Container
        | ElementProps::Chart { .. }
        | ElementProps::Spacer
        | ElementProps::Unknown { .. } => "div",
    }
}

/// Structural markup for one component, without its box styles.
pub(crate) fn fragment(props: &ElementProps) -> Element {
    let root = Element::new(root_tag(props));
    match props {
        ElementProps::Button { text } => root.attr("type", "button").text(text.as_str()),
        ElementProps::Card { title, description } => root
            .child(Element::new("h3").text(title.as_str()))
            .child(Element::new("p").text(description.as_str())),
        ElementProps::Text { text } => root.text(text.as_str()),
        ElementProps::Image { src, alt } => root.child(
            Element::new("img")
                .attr("src", src.as_str())
                .attr("alt", alt.as_str())
                .inline(vec![
                    Declaration::text("display", "block"),
                    Declaration::text("width", "100%"),
                    Declaration::text("height", "100%"),
                    Declaration::text("object-fit", "cover"),
                ]),
        ),
        ElementProps::Input {
            placeholder,
            input_type,
        } => root
            .attr("type", input_type.as_str())
            .attr("placeholder", placeholder.as_str()),
        ElementProps::Select { options } => options.iter().fold(root, |select, option| {
            select.child(
                Element::new("option")
                    .attr("value", option.as_str())
                    .text(option.as_str()),
            )
        }),
        ElementProps::Checkbox { label, checked } => root
            .child(Element::new("input").attr("type", "checkbox").flag("checked", *checked))
            .text(label.as_str()),
        ElementProps::Radio { label, name, checked } => root
            .child(
                Element::new("input")
                    .attr("type", "radio")
                    .attr("name", name.as_str())
                    .flag("checked", *checked),
            )
            .text(label.as_str()),
        ElementProps::Table { columns, rows } => {
            let head = columns
                .iter()
                .fold(Element::new("tr"), |tr, column| tr.child(Element::new("th").text(column.as_str())));
            let body = rows.iter().fold(Element::new("tbody"), |tbody, row| {
                tbody.child(
                    row.iter()
                        .fold(Element::new("tr"), |tr, cell| tr.child(Element::new("td").text(cell.as_str()))),
                )
            });
            root.child(Element::new("thead").child(head)).child(body)
        }
        ElementProps::Chart { title } => root.child(
            Element::new("div")
                .inline(vec![
                    Declaration::text("display", "flex"),
                    Declaration::text("align-items", "center"),
                    Declaration::text("justify-content", "center"),
                    Declaration::text("height", "100%"),
                    Declaration::text("background", "linear-gradient(45deg, #3b82f6, #8b5cf6)"),
                    Declaration::text("color", "white"),
                    Declaration::text("border-radius", "8px"),
                ])
                .text(title.as_str()),
        ),
        ElementProps::Container | ElementProps::Spacer => root,
        ElementProps::Unknown { kind } => root.child(Node::Comment(format!("{} component", comment_safe(kind)))),
    }
}

/// Keep comment text from closing JSX or HTML comments early.
fn comment_safe(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        let c = if c.is_alphanumeric() || c == ' ' || c == '_' { c } else { '-' };
        if !(c == '-' && out.ends_with('-')) {
            out.push(c);
        }
    }
    let out = out.trim_matches(|c: char| c == '-' || c.is_whitespace());
    if out.is_empty() {
        "unknown".to_string()
    } else {
        out.to_string()
    }
}
