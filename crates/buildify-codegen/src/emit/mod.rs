//! Format emitters and the markup writer they share.

pub(crate) mod react;
pub(crate) mod vue;
pub(crate) mod web_components;

use crate::config::ROOT_CLASS;
use crate::fragment::{Attr, Decoration, Element, Node, fragment, hosts_children};
use crate::props::ElementProps;
use crate::style::{
    Declaration, container_declarations, declarations, escape_attr, escape_text, to_inline_css, to_js_object,
    write_css_rule,
};
use crate::tree::{Forest, TreeNode};
use crate::writer::SourceWriter;

/// Shown when the document has no components.
pub(crate) const EMPTY_HINT: &str = "Add components to get started!";

/// Markup spelling of a target format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dialect {
    Jsx,
    Vue,
    Html,
}

impl Dialect {
    fn attr(self, attr: &Attr) -> String {
        match attr {
            Attr::Text(name, value) => format!(" {name}=\"{}\"", escape_attr(value)),
            Attr::Flag("checked") if self == Dialect::Jsx => " defaultChecked".to_string(),
            Attr::Flag(name) => format!(" {name}"),
        }
    }

    fn decoration(self, decoration: &Decoration) -> String {
        match (self, decoration) {
            (Dialect::Jsx, Decoration::Class(class)) => format!(" className=\"{class}\""),
            (_, Decoration::Class(class)) => format!(" class=\"{class}\""),
            (Dialect::Jsx, Decoration::Inline(declarations)) => {
                format!(" style={{{}}}", to_js_object(declarations))
            }
            (Dialect::Vue, Decoration::Inline(declarations)) => {
                format!(" :style=\"{}\"", to_js_object(declarations))
            }
            (Dialect::Html, Decoration::Inline(declarations)) => {
                format!(" style=\"{}\"", escape_attr(&to_inline_css(declarations)))
            }
            (Dialect::Jsx, Decoration::Binding(expr)) => format!(" style={{{expr}}}"),
            (Dialect::Vue, Decoration::Binding(expr)) => format!(" :style=\"{expr}\""),
            (Dialect::Html, Decoration::Binding(_)) => String::new(),
        }
    }

    fn comment(self, text: &str) -> String {
        match self {
            Dialect::Jsx => format!("{{/* {text} */}}"),
            Dialect::Vue | Dialect::Html => format!("<!-- {text} -->"),
        }
    }
}

/// Box declarations of a placed component.
pub(crate) fn node_declarations(node: &TreeNode<'_>) -> Vec<Declaration> {
    declarations(&node.component.style, node.origin, node.component.visible)
}

/// Decoded properties of a placed component.
pub(crate) fn node_props(node: &TreeNode<'_>) -> ElementProps {
    ElementProps::decode(&node.component.kind, &node.component.properties)
}

/// Tag override and style hook for a component's outermost element.
pub(crate) struct Styled {
    pub tag: Option<String>,
    pub decoration: Option<Decoration>,
}

/// Markup for `nodes` and their nested components.
pub(crate) fn component_nodes(nodes: &[TreeNode<'_>], decorate: &dyn Fn(&TreeNode<'_>) -> Styled) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        let mut element = fragment(&node_props(node));
        let styled = decorate(node);
        if let Some(tag) = styled.tag {
            element.tag = tag;
        }
        element.decoration = styled.decoration;

        let nested = component_nodes(&node.children, decorate);
        if hosts_children(&node.component.kind) {
            element.children.extend(nested);
            out.push(element.into());
        } else {
            out.push(element.into());
            out.extend(nested);
        }
    }
    out
}

/// The root container holding every top-level component, or the hint when empty.
pub(crate) fn root_element(tag: impl Into<String>, decoration: Option<Decoration>, nodes: Vec<Node>) -> Element {
    let mut root = Element::new(tag);
    root.decoration = decoration;
    if nodes.is_empty() {
        root.children.push(Element::new("p").text(EMPTY_HINT).into());
    } else {
        root.children = nodes;
    }
    root
}

pub(crate) fn write_node(w: &mut SourceWriter, node: &Node, dialect: Dialect) {
    match node {
        Node::Element(element) => write_element(w, element, dialect),
        Node::Text(text) => w.line(escape_text(text)),
        Node::Comment(text) => w.line(dialect.comment(text)),
    }
}

pub(crate) fn write_element(w: &mut SourceWriter, element: &Element, dialect: Dialect) {
    let tag = &element.tag;
    let mut open = format!("<{tag}");
    for attr in &element.attrs {
        open.push_str(&dialect.attr(attr));
    }
    if let Some(decoration) = &element.decoration {
        open.push_str(&dialect.decoration(decoration));
    }

    let void = element.is_void();
    match element.children.as_slice() {
        [] if void && dialect == Dialect::Html => w.line(format!("{open}>")),
        [] if void || dialect == Dialect::Jsx => w.line(format!("{open} />")),
        [] => w.line(format!("{open}></{tag}>")),
        [Node::Text(text)] => w.line(format!("{open}>{}</{tag}>", escape_text(text))),
        children => {
            w.line(format!("{open}>"));
            w.indent();
            for child in children {
                write_node(w, child, dialect);
            }
            w.dedent();
            w.line(format!("</{tag}>"));
        }
    }
}

/// The root rule followed by one rule per component, in traversal order.
pub(crate) fn write_stylesheet(w: &mut SourceWriter, forest: &Forest<'_>) {
    write_css_rule(w, &format!(".{ROOT_CLASS}"), &container_declarations());
    for node in forest.walk() {
        w.blank();
        write_css_rule(w, &format!(".{}", node.class_name), &node_declarations(node));
    }
}

/// [`write_stylesheet`] as a standalone string.
pub(crate) fn stylesheet(forest: &Forest<'_>) -> String {
    let mut w = SourceWriter::new();
    write_stylesheet(&mut w, forest);
    w.finish()
}
