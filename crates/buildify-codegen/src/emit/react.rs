//! React function component output.

use super::{Dialect, Styled, component_nodes, node_declarations, node_props, root_element, stylesheet, write_element};
use crate::GeneratedCode;
use crate::config::{OutputConfig, ROOT_CLASS, StylingStrategy};
use crate::fragment::{Decoration, root_tag};
use crate::style::{Declaration, container_declarations, write_css_body};
use crate::tree::{Forest, TreeNode};
use crate::writer::SourceWriter;

pub(crate) fn emit(forest: &Forest<'_>, config: &OutputConfig) -> GeneratedCode {
    let name = config.component_ident();
    let root_ident = format!("{name}Root");
    let styling = config.styling;

    let mut w = SourceWriter::new();
    w.line(r#"import React from "react";"#);
    match styling {
        StylingStrategy::Inline => {}
        StylingStrategy::Stylesheet => w.line(r#"import "./App.css";"#),
        StylingStrategy::CssInJs => w.line(r#"import styled from "styled-components";"#),
    }
    w.blank();

    if styling == StylingStrategy::CssInJs {
        write_styled(&mut w, &root_ident, "div", &container_declarations());
        for node in forest.walk() {
            write_styled(&mut w, &node.ident, root_tag(&node_props(node)), &node_declarations(node));
        }
    }

    let nodes = component_nodes(&forest.roots, &|node| decorate(node, styling));
    let root = match styling {
        StylingStrategy::Inline => root_element("div", Some(Decoration::Inline(container_declarations())), nodes),
        StylingStrategy::Stylesheet => root_element("div", Some(Decoration::Class(ROOT_CLASS.to_string())), nodes),
        StylingStrategy::CssInJs => root_element(root_ident, None, nodes),
    };

    if config.typescript {
        w.line(format!("const {name}: React.FC = () => {{"));
    } else {
        w.line(format!("const {name} = () => {{"));
    }
    w.indent();
    w.line("return (");
    w.indent();
    write_element(&mut w, &root, Dialect::Jsx);
    w.dedent();
    w.line(");");
    w.dedent();
    w.line("};");
    w.blank();
    w.line(format!("export default {name};"));

    let styles = match styling {
        StylingStrategy::Stylesheet => stylesheet(forest),
        StylingStrategy::Inline | StylingStrategy::CssInJs => String::new(),
    };

    GeneratedCode {
        source: w.finish(),
        styles,
    }
}

fn decorate(node: &TreeNode<'_>, styling: StylingStrategy) -> Styled {
    match styling {
        StylingStrategy::Inline => Styled {
            tag: None,
            decoration: Some(Decoration::Inline(node_declarations(node))),
        },
        StylingStrategy::Stylesheet => Styled {
            tag: None,
            decoration: Some(Decoration::Class(node.class_name.clone())),
        },
        StylingStrategy::CssInJs => Styled {
            tag: Some(node.ident.clone()),
            decoration: None,
        },
    }
}

/// ``const Button1 = styled.button`...`;``
fn write_styled(w: &mut SourceWriter, ident: &str, tag: &str, declarations: &[Declaration]) {
    w.line(format!("const {ident} = styled.{tag}`"));
    w.indent();
    write_css_body(w, declarations);
    w.dedent();
    w.line("`;");
    w.blank();
}
