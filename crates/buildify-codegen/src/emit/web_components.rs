//! Custom element output.
//!
//! Markup goes into a template literal assigned to the shadow root. Text and
//! attribute escaping turns `` ` ``, `\` and `{` into entities, so nothing
//! emitted inside the literal can end it or start an interpolation.

use super::{Dialect, Styled, component_nodes, node_declarations, root_element, write_element, write_stylesheet};
use crate::GeneratedCode;
use crate::config::{OutputConfig, ROOT_CLASS, StylingStrategy};
use crate::fragment::Decoration;
use crate::style::{container_declarations, js_string};
use crate::tree::{Forest, TreeNode};
use crate::writer::SourceWriter;

pub(crate) fn emit(forest: &Forest<'_>, config: &OutputConfig) -> GeneratedCode {
    let name = config.component_ident();
    let tag = config.custom_element_tag();
    let styling = config.styling;

    let root_decoration = match styling {
        StylingStrategy::Inline => Decoration::Inline(container_declarations()),
        StylingStrategy::Stylesheet | StylingStrategy::CssInJs => Decoration::Class(ROOT_CLASS.to_string()),
    };
    let nodes = component_nodes(&forest.roots, &|node| decorate(node, styling));
    let root = root_element("div", Some(root_decoration), nodes);

    let mut w = SourceWriter::new();
    if styling == StylingStrategy::CssInJs {
        w.line("const sheet = new CSSStyleSheet();");
        w.line("sheet.replaceSync(`");
        write_stylesheet(&mut w, forest);
        w.line("`);");
        w.blank();
    }

    w.line(format!("class {name} extends HTMLElement {{"));
    w.indent();
    w.line("constructor() {");
    w.indent();
    w.line("super();");
    let attach = "this.attachShadow({ mode: 'open' });";
    if config.typescript {
        w.line(format!("const shadow: ShadowRoot = {attach}"));
    } else {
        w.line(format!("const shadow = {attach}"));
    }
    if styling == StylingStrategy::CssInJs {
        w.line("shadow.adoptedStyleSheets = [sheet];");
    }
    w.line("shadow.innerHTML = `");
    w.indent();
    if styling == StylingStrategy::Stylesheet {
        w.line("<style>");
        w.indent();
        write_stylesheet(&mut w, forest);
        w.dedent();
        w.line("</style>");
    }
    write_element(&mut w, &root, Dialect::Html);
    w.dedent();
    w.line("`;");
    w.dedent();
    w.line("}");
    w.dedent();
    w.line("}");
    w.blank();

    let tag_literal = js_string(&tag);
    w.line(format!("if (!customElements.get({tag_literal})) {{"));
    w.indent();
    w.line(format!("customElements.define({tag_literal}, {name});"));
    w.dedent();
    w.line("}");

    let mut styles = SourceWriter::new();
    styles.line(format!("{tag} {{"));
    styles.indent();
    styles.line("display: block;");
    styles.line("width: 100%;");
    styles.line("height: 100vh;");
    styles.dedent();
    styles.line("}");

    GeneratedCode {
        source: w.finish(),
        styles: styles.finish(),
    }
}

fn decorate(node: &TreeNode<'_>, styling: StylingStrategy) -> Styled {
    let decoration = match styling {
        StylingStrategy::Inline => Decoration::Inline(node_declarations(node)),
        StylingStrategy::Stylesheet | StylingStrategy::CssInJs => Decoration::Class(node.class_name.clone()),
    };
    Styled {
        tag: None,
        decoration: Some(decoration),
    }
}
