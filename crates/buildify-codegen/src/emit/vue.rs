//! Vue single-file component output.

use super::{Dialect, Styled, component_nodes, node_declarations, root_element, write_element, write_stylesheet};
use crate::GeneratedCode;
use crate::config::{OutputConfig, ROOT_CLASS, StylingStrategy};
use crate::fragment::Decoration;
use crate::style::{container_declarations, js_string, to_js_object};
use crate::tree::{Forest, TreeNode};
use crate::writer::SourceWriter;

pub(crate) fn emit(forest: &Forest<'_>, config: &OutputConfig) -> GeneratedCode {
    let styling = config.styling;

    let root_decoration = match styling {
        StylingStrategy::Inline => Decoration::Inline(container_declarations()),
        StylingStrategy::Stylesheet => Decoration::Class(ROOT_CLASS.to_string()),
        StylingStrategy::CssInJs => Decoration::Binding("styles.root".to_string()),
    };
    let nodes = component_nodes(&forest.roots, &|node| decorate(node, styling));
    let root = root_element("div", Some(root_decoration), nodes);

    let mut w = SourceWriter::new();
    w.line("<template>");
    w.indent();
    write_element(&mut w, &root, Dialect::Vue);
    w.dedent();
    w.line("</template>");
    w.blank();

    if config.typescript {
        w.line(r#"<script setup lang="ts">"#);
    } else {
        w.line("<script setup>");
    }
    if styling == StylingStrategy::CssInJs && config.typescript {
        w.line("import type { CSSProperties } from 'vue';");
        w.blank();
    }
    w.line(format!(
        "defineOptions({{ name: {} }});",
        js_string(&config.component_ident())
    ));
    if styling == StylingStrategy::CssInJs {
        w.blank();
        if config.typescript {
            w.line("const styles: Record<string, CSSProperties> = {");
        } else {
            w.line("const styles = {");
        }
        w.indent();
        w.line(format!("root: {},", to_js_object(&container_declarations())));
        for node in forest.walk() {
            w.line(format!("{}: {},", node.key(), to_js_object(&node_declarations(node))));
        }
        w.dedent();
        w.line("};");
    }
    w.line("</script>");

    if styling == StylingStrategy::Stylesheet {
        w.blank();
        w.line("<style scoped>");
        write_stylesheet(&mut w, forest);
        w.line("</style>");
    }

    // Styles stay inside the single-file component.
    GeneratedCode {
        source: w.finish(),
        styles: String::new(),
    }
}

fn decorate(node: &TreeNode<'_>, styling: StylingStrategy) -> Styled {
    let decoration = match styling {
        StylingStrategy::Inline => Decoration::Inline(node_declarations(node)),
        StylingStrategy::Stylesheet => Decoration::Class(node.class_name.clone()),
        StylingStrategy::CssInJs => Decoration::Binding(format!("styles.{}", node.key())),
    };
    Styled {
        tag: None,
        decoration: Some(decoration),
    }
}
