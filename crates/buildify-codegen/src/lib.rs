//! Buildify Code Generation
//!
//! Turns a component set into source code for React, Vue or Web Components,
//! with inline, stylesheet or CSS-in-JS styling. Generation is a pure
//! function of the components and the [`OutputConfig`]: the same input
//! always produces byte-identical output, independent of component ids.

pub mod config;
pub mod preview;
pub mod props;
pub mod style;

mod emit;
mod fragment;
mod tree;
mod writer;

pub use config::{DEFAULT_COMPONENT_NAME, OutputConfig, OutputFormat, ParseConfigError, ROOT_CLASS, StylingStrategy};
pub use preview::{PreviewSlot, Ticket};
pub use props::ElementProps;

use buildify_core::{Component, Document};
use tree::Forest;

/// Generated source plus an optional companion stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedCode {
    pub source: String,
    /// Empty when the format keeps its styles inside `source`.
    pub styles: String,
}

impl GeneratedCode {
    /// Output files as `(file name, contents)` pairs.
    pub fn files(&self, config: &OutputConfig) -> Vec<(&'static str, &str)> {
        let mut files = vec![(config.source_file_name(), self.source.as_str())];
        if let Some(name) = config.styles_file_name() {
            if !self.styles.is_empty() {
                files.push((name, self.styles.as_str()));
            }
        }
        files
    }
}

/// Generate code for `components`, nested by their parent links.
///
/// Input order decides sibling order. Components whose parent is not part of
/// the input are emitted at top level.
pub fn generate<'a, I>(components: I, config: &OutputConfig) -> GeneratedCode
where
    I: IntoIterator<Item = &'a Component>,
{
    let components: Vec<&Component> = components.into_iter().collect();
    let name = config.component_ident();
    let root = format!("{name}Root");
    let forest = Forest::with_reserved(&components, &[name.as_str(), root.as_str()]);
    log::debug!(
        "Generating {} ({} styling, typescript: {}) for {} components",
        config.format,
        config.styling,
        config.typescript,
        components.len()
    );
    if forest.is_empty() {
        log::debug!("No components; emitting empty scaffold");
    }

    match config.format {
        OutputFormat::React => emit::react::emit(&forest, config),
        OutputFormat::Vue => emit::vue::emit(&forest, config),
        OutputFormat::WebComponents => emit::web_components::emit(&forest, config),
    }
}

/// Generate code for every component of a document, in creation order.
pub fn generate_document(document: &Document, config: &OutputConfig) -> GeneratedCode {
    generate(document.components_ordered(), config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_skip_empty_styles() {
        let code = GeneratedCode {
            source: "x".to_string(),
            styles: String::new(),
        };
        let config = OutputConfig::new();
        assert_eq!(code.files(&config), vec![("App.jsx", "x")]);

        let styled = GeneratedCode {
            source: "x".to_string(),
            styles: ".a {}".to_string(),
        };
        assert_eq!(
            styled.files(&config.with_format(OutputFormat::Vue)),
            vec![("App.vue", "x")]
        );
    }
}
