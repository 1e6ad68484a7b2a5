//! Configuration for code generation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default name of the generated top-level component.
pub const DEFAULT_COMPONENT_NAME: &str = "BuildifyApp";

/// Class name of the generated root container.
pub const ROOT_CLASS: &str = "buildify-app";

/// Target UI format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    React,
    Vue,
    WebComponents,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::React, OutputFormat::Vue, OutputFormat::WebComponents];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::React => "react",
            OutputFormat::Vue => "vue",
            OutputFormat::WebComponents => "web-components",
        }
    }
}

/// Where component styles end up in the generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StylingStrategy {
    /// Style attributes on each element.
    #[default]
    Inline,
    /// Class names plus a stylesheet.
    Stylesheet,
    /// Styles declared in script: styled components, style objects or
    /// constructable stylesheets depending on the format.
    CssInJs,
}

impl StylingStrategy {
    pub const ALL: [StylingStrategy; 3] = [
        StylingStrategy::Inline,
        StylingStrategy::Stylesheet,
        StylingStrategy::CssInJs,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StylingStrategy::Inline => "inline",
            StylingStrategy::Stylesheet => "stylesheet",
            StylingStrategy::CssInJs => "css-in-js",
        }
    }
}

/// Error parsing a configuration option from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseConfigError {
    #[error("unknown output format '{0}' (expected react, vue or web-components)")]
    UnknownFormat(String),
    #[error("unknown styling strategy '{0}' (expected inline, stylesheet or css-in-js)")]
    UnknownStyling(String),
}

impl FromStr for OutputFormat {
    type Err = ParseConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "react" | "jsx" | "tsx" => Ok(OutputFormat::React),
            "vue" => Ok(OutputFormat::Vue),
            "web-components" | "webcomponents" | "wc" => Ok(OutputFormat::WebComponents),
            _ => Err(ParseConfigError::UnknownFormat(s.to_string())),
        }
    }
}

impl FromStr for StylingStrategy {
    type Err = ParseConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inline" => Ok(StylingStrategy::Inline),
            "stylesheet" | "css" | "css-modules" => Ok(StylingStrategy::Stylesheet),
            "css-in-js" | "styled-components" => Ok(StylingStrategy::CssInJs),
            _ => Err(ParseConfigError::UnknownStyling(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for StylingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration options for code generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputConfig {
    /// Target UI format
    pub format: OutputFormat,

    /// How styles are attached to elements
    pub styling: StylingStrategy,

    /// Emit TypeScript instead of JavaScript
    pub typescript: bool,

    /// Name of the generated top-level component
    pub component_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            styling: StylingStrategy::default(),
            typescript: false,
            component_name: DEFAULT_COMPONENT_NAME.to_string(),
        }
    }
}

impl OutputConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target format
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the styling strategy
    pub fn with_styling(mut self, styling: StylingStrategy) -> Self {
        self.styling = styling;
        self
    }

    /// Set whether to emit TypeScript
    pub fn with_typescript(mut self, typescript: bool) -> Self {
        self.typescript = typescript;
        self
    }

    /// Set the top-level component name
    pub fn with_component_name(mut self, name: impl Into<String>) -> Self {
        self.component_name = name.into();
        self
    }

    /// The component name reduced to a valid identifier.
    pub fn component_ident(&self) -> String {
        let ident: String = self
            .component_name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect();
        match ident.chars().next() {
            None => DEFAULT_COMPONENT_NAME.to_string(),
            Some(first) if first.is_ascii_digit() => format!("App{ident}"),
            Some(_) => ident,
        }
    }

    /// Custom element tag derived from the component name (`BuildifyApp` → `buildify-app`).
    ///
    /// Custom element names must contain a hyphen; single-word names get an
    /// `-element` suffix.
    pub fn custom_element_tag(&self) -> String {
        let mut tag = String::new();
        for (i, c) in self.component_ident().chars().enumerate() {
            if c.is_ascii_uppercase() {
                if i > 0 && !tag.ends_with('-') {
                    tag.push('-');
                }
                tag.push(c.to_ascii_lowercase());
            } else if c == '_' {
                if !tag.is_empty() && !tag.ends_with('-') {
                    tag.push('-');
                }
            } else {
                tag.push(c);
            }
        }
        let tag = tag.trim_end_matches('-').to_string();
        if tag.contains('-') { tag } else { format!("{tag}-element") }
    }

    /// File name for the generated source.
    pub fn source_file_name(&self) -> &'static str {
        match (self.format, self.typescript) {
            (OutputFormat::React, true) => "App.tsx",
            (OutputFormat::React, false) => "App.jsx",
            (OutputFormat::Vue, _) => "App.vue",
            (OutputFormat::WebComponents, true) => "components.ts",
            (OutputFormat::WebComponents, false) => "components.js",
        }
    }

    /// File name for the generated stylesheet, if the format has one.
    ///
    /// Vue keeps its styles inside the single-file component.
    pub fn styles_file_name(&self) -> Option<&'static str> {
        match self.format {
            OutputFormat::React => Some("App.css"),
            OutputFormat::Vue => None,
            OutputFormat::WebComponents => Some("index.css"),
        }
    }
}
