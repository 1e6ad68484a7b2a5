//! Style serialization shared by every format and styling strategy.
//!
//! [`declarations`] turns a component style into one typed declaration
//! list; the renderers below only format that list.

use crate::writer::SourceWriter;
use buildify_core::{FontWeight, Insets, Style};
use kurbo::Point;

/// A typed CSS value.
#[derive(Debug, Clone, PartialEq)]
pub enum CssValue {
    /// Pixel length.
    Length(f64),
    /// Unitless number.
    Number(f64),
    /// Keyword or free CSS text.
    Text(String),
}

/// One `property: value` pair, property in CSS (kebab-case) spelling.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub property: &'static str,
    pub value: CssValue,
}

impl Declaration {
    pub fn new(property: &'static str, value: CssValue) -> Self {
        Self { property, value }
    }

    pub fn text(property: &'static str, value: impl Into<String>) -> Self {
        Self::new(property, CssValue::Text(value.into()))
    }
}

/// Declarations for a component box positioned relative to `origin`.
///
/// Empty text values are skipped. Hidden components keep their box and get
/// `visibility: hidden`.
pub fn declarations(style: &Style, origin: Point, visible: bool) -> Vec<Declaration> {
    use CssValue::{Length, Number};

    let mut out = vec![
        Declaration::text("position", "absolute"),
        Declaration::new("left", Length(style.position.x - origin.x)),
        Declaration::new("top", Length(style.position.y - origin.y)),
        Declaration::new("width", Length(style.size.width)),
        Declaration::new("height", Length(style.size.height)),
        Declaration::new("z-index", Number(style.z_index.into())),
        Declaration::text("background-color", style.background_color.as_str()),
        Declaration::text("color", style.color.as_str()),
        Declaration::new("font-size", Length(style.font_size)),
        Declaration::text("font-family", style.font_family.as_str()),
        Declaration::new(
            "font-weight",
            match &style.font_weight {
                FontWeight::Numeric(weight) => Number((*weight).into()),
                FontWeight::Keyword(keyword) => CssValue::Text(keyword.clone()),
            },
        ),
        Declaration::text("text-align", style.text_align.as_str()),
        Declaration::new("line-height", Number(style.line_height)),
        Declaration::new("letter-spacing", Length(style.letter_spacing)),
        Declaration::new("border-radius", Length(style.border_radius)),
        Declaration::text(
            "border",
            format!(
                "{}px solid {}",
                format_number(style.border_width),
                style.border_color
            ),
        ),
        Declaration::text("padding", insets(&style.padding)),
        Declaration::text("margin", insets(&style.margin)),
        Declaration::text("box-shadow", style.box_shadow.as_str()),
        Declaration::new("opacity", Number(style.opacity)),
        Declaration::text("transform", style.transform.as_str()),
        Declaration::text("filter", style.filter.as_str()),
    ];
    if !visible {
        out.push(Declaration::text("visibility", "hidden"));
    }
    out.retain(|declaration| !matches!(&declaration.value, CssValue::Text(text) if text.trim().is_empty()));
    out
}

/// Declarations for the generated root container.
pub fn container_declarations() -> Vec<Declaration> {
    vec![
        Declaration::text("position", "relative"),
        Declaration::text("width", "100%"),
        Declaration::text("height", "100vh"),
        Declaration::text("background", "#f9fafb"),
        Declaration::text("overflow", "hidden"),
    ]
}

fn insets(insets: &Insets) -> String {
    format!(
        "{}px {}px {}px {}px",
        format_number(insets.top),
        format_number(insets.right),
        format_number(insets.bottom),
        format_number(insets.left)
    )
}

/// Shortest decimal form; non-finite values become 0.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

impl CssValue {
    /// The value as CSS text.
    pub fn to_css(&self) -> String {
        match self {
            CssValue::Length(value) => format!("{}px", format_number(*value)),
            CssValue::Number(value) => format_number(*value),
            CssValue::Text(text) => sanitize_css(text),
        }
    }

    /// The value as a JavaScript expression.
    pub fn to_js(&self) -> String {
        match self {
            CssValue::Number(value) => format_number(*value),
            other => js_string(&other.to_css()),
        }
    }
}

/// Drop characters that could end a declaration, a rule or the
/// surrounding script and markup context.
fn sanitize_css(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>' | '`' | '\\' | '\n' | '\r'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Write a `selector { ... }` rule.
pub(crate) fn write_css_rule(w: &mut SourceWriter, selector: &str, declarations: &[Declaration]) {
    w.line(format!("{selector} {{"));
    w.indent();
    write_css_body(w, declarations);
    w.dedent();
    w.line("}");
}

/// Write `property: value;` lines.
pub(crate) fn write_css_body(w: &mut SourceWriter, declarations: &[Declaration]) {
    for declaration in declarations {
        w.line(format!("{}: {};", declaration.property, declaration.value.to_css()));
    }
}

/// Declarations as the body of an HTML `style` attribute (not yet attribute-escaped).
pub fn to_inline_css(declarations: &[Declaration]) -> String {
    declarations
        .iter()
        .map(|d| format!("{}: {}", d.property, d.value.to_css()))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Declarations as a JavaScript object literal with camelCase keys.
pub fn to_js_object(declarations: &[Declaration]) -> String {
    if declarations.is_empty() {
        return "{}".to_string();
    }
    let entries = declarations
        .iter()
        .map(|d| format!("{}: {}", camel_case(d.property), d.value.to_js()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{ {entries} }}")
}

/// `background-color` → `backgroundColor`.
pub fn camel_case(property: &str) -> String {
    let mut out = String::with_capacity(property.len());
    let mut upper = false;
    for c in property.chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Single-quoted JavaScript string literal.
///
/// Quotes, markup and template delimiters are escaped so the literal can sit
/// inside JSX expressions, quoted attributes and template literals.
pub fn js_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\x22"),
            '`' => out.push_str("\\x60"),
            '$' => out.push_str("\\x24"),
            '&' => out.push_str("\\x26"),
            '<' => out.push_str("\\x3C"),
            '>' => out.push_str("\\x3E"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Escape text content for HTML, JSX and Vue templates alike.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            '`' => out.push_str("&#96;"),
            '\\' => out.push_str("&#92;"),
            c => out.push(c),
        }
    }
    out
}

/// Escape a double-quoted attribute value.
pub fn escape_attr(text: &str) -> String {
    escape_text(text).replace('"', "&quot;").replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;

    fn value_of<'a>(declarations: &'a [Declaration], property: &str) -> Option<&'a CssValue> {
        declarations.iter().find(|d| d.property == property).map(|d| &d.value)
    }

    #[test]
    fn test_declarations_are_relative_to_origin() {
        let style = Style {
            position: Point::new(120.0, 140.0),
            size: Size::new(80.5, 30.0),
            ..Style::default()
        };
        let declarations = declarations(&style, Point::new(100.0, 100.0), true);

        assert_eq!(value_of(&declarations, "left"), Some(&CssValue::Length(20.0)));
        assert_eq!(value_of(&declarations, "top"), Some(&CssValue::Length(40.0)));
        assert_eq!(value_of(&declarations, "width").unwrap().to_css(), "80.5px");
        assert_eq!(value_of(&declarations, "visibility"), None);
    }

    #[test]
    fn test_hidden_and_empty_values() {
        let style = Style {
            filter: String::new(),
            ..Style::default()
        };
        let declarations = declarations(&style, Point::ZERO, false);
        assert_eq!(value_of(&declarations, "filter"), None);
        assert_eq!(
            value_of(&declarations, "visibility"),
            Some(&CssValue::Text("hidden".to_string()))
        );
    }

    #[test]
    fn test_value_rendering() {
        assert_eq!(CssValue::Length(16.0).to_css(), "16px");
        assert_eq!(CssValue::Length(16.0).to_js(), "'16px'");
        assert_eq!(CssValue::Number(0.5).to_js(), "0.5");
        assert_eq!(CssValue::Number(f64::NAN).to_css(), "0");
        assert_eq!(CssValue::Text("red; } body {".to_string()).to_css(), "red  body");
    }

    #[test]
    fn test_renderers_share_declarations() {
        let declarations = vec![
            Declaration::text("background-color", "#fff"),
            Declaration::new("z-index", CssValue::Number(2.0)),
        ];
        assert_eq!(to_inline_css(&declarations), "background-color: #fff; z-index: 2");
        assert_eq!(to_js_object(&declarations), "{ backgroundColor: '#fff', zIndex: 2 }");

        let mut w = SourceWriter::new();
        write_css_rule(&mut w, ".a", &declarations);
        assert_eq!(w.finish(), ".a {\n  background-color: #fff;\n  z-index: 2;\n}\n");
    }

    #[test]
    fn test_escaping() {
        assert_eq!(js_string("it's \"x\""), r#"'it\'s \x22x\x22'"#);
        assert_eq!(js_string("${a}"), r"'\x24{a}'");
        assert_eq!(escape_text("<b>{x}</b> & `y`"), "&lt;b&gt;&#123;x&#125;&lt;/b&gt; &amp; &#96;y&#96;");
        assert_eq!(escape_attr(r#"a"b'c"#), "a&quot;b&#39;c");
    }
}
