//! Render tree produced by formatting.
//!
//! # Overview
//!
//! An [`Element`] is a tag name, an ordered attribute map and either child
//! elements or a text payload. Formatting a node returns a fresh element
//! tree; the node tree itself is never modified.
//!
//! Two sinks are provided:
//!
//! - [`Element::to_markup`] writes the deterministic string form
//! - [`Element::to_svg_node`] converts into an [`svg`] crate node
//!
//! # Markup rules
//!
//! - `<tag name="value">`, attribute values escape `&` and `"`
//! - a newline follows the opening tag of `g` and `svg`
//! - `</tag>` followed by a newline closes every element
//! - text escapes `*`, `_`, `` ` ``, `[`, `]`, `<` and `&` as numeric
//!   character references

use indexmap::IndexMap;
use svg::Node as _;

/// Formats a coordinate the way it appears in output.
///
/// Integral values have no fractional part and negative zero prints as `0`.
///
/// ```
/// # use trestle_core::draw::fmt_num;
/// assert_eq!(fmt_num(10.0), "10");
/// assert_eq!(fmt_num(-0.0), "0");
/// assert_eq!(fmt_num(4.25), "4.25");
/// ```
pub fn fmt_num(value: f64) -> String {
    if value == 0.0 {
        return String::from("0");
    }
    format!("{value}")
}

/// Escapes text content for markup output.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '*' | '_' | '`' | '[' | ']' | '<' | '&' => {
                escaped.push_str(&format!("&#{};", u32::from(ch)));
            }
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

/// Conversion into an attribute value string.
///
/// Numbers go through [`fmt_num`] so every coordinate in the tree is
/// written the same way.
pub trait AttrValue {
    fn into_attr_value(self) -> String;
}

impl AttrValue for f64 {
    fn into_attr_value(self) -> String {
        fmt_num(self)
    }
}

impl AttrValue for &str {
    fn into_attr_value(self) -> String {
        self.to_string()
    }
}

impl AttrValue for String {
    fn into_attr_value(self) -> String {
        self
    }
}

impl AttrValue for &String {
    fn into_attr_value(self) -> String {
        self.clone()
    }
}

/// Payload of an [`Element`].
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Children(Vec<Element>),
    Text(String),
}

/// A positioned render-tree node.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attrs: IndexMap<String, String>,
    content: Content,
}

impl Element {
    /// Creates an element with no attributes and no children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: IndexMap::new(),
            content: Content::Children(Vec::new()),
        }
    }

    /// Creates an element whose content is a text payload.
    pub fn text(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: IndexMap::new(),
            content: Content::Text(text.into()),
        }
    }

    /// Sets an attribute, keeping the position of an existing key.
    pub fn with_attr(mut self, name: &str, value: impl AttrValue) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn set_attr(&mut self, name: &str, value: impl AttrValue) {
        self.attrs.insert(name.to_string(), value.into_attr_value());
    }

    /// Adds a child element.
    ///
    /// An element holding text is turned into a container; the text is
    /// dropped.
    pub fn push(&mut self, child: Element) {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            Content::Text(_) => self.content = Content::Children(vec![child]),
        }
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.push(child);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the value of an attribute, if set.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Iterates over attributes in insertion order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Returns the child elements, empty for a text element.
    pub fn children(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            Content::Text(_) => &[],
        }
    }

    /// Returns the text payload, if this is a text element.
    pub fn text_content(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(text),
            Content::Children(_) => None,
        }
    }

    /// Serializes the element and its descendants.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    /// Appends the serialized element to `out`.
    pub fn write_markup(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push_str(&format!(" {}=\"{}\"", name, escape_attr(value)));
        }
        out.push('>');
        if self.tag == "g" || self.tag == "svg" {
            out.push('\n');
        }
        match &self.content {
            Content::Text(text) => out.push_str(&escape_text(text)),
            Content::Children(children) => {
                for child in children {
                    child.write_markup(out);
                }
            }
        }
        out.push_str(&format!("</{}>\n", self.tag));
    }

    /// Converts the element into an [`svg`] DOM node.
    pub fn to_svg_node(&self) -> svg::node::element::Element {
        let mut node = svg::node::element::Element::new(self.tag.clone());
        for (name, value) in &self.attrs {
            node.assign(name.clone(), value.clone());
        }
        match &self.content {
            Content::Text(text) => node.append(svg::node::Text::new(text.clone())),
            Content::Children(children) => {
                for child in children {
                    node.append(child.to_svg_node());
                }
            }
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(0.0), "0");
        assert_eq!(fmt_num(-0.0), "0");
        assert_eq!(fmt_num(20.0), "20");
        assert_eq!(fmt_num(-10.0), "-10");
        assert_eq!(fmt_num(29.75), "29.75");
        assert_eq!(fmt_num(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a<b"), "a&#60;b");
        assert_eq!(escape_text("x & y"), "x &#38; y");
        assert_eq!(escape_text("[*_`]"), "&#91;&#42;&#95;&#96;&#93;");
        assert_eq!(escape_text("plain > text"), "plain > text");
    }

    #[test]
    fn test_markup_leaf_element() {
        let rect = Element::new("rect")
            .with_attr("x", 10.0)
            .with_attr("y", -1.5);
        assert_eq!(rect.to_markup(), "<rect x=\"10\" y=\"-1.5\"></rect>\n");
    }

    #[test]
    fn test_markup_group_newline_and_nesting() {
        let group = Element::new("g")
            .with_attr("class", "terminal")
            .with_child(Element::text("text", "if"));
        assert_eq!(
            group.to_markup(),
            "<g class=\"terminal\">\n<text>if</text>\n</g>\n"
        );
    }

    #[test]
    fn test_markup_attribute_escaping() {
        let link = Element::new("a").with_attr("xlink:href", "/q?a=\"1\"&b=2");
        assert_eq!(
            link.to_markup(),
            "<a xlink:href=\"/q?a=&quot;1&quot;&amp;b=2\"></a>\n"
        );
    }

    #[test]
    fn test_attribute_order_is_insertion_order() {
        let mut element = Element::new("svg")
            .with_attr("class", "d")
            .with_attr("width", 1.0);
        element.set_attr("class", "e");
        let names: Vec<&str> = element.attrs().map(|(name, _)| name).collect();
        assert_eq!(names, ["class", "width"]);
        assert_eq!(element.attr("class"), Some("e"));
    }

    #[test]
    fn test_to_svg_node_keeps_structure() {
        let tree = Element::new("g")
            .with_attr("class", "comment")
            .with_child(Element::text("text", "note"));
        let rendered = tree.to_svg_node().to_string();
        assert!(rendered.contains("class=\"comment\""));
        assert!(rendered.contains("note"));
        assert!(rendered.contains("<text>"));
    }
}
