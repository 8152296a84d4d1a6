//! The diagram root and its formatted output.
//!
//! # Overview
//!
//! A [`Diagram`] is a top-level sequence bounded by exactly one start and
//! one end sentinel. [`Diagram::format`] places every node and returns a
//! [`FormattedDiagram`], which can be serialized as:
//!
//! - bare markup ([`FormattedDiagram::to_markup`]) for embedding in a page
//!   that already carries the stylesheet
//! - a standalone document ([`FormattedDiagram::to_standalone`]) with the
//!   stylesheet and namespace declarations included
//! - an [`svg::Document`] ([`FormattedDiagram::to_document`])
//!
//! # Example
//!
//! ```
//! # use trestle_core::{Railroad, geometry::Insets};
//! let rr = Railroad::default();
//! let diagram = rr.diagram(["a"]);
//! let formatted = diagram.format_with_padding(rr.style(), Insets::uniform(0.0));
//! assert_eq!(formatted.width(), 20.0 + 48.5 + 20.0);
//! ```

use std::fmt;

use log::debug;

use crate::{
    draw::{Element, fmt_num},
    geometry::{Insets, Point},
    node::{End, Layout, Metrics, Node, SPACING, SentinelKind, Start, chain_metrics, path},
    style::StyleConfig,
};

/// Stylesheet embedded by [`FormattedDiagram::to_standalone`] when no
/// other is given.
pub const DEFAULT_STYLESHEET: &str = r#"
	svg {
		background-color: hsl(30,20%,95%);
	}
	path {
		stroke-width: 3;
		stroke: black;
		fill: rgba(0,0,0,0);
	}
	text {
		font: bold 14px monospace;
		text-anchor: middle;
		white-space: pre;
	}
	text.diagram-text {
		font-size: 12px;
	}
	text.diagram-arrow {
		font-size: 16px;
	}
	text.label {
		text-anchor: start;
	}
	text.comment {
		font: italic 12px monospace;
	}
	g.non-terminal text {
		/*font-style: italic;*/
	}
	rect {
		stroke-width: 3;
		stroke: black;
		fill: hsl(120,100%,90%);
	}
	rect.group-box {
		stroke: gray;
		stroke-dasharray: 10 5;
		fill: none;
	}
	path.diagram-text {
		stroke-width: 3;
		stroke: black;
		fill: white;
		cursor: help;
	}
	g.diagram-text:hover path.diagram-text {
		fill: #eee;
	}"#;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// Root of a railroad diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    kind: SentinelKind,
    items: Vec<Node>,
    metrics: Metrics,
}

impl Diagram {
    /// Builds a diagram, adding start and end sentinels when absent.
    ///
    /// With [`SentinelKind::Complex`] existing sentinels are converted to the
    /// complex style; a start label is kept.
    pub(crate) fn new(mut items: Vec<Node>, kind: SentinelKind, style: &StyleConfig) -> Self {
        match items.first() {
            Some(Node::Start(start)) if start.kind() == kind => {}
            Some(Node::Start(start)) => {
                let label = start.label().map(str::to_string);
                items[0] = Node::Start(Start::new(kind, label, style));
            }
            _ => items.insert(0, Node::Start(Start::new(kind, None, style))),
        }
        match items.last() {
            Some(Node::End(end)) if end.kind() == kind => {}
            Some(Node::End(_)) => {
                let last = items.len() - 1;
                items[last] = Node::End(End::new(kind));
            }
            _ => items.push(Node::End(End::new(kind))),
        }

        let (width, up, down, height) = chain_metrics(&items);
        let metrics = Metrics::new(width, up, down, height, false);
        debug!(
            kind:% = kind,
            items = items.len(),
            width,
            height;
            "Constructed diagram"
        );
        Self {
            kind,
            items,
            metrics,
        }
    }

    pub fn kind(&self) -> SentinelKind {
        self.kind
    }

    /// Returns the top-level items, sentinels included.
    pub fn items(&self) -> &[Node] {
        &self.items
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Formats with the default padding of 20 on every side.
    pub fn format(&self, style: &StyleConfig) -> FormattedDiagram {
        self.format_with_padding(style, Insets::default())
    }

    /// Places every node and builds the root `<svg>` element.
    ///
    /// Formatting is pure: the same diagram, style and padding always
    /// produce identical output.
    pub fn format_with_padding(&self, style: &StyleConfig, padding: Insets) -> FormattedDiagram {
        let m = &self.metrics;
        let mut x = padding.left();
        let mut y = padding.top() + m.up();

        let mut group = Element::new("g");
        if style.odd_pixel_stroke() {
            group.set_attr("transform", "translate(.5 .5)");
        }
        for item in &self.items {
            let im = item.metrics();
            if im.needs_space() {
                group.push(path(x, y, style).h(SPACING).finish());
                x += SPACING;
            }
            group.push(item.format(Point::new(x, y), im.width(), style));
            x += im.width();
            y += im.height();
            if im.needs_space() {
                group.push(path(x, y, style).h(SPACING).finish());
                x += SPACING;
            }
        }

        let width = m.width() + padding.horizontal_sum();
        let height = m.extent() + padding.vertical_sum();
        let root = Element::new("svg")
            .with_attr("class", style.root_css_class())
            .with_attr("width", width)
            .with_attr("height", height)
            .with_attr("viewBox", format!("0 0 {} {}", fmt_num(width), fmt_num(height)))
            .with_child(group);
        debug!(width, height; "Formatted diagram");

        FormattedDiagram {
            root,
            width,
            height,
        }
    }
}

/// A placed diagram, ready for serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedDiagram {
    root: Element,
    width: f64,
    height: f64,
}

impl FormattedDiagram {
    /// The root `<svg>` element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Total width including padding.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Total height including padding.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Serializes the diagram without stylesheet or namespaces.
    pub fn to_markup(&self) -> String {
        self.root.to_markup()
    }

    /// Serializes a self-contained document.
    ///
    /// A `<style>` element holding `stylesheet` (or [`DEFAULT_STYLESHEET`])
    /// is appended and the SVG and XLink namespaces are declared. The
    /// formatted diagram itself is left unchanged.
    pub fn to_standalone(&self, stylesheet: Option<&str>) -> String {
        let mut root = self.root.clone();
        root.push(Element::text("style", stylesheet.unwrap_or(DEFAULT_STYLESHEET)));
        root.set_attr("xmlns", SVG_NAMESPACE);
        root.set_attr("xmlns:xlink", XLINK_NAMESPACE);
        root.to_markup()
    }

    /// Converts the diagram into an [`svg::Document`].
    pub fn to_document(&self) -> svg::Document {
        let mut document = svg::Document::new();
        for (name, value) in self.root.attrs() {
            document = document.set(name, value);
        }
        for child in self.root.children() {
            document = document.add(child.to_svg_node());
        }
        document
    }
}

impl fmt::Display for FormattedDiagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markup())
    }
}
