//! Leaf nodes: labelled boxes, comments, skips, blocks and the start/end
//! sentinels.

use std::fmt;

use super::{Layout, Metrics, path, push_gap_runs};
use crate::{ConstructionError, draw::Element, geometry::Point, style::StyleConfig};

/// Corner radius of terminal boxes.
const TERMINAL_CORNER_RADIUS: f64 = 10.0;

/// Half the height of a terminal or non-terminal box.
const BOX_HALF_HEIGHT: f64 = 11.0;

/// Optional decorations on terminals, non-terminals and comments.
///
/// # Examples
///
/// ```
/// # use trestle_core::node::TextOptions;
/// let options = TextOptions::new()
///     .with_href("#expr")
///     .with_title("expression")
///     .with_class("keyword");
/// assert_eq!(options.href(), Some("#expr"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextOptions {
    href: Option<String>,
    title: Option<String>,
    class: Option<String>,
}

impl TextOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps the label in a link to `href`.
    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Adds a `<title>` tooltip.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Appends an extra CSS class to the node group.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    fn group(&self, base_class: &str) -> Element {
        let class = match self.class.as_deref() {
            Some(extra) if !extra.is_empty() => format!("{base_class} {extra}"),
            _ => base_class.to_string(),
        };
        Element::new("g").with_attr("class", class)
    }

    /// Adds the label (linked if requested) and the optional title.
    fn push_label(&self, group: &mut Element, label: Element) {
        match &self.href {
            Some(href) => group.push(
                Element::new("a")
                    .with_attr("xlink:href", href)
                    .with_child(label),
            ),
            None => group.push(label),
        }
        if let Some(title) = &self.title {
            group.push(Element::text("title", title));
        }
    }
}

fn char_count(text: &str) -> f64 {
    text.chars().count() as f64
}

/// A literal token, drawn as a rounded box.
#[derive(Debug, Clone, PartialEq)]
pub struct Terminal {
    text: String,
    options: TextOptions,
    metrics: Metrics,
}

impl Terminal {
    pub(crate) fn new(text: impl Into<String>, options: TextOptions, style: &StyleConfig) -> Self {
        let text = text.into();
        let width = char_count(&text) * style.terminal_char_width() + 20.0;
        Self {
            text,
            options,
            metrics: Metrics::new(width, BOX_HALF_HEIGHT, BOX_HALF_HEIGHT, 0.0, true),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &TextOptions {
        &self.options
    }
}

impl Layout for Terminal {
    fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn format(&self, origin: Point, width: f64, style: &StyleConfig) -> Element {
        let mut group = self.options.group("terminal");
        let x = push_gap_runs(&mut group, origin, width, &self.metrics, style);
        let y = origin.y();
        let m = &self.metrics;
        group.push(
            Element::new("rect")
                .with_attr("x", x)
                .with_attr("y", y - BOX_HALF_HEIGHT)
                .with_attr("width", m.width())
                .with_attr("height", m.up() + m.down())
                .with_attr("rx", TERMINAL_CORNER_RADIUS)
                .with_attr("ry", TERMINAL_CORNER_RADIUS),
        );
        let label = Element::text("text", &self.text)
            .with_attr("x", x + m.width() / 2.0)
            .with_attr("y", y + 4.0);
        self.options.push_label(&mut group, label);
        group
    }
}

/// A reference to another rule, drawn as a square box.
#[derive(Debug, Clone, PartialEq)]
pub struct NonTerminal {
    text: String,
    options: TextOptions,
    metrics: Metrics,
}

impl NonTerminal {
    pub(crate) fn new(text: impl Into<String>, options: TextOptions, style: &StyleConfig) -> Self {
        let text = text.into();
        let width = char_count(&text) * style.terminal_char_width() + 20.0;
        Self {
            text,
            options,
            metrics: Metrics::new(width, BOX_HALF_HEIGHT, BOX_HALF_HEIGHT, 0.0, true),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &TextOptions {
        &self.options
    }
}

impl Layout for NonTerminal {
    fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn format(&self, origin: Point, width: f64, style: &StyleConfig) -> Element {
        let mut group = self.options.group("non-terminal");
        let x = push_gap_runs(&mut group, origin, width, &self.metrics, style);
        let y = origin.y();
        let m = &self.metrics;
        group.push(
            Element::new("rect")
                .with_attr("x", x)
                .with_attr("y", y - BOX_HALF_HEIGHT)
                .with_attr("width", m.width())
                .with_attr("height", m.up() + m.down()),
        );
        let label = Element::text("text", &self.text)
            .with_attr("x", x + m.width() / 2.0)
            .with_attr("y", y + 4.0);
        self.options.push_label(&mut group, label);
        group
    }
}

/// Free text on the line, without a box.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    text: String,
    options: TextOptions,
    metrics: Metrics,
}

impl Comment {
    pub(crate) fn new(text: impl Into<String>, options: TextOptions, style: &StyleConfig) -> Self {
        let text = text.into();
        let width = char_count(&text) * style.comment_char_width() + 10.0;
        Self {
            text,
            options,
            metrics: Metrics::new(width, 8.0, 8.0, 0.0, true),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &TextOptions {
        &self.options
    }
}

impl Layout for Comment {
    fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn format(&self, origin: Point, width: f64, style: &StyleConfig) -> Element {
        let mut group = self.options.group("comment");
        let x = push_gap_runs(&mut group, origin, width, &self.metrics, style);
        let label = Element::text("text", &self.text)
            .with_attr("x", x + self.metrics.width() / 2.0)
            .with_attr("y", origin.y() + 5.0)
            .with_attr("class", "comment");
        self.options.push_label(&mut group, label);
        group
    }
}

/// An empty path; stretches to whatever width it is given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Skip {
    metrics: Metrics,
}

impl Skip {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl Layout for Skip {
    fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn format(&self, origin: Point, width: f64, style: &StyleConfig) -> Element {
        Element::new("g").with_child(path(origin.x(), origin.y(), style).right(width).finish())
    }
}

/// An opaque box with caller-chosen dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    metrics: Metrics,
}

impl Block {
    pub const DEFAULT_WIDTH: f64 = 50.0;
    pub const DEFAULT_UP: f64 = 15.0;
    pub const DEFAULT_HEIGHT: f64 = 25.0;
    pub const DEFAULT_DOWN: f64 = 15.0;

    pub(crate) fn new(width: f64, up: f64, height: f64, down: f64) -> Self {
        Self {
            metrics: Metrics::new(width, up, down, height, true),
        }
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_WIDTH,
            Self::DEFAULT_UP,
            Self::DEFAULT_HEIGHT,
            Self::DEFAULT_DOWN,
        )
    }
}

impl Layout for Block {
    fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn format(&self, origin: Point, width: f64, style: &StyleConfig) -> Element {
        let mut group = Element::new("g");
        let x = push_gap_runs(&mut group, origin, width, &self.metrics, style);
        let m = &self.metrics;
        group.push(
            Element::new("rect")
                .with_attr("x", x)
                .with_attr("y", origin.y() - m.up())
                .with_attr("width", m.width())
                .with_attr("height", m.extent()),
        );
        group
    }
}

/// Drawing style of the start and end sentinels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SentinelKind {
    /// Double tick mark
    #[default]
    Simple,
    /// Single cap, used by complex diagrams
    Complex,
}

impl SentinelKind {
    /// Parses `"simple"` or `"complex"`.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvalidEnum`] naming `container` for any
    /// other value.
    pub fn parse(value: &str, container: &'static str) -> Result<Self, ConstructionError> {
        match value {
            "simple" => Ok(Self::Simple),
            "complex" => Ok(Self::Complex),
            _ => Err(ConstructionError::InvalidEnum {
                container,
                argument: "kind",
                value: value.to_string(),
                expected: "simple, complex",
            }),
        }
    }
}

impl fmt::Display for SentinelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => write!(f, "simple"),
            Self::Complex => write!(f, "complex"),
        }
    }
}

/// Entry marker of a diagram, optionally labelled.
#[derive(Debug, Clone, PartialEq)]
pub struct Start {
    kind: SentinelKind,
    label: Option<String>,
    metrics: Metrics,
}

impl Start {
    pub(crate) fn new(kind: SentinelKind, label: Option<String>, style: &StyleConfig) -> Self {
        let label = label.filter(|label| !label.is_empty());
        let width = match &label {
            Some(label) => f64::max(20.0, char_count(label) * style.terminal_char_width() + 10.0),
            None => 20.0,
        };
        Self {
            kind,
            label,
            metrics: Metrics::new(width, 10.0, 10.0, 0.0, false),
        }
    }

    pub fn kind(&self) -> SentinelKind {
        self.kind
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl Layout for Start {
    fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn format(&self, origin: Point, _width: f64, style: &StyleConfig) -> Element {
        let (x, y) = (origin.x(), origin.y());
        let tick = path(x, y - 10.0, style).down(20.0);
        let tick = match self.kind {
            SentinelKind::Simple => tick
                .move_by(10.0, -20.0)
                .down(20.0)
                .move_by(-10.0, -10.0),
            SentinelKind::Complex => tick.move_by(0.0, -10.0),
        };
        let mut group = Element::new("g").with_child(tick.right(self.metrics.width()).finish());
        if let Some(label) = &self.label {
            group.push(
                Element::text("text", label)
                    .with_attr("x", x)
                    .with_attr("y", y - 15.0)
                    .with_attr("style", "text-anchor:start"),
            );
        }
        group
    }
}

/// Exit marker of a diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct End {
    kind: SentinelKind,
    metrics: Metrics,
}

impl End {
    pub(crate) fn new(kind: SentinelKind) -> Self {
        Self {
            kind,
            metrics: Metrics::new(20.0, 10.0, 10.0, 0.0, false),
        }
    }

    pub fn kind(&self) -> SentinelKind {
        self.kind
    }
}

impl Layout for End {
    fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn format(&self, origin: Point, _width: f64, _style: &StyleConfig) -> Element {
        use crate::draw::fmt_num;
        let (x, y) = (fmt_num(origin.x()), fmt_num(origin.y()));
        let data = match self.kind {
            SentinelKind::Simple => format!("M {x} {y} h 20 m -10 -10 v 20 m 10 -20 v 20"),
            SentinelKind::Complex => format!("M {x} {y} h 20 m 0 -10 v 20"),
        };
        Element::new("path").with_attr("d", data)
    }
}
