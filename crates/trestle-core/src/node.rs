//! Diagram nodes and their size algebra.
//!
//! # Overview
//!
//! Every diagram element is a [`Node`]. Construction measures a node once,
//! bottom-up, into its [`Metrics`]; formatting then places it at an absolute
//! entry point inside a slot of a given width and returns the positioned
//! [`Element`] tree.
//!
//! ```text
//!            ┬ up
//!   entry ───┴──────────┐
//!            ┬ height   │
//!            ┴          └────── exit
//!                              ┬ down
//!                              ┴
//! ```
//!
//! - **Leaves**: [`Terminal`], [`NonTerminal`], [`Comment`], [`Skip`],
//!   [`Block`], [`Start`], [`End`]
//! - **Sequential**: [`Sequence`], [`Stack`], [`OptionalSequence`],
//!   [`AlternatingSequence`], [`HorizontalChoice`]
//! - **Branching**: [`Choice`], [`MultipleChoice`]
//! - **Adapters**: [`OneOrMore`], [`Group`]
//!
//! Nodes are built through [`Railroad`](crate::Railroad), which owns the
//! style constants used for measurement.

mod alternating;
mod choice;
mod group;
mod horizontal_choice;
mod leaf;
mod optional_sequence;
mod repeat;
mod sequence;

pub use alternating::AlternatingSequence;
pub use choice::{Choice, ChoiceKind, MultipleChoice};
pub use group::Group;
pub use horizontal_choice::HorizontalChoice;
pub use leaf::{Block, Comment, End, NonTerminal, SentinelKind, Skip, Start, Terminal, TextOptions};
pub use optional_sequence::OptionalSequence;
pub use repeat::OneOrMore;
pub use sequence::{Sequence, Stack};

pub(crate) use sequence::chain_metrics;

use log::trace;

use crate::{
    draw::{Element, PathBuilder},
    geometry::Point,
    style::StyleConfig,
};

/// Gap inserted on each side of a node that needs connecting space.
pub(crate) const SPACING: f64 = 10.0;

/// Intrinsic size of a node, fixed at construction.
///
/// `up` is measured from the entry line, `down` from the exit line, and
/// `height` is the vertical offset from entry to exit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Metrics {
    width: f64,
    up: f64,
    down: f64,
    height: f64,
    needs_space: bool,
}

impl Metrics {
    pub fn new(width: f64, up: f64, down: f64, height: f64, needs_space: bool) -> Self {
        Self {
            width,
            up,
            down,
            height,
            needs_space,
        }
    }

    /// Horizontal footprint, excluding outer connector padding
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Maximum rise above the entry line
    pub fn up(&self) -> f64 {
        self.up
    }

    /// Maximum drop below the exit line
    pub fn down(&self) -> f64 {
        self.down
    }

    /// Vertical offset between entry and exit
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Whether a fixed gap is requested on both sides inside sequences
    pub fn needs_space(&self) -> bool {
        self.needs_space
    }

    /// Width plus the connecting runs requested by `needs_space`.
    pub fn spaced_width(&self, per_side: f64) -> f64 {
        self.width + if self.needs_space { 2.0 * per_side } else { 0.0 }
    }

    /// Total vertical extent, `up + height + down`.
    pub fn extent(&self) -> f64 {
        self.up + self.height + self.down
    }

    /// The `data-updown` debug value.
    pub(crate) fn updown(&self) -> String {
        use crate::draw::fmt_num;
        format!(
            "{} {} {}",
            fmt_num(self.up),
            fmt_num(self.height),
            fmt_num(self.down)
        )
    }
}

/// Measurement and placement shared by every node type.
pub trait Layout {
    /// Returns the intrinsic metrics computed at construction.
    fn metrics(&self) -> &Metrics;

    /// Places the node and returns its render tree.
    ///
    /// # Arguments
    ///
    /// * `origin` - Absolute entry point of the slot
    /// * `width` - Width of the slot; spare width is distributed with
    ///   [`StyleConfig::gaps`]
    /// * `style` - Style the node was constructed with
    fn format(&self, origin: Point, width: f64, style: &StyleConfig) -> Element;
}

/// A diagram node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
    Comment(Comment),
    Skip(Skip),
    Block(Block),
    Start(Start),
    End(End),
    Sequence(Sequence),
    Stack(Stack),
    Choice(Choice),
    MultipleChoice(MultipleChoice),
    OptionalSequence(OptionalSequence),
    AlternatingSequence(AlternatingSequence),
    HorizontalChoice(HorizontalChoice),
    OneOrMore(OneOrMore),
    Group(Group),
}

macro_rules! dispatch {
    ($self:expr, $inner:ident => $body:expr) => {
        match $self {
            Node::Terminal($inner) => $body,
            Node::NonTerminal($inner) => $body,
            Node::Comment($inner) => $body,
            Node::Skip($inner) => $body,
            Node::Block($inner) => $body,
            Node::Start($inner) => $body,
            Node::End($inner) => $body,
            Node::Sequence($inner) => $body,
            Node::Stack($inner) => $body,
            Node::Choice($inner) => $body,
            Node::MultipleChoice($inner) => $body,
            Node::OptionalSequence($inner) => $body,
            Node::AlternatingSequence($inner) => $body,
            Node::HorizontalChoice($inner) => $body,
            Node::OneOrMore($inner) => $body,
            Node::Group($inner) => $body,
        }
    };
}

impl Node {
    /// Returns the definition type name of this node, e.g. `"NonTerminal"`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Terminal(_) => "Terminal",
            Self::NonTerminal(_) => "NonTerminal",
            Self::Comment(_) => "Comment",
            Self::Skip(_) => "Skip",
            Self::Block(_) => "Block",
            Self::Start(_) => "Start",
            Self::End(_) => "End",
            Self::Sequence(_) => "Sequence",
            Self::Stack(_) => "Stack",
            Self::Choice(_) => "Choice",
            Self::MultipleChoice(_) => "MultipleChoice",
            Self::OptionalSequence(_) => "OptionalSequence",
            Self::AlternatingSequence(_) => "AlternatingSequence",
            Self::HorizontalChoice(_) => "HorizontalChoice",
            Self::OneOrMore(_) => "OneOrMore",
            Self::Group(_) => "Group",
        }
    }

    /// Short name written to the `data-type` debug attribute.
    fn debug_name(&self) -> &'static str {
        match self {
            Self::Terminal(_) => "terminal",
            Self::NonTerminal(_) => "nonterminal",
            Self::Comment(_) => "comment",
            Self::Skip(_) => "skip",
            Self::Block(_) => "block",
            Self::Start(_) => "start",
            Self::End(_) => "end",
            Self::Sequence(_) => "sequence",
            Self::Stack(_) => "stack",
            Self::Choice(_) => "choice",
            Self::MultipleChoice(_) => "multiplechoice",
            Self::OptionalSequence(_) => "optseq",
            Self::AlternatingSequence(_) => "altseq",
            Self::HorizontalChoice(_) => "horizontalchoice",
            Self::OneOrMore(_) => "oneormore",
            Self::Group(_) => "group",
        }
    }

    /// Returns the child nodes in drawing order.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Self::Terminal(_)
            | Self::NonTerminal(_)
            | Self::Comment(_)
            | Self::Skip(_)
            | Self::Block(_)
            | Self::Start(_)
            | Self::End(_) => Vec::new(),
            Self::Sequence(n) => n.items().iter().collect(),
            Self::Stack(n) => n.items().iter().collect(),
            Self::Choice(n) => n.items().iter().collect(),
            Self::MultipleChoice(n) => n.items().iter().collect(),
            Self::OptionalSequence(n) => n.items().iter().collect(),
            Self::AlternatingSequence(n) => n.items().iter().collect(),
            Self::HorizontalChoice(n) => n.items().iter().collect(),
            Self::OneOrMore(n) => vec![n.item(), n.repeat()],
            Self::Group(n) => [n.item()].into_iter().chain(n.label()).collect(),
        }
    }

    /// Visits this node and all descendants, parents first.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Node)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}

impl Layout for Node {
    fn metrics(&self) -> &Metrics {
        dispatch!(self, inner => inner.metrics())
    }

    fn format(&self, origin: Point, width: f64, style: &StyleConfig) -> Element {
        trace!(
            node = self.type_name(),
            x = origin.x(),
            y = origin.y(),
            width;
            "Formatting node"
        );
        let mut element = dispatch!(self, inner => inner.format(origin, width, style));
        if style.debug_annotations() {
            element.set_attr("data-updown", self.metrics().updown());
            element.set_attr("data-type", self.debug_name());
        }
        element
    }
}

/// A child argument to a container constructor.
///
/// Plain strings are shorthand for a [`Terminal`] with that text.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Node(Node),
    Text(String),
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl Child {
    /// Resolves the child into a node, wrapping text as a terminal.
    pub fn into_node(self, style: &StyleConfig) -> Node {
        match self {
            Self::Node(node) => node,
            Self::Text(text) => Node::Terminal(Terminal::new(text, TextOptions::default(), style)),
        }
    }
}

/// Starts a connector path at `(x, y)`.
pub(crate) fn path(x: f64, y: f64, style: &StyleConfig) -> PathBuilder {
    PathBuilder::new(Point::new(x, y), style.arc_radius())
}

/// Draws the two side runs that fill a slot wider than the node and returns
/// the x position where the node itself begins.
///
/// The left run starts at the entry line, the right run at the exit line.
pub(crate) fn push_gap_runs(
    group: &mut Element,
    origin: Point,
    width: f64,
    metrics: &Metrics,
    style: &StyleConfig,
) -> f64 {
    let (x, y) = (origin.x(), origin.y());
    let (before, after) = style.gaps(width, metrics.width());
    group.push(path(x, y, style).h(before).finish());
    group.push(
        path(x + before + metrics.width(), y + metrics.height(), style)
            .h(after)
            .finish(),
    );
    x + before
}

/// Largest value produced by `f` over `items`, or zero when empty.
pub(crate) fn max_of<'a>(
    items: impl IntoIterator<Item = &'a Node>,
    f: impl Fn(&Metrics) -> f64,
) -> f64 {
    items
        .into_iter()
        .map(|item| f(item.metrics()))
        .reduce(f64::max)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Railroad;

    #[test]
    fn test_metrics_accessors() {
        let metrics = Metrics::new(40.0, 11.0, 12.0, 3.0, true);
        assert_eq!(metrics.width(), 40.0);
        assert_eq!(metrics.up(), 11.0);
        assert_eq!(metrics.down(), 12.0);
        assert_eq!(metrics.height(), 3.0);
        assert!(metrics.needs_space());
        assert_eq!(metrics.spaced_width(10.0), 60.0);
        assert_eq!(metrics.extent(), 26.0);
        assert_eq!(metrics.updown(), "11 3 12");
    }

    #[test]
    fn test_child_from_text_is_terminal() {
        let style = StyleConfig::default();
        let node = Child::from("if").into_node(&style);
        assert!(matches!(node, Node::Terminal(_)));
        assert_eq!(node.metrics().width(), 37.0);
    }

    #[test]
    fn test_walk_visits_parents_first() {
        let rr = Railroad::default();
        let node = rr.sequence(["a", "b"]).unwrap();
        let mut names = Vec::new();
        node.walk(&mut |n| names.push(n.type_name()));
        assert_eq!(names, ["Sequence", "Terminal", "Terminal"]);
    }

    #[test]
    fn test_debug_annotations_added_at_format_time() {
        let style = StyleConfig::default().with_debug_annotations(true);
        let rr = Railroad::new(style.clone());
        let element = rr.terminal("x").format(Point::new(0.0, 0.0), 28.5, &style);
        assert_eq!(element.attr("data-updown"), Some("11 0 11"));
        assert_eq!(element.attr("data-type"), Some("terminal"));

        let plain = StyleConfig::default();
        let element = rr.terminal("x").format(Point::new(0.0, 0.0), 28.5, &plain);
        assert_eq!(element.attr("data-type"), None);
    }

    #[test]
    fn test_max_of_empty_is_zero() {
        assert_eq!(max_of(std::iter::empty(), |m| m.width()), 0.0);
    }
}
