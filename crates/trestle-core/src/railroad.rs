//! Node construction.
//!
//! [`Railroad`] owns the [`StyleConfig`] used to measure nodes and exposes
//! one constructor per node type. Container constructors accept any mix of
//! nodes and plain strings; strings become terminals.

use crate::{
    ConstructionError,
    diagram::Diagram,
    node::{
        AlternatingSequence, Block, Child, Choice, ChoiceKind, Comment, End, Group,
        HorizontalChoice, MultipleChoice, Node, NonTerminal, OneOrMore, OptionalSequence,
        SentinelKind, Sequence, Skip, Stack, Start, Terminal, TextOptions,
    },
    style::StyleConfig,
};

/// Factory for diagram nodes.
///
/// # Examples
///
/// ```
/// # use trestle_core::{Railroad, StyleConfig, node::ChoiceKind};
/// let rr = Railroad::new(StyleConfig::default());
/// let select = rr.sequence([
///     rr.terminal("SELECT"),
///     rr.choice(0, [rr.skip(), rr.terminal("DISTINCT")])?,
///     rr.one_or_more(rr.non_terminal("column"), Some(",".into())),
/// ])?;
/// let diagram = rr.diagram([select]);
/// assert_eq!(diagram.items().len(), 3);
/// # Ok::<(), trestle_core::ConstructionError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Railroad {
    style: StyleConfig,
}

impl Railroad {
    pub fn new(style: StyleConfig) -> Self {
        Self { style }
    }

    /// The style every node built by this factory is measured with.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    fn resolve(&self, child: impl Into<Child>) -> Node {
        child.into().into_node(&self.style)
    }

    fn resolve_all<I>(&self, items: I) -> Vec<Node>
    where
        I: IntoIterator,
        I::Item: Into<Child>,
    {
        items.into_iter().map(|item| self.resolve(item)).collect()
    }

    pub fn terminal(&self, text: impl Into<String>) -> Node {
        self.terminal_with(text, TextOptions::default())
    }

    pub fn terminal_with(&self, text: impl Into<String>, options: TextOptions) -> Node {
        Node::Terminal(Terminal::new(text, options, &self.style))
    }

    pub fn non_terminal(&self, text: impl Into<String>) -> Node {
        self.non_terminal_with(text, TextOptions::default())
    }

    pub fn non_terminal_with(&self, text: impl Into<String>, options: TextOptions) -> Node {
        Node::NonTerminal(NonTerminal::new(text, options, &self.style))
    }

    pub fn comment(&self, text: impl Into<String>) -> Node {
        self.comment_with(text, TextOptions::default())
    }

    pub fn comment_with(&self, text: impl Into<String>, options: TextOptions) -> Node {
        Node::Comment(Comment::new(text, options, &self.style))
    }

    pub fn skip(&self) -> Node {
        Node::Skip(Skip::new())
    }

    /// A block with the default 50 × (15 + 25 + 15) footprint.
    pub fn block(&self) -> Node {
        Node::Block(Block::default())
    }

    pub fn block_with(&self, width: f64, up: f64, height: f64, down: f64) -> Node {
        Node::Block(Block::new(width, up, height, down))
    }

    pub fn start(&self, kind: SentinelKind, label: Option<&str>) -> Node {
        Node::Start(Start::new(kind, label.map(str::to_string), &self.style))
    }

    pub fn end(&self, kind: SentinelKind) -> Node {
        Node::End(End::new(kind))
    }

    /// # Errors
    ///
    /// Returns [`ConstructionError::EmptyChildren`] when `items` is empty.
    pub fn sequence<I>(&self, items: I) -> Result<Node, ConstructionError>
    where
        I: IntoIterator,
        I::Item: Into<Child>,
    {
        Sequence::new(self.resolve_all(items)).map(Node::Sequence)
    }

    /// # Errors
    ///
    /// Returns [`ConstructionError::EmptyChildren`] when `items` is empty.
    pub fn stack<I>(&self, items: I) -> Result<Node, ConstructionError>
    where
        I: IntoIterator,
        I::Item: Into<Child>,
    {
        Stack::new(self.resolve_all(items), &self.style).map(Node::Stack)
    }

    /// A single item collapses to a [`Sequence`].
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::EmptyChildren`] when `items` is empty.
    pub fn optional_sequence<I>(&self, items: I) -> Result<Node, ConstructionError>
    where
        I: IntoIterator,
        I::Item: Into<Child>,
    {
        let items = self.resolve_all(items);
        match items.len() {
            0 => Err(ConstructionError::EmptyChildren {
                container: "OptionalSequence",
            }),
            1 => Sequence::new(items).map(Node::Sequence),
            _ => OptionalSequence::new(items, &self.style).map(Node::OptionalSequence),
        }
    }

    /// A single item collapses to a [`Sequence`].
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::ArityMismatch`] unless given one or two
    /// items.
    pub fn alternating_sequence<I>(&self, items: I) -> Result<Node, ConstructionError>
    where
        I: IntoIterator,
        I::Item: Into<Child>,
    {
        let items = self.resolve_all(items);
        if items.len() == 1 {
            return Sequence::new(items).map(Node::Sequence);
        }
        AlternatingSequence::new(items, &self.style).map(Node::AlternatingSequence)
    }

    /// A single item collapses to a [`Sequence`].
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::EmptyChildren`] when `items` is empty.
    pub fn horizontal_choice<I>(&self, items: I) -> Result<Node, ConstructionError>
    where
        I: IntoIterator,
        I::Item: Into<Child>,
    {
        let items = self.resolve_all(items);
        match items.len() {
            0 => Err(ConstructionError::EmptyChildren {
                container: "HorizontalChoice",
            }),
            1 => Sequence::new(items).map(Node::Sequence),
            _ => HorizontalChoice::new(items, &self.style).map(Node::HorizontalChoice),
        }
    }

    /// # Errors
    ///
    /// Returns [`ConstructionError::InvalidIndex`] when `normal` does not
    /// index `items`.
    pub fn choice<I>(&self, normal: usize, items: I) -> Result<Node, ConstructionError>
    where
        I: IntoIterator,
        I::Item: Into<Child>,
    {
        Choice::new(normal, self.resolve_all(items), &self.style).map(Node::Choice)
    }

    /// # Errors
    ///
    /// Returns [`ConstructionError::InvalidIndex`] when `normal` does not
    /// index `items`.
    pub fn multiple_choice<I>(
        &self,
        normal: usize,
        kind: ChoiceKind,
        items: I,
    ) -> Result<Node, ConstructionError>
    where
        I: IntoIterator,
        I::Item: Into<Child>,
    {
        MultipleChoice::new(normal, kind, self.resolve_all(items), &self.style)
            .map(Node::MultipleChoice)
    }

    /// A choice between skipping and taking `item`.
    ///
    /// With `skip` set the skip branch is the main line.
    pub fn optional(&self, item: impl Into<Child>, skip: bool) -> Result<Node, ConstructionError> {
        let normal = if skip { 0 } else { 1 };
        self.choice(normal, [self.skip(), self.resolve(item)])
    }

    /// `item` repeated, with `repeat` (default: nothing) between repetitions.
    pub fn one_or_more(&self, item: impl Into<Child>, repeat: Option<Child>) -> Node {
        let repeat = repeat.map_or_else(|| self.skip(), |r| r.into_node(&self.style));
        Node::OneOrMore(OneOrMore::new(self.resolve(item), repeat, &self.style))
    }

    /// An optional [`one_or_more`](Self::one_or_more).
    pub fn zero_or_more(
        &self,
        item: impl Into<Child>,
        repeat: Option<Child>,
        skip: bool,
    ) -> Result<Node, ConstructionError> {
        self.optional(self.one_or_more(item, repeat), skip)
    }

    /// A dashed box around `item`; `label` is drawn above it as a comment.
    pub fn group(&self, item: impl Into<Child>, label: Option<&str>) -> Node {
        let label = label.map(|text| self.comment(text));
        Node::Group(Group::new(self.resolve(item), label, &self.style))
    }

    /// A diagram with simple start and end markers.
    pub fn diagram<I>(&self, items: I) -> Diagram
    where
        I: IntoIterator,
        I::Item: Into<Child>,
    {
        Diagram::new(self.resolve_all(items), SentinelKind::Simple, &self.style)
    }

    /// A diagram with complex start and end markers, for rules that are
    /// entered from or lead into other diagrams.
    pub fn complex_diagram<I>(&self, items: I) -> Diagram
    where
        I: IntoIterator,
        I::Item: Into<Child>,
    {
        Diagram::new(self.resolve_all(items), SentinelKind::Complex, &self.style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Layout;

    #[test]
    fn test_optional_normal_branch() {
        let rr = Railroad::default();
        let Node::Choice(taken) = rr.optional("a", false).unwrap() else {
            panic!("optional did not build a choice");
        };
        assert_eq!(taken.normal(), 1);
        assert!(matches!(taken.items()[0], Node::Skip(_)));

        let Node::Choice(skipped) = rr.optional("a", true).unwrap() else {
            panic!("optional did not build a choice");
        };
        assert_eq!(skipped.normal(), 0);
    }

    #[test]
    fn test_zero_or_more_wraps_one_or_more() {
        let rr = Railroad::default();
        let node = rr.zero_or_more("a", Some(",".into()), false).unwrap();
        let Node::Choice(choice) = node else {
            panic!("zero_or_more did not build a choice");
        };
        let Node::OneOrMore(repeat) = &choice.items()[1] else {
            panic!("taken branch is not a repetition");
        };
        assert!(matches!(repeat.repeat(), Node::Terminal(t) if t.text() == ","));
    }

    #[test]
    fn test_strings_become_terminals() {
        let rr = Railroad::default();
        let node = rr.sequence(["x", "y"]).unwrap();
        for child in node.children() {
            assert!(matches!(child, Node::Terminal(_)));
        }
    }

    #[test]
    fn test_mixed_children() {
        let rr = Railroad::default();
        let items: Vec<Child> = vec![
            rr.non_terminal("expr").into(),
            "+".into(),
            String::from("term").into(),
        ];
        let node = rr.sequence(items).unwrap();
        let names: Vec<&str> = node.children().iter().map(|c| c.type_name()).collect();
        assert_eq!(names, ["NonTerminal", "Terminal", "Terminal"]);
    }

    #[test]
    fn test_style_drives_measurement() {
        let rr = Railroad::new(StyleConfig::default().with_terminal_char_width(10.0));
        assert_eq!(rr.terminal("abc").metrics().width(), 50.0);
    }
}
