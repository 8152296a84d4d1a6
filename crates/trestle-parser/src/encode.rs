//! Definition encoding, the inverse of [`crate::decode`].
//!
//! Adapters built by the factory are stored as the nodes they expand to, so
//! an `Optional` is written back as the `Choice` it became.

use serde_json::{Value, json};

use trestle_core::{
    Diagram, Layout, Node,
    node::{SentinelKind, TextOptions},
};

/// Writes `node` as a definition tree.
///
/// # Examples
///
/// ```
/// # use trestle_core::Railroad;
/// # use trestle_parser::{node_from_definition, to_definition};
/// let rr = Railroad::default();
/// let node = rr.sequence(["a", "b"])?;
/// let definition = to_definition(&node);
/// assert_eq!(definition["type"], "Sequence");
/// assert_eq!(node_from_definition(&definition, &rr).unwrap(), node);
/// # Ok::<(), trestle_core::ConstructionError>(())
/// ```
pub fn to_definition(node: &Node) -> Value {
    match node {
        Node::Terminal(t) => text_definition("Terminal", t.text(), t.options()),
        Node::NonTerminal(nt) => text_definition("NonTerminal", nt.text(), nt.options()),
        Node::Comment(c) => text_definition("Comment", c.text(), c.options()),
        Node::Skip(_) => json!({ "type": "Skip" }),
        Node::Block(block) => {
            let m = block.metrics();
            json!({
                "type": "Block",
                "width": m.width(),
                "up": m.up(),
                "height": m.height(),
                "down": m.down(),
            })
        }
        Node::Start(start) => {
            let mut definition = json!({ "type": "Start", "kind": start.kind().to_string() });
            if let Some(label) = start.label() {
                definition["label"] = json!(label);
            }
            definition
        }
        Node::End(end) => json!({ "type": "End", "kind": end.kind().to_string() }),
        Node::Sequence(seq) => items_definition("Sequence", seq.items()),
        Node::Stack(stack) => items_definition("Stack", stack.items()),
        Node::OptionalSequence(seq) => items_definition("OptionalSequence", seq.items()),
        Node::AlternatingSequence(seq) => items_definition("AlternatingSequence", seq.items()),
        Node::HorizontalChoice(choice) => items_definition("HorizontalChoice", choice.items()),
        Node::Choice(choice) => json!({
            "type": "Choice",
            "normal": choice.normal(),
            "items": list(choice.items()),
        }),
        Node::MultipleChoice(choice) => json!({
            "type": "MultipleChoice",
            "normal": choice.normal(),
            "kind": choice.kind().to_string(),
            "items": list(choice.items()),
        }),
        Node::OneOrMore(repeat) => json!({
            "type": "OneOrMore",
            "item": to_definition(repeat.item()),
            "repeat": to_definition(repeat.repeat()),
        }),
        Node::Group(group) => {
            let mut definition = json!({ "type": "Group", "item": to_definition(group.item()) });
            if let Some(Node::Comment(label)) = group.label() {
                definition["label"] = json!(label.text());
            }
            definition
        }
    }
}

/// Writes `diagram` as a definition tree, start and end markers included.
pub fn diagram_to_definition(diagram: &Diagram) -> Value {
    let type_name = match diagram.kind() {
        SentinelKind::Simple => "Diagram",
        SentinelKind::Complex => "ComplexDiagram",
    };
    json!({ "type": type_name, "items": list(diagram.items()) })
}

fn text_definition(type_name: &str, text: &str, options: &TextOptions) -> Value {
    let mut definition = json!({ "type": type_name, "text": text });
    if let Some(href) = options.href() {
        definition["href"] = json!(href);
    }
    if let Some(title) = options.title() {
        definition["title"] = json!(title);
    }
    if let Some(class) = options.class() {
        definition["cls"] = json!(class);
    }
    definition
}

fn items_definition(type_name: &str, items: &[Node]) -> Value {
    json!({ "type": type_name, "items": list(items) })
}

fn list(items: &[Node]) -> Value {
    Value::Array(items.iter().map(to_definition).collect())
}
