//! Definition decoding.
//!
//! Text is first read into a [`serde_json::Value`] tree (YAML included),
//! then walked top-down. Each node is built through the [`Railroad`] factory
//! as soon as its children are built, so construction errors surface with
//! the path of the node that raised them.

use log::{debug, trace};
use serde_json::{Map, Value};

use trestle_core::{
    Child, ConstructionError, Diagram, Node, Railroad,
    node::{Block, ChoiceKind, SentinelKind, TextOptions},
};

use crate::{DeserializationError, InputFormat};

type Result<T> = std::result::Result<T, DeserializationError>;

/// Decodes `source` written in `format`.
///
/// # Errors
///
/// Returns [`DeserializationError::UnsupportedFormat`] for
/// [`InputFormat::JavaScript`], otherwise see [`parse_json`].
pub fn parse(source: &str, format: InputFormat, rr: &Railroad) -> Result<Diagram> {
    match format {
        InputFormat::Json => parse_json(source, rr),
        InputFormat::Yaml => parse_yaml(source, rr),
        InputFormat::JavaScript => Err(DeserializationError::UnsupportedFormat(format)),
    }
}

/// Decodes a JSON definition.
///
/// # Errors
///
/// Returns [`DeserializationError::Syntax`] for malformed text and the
/// other variants for definitions that do not describe a valid diagram.
///
/// # Examples
///
/// ```
/// # use trestle_core::Railroad;
/// let rr = Railroad::default();
/// let diagram = trestle_parser::parse_json(
///     r#"{"type": "Diagram", "items": ["SELECT", {"type": "NonTerminal", "text": "column"}]}"#,
///     &rr,
/// )?;
/// // start and end markers are added around the two items
/// assert_eq!(diagram.items().len(), 4);
/// # Ok::<(), trestle_parser::DeserializationError>(())
/// ```
pub fn parse_json(source: &str, rr: &Railroad) -> Result<Diagram> {
    let value: Value =
        serde_json::from_str(source).map_err(|err| DeserializationError::from_json(&err))?;
    from_definition(&value, rr)
}

/// Decodes a YAML definition.
///
/// # Errors
///
/// As [`parse_json`].
pub fn parse_yaml(source: &str, rr: &Railroad) -> Result<Diagram> {
    let value: Value =
        serde_yaml::from_str(source).map_err(|err| DeserializationError::from_yaml(&err))?;
    from_definition(&value, rr)
}

/// Builds a diagram from a definition tree.
///
/// The root may be a `Diagram` or `ComplexDiagram` mapping, a list of items,
/// or any single node, which is wrapped in a simple diagram.
///
/// # Errors
///
/// Returns the first error found walking the tree in document order.
pub fn from_definition(value: &Value, rr: &Railroad) -> Result<Diagram> {
    let decoder = Decoder { rr };
    let diagram = decoder.diagram(value)?;
    debug!(
        kind:% = diagram.kind(),
        items = diagram.items().len();
        "Decoded diagram"
    );
    Ok(diagram)
}

/// Builds a single node from a definition tree.
///
/// # Errors
///
/// As [`from_definition`]. Diagram mappings are rejected.
pub fn node_from_definition(value: &Value, rr: &Railroad) -> Result<Node> {
    Decoder { rr }.node(value, ROOT)
}

const ROOT: &str = "$";

struct Decoder<'a> {
    rr: &'a Railroad,
}

impl Decoder<'_> {
    fn diagram(&self, value: &Value) -> Result<Diagram> {
        match value {
            Value::Array(items) => Ok(self.rr.diagram(self.node_list(items, ROOT)?)),
            Value::Object(map) => match type_name(map, ROOT)? {
                "Diagram" => Ok(self.rr.diagram(self.items(map, ROOT)?)),
                "ComplexDiagram" => Ok(self.rr.complex_diagram(self.items(map, ROOT)?)),
                _ => Ok(self.rr.diagram([self.node(value, ROOT)?])),
            },
            _ => Ok(self.rr.diagram([self.node(value, ROOT)?])),
        }
    }

    fn node(&self, value: &Value, path: &str) -> Result<Node> {
        let map = match value {
            Value::String(text) => return Ok(self.rr.terminal(text.as_str())),
            Value::Object(map) => map,
            other => {
                return Err(DeserializationError::InvalidNode {
                    path: path.to_string(),
                    found: kind_of(other),
                });
            }
        };
        let type_name = type_name(map, path)?;
        trace!(path, type_name; "Decoding node");

        let rr = self.rr;
        let node = match type_name {
            "Terminal" => {
                let (text, options) = text_fields(map, path)?;
                rr.terminal_with(text, options)
            }
            "NonTerminal" => {
                let (text, options) = text_fields(map, path)?;
                rr.non_terminal_with(text, options)
            }
            "Comment" => {
                let (text, options) = text_fields(map, path)?;
                rr.comment_with(text, options)
            }
            "Skip" => rr.skip(),
            "Block" => rr.block_with(
                number(map, "width", path)?.unwrap_or(Block::DEFAULT_WIDTH),
                number(map, "up", path)?.unwrap_or(Block::DEFAULT_UP),
                number(map, "height", path)?.unwrap_or(Block::DEFAULT_HEIGHT),
                number(map, "down", path)?.unwrap_or(Block::DEFAULT_DOWN),
            ),
            "Start" => rr.start(
                sentinel_kind(map, "Start", path)?,
                string(map, "label", path)?,
            ),
            "End" => rr.end(sentinel_kind(map, "End", path)?),
            "Sequence" => rr
                .sequence(self.items(map, path)?)
                .map_err(construction(path))?,
            "Stack" => rr.stack(self.items(map, path)?).map_err(construction(path))?,
            "OptionalSequence" => rr
                .optional_sequence(self.items(map, path)?)
                .map_err(construction(path))?,
            "AlternatingSequence" => rr
                .alternating_sequence(self.items(map, path)?)
                .map_err(construction(path))?,
            "HorizontalChoice" => rr
                .horizontal_choice(self.items(map, path)?)
                .map_err(construction(path))?,
            "Choice" => {
                let items = self.items(map, path)?;
                let normal = normal(map, "Choice", items.len(), path)?;
                rr.choice(normal, items).map_err(construction(path))?
            }
            "MultipleChoice" => {
                let items = self.items(map, path)?;
                let normal = normal(map, "MultipleChoice", items.len(), path)?;
                let kind = string(map, "kind", path)?
                    .ok_or_else(|| missing(path, "kind"))?
                    .parse::<ChoiceKind>()
                    .map_err(construction(path))?;
                rr.multiple_choice(normal, kind, items)
                    .map_err(construction(path))?
            }
            "Optional" => rr
                .optional(self.field(map, "item", path)?, skip_flag(map, path)?)
                .map_err(construction(path))?,
            "OneOrMore" => rr.one_or_more(
                self.field(map, "item", path)?,
                self.optional_field(map, "repeat", path)?.map(Child::from),
            ),
            "ZeroOrMore" => rr
                .zero_or_more(
                    self.field(map, "item", path)?,
                    self.optional_field(map, "repeat", path)?.map(Child::from),
                    skip_flag(map, path)?,
                )
                .map_err(construction(path))?,
            "Group" => rr.group(self.field(map, "item", path)?, string(map, "label", path)?),
            "Diagram" | "ComplexDiagram" => {
                return Err(DeserializationError::InvalidField {
                    path: path.to_string(),
                    field: "type",
                    expected: "a node type, diagrams are only allowed at the root",
                });
            }
            other => {
                return Err(DeserializationError::UnknownType {
                    path: path.to_string(),
                    type_name: other.to_string(),
                });
            }
        };
        Ok(node)
    }

    fn items(&self, map: &Map<String, Value>, path: &str) -> Result<Vec<Node>> {
        match map.get("items") {
            None => Err(missing(path, "items")),
            Some(Value::Array(items)) => self.node_list(items, &format!("{path}.items")),
            Some(_) => Err(invalid(path, "items", "a list of nodes")),
        }
    }

    fn node_list(&self, items: &[Value], path: &str) -> Result<Vec<Node>> {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.node(item, &format!("{path}[{i}]")))
            .collect()
    }

    fn field(&self, map: &Map<String, Value>, field: &'static str, path: &str) -> Result<Node> {
        self.optional_field(map, field, path)?
            .ok_or_else(|| missing(path, field))
    }

    fn optional_field(
        &self,
        map: &Map<String, Value>,
        field: &'static str,
        path: &str,
    ) -> Result<Option<Node>> {
        match map.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => self.node(value, &format!("{path}.{field}")).map(Some),
        }
    }
}

fn type_name<'v>(map: &'v Map<String, Value>, path: &str) -> Result<&'v str> {
    match map.get("type") {
        None => Err(missing(path, "type")),
        Some(Value::String(name)) => Ok(name.as_str()),
        Some(_) => Err(invalid(path, "type", "a string")),
    }
}

fn text_fields(map: &Map<String, Value>, path: &str) -> Result<(String, TextOptions)> {
    let text = string(map, "text", path)?.ok_or_else(|| missing(path, "text"))?;
    let mut options = TextOptions::new();
    if let Some(href) = string(map, "href", path)? {
        options = options.with_href(href);
    }
    if let Some(title) = string(map, "title", path)? {
        options = options.with_title(title);
    }
    if let Some(class) = string(map, "cls", path)? {
        options = options.with_class(class);
    }
    Ok((text.to_string(), options))
}

fn string<'v>(
    map: &'v Map<String, Value>,
    field: &'static str,
    path: &str,
) -> Result<Option<&'v str>> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.as_str())),
        Some(_) => Err(invalid(path, field, "a string")),
    }
}

fn number(map: &Map<String, Value>, field: &'static str, path: &str) -> Result<Option<f64>> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(value)) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| invalid(path, field, "a number")),
        Some(_) => Err(invalid(path, field, "a number")),
    }
}

fn normal(
    map: &Map<String, Value>,
    container: &'static str,
    len: usize,
    path: &str,
) -> Result<usize> {
    let index = map
        .get("normal")
        .ok_or_else(|| missing(path, "normal"))?
        .as_i64()
        .ok_or_else(|| invalid(path, "normal", "an integer"))?;
    usize::try_from(index).map_err(|_| DeserializationError::Construction {
        path: path.to_string(),
        source: ConstructionError::InvalidIndex {
            container,
            index,
            len,
        },
    })
}

fn sentinel_kind(
    map: &Map<String, Value>,
    container: &'static str,
    path: &str,
) -> Result<SentinelKind> {
    string(map, "kind", path)?
        .map(|kind| SentinelKind::parse(kind, container))
        .transpose()
        .map(Option::unwrap_or_default)
        .map_err(construction(path))
}

/// `skip` is `null`/absent, `"skip"`, or a boolean.
fn skip_flag(map: &Map<String, Value>, path: &str) -> Result<bool> {
    match map.get("skip") {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(skip)) => Ok(*skip),
        Some(Value::String(value)) if value == "skip" => Ok(true),
        Some(_) => Err(invalid(path, "skip", "null, \"skip\" or a boolean")),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

fn missing(path: &str, field: &'static str) -> DeserializationError {
    DeserializationError::MissingField {
        path: path.to_string(),
        field,
    }
}

fn invalid(path: &str, field: &'static str, expected: &'static str) -> DeserializationError {
    DeserializationError::InvalidField {
        path: path.to_string(),
        field,
        expected,
    }
}

fn construction(path: &str) -> impl FnOnce(ConstructionError) -> DeserializationError + '_ {
    move |source| DeserializationError::Construction {
        path: path.to_string(),
        source,
    }
}
