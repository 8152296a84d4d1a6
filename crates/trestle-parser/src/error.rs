//! Errors raised while turning definition text into a diagram.
//!
//! Every variant past [`DeserializationError::Syntax`] carries the path of
//! the offending node inside the definition, written as `$` for the root
//! followed by field and index steps, e.g. `$.items[2].item`.

use thiserror::Error;

use trestle_core::ConstructionError;

use crate::InputFormat;

/// Failure to decode a diagram definition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeserializationError {
    /// The text is not well-formed JSON or YAML.
    #[error("invalid {format} at line {line}, column {column}: {message}")]
    Syntax {
        format: InputFormat,
        message: String,
        /// 1-based line, 0 when unknown
        line: usize,
        /// 1-based column, 0 when unknown
        column: usize,
    },

    /// The format is recognised but cannot be decoded.
    #[error("{0} definitions are not supported, use json or yaml")]
    UnsupportedFormat(InputFormat),

    /// A value where a node was expected is neither a mapping nor a string.
    #[error("{path}: expected a node mapping or a string, found {found}")]
    InvalidNode { path: String, found: &'static str },

    #[error("{path}: unknown node type `{type_name}`")]
    UnknownType { path: String, type_name: String },

    #[error("{path}: missing field `{field}`")]
    MissingField { path: String, field: &'static str },

    #[error("{path}: field `{field}` must be {expected}")]
    InvalidField {
        path: String,
        field: &'static str,
        expected: &'static str,
    },

    /// The fields decoded but the node rejected them.
    #[error("{path}: {source}")]
    Construction {
        path: String,
        #[source]
        source: ConstructionError,
    },
}

impl DeserializationError {
    /// Returns the definition path of the offending node, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Syntax { .. } | Self::UnsupportedFormat(_) => None,
            Self::InvalidNode { path, .. }
            | Self::UnknownType { path, .. }
            | Self::MissingField { path, .. }
            | Self::InvalidField { path, .. }
            | Self::Construction { path, .. } => Some(path),
        }
    }

    /// Returns the 1-based line and column of a syntax error.
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            Self::Syntax { line, column, .. } if *line > 0 => Some((*line, *column)),
            _ => None,
        }
    }

    pub(crate) fn from_json(err: &serde_json::Error) -> Self {
        Self::Syntax {
            format: InputFormat::Json,
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }

    pub(crate) fn from_yaml(err: &serde_yaml::Error) -> Self {
        let (line, column) = err
            .location()
            .map_or((0, 0), |location| (location.line(), location.column()));
        Self::Syntax {
            format: InputFormat::Yaml,
            message: err.to_string(),
            line,
            column,
        }
    }
}
