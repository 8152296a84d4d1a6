//! Error adapter for converting TrestleError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Syntax errors are
//! labelled in the definition text; all other errors are reported with a
//! code and, where one helps, a hint.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use trestle::{DeserializationError, TrestleError};

/// Adapter for a definition error together with the text it came from.
pub struct DefinitionAdapter<'a> {
    err: &'a DeserializationError,
    src: &'a str,
}

impl<'a> DefinitionAdapter<'a> {
    /// Create a new definition adapter.
    pub fn new(err: &'a DeserializationError, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for DefinitionAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefinitionAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for DefinitionAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.err, f)
    }
}

impl std::error::Error for DefinitionAdapter<'_> {}

impl MietteDiagnostic for DefinitionAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.err {
            DeserializationError::Syntax { .. } => "trestle::syntax",
            DeserializationError::UnsupportedFormat(_) => "trestle::format",
            _ => "trestle::definition",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.err {
            DeserializationError::UnknownType { .. } => {
                "node types are Terminal, NonTerminal, Comment, Skip, Block, Start, End, \
                 Sequence, Stack, Choice, MultipleChoice, OptionalSequence, \
                 AlternatingSequence, HorizontalChoice, Optional, OneOrMore, ZeroOrMore \
                 and Group"
            }
            DeserializationError::UnsupportedFormat(_) => {
                "convert the definition to JSON or YAML, or pass --input-type"
            }
            DeserializationError::InvalidNode { .. } => {
                "write a node as a mapping with a `type` field, or a string for a terminal"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.err.location()?;
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let (line, column) = self.err.location()?;
        let span = span_at(self.src, line, column)?;
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some("here".to_string()),
            span,
        ))))
    }
}

/// Adapter for [`TrestleError`] variants without source text.
pub struct ErrorAdapter<'a>(pub &'a TrestleError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            TrestleError::Io(_) => "trestle::io",
            TrestleError::Deserialize { .. } => "trestle::definition",
            TrestleError::Config(_) => "trestle::config",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A definition error, with the definition text.
    Definition(DefinitionAdapter<'a>),
    /// Any other error.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Definition(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Definition(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Definition(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Definition(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Definition(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Definition(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`TrestleError`] into a reportable error.
pub fn to_reportable(err: &TrestleError) -> Reportable<'_> {
    match err {
        TrestleError::Deserialize { err, src } => {
            Reportable::Definition(DefinitionAdapter::new(err, src))
        }
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}

/// One-character span at a 1-based line and column of `src`.
fn span_at(src: &str, line: usize, column: usize) -> Option<SourceSpan> {
    let line_start = match line {
        0 => return None,
        1 => 0,
        n => src.match_indices('\n').nth(n - 2)?.0 + 1,
    };
    let line_text = src[line_start..].split('\n').next().unwrap_or_default();
    let (offset, len) = line_text
        .char_indices()
        .nth(column.saturating_sub(1))
        .map_or((line_text.len(), 0), |(i, c)| (i, c.len_utf8()));
    Some(SourceSpan::new((line_start + offset).into(), len))
}

#[cfg(test)]
mod tests {
    use trestle::{DiagramBuilder, InputFormat};

    use super::*;

    fn parse_error(src: &str, format: InputFormat) -> TrestleError {
        DiagramBuilder::default().parse(src, format).unwrap_err()
    }

    #[test]
    fn test_syntax_error_is_labelled() {
        let err = parse_error("[\n  \"a\",\n  ]", InputFormat::Json);
        let reportable = to_reportable(&err);

        assert!(matches!(reportable, Reportable::Definition(_)));
        assert_eq!(reportable.code().unwrap().to_string(), "trestle::syntax");
        assert!(reportable.source_code().is_some());
        let labels: Vec<_> = reportable.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].primary());
        // the label sits on the third line
        assert!(labels[0].offset() >= "[\n  \"a\",\n".len());
    }

    #[test]
    fn test_definition_error_has_help() {
        let err = parse_error(r#"{"type": "Loop"}"#, InputFormat::Json);
        let reportable = to_reportable(&err);

        assert_eq!(reportable.code().unwrap().to_string(), "trestle::definition");
        assert!(reportable.help().unwrap().to_string().contains("NonTerminal"));
        assert!(reportable.labels().is_none());
        assert!(reportable.source_code().is_none());
    }

    #[test]
    fn test_non_definition_error() {
        let err = TrestleError::Config("bad".to_string());
        let reportable = to_reportable(&err);

        match &reportable {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "Configuration error: bad");
            }
            Reportable::Definition(_) => panic!("Expected Error"),
        }
        assert_eq!(reportable.code().unwrap().to_string(), "trestle::config");
    }

    #[test]
    fn test_span_at() {
        let src = "ab\ncdé\n";
        assert_eq!(span_at(src, 1, 1), Some(SourceSpan::new(0.into(), 1)));
        assert_eq!(span_at(src, 2, 3), Some(SourceSpan::new(5.into(), 2)));
        assert_eq!(span_at(src, 2, 9), Some(SourceSpan::new(7.into(), 0)));
        assert_eq!(span_at(src, 5, 1), None);
        assert_eq!(span_at(src, 0, 1), None);
    }
}
