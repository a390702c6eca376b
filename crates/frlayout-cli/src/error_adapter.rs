//! Error adapter for converting FrLayoutError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI. Parse errors carry
//! the offending input, so they are rendered with a labelled source snippet.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use frlayout::FrLayoutError;

/// Adapter that renders a [`FrLayoutError`] through miette.
pub struct ErrorAdapter<'a>(pub &'a FrLayoutError);

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
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            FrLayoutError::Io(_) => "frlayout::io",
            FrLayoutError::Parse { .. } => "frlayout::parse",
            FrLayoutError::Graph(_) => "frlayout::graph",
            FrLayoutError::InvalidEdgeReference { .. } => "frlayout::edge",
            FrLayoutError::InvalidConfiguration(_) => "frlayout::config",
            FrLayoutError::Export(_) => "frlayout::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            FrLayoutError::Parse { .. } => {
                "graph files list `[[node]]` tables (id, width, height) and `[[edge]]` tables (source, target)"
            }
            FrLayoutError::InvalidConfiguration(_) => {
                "the canvas needs a positive width and height, and the temperature must not be negative"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self.0 {
            FrLayoutError::Parse { src, .. } => Some(src as &dyn miette::SourceCode),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let FrLayoutError::Parse {
            span: Some(span), ..
        } = self.0
        else {
            return None;
        };
        let span = SourceSpan::new(span.start.into(), span.len());
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some("here".to_string()),
            span,
        ))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error(source: &str) -> FrLayoutError {
        let err = toml::from_str::<toml::Table>(source).unwrap_err();
        FrLayoutError::new_parse_error(&err, source)
    }

    #[test]
    fn test_parse_error_has_source_and_label() {
        let err = parse_error("[[node]]\nid = \n");
        let adapter = ErrorAdapter(&err);

        assert!(adapter.source_code().is_some());
        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].primary());
        assert_eq!(adapter.code().unwrap().to_string(), "frlayout::parse");
    }

    #[test]
    fn test_non_parse_error() {
        let err = FrLayoutError::Graph("graph error".to_string());
        let adapter = ErrorAdapter(&err);

        assert_eq!(adapter.to_string(), "Graph error: graph error");
        assert_eq!(adapter.code().unwrap().to_string(), "frlayout::graph");
        assert!(adapter.source_code().is_none());
        assert!(adapter.labels().is_none());
        assert!(adapter.help().is_none());
    }

    #[test]
    fn test_report_renders() {
        let err = parse_error("[[edge]]\nsource = \"a\"\ntarget = \n");
        let mut writer = String::new();
        miette::GraphicalReportHandler::new()
            .render_report(&mut writer, &ErrorAdapter(&err))
            .unwrap();
        assert!(writer.contains("frlayout::parse"));
    }
}
