//! Error adapter for converting FerryError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use ferry::FerryError;

/// Adapter giving every [`FerryError`] a stable code, a help line where one
/// is useful and, for parse errors, a labelled source snippet.
pub struct ErrorAdapter(pub FerryError);

impl fmt::Debug for ErrorAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            FerryError::Config(_) => "ferry::config",
            FerryError::Index(_) => "ferry::index",
            FerryError::Reference(_) => "ferry::reference",
            FerryError::UnindexedElement { .. } => "ferry::unindexed_element",
            FerryError::Phase(_) => "ferry::phase",
            FerryError::Model(_) => "ferry::model",
            FerryError::Parse { .. } => "ferry::parse",
            FerryError::Io(_) => "ferry::io",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            FerryError::Config(_) => "check the configuration file and the command-line flags",
            FerryError::Reference(_) => {
                "every lifeline and method needs a `source` and a `destination`"
            }
            FerryError::UnindexedElement { .. } => {
                "links may only point at actors, classes, activation boxes or lifelines"
            }
            FerryError::Model(_) => {
                "symbol ids must be unique and links must name symbols of the same diagram"
            }
            FerryError::Index(_)
            | FerryError::Phase(_)
            | FerryError::Parse { .. }
            | FerryError::Io(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match &self.0 {
            FerryError::Parse { src, .. } => Some(src as &dyn miette::SourceCode),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let FerryError::Parse {
            span: Some(span), ..
        } = &self.0
        else {
            return None;
        };

        let span = SourceSpan::new(span.start.into(), span.len());
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some("here".to_string()), span),
        )))
    }
}
