//! Error types and diagnostic reporting

use crate::ast::Span;
use serde::Serialize;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, ContractError>;

/// Hard failure while reading or parsing input
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("syntax error at {span}: {message}")]
    Syntax { message: String, span: Span },

    #[error("IO error: {message}")]
    Io { message: String },

    #[error("manifest error: {message}")]
    Manifest { message: String },
}

impl ContractError {
    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self::Syntax {
            message: message.into(),
            span,
        }
    }

    pub fn io_error(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn manifest(message: impl Into<String>) -> Self {
        Self::Manifest {
            message: message.into(),
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Syntax { span, .. } => Some(*span),
            Self::Io { .. } | Self::Manifest { .. } => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Syntax { message, .. } => message,
            Self::Io { message, .. } => message,
            Self::Manifest { message, .. } => message,
        }
    }
}

/// Problem category for a collected diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    Syntax,
    TypeMismatch,
    NullabilityConflict,
    UnreachableClause,
    UnsatisfiableClause,
    MutationPurityConflict,
}

impl DiagnosticKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Syntax => "Syntax",
            Self::TypeMismatch => "Type",
            Self::NullabilityConflict => "Nullability",
            Self::UnreachableClause => "Unreachable clause",
            Self::UnsatisfiableClause => "Unsatisfiable clause",
            Self::MutationPurityConflict => "Purity",
        }
    }
}

/// One problem found in a contract annotation.
/// The span points into the annotation source string the problem was
/// found in; all diagnostics are errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    /// Index of the offending clause, when the problem is clause-scoped
    pub clause: Option<usize>,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(
        kind: DiagnosticKind,
        message: impl Into<String>,
        clause: Option<usize>,
        span: Span,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            clause,
            span,
        }
    }
}

/// Report a hard error with ariadne
pub fn report_error(filename: &str, source: &str, error: &ContractError) {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let kind = match error {
        ContractError::Syntax { .. } => "Syntax",
        ContractError::Io { .. } => "IO",
        ContractError::Manifest { .. } => "Manifest",
    };

    if let Some(span) = error.span() {
        Report::build(ReportKind::Error, (filename, span.start..span.end))
            .with_message(format!("{kind} error"))
            .with_label(
                Label::new((filename, span.start..span.end))
                    .with_message(error.message())
                    .with_color(Color::Red),
            )
            .finish()
            .print((filename, Source::from(source)))
            .unwrap();
    } else {
        // Errors without span (IO, Manifest)
        Report::build(ReportKind::Error, (filename, 0..0))
            .with_message(format!("{kind} error: {}", error.message()))
            .finish()
            .print((filename, Source::from(source)))
            .unwrap();
    }
}

/// Report one collected diagnostic against the annotation source with ariadne
pub fn report_diagnostic(filename: &str, source: &str, diagnostic: &Diagnostic) {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    Report::build(
        ReportKind::Error,
        (filename, diagnostic.span.start..diagnostic.span.end),
    )
    .with_message(format!("{} error", diagnostic.kind.label()))
    .with_label(
        Label::new((filename, diagnostic.span.start..diagnostic.span.end))
            .with_message(&diagnostic.message)
            .with_color(Color::Red),
    )
    .finish()
    .print((filename, Source::from(source)))
    .unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_carries_span() {
        let err = ContractError::syntax("missing `->`", Span::new(3, 7));
        assert_eq!(err.span(), Some(Span::new(3, 7)));
        assert_eq!(err.message(), "missing `->`");
    }

    #[test]
    fn test_io_error_has_no_span() {
        let err = ContractError::io_error("file not found");
        assert_eq!(err.span(), None);
        assert_eq!(err.message(), "file not found");
    }

    #[test]
    fn test_error_display() {
        let err = ContractError::syntax("unexpected token", Span::new(0, 4));
        assert_eq!(err.to_string(), "syntax error at 0..4: unexpected token");
    }

    #[test]
    fn test_diagnostic_new() {
        let d = Diagnostic::new(
            DiagnosticKind::UnreachableClause,
            "dead clause",
            Some(2),
            Span::new(10, 20),
        );
        assert_eq!(d.kind, DiagnosticKind::UnreachableClause);
        assert_eq!(d.clause, Some(2));
        assert_eq!(d.span, Span::new(10, 20));
    }
}
