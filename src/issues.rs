//! Issue types produced while building a catalog.
//!
//! Issues are data, never errors: the pipeline collects them in a
//! [`DiagnosticsSink`](crate::core::DiagnosticsSink) and the CLI reports them
//! after the catalog has been printed. Each issue is self-contained with all
//! information the reporter needs.

use enum_dispatch::enum_dispatch;
use serde::Serialize;

use crate::core::{ParseError, SourceLocation};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    ParseFailure,
    DuplicateKey,
    UnsupportedExpression,
    UnsupportedAnnotationValue,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::ParseFailure => write!(f, "parse-failure"),
            Rule::DuplicateKey => write!(f, "duplicate-key"),
            Rule::UnsupportedExpression => write!(f, "unsupported-expression"),
            Rule::UnsupportedAnnotationValue => write!(f, "unsupported-annotation-value"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// File could not be read or parsed. The file contributes nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailureIssue {
    pub file_path: String,
    pub error: ParseError,
}

impl ParseFailureIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseFailure
    }

    fn position(&self) -> Option<SourceLocation> {
        (self.error.line > 0)
            .then(|| SourceLocation::new(&self.file_path, self.error.line, self.error.col))
    }
}

/// Two properties resolved to the same key. The first one is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKeyIssue {
    pub key: String,
    /// Where the rejected declaration lives.
    pub location: SourceLocation,
    /// Where the kept declaration lives.
    pub first: SourceLocation,
}

impl DuplicateKeyIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::DuplicateKey
    }
}

/// A default value that is not a simple literal, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedExpressionIssue {
    pub location: SourceLocation,
    pub key: String,
    /// Raw source text of the expression.
    pub expression: String,
}

impl UnsupportedExpressionIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnsupportedExpression
    }
}

/// A marker annotation element whose value is not of the expected literal kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedAnnotationValueIssue {
    pub location: SourceLocation,
    /// Annotation name as written.
    pub annotation: String,
    pub element: String,
    /// What was expected, e.g. "string literal".
    pub expected: &'static str,
    /// Raw source text of the value.
    pub found: String,
}

impl UnsupportedAnnotationValueIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnsupportedAnnotationValue
    }
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    ParseFailure(ParseFailureIssue),
    DuplicateKey(DuplicateKeyIssue),
    UnsupportedExpression(UnsupportedExpressionIssue),
    UnsupportedAnnotationValue(UnsupportedAnnotationValueIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::ParseFailure(_) => ParseFailureIssue::severity(),
            Issue::DuplicateKey(_) => DuplicateKeyIssue::severity(),
            Issue::UnsupportedExpression(_) => UnsupportedExpressionIssue::severity(),
            Issue::UnsupportedAnnotationValue(_) => UnsupportedAnnotationValueIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::ParseFailure(_) => ParseFailureIssue::rule(),
            Issue::DuplicateKey(_) => DuplicateKeyIssue::rule(),
            Issue::UnsupportedExpression(_) => UnsupportedExpressionIssue::rule(),
            Issue::UnsupportedAnnotationValue(_) => UnsupportedAnnotationValueIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Precise position inside a file.
    Source(SourceLocation),
    /// File-level only (unreadable file, or failure without a position).
    File { path: &'a str },
}

impl ReportLocation<'_> {
    pub fn file_path(&self) -> &str {
        match self {
            ReportLocation::Source(loc) => &loc.file_path,
            ReportLocation::File { path } => path,
        }
    }
}

impl std::fmt::Display for ReportLocation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportLocation::Source(loc) => write!(f, "{}", loc),
            ReportLocation::File { path } => write!(f, "{}", path),
        }
    }
}

/// Trait for types that can be reported to CLI.
///
/// Uses `enum_dispatch` for zero-cost dispatch on the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for ParseFailureIssue {
    fn location(&self) -> ReportLocation<'_> {
        match self.position() {
            Some(loc) => ReportLocation::Source(loc),
            None => ReportLocation::File {
                path: &self.file_path,
            },
        }
    }

    fn message(&self) -> String {
        self.error.message.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("file skipped, no properties extracted".to_string())
    }
}

impl Report for DuplicateKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(self.location.clone())
    }

    fn message(&self) -> String {
        format!("duplicate property key \"{}\"", self.key)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("first declared at {}", self.first))
    }
}

impl Report for UnsupportedExpressionIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(self.location.clone())
    }

    fn message(&self) -> String {
        format!("default value of \"{}\" is not a literal", self.key)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some("the expression is recorded verbatim and marked non-literal")
    }

    fn details(&self) -> Option<String> {
        Some(format!("expression: {}", self.expression))
    }
}

impl Report for UnsupportedAnnotationValueIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(self.location.clone())
    }

    fn message(&self) -> String {
        format!(
            "element \"{}\" of @{} must be a {}",
            self.element, self.annotation, self.expected
        )
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("found: {}", self.found))
    }
}
