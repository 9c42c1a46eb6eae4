//! Typed errors raised by the core.
//!
//! Only [`ConfigurationError`] ever escapes a run. [`ParseError`] is turned into
//! a per-file diagnostic by the pipeline.

use thiserror::Error;

/// Invalid recognition configuration. Fatal, raised before any file is processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("recognition option '{option}' must not be empty")]
    EmptyOption { option: &'static str },

    #[error("recognition option '{option}' is not a valid annotation name: \"{value}\"")]
    InvalidAnnotationName { option: &'static str, value: String },

    #[error("recognition option '{option}' is not a valid element name: \"{value}\"")]
    InvalidArgumentName { option: &'static str, value: String },

    #[error("recognition options '{first}' and '{second}' must differ (both are \"{value}\")")]
    Conflicting {
        first: &'static str,
        second: &'static str,
        value: String,
    },
}

/// Failure to turn one file's text into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at {line}:{col}")]
pub struct ParseError {
    pub message: String,
    /// 1-indexed; 0 when the failure is not tied to a position (e.g. unreadable file).
    pub line: usize,
    pub col: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            message: message.into(),
            line,
            col,
        }
    }

    pub fn unpositioned(message: impl Into<String>) -> Self {
        Self::new(message, 0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_messages() {
        let err = ConfigurationError::EmptyOption {
            option: "groupMarkerAnnotation",
        };
        assert_eq!(
            err.to_string(),
            "recognition option 'groupMarkerAnnotation' must not be empty"
        );

        let err = ConfigurationError::Conflicting {
            first: "groupMarkerAnnotation",
            second: "propertyMarkerAnnotation",
            value: "Config".to_string(),
        };
        assert!(err.to_string().contains("must differ"));
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new("expected identifier", 3, 14);
        assert_eq!(err.to_string(), "expected identifier at 3:14");
    }
}
