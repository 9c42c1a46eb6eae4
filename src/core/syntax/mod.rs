//! Syntax provider boundary.
//!
//! The rest of the pipeline only sees [`CompilationUnit`]s. Turning text into
//! a tree is delegated to a [`SyntaxProvider`]; [`JavaSyntax`] is the built-in
//! one and understands the declaration subset the walker needs.

pub mod ast;
pub mod lexer;
pub mod parser;

use std::path::Path;

use crate::core::error::ParseError;
use crate::core::source::SourceLocation;

pub use ast::{NodeId, SyntaxTree};

/// One `import` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// Imported path without the trailing `.*`.
    pub path: String,
    pub is_static: bool,
    /// `import a.b.*;`
    pub wildcard: bool,
}

/// A parsed source file.
#[derive(Debug)]
pub struct CompilationUnit {
    pub path: String,
    pub package: Option<String>,
    pub imports: Vec<Import>,
    pub text: String,
    pub tree: SyntaxTree,
}

impl CompilationUnit {
    pub fn location(&self, id: NodeId) -> SourceLocation {
        self.tree.span(id).located_in(&self.path)
    }

    /// Whether a simple name used in this file may refer to `qualified`.
    ///
    /// True for a single-type import of `qualified` and for an on-demand
    /// import of its package. Static imports never bring types into scope.
    pub fn imports_type(&self, qualified: &str) -> bool {
        let package = qualified.rsplit_once('.').map(|(pkg, _)| pkg);
        self.imports.iter().filter(|i| !i.is_static).any(|import| {
            if import.wildcard {
                Some(import.path.as_str()) == package
            } else {
                import.path == qualified
            }
        })
    }

    /// Whether an annotation written as `written` denotes the configured marker.
    ///
    /// A simple configured name matches by simple name. A qualified one
    /// matches itself, or its simple name when the file imports it or lives
    /// in the same package.
    pub fn refers_to(&self, written: &str, configured: &str) -> bool {
        if written == configured {
            return true;
        }
        match configured.rsplit_once('.') {
            None => written.rsplit('.').next() == Some(configured),
            Some((package, simple)) => {
                written == simple
                    && (self.imports_type(configured) || self.package.as_deref() == Some(package))
            }
        }
    }
}

/// Turns source text into a [`CompilationUnit`].
pub trait SyntaxProvider: Send + Sync {
    fn parse(&self, path: &str, text: String) -> Result<CompilationUnit, ParseError>;

    /// Read and parse a file. An unreadable file is reported like a parse failure.
    fn load(&self, path: &Path) -> Result<CompilationUnit, ParseError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ParseError::unpositioned(format!("failed to read file: {e}")))?;
        self.parse(&path.to_string_lossy(), text)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct JavaSyntax;

impl SyntaxProvider for JavaSyntax {
    fn parse(&self, path: &str, text: String) -> Result<CompilationUnit, ParseError> {
        let parsed = parser::parse(&text)?;
        Ok(CompilationUnit {
            path: path.to_string(),
            package: parsed.package,
            imports: parsed.imports,
            text,
            tree: parsed.tree,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_imports_type() {
        let unit = JavaSyntax
            .parse(
                "A.java",
                "import com.acme.config.ConfigData;\nimport org.other.*;\nimport static org.stat.Holder.*;\nclass A {}"
                    .to_string(),
            )
            .unwrap();
        assert!(unit.imports_type("com.acme.config.ConfigData"));
        assert!(unit.imports_type("org.other.ConfigProperty"));
        assert!(!unit.imports_type("org.stat.Holder.ConfigProperty"));
        assert!(!unit.imports_type("com.acme.config.ConfigProperty"));
    }

    #[test]
    fn test_refers_to_marker_names() {
        let unit = JavaSyntax
            .parse(
                "A.java",
                "package app;\nimport com.acme.config.ConfigData;\nclass A {}".to_string(),
            )
            .unwrap();

        // Simple configured name.
        assert!(unit.refers_to("ConfigData", "ConfigData"));
        assert!(unit.refers_to("org.any.ConfigData", "ConfigData"));
        assert!(!unit.refers_to("ConfigDataX", "ConfigData"));

        // Qualified configured name.
        assert!(unit.refers_to("com.acme.config.ConfigData", "com.acme.config.ConfigData"));
        assert!(unit.refers_to("ConfigData", "com.acme.config.ConfigData"));
        assert!(!unit.refers_to("ConfigData", "org.other.ConfigData"));
        assert!(unit.refers_to("Local", "app.Local"));
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Net.java");
        fs::write(&path, "package net;\nrecord Net(int port) {}").unwrap();

        let unit = JavaSyntax.load(&path).unwrap();
        assert_eq!(unit.package.as_deref(), Some("net"));
        assert_eq!(unit.tree.roots().len(), 1);
        assert!(unit.path.ends_with("Net.java"));
    }

    #[test]
    fn test_load_missing_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let err = JavaSyntax.load(&dir.path().join("Missing.java")).unwrap_err();
        assert!(err.message.starts_with("failed to read file"));
        assert_eq!(err.line, 0);
    }
}
