//! Catalog engine.
//!
//! A run goes through four stages per file, then one merge:
//!
//! 1. **Syntax**: a [`SyntaxProvider`] turns text into a [`CompilationUnit`]
//! 2. **Walk**: type declarations are classified and marker annotations read
//! 3. **Extract**: members of every group become property declarations
//! 4. **Assemble**: all files are merged into one key-unique [`Catalog`]
//!
//! Stages 1-3 run in parallel across files; assembly is sequential in scan order.

pub mod assemble;
pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod scanner;
pub mod source;
pub mod syntax;
pub mod walk;

pub use assemble::{Assembly, Catalog, CatalogEntry, Origin};
pub use diagnostics::{Diagnostics, DiagnosticsSink};
pub use error::{ConfigurationError, ParseError};
pub use pipeline::{SourceFile, process_unit, run, run_paths};
pub use source::{SourceLocation, Span};
pub use syntax::{CompilationUnit, JavaSyntax, SyntaxProvider};
