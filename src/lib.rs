//! Propcat - configuration property catalog for Java sources
//!
//! Propcat scans a Java source tree, finds record and class declarations
//! marked as configuration groups, and builds one deterministic catalog of
//! the properties they declare: key, type, default value, documentation and
//! origin.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (`scan`, `init`)
//! - `config`: Configuration file loading and recognition options
//! - `core`: Catalog engine (syntax, walk, extract, assemble)
//! - `issues`: Diagnostic type definitions and reporting

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
