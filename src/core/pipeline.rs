//! End-to-end run: validate, then parse, walk and extract per file in
//! parallel, then assemble once.
//!
//! Per-file work touches only that file's state. Rayon's indexed `collect`
//! keeps results in input order, so the catalog does not depend on scheduling.

use std::path::PathBuf;

use rayon::prelude::*;
use tracing::debug;

use crate::config::RecognitionConfig;
use crate::core::assemble::{Assembly, FileExtraction, assemble};
use crate::core::diagnostics::DiagnosticsSink;
use crate::core::error::{ConfigurationError, ParseError};
use crate::core::extract::extract;
use crate::core::syntax::{CompilationUnit, SyntaxProvider};
use crate::core::walk::walk;
use crate::issues::ParseFailureIssue;

/// In-memory source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

/// Run over in-memory sources, in the order given.
pub fn run(
    recognition: &RecognitionConfig,
    provider: &dyn SyntaxProvider,
    files: &[SourceFile],
) -> Result<Assembly, ConfigurationError> {
    run_with(recognition, files, |file| {
        (file.path.clone(), provider.parse(&file.path, file.text.clone()))
    })
}

/// Run over files on disk, in the order given.
pub fn run_paths(
    recognition: &RecognitionConfig,
    provider: &dyn SyntaxProvider,
    paths: &[PathBuf],
) -> Result<Assembly, ConfigurationError> {
    run_with(recognition, paths, |path| {
        (path.to_string_lossy().into_owned(), provider.load(path))
    })
}

fn run_with<T, F>(
    recognition: &RecognitionConfig,
    inputs: &[T],
    load: F,
) -> Result<Assembly, ConfigurationError>
where
    T: Sync,
    F: Fn(&T) -> (String, Result<CompilationUnit, ParseError>) + Sync,
{
    recognition.validate()?;

    let extractions: Vec<FileExtraction> = inputs
        .par_iter()
        .map(|input| {
            let (path, parsed) = load(input);
            match parsed {
                Ok(unit) => process_unit(&unit, recognition),
                Err(error) => {
                    debug!(file = %path, %error, "parse failed");
                    let mut sink = DiagnosticsSink::new();
                    sink.push(ParseFailureIssue {
                        file_path: path.clone(),
                        error,
                    });
                    FileExtraction {
                        path,
                        properties: Vec::new(),
                        issues: sink.into_issues(),
                    }
                }
            }
        })
        .collect();

    let assembly = assemble(extractions);
    debug!(
        files = inputs.len(),
        properties = assembly.catalog.len(),
        diagnostics = assembly.diagnostics.len(),
        "catalog assembled"
    );
    Ok(assembly)
}

/// Walk and extract one parsed file.
pub fn process_unit(unit: &CompilationUnit, recognition: &RecognitionConfig) -> FileExtraction {
    let mut sink = DiagnosticsSink::new();
    let declarations = walk(unit, recognition, &mut sink);

    let mut properties = Vec::new();
    for decl in declarations.iter() {
        properties.extend(extract(decl, unit, recognition, &mut sink));
    }

    debug!(
        file = %unit.path,
        declarations = declarations.len(),
        groups = declarations.groups().count(),
        properties = properties.len(),
        "file processed"
    );

    FileExtraction {
        path: unit.path.clone(),
        properties,
        issues: sink.into_issues(),
    }
}
