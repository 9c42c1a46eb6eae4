//! Merge per-file extraction results into one catalog.

mod catalog;

pub use catalog::{Catalog, CatalogEntry, Origin};

use crate::core::diagnostics::{Diagnostics, DiagnosticsSink};
use crate::core::extract::PropertyDeclaration;
use crate::core::source::SourceLocation;
use crate::issues::{DuplicateKeyIssue, Issue};

/// Everything one file contributed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileExtraction {
    pub path: String,
    pub properties: Vec<PropertyDeclaration>,
    pub issues: Vec<Issue>,
}

/// Result of a run: the catalog plus every diagnostic, in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assembly {
    pub catalog: Catalog,
    pub diagnostics: Diagnostics,
}

/// Merge files in the order given. On a key collision the first entry is kept.
pub fn assemble(files: impl IntoIterator<Item = FileExtraction>) -> Assembly {
    let mut catalog = Catalog::default();
    let mut sink = DiagnosticsSink::new();

    for file in files {
        sink.extend(file.issues);
        for property in file.properties {
            let location = property.location.clone();
            if let Err(existing) = catalog.try_insert(into_entry(property)) {
                sink.push(DuplicateKeyIssue {
                    key: existing.key.clone(),
                    location,
                    first: first_location(existing),
                });
            }
        }
    }

    Assembly {
        catalog,
        diagnostics: sink.freeze(),
    }
}

fn into_entry(property: PropertyDeclaration) -> CatalogEntry {
    let (default_value, non_literal) = match property.default {
        Some(default) => (default.text, default.non_literal),
        None => (String::new(), false),
    };
    CatalogEntry {
        key: property.key,
        type_signature: property.type_signature,
        default_value,
        non_literal,
        documentation: property.documentation.unwrap_or_default(),
        origin: Origin {
            file: property.location.file_path,
            line: property.location.line,
            column: property.location.col,
            group: property.group,
        },
    }
}

fn first_location(entry: &CatalogEntry) -> SourceLocation {
    SourceLocation::new(&entry.origin.file, entry.origin.line, entry.origin.column)
}
