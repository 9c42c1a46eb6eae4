//! Report formatting and printing utilities.
//!
//! The catalog is printed first, then diagnostics in cargo-style format.
//! Separate from core logic to allow propcat to be used as a library.

use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use super::args::OutputFormat;
use super::commands::{CommandResult, CommandSummary, InitSummary, ScanSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{Catalog, CatalogEntry, Diagnostics};
use crate::issues::{Issue, Report, ReportLocation, Rule, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

const NON_LITERAL_SUFFIX: &str = " (non-literal)";

pub fn print(result: &CommandResult, verbose: bool) -> Result<()> {
    match &result.summary {
        CommandSummary::Scan(summary) => {
            let mut out = io::stdout().lock();
            match summary.format {
                OutputFormat::Text => print_scan_to(summary, &mut out),
                OutputFormat::Json => print_json_to(summary, &mut out)?,
            }
            print_skipped_warning_to(summary.skipped_files, verbose, &mut io::stderr().lock());
        }
        CommandSummary::Init(summary) => print_init(summary),
    }
    Ok(())
}

/// Text rendering of a scan: table, diagnostics, summary line.
pub fn print_scan_to<W: Write>(summary: &ScanSummary, writer: &mut W) {
    let assembly = &summary.assembly;
    print_catalog_to(&assembly.catalog, writer);
    report_to(&assembly.diagnostics, writer);

    if assembly.diagnostics.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Scanned {} source {}, {} {} - no issues found",
                summary.source_files,
                if summary.source_files == 1 { "file" } else { "files" },
                assembly.catalog.len(),
                if assembly.catalog.len() == 1 {
                    "property"
                } else {
                    "properties"
                }
            )
            .green()
        );
    }
}

/// Print the catalog as an aligned table in merge order.
pub fn print_catalog_to<W: Write>(catalog: &Catalog, writer: &mut W) {
    if catalog.is_empty() {
        let _ = writeln!(writer, "{}", "No properties found".dimmed());
        let _ = writeln!(writer);
        return;
    }

    let rows: Vec<[String; 4]> = catalog.iter().map(row_cells).collect();
    let headers = ["KEY", "TYPE", "DEFAULT", "ORIGIN"];
    let mut widths = headers.map(|header| header.width());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    let header_line = headers
        .iter()
        .zip(widths)
        .map(|(header, width)| pad(header, width))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(writer, "{}", header_line.trim_end().bold());

    for (entry, row) in catalog.iter().zip(&rows) {
        let default_cell = if entry.non_literal {
            // Plain text is padded first so the suffix color does not skew widths.
            let plain = pad(&row[2], widths[2]);
            let (text, rest) = plain.split_at(entry.default_value.len());
            format!("{}{}", text, rest.dimmed())
        } else {
            pad(&row[2], widths[2])
        };
        let line = format!(
            "{}  {}  {}  {}",
            pad(&row[0], widths[0]).cyan(),
            pad(&row[1], widths[1]),
            default_cell,
            row[3].dimmed()
        );
        let _ = writeln!(writer, "{}", line.trim_end());
    }
    let _ = writeln!(writer);
}

fn row_cells(entry: &CatalogEntry) -> [String; 4] {
    let default = if entry.non_literal {
        format!("{}{}", entry.default_value, NON_LITERAL_SUFFIX)
    } else {
        entry.default_value.clone()
    };
    [
        entry.key.clone(),
        entry.type_signature.clone(),
        default,
        format!(
            "{}:{}:{}",
            entry.origin.file, entry.origin.line, entry.origin.column
        ),
    ]
}

/// Pad to a display width (not a byte or char count).
fn pad(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(UnicodeWidthStr::width(text));
    format!("{}{}", text, " ".repeat(padding))
}

/// Print diagnostics in cargo-style format, in the order they were produced.
pub fn report_to<W: Write>(diagnostics: &Diagnostics, writer: &mut W) {
    if diagnostics.is_empty() {
        return;
    }

    let max_line_width = calculate_max_line_width(diagnostics);
    for issue in diagnostics {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(diagnostics, writer);
}

/// Print a warning about paths the scanner could not access.
pub fn print_skipped_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} path(s) could not be accessed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    // Clickable location: --> path:line:col
    let _ = writeln!(writer, "  {} {}", "-->".blue(), issue.location());

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(diagnostics: &Diagnostics, writer: &mut W) {
    let total_errors = diagnostics.error_count();
    let total_warnings = diagnostics.warning_count();
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            if total_problems == 1 {
                "problem"
            } else {
                "problems"
            },
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

fn calculate_max_line_width(diagnostics: &Diagnostics) -> usize {
    diagnostics
        .iter()
        .filter_map(|issue| match issue.location() {
            ReportLocation::Source(loc) => Some(loc.line),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

// ============================================================
// JSON Output
// ============================================================

#[derive(Serialize)]
struct JsonReport<'a> {
    properties: &'a Catalog,
    diagnostics: Vec<DiagnosticRecord>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
struct DiagnosticRecord {
    severity: Severity,
    rule: Rule,
    message: String,
    file: String,
    /// `None` for file-level diagnostics.
    line: Option<usize>,
    column: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
}

impl From<&Issue> for DiagnosticRecord {
    fn from(issue: &Issue) -> Self {
        let (file, line, column) = match issue.location() {
            ReportLocation::Source(loc) => (loc.file_path, Some(loc.line), Some(loc.col)),
            ReportLocation::File { path } => (path.to_string(), None, None),
        };
        Self {
            severity: issue.report_severity(),
            rule: issue.report_rule(),
            message: issue.message(),
            file,
            line,
            column,
            details: issue.details(),
            hint: issue.hint().map(str::to_string),
        }
    }
}

/// JSON rendering of a scan: `{"properties": [...], "diagnostics": [...]}`.
pub fn print_json_to<W: Write>(summary: &ScanSummary, writer: &mut W) -> Result<()> {
    let report = JsonReport {
        properties: &summary.assembly.catalog,
        diagnostics: summary
            .assembly
            .diagnostics
            .iter()
            .map(DiagnosticRecord::from)
            .collect(),
    };
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize catalog")?;
    writeln!(writer, "{}", json).context("Failed to write output")?;
    Ok(())
}
