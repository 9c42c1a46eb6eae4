use std::path::PathBuf;

use crate::cli::args::OutputFormat;
use crate::core::assemble::Assembly;

#[derive(Debug)]
pub enum CommandSummary {
    Scan(ScanSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ScanSummary {
    pub assembly: Assembly,
    pub format: OutputFormat,
    pub source_files: usize,
    /// Paths the scanner could not access.
    pub skipped_files: usize,
    /// Config file in effect; `None` when running on defaults.
    pub config_path: Option<PathBuf>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running propcat commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
}

impl CommandResult {
    pub fn scan(summary: ScanSummary) -> Self {
        let error_count = summary.assembly.diagnostics.error_count();
        Self {
            summary: CommandSummary::Scan(summary),
            error_count,
        }
    }

    pub fn init(created: bool) -> Self {
        Self {
            summary: CommandSummary::Init(InitSummary { created }),
            error_count: usize::from(!created),
        }
    }
}
