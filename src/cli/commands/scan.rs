use anyhow::{Context, Result};
use tracing::debug;

use super::super::args::ScanCommand;
use super::{CommandResult, ScanSummary};
use crate::config::load_config;
use crate::core::{JavaSyntax, run_paths, scanner::scan_files};

/// Load config, discover sources, and build the catalog.
pub fn scan(cmd: ScanCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let root = &args.common.source_root;

    if !root.is_dir() {
        anyhow::bail!("Source root is not a directory: {}", root.display());
    }

    let loaded = load_config(root)?;
    match &loaded.path {
        Some(path) => debug!(config = %path.display(), "config loaded"),
        None => debug!("no config file found, using defaults"),
    }
    let config = loaded.config;

    let scanned = scan_files(root, &config.includes, &config.ignores, &config.extensions);
    debug!(
        files = scanned.files.len(),
        skipped = scanned.skipped_count,
        "sources discovered"
    );

    let assembly = run_paths(&config.recognition, &JavaSyntax, &scanned.files)
        .context("Invalid 'recognition' settings")?;

    Ok(CommandResult::scan(ScanSummary {
        assembly,
        format: args.format,
        source_files: scanned.files.len(),
        skipped_files: scanned.skipped_count,
        config_path: loaded.path,
    }))
}
