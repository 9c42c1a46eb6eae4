use std::{fs, path::Path};

use anyhow::{Context, Result};

use super::CommandResult;
use crate::config::{CONFIG_FILE_NAME, default_config_json};

/// Write the default config into `dir` unless one already exists there.
pub fn init(dir: &Path) -> Result<CommandResult> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        return Ok(CommandResult::init(false));
    }

    fs::write(&config_path, default_config_json()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    Ok(CommandResult::init(true))
}
