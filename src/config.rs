use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::ConfigurationError;

pub const CONFIG_FILE_NAME: &str = ".propcatrc.json";

// ============================================================
// Recognition
// ============================================================

/// Names that decide what counts as a configuration group and property.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionConfig {
    #[serde(default = "default_group_marker")]
    pub group_marker_annotation: String,
    #[serde(default = "default_property_marker")]
    pub property_marker_annotation: String,
    #[serde(default = "default_value_argument")]
    pub prefix_argument_name: String,
    #[serde(default = "default_value_argument")]
    pub key_argument_name: String,
    #[serde(default = "default_implicit_members_mode")]
    pub implicit_members_mode: bool,
    #[serde(default = "default_default_argument")]
    pub default_argument_name: String,
    #[serde(default = "default_inherit_argument")]
    pub inherit_argument_name: String,
}

fn default_group_marker() -> String {
    "ConfigData".to_string()
}

fn default_property_marker() -> String {
    "ConfigProperty".to_string()
}

fn default_value_argument() -> String {
    "value".to_string()
}

fn default_implicit_members_mode() -> bool {
    true
}

fn default_default_argument() -> String {
    "defaultValue".to_string()
}

fn default_inherit_argument() -> String {
    "inheritPrefix".to_string()
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            group_marker_annotation: default_group_marker(),
            property_marker_annotation: default_property_marker(),
            prefix_argument_name: default_value_argument(),
            key_argument_name: default_value_argument(),
            implicit_members_mode: default_implicit_members_mode(),
            default_argument_name: default_default_argument(),
            inherit_argument_name: default_inherit_argument(),
        }
    }
}

impl RecognitionConfig {
    /// Reject option sets that cannot be applied consistently.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let annotations = [
            ("groupMarkerAnnotation", &self.group_marker_annotation),
            ("propertyMarkerAnnotation", &self.property_marker_annotation),
        ];
        for (option, value) in annotations {
            if value.is_empty() {
                return Err(ConfigurationError::EmptyOption { option });
            }
            if !value.split('.').all(is_identifier) {
                return Err(ConfigurationError::InvalidAnnotationName {
                    option,
                    value: value.clone(),
                });
            }
        }

        let arguments = [
            ("prefixArgumentName", &self.prefix_argument_name),
            ("keyArgumentName", &self.key_argument_name),
            ("defaultArgumentName", &self.default_argument_name),
            ("inheritArgumentName", &self.inherit_argument_name),
        ];
        for (option, value) in arguments {
            if value.is_empty() {
                return Err(ConfigurationError::EmptyOption { option });
            }
            if !is_identifier(value) {
                return Err(ConfigurationError::InvalidArgumentName {
                    option,
                    value: value.clone(),
                });
            }
        }

        let distinct = [
            (
                "groupMarkerAnnotation",
                &self.group_marker_annotation,
                "propertyMarkerAnnotation",
                &self.property_marker_annotation,
            ),
            (
                "keyArgumentName",
                &self.key_argument_name,
                "defaultArgumentName",
                &self.default_argument_name,
            ),
            (
                "prefixArgumentName",
                &self.prefix_argument_name,
                "inheritArgumentName",
                &self.inherit_argument_name,
            ),
        ];
        for (first, a, second, b) in distinct {
            if a == b {
                return Err(ConfigurationError::Conflicting {
                    first,
                    second,
                    value: a.clone(),
                });
            }
        }

        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c == '$' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c == '$' || c.is_alphanumeric())
}

// ============================================================
// Project configuration file
// ============================================================

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directories (or glob patterns of directories) to scan. Empty scans the whole root.
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    /// File extensions to scan, without the leading dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub recognition: RecognitionConfig,
}

fn default_ignores() -> Vec<String> {
    ["**/build/**", "**/target/**", "**/generated/**"]
        .map(String::from)
        .to_vec()
}

fn default_extensions() -> Vec<String> {
    vec!["java".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            includes: Vec::new(),
            ignores: default_ignores(),
            extensions: default_extensions(),
            recognition: RecognitionConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Glob patterns in `ignores` and `includes` must compile, and the
    /// recognition options must be consistent.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Patterns without wildcards are literal directory paths.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if let Some(ext) = self
            .extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.starts_with('.'))
        {
            anyhow::bail!(
                "Invalid entry in 'extensions': \"{}\" (use names like \"java\")",
                ext
            );
        }

        self.recognition
            .validate()
            .context("Invalid 'recognition' settings")?;

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Where the config came from; `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
