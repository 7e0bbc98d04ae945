//! Project-level configuration support
//!
//! Loads per-project configuration from `pinecheck.toml` or
//! `.pinecheckrc.json` in the scripts directory.
//!
//! # Configuration Format
//!
//! ```toml
//! # pinecheck.toml
//!
//! [scripts]
//! extensions = ["pine"]
//! exclude = ["archive/", "**/drafts/**"]
//!
//! [integration]
//! expected_scripts = ["trend.pine", "momentum.pine"]
//!
//! [[integration.protected_functions]]
//! file = "trend.pine"
//! name = "calcTrend"
//! arity = 2
//!
//! [defaults]
//! format = "text"
//! min_score = 70
//! min_health = 75
//! ```

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Preferred config file name
pub const CONFIG_FILE_NAME: &str = "pinecheck.toml";

/// JSON fallback config file name
pub const JSON_CONFIG_FILE_NAME: &str = ".pinecheckrc.json";

/// Extensions treated as scripts when none are configured
pub const DEFAULT_SCRIPT_EXTENSIONS: &[&str] = &["pine"];

/// Project-level configuration loaded from pinecheck.toml or similar
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct ProjectConfig {
    /// Script discovery settings
    #[serde(default)]
    pub scripts: ScriptsConfig,

    /// Allow-lists for the integration checker
    #[serde(default)]
    pub integration: IntegrationConfig,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Which files in the scripts directory are analyzed
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScriptsConfig {
    /// File extensions (without the dot)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Paths/patterns to skip, relative to the scripts directory
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_extensions() -> Vec<String> {
    DEFAULT_SCRIPT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            exclude: Vec::new(),
        }
    }
}

impl ScriptsConfig {
    /// Whether `path` has one of the configured script extensions
    pub fn has_script_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }

    /// Whether a `/`-separated relative path is excluded
    pub fn is_excluded(&self, relative: &str) -> bool {
        self.exclude.iter().any(|p| glob_match(p, relative))
    }
}

/// Static allow-lists consumed by the integration checker
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct IntegrationConfig {
    /// Script names that must be present; empty means "whatever is found"
    #[serde(default)]
    pub expected_scripts: Vec<String>,

    /// Function signatures that must keep their arity
    #[serde(default)]
    pub protected_functions: Vec<ProtectedSignature>,
}

/// One protected function: `name` in `file` must take `arity` arguments
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ProtectedSignature {
    pub file: String,
    pub name: String,
    pub arity: usize,
}

impl ProtectedSignature {
    pub fn new(file: impl Into<String>, name: impl Into<String>, arity: usize) -> Self {
        Self {
            file: file.into(),
            name: name.into(),
            arity,
        }
    }
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct CliDefaults {
    /// Default output format (text, json, markdown)
    #[serde(default)]
    pub format: Option<String>,

    /// Minimum overall validation score for `validate` to pass
    #[serde(default)]
    pub min_score: Option<u32>,

    /// Minimum health percentage for `health` to pass
    #[serde(default)]
    pub min_health: Option<u32>,
}

/// Load project configuration from a scripts directory.
///
/// A missing or malformed config falls back to defaults.
pub fn load_project_config(scripts_dir: &Path) -> ProjectConfig {
    let toml_path = scripts_dir.join(CONFIG_FILE_NAME);
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", toml_path.display(), e);
            }
        }
    }

    let json_path = scripts_dir.join(JSON_CONFIG_FILE_NAME);
    if json_path.exists() {
        match load_json_config(&json_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", json_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", json_path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = toml::from_str(&content)?;
    Ok(config)
}

fn load_json_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Example config written by `pinecheck init`
pub fn example_config() -> &'static str {
    r#"# pinecheck configuration

[scripts]
# File extensions analyzed (without the dot)
extensions = ["pine"]

# Paths skipped during discovery, relative to this directory
exclude = []

[integration]
# Scripts that must be present. Leave empty to accept whatever is found.
expected_scripts = []

# Functions whose argument count must not drift
# [[integration.protected_functions]]
# file = "trend.pine"
# name = "calcTrend"
# arity = 2

[defaults]
# Output format (text, json, markdown)
format = "text"

# validate fails below this overall score
# min_score = 70

# health fails below this percentage (75 = GOOD)
min_health = 75
"#
}

/// Simple glob pattern matching
pub fn glob_match(pattern: &str, path: &str) -> bool {
    // **/X/** matches X as any directory
    if pattern.starts_with("**/") && pattern.ends_with("/**") {
        let middle = pattern.trim_start_matches("**/").trim_end_matches("/**");
        return path.contains(&format!("/{}/", middle))
            || path.starts_with(&format!("{}/", middle));
    }

    // **/*.ext and prefix/** forms
    if let Some((prefix, suffix)) = pattern.split_once("**") {
        let prefix = prefix.trim_end_matches('/');
        let suffix = suffix.trim_start_matches('/');
        if !prefix.is_empty() && !path.starts_with(prefix) {
            return false;
        }
        return match suffix.split_once('*') {
            Some((before, after)) => path.contains(before) && path.ends_with(after),
            None => suffix.is_empty() || path.ends_with(suffix),
        };
    }

    // Single * matches within the whole path
    if let Some((prefix, suffix)) = pattern.split_once('*') {
        return path.starts_with(prefix) && path.ends_with(suffix);
    }

    // "archive/" only matches "archive/x.pine", not "old/archive/x.pine"
    path.starts_with(pattern) || path == pattern
}
