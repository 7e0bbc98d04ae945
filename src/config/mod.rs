//! Configuration module for pinecheck
//!
//! This module handles:
//! - Project-level configuration (pinecheck.toml)
//! - Script discovery settings
//! - Integration allow-lists (expected scripts, protected signatures)
//! - CLI defaults

mod project_config;

pub use project_config::{
    example_config,
    glob_match,
    load_project_config,
    CliDefaults,
    IntegrationConfig,
    ProjectConfig,
    ProtectedSignature,
    ScriptsConfig,
    CONFIG_FILE_NAME,
    JSON_CONFIG_FILE_NAME,
};
