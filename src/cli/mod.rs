//! CLI command definitions and handlers

mod check;
mod health;
mod init;
mod output;
mod validate;

use crate::config::{load_project_config, ProjectConfig};
use crate::reporters::OutputFormat;
use crate::scripts::ScriptDir;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

/// Health percentage `health` requires when nothing else is configured
pub const DEFAULT_MIN_HEALTH: u32 = 75;

/// pinecheck - static checks for Pine Script suites
#[derive(Parser, Debug)]
#[command(name = "pinecheck")]
#[command(
    version,
    about = "Static validation and cross-script integration checks for Pine Script",
    long_about = "pinecheck scores every Pine Script in a directory for syntax, repainting, \
performance, style and structure problems, then checks that the scripts in a suite \
still wire up to each other: every input.source finds a published output, no two \
scripts feed each other, and protected functions keep their signatures.\n\n\
Run without a subcommand to run both checks on the current directory:\n  \
pinecheck .",
    after_help = "\
Examples:
  pinecheck .                               Validate and health-check current directory
  pinecheck scripts/ validate --format json JSON validation report
  pinecheck validate --min-score 80         Exit code 1 below an overall score of 80
  pinecheck health --format md -o health.md Markdown health report
  pinecheck init                            Write an example pinecheck.toml"
)]
pub struct Cli {
    /// Directory of scripts (default: current directory)
    #[arg(global = true, default_value = ".")]
    pub path: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate every script and report per-file scores
    #[command(after_help = "\
Examples:
  pinecheck validate                        Validate current directory
  pinecheck scripts/ validate -f json       JSON output for scripting
  pinecheck validate --min-score 70         Exit code 1 below 70 (CI mode)")]
    Validate {
        /// Output format: text, json, markdown (or md)
        #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md"])]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Exit with code 1 if the overall score is below this
        #[arg(long)]
        min_score: Option<u32>,
    },

    /// Check that the scripts in a suite still integrate with each other
    Health {
        /// Output format: text, json, markdown (or md)
        #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md"])]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Exit with code 1 if health is below this percentage (default: 75)
        #[arg(long)]
        min_health: Option<u32>,
    },

    /// Run validate and health together
    Check {
        /// Output format: text, json, markdown (or md)
        #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md"])]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Exit with code 1 if the overall score is below this
        #[arg(long)]
        min_score: Option<u32>,

        /// Exit with code 1 if health is below this percentage (default: 75)
        #[arg(long)]
        min_health: Option<u32>,
    },

    /// Write an example pinecheck.toml
    Init,

    /// Show version information
    Version,
}

/// Thresholds and format after merging CLI flags over `[defaults]`
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Settings {
    pub format: OutputFormat,
    pub min_score: u32,
    pub min_health: u32,
}

impl Settings {
    pub fn resolve(
        config: &ProjectConfig,
        format: Option<&str>,
        min_score: Option<u32>,
        min_health: Option<u32>,
    ) -> Result<Self> {
        let format = match format.or(config.defaults.format.as_deref()) {
            Some(f) => OutputFormat::from_str(f)?,
            None => OutputFormat::default(),
        };
        Ok(Self {
            format,
            min_score: min_score.or(config.defaults.min_score).unwrap_or(0),
            min_health: min_health
                .or(config.defaults.min_health)
                .unwrap_or(DEFAULT_MIN_HEALTH),
        })
    }
}

/// Project config and discovered scripts for one run
pub(crate) struct Workspace {
    pub config: ProjectConfig,
    pub scripts: ScriptDir,
}

impl Workspace {
    pub fn open(path: &Path) -> Result<Self> {
        let root = path
            .canonicalize()
            .with_context(|| format!("Path does not exist: {}", path.display()))?;
        let config = load_project_config(&root);
        let scripts = ScriptDir::discover(&root, &config.scripts)
            .with_context(|| format!("Failed to discover scripts in {}", root.display()))?;
        Ok(Self { config, scripts })
    }
}

fn exit_code(passed: bool) -> ExitCode {
    if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

pub fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Some(Commands::Validate {
            format,
            output,
            min_score,
        }) => validate::run(&cli.path, format.as_deref(), output.as_deref(), min_score).map(exit_code),

        Some(Commands::Health {
            format,
            output,
            min_health,
        }) => health::run(&cli.path, format.as_deref(), output.as_deref(), min_health).map(exit_code),

        Some(Commands::Check {
            format,
            output,
            min_score,
            min_health,
        }) => check::run(
            &cli.path,
            format.as_deref(),
            output.as_deref(),
            min_score,
            min_health,
        )
        .map(exit_code),

        Some(Commands::Init) => init::run(&cli.path).map(|_| ExitCode::SUCCESS),

        Some(Commands::Version) => {
            println!("pinecheck {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }

        // Default: validate + health with text output
        None => check::run(&cli.path, Some("text"), None, None, None).map(exit_code),
    }
}
