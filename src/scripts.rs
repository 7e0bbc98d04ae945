//! Script source abstraction
//!
//! The validator and the integration checker never walk the filesystem
//! themselves. They receive a `ScriptSource` that lists script names and
//! loads their text, which keeps both testable against in-memory suites.

use crate::config::ScriptsConfig;
use crate::models::ScriptFile;
use ignore::WalkBuilder;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Why a script could not be loaded
#[derive(Debug, Error)]
pub enum ScriptLoadError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Script is not valid UTF-8: {0}")]
    InvalidUtf8(String),

    #[error("Failed to read {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl ScriptLoadError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ScriptLoadError::NotFound(_))
    }
}

/// Provides scripts by `/`-separated name relative to a root
pub trait ScriptSource {
    /// Discovered script names, sorted
    fn names(&self) -> Vec<String>;

    /// Load one script by name
    fn load(&self, name: &str) -> Result<ScriptFile, ScriptLoadError>;
}

/// Scripts discovered under a directory, respecting `.gitignore`
pub struct ScriptDir {
    root: PathBuf,
    names: Vec<String>,
}

impl ScriptDir {
    /// Walk `root` and collect every script matching `config`
    pub fn discover(root: impl Into<PathBuf>, config: &ScriptsConfig) -> anyhow::Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            anyhow::bail!("Not a directory: {}", root.display());
        }

        let mut names = Vec::new();
        let walker = WalkBuilder::new(&root)
            .hidden(true)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .require_git(false)
            .build();

        for entry in walker {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || !config.has_script_extension(path) {
                continue;
            }
            let Some(name) = relative_name(&root, path) else {
                continue;
            };
            if config.is_excluded(&name) {
                debug!("Skipping excluded script {}", name);
                continue;
            }
            names.push(name);
        }

        names.sort();
        debug!("Discovered {} scripts under {}", names.len(), root.display());
        Ok(Self { root, names })
    }
}

impl ScriptSource for ScriptDir {
    fn names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn load(&self, name: &str) -> Result<ScriptFile, ScriptLoadError> {
        read_script(&self.root.join(name), name)
    }
}

/// Read one script from disk
pub fn read_script(path: &Path, name: &str) -> Result<ScriptFile, ScriptLoadError> {
    let bytes = std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ScriptLoadError::NotFound(name.to_string())
        } else {
            ScriptLoadError::Io {
                name: name.to_string(),
                source,
            }
        }
    })?;
    let content =
        String::from_utf8(bytes).map_err(|_| ScriptLoadError::InvalidUtf8(name.to_string()))?;
    Ok(ScriptFile::new(path, name, content))
}

fn relative_name(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// In-memory script suite, keyed by name
#[derive(Debug, Clone, Default)]
pub struct MemoryScripts {
    root: PathBuf,
    scripts: BTreeMap<String, String>,
}

impl MemoryScripts {
    /// Build a suite from `(name, content)` pairs rooted at `/memory`
    pub fn new<N, C>(entries: impl IntoIterator<Item = (N, C)>) -> Self
    where
        N: Into<String>,
        C: Into<String>,
    {
        Self {
            root: PathBuf::from("/memory"),
            scripts: entries
                .into_iter()
                .map(|(n, c)| (n.into(), c.into()))
                .collect(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.scripts.insert(name.into(), content.into());
    }
}

impl ScriptSource for MemoryScripts {
    fn names(&self) -> Vec<String> {
        self.scripts.keys().cloned().collect()
    }

    fn load(&self, name: &str) -> Result<ScriptFile, ScriptLoadError> {
        self.scripts
            .get(name)
            .map(|content| ScriptFile::new(self.root.join(name), name, content.clone()))
            .ok_or_else(|| ScriptLoadError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        std::fs::create_dir_all(root.join("suite")).expect("mkdir");
        std::fs::create_dir_all(root.join("archive")).expect("mkdir");
        std::fs::write(root.join("zeta.pine"), "//@version=5").expect("write");
        std::fs::write(root.join("suite/alpha.pine"), "//@version=5").expect("write");
        std::fs::write(root.join("archive/old.pine"), "//@version=4").expect("write");
        std::fs::write(root.join("README.md"), "# docs").expect("write");

        let config = ScriptsConfig {
            exclude: vec!["archive/".to_string()],
            ..Default::default()
        };
        let scripts = ScriptDir::discover(root, &config).expect("discover");
        assert_eq!(scripts.names(), vec!["suite/alpha.pine", "zeta.pine"]);

        let loaded = scripts.load("suite/alpha.pine").expect("load");
        assert_eq!(loaded.name, "suite/alpha.pine");
        assert_eq!(loaded.content, "//@version=5");
    }

    #[test]
    fn test_discover_rejects_missing_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope");
        assert!(ScriptDir::discover(missing, &ScriptsConfig::default()).is_err());
    }

    #[test]
    fn test_missing_script_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let scripts = ScriptDir::discover(dir.path(), &ScriptsConfig::default()).expect("discover");
        let err = scripts.load("gone.pine").expect_err("missing file");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "File not found: gone.pine");
    }

    #[test]
    fn test_invalid_utf8() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("bin.pine"), [0xff, 0xfe, 0x00]).expect("write");
        let err = read_script(&dir.path().join("bin.pine"), "bin.pine").expect_err("bad utf8");
        assert!(matches!(err, ScriptLoadError::InvalidUtf8(_)));
    }

    #[test]
    fn test_memory_scripts() {
        let mut scripts = MemoryScripts::new(vec![("b.pine", "two"), ("a.pine", "one")]);
        scripts.insert("c.pine", "three");
        assert_eq!(scripts.names(), vec!["a.pine", "b.pine", "c.pine"]);
        assert_eq!(scripts.load("a.pine").expect("load").content, "one");
        assert!(scripts.load("z.pine").expect_err("missing").is_not_found());
    }
}
