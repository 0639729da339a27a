//! Run configuration.
//!
//! Every option has a default, so a tree can be scaffolded without any
//! configuration file. When present, `.readme-gen.yml` at the scan root is
//! merged over the defaults:
//!
//! ```yaml
//! project_name: Talon AI Assistant
//! extensions: [ts, tsx]
//! exclude: [node_modules, .git, __pycache__, dist]
//! output_file: README.md
//! respect_gitignore: false
//! purposes:
//!   runtime: Runtime Bootstrap
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{GenError, Result};

/// Name of the per-tree configuration file
pub const CONFIG_FILENAME: &str = ".readme-gen.yml";

/// Name of the generated document
pub const DEFAULT_OUTPUT_FILE: &str = "README.md";

pub const DEFAULT_PROJECT_NAME: &str = "the project";

/// Primary tracked extensions (line-counted)
pub const DEFAULT_EXTENSIONS: &[&str] = &["ts", "tsx"];

/// Directory names that are never walked or listed
pub const DEFAULT_EXCLUDE: &[&str] = &["node_modules", ".git", "__pycache__"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scan target. Never read from the YAML file, the CLI always supplies it.
    #[serde(skip)]
    pub root: PathBuf,

    /// Suffixes whose files get a line count
    pub extensions: Vec<String>,

    /// Directory names skipped by the walk and omitted from subfolder lists
    pub exclude: Vec<String>,

    pub output_file: String,

    /// Used in the placeholder description sentence
    pub project_name: String,

    /// Extra or overriding entries for the purpose table
    pub purposes: BTreeMap<String, String>,

    /// Also prune paths ignored by `.gitignore` / `.ignore` files
    pub respect_gitignore: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            exclude: DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            purposes: BTreeMap::new(),
            respect_gitignore: false,
        }
    }
}

impl Config {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Loads configuration for `root`.
    ///
    /// An explicit `config_path` must exist. Without one, `<root>/.readme-gen.yml`
    /// is used when present and defaults otherwise.
    pub fn load(root: &Path, config_path: Option<&Path>) -> Result<Self> {
        let path = match config_path {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let candidate = root.join(CONFIG_FILENAME);
                candidate.is_file().then_some(candidate)
            }
        };

        let mut config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    GenError::Config(format!("Cannot read {}: {}", path.display(), e))
                })?;
                tracing::debug!(path = %path.display(), "Loaded config file");
                parse_config(&content)?
            }
            None => Self::default(),
        };

        config.root = root.to_path_buf();
        config.normalize();
        Ok(config)
    }

    /// Strips leading dots from extensions and lowercases purpose keys.
    pub fn normalize(&mut self) {
        for ext in &mut self.extensions {
            *ext = ext.trim_start_matches('.').to_string();
        }
        self.extensions.retain(|ext| !ext.is_empty());

        self.purposes = std::mem::take(&mut self.purposes)
            .into_iter()
            .map(|(name, purpose)| (name.to_lowercase(), purpose))
            .collect();
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|e| e == name)
    }

    pub fn validate(&self) -> Result<()> {
        if self.output_file.is_empty()
            || self.output_file.contains('/')
            || self.output_file.contains('\\')
        {
            return Err(GenError::Config(format!(
                "output_file must be a plain file name, got {:?}",
                self.output_file
            )));
        }
        Ok(())
    }
}

/// Parses configuration YAML
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(content)
        .map_err(|e| GenError::Config(format!("Invalid config YAML: {}", e)))?;
    Ok(config)
}
