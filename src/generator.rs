//! Two-phase README generation over a source tree.
//!
//! Discovery walks the tree and splits folders into those that already have
//! an output file (skipped, never read) and those that need one. Generation
//! then processes the pending folders shallowest first, so a parent written
//! earlier in the same run is visible when its children look for a
//! `../README.md` to link to.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;

use crate::config::Config;
use crate::error::{GenError, Result};
use crate::render::{ParentSummary, TemplateRenderer};
use crate::scanner::{check_root, depth, folder_name, FolderAnalyzer, FolderWalker};

/// Result of the discovery phase
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// Folders without an output file, in walk order
    pub pending: Vec<PathBuf>,
    /// Folders that already had one
    pub skipped: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedFolder {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of a full run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub root: PathBuf,
    pub created: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<FailedFolder>,
    pub elapsed_ms: u64,
}

impl RunReport {
    pub fn processed(&self) -> usize {
        self.created.len() + self.failed.len()
    }
}

enum WriteOutcome {
    Created(PathBuf),
    AlreadyExists(PathBuf),
}

pub struct ReadmeGenerator {
    config: Config,
    walker: FolderWalker,
    analyzer: FolderAnalyzer,
    renderer: TemplateRenderer,
}

impl ReadmeGenerator {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            walker: FolderWalker::new(&config),
            analyzer: FolderAnalyzer::new(&config),
            renderer: TemplateRenderer::new(&config),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn root(&self) -> &Path {
        &self.config.root
    }

    /// Path of the output file inside `folder`
    pub fn output_path(&self, folder: &Path) -> PathBuf {
        folder.join(&self.config.output_file)
    }

    /// Fails when the root is missing or not a directory.
    pub fn check_root(&self) -> Result<()> {
        check_root(self.root())
    }

    /// Walks the tree and decides which folders need an output file.
    pub fn discover(&self) -> Result<Discovery> {
        let folders = self.walker.walk(self.root())?;
        let mut discovery = Discovery::default();

        for folder in folders {
            if self.output_path(&folder).exists() {
                tracing::info!(folder = %self.display(&folder), "README exists, skipping");
                discovery.skipped.push(folder);
            } else {
                discovery.pending.push(folder);
            }
        }

        tracing::info!(
            pending = discovery.pending.len(),
            skipped = discovery.skipped.len(),
            "Found {} folders needing {}",
            discovery.pending.len(),
            self.config.output_file
        );

        Ok(discovery)
    }

    /// Runs discovery then generation. Only a missing root is an error.
    pub fn run(&self) -> Result<RunReport> {
        let started_at = Instant::now();
        let discovery = self.discover()?;
        let mut report = self.generate(discovery);
        report.elapsed_ms = started_at.elapsed().as_millis() as u64;
        Ok(report)
    }

    /// Processes every pending folder, shallowest first. Never fails as a whole.
    pub fn generate(&self, discovery: Discovery) -> RunReport {
        let Discovery {
            mut pending,
            skipped,
        } = discovery;

        // Stable sort keeps walk order within a depth
        pending.sort_by_key(|p| depth(p));

        let mut report = RunReport {
            root: self.root().to_path_buf(),
            skipped,
            ..Default::default()
        };

        for folder in pending {
            match self.process_folder(&folder) {
                Ok(WriteOutcome::Created(path)) => {
                    tracing::info!(path = %self.display(&path), "Created");
                    report.created.push(folder);
                }
                Ok(WriteOutcome::AlreadyExists(path)) => {
                    tracing::info!(path = %self.display(&path), "README appeared since discovery, skipping");
                    report.skipped.push(folder);
                }
                Err(e) => {
                    tracing::warn!(folder = %folder.display(), error = %e, "Failed to create README");
                    report.failed.push(FailedFolder {
                        path: folder,
                        error: e.to_string(),
                    });
                }
            }
        }

        report
    }

    fn process_folder(&self, folder: &Path) -> Result<WriteOutcome> {
        let analysis = self.analyzer.analyze(folder)?;
        let parent = self.parent_summary(folder);
        let document = self.renderer.render(&analysis, parent.as_ref());

        let path = self.output_path(folder);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Ok(WriteOutcome::AlreadyExists(path));
            }
            Err(source) => return Err(GenError::Write { path, source }),
        };

        if let Err(source) = file.write_all(document.as_str().as_bytes()) {
            drop(file);
            let _ = fs::remove_file(&path);
            return Err(GenError::Write { path, source });
        }

        Ok(WriteOutcome::Created(path))
    }

    /// Parent summary if `folder`'s parent has an output file right now.
    /// The root never links upward.
    pub fn parent_summary(&self, folder: &Path) -> Option<ParentSummary> {
        if folder == self.root() {
            return None;
        }
        let parent = folder.parent()?;
        self.output_path(parent)
            .is_file()
            .then(|| ParentSummary::new(folder_name(parent)))
    }

    fn display(&self, path: &Path) -> String {
        match path.strip_prefix(self.root()) {
            Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
            Ok(rel) => rel.display().to_string(),
            Err(_) => path.display().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_generator(root: &Path) -> ReadmeGenerator {
        ReadmeGenerator::new(Config::new(root)).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_output_file() {
        let mut config = Config::new("/tmp");
        config.output_file = "a/b.md".to_string();
        assert!(matches!(
            ReadmeGenerator::new(config),
            Err(GenError::Config(_))
        ));
    }

    #[test]
    fn test_check_root() {
        let temp_dir = TempDir::new().unwrap();
        assert!(create_generator(temp_dir.path()).check_root().is_ok());
        assert!(matches!(
            create_generator(&temp_dir.path().join("missing")).check_root(),
            Err(GenError::RootNotFound(_))
        ));
    }

    #[test]
    fn test_discover_splits_pending_and_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("agent/tools")).unwrap();
        fs::create_dir_all(root.join("memory")).unwrap();
        fs::write(root.join("memory/README.md"), "hand written").unwrap();

        let discovery = create_generator(root).discover().unwrap();

        assert_eq!(discovery.skipped, vec![root.join("memory")]);
        assert_eq!(
            discovery.pending,
            vec![root.to_path_buf(), root.join("agent"), root.join("agent/tools")]
        );
    }

    #[test]
    fn test_generate_orders_by_depth() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a/b")).unwrap();

        let generator = create_generator(root);
        let discovery = Discovery {
            pending: vec![root.join("a/b"), root.join("a")],
            skipped: Vec::new(),
        };
        let report = generator.generate(discovery);

        assert_eq!(report.created, vec![root.join("a"), root.join("a/b")]);
        let child = fs::read_to_string(root.join("a/b/README.md")).unwrap();
        assert!(child.contains("- See `../README.md` for a overview"));
    }

    #[test]
    fn test_parent_summary() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("web/views")).unwrap();
        fs::write(root.join("README.md"), "").unwrap();

        let generator = create_generator(root);

        assert_eq!(generator.parent_summary(root), None);
        assert!(generator.parent_summary(&root.join("web")).is_some());
        assert_eq!(generator.parent_summary(&root.join("web/views")), None);

        fs::write(root.join("web/README.md"), "").unwrap();
        assert_eq!(
            generator.parent_summary(&root.join("web/views")),
            Some(ParentSummary::new("web"))
        );
    }

    #[test]
    fn test_late_readme_is_not_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("cli")).unwrap();

        let generator = create_generator(root);
        let discovery = generator.discover().unwrap();
        fs::write(root.join("cli/README.md"), "mine").unwrap();

        let report = generator.generate(discovery);

        assert_eq!(fs::read_to_string(root.join("cli/README.md")).unwrap(), "mine");
        assert!(report.skipped.contains(&root.join("cli")));
        assert_eq!(report.created, vec![root.to_path_buf()]);
    }

    #[test]
    fn test_vanished_folder_is_reported_not_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("gone")).unwrap();
        fs::create_dir_all(root.join("kept")).unwrap();

        let generator = create_generator(root);
        let discovery = generator.discover().unwrap();
        fs::remove_dir(root.join("gone")).unwrap();

        let report = generator.generate(discovery);

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].path, root.join("gone"));
        assert!(root.join("kept/README.md").is_file());
        assert_eq!(report.processed(), 3);
    }

    #[test]
    fn test_display_relative() {
        let generator = create_generator(Path::new("/work/src"));
        assert_eq!(generator.display(Path::new("/work/src")), ".");
        assert_eq!(
            generator.display(Path::new("/work/src/agent")),
            Path::new("agent").display().to_string()
        );
        assert_eq!(generator.display(Path::new("/other")), "/other");
    }
}
