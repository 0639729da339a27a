use std::collections::HashSet;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::config::Config;
use crate::error::{GenError, Result};

/// Recursive directory walk that prunes excluded folder names
pub struct FolderWalker {
    exclude: HashSet<String>,
    respect_gitignore: bool,
}

impl FolderWalker {
    pub fn new(config: &Config) -> Self {
        Self {
            exclude: config.exclude.iter().cloned().collect(),
            respect_gitignore: config.respect_gitignore,
        }
    }

    /// Returns `root` and every directory below it, in sorted walk order.
    pub fn walk(&self, root: &Path) -> Result<Vec<PathBuf>> {
        check_root(root)?;

        let mut folders = Vec::new();
        let exclude = self.exclude.clone();

        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .hidden(false)
            .parents(self.respect_gitignore)
            .ignore(self.respect_gitignore)
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .require_git(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !(is_dir
                    && entry.depth() > 0
                    && exclude.contains(&*entry.file_name().to_string_lossy()))
            })
            .build();

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_some_and(|t| t.is_dir()) {
                        folders.push(entry.into_path());
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable entry");
                }
            }
        }

        Ok(folders)
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.contains(name)
    }
}

/// Fails unless `root` is an existing directory
pub fn check_root(root: &Path) -> Result<()> {
    if !root.exists() {
        return Err(GenError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(GenError::NotADirectory(root.to_path_buf()));
    }
    Ok(())
}

/// Number of path components, used to order folders shallowest first
pub fn depth(path: &Path) -> usize {
    path.components().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    fn create_walker() -> FolderWalker {
        FolderWalker::new(&Config::default())
    }

    fn create_file(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        let mut file = File::create(path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    fn relative(root: &Path, folders: &[PathBuf]) -> Vec<String> {
        folders
            .iter()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_walk_includes_root() {
        let temp_dir = TempDir::new().unwrap();

        let folders = create_walker().walk(temp_dir.path()).unwrap();

        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0], temp_dir.path());
    }

    #[test]
    fn test_walk_recursive() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "agent/planner.ts", "");
        create_file(temp_dir.path(), "agent/tools/search.ts", "");
        create_file(temp_dir.path(), "utils/deep/er/file.ts", "");

        let folders = create_walker().walk(temp_dir.path()).unwrap();

        assert_eq!(
            relative(temp_dir.path(), &folders),
            vec!["", "agent", "agent/tools", "utils", "utils/deep", "utils/deep/er"]
        );
    }

    #[test]
    fn test_walk_prunes_excluded() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "node_modules/pkg/index.js", "");
        create_file(temp_dir.path(), ".git/objects/ab", "");
        create_file(temp_dir.path(), "lib/__pycache__/mod.pyc", "");
        create_file(temp_dir.path(), "lib/mod.ts", "");

        let folders = create_walker().walk(temp_dir.path()).unwrap();

        assert_eq!(relative(temp_dir.path(), &folders), vec!["", "lib"]);
    }

    #[test]
    fn test_walk_keeps_hidden_folders() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), ".github/workflows/ci.yml", "");

        let folders = create_walker().walk(temp_dir.path()).unwrap();

        assert_eq!(
            relative(temp_dir.path(), &folders),
            vec!["", ".github", ".github/workflows"]
        );
    }

    #[test]
    fn test_walk_ignores_gitignore_by_default() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), ".gitignore", "dist/\n");
        create_file(temp_dir.path(), "dist/bundle.js", "");

        let folders = create_walker().walk(temp_dir.path()).unwrap();

        assert_eq!(relative(temp_dir.path(), &folders), vec!["", "dist"]);
    }

    #[test]
    fn test_walk_respects_gitignore_when_enabled() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), ".gitignore", "dist/\n");
        create_file(temp_dir.path(), "dist/bundle.js", "");
        create_file(temp_dir.path(), "src/main.ts", "");

        let mut config = Config::default();
        config.respect_gitignore = true;
        let folders = FolderWalker::new(&config).walk(temp_dir.path()).unwrap();

        assert_eq!(relative(temp_dir.path(), &folders), vec!["", "src"]);
    }

    #[test]
    fn test_walk_custom_exclude() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "target/debug/app", "");
        create_file(temp_dir.path(), "src/main.rs", "");

        let mut config = Config::default();
        config.exclude.push("target".to_string());
        let walker = FolderWalker::new(&config);

        assert!(walker.is_excluded("target"));
        let folders = walker.walk(temp_dir.path()).unwrap();
        assert_eq!(relative(temp_dir.path(), &folders), vec!["", "src"]);
    }

    #[test]
    fn test_walk_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let err = create_walker()
            .walk(&temp_dir.path().join("missing"))
            .unwrap_err();
        assert!(matches!(err, GenError::RootNotFound(_)));
    }

    #[test]
    fn test_walk_root_is_file() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "file.ts", "");
        let err = create_walker()
            .walk(&temp_dir.path().join("file.ts"))
            .unwrap_err();
        assert!(matches!(err, GenError::NotADirectory(_)));
    }

    #[test]
    fn test_depth() {
        assert!(depth(Path::new("/a/b")) < depth(Path::new("/a/b/c")));
        assert_eq!(depth(Path::new("a/b")), depth(Path::new("x/y")));
    }
}
