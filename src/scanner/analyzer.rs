//! Single-folder analysis.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Config;
use crate::error::{GenError, Result};

/// The four extension groups a file can fall into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    TypedSource,
    Script,
    StructuredData,
    Documentation,
}

impl FileCategory {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "ts" | "tsx" => Some(FileCategory::TypedSource),
            "js" | "jsx" => Some(FileCategory::Script),
            "json" => Some(FileCategory::StructuredData),
            "md" => Some(FileCategory::Documentation),
            _ => None,
        }
    }

    pub fn for_file(name: &str) -> Option<Self> {
        extension_of(name).and_then(Self::from_extension)
    }
}

/// Which categories are present among a folder's files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryFlags {
    pub typed_source: bool,
    pub script: bool,
    pub structured_data: bool,
    pub documentation: bool,
}

impl CategoryFlags {
    pub fn set(&mut self, category: FileCategory) {
        match category {
            FileCategory::TypedSource => self.typed_source = true,
            FileCategory::Script => self.script = true,
            FileCategory::StructuredData => self.structured_data = true,
            FileCategory::Documentation => self.documentation = true,
        }
    }

    pub fn has(&self, category: FileCategory) -> bool {
        match category {
            FileCategory::TypedSource => self.typed_source,
            FileCategory::Script => self.script,
            FileCategory::StructuredData => self.structured_data,
            FileCategory::Documentation => self.documentation,
        }
    }
}

/// Snapshot of one directory's direct children
#[derive(Debug, Clone, Default, Serialize)]
pub struct FolderAnalysis {
    pub path: PathBuf,
    pub name: String,
    /// File names, sorted
    pub files: Vec<String>,
    /// Subfolder names minus excluded ones, sorted
    pub subfolders: Vec<String>,
    /// Line counts for primary-extension files only
    pub line_counts: BTreeMap<String, usize>,
    /// Folder-level summary for callers and JSON output. Rendering classifies
    /// each file on its own.
    pub flags: CategoryFlags,
}

impl FolderAnalysis {
    pub fn line_count(&self, file: &str) -> Option<usize> {
        self.line_counts.get(file).copied()
    }
}

/// Builds a [`FolderAnalysis`] for one directory, without recursing
pub struct FolderAnalyzer {
    extensions: Vec<String>,
    exclude: Vec<String>,
}

impl FolderAnalyzer {
    pub fn new(config: &Config) -> Self {
        Self {
            extensions: config.extensions.clone(),
            exclude: config.exclude.clone(),
        }
    }

    pub fn analyze(&self, path: &Path) -> Result<FolderAnalysis> {
        let read_dir_err = |source: std::io::Error| GenError::ReadDir {
            path: path.to_path_buf(),
            source,
        };

        let mut analysis = FolderAnalysis {
            path: path.to_path_buf(),
            name: folder_name(path),
            ..Default::default()
        };

        for entry in fs::read_dir(path).map_err(read_dir_err)? {
            let entry = entry.map_err(read_dir_err)?;
            let entry_path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();

            // Follows symlinks, like the discovery walk's `is_dir` checks
            if entry_path.is_file() {
                if let Some(ext) = extension_of(&name) {
                    if self.is_primary(ext) {
                        analysis
                            .line_counts
                            .insert(name.clone(), count_lines(&entry_path));
                    }
                    if let Some(category) = FileCategory::from_extension(ext) {
                        analysis.flags.set(category);
                    }
                }
                analysis.files.push(name);
            } else if entry_path.is_dir() && !self.is_excluded(&name) {
                analysis.subfolders.push(name);
            }
        }

        analysis.files.sort();
        analysis.subfolders.sort();

        Ok(analysis)
    }

    fn is_primary(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == ext)
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|e| e == name)
    }
}

/// Counts lines in a UTF-8 text file. Any read failure counts as zero.
pub fn count_lines(path: &Path) -> usize {
    match fs::read_to_string(path) {
        Ok(content) => content.lines().count(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Cannot count lines, recording 0");
            0
        }
    }
}

/// Display name of a folder; falls back to the canonical path for `.` and `..`.
pub fn folder_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .or_else(|| {
            fs::canonicalize(path)
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        })
        .unwrap_or_else(|| path.display().to_string())
}

fn extension_of(name: &str) -> Option<&str> {
    Path::new(name).extension().and_then(|e| e.to_str())
}
