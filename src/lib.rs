//! Scaffolds placeholder `README.md` files for every folder of a source tree.
//!
//! The [`ReadmeGenerator`] walks the tree, skips folders that already have an
//! output file, and for every other folder runs the [`FolderAnalyzer`] and the
//! [`TemplateRenderer`] before writing the result.

pub mod config;
pub mod error;
pub mod generator;
pub mod render;
pub mod scanner;

pub use config::{Config, CONFIG_FILENAME, DEFAULT_OUTPUT_FILE};
pub use error::{GenError, Result};
pub use generator::{Discovery, FailedFolder, ReadmeGenerator, RunReport};
pub use render::{
    titlecase, ParentSummary, PurposeTable, RenderedDocument, TemplateRenderer, DEFAULT_PURPOSES,
};
pub use scanner::{CategoryFlags, FileCategory, FolderAnalysis, FolderAnalyzer, FolderWalker};
