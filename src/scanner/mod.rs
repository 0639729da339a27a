pub mod analyzer;
pub mod walker;

pub use analyzer::{
    count_lines, folder_name, CategoryFlags, FileCategory, FolderAnalysis, FolderAnalyzer,
};
pub use walker::{check_root, depth, FolderWalker};
