//! Markdown template for a folder's placeholder README.
//!
//! Rendering is a pure function of the [`FolderAnalysis`] and the optional
//! [`ParentSummary`]: identical input always yields byte-identical output.
//! Section order:
//!
//! 1. Title (`# 📁 <name>/ - <purpose>`)
//! 2. Placeholder description
//! 3. Key Files (only when the folder has files)
//! 4. Subfolders (only when it has subfolders)
//! 5. Constraints, public interfaces, integration points, common issues
//! 6. Related Documentation (only when the parent has a README)
//! 7. Auto-generation notice

use crate::config::Config;
use crate::scanner::{FileCategory, FolderAnalysis};

use super::purpose::PurposeTable;

/// Parent folder that currently has an output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentSummary {
    pub name: String,
}

impl ParentSummary {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Finished Markdown text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    content: String,
}

impl RenderedDocument {
    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn into_string(self) -> String {
        self.content
    }

    /// First line, i.e. the title
    pub fn title(&self) -> &str {
        self.content.lines().next().unwrap_or("")
    }
}

pub const GENERATED_NOTICE: &str =
    "*This README was auto-generated. Please update with specific details about this module.*";

pub struct TemplateRenderer {
    purposes: PurposeTable,
    project_name: String,
    output_file: String,
}

impl TemplateRenderer {
    pub fn new(config: &Config) -> Self {
        Self {
            purposes: PurposeTable::with_overrides(&config.purposes),
            project_name: config.project_name.clone(),
            output_file: config.output_file.clone(),
        }
    }

    pub fn render(
        &self,
        analysis: &FolderAnalysis,
        parent: Option<&ParentSummary>,
    ) -> RenderedDocument {
        let name = &analysis.name;
        let purpose = self.purposes.resolve(name);

        let mut lines: Vec<String> = Vec::new();

        lines.push(format!("# 📁 {}/ - {}", name, purpose));
        lines.push(String::new());

        lines.push("## 🎯 What This Folder Does".to_string());
        lines.push(format!(
            "[Brief description of what this module does within {}]",
            self.project_name
        ));
        lines.push(String::new());

        if !analysis.files.is_empty() {
            lines.push("## 📄 Key Files".to_string());
            let mut files: Vec<&String> = analysis.files.iter().collect();
            files.sort();
            // Classified per file; `analysis.flags` only records which categories are present
            for file in files {
                if let Some(count) = analysis.line_count(file) {
                    lines.push(format!("- `{}` - ({} lines) [Description]", file, count));
                } else if FileCategory::for_file(file).is_some() {
                    lines.push(format!("- `{}` - [Description]", file));
                }
            }
            lines.push(String::new());
        }

        if !analysis.subfolders.is_empty() {
            lines.push("## 📁 Subfolders".to_string());
            let mut subfolders: Vec<&String> = analysis.subfolders.iter().collect();
            subfolders.sort();
            for subfolder in subfolders {
                lines.push(format!("- `{}/` - [Purpose]", subfolder));
            }
            lines.push(String::new());
        }

        push_static_sections(&mut lines);

        if let Some(parent) = parent {
            lines.push("## 📚 Related Documentation".to_string());
            lines.push(format!(
                "- See `../{}` for {} overview",
                self.output_file, parent.name
            ));
            lines.push(String::new());
        }

        lines.push("---".to_string());
        lines.push(GENERATED_NOTICE.to_string());

        let mut content = lines.join("\n");
        content.push('\n');
        RenderedDocument { content }
    }
}

fn push_static_sections(lines: &mut Vec<String>) {
    const SECTIONS: &[(&str, &[&str])] = &[
        (
            "## ⚠️ Important Constraints",
            &[
                "- [Add important technical constraints or requirements]",
                "- [Add rate limits, API constraints, etc.]",
            ],
        ),
        (
            "## 🔌 Public Interfaces",
            &["- `[ClassNameOrFunction]` - [Purpose]"],
        ),
        (
            "## 🔄 Integration Points",
            &[
                "- **Connected to**: [Other modules this interacts with]",
                "- **Used by**: [Who consumes this module]",
            ],
        ),
        (
            "## 🚨 Common Issues & Fixes",
            &[
                "1. **[Common error]**: [Solution]",
                "2. **[Performance issue]**: [Optimization]",
            ],
        ),
    ];

    for (heading, body) in SECTIONS {
        lines.push(heading.to_string());
        lines.extend(body.iter().map(|line| line.to_string()));
        lines.push(String::new());
    }
}
