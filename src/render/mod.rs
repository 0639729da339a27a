//! Markdown rendering for folder READMEs.

pub mod purpose;
pub mod template;

pub use purpose::{titlecase, PurposeTable, DEFAULT_PURPOSES};
pub use template::{ParentSummary, RenderedDocument, TemplateRenderer, GENERATED_NOTICE};
