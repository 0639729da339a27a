//! Folder name to purpose lookup.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

/// Built-in purposes, keyed by lowercase folder name
const BUILTIN_PURPOSES: &[(&str, &str)] = &[
    ("agent", "AI Agent System"),
    ("memory", "Memory Management System"),
    ("cli", "Command-Line Interface"),
    ("gateway", "Main Gateway/Server"),
    ("tools", "Tool Definitions and Implementations"),
    ("utils", "Utility Functions"),
    ("types", "TypeScript Type Definitions"),
    ("plugins", "Plugin System"),
    ("protocol", "Communication Protocols"),
    ("storage", "Data Storage and Persistence"),
    ("web", "Web Interface/Dashboard"),
    ("shadow", "Shadow/Parallel Execution System"),
    ("subagents", "Sub-agent Management"),
    ("config", "Configuration Management"),
];

/// Global built-in table (lazily initialized)
pub static DEFAULT_PURPOSES: Lazy<PurposeTable> = Lazy::new(PurposeTable::new);

#[derive(Debug, Clone)]
pub struct PurposeTable {
    entries: BTreeMap<String, String>,
}

impl PurposeTable {
    pub fn new() -> Self {
        Self {
            entries: BUILTIN_PURPOSES
                .iter()
                .map(|(name, purpose)| (name.to_string(), purpose.to_string()))
                .collect(),
        }
    }

    /// Built-in table with `overrides` layered on top
    pub fn with_overrides<'a>(overrides: impl IntoIterator<Item = (&'a String, &'a String)>) -> Self {
        let mut table = DEFAULT_PURPOSES.clone();
        for (name, purpose) in overrides {
            table.insert(name, purpose);
        }
        table
    }

    pub fn insert(&mut self, name: &str, purpose: &str) {
        self.entries.insert(name.to_lowercase(), purpose.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Purpose for `name`, or `"<Titlecased name> Module"` when unknown.
    pub fn resolve(&self, name: &str) -> String {
        match self.get(name) {
            Some(purpose) => purpose.to_string(),
            None => format!("{} Module", titlecase(name)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PurposeTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Uppercases the first letter of every alphabetic run and lowercases the rest.
pub fn titlecase(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}
