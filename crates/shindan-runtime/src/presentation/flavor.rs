//! Flavor text table

use shindan_core::TypeDef;
use std::collections::HashMap;

/// Theme id → type id → flavor text
#[derive(Debug, Clone, Default)]
pub struct FlavorTable {
    entries: HashMap<String, HashMap<String, String>>,
}

impl FlavorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one entry
    pub fn insert(
        &mut self,
        theme_id: impl Into<String>,
        type_id: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.entries
            .entry(theme_id.into())
            .or_default()
            .insert(type_id.into(), text.into());
    }

    /// Replace all entries of a theme
    pub fn set_theme(&mut self, theme_id: impl Into<String>, texts: HashMap<String, String>) {
        self.entries.insert(theme_id.into(), texts);
    }

    /// Flavor text for a type, or `None` when the table has no entry
    pub fn get(&self, theme_id: &str, type_id: &str) -> Option<&str> {
        self.entries
            .get(theme_id)
            .and_then(|texts| texts.get(type_id))
            .map(String::as_str)
    }

    /// Flavor text for a type, falling back to its description
    pub fn text_for<'a>(&'a self, theme_id: &str, type_def: &'a TypeDef) -> &'a str {
        self.get(theme_id, &type_def.id)
            .unwrap_or(type_def.description.as_str())
    }
}
