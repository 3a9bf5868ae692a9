//! Theme catalog
//!
//! Holds every loaded theme in landing order together with its flavor
//! texts and validation diagnostics.

use crate::error::{Result, SdkError};
use shindan_core::Theme;
use shindan_parser::{Diagnostic, DiagnosticSeverity, ThemeDocument, ThemeParser, ThemeValidator};
use shindan_runtime::FlavorTable;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Themes compiled into the crate, in landing order
const BUILTIN_THEMES: &[(&str, &str)] = &[
    ("sushi.yaml", include_str!("../themes/sushi.yaml")),
    ("aimodel.yaml", include_str!("../themes/aimodel.yaml")),
    ("kansai_tsukkomi.yaml", include_str!("../themes/kansai_tsukkomi.yaml")),
];

/// Ordered collection of themes
#[derive(Debug, Clone, Default)]
pub struct ThemeCatalog {
    themes: Vec<Arc<Theme>>,
    flavor: FlavorTable,
    diagnostics: HashMap<String, Vec<Diagnostic>>,
}

impl ThemeCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of the built-in themes
    pub fn builtin() -> Result<Self> {
        let mut catalog = Self::new();
        for (name, content) in BUILTIN_THEMES {
            catalog.load_str(name, content)?;
        }
        Ok(catalog)
    }

    /// Parse every theme document in `content` and add it
    ///
    /// Returns the number of themes added or replaced.
    pub fn load_str(&mut self, name: &str, content: &str) -> Result<usize> {
        let documents = ThemeParser::parse_multi_document(content).map_err(|e| {
            SdkError::InvalidThemeFile {
                path: name.into(),
                message: e.to_string(),
            }
        })?;

        let count = documents.len();
        for document in documents {
            self.insert(document);
        }
        tracing::debug!(source = name, count, "Loaded theme content");
        Ok(count)
    }

    /// Load all `*.yaml` / `*.yml` files in `dir`, in file name order
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        if !dir.is_dir() {
            return Err(SdkError::ConfigError(format!(
                "Theme directory does not exist: {:?}",
                dir
            )));
        }

        let mut paths: Vec<_> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext == "yaml" || ext == "yml")
            })
            .collect();
        paths.sort();

        let mut total = 0;
        for path in paths {
            let content = fs::read_to_string(&path)?;
            let documents = ThemeParser::parse_multi_document(&content).map_err(|e| {
                SdkError::InvalidThemeFile {
                    path: path.clone(),
                    message: e.to_string(),
                }
            })?;
            total += documents.len();
            for document in documents {
                self.insert(document);
            }
            tracing::debug!("Loaded theme file: {:?}", path);
        }

        tracing::info!(count = total, dir = ?dir, "Loaded theme directory");
        Ok(total)
    }

    /// Add a parsed theme, replacing any theme with the same id in place
    pub fn insert(&mut self, document: ThemeDocument) {
        let ThemeDocument {
            theme,
            flavor,
            warnings,
        } = document;

        for warning in &warnings {
            tracing::warn!(theme = %theme.id, "{}", warning);
        }

        let diagnostics = ThemeValidator::validate(&theme);
        for diagnostic in &diagnostics {
            match diagnostic.severity {
                DiagnosticSeverity::Error => {
                    tracing::warn!(theme = %theme.id, "Configuration defect: {}", diagnostic)
                }
                DiagnosticSeverity::Warning | DiagnosticSeverity::Info => {
                    tracing::debug!(theme = %theme.id, "{}", diagnostic)
                }
            }
        }

        let id = theme.id.clone();
        self.flavor.set_theme(id.clone(), flavor);
        self.diagnostics.insert(id.clone(), diagnostics);

        let theme = Arc::new(theme);
        match self.themes.iter_mut().find(|t| t.id == id) {
            Some(existing) => {
                tracing::info!(theme = %id, "Replacing theme");
                *existing = theme;
            }
            None => self.themes.push(theme),
        }
    }

    /// Themes in landing order
    pub fn themes(&self) -> &[Arc<Theme>] {
        &self.themes
    }

    /// Theme by id
    pub fn get(&self, id: &str) -> Option<Arc<Theme>> {
        self.themes.iter().find(|t| t.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    pub fn flavor(&self) -> &FlavorTable {
        &self.flavor
    }

    /// Validation diagnostics of a theme
    pub fn diagnostics(&self, id: &str) -> &[Diagnostic] {
        self.diagnostics.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Fail on the first theme with validation errors
    pub fn ensure_valid(&self) -> Result<()> {
        for theme in &self.themes {
            let count = self
                .diagnostics(&theme.id)
                .iter()
                .filter(|d| d.is_error())
                .count();
            if count > 0 {
                return Err(SdkError::ValidationFailed {
                    theme_id: theme.id.clone(),
                    count,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order() {
        let catalog = ThemeCatalog::builtin().unwrap();
        let ids: Vec<_> = catalog.themes().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["sushi", "aimodel", "kansai_tsukkomi"]);
    }

    #[test]
    fn test_builtin_themes_are_valid() {
        let catalog = ThemeCatalog::builtin().unwrap();
        catalog.ensure_valid().unwrap();

        // aimodel ships one type no rule selects.
        let codes: Vec<_> = catalog
            .diagnostics("aimodel")
            .iter()
            .map(|d| d.code.as_str())
            .collect();
        assert_eq!(codes, vec!["W001"]);
        assert!(catalog.diagnostics("sushi").is_empty());
        assert!(catalog.diagnostics("kansai_tsukkomi").is_empty());
    }

    #[test]
    fn test_builtin_flavor_loaded() {
        let catalog = ThemeCatalog::builtin().unwrap();
        assert!(catalog
            .flavor()
            .get("sushi", "t_ebi")
            .unwrap()
            .starts_with("プリプリの弾力"));
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut catalog = ThemeCatalog::builtin().unwrap();
        let yaml = r#"
theme:
  id: sushi
  title: 新・寿司診断
  questions:
    - { id: q1, text: one, options: [a, b] }
  rules: { fallback: t_a }
  types:
    - { id: t_a, label: A, emoji: "🅰", description: a }
"#;
        assert_eq!(catalog.load_str("override.yaml", yaml).unwrap(), 1);

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.themes()[0].title, "新・寿司診断");
        assert!(catalog.flavor().get("sushi", "t_ebi").is_none());
    }

    #[test]
    fn test_invalid_content_reports_source() {
        let mut catalog = ThemeCatalog::new();
        let err = catalog.load_str("broken.yaml", "theme:\n  title: no id\n").unwrap_err();
        assert!(err.to_string().contains("broken.yaml"));
    }
}
