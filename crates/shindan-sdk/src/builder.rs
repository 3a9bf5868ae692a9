//! Builder pattern for QuizEngine

use crate::config::{DelayConfig, EngineConfig};
use crate::engine::QuizEngine;
use crate::error::Result;
use shindan_runtime::Script;
use std::path::PathBuf;

/// Builder for QuizEngine
///
/// # Example
///
/// ```rust,ignore
/// use shindan_sdk::QuizEngineBuilder;
///
/// // Built-in themes plus a directory of extra ones
/// let engine = QuizEngineBuilder::new()
///     .with_theme_dir("themes")
///     .strict(true)
///     .build()?;
///
/// // Only inline content (for testing)
/// let engine = QuizEngineBuilder::new()
///     .include_builtin(false)
///     .add_theme_content("custom.yaml", yaml_content)
///     .build()?;
/// ```
pub struct QuizEngineBuilder {
    config: EngineConfig,
}

impl QuizEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
        }
    }

    /// Start from an existing configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Load every `*.yaml` file in `path` after the built-in themes
    pub fn with_theme_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.theme_dir = Some(path.into());
        self
    }

    /// Add theme content directly (alternative to a directory)
    ///
    /// # Arguments
    /// * `name` - Source name used in error messages
    /// * `content` - YAML content with one or more `theme:` documents
    pub fn add_theme_content(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.config
            .theme_contents
            .push((name.into(), content.into()));
        self
    }

    /// Include the built-in themes (default: true)
    pub fn include_builtin(mut self, include: bool) -> Self {
        self.config.include_builtin = include;
        self
    }

    /// Refuse to build when a theme has validation errors
    pub fn strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    pub fn with_delays(mut self, delays: DelayConfig) -> Self {
        self.config.delays = delays;
        self
    }

    /// Set the page URL used in share links
    pub fn with_page_url(mut self, url: impl Into<String>) -> Self {
        self.config.page_url = url.into();
        self
    }

    /// Replace the chat copy
    pub fn with_script(mut self, script: Script) -> Self {
        self.config.script = script;
        self
    }

    /// Build the quiz engine
    pub fn build(self) -> Result<QuizEngine> {
        QuizEngine::new(self.config)
    }
}

impl Default for QuizEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
