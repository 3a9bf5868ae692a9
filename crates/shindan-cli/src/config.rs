//! CLI configuration

use serde::{Deserialize, Serialize};
use shindan_sdk::{DelayConfig, EngineConfig};
use std::path::{Path, PathBuf};

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Directory of extra theme files
    pub theme_dir: Option<PathBuf>,

    /// Load the built-in themes
    pub include_builtin: bool,

    /// Refuse to start when a theme has validation errors
    pub strict: bool,

    /// Page URL passed to the LINE share link
    pub page_url: String,

    /// Open share links in the system browser
    pub open_links: bool,

    /// How long "copied" stays visible
    pub copy_confirmation_ms: u64,

    /// Typing delays
    pub delays: DelayConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            theme_dir: None,
            include_builtin: engine.include_builtin,
            strict: engine.strict,
            page_url: engine.page_url,
            open_links: true,
            copy_confirmation_ms: engine.copy_confirmation_ms,
            delays: engine.delays,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        match Self::build(config::File::with_name("config/shindan").required(false)) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!("Ignoring unreadable configuration: {}", err);
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific file, plus the environment
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        Self::build(config::File::from(path))
    }

    fn build<S>(file: S) -> anyhow::Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("SHINDAN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|cfg| cfg.try_deserialize())
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Engine configuration for these settings
    pub fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::new().with_page_url(self.page_url.clone());
        config.theme_dir = self.theme_dir.clone();
        config.include_builtin = self.include_builtin;
        config.strict = self.strict;
        config.delays = self.delays;
        config.copy_confirmation_ms = self.copy_confirmation_ms;
        config
    }
}
