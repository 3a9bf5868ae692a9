//! QuizEngine - main entry point for running quizzes

use crate::catalog::ThemeCatalog;
use crate::config::EngineConfig;
use crate::coverage::CoverageReport;
use crate::error::{Result, SdkError};
use serde::Serialize;
use shindan_core::{AnswerSet, Theme, TypeDef};
use shindan_runtime::{
    share_text, Action, CopyConfirmation, Resolution, RuleResolver, Session, SessionDriver,
    ShareLinks,
};
use std::sync::Arc;

/// Everything the result screen shows for one resolved type
#[derive(Debug, Clone, Serialize)]
pub struct ResultCard {
    pub theme_id: String,
    pub type_def: TypeDef,

    /// Flavor text, or the type description when the theme has none
    pub flavor_text: String,

    pub share_text: String,
    pub links: ShareLinks,
}

/// Quiz engine holding the loaded themes
pub struct QuizEngine {
    catalog: ThemeCatalog,
    config: EngineConfig,
}

impl QuizEngine {
    /// Create a new engine, loading the themes named by `config`
    pub fn new(config: EngineConfig) -> Result<Self> {
        let mut catalog = if config.include_builtin {
            ThemeCatalog::builtin()?
        } else {
            ThemeCatalog::new()
        };

        if let Some(dir) = &config.theme_dir {
            catalog.load_dir(dir)?;
        }

        for (name, content) in &config.theme_contents {
            catalog.load_str(name, content)?;
        }

        if catalog.is_empty() {
            return Err(SdkError::ConfigError("No themes loaded".to_string()));
        }

        if config.strict {
            catalog.ensure_valid()?;
        }

        tracing::info!(themes = catalog.len(), "Quiz engine ready");

        Ok(Self { catalog, config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ThemeCatalog {
        &self.catalog
    }

    /// Themes in landing order
    pub fn themes(&self) -> &[Arc<Theme>] {
        self.catalog.themes()
    }

    pub fn theme(&self, id: &str) -> Result<Arc<Theme>> {
        self.catalog
            .get(id)
            .ok_or_else(|| SdkError::UnknownTheme(id.to_string()))
    }

    /// Fresh session on the landing stage, using the configured copy and delays
    pub fn new_session(&self) -> Session {
        Session::new(self.config.script.clone(), self.config.delays.into())
    }

    /// Async driver around a fresh session
    pub fn new_driver(&self) -> SessionDriver {
        SessionDriver::new(self.new_session())
    }

    /// Action that starts the theme with `id`
    pub fn theme_action(&self, id: &str) -> Result<Action> {
        Ok(Action::SelectTheme(self.theme(id)?))
    }

    /// Resolve a complete answer set for a theme
    pub fn resolve(&self, theme_id: &str, answers: &AnswerSet) -> Result<Option<TypeDef>> {
        let theme = self.theme(theme_id)?;
        answers.ensure_complete_for(&theme)?;
        Ok(RuleResolver::resolve(&theme, answers).cloned())
    }

    /// Resolve with a rule-by-rule trace and hand it to `inspect`
    pub fn explain<R>(
        &self,
        theme_id: &str,
        answers: &AnswerSet,
        inspect: impl FnOnce(&Resolution<'_>) -> R,
    ) -> Result<R> {
        let theme = self.theme(theme_id)?;
        answers.ensure_complete_for(&theme)?;
        let resolution = RuleResolver::new().with_trace().evaluate(&theme, answers);
        Ok(inspect(&resolution))
    }

    /// Result screen content for a resolved type
    pub fn present(&self, theme_id: &str, type_def: &TypeDef) -> ResultCard {
        let text = share_text(type_def);
        ResultCard {
            theme_id: theme_id.to_string(),
            type_def: type_def.clone(),
            flavor_text: self
                .catalog
                .flavor()
                .text_for(theme_id, type_def)
                .to_string(),
            links: ShareLinks::build(&text, &self.config.page_url),
            share_text: text,
        }
    }

    /// Result card for a session on the result stage
    pub fn present_session(&self, session: &Session) -> Option<ResultCard> {
        let theme = session.theme()?;
        let type_def = session.result()?;
        Some(self.present(&theme.id, type_def))
    }

    /// Copy confirmation with the configured display time
    pub fn copy_confirmation(&self) -> CopyConfirmation {
        CopyConfirmation::new(self.config.copy_confirmation())
    }

    pub fn coverage(&self, theme_id: &str) -> Result<CoverageReport> {
        let theme = self.theme(theme_id)?;
        Ok(CoverageReport::for_theme(&theme))
    }

    /// Coverage of every loaded theme, in landing order
    pub fn coverage_all(&self) -> Vec<CoverageReport> {
        self.themes()
            .iter()
            .map(|theme| CoverageReport::for_theme(theme))
            .collect()
    }
}
