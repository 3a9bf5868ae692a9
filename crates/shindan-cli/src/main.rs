//! Shindan terminal front end
//!
//! Plays the humor quiz as a chat in the terminal and exposes the theme
//! checks used when authoring new themes.

mod chat;
mod clipboard;
mod commands;
mod config;
mod render;

use crate::config::CliConfig;
use anyhow::Result;
use clap::{Parser, Subcommand};
use shindan_sdk::{DelayConfig, QuizEngine, QuizEngineBuilder};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "shindan")]
#[command(about = "ユーモア診断 - humor quiz in your terminal", long_about = None)]
struct Cli {
    /// Configuration file (default: config/shindan.*)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory of extra theme files
    #[arg(long, global = true)]
    theme_dir: Option<PathBuf>,

    /// Skip the built-in themes
    #[arg(long, global = true)]
    no_builtin: bool,

    /// Refuse to start when a theme has validation errors
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the quiz as a chat (default)
    Play {
        /// Start with this theme instead of the landing screen
        #[arg(long)]
        theme: Option<String>,

        /// No typing delays
        #[arg(long)]
        fast: bool,

        /// Print share links without opening the browser
        #[arg(long)]
        no_open: bool,
    },
    /// List available themes
    List,
    /// Validate themes and check that every answer combination resolves
    Check {
        /// Only this theme
        theme: Option<String>,

        #[arg(long)]
        json: bool,
    },
    /// Resolve a set of answers without playing
    Resolve {
        theme: String,

        /// Answers as QUESTION=OPTION
        #[arg(required = true)]
        answers: Vec<String>,

        /// Show how each rule evaluated
        #[arg(long)]
        explain: bool,

        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    init_tracing()?;

    let cli = Cli::parse();

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => CliConfig::load_from(path)?,
        None => CliConfig::load()?,
    };
    if cli.theme_dir.is_some() {
        config.theme_dir = cli.theme_dir.clone();
    }
    if cli.no_builtin {
        config.include_builtin = false;
    }
    if cli.strict {
        config.strict = true;
    }
    tracing::debug!("Loaded configuration: {:?}", config);

    match cli.command.unwrap_or(Commands::Play {
        theme: None,
        fast: false,
        no_open: false,
    }) {
        Commands::Play {
            theme,
            fast,
            no_open,
        } => {
            if fast {
                config.delays = DelayConfig {
                    consent_accept_ms: 0,
                    next_question_ms: 0,
                    reveal_result_ms: 0,
                    retry_ms: 0,
                    decline_reset_ms: 0,
                };
            }
            let engine = build_engine(&config)?;
            let options = chat::ChatOptions {
                theme,
                open_links: config.open_links && !no_open,
            };
            chat::run(&engine, options).await?;
        }
        Commands::List => {
            let engine = build_engine(&config)?;
            print(&commands::list(&engine));
        }
        Commands::Check { theme, json } => {
            let engine = build_engine(&config)?;
            let checks = commands::check(&engine, theme.as_deref())?;
            if json {
                println!("{}", commands::to_json(&checks)?);
            } else {
                print(&commands::format_check(&checks));
            }
            let failed = checks.iter().filter(|c| !c.passed()).count();
            if failed > 0 {
                anyhow::bail!("{} theme(s) failed the check", failed);
            }
        }
        Commands::Resolve {
            theme,
            answers,
            explain,
            json,
        } => {
            let engine = build_engine(&config)?;
            let answers = commands::parse_answers(&answers)?;
            let output = commands::resolve(&engine, &theme, &answers, explain)?;
            if json {
                println!("{}", commands::to_json(&output)?);
            } else {
                print(&commands::format_resolve(&output));
            }
        }
    }

    Ok(())
}

fn build_engine(config: &CliConfig) -> Result<QuizEngine> {
    let engine = QuizEngineBuilder::new()
        .with_config(config.engine_config())
        .build()?;
    Ok(engine)
}

fn print(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

/// Initialize tracing subscriber
///
/// Logs go to stderr so the chat on stdout stays readable.
fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "shindan_cli=info,shindan_sdk=info,shindan_runtime=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
