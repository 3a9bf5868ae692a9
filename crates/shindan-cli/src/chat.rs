//! Interactive chat loop
//!
//! Reads one command per line from stdin while the session driver fires
//! its timed steps in the background.

use crate::clipboard::Osc52Clipboard;
use crate::render::ChatView;
use shindan_runtime::ShareLinks;
use shindan_sdk::{Action, QuizEngine, Session, Stage};
use std::io::Write;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Share target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    X,
    Line,
}

/// One parsed line of user input
#[derive(Debug)]
pub enum Input {
    Action(Action),
    Copy,
    Share(Platform),
    Quit,
    Unknown(String),
}

/// Interpret a line in the context of the current stage
///
/// Numbers pick a theme on the landing screen and an option elsewhere;
/// typing an offered option verbatim works too.
pub fn parse_input(engine: &QuizEngine, session: &Session, line: &str) -> Input {
    let line = line.trim();

    match (line, session.stage()) {
        ("q" | "quit", _) => return Input::Quit,
        ("h" | "home", _) => return Input::Action(Action::GoHome),
        ("r" | "retry", Stage::Result) => return Input::Action(Action::Retry),
        ("c" | "copy", Stage::Result) => return Input::Copy,
        ("x", Stage::Result) => return Input::Share(Platform::X),
        ("l" | "line", Stage::Result) => return Input::Share(Platform::Line),
        _ => {}
    }

    let picked = line.parse::<usize>().ok().and_then(|n| n.checked_sub(1));

    if session.stage() == Stage::Landing {
        let theme = match picked {
            Some(index) => engine.themes().get(index).cloned(),
            None => engine.theme(line).ok(),
        };
        return match theme {
            Some(theme) => Input::Action(Action::SelectTheme(theme)),
            None => Input::Unknown(line.to_string()),
        };
    }

    let option = match picked {
        Some(index) => session.options().get(index).map(String::as_str),
        None => Some(line),
    };
    option
        .and_then(|o| session.action_for(o))
        .map_or_else(|| Input::Unknown(line.to_string()), Input::Action)
}

/// Options for an interactive run
#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    /// Theme to start with instead of the landing screen
    pub theme: Option<String>,

    /// Open share links in the system browser
    pub open_links: bool,
}

/// Run the chat until the user quits or stdin closes
pub async fn run(engine: &QuizEngine, options: ChatOptions) -> anyhow::Result<()> {
    let mut driver = engine.new_driver();
    let mut view = ChatView::new();
    let mut confirmation = engine.copy_confirmation();
    let mut clipboard = Osc52Clipboard::new(std::io::stdout());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if let Some(theme_id) = &options.theme {
        driver.dispatch(engine.theme_action(theme_id)?)?;
    }
    print_lines(&view.render(engine, driver.session()))?;

    loop {
        tokio::select! {
            fired = driver.next_step(), if driver.session().is_pending() => {
                fired?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_input(engine, driver.session(), &line) {
                    Input::Quit => break,
                    Input::Action(action) => {
                        if let Err(err) = driver.dispatch(action) {
                            tracing::debug!(error = %err, "Action rejected");
                            print_lines(&[format!("  ({})", err)])?;
                        }
                    }
                    Input::Copy => {
                        if let Some(card) = engine.present_session(driver.session()) {
                            let now = Instant::now();
                            if confirmation.copy(&mut clipboard, &card.share_text, now)
                                && confirmation.is_shown(now)
                            {
                                print_lines(&["  コピーしました！".to_string()])?;
                            }
                        }
                    }
                    Input::Share(platform) => {
                        if let Some(card) = engine.present_session(driver.session()) {
                            share(&card.links, platform, options.open_links)?;
                        }
                    }
                    Input::Unknown(text) if text.is_empty() => {}
                    Input::Unknown(text) => {
                        print_lines(&[format!("  「{}」は選べません", text)])?;
                    }
                }
            }
        }

        print_lines(&view.render(engine, driver.session()))?;
    }

    Ok(())
}

fn share(links: &ShareLinks, platform: Platform, open_links: bool) -> anyhow::Result<()> {
    let url = match platform {
        Platform::X => &links.x,
        Platform::Line => &links.line,
    };

    if open_links {
        if let Err(err) = open::that(url) {
            tracing::warn!(error = %err, "Failed to open browser");
        }
    }
    print_lines(&[format!("  {}", url)])
}

fn print_lines(lines: &[String]) -> anyhow::Result<()> {
    if lines.is_empty() {
        return Ok(());
    }
    let mut out = std::io::stdout().lock();
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;
    Ok(())
}
