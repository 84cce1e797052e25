//! Line-driven interactive session
//!
//! Lines starting with `:` are commands; any other line is treated as the
//! new content of the search box and goes through the debouncer, so a
//! burst of lines only searches for the last one.

use std::str::FromStr;

use owo_colors::OwoColorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::catalog::CharacterId;
use crate::config::Config;
use crate::debounce::{SearchInput, SearchTrigger};
use crate::display::{CharacterFormatter, format_view};
use crate::error::{HerodexError, Result};
use crate::view::{LoadOutcome, Tab, Theme};

use super::{AppController, load_with_splash, open_controller};

const HELP: &str = "\
Commands:
  :next / :prev      next or previous page
  :page N            jump to page N
  :tab all|favorites switch tabs
  :fav N             toggle favorite on the Nth listed character
  :show N            show details of the Nth listed character
  :close             close the detail view
  :clear             clear the search
  :theme NAME        light, dark or white_label
  :help              this help
  :quit              leave
Any other line searches by name prefix.";

/// One parsed line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractiveCommand {
    Next,
    Prev,
    Page(u32),
    Tab(Tab),
    /// 1-based position in the displayed list
    Favorite(usize),
    Show(usize),
    Close,
    Clear,
    Theme(Theme),
    Help,
    Quit,
    /// Search box content
    Type(String),
}

impl InteractiveCommand {
    pub fn parse(line: &str) -> Result<Self> {
        let Some(rest) = line.trim().strip_prefix(':') else {
            return Ok(InteractiveCommand::Type(line.trim().to_string()));
        };
        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();

        let command = match (name, arg) {
            ("next" | "n", None) => InteractiveCommand::Next,
            ("prev" | "p", None) => InteractiveCommand::Prev,
            ("page", Some(n)) => InteractiveCommand::Page(parse_number(n)?),
            ("tab", Some("all")) => InteractiveCommand::Tab(Tab::All),
            ("tab", Some("favorites" | "fav")) => InteractiveCommand::Tab(Tab::Favorites),
            ("fav", Some(n)) => InteractiveCommand::Favorite(parse_number(n)?),
            ("show", Some(n)) => InteractiveCommand::Show(parse_number(n)?),
            ("close", None) => InteractiveCommand::Close,
            ("clear", None) => InteractiveCommand::Clear,
            ("theme", Some(name)) => InteractiveCommand::Theme(Theme::from_str(name)?),
            ("help" | "h", None) => InteractiveCommand::Help,
            ("quit" | "q" | "exit", None) => InteractiveCommand::Quit,
            _ => {
                return Err(HerodexError::InvalidInput(format!(
                    "unknown command ':{rest}' (try :help)"
                )));
            }
        };
        Ok(command)
    }
}

fn parse_number<T: FromStr>(raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| HerodexError::InvalidInput(format!("expected a number, got '{raw}'")))
}

/// Run the interactive session until `:quit` or end of input
pub async fn cmd_interactive(config: &Config) -> Result<()> {
    let mut controller = open_controller(config)?;
    load_with_splash(&mut controller, config, false).await;
    render(&controller);

    let mut input = SearchInput::new(config.debounce(), config.min_search_len);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match InteractiveCommand::parse(&line) {
                    Ok(InteractiveCommand::Quit) => break,
                    Ok(command) => {
                        if apply(&mut controller, &mut input, command).await {
                            render(&controller);
                        }
                    }
                    Err(e) => eprintln!("{}", e.to_string().red()),
                }
            }
            Some(trigger) = input.next_trigger() => {
                match trigger {
                    SearchTrigger::Submit(text) => controller.submit_search(&text).await,
                    SearchTrigger::Clear => controller.reset_search().await,
                };
                render(&controller);
            }
        }
    }
    Ok(())
}

/// Apply one command; returns whether the screen should be redrawn
async fn apply(
    controller: &mut AppController,
    input: &mut SearchInput,
    command: InteractiveCommand,
) -> bool {
    match command {
        InteractiveCommand::Next => report_navigation(controller.next_page().await),
        InteractiveCommand::Prev => report_navigation(controller.previous_page().await),
        InteractiveCommand::Page(n) => report_navigation(controller.change_page(n).await),
        InteractiveCommand::Tab(tab) => {
            if let Some(outcome) = controller.switch_tab(tab).await {
                report_navigation(outcome);
            }
            true
        }
        InteractiveCommand::Favorite(n) => match nth_displayed(controller, n) {
            Some(id) => match controller.toggle_favorite(id) {
                Ok(_) => true,
                Err(e) => {
                    eprintln!("{}", format!("could not update favorites: {e}").red());
                    false
                }
            },
            None => false,
        },
        InteractiveCommand::Show(n) => match nth_displayed(controller, n) {
            Some(id) => controller.select_item(id),
            None => false,
        },
        InteractiveCommand::Close => {
            controller.close_detail();
            true
        }
        InteractiveCommand::Clear => {
            input.clear();
            controller.reset_search().await;
            true
        }
        InteractiveCommand::Theme(theme) => {
            controller.set_theme(theme);
            true
        }
        InteractiveCommand::Help => {
            println!("{HELP}");
            false
        }
        InteractiveCommand::Type(text) => {
            input.set_text(text);
            false
        }
        // Handled by the session loop
        InteractiveCommand::Quit => false,
    }
}

fn nth_displayed(controller: &AppController, n: usize) -> Option<CharacterId> {
    let id = n
        .checked_sub(1)
        .and_then(|i| controller.displayed().get(i).map(|c| c.id));
    if id.is_none() {
        eprintln!("{}", format!("no character at position {n}").red());
    }
    id
}

fn report_navigation(outcome: LoadOutcome) -> bool {
    match outcome {
        LoadOutcome::Rejected => {
            eprintln!("{}", "that page is not available".yellow());
            false
        }
        LoadOutcome::PastEnd => {
            eprintln!("{}", "no more characters".yellow());
            true
        }
        _ => true,
    }
}

fn render(controller: &AppController) {
    let vm = controller.view_model();
    println!("{}", format_view(&vm));
    if let Some(detail) = &vm.detail {
        println!("{}", CharacterFormatter::format_detail(detail, &vm.palette));
    }
}
