//! Interactive terminal front end.
//!
//! Each input line is either a `:command` or the new content of the search
//! box. Searches run as spawned tasks; a render task subscribes to the session,
//! the search controller and the selected tab, and redraws on every change.

use crate::connectivity::ConnectivityProbe;
use crate::error::{ExplorerError, Result};
use crate::github::SearchBackend;
use crate::models::{SearchPhase, SearchSession, SessionSnapshot};
use crate::search::SearchController;
use crate::session::SessionState;
use crate::types::Repository;
use crate::views::{home_listing, HomeTab, Listing, Palette, RepoCard, RepoDetails, LOADING_TEXT};
use colored::*;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

pub const HELP_TEXT: &str = "\
Type to search GitHub repositories. Commands:
  :clear          clear the search box
  :tab all|fav    switch between all results and favorites
  :fav <n>        toggle favorite for item n of the current list
  :open <n>       show details for item n of the current list
  :dark           toggle dark mode
  :profile        show the profile view
  :help           show this help
  :quit           exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// New full content of the search box
    Search(String),
    Clear,
    Tab(HomeTab),
    Favorite(usize),
    Open(usize),
    Dark,
    Profile,
    Help,
    Quit,
}

fn parse_index(arg: Option<&str>, line: &str) -> Result<usize> {
    arg.and_then(|n| n.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .ok_or_else(|| ExplorerError::UnknownCommand(format!("{} (expected a list number)", line)))
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let Some(command) = line.trim_start().strip_prefix(':') else {
            return Ok(Command::Search(line.to_string()));
        };

        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();

        match name {
            "clear" => Ok(Command::Clear),
            "tab" => arg
                .and_then(HomeTab::from_name)
                .map(Command::Tab)
                .ok_or_else(|| ExplorerError::UnknownCommand(format!("{} (expected all or fav)", line.trim()))),
            "fav" => parse_index(arg, line.trim()).map(Command::Favorite),
            "open" => parse_index(arg, line.trim()).map(Command::Open),
            "dark" => Ok(Command::Dark),
            "profile" => Ok(Command::Profile),
            "help" => Ok(Command::Help),
            "quit" | "q" => Ok(Command::Quit),
            _ => Err(ExplorerError::UnknownCommand(line.trim().to_string())),
        }
    }
}

pub fn render_card(index: usize, card: &RepoCard, palette: Palette) -> String {
    let marker = if card.favorite { "♥" } else { "♡" };
    format!(
        "{:>3}. {} {} {}\n     {}\n     ⭐ {}  🍴 {}  {}",
        index,
        marker.color(palette.favorite),
        card.name.color(palette.text).bold(),
        card.owner.color(palette.muted),
        card.description.color(palette.text),
        card.stars,
        card.forks,
        card.language.color(palette.accent),
    )
}

/// Full home view for the current state.
pub fn render_home(tab: HomeTab, session: &SessionSnapshot, search: &SearchSession) -> String {
    let palette = Palette::for_mode(session.dark_mode);

    let tabs: Vec<String> = HomeTab::ALL
        .iter()
        .map(|t| {
            if *t == tab {
                format!("[{}]", t.label()).color(palette.text).bold().to_string()
            } else {
                t.label().color(palette.muted).to_string()
            }
        })
        .collect();

    let mut lines = vec![
        "=".repeat(50).dimmed().to_string(),
        format!("{}  {}", "Explorer".color(palette.accent).bold(), tabs.join("  ")),
    ];
    if !search.query.is_empty() {
        lines.push(format!("Search: {}", search.query.color(palette.text)));
    }

    if let Some(error) = &search.error {
        lines.push(error.color(palette.error).to_string());
    }
    if search.phase == SearchPhase::Loading {
        lines.push(LOADING_TEXT.color(palette.muted).to_string());
    }

    match home_listing(tab, session, search) {
        Listing::Empty(message) => lines.push(message.color(palette.muted).to_string()),
        Listing::Items(items) => lines.extend(items.iter().enumerate().map(|(i, repo)| {
            let card = RepoCard::new(repo, session.is_favorite(repo.id));
            render_card(i + 1, &card, palette)
        })),
    }
    lines.join("\n")
}

pub fn render_details(details: &RepoDetails, dark_mode: bool) -> String {
    let palette = Palette::for_mode(dark_mode);
    [
        format!("{} {}", details.name.color(palette.text).bold(), details.owner.color(palette.muted)),
        format!("Avatar: {}", details.avatar_url.color(palette.muted)),
        format!("\n{}\n{}", "Description".bold(), details.description),
        format!("\n{}", "Statistics".bold()),
        format!(
            "⭐ {} stars  🍴 {} forks  👀 {} watchers  🐞 {} issues",
            details.stars, details.forks, details.watchers, details.open_issues
        ),
        format!("\nLanguage: {}", details.language.color(palette.accent)),
        format!("Last Updated: {}", details.last_updated),
        format!("Open on GitHub: {}", details.url.underline()),
    ]
    .join("\n")
}

pub fn render_profile(session: &SessionSnapshot) -> String {
    let palette = Palette::for_mode(session.dark_mode);
    format!(
        "{}\nFavorites: {}\nDark mode: {}\n",
        "Profile".color(palette.accent).bold(),
        session.favorites.len(),
        if session.dark_mode { "on" } else { "off" },
    )
}

pub struct Shell<P, B> {
    session: Arc<SessionState>,
    controller: Arc<SearchController<P, B>>,
    tab: watch::Sender<HomeTab>,
}

impl<P, B> Shell<P, B>
where
    P: ConnectivityProbe + 'static,
    B: SearchBackend + 'static,
{
    pub fn new(session: Arc<SessionState>, controller: Arc<SearchController<P, B>>) -> Self {
        let (tab, _) = watch::channel(HomeTab::default());
        Self { session, controller, tab }
    }

    pub fn tab(&self) -> HomeTab {
        *self.tab.borrow()
    }

    fn current_listing(&self) -> Listing {
        home_listing(self.tab(), &self.session.snapshot(), &self.controller.snapshot())
    }

    /// Item `n` (1-based) of the list currently on screen.
    fn listing_item(&self, n: usize) -> Option<Repository> {
        let index = n.checked_sub(1)?;
        self.current_listing().items().get(index).cloned()
    }

    /// Spawn the task that redraws the home view whenever any state changes.
    pub fn spawn_renderer(&self) -> JoinHandle<()> {
        let mut session_rx = self.session.subscribe();
        let mut search_rx = self.controller.subscribe();
        let mut tab_rx = self.tab.subscribe();

        tokio::spawn(async move {
            loop {
                let changed = tokio::select! {
                    r = session_rx.changed() => r,
                    r = search_rx.changed() => r,
                    r = tab_rx.changed() => r,
                };
                if changed.is_err() {
                    debug!("State dropped, renderer exiting");
                    break;
                }

                let view = render_home(
                    *tab_rx.borrow_and_update(),
                    &session_rx.borrow_and_update(),
                    &search_rx.borrow_and_update(),
                );
                println!("{}", view);
            }
        })
    }

    /// Apply one command. Returns `false` once the shell should exit.
    pub fn handle(&self, command: Command) -> bool {
        match command {
            Command::Search(text) => {
                let controller = self.controller.clone();
                tokio::spawn(async move {
                    controller.search(&text).await;
                });
            }
            Command::Clear => self.controller.clear(),
            Command::Tab(tab) => {
                self.tab.send_replace(tab);
            }
            Command::Favorite(n) => match self.listing_item(n) {
                Some(repo) => {
                    self.session.toggle_favorite(&repo);
                }
                None => println!("{}", format!("No item {} in the current list", n).red()),
            },
            Command::Open(n) => match self.listing_item(n) {
                Some(repo) => {
                    let details = RepoDetails::from(&repo);
                    println!("{}", render_details(&details, self.session.is_dark_mode()));
                }
                None => println!("{}", format!("No item {} in the current list", n).red()),
            },
            Command::Dark => {
                self.session.toggle_dark_mode();
            }
            Command::Profile => println!("{}", render_profile(&self.session.snapshot())),
            Command::Help => println!("{}", HELP_TEXT),
            Command::Quit => return false,
        }
        true
    }

    /// Read lines until `:quit` or end of input. The session is reset on
    /// every exit, including a failed read.
    pub async fn run<R>(&self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        println!(
            "{}",
            render_home(self.tab(), &self.session.snapshot(), &self.controller.snapshot())
        );

        let result = self.read_commands(input).await;
        info!(ok = result.is_ok(), "Shell input closed");
        self.session.reset();
        result
    }

    async fn read_commands<R>(&self, mut input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf).await? == 0 {
                return Ok(());
            }

            // Undecodable bytes become U+FFFD instead of ending the session.
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(|c: char| c == '\n' || c == '\r');
            match Command::parse(line) {
                Ok(command) => {
                    if !self.handle(command) {
                        return Ok(());
                    }
                }
                Err(e) => println!("{}", e.to_string().red()),
            }
        }
    }
}
