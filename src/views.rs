//! View-model decisions for the front end.
//!
//! Nothing here draws; these functions pick what a screen shows for a given
//! state so every front end makes the same choices.

use crate::models::{SearchSession, SessionSnapshot};
use crate::types::Repository;
use colored::Color;
use std::time::Duration;

pub const SPLASH_DURATION: Duration = Duration::from_secs(3);
pub const NOT_AVAILABLE: &str = "N/A";

pub const EMPTY_FAVORITES: &str = "No favourite repositories";
pub const EMPTY_PROMPT: &str = "Start typing to search for repositories.";
pub const EMPTY_RESULTS: &str = "No repositories found";
pub const LOADING_TEXT: &str = "Loading repositories...";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HomeTab {
    #[default]
    AllRepositories,
    Favorites,
}

impl HomeTab {
    pub const ALL: [HomeTab; 2] = [HomeTab::AllRepositories, HomeTab::Favorites];

    pub fn label(self) -> &'static str {
        match self {
            HomeTab::AllRepositories => "All Repositories",
            HomeTab::Favorites => "Favorites",
        }
    }

    /// Exact match on the short names the shell accepts.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "all" => Some(HomeTab::AllRepositories),
            "fav" | "favorites" => Some(HomeTab::Favorites),
            _ => None,
        }
    }
}

/// What the home list area shows
#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    Items(Vec<Repository>),
    Empty(&'static str),
}

impl Listing {
    pub fn items(&self) -> &[Repository] {
        match self {
            Listing::Items(items) => items,
            Listing::Empty(_) => &[],
        }
    }
}

pub fn home_listing(tab: HomeTab, session: &SessionSnapshot, search: &SearchSession) -> Listing {
    match tab {
        HomeTab::Favorites if session.favorites.is_empty() => Listing::Empty(EMPTY_FAVORITES),
        HomeTab::Favorites => Listing::Items(session.favorites.clone()),
        HomeTab::AllRepositories if search.results.is_empty() => {
            if search.trimmed_query().is_empty() {
                Listing::Empty(EMPTY_PROMPT)
            } else {
                Listing::Empty(EMPTY_RESULTS)
            }
        }
        HomeTab::AllRepositories => Listing::Items(search.results.clone()),
    }
}

/// One list card worth of text
#[derive(Debug, Clone, PartialEq)]
pub struct RepoCard {
    pub name: String,
    pub owner: String,
    pub description: String,
    pub stars: u64,
    pub forks: u64,
    pub language: String,
    pub favorite: bool,
}

impl RepoCard {
    pub fn new(repo: &Repository, favorite: bool) -> Self {
        Self {
            name: repo.name.clone(),
            owner: repo.owner.login.clone(),
            description: repo
                .description
                .clone()
                .unwrap_or_else(|| "No description".to_string()),
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            language: repo.language.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            favorite,
        }
    }
}

/// Detail screen text with every fallback applied
#[derive(Debug, Clone, PartialEq)]
pub struct RepoDetails {
    pub name: String,
    pub owner: String,
    pub avatar_url: String,
    pub description: String,
    pub stars: u64,
    pub forks: u64,
    pub watchers: String,
    pub open_issues: String,
    pub language: String,
    pub last_updated: String,
    pub url: String,
}

fn count_or_na(count: Option<u64>) -> String {
    count.map_or_else(|| NOT_AVAILABLE.to_string(), |n| n.to_string())
}

impl From<&Repository> for RepoDetails {
    fn from(repo: &Repository) -> Self {
        Self {
            name: repo.name.clone(),
            owner: repo.owner.login.clone(),
            avatar_url: repo.owner.avatar_url.clone(),
            description: repo
                .description
                .clone()
                .unwrap_or_else(|| "No description provided.".to_string()),
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            watchers: count_or_na(repo.watchers_count),
            open_issues: count_or_na(repo.open_issues_count),
            language: repo.language.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            last_updated: repo
                .updated_at
                .map(|at| at.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            url: repo.html_url.clone(),
        }
    }
}

/// Colors for light and dark rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub error: Color,
    pub favorite: Color,
}

impl Palette {
    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self {
                text: Color::BrightWhite,
                muted: Color::BrightBlack,
                accent: Color::BrightCyan,
                error: Color::BrightRed,
                favorite: Color::BrightMagenta,
            }
        } else {
            Self {
                text: Color::Black,
                muted: Color::BrightBlack,
                accent: Color::Blue,
                error: Color::Red,
                favorite: Color::Magenta,
            }
        }
    }
}
