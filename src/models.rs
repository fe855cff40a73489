use crate::types::Repository;
use serde::{Deserialize, Serialize};

/// Lifecycle of the search box
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

/// State of the search screen, owned by the search controller
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchSession {
    /// Raw text as typed, before trimming
    pub query: String,
    pub phase: SearchPhase,
    pub error: Option<String>,
    pub results: Vec<Repository>,
    /// Tag of the most recently issued request
    pub generation: u64,
}

impl SearchSession {
    pub fn is_loading(&self) -> bool {
        self.phase == SearchPhase::Loading
    }

    pub fn trimmed_query(&self) -> &str {
        self.query.trim()
    }
}

/// Session-wide UI state: favorites and the dark-mode flag
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionSnapshot {
    /// Insertion order, unique by id
    pub favorites: Vec<Repository>,
    pub dark_mode: bool,
}

impl SessionSnapshot {
    pub fn is_favorite(&self, id: u64) -> bool {
        self.favorites.iter().any(|fav| fav.id == id)
    }
}
