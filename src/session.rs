use crate::models::SessionSnapshot;
use crate::types::Repository;
use tokio::sync::watch;
use tracing::debug;

/// Favorites and dark mode for the lifetime of the process.
///
/// Consumers hold a reference (or an `Arc`) and call [`SessionState::subscribe`]
/// to be woken whenever either piece of state changes.
#[derive(Debug)]
pub struct SessionState {
    state: watch::Sender<SessionSnapshot>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        let (state, _) = watch::channel(SessionSnapshot::default());
        Self { state }
    }

    /// Insert `repo` if no favorite shares its id, otherwise remove it.
    /// Returns whether the repository is a favorite afterwards.
    pub fn toggle_favorite(&self, repo: &Repository) -> bool {
        let mut now_favorite = false;
        self.state.send_modify(|session| {
            if let Some(pos) = session.favorites.iter().position(|fav| fav.id == repo.id) {
                session.favorites.remove(pos);
            } else {
                session.favorites.push(repo.clone());
                now_favorite = true;
            }
        });
        debug!(repo_id = repo.id, name = %repo.name, now_favorite, "Toggled favorite");
        now_favorite
    }

    /// Flip the dark-mode flag and return the new value.
    pub fn toggle_dark_mode(&self) -> bool {
        let mut dark_mode = false;
        self.state.send_modify(|session| {
            session.dark_mode = !session.dark_mode;
            dark_mode = session.dark_mode;
        });
        debug!(dark_mode, "Toggled dark mode");
        dark_mode
    }

    pub fn is_favorite(&self, id: u64) -> bool {
        self.state.borrow().is_favorite(id)
    }

    pub fn favorites(&self) -> Vec<Repository> {
        self.state.borrow().favorites.clone()
    }

    pub fn is_dark_mode(&self) -> bool {
        self.state.borrow().dark_mode
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    /// End of session: back to an empty favorite set and light mode.
    pub fn reset(&self) {
        self.state.send_replace(SessionSnapshot::default());
    }
}
