use crate::connectivity::{ConnectivityGate, ConnectivityProbe};
use crate::error::{ExplorerError, Result};
use crate::github::SearchBackend;
use crate::models::{SearchPhase, SearchSession};
use crate::types::Repository;
use tokio::sync::watch;
use tracing::{debug, info, warn};

pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// What happened to a single `search` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The response became the visible state
    Applied,
    /// A newer request was issued meanwhile; the response was dropped
    Stale,
    /// The query was blank, state went back to idle without a request
    Cleared,
}

/// Turn an error into the text shown under the search box. Errors whose own
/// detail is blank get the generic message instead of a dangling prefix.
pub fn error_message(error: &ExplorerError) -> String {
    let detail = match error {
        ExplorerError::Io(e) => e.to_string(),
        ExplorerError::InvalidQuery(detail)
        | ExplorerError::UnknownCommand(detail)
        | ExplorerError::Config(detail) => detail.clone(),
        _ => return error.to_string(),
    };
    if detail.trim().is_empty() {
        GENERIC_ERROR_MESSAGE.to_string()
    } else {
        error.to_string()
    }
}

/// Drives the search box: connectivity check, remote call, result state.
///
/// Every non-blank query gets a new generation; only the outcome carrying the
/// current generation is applied, so a slow response to an older query can
/// never overwrite a newer one.
pub struct SearchController<P, B> {
    gate: ConnectivityGate<P>,
    backend: B,
    state: watch::Sender<SearchSession>,
}

impl<P, B> SearchController<P, B>
where
    P: ConnectivityProbe,
    B: SearchBackend,
{
    pub fn new(gate: ConnectivityGate<P>, backend: B) -> Self {
        let (state, _) = watch::channel(SearchSession::default());
        Self { gate, backend, state }
    }

    pub fn gate(&self) -> &ConnectivityGate<P> {
        &self.gate
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn snapshot(&self) -> SearchSession {
        self.state.borrow().clone()
    }

    pub fn phase(&self) -> SearchPhase {
        self.state.borrow().phase
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchSession> {
        self.state.subscribe()
    }

    /// Handle new search box text.
    pub async fn search(&self, text: &str) -> SearchOutcome {
        let query = text.trim().to_string();

        let mut ticket = 0;
        self.state.send_modify(|session| {
            session.query = text.to_string();
            session.generation += 1;
            ticket = session.generation;
            session.error = None;
            if query.is_empty() {
                session.phase = SearchPhase::Idle;
                session.results.clear();
            } else {
                session.phase = SearchPhase::Loading;
            }
        });

        if query.is_empty() {
            debug!("Blank query, search cleared");
            return SearchOutcome::Cleared;
        }

        let outcome = if self.gate.check_connectivity().await {
            self.backend.search(&query).await
        } else {
            Err(ExplorerError::Connectivity)
        };

        self.apply(ticket, &query, outcome)
    }

    /// Reset query, results and error together.
    pub fn clear(&self) {
        self.state.send_modify(|session| {
            session.query.clear();
            session.generation += 1;
            session.phase = SearchPhase::Idle;
            session.error = None;
            session.results.clear();
        });
        debug!("Search cleared");
    }

    fn apply(&self, ticket: u64, query: &str, outcome: Result<Vec<Repository>>) -> SearchOutcome {
        let applied = self.state.send_if_modified(|session| {
            if session.generation != ticket {
                return false;
            }
            match &outcome {
                Ok(items) => {
                    session.phase = SearchPhase::Success;
                    session.error = None;
                    session.results = items.clone();
                }
                Err(e) => {
                    session.phase = SearchPhase::Failed;
                    session.error = Some(error_message(e));
                    session.results.clear();
                }
            }
            true
        });

        if !applied {
            debug!(query, ticket, "Discarding stale search response");
            return SearchOutcome::Stale;
        }

        match outcome {
            Ok(items) => info!(query, results = items.len(), "Search succeeded"),
            Err(e) => warn!(query, "Search failed: {}", e),
        }
        SearchOutcome::Applied
    }
}
