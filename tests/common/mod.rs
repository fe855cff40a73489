#![allow(dead_code)]

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use github_repo_explorer::connectivity::ConnectivityProbe;
use github_repo_explorer::error::{ExplorerError, Result};
use github_repo_explorer::github::SearchBackend;
use github_repo_explorer::types::{Repository, RepositoryOwner, SearchResponse};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub fn repository(id: u64, name: &str) -> Repository {
    Repository {
        id,
        name: name.to_string(),
        owner: RepositoryOwner {
            login: "octocat".to_string(),
            avatar_url: format!("https://avatars.githubusercontent.com/u/{}", id),
        },
        description: Some(format!("{} description", name)),
        stargazers_count: id * 10,
        forks_count: id,
        language: Some("Rust".to_string()),
        html_url: format!("https://github.com/octocat/{}", name),
        watchers_count: Some(id * 10),
        open_issues_count: Some(1),
        updated_at: None,
    }
}

/// A repository object shaped like the GitHub search API returns it
pub fn repository_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "node_id": format!("MDEwOlJlcG9zaXRvcnk{}", id),
        "name": name,
        "full_name": format!("octocat/{}", name),
        "private": false,
        "owner": {
            "login": "octocat",
            "id": 583231,
            "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
            "type": "User"
        },
        "html_url": format!("https://github.com/octocat/{}", name),
        "description": null,
        "stargazers_count": 1500,
        "watchers_count": 1500,
        "forks_count": 320,
        "open_issues_count": 12,
        "language": "JavaScript",
        "updated_at": "2024-05-01T12:30:00Z",
        "score": 1.0
    })
}

#[derive(Debug, Clone)]
pub enum Script {
    Items(Vec<Repository>),
    Remote(u16, &'static str),
    Malformed,
}

/// Backend that answers from a fixed script and records every call
#[derive(Default)]
pub struct ScriptedBackend {
    responses: HashMap<String, (Duration, Script)>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, query: &str, script: Script) -> Self {
        self.responses.insert(query.to_string(), (Duration::ZERO, script));
        self
    }

    pub fn respond_after(mut self, query: &str, delay: Duration, script: Script) -> Self {
        self.responses.insert(query.to_string(), (delay, script));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl SearchBackend for ScriptedBackend {
    async fn search(&self, query: &str) -> Result<Vec<Repository>> {
        self.calls.lock().unwrap().push(query.to_string());

        let (delay, script) = self
            .responses
            .get(query)
            .cloned()
            .unwrap_or((Duration::ZERO, Script::Items(Vec::new())));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match script {
            Script::Items(items) => Ok(items),
            Script::Remote(status, text) => Err(ExplorerError::Remote {
                status,
                status_text: text.to_string(),
            }),
            Script::Malformed => {
                let parsed: SearchResponse = serde_json::from_str("<html>oops</html>")?;
                Ok(parsed.into_items())
            }
        }
    }
}

/// Probe with a fixed answer that counts how often it was asked
pub struct CountingProbe {
    connected: Option<bool>,
    checks: AtomicUsize,
}

impl CountingProbe {
    pub fn connected() -> Self {
        Self { connected: Some(true), checks: AtomicUsize::new(0) }
    }

    pub fn disconnected() -> Self {
        Self { connected: Some(false), checks: AtomicUsize::new(0) }
    }

    /// A probe whose platform query itself fails
    pub fn failing() -> Self {
        Self { connected: None, checks: AtomicUsize::new(0) }
    }

    pub fn checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }
}

impl ConnectivityProbe for CountingProbe {
    async fn is_connected(&self) -> Result<bool> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        self.connected.ok_or_else(|| {
            ExplorerError::Io(std::io::Error::new(std::io::ErrorKind::Other, "reachability unavailable"))
        })
    }
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Test server failed");
    });
    format!("http://{}", addr)
}

/// Fake search endpoint. The query decides the response:
/// `forbidden` → 403, `broken` → malformed body, `none` → no `items` key,
/// anything else → two repositories, the first named after the query.
pub async fn spawn_search_api() -> String {
    async fn search(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
        let q = params.get("q").cloned().unwrap_or_default();
        match q.as_str() {
            "forbidden" => (
                StatusCode::FORBIDDEN,
                Json(json!({ "message": "API rate limit exceeded" })),
            )
                .into_response(),
            "unlisted" => StatusCode::from_u16(599).unwrap().into_response(),
            "broken" => (StatusCode::OK, "{\"items\": [ {\"id\": ").into_response(),
            "none" => Json(json!({ "total_count": 0, "incomplete_results": false })).into_response(),
            _ => Json(json!({
                "total_count": 2,
                "incomplete_results": false,
                "items": [repository_json(1, &q), repository_json(2, "second")]
            }))
            .into_response(),
        }
    }

    spawn_server(Router::new().route("/search/repositories", get(search))).await
}
