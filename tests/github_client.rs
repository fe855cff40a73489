mod common;

use common::spawn_search_api;
use github_repo_explorer::error::ExplorerError;
use github_repo_explorer::github::{ClientConfig, GitHubClient};
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

fn client_for(base_url: String) -> GitHubClient {
    GitHubClient::new(ClientConfig {
        base_url,
        timeout: Duration::from_secs(5),
        ..Default::default()
    })
    .expect("Failed to create client")
}

#[tokio::test]
async fn test_github_client_creation() {
    let client = GitHubClient::new(ClientConfig::default());
    assert_ok!(client);
}

#[tokio::test]
async fn test_search_returns_items_in_server_order() {
    let client = client_for(spawn_search_api().await);

    let repos = client.search_repositories("react").await.expect("Search failed");

    assert_eq!(repos.len(), 2);
    assert_eq!(repos[0].id, 1);
    assert_eq!(repos[0].name, "react");
    assert_eq!(repos[1].id, 2);
    assert_eq!(repos[0].owner.login, "octocat");
    assert_eq!(repos[0].description, None);
    assert_eq!(repos[0].watchers_count, Some(1500));
}

#[tokio::test]
async fn test_query_is_trimmed_and_encoded() {
    let client = client_for(spawn_search_api().await);

    // The fake API echoes the decoded query back as the first repository name
    let repos = client.search_repositories("  tokio rs&lang=c++ ").await.expect("Search failed");
    assert_eq!(repos[0].name, "tokio rs&lang=c++");
}

#[tokio::test]
async fn test_missing_items_is_empty_result() {
    let client = client_for(spawn_search_api().await);

    let repos = client.search_repositories("none").await.expect("Search failed");
    assert!(repos.is_empty());
}

#[tokio::test]
async fn test_non_success_status_is_remote_error() {
    let client = client_for(spawn_search_api().await);

    let result = client.search_repositories("forbidden").await;

    match result.unwrap_err() {
        ExplorerError::Remote { status, status_text } => {
            assert_eq!(status, 403);
            assert_eq!(status_text, "Forbidden");
        }
        other => panic!("Expected Remote error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_status_has_empty_reason() {
    let client = client_for(spawn_search_api().await);

    match client.search_repositories("unlisted").await.unwrap_err() {
        error @ ExplorerError::Remote { status: 599, .. } => {
            assert_eq!(error.to_string(), "GitHub API Error: 599");
        }
        other => panic!("Expected Remote error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_payload_is_parse_error() {
    let client = client_for(spawn_search_api().await);

    let result = client.search_repositories("broken").await;

    assert!(matches!(result, Err(ExplorerError::Parse(_))));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Bind then drop to get a port nobody listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(format!("http://{}", addr));
    let result = client.search_repositories("react").await;

    assert!(matches!(result, Err(ExplorerError::Network(_))));
}

#[tokio::test]
async fn test_empty_query_sends_nothing() {
    let client = client_for("http://127.0.0.1:9".to_string());

    let result = client.search_repositories("   ").await;

    assert_err!(&result);
    assert!(matches!(result, Err(ExplorerError::InvalidQuery(_))));
}

#[tokio::test]
#[ignore = "Requires network access to api.github.com"]
async fn test_live_search() {
    let client = GitHubClient::new(ClientConfig::default()).expect("Failed to create client");

    let repos = client.search_repositories("rust-lang").await.expect("Live search failed");

    assert!(!repos.is_empty());
    for repo in &repos {
        assert!(repo.id > 0);
        assert!(!repo.html_url.is_empty());
    }
}
