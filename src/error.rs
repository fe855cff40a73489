use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("No internet connection. Please check your network.")]
    Connectivity,

    #[error("GitHub API Error: {}", status_line(.status, .status_text))]
    Remote { status: u16, status_text: String },

    #[error("Failed to parse search response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid search query: {0}")]
    InvalidQuery(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// `"{status} {reason}"`, or just the status when the server sent no reason.
fn status_line(status: &u16, status_text: &str) -> String {
    match status_text.trim() {
        "" => status.to_string(),
        reason => format!("{} {}", status, reason),
    }
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
