pub mod cli;
pub mod connectivity;
pub mod error;
pub mod github;
pub mod models;
pub mod search;
pub mod session;
pub mod shell;
pub mod types;
pub mod views;

pub use connectivity::{ConnectivityGate, ConnectivityProbe, StaticProbe, TcpProbe};
pub use error::{ExplorerError, Result};
pub use github::{ClientConfig, GitHubClient, SearchBackend};
pub use search::{SearchController, SearchOutcome};
pub use session::SessionState;
