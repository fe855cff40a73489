use anyhow::Context;
use clap::Parser;
use colored::*;
use github_repo_explorer::cli::Cli;
use github_repo_explorer::connectivity::{ConnectivityGate, ConnectivityProbe, StaticProbe};
use github_repo_explorer::github::GitHubClient;
use github_repo_explorer::search::SearchController;
use github_repo_explorer::session::SessionState;
use github_repo_explorer::shell::{Shell, HELP_TEXT};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

async fn run_shell<P>(cli: &Cli, probe: P) -> anyhow::Result<()>
where
    P: ConnectivityProbe + 'static,
{
    let client = GitHubClient::new(cli.client_config()).context("Failed to create GitHub client")?;
    info!(base_url = %client.base_url(), "GitHub client ready");

    let session = Arc::new(SessionState::new());
    let controller = Arc::new(SearchController::new(ConnectivityGate::new(probe), client));
    let shell = Shell::new(session, controller);

    let renderer = shell.spawn_renderer();
    let result = shell.run(BufReader::new(tokio::io::stdin())).await;
    renderer.abort();
    result.context("Shell input failed")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&cli.log_level))
        )
        .init();

    let splash = cli.splash_duration();
    if !splash.is_zero() {
        println!("\n{}\n", "  GitHub Explorer".bold().green());
        tokio::time::sleep(splash).await;
    }

    println!("{}", HELP_TEXT.dimmed());

    if cli.offline {
        println!("{}", "Running in offline mode".yellow());
        run_shell(&cli, StaticProbe(false)).await?;
    } else {
        run_shell(&cli, cli.tcp_probe()).await?;
    }

    println!("{}", "Bye".dimmed());
    Ok(())
}
