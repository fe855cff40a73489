use crate::connectivity::TcpProbe;
use crate::github::{ClientConfig, API_BASE_URL};
use crate::views::SPLASH_DURATION;
use clap::Parser;
use std::time::Duration;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "repo-explorer")]
#[command(about = "GitHub Repository Explorer - Search repositories and keep session favorites from the terminal")]
#[command(version)]
pub struct Cli {
    /// GitHub API base URL
    #[arg(long, env = "EXPLORER_API_URL", default_value = API_BASE_URL)]
    pub api_url: String,

    /// HTTP request timeout in seconds
    #[arg(long, env = "EXPLORER_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Host used to check network reachability [default: host of --api-url]
    #[arg(long, env = "EXPLORER_PROBE_HOST")]
    pub probe_host: Option<String>,

    /// Port used to check network reachability [default: port of --api-url]
    #[arg(long, env = "EXPLORER_PROBE_PORT")]
    pub probe_port: Option<u16>,

    /// Reachability check timeout in milliseconds
    #[arg(long, env = "EXPLORER_PROBE_TIMEOUT_MS", default_value_t = 3000)]
    pub probe_timeout_ms: u64,

    /// Treat the network as unreachable
    #[arg(long)]
    pub offline: bool,

    /// How long to show the splash banner, 0 to skip
    #[arg(long, env = "EXPLORER_SPLASH_MS", default_value_t = SPLASH_DURATION.as_millis() as u64)]
    pub splash_ms: u64,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "EXPLORER_LOG", default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            ..Default::default()
        }
    }

    /// Reachability is checked against the API host unless overridden, so a
    /// self-hosted or local endpoint is not reported offline.
    pub fn tcp_probe(&self) -> TcpProbe {
        let fallback = TcpProbe::default();
        let api = Url::parse(&self.api_url).ok();
        let api_host = api.as_ref().and_then(|u| u.host_str().map(str::to_string));
        let api_port = api.as_ref().and_then(Url::port_or_known_default);

        TcpProbe {
            host: self
                .probe_host
                .clone()
                .or(api_host)
                .unwrap_or(fallback.host),
            port: self.probe_port.or(api_port).unwrap_or(fallback.port),
            timeout: Duration::from_millis(self.probe_timeout_ms),
        }
    }

    pub fn splash_duration(&self) -> Duration {
        Duration::from_millis(self.splash_ms)
    }
}
