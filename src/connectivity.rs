use crate::error::{ExplorerError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Platform reachability check.
pub trait ConnectivityProbe: Send + Sync {
    fn is_connected(&self) -> impl Future<Output = Result<bool>> + Send;
}

/// Considers the network reachable when a TCP connection to `host:port`
/// opens within `timeout`.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self {
            host: "api.github.com".to_string(),
            port: 443,
            timeout: Duration::from_secs(3),
        }
    }
}

impl ConnectivityProbe for TcpProbe {
    async fn is_connected(&self) -> Result<bool> {
        let addr = format!("{}:{}", self.host, self.port);
        match timeout(self.timeout, TcpStream::connect(&addr)).await {
            Ok(Ok(_stream)) => Ok(true),
            Ok(Err(e)) => {
                debug!(%addr, error = %e, "Connectivity probe could not connect");
                Ok(false)
            }
            Err(_) => Err(ExplorerError::Io(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                format!("connectivity probe to {} timed out", addr),
            ))),
        }
    }
}

/// Fixed answer, used for `--offline` runs and tests.
#[derive(Debug, Clone, Copy)]
pub struct StaticProbe(pub bool);

impl ConnectivityProbe for StaticProbe {
    async fn is_connected(&self) -> Result<bool> {
        Ok(self.0)
    }
}

/// Wraps a probe and fails safe: a probe error counts as disconnected.
pub struct ConnectivityGate<P> {
    probe: P,
}

impl<P: ConnectivityProbe> ConnectivityGate<P> {
    pub fn new(probe: P) -> Self {
        Self { probe }
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    pub async fn check_connectivity(&self) -> bool {
        match self.probe.is_connected().await {
            Ok(connected) => connected,
            Err(e) => {
                warn!("Connectivity check failed, assuming offline: {}", e);
                false
            }
        }
    }
}
