//! Network connectivity checks
//!
//! A search is refused up front when the machine is offline, so the user
//! sees a clear message instead of a provider timeout.

use crate::config::Config;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;

/// Answers whether the AI service is likely reachable
#[async_trait]
pub trait Connectivity: Send + Sync {
    async fn is_online(&self) -> bool;
}

/// Always reports online
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOnline;

#[async_trait]
impl Connectivity for AlwaysOnline {
    async fn is_online(&self) -> bool {
        true
    }
}

/// Always reports offline
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOffline;

#[async_trait]
impl Connectivity for AlwaysOffline {
    async fn is_online(&self) -> bool {
        false
    }
}

/// Opens a TCP connection to the provider endpoint
#[derive(Debug, Clone)]
pub struct TcpProbe {
    target: String,
    timeout: Duration,
}

impl TcpProbe {
    /// Probe `target` ("host:port") with the given connect timeout
    pub fn new(target: impl Into<String>, timeout: Duration) -> Self {
        Self {
            target: target.into(),
            timeout,
        }
    }

    /// Build a probe for the host and port of an HTTP(S) URL
    pub fn for_url(url: &str, timeout: Duration) -> Option<Self> {
        let parsed = url::Url::parse(url).ok()?;
        let host = parsed.host_str()?;
        let port = parsed.port_or_known_default()?;
        Some(Self::new(format!("{}:{}", host, port), timeout))
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

#[async_trait]
impl Connectivity for TcpProbe {
    async fn is_online(&self) -> bool {
        match tokio::time::timeout(self.timeout, TcpStream::connect(&self.target)).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                tracing::debug!(addr = %self.target, "Connectivity probe failed: {}", e);
                false
            }
            Err(_) => {
                tracing::debug!(addr = %self.target, "Connectivity probe timed out");
                false
            }
        }
    }
}

/// Pick the connectivity check for a configuration
///
/// `network.offline` forces offline. The fake provider and
/// `network.skip_probe` skip probing. Otherwise the provider endpoint is
/// probed.
pub fn connectivity_from_config(config: &Config) -> Arc<dyn Connectivity> {
    if config.network.offline {
        return Arc::new(AlwaysOffline);
    }
    if config.network.skip_probe || config.provider.provider_type == "fake" {
        return Arc::new(AlwaysOnline);
    }

    let endpoint = match config.provider.provider_type.as_str() {
        "ollama" => &config.provider.ollama.host,
        _ => &config.provider.gemini.api_base,
    };
    let timeout = Duration::from_millis(config.network.probe_timeout_ms);

    match TcpProbe::for_url(endpoint, timeout) {
        Some(probe) => Arc::new(probe),
        None => {
            tracing::warn!("Cannot derive a probe target from {}; skipping probe", endpoint);
            Arc::new(AlwaysOnline)
        }
    }
}
