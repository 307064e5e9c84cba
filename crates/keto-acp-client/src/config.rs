//! Client configuration and builder

use std::sync::Arc;

use keto_acp_types::{Error, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::client::AcpClient;
use crate::transport::{BreakerTransport, Transport, TransportConfig};

/// Stock serve port of a locally running engine
const DEFAULT_BASE_URL: &str = "http://localhost:4466";

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the engine: scheme, host, and optional path prefix.
    /// A missing scheme defaults to `http`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Circuit breaker and timeout settings for the default transport
    #[serde(default)]
    pub transport: TransportConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: default_base_url(), transport: TransportConfig::default() }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Builder for [`AcpClient`]
///
/// # Example
///
/// ```rust,no_run
/// use keto_acp_client::AcpClient;
///
/// let client = AcpClient::builder()
///     .url("http://keto.internal:4466")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    transport_config: TransportConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the engine base URL (scheme, host, and optional path prefix)
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Tune the default transport's circuit breaker and timeouts
    ///
    /// Ignored when a custom transport is supplied via [`Self::transport`].
    pub fn transport_config(mut self, config: TransportConfig) -> Self {
        self.transport_config = config;
        self
    }

    /// Replace the default transport with a custom implementation
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Create a [`ClientBuilder`] from a [`ClientConfig`]
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            base_url: Some(config.base_url),
            transport_config: config.transport,
            transport: None,
        }
    }

    /// Validate the configuration and construct the client
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the base URL does not parse or the default
    /// transport cannot be built.
    pub fn build(self) -> Result<AcpClient> {
        let raw = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = normalize_base_url(&raw)?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(BreakerTransport::new(&self.transport_config)?),
        };

        Ok(AcpClient::from_parts(base_url, transport))
    }
}

/// Validate and normalize a base URL: default the scheme to `http` when
/// absent and trim any trailing slash so path concatenation stays uniform.
fn normalize_base_url(raw: &str) -> Result<String> {
    let candidate =
        if raw.contains("://") { raw.to_string() } else { format!("http://{}", raw) };

    let url = Url::parse(&candidate)
        .map_err(|e| Error::Config(format!("invalid base URL {:?}: {}", raw, e)))?;

    if !url.has_host() {
        return Err(Error::Config(format!("base URL {:?} has no host", raw)));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}
