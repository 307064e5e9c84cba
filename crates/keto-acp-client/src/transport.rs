//! Pluggable HTTP transport with circuit breaker
//!
//! The client issues every request through the [`Transport`] trait so tests
//! can substitute an in-process fake. The default implementation,
//! [`BreakerTransport`], wraps a `reqwest` client with a consecutive-failure
//! circuit breaker: after the configured threshold the circuit opens and
//! requests fast-fail until the recovery timeout elapses, at which point a
//! single probe request is allowed through.

use std::{
    fmt,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use keto_acp_types::{Error, Result};
use parking_lot::RwLock;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// HTTP method of a transport request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw response handed back by a transport
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Trait for transport implementations
///
/// A transport delivers a single request and returns the raw status and body.
/// It owns all resilience concerns (timeouts, circuit breaking); the client
/// performs no retries of its own.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Deliver one request
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method
    /// * `url` - Absolute request URL
    /// * `body` - JSON body bytes, if the request carries one
    ///
    /// # Errors
    ///
    /// Returns `Error::Transport` on connection failure, timeout, or when the
    /// circuit is open. An HTTP response is never an error at this layer.
    async fn send(&self, method: Method, url: &str, body: Option<Vec<u8>>)
        -> Result<TransportResponse>;
}

/// Circuit breaker and timeout configuration for the default transport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Consecutive failures before the circuit opens
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,

    /// How long an open circuit fast-fails before allowing a probe (in seconds)
    #[serde(default = "default_recovery_timeout")]
    pub recovery_timeout_secs: u64,

    /// Per-request timeout (in milliseconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            failure_threshold: default_failure_threshold(),
            recovery_timeout_secs: default_recovery_timeout(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

fn default_failure_threshold() -> u32 {
    5
}

fn default_recovery_timeout() -> u64 {
    30
}

fn default_request_timeout() -> u64 {
    10_000
}

/// Circuit breaker state
#[derive(Debug, Clone)]
enum CircuitState {
    Closed,
    Open { since: Instant },
}

#[derive(Debug)]
struct BreakerState {
    failures: u32,
    circuit: CircuitState,
}

impl BreakerState {
    fn new() -> Self {
        Self { failures: 0, circuit: CircuitState::Closed }
    }

    /// Whether a request may go out (closed circuit, or open past the
    /// recovery window, which admits a half-open probe)
    fn is_available(&self, recovery_timeout: Duration) -> bool {
        match &self.circuit {
            CircuitState::Closed => true,
            CircuitState::Open { since } => since.elapsed() >= recovery_timeout,
        }
    }

    fn record_success(&mut self) {
        self.failures = 0;
        self.circuit = CircuitState::Closed;
    }

    /// Record a failed request, returns true if the circuit is now open
    fn record_failure(&mut self, threshold: u32) -> bool {
        self.failures += 1;
        if self.failures >= threshold {
            self.circuit = CircuitState::Open { since: Instant::now() };
            return true;
        }
        false
    }
}

/// Default transport: `reqwest` with a circuit breaker
///
/// Network errors, timeouts, and HTTP responses with status >= 500 count
/// toward the failure threshold. A 5xx response is still returned to the
/// caller so the structured error body can be decoded; only the breaker
/// accounting treats it as a failure.
#[derive(Debug)]
pub struct BreakerTransport {
    http_client: HttpClient,
    state: RwLock<BreakerState>,
    failure_threshold: u32,
    recovery_timeout: Duration,
}

impl BreakerTransport {
    /// Create a transport from the given configuration
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the underlying HTTP client cannot be built.
    pub fn new(config: &TransportConfig) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            state: RwLock::new(BreakerState::new()),
            failure_threshold: config.failure_threshold,
            recovery_timeout: Duration::from_secs(config.recovery_timeout_secs),
        })
    }

    fn record_success(&self) {
        let mut state = self.state.write();
        state.record_success();
    }

    fn record_failure(&self, url: &str) {
        let mut state = self.state.write();
        if state.record_failure(self.failure_threshold) {
            warn!(
                endpoint = %url,
                failures = state.failures,
                "Circuit breaker opened for endpoint"
            );
        }
    }
}

#[async_trait]
impl Transport for BreakerTransport {
    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<TransportResponse> {
        if !self.state.read().is_available(self.recovery_timeout) {
            return Err(Error::Transport(format!("circuit breaker open for {}", url)));
        }

        debug!(method = %method, url = %url, "Dispatching request");

        let mut request = match method {
            Method::Get => self.http_client.get(url),
            Method::Post => self.http_client.post(url),
            Method::Put => self.http_client.put(url),
            Method::Delete => self.http_client.delete(url),
        };

        if let Some(body) = body {
            request = request.header("Content-Type", "application/json").body(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                self.record_failure(url);
                return Err(Error::Transport(format!("HTTP request failed: {}", e)));
            },
        };

        let status = response.status().as_u16();
        let body = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => {
                self.record_failure(url);
                return Err(Error::Transport(format!("failed to read response body: {}", e)));
            },
        };

        if status >= 500 {
            self.record_failure(url);
        } else {
            self.record_success();
        }

        Ok(TransportResponse { status, body })
    }
}
