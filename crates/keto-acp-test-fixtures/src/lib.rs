//! Test fixtures and utilities for Keto ACP client integration tests.
//!
//! This crate provides shared test helpers to eliminate duplication across
//! integration tests: sample entities with recognizable contents, their JSON
//! wire documents, and an in-process [`FakeTransport`] that plugs into the
//! client's transport seam.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use keto_acp_client::AcpClient;
//! use keto_acp_test_fixtures::FakeTransport;
//!
//! let transport = Arc::new(FakeTransport::new());
//! transport.push_response(200, "[]");
//!
//! let client = AcpClient::builder()
//!     .url("http://keto.test")
//!     .transport(transport.clone())
//!     .build()
//!     .unwrap();
//! // Drive the client, then assert on transport.requests()...
//! ```

use std::collections::VecDeque;

use async_trait::async_trait;
use keto_acp_client::transport::{Method, Transport, TransportResponse};
use keto_acp_types::{Effect, Error, Policy, Result, Role};
use parking_lot::Mutex;
use serde_json::{json, Value};

/// Build a policy with recognizable contents for assertions
pub fn sample_policy(id: &str) -> Policy {
    Policy {
        id: id.to_string(),
        description: "Delete action for Snake Eyes".to_string(),
        subjects: vec!["user:snake-eyes".to_string()],
        resources: vec!["blog1:post:33".to_string()],
        actions: vec!["delete".to_string()],
        effect: Effect::Allow,
        conditions: Some(json!({"test": "value"})),
    }
}

/// JSON document the engine would return for [`sample_policy`]
pub fn policy_json(id: &str) -> Value {
    json!({
        "id": id,
        "description": "Delete action for Snake Eyes",
        "subjects": ["user:snake-eyes"],
        "resources": ["blog1:post:33"],
        "actions": ["delete"],
        "effect": "allow",
        "conditions": {"test": "value"},
    })
}

/// Build a role with recognizable contents for assertions
pub fn sample_role(id: &str) -> Role {
    Role {
        id: id.to_string(),
        members: vec!["user:snake-eyes".to_string(), "user:scarlet".to_string()],
    }
}

/// JSON document the engine would return for [`sample_role`]
pub fn role_json(id: &str) -> Value {
    json!({
        "id": id,
        "members": ["user:snake-eyes", "user:scarlet"],
    })
}

/// A request observed by [`FakeTransport`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Vec<u8>>,
}

impl RecordedRequest {
    /// Decode the recorded body as JSON
    pub fn body_json(&self) -> Option<Value> {
        self.body.as_deref().and_then(|body| serde_json::from_slice(body).ok())
    }
}

/// In-process transport replaying canned responses in FIFO order while
/// recording every request it sees.
///
/// Calling [`Transport::send`] with an empty response queue returns
/// `Error::Transport`, which doubles as a stand-in for network failure.
#[derive(Debug, Default)]
pub struct FakeTransport {
    responses: Mutex<VecDeque<TransportResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a canned response
    pub fn push_response(&self, status: u16, body: impl Into<Vec<u8>>) {
        self.responses
            .lock()
            .push_back(TransportResponse { status, body: body.into() });
    }

    /// All requests observed so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<TransportResponse> {
        self.requests
            .lock()
            .push(RecordedRequest { method, url: url.to_string(), body });

        self.responses
            .lock()
            .pop_front()
            .ok_or_else(|| Error::Transport("no canned response queued".to_string()))
    }
}
