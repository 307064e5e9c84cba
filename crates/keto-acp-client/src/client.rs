//! HTTP client for the ACP engine's REST API
//!
//! Every operation is a single request/response exchange: build the URL from
//! the configured base and flavor, hand the request to the transport, then
//! resolve the status code through an exhaustive match into a typed result.
//! The client keeps no per-call state and performs no retries; resilience
//! lives in the transport.

use std::fmt::Write as _;
use std::sync::Arc;

use keto_acp_types::{
    AddMembersRequest, AllowedRequest, Error, Flavor, HealthStatus, Policy, Result, Role,
    ServiceError, VersionInfo,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientBuilder;
use crate::transport::{Method, Transport, TransportResponse};

/// Client for the ACP engine's REST API
///
/// Holds the engine base URL and a shared transport handle. Cloning is cheap
/// and clones share the transport (and therefore its circuit breaker).
///
/// # Example
///
/// ```rust,no_run
/// use keto_acp_client::AcpClient;
/// use keto_acp_types::{AllowedRequest, Flavor};
///
/// # async fn run() -> keto_acp_types::Result<()> {
/// let client = AcpClient::new("http://localhost:4466")?;
/// let allowed = client
///     .check_allowed(
///         Flavor::Exact,
///         &AllowedRequest {
///             subject: "user:snake-eyes".into(),
///             action: "delete".into(),
///             resource: "blog1:post:33".into(),
///             context: None,
///         },
///     )
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AcpClient {
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl AcpClient {
    /// Create a client for the given base URL with the default transport
    pub fn new(url: impl Into<String>) -> Result<Self> {
        ClientBuilder::new().url(url).build()
    }

    /// Start building a client with custom configuration
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub(crate) fn from_parts(base_url: String, transport: Arc<dyn Transport>) -> Self {
        Self { base_url, transport }
    }

    /// The normalized base URL this client targets
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Policy Operations
    // ========================================================================

    /// Check if a request is allowed.
    ///
    /// The decision is carried entirely by the HTTP status: 200 maps to
    /// `true` and 403 to `false`; neither is an error.
    ///
    /// See Also <https://www.ory.sh/docs/keto/sdk/api#check-if-a-request-is-allowed>
    pub async fn check_allowed(&self, flavor: Flavor, request: &AllowedRequest) -> Result<bool> {
        let url = self.acp_url(flavor, "/allowed");
        let response = self.send_json(Method::Post, &url, request).await?;

        match response.status {
            200 => Ok(true),
            403 => Ok(false),
            500 => Err(service_error(&response)),
            _ => Err(unexpected(&response)),
        }
    }

    /// Update or insert an access control policy.
    ///
    /// Returns the canonical stored policy as the server echoes it back.
    ///
    /// See Also <https://www.ory.sh/docs/keto/sdk/api#upsertoryaccesscontrolpolicy>
    pub async fn upsert_policy(&self, flavor: Flavor, policy: &Policy) -> Result<Policy> {
        let url = self.acp_url(flavor, "/policies");
        let response = self.send_json(Method::Put, &url, policy).await?;

        match response.status {
            200 => decode(&response),
            500 => Err(service_error(&response)),
            _ => Err(unexpected(&response)),
        }
    }

    /// List access control policies.
    ///
    /// `limit` and `offset` are forwarded only when strictly positive; the
    /// pagination window and result ordering are server-defined.
    pub async fn list_policies(
        &self,
        flavor: Flavor,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Policy>> {
        let url = format!("{}{}", self.acp_url(flavor, "/policies"), list_query(limit, offset));
        let response = self.send(Method::Get, &url).await?;

        match response.status {
            200 => decode(&response),
            500 => Err(service_error(&response)),
            _ => Err(unexpected(&response)),
        }
    }

    /// Fetch a single policy by identifier
    pub async fn get_policy(&self, flavor: Flavor, id: &str) -> Result<Policy> {
        let url = self.acp_url(flavor, &format!("/policies/{}", id));
        let response = self.send(Method::Get, &url).await?;

        match response.status {
            200 => decode(&response),
            404 => Err(Error::NotFound),
            500 => Err(service_error(&response)),
            _ => Err(unexpected(&response)),
        }
    }

    /// Delete a policy by identifier.
    ///
    /// Deleting a policy that does not exist is a success; the operation is
    /// idempotent on the server side. Older engine builds answer 200 instead
    /// of 204.
    pub async fn delete_policy(&self, flavor: Flavor, id: &str) -> Result<()> {
        let url = self.acp_url(flavor, &format!("/policies/{}", id));
        let response = self.send(Method::Delete, &url).await?;

        match response.status {
            200 | 204 => Ok(()),
            500 => Err(service_error(&response)),
            _ => Err(unexpected(&response)),
        }
    }

    // ========================================================================
    // Role Operations
    // ========================================================================

    /// Update or insert an access control role.
    ///
    /// Roles group several subjects into one; policies can use the role
    /// identifier as a subject.
    ///
    /// See Also <https://www.ory.sh/docs/keto/sdk/api#upsert-an-ory-access-control-policy-role>
    pub async fn upsert_role(&self, flavor: Flavor, role: &Role) -> Result<Role> {
        let url = self.acp_url(flavor, "/roles");
        let response = self.send_json(Method::Put, &url, role).await?;

        match response.status {
            200 => decode(&response),
            500 => Err(service_error(&response)),
            _ => Err(unexpected(&response)),
        }
    }

    /// Fetch a single role by identifier
    pub async fn get_role(&self, flavor: Flavor, id: &str) -> Result<Role> {
        let url = self.acp_url(flavor, &format!("/roles/{}", id));
        let response = self.send(Method::Get, &url).await?;

        match response.status {
            200 => decode(&response),
            404 => Err(Error::NotFound),
            500 => Err(service_error(&response)),
            _ => Err(unexpected(&response)),
        }
    }

    /// List access control roles, with the same pagination convention as
    /// [`Self::list_policies`]
    pub async fn list_roles(
        &self,
        flavor: Flavor,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Role>> {
        let url = format!("{}{}", self.acp_url(flavor, "/roles"), list_query(limit, offset));
        let response = self.send(Method::Get, &url).await?;

        match response.status {
            200 => decode(&response),
            500 => Err(service_error(&response)),
            _ => Err(unexpected(&response)),
        }
    }

    /// Delete a role by identifier, idempotent on a missing role
    pub async fn delete_role(&self, flavor: Flavor, id: &str) -> Result<()> {
        let url = self.acp_url(flavor, &format!("/roles/{}", id));
        let response = self.send(Method::Delete, &url).await?;

        match response.status {
            200 | 204 => Ok(()),
            500 => Err(service_error(&response)),
            _ => Err(unexpected(&response)),
        }
    }

    /// Add members to a role, returning the updated role.
    ///
    /// Member lists have set semantics: adding an existing member is a no-op.
    /// Adding members to a role that does not exist creates it.
    pub async fn add_members(&self, flavor: Flavor, id: &str, members: &[String]) -> Result<Role> {
        let url = self.acp_url(flavor, &format!("/roles/{}/members", id));
        let request = AddMembersRequest { members: members.to_vec() };
        let response = self.send_json(Method::Put, &url, &request).await?;

        match response.status {
            200 => decode(&response),
            500 => Err(service_error(&response)),
            _ => Err(unexpected(&response)),
        }
    }

    /// Remove a member from a role.
    ///
    /// Removing a member that is not in the role (or a role that does not
    /// exist) is a success. Engine builds differ on the success status for
    /// this endpoint, so 200, 201 and 204 are all accepted.
    pub async fn remove_member(&self, flavor: Flavor, id: &str, member: &str) -> Result<()> {
        let url = self.acp_url(flavor, &format!("/roles/{}/members/{}", id, member));
        let response = self.send(Method::Delete, &url).await?;

        match response.status {
            200 | 201 | 204 => Ok(()),
            500 => Err(service_error(&response)),
            _ => Err(unexpected(&response)),
        }
    }

    // ========================================================================
    // Health & Version
    // ========================================================================

    /// Probe the liveness endpoint
    pub async fn health_alive(&self) -> Result<HealthStatus> {
        self.health("/health/alive").await
    }

    /// Probe the readiness endpoint
    pub async fn health_ready(&self) -> Result<HealthStatus> {
        self.health("/health/ready").await
    }

    async fn health(&self, path: &str) -> Result<HealthStatus> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.send(Method::Get, &url).await?;

        match response.status {
            200 => decode(&response),
            503 => Err(service_error(&response)),
            _ => Err(unexpected(&response)),
        }
    }

    /// Fetch the server's reported version string.
    ///
    /// The version endpoint has no structured-error branch; any non-200
    /// status is an unexpected response.
    pub async fn server_version(&self) -> Result<VersionInfo> {
        let url = format!("{}/version", self.base_url);
        let response = self.send(Method::Get, &url).await?;

        match response.status {
            200 => decode(&response),
            _ => Err(unexpected(&response)),
        }
    }

    // ========================================================================
    // Request plumbing
    // ========================================================================

    fn acp_url(&self, flavor: Flavor, suffix: &str) -> String {
        format!("{}/engines/acp/ory/{}{}", self.base_url, flavor, suffix)
    }

    async fn send(&self, method: Method, url: &str) -> Result<TransportResponse> {
        self.transport.send(method, url, None).await
    }

    async fn send_json<B: Serialize>(
        &self,
        method: Method,
        url: &str,
        body: &B,
    ) -> Result<TransportResponse> {
        let body = serde_json::to_vec(body)?;
        self.transport.send(method, url, Some(body)).await
    }
}

/// Decode a success body into the operation's result type
fn decode<T: DeserializeOwned>(response: &TransportResponse) -> Result<T> {
    Ok(serde_json::from_slice(&response.body)?)
}

/// Decode a structured error body, or surface the decode failure itself
fn service_error(response: &TransportResponse) -> Error {
    match serde_json::from_slice::<ServiceError>(&response.body) {
        Ok(err) => Error::Service(err),
        Err(err) => Error::Decode(err),
    }
}

fn unexpected(response: &TransportResponse) -> Error {
    Error::UnexpectedStatus {
        status: response.status,
        body: String::from_utf8_lossy(&response.body).into_owned(),
    }
}

/// Build the list query string: parameters only when strictly positive,
/// joined with `&` only when both are present, `?` only when non-empty
fn list_query(limit: usize, offset: usize) -> String {
    let mut query = String::new();
    if limit > 0 {
        let _ = write!(query, "limit={}", limit);
    }
    if offset > 0 {
        if !query.is_empty() {
            query.push('&');
        }
        let _ = write!(query, "offset={}", offset);
    }
    if query.is_empty() {
        query
    } else {
        format!("?{}", query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_rules() {
        assert_eq!(list_query(0, 0), "");
        assert_eq!(list_query(2, 0), "?limit=2");
        assert_eq!(list_query(0, 3), "?offset=3");
        assert_eq!(list_query(2, 3), "?limit=2&offset=3");
    }

    #[test]
    fn test_acp_url_assembly() {
        let client = AcpClient::new("http://localhost:4466").unwrap();
        assert_eq!(
            client.acp_url(Flavor::Exact, "/policies"),
            "http://localhost:4466/engines/acp/ory/exact/policies"
        );
        assert_eq!(
            client.acp_url(Flavor::Regex, "/roles/admins/members"),
            "http://localhost:4466/engines/acp/ory/regex/roles/admins/members"
        );
    }

    #[test]
    fn test_unexpected_carries_status_and_body() {
        let response = TransportResponse { status: 418, body: b"teapot".to_vec() };
        match unexpected(&response) {
            Error::UnexpectedStatus { status, body } => {
                assert_eq!(status, 418);
                assert_eq!(body, "teapot");
            },
            other => panic!("wrong error kind: {:?}", other),
        }
    }

    #[test]
    fn test_service_error_decode_fallback() {
        let response = TransportResponse { status: 500, body: b"not json".to_vec() };
        assert!(matches!(service_error(&response), Error::Decode(_)));

        let response =
            TransportResponse { status: 500, body: br#"{"code":500,"message":"boom"}"#.to_vec() };
        match service_error(&response) {
            Error::Service(err) => {
                assert_eq!(err.code, 500);
                assert_eq!(err.message, "boom");
            },
            other => panic!("wrong error kind: {:?}", other),
        }
    }
}
