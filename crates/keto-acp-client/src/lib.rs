//! HTTP client for the ORY Keto legacy ACP engine
//!
//! This crate provides typed access to the engine's access-control-policy
//! REST API (`/engines/acp/ory/{flavor}/...`), with support for:
//!
//! - Policy and role CRUD, authorization checks, health and version queries
//! - Circuit breaker pattern for fault tolerance
//! - A pluggable transport seam for in-process test doubles
//! - Server version compatibility checking
//!
//! The client holds no per-call state; a single instance is safe to share
//! across tasks via `Clone` or `Arc`.

pub mod client;
pub mod config;
pub mod transport;
pub mod version;

pub use client::AcpClient;
pub use config::{ClientBuilder, ClientConfig};
pub use transport::{BreakerTransport, Method, Transport, TransportConfig, TransportResponse};
pub use version::MIN_SERVER_VERSION;
