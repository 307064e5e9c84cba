//! # Keto ACP Types
//!
//! Shared type definitions for the Keto ACP client.
//!
//! This crate provides all core types used across the client workspace,
//! ensuring a single source of truth and preventing circular dependencies.
//! JSON field names are part of the wire contract with the ACP engine and
//! must not change.

// ============================================================================
// Error Types
// ============================================================================

pub mod error;

pub use error::{Error, Result, ServiceError};

// ============================================================================
// Entity Types
// ============================================================================

pub mod entities;

pub use entities::{Effect, Flavor, Policy, Role};

// ============================================================================
// Request/Response Types
// ============================================================================

pub mod dto;

pub use dto::{AddMembersRequest, AllowedRequest, HealthStatus, VersionInfo};
