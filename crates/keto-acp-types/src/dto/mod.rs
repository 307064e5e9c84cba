// Request/Response DTOs for the ACP engine REST API

pub mod allowed;
pub mod health;
pub mod roles;
pub mod version;

pub use allowed::AllowedRequest;
pub use health::HealthStatus;
pub use roles::AddMembersRequest;
pub use version::VersionInfo;
