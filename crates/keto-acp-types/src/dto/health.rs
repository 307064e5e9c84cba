use serde::{Deserialize, Serialize};

/// Response body of the `/health/alive` and `/health/ready` probes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}
