use serde::{Deserialize, Serialize};

/// Response body of the `/version` endpoint.
///
/// The reported version may carry a leading `v` and build metadata (e.g.
/// `v0.3.3-sandbox+oryOS.12`); it is kept verbatim here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
}
