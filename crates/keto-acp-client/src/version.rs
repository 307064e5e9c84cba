//! Server version compatibility check
//!
//! The ACP API stabilized in the 0.3 series; older engines answer with
//! different paths and payloads, so the client refuses to talk to them.

use keto_acp_types::{Error, Result};
use semver::Version;

use crate::AcpClient;

/// Minimum server version this client is compatible with (inclusive)
pub const MIN_SERVER_VERSION: &str = "0.3.0";

fn min_version() -> Version {
    Version::new(0, 3, 0)
}

impl AcpClient {
    /// Check that the server's reported version is compatible with this
    /// client.
    ///
    /// Fetches `/version`, strips an optional leading `v`, and compares the
    /// parsed semantic version against [`MIN_SERVER_VERSION`].
    ///
    /// # Errors
    ///
    /// * `Error::IncompatibleServer` carrying the raw reported version when
    ///   the server is too old
    /// * `Error::Version` when the reported string is not valid
    ///   semantic-version syntax
    pub async fn check_version(&self) -> Result<()> {
        let info = self.server_version().await?;
        check_compatibility(&info.version)
    }
}

/// Compare a raw reported version string against the compatibility bound.
///
/// Pre-release versions such as `0.3.3-sandbox` must be admitted, so the
/// comparison uses `Version` ordering directly rather than a `VersionReq`
/// (which excludes pre-releases from plain comparator ranges).
fn check_compatibility(reported: &str) -> Result<()> {
    let stripped = reported.strip_prefix('v').unwrap_or(reported);
    let version = Version::parse(stripped)?;

    if version >= min_version() {
        Ok(())
    } else {
        Err(Error::IncompatibleServer {
            reported: reported.to_string(),
            required: MIN_SERVER_VERSION.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compatible_prerelease_with_build_metadata() {
        assert!(check_compatibility("v0.3.3-sandbox+oryOS.12").is_ok());
    }

    #[test]
    fn test_compatible_without_v_prefix() {
        assert!(check_compatibility("0.3.0").is_ok());
        assert!(check_compatibility("1.0.0").is_ok());
    }

    #[test]
    fn test_incompatible_old_server() {
        match check_compatibility("v0.2.1").unwrap_err() {
            Error::IncompatibleServer { reported, required } => {
                assert_eq!(reported, "v0.2.1");
                assert_eq!(required, "0.3.0");
            },
            other => panic!("wrong error kind: {:?}", other),
        }
    }

    #[test]
    fn test_incompatible_error_message_leads_with_reported_version() {
        let err = check_compatibility("v0.2.1").unwrap_err();
        assert!(err.to_string().starts_with("got v0.2.1"));
    }

    #[test]
    fn test_unparsable_version_is_version_error() {
        assert!(matches!(check_compatibility("not-a-version").unwrap_err(), Error::Version(_)));
        assert!(matches!(check_compatibility("").unwrap_err(), Error::Version(_)));
    }
}
