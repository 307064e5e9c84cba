use std::fmt;

use serde::{Deserialize, Serialize};

/// Pattern-matching strategy of the ACP engine.
///
/// The flavor selects which policy namespace a request targets; it is a
/// routing parameter and becomes a path segment of every ACP endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    /// Case-sensitive equality when comparing the rules
    Exact,
    /// Wildcards, single symbol wildcards, super wildcards, character lists
    Glob,
    /// Regular expression matching
    Regex,
}

impl Flavor {
    /// The URL path segment for this flavor
    pub fn as_str(&self) -> &'static str {
        match self {
            Flavor::Exact => "exact",
            Flavor::Glob => "glob",
            Flavor::Regex => "regex",
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flavor_path_segment() {
        assert_eq!(Flavor::Exact.as_str(), "exact");
        assert_eq!(Flavor::Glob.as_str(), "glob");
        assert_eq!(Flavor::Regex.as_str(), "regex");
        assert_eq!(Flavor::Exact.to_string(), "exact");
    }

    #[test]
    fn test_flavor_serde() {
        assert_eq!(serde_json::to_string(&Flavor::Glob).unwrap(), r#""glob""#);
        let flavor: Flavor = serde_json::from_str(r#""regex""#).unwrap();
        assert_eq!(flavor, Flavor::Regex);
    }
}
