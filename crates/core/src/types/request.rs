use serde::{Deserialize, Serialize};
use std::fmt;

use super::repository::FileEntry;

// =============================================================================
// Request Types
// =============================================================================

/// Skill tier the review is calibrated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateLevel {
    Junior,
    Middle,
    Senior,
}

impl CandidateLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Junior => "junior",
            Self::Middle => "middle",
            Self::Senior => "senior",
        }
    }
}

impl fmt::Display for CandidateLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The inputs that uniquely determine an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnalysisRequest {
    /// Assignment description, verbatim.
    pub description: String,
    /// Candidate level.
    pub level: CandidateLevel,
    /// Listing snapshot, in hosting API order.
    pub listing: Vec<FileEntry>,
}

/// Fixed-length fingerprint used as a cache key (hex SHA-256).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Wrap an already computed digest.
    pub fn from_digest(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which inputs a cache key is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheKeyPolicy {
    /// Repository reference, description and level. A hit skips the listing fetch.
    #[default]
    Request,
    /// Description, level and the fetched listing. The listing is always fetched.
    Listing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_serde() {
        let level: CandidateLevel = serde_json::from_str("\"senior\"").unwrap();
        assert_eq!(level, CandidateLevel::Senior);
        assert_eq!(serde_json::to_string(&CandidateLevel::Junior).unwrap(), "\"junior\"");
        assert!(serde_json::from_str::<CandidateLevel>("\"lead\"").is_err());
        assert_eq!(CandidateLevel::Middle.to_string(), "middle");
    }

    #[test]
    fn test_policy_serde() {
        let policy: CacheKeyPolicy = serde_json::from_str("\"listing\"").unwrap();
        assert_eq!(policy, CacheKeyPolicy::Listing);
        assert_eq!(CacheKeyPolicy::default(), CacheKeyPolicy::Request);
    }
}
