use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The sole output artifact of an assessment: a bounded score plus ordered,
/// human-readable risk factors. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustAssessment {
    /// Name of the assessed package
    pub package_name: String,

    /// Version whose source distribution was scanned
    pub version: String,

    /// Trust score, clamped to [0, 100]
    pub score: i32,

    /// Risk factors in rule-evaluation order
    pub risk_factors: Vec<String>,
}

/// Scoring policy configuration.
///
/// The allow-list exempts heavily-audited packages from the harshest
/// static-analysis penalty; they legitimately use process/eval-adjacent
/// APIs internally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustPolicy {
    /// Packages exempted from the full findings deduction
    pub trusted_packages: HashSet<String>,
}

impl Default for TrustPolicy {
    fn default() -> Self {
        Self {
            trusted_packages: ["pandas", "numpy"].iter().map(ToString::to_string).collect(),
        }
    }
}

impl TrustPolicy {
    /// A policy with an empty allow-list
    #[must_use]
    pub fn empty() -> Self {
        Self {
            trusted_packages: HashSet::new(),
        }
    }

    /// A policy trusting exactly the given packages
    #[must_use]
    pub fn with_trusted<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            trusted_packages: packages.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if the package is on the allow-list
    #[must_use]
    pub fn is_trusted(&self, package_name: &str) -> bool {
        self.trusted_packages.contains(package_name)
    }
}
