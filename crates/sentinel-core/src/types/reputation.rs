use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reputation signals for a maintainer's code-hosting identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReputationProfile {
    /// Account handle on the code-hosting platform
    pub handle: String,

    /// Follower count
    #[serde(default)]
    pub followers: u32,

    /// When the account was created
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Outcome of reputation resolution for a package.
///
/// An unresolvable identity is evidence in itself, not an error, so each
/// terminal state is represented explicitly rather than collapsed into
/// `Option`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReputationSignal {
    /// No code-hosting URL found in the package metadata
    NoHandle,

    /// A handle was extracted but the identity API could not confirm it
    Unresolved {
        /// The handle that failed to resolve
        handle: String,
    },

    /// The identity API returned a profile
    Resolved(ReputationProfile),
}

impl ReputationSignal {
    /// Build the signal from an extracted handle and an optional profile
    #[must_use]
    pub fn from_lookup(handle: Option<String>, profile: Option<ReputationProfile>) -> Self {
        match (handle, profile) {
            (None, _) => Self::NoHandle,
            (Some(_), Some(profile)) => Self::Resolved(profile),
            (Some(handle), None) => Self::Unresolved { handle },
        }
    }
}
