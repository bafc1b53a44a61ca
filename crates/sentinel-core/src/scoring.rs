//! Weighted-deduction trust scoring.
//!
//! The calculator is a pure function of already-resolved signals: it does no
//! I/O, so identical inputs always produce an identical score and an
//! identically ordered risk-factor list. The clock is an explicit input for
//! the same reason.

use chrono::{DateTime, Utc};

use crate::types::{
    PackageMetadata, ReputationSignal, ScanFinding, TrustAssessment, TrustPolicy,
};

/// Deduction when the registry record has no author
const MISSING_AUTHOR: i32 = 5;
/// Deduction when no homepage is listed
const MISSING_HOMEPAGE: i32 = 10;
/// Deduction when the first release is recent
const NEW_PACKAGE: i32 = 20;
/// Deduction when no release file carries an upload timestamp
const NO_RELEASE_HISTORY: i32 = 10;
/// Deduction when very few versions have been published
const FEW_VERSIONS: i32 = 5;
/// Deduction when no code-hosting identity could be extracted
const NO_IDENTITY: i32 = 15;
/// Deduction when the extracted handle could not be resolved
const UNVERIFIED_IDENTITY: i32 = 10;
/// Deduction for a low follower count
const FEW_FOLLOWERS: i32 = 15;
/// Deduction for a recently created account
const NEW_ACCOUNT: i32 = 20;
/// Deduction for findings in an allow-listed package
const TRUSTED_FINDINGS: i32 = 5;
/// Deduction for findings in an unknown package
const UNTRUSTED_FINDINGS: i32 = 60;

/// Packages younger than this are penalized as "new"
const NEW_PACKAGE_DAYS: i64 = 180;
/// Accounts younger than this are penalized as "new"
const NEW_ACCOUNT_DAYS: i64 = 365;
/// Follower counts below this are penalized
const MIN_FOLLOWERS: u32 = 20;

/// Combine all collected signals into a bounded trust score.
///
/// Rules are evaluated in a fixed order; that order determines how risk
/// factors are reported, while the score itself is plain subtraction from
/// 100, clamped to [0, 100].
#[must_use]
pub fn assess(
    metadata: &PackageMetadata,
    version: &str,
    reputation: &ReputationSignal,
    findings: &[ScanFinding],
    policy: &TrustPolicy,
    now: DateTime<Utc>,
) -> TrustAssessment {
    let mut score: i32 = 100;
    let mut risk_factors = Vec::new();

    // Rule 1: author present in registry metadata
    if metadata.author.as_deref().map_or(true, str::is_empty) {
        score -= MISSING_AUTHOR;
        risk_factors.push("Missing author name in PyPI metadata.".to_string());
    }

    // Rule 2: homepage listed
    if metadata.home_page.as_deref().map_or(true, str::is_empty) {
        score -= MISSING_HOMEPAGE;
        risk_factors.push("No project homepage listed.".to_string());
    }

    // Rule 3: release history age. An empty release list and a release list
    // with no timestamps both count as "no release history".
    if let Some(first_release) = metadata.earliest_upload() {
        let days = (now - first_release).num_days();
        if days < NEW_PACKAGE_DAYS {
            score -= NEW_PACKAGE;
            risk_factors.push(format!("Package is new (created {days} days ago)."));
        }
    } else {
        score -= NO_RELEASE_HISTORY;
        risk_factors.push("No release history found.".to_string());
    }

    // Rule 4: version count. Also fires for an empty release list (0 <= 2),
    // in addition to rule 3's no-history path.
    if metadata.version_count() <= 2 {
        score -= FEW_VERSIONS;
        risk_factors.push("Very few versions published.".to_string());
    }

    // Rule 5: maintainer reputation
    match reputation {
        ReputationSignal::NoHandle => {
            score -= NO_IDENTITY;
            risk_factors.push("No associated GitHub repository found.".to_string());
        }
        ReputationSignal::Unresolved { handle } => {
            score -= UNVERIFIED_IDENTITY;
            risk_factors.push(format!("Could not verify GitHub username: {handle}."));
        }
        ReputationSignal::Resolved(profile) => {
            if profile.followers < MIN_FOLLOWERS {
                score -= FEW_FOLLOWERS;
                risk_factors.push(format!(
                    "GitHub account ({}) has few followers ({}).",
                    profile.handle, profile.followers
                ));
            }
            if let Some(created_at) = profile.created_at {
                let days = (now - created_at).num_days();
                if days < NEW_ACCOUNT_DAYS {
                    score -= NEW_ACCOUNT;
                    risk_factors.push(format!(
                        "GitHub account ({}) is new ({days} days old).",
                        profile.handle
                    ));
                }
            }
        }
    }

    // Rule 6: static-analysis findings. Allow-listed packages take a flat
    // note; everything else takes the full deduction with each finding
    // surfaced verbatim.
    if !findings.is_empty() {
        if policy.is_trusted(&metadata.name) {
            score -= TRUSTED_FINDINGS;
            risk_factors.push(
                "[Note] Potentially risky code patterns found, but this is a trusted package."
                    .to_string(),
            );
        } else {
            score -= UNTRUSTED_FINDINGS;
            risk_factors.extend(findings.iter().map(ToString::to_string));
        }
    }

    TrustAssessment {
        package_name: metadata.name.clone(),
        version: version.to_string(),
        score: score.clamp(0, 100),
        risk_factors,
    }
}
