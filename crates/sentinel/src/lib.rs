//! Package trust assessment engine.
//!
//! Combines registry metadata, maintainer reputation signals, and static
//! analysis of a package's source distribution into a single bounded trust
//! score with human-readable risk factors.
//!
//! # Example
//!
//! ```rust,ignore
//! use sentinel::AssessmentEngine;
//!
//! let engine = AssessmentEngine::new();
//! let assessment = engine.assess("requests", None).await?;
//! println!("{}: {}/100", assessment.package_name, assessment.score);
//! for factor in &assessment.risk_factors {
//!     println!("  - {factor}");
//! }
//! ```

mod engine;

pub use engine::{AssessmentEngine, AssessmentEngineBuilder, BatchOutcome};
pub use sentinel_client::{extract_identity_handle, GithubClient, RegistryClient};
pub use sentinel_core::{
    PackageMetadata, PackageType, ReleaseFile, ReputationProfile, ReputationSignal, Result,
    ScanFinding, SentinelError, TrustAssessment, TrustPolicy,
};
pub use sentinel_scan::{locate_sdist, scan_archive, scan_package};
