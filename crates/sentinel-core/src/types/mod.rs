//! Data model for a single assessment run.
//!
//! Every entity here is created and consumed within one assessment; nothing
//! outlives the run or is shared mutably across concurrent assessments.

mod assessment;
mod finding;
mod metadata;
mod reputation;

pub use assessment::{TrustAssessment, TrustPolicy};
pub use finding::ScanFinding;
pub use metadata::{PackageMetadata, PackageType, ReleaseFile};
pub use reputation::{ReputationProfile, ReputationSignal};
