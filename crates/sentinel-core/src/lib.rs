//! Core types and trust scoring for the pkgsentinel assessment engine.
//!
//! This crate provides the foundational pieces used across the workspace:
//!
//! - **Types**: Immutable snapshots of registry metadata, maintainer
//!   reputation, and static-scan findings
//! - **Errors**: Comprehensive error handling with [`SentinelError`]
//! - **Scoring**: The pure weighted-deduction trust calculator
//!
//! # Example
//!
//! ```rust,ignore
//! use sentinel_core::{scoring, ReputationSignal, TrustPolicy};
//! use chrono::Utc;
//!
//! let assessment = scoring::assess(
//!     &metadata,
//!     "1.2.0",
//!     &ReputationSignal::NoHandle,
//!     &findings,
//!     &TrustPolicy::default(),
//!     Utc::now(),
//! );
//! println!("{}: {}/100", assessment.package_name, assessment.score);
//! ```

mod error;
pub mod scoring;
pub mod types;

pub use error::{Result, SentinelError};
pub use types::*;
