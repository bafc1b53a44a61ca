//! Source-distribution archive scanning.
//!
//! Downloads a package's source distribution, extracts it in memory, and
//! scans contained source files line-by-line for a fixed table of dangerous
//! substrings, recording file and line provenance. Test directories are
//! excluded: dangerous-looking calls inside test fixtures are expected and
//! not indicative of package-runtime risk.
//!
//! Matching is plain substring containment, case-sensitive, not regex.
//! That is a deliberate simplicity/false-positive tradeoff.

pub mod patterns;
mod scanner;

pub use scanner::{locate_sdist, scan_archive, scan_package};
