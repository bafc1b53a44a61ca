//! # sentinel-cli
//!
//! Command-line interface for pkgsentinel dependency trust assessment.
//!
//! ## Features
//!
//! - **Batch mode**: assess every dependency in a requirements file
//! - **Single package**: assess one package, optionally version-pinned
//! - **Policy override**: custom allow-list via `--trusted`
//! - **Output formats**: colored report or JSON

pub mod cli;
pub mod output;
pub mod requirements;

pub use cli::run;
