//! HTTP clients for the package registry and code-hosting identity APIs.
//!
//! Two clients live here, both with bounded timeouts and a local rate
//! limiter ahead of every outbound call:
//!
//! - [`RegistryClient`]: package metadata and source-archive downloads
//! - [`GithubClient`]: maintainer reputation lookups
//!
//! Identity-handle extraction ([`extract_identity_handle`]) is pure and
//! does no I/O.

mod github;
mod identity;
mod registry;

pub use github::{GithubClient, GithubClientBuilder};
pub use identity::extract_identity_handle;
pub use registry::{RegistryClient, RegistryClientBuilder};
pub use sentinel_core::{Result, SentinelError};

/// Map a transport-level reqwest failure onto the error taxonomy.
fn transport_error(e: &reqwest::Error) -> SentinelError {
    if e.is_timeout() {
        SentinelError::Timeout(e.to_string())
    } else {
        SentinelError::Http(e.to_string())
    }
}
