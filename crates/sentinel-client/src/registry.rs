//! Package registry (PyPI) metadata client.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use governor::{Quota, RateLimiter};
use reqwest::Client as HttpClient;
use serde::Deserialize;
use tracing::debug;

use crate::transport_error;
use sentinel_core::{PackageMetadata, PackageType, ReleaseFile, Result, SentinelError};

/// The PyPI JSON API base URL
const DEFAULT_BASE_URL: &str = "https://pypi.org";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default outbound request rate against the registry host
const DEFAULT_REQUESTS_PER_SECOND: u32 = 5;

type DirectLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Read-only client for the package registry's metadata endpoint.
///
/// No retries are performed; a single failed attempt is terminal for that
/// package's assessment.
#[derive(Clone)]
pub struct RegistryClient {
    inner: Arc<RegistryInner>,
}

struct RegistryInner {
    http: HttpClient,
    base_url: String,
    rate_limiter: DirectLimiter,
}

impl RegistryClient {
    /// Create a client with default settings
    #[must_use]
    pub fn new() -> Self {
        RegistryClientBuilder::new().build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> RegistryClientBuilder {
        RegistryClientBuilder::new()
    }

    /// Fetch the registry record for a package.
    ///
    /// Returns [`SentinelError::NotFound`] when the registry has no such
    /// package, and transport errors otherwise. One outbound GET per call.
    pub async fn package_metadata(&self, name: &str) -> Result<PackageMetadata> {
        self.inner.rate_limiter.until_ready().await;

        let url = format!("{}/pypi/{}/json", self.inner.base_url, name);
        debug!(url = %url, "registry metadata request");

        let response = self
            .inner
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(SentinelError::NotFound {
                    resource: format!("package '{name}'"),
                });
            }
            let message = response.text().await.unwrap_or_default();
            return Err(SentinelError::Api {
                code: status.as_u16(),
                message,
            });
        }

        let document: RegistryDocument = response.json().await.map_err(|e| transport_error(&e))?;
        Ok(document.into_metadata(name))
    }

    /// Download a release artifact fully into memory.
    ///
    /// Source distributions are expected to be small; no streaming to disk.
    pub async fn download_archive(&self, url: &str) -> Result<Vec<u8>> {
        self.inner.rate_limiter.until_ready().await;
        debug!(url = %url, "artifact download");

        let response = self
            .inner
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SentinelError::Api {
                code: status.as_u16(),
                message: format!("artifact download failed for {url}"),
            });
        }

        let bytes = response.bytes().await.map_err(|e| transport_error(&e))?;
        Ok(bytes.to_vec())
    }
}

impl Default for RegistryClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for configuring a [`RegistryClient`]
pub struct RegistryClientBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: String,
    requests_per_second: u32,
}

impl RegistryClientBuilder {
    /// Create a new builder with default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("pkgsentinel/{}", env!("CARGO_PKG_VERSION")),
            requests_per_second: DEFAULT_REQUESTS_PER_SECOND,
        }
    }

    /// Set the base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set the outbound request rate toward the registry host
    #[must_use]
    pub fn requests_per_second(mut self, rps: u32) -> Self {
        self.requests_per_second = rps;
        self
    }

    /// Build the client
    #[must_use]
    pub fn build(self) -> RegistryClient {
        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .expect("Failed to build HTTP client");

        let quota = Quota::per_second(
            NonZeroU32::new(self.requests_per_second.max(1)).unwrap_or(NonZeroU32::MIN),
        );

        RegistryClient {
            inner: Arc::new(RegistryInner {
                http,
                base_url: self.base_url,
                rate_limiter: RateLimiter::direct(quota),
            }),
        }
    }
}

impl Default for RegistryClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// Registry-specific response shapes. Field names follow the PyPI JSON API;
// everything is optional-tolerant so a sparse record still parses.

#[derive(Debug, Deserialize)]
struct RegistryDocument {
    #[serde(default)]
    info: RegistryInfo,
    #[serde(default)]
    releases: std::collections::HashMap<String, Vec<RegistryFile>>,
}

#[derive(Debug, Default, Deserialize)]
struct RegistryInfo {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    home_page: Option<String>,
    /// Object, preserved in registry order (serde_json `preserve_order`)
    #[serde(default)]
    project_urls: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    packagetype: Option<String>,
    url: String,
    #[serde(default)]
    upload_time_iso_8601: Option<String>,
}

impl RegistryDocument {
    fn into_metadata(self, requested_name: &str) -> PackageMetadata {
        let project_urls = self
            .info
            .project_urls
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(label, value)| match value {
                serde_json::Value::String(url) => Some((label, url)),
                _ => None,
            })
            .collect();

        let releases = self
            .releases
            .into_iter()
            .map(|(version, files)| {
                let files = files
                    .into_iter()
                    .map(|f| ReleaseFile {
                        package_type: f
                            .packagetype
                            .map(PackageType::from)
                            .unwrap_or_default(),
                        url: f.url,
                        // A malformed timestamp is an absent signal, not a
                        // failed fetch
                        upload_time: f
                            .upload_time_iso_8601
                            .and_then(|s| s.parse::<DateTime<Utc>>().ok()),
                    })
                    .collect();
                (version, files)
            })
            .collect();

        PackageMetadata {
            name: self.info.name.unwrap_or_else(|| requested_name.to_string()),
            author: self.info.author.filter(|a| !a.is_empty()),
            home_page: self.info.home_page.filter(|h| !h.is_empty()),
            project_urls,
            releases,
            latest_version: self.info.version,
        }
    }
}
