//! Code-hosting identity (GitHub users API) client.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use governor::{Quota, RateLimiter};
use reqwest::Client as HttpClient;
use serde::Deserialize;
use tracing::{debug, warn};

use sentinel_core::ReputationProfile;

/// The GitHub API base URL
const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default outbound request rate against the identity host.
///
/// Unauthenticated GitHub API quota is 60/hour; stay well under burst
/// limits during batch runs.
const DEFAULT_REQUESTS_PER_SECOND: u32 = 2;

type DirectLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Client for maintainer reputation lookups.
///
/// An unresolvable handle is evidence, not a failure: every error path
/// collapses to `None` and is scored by the calculator.
#[derive(Clone)]
pub struct GithubClient {
    inner: Arc<GithubInner>,
}

struct GithubInner {
    http: HttpClient,
    base_url: String,
    token: Option<String>,
    rate_limiter: DirectLimiter,
}

impl GithubClient {
    /// Create a client with default settings
    #[must_use]
    pub fn new() -> Self {
        GithubClientBuilder::new().build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> GithubClientBuilder {
        GithubClientBuilder::new()
    }

    /// Query the identity API for an account's reputation signals.
    ///
    /// Returns `None` on any non-success response or transport failure.
    pub async fn resolve_reputation(&self, handle: &str) -> Option<ReputationProfile> {
        self.inner.rate_limiter.until_ready().await;

        let url = format!("{}/users/{}", self.inner.base_url, handle);
        debug!(url = %url, "identity lookup");

        let mut request = self.inner.http.get(&url);
        if let Some(token) = &self.inner.token {
            request = request.bearer_auth(token);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(handle, error = %e, "identity lookup transport failure");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(handle, status = %response.status(), "identity lookup rejected");
            return None;
        }

        let user: GithubUser = match response.json().await {
            Ok(user) => user,
            Err(e) => {
                warn!(handle, error = %e, "identity response unparseable");
                return None;
            }
        };

        Some(ReputationProfile {
            handle: user.login.unwrap_or_else(|| handle.to_string()),
            followers: user.followers,
            created_at: user.created_at.and_then(|s| s.parse::<DateTime<Utc>>().ok()),
        })
    }
}

impl Default for GithubClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for configuring a [`GithubClient`]
pub struct GithubClientBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: String,
    token: Option<String>,
    requests_per_second: u32,
}

impl GithubClientBuilder {
    /// Create a new builder with default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("pkgsentinel/{}", env!("CARGO_PKG_VERSION")),
            token: None,
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

    /// Set the User-Agent header (required by the GitHub API)
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set a bearer token for authenticated quota
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the outbound request rate toward the identity host
    #[must_use]
    pub fn requests_per_second(mut self, rps: u32) -> Self {
        self.requests_per_second = rps;
        self
    }

    /// Build the client
    #[must_use]
    pub fn build(self) -> GithubClient {
        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .expect("Failed to build HTTP client");

        let quota = Quota::per_second(
            NonZeroU32::new(self.requests_per_second.max(1)).unwrap_or(NonZeroU32::MIN),
        );

        GithubClient {
            inner: Arc::new(GithubInner {
                http,
                base_url: self.base_url,
                token: self.token,
                rate_limiter: RateLimiter::direct(quota),
            }),
        }
    }
}

impl Default for GithubClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct GithubUser {
    #[serde(default)]
    login: Option<String>,
    #[serde(default)]
    followers: u32,
    #[serde(default)]
    created_at: Option<String>,
}
