//! Assessment orchestration.
//!
//! A single assessment is logically sequential: the metadata fetch must
//! complete first, then reputation resolution and the archive scan run
//! concurrently over the same immutable snapshot, and the calculator runs
//! last. The metadata fetch is the only hard-failure stage; every other
//! signal degrades locally.

use chrono::Utc;
use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, warn};

use sentinel_client::{extract_identity_handle, GithubClient, RegistryClient};
use sentinel_core::{scoring, ReputationSignal, Result, SentinelError, TrustAssessment, TrustPolicy};
use sentinel_scan::scan_package;

/// Default number of packages assessed concurrently in batch mode
const DEFAULT_BATCH_CONCURRENCY: usize = 4;

/// Outcome of one package in a batch run.
///
/// A package the registry doesn't know is reported as skipped, never as a
/// misleadingly low score.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BatchOutcome {
    /// Assessment completed (possibly with degraded signals)
    Assessed(TrustAssessment),
    /// Assessment could not run at all
    Skipped {
        /// The requested package name
        package_name: String,
        /// Why the assessment was skipped
        reason: String,
    },
}

/// Drives collectors and the calculator for one or many packages
#[derive(Clone)]
pub struct AssessmentEngine {
    registry: RegistryClient,
    github: GithubClient,
    policy: TrustPolicy,
    batch_concurrency: usize,
}

impl AssessmentEngine {
    /// Create an engine with default clients and policy
    #[must_use]
    pub fn new() -> Self {
        AssessmentEngineBuilder::new().build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> AssessmentEngineBuilder {
        AssessmentEngineBuilder::new()
    }

    /// Assess a single package.
    ///
    /// With no explicit version, the registry's current version is
    /// assessed. Fails only when the package (or any released version of
    /// it) cannot be found, or the metadata fetch itself fails; reputation
    /// and scan signals degrade instead of failing.
    pub async fn assess(&self, name: &str, version: Option<&str>) -> Result<TrustAssessment> {
        let metadata = self.registry.package_metadata(name).await?;

        let version = match version {
            Some(v) => v.to_string(),
            None => metadata
                .latest_version
                .clone()
                .ok_or_else(|| SentinelError::NotFound {
                    resource: format!("a released version of '{name}'"),
                })?,
        };
        debug!(package = name, version = %version, "assessing");

        // Reputation and scan are independent; run them concurrently over
        // the shared snapshot.
        let reputation_fut = async {
            match extract_identity_handle(&metadata) {
                Some(handle) => {
                    let profile = self.github.resolve_reputation(&handle).await;
                    ReputationSignal::from_lookup(Some(handle), profile)
                }
                None => ReputationSignal::NoHandle,
            }
        };
        let scan_fut = scan_package(&self.registry, &metadata, &version);

        let (reputation, findings) = tokio::join!(reputation_fut, scan_fut);

        Ok(scoring::assess(
            &metadata,
            &version,
            &reputation,
            &findings,
            &self.policy,
            Utc::now(),
        ))
    }

    /// Assess many packages with bounded concurrency.
    ///
    /// Each package is fully independent; per-host pacing is handled by the
    /// shared clients' rate limiters. Failed packages become
    /// [`BatchOutcome::Skipped`] entries rather than aborting the batch.
    pub async fn assess_batch<I, S>(&self, names: I) -> Vec<BatchOutcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        stream::iter(names.into_iter().map(Into::into).map(|name| async move {
            match self.assess(&name, None).await {
                Ok(assessment) => BatchOutcome::Assessed(assessment),
                Err(e) => {
                    warn!(package = %name, error = %e, "could not assess");
                    BatchOutcome::Skipped {
                        package_name: name,
                        reason: e.to_string(),
                    }
                }
            }
        }))
        .buffer_unordered(self.batch_concurrency)
        .collect()
        .await
    }
}

impl Default for AssessmentEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for configuring an [`AssessmentEngine`]
pub struct AssessmentEngineBuilder {
    registry: Option<RegistryClient>,
    github: Option<GithubClient>,
    policy: TrustPolicy,
    batch_concurrency: usize,
}

impl AssessmentEngineBuilder {
    /// Create a new builder with default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: None,
            github: None,
            policy: TrustPolicy::default(),
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
        }
    }

    /// Use a custom registry client
    #[must_use]
    pub fn registry(mut self, client: RegistryClient) -> Self {
        self.registry = Some(client);
        self
    }

    /// Use a custom identity client
    #[must_use]
    pub fn github(mut self, client: GithubClient) -> Self {
        self.github = Some(client);
        self
    }

    /// Use a custom scoring policy
    #[must_use]
    pub fn policy(mut self, policy: TrustPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the batch concurrency bound
    #[must_use]
    pub fn batch_concurrency(mut self, concurrency: usize) -> Self {
        self.batch_concurrency = concurrency.max(1);
        self
    }

    /// Build the engine
    #[must_use]
    pub fn build(self) -> AssessmentEngine {
        AssessmentEngine {
            registry: self.registry.unwrap_or_default(),
            github: self.github.unwrap_or_default(),
            policy: self.policy,
            batch_concurrency: self.batch_concurrency,
        }
    }
}

impl Default for AssessmentEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tar_gz(files: &[(&str, &str)]) -> Vec<u8> {
        let encoder = GzEncoder::new(Vec::new(), Compression::default());
        let mut builder = tar::Builder::new(encoder);
        for (file_path, content) in files {
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, file_path, content.as_bytes())
                .unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap()
    }

    fn engine_for(server: &MockServer, policy: TrustPolicy) -> AssessmentEngine {
        AssessmentEngine::builder()
            .registry(RegistryClient::builder().base_url(server.uri()).build())
            .github(GithubClient::builder().base_url(server.uri()).build())
            .policy(policy)
            .build()
    }

    async fn mount_metadata(server: &MockServer, name: &str, body: String) {
        Mock::given(method("GET"))
            .and(path(format!("/pypi/{name}/json")))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn bare_new_package_scores_45() {
        // author=None, home_page=None, one release 10 days old, no
        // code-hosting URL, clean sdist:
        // 100 - 5 - 10 - 20 - 5 - 15 = 45
        let server = MockServer::start().await;
        let upload = (Utc::now() - Duration::days(10)).to_rfc3339();
        let body = format!(
            r#"{{
                "info": {{"name": "newcomer", "version": "0.1.0"}},
                "releases": {{
                    "0.1.0": [{{
                        "packagetype": "sdist",
                        "url": "{}/packages/newcomer-0.1.0.tar.gz",
                        "upload_time_iso_8601": "{upload}"
                    }}]
                }}
            }}"#,
            server.uri()
        );
        mount_metadata(&server, "newcomer", body).await;

        let archive = tar_gz(&[("newcomer-0.1.0/newcomer/__init__.py", "VERSION = '0.1.0'\n")]);
        Mock::given(method("GET"))
            .and(path("/packages/newcomer-0.1.0.tar.gz"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(archive))
            .mount(&server)
            .await;

        let engine = engine_for(&server, TrustPolicy::empty());
        let assessment = engine.assess("newcomer", None).await.unwrap();
        assert_eq!(assessment.score, 45);
        assert_eq!(assessment.version, "0.1.0");
    }

    #[tokio::test]
    async fn dangerous_code_in_unknown_package_takes_full_deduction() {
        let server = MockServer::start().await;
        let upload = (Utc::now() - Duration::days(900)).to_rfc3339();
        let release = |v: &str| {
            format!(
                r#""{v}": [{{
                    "packagetype": "sdist",
                    "url": "{}/packages/shady-{v}.tar.gz",
                    "upload_time_iso_8601": "{upload}"
                }}]"#,
                server.uri()
            )
        };
        let body = format!(
            r#"{{
                "info": {{
                    "name": "shady",
                    "author": "Somebody",
                    "home_page": "https://github.com/somebody/shady",
                    "version": "3.0"
                }},
                "releases": {{{}, {}, {}}}
            }}"#,
            release("1.0"),
            release("2.0"),
            release("3.0"),
        );
        mount_metadata(&server, "shady", body).await;

        let archive = tar_gz(&[("shady-3.0/shady/core.py", "os.system(cmd)\n")]);
        Mock::given(method("GET"))
            .and(path("/packages/shady-3.0.tar.gz"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(archive))
            .mount(&server)
            .await;

        let profile = format!(
            r#"{{"login": "somebody", "followers": 900, "created_at": "{}"}}"#,
            (Utc::now() - Duration::days(3000)).to_rfc3339()
        );
        Mock::given(method("GET"))
            .and(path("/users/somebody"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(profile, "application/json"))
            .mount(&server)
            .await;

        let engine = engine_for(&server, TrustPolicy::empty());
        let assessment = engine.assess("shady", None).await.unwrap();
        // Only the findings rule fires: 100 - 60
        assert_eq!(assessment.score, 40);
        assert!(assessment
            .risk_factors
            .iter()
            .any(|f| f.contains("'os.system'") && f.contains("shady/core.py")));
    }

    #[tokio::test]
    async fn explicit_version_overrides_latest() {
        let server = MockServer::start().await;
        let body = format!(
            r#"{{
                "info": {{"name": "pinned", "version": "2.0"}},
                "releases": {{
                    "1.0": [{{
                        "packagetype": "sdist",
                        "url": "{}/packages/pinned-1.0.tar.gz"
                    }}],
                    "2.0": []
                }}
            }}"#,
            server.uri()
        );
        mount_metadata(&server, "pinned", body).await;

        let archive = tar_gz(&[("pinned-1.0/pinned/run.py", "exec(blob)\n")]);
        Mock::given(method("GET"))
            .and(path("/packages/pinned-1.0.tar.gz"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(archive))
            .mount(&server)
            .await;

        let engine = engine_for(&server, TrustPolicy::empty());
        let assessment = engine.assess("pinned", Some("1.0")).await.unwrap();
        assert_eq!(assessment.version, "1.0");
        assert!(assessment.risk_factors.iter().any(|f| f.contains("'exec('")));
    }

    #[tokio::test]
    async fn missing_package_is_skipped_in_batch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pypi/doesnotexist123/json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let engine = engine_for(&server, TrustPolicy::default());
        let outcomes = engine.assess_batch(["doesnotexist123"]).await;
        assert_eq!(outcomes.len(), 1);
        match &outcomes[0] {
            BatchOutcome::Skipped { package_name, .. } => {
                assert_eq!(package_name, "doesnotexist123");
            }
            BatchOutcome::Assessed(a) => panic!("expected skip, got score {}", a.score),
        }
    }
}
