use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Immutable snapshot of a package's registry record.
///
/// Fetched once per assessment and shared read-only with the reputation
/// resolver and the archive scanner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageMetadata {
    /// Package name as known to the registry
    pub name: String,

    /// Author string from the registry record
    #[serde(default)]
    pub author: Option<String>,

    /// Project homepage URL
    #[serde(default)]
    pub home_page: Option<String>,

    /// Labeled project URLs, in registry order.
    ///
    /// Order matters: identity-handle extraction takes the first matching
    /// URL, so this is a vec of pairs rather than a map.
    #[serde(default)]
    pub project_urls: Vec<(String, String)>,

    /// Release files keyed by version string
    #[serde(default)]
    pub releases: HashMap<String, Vec<ReleaseFile>>,

    /// The registry's current version for the package, if reported
    #[serde(default)]
    pub latest_version: Option<String>,
}

impl PackageMetadata {
    /// Release files published for a specific version
    #[must_use]
    pub fn release_files(&self, version: &str) -> Option<&[ReleaseFile]> {
        self.releases.get(version).map(Vec::as_slice)
    }

    /// Number of distinct released versions
    #[must_use]
    pub fn version_count(&self) -> usize {
        self.releases.len()
    }

    /// Earliest upload timestamp across all release files, if any exists
    #[must_use]
    pub fn earliest_upload(&self) -> Option<DateTime<Utc>> {
        self.releases
            .values()
            .flatten()
            .filter_map(|f| f.upload_time)
            .min()
    }

    /// Candidate URLs for maintainer identity extraction: the homepage
    /// first, then project URLs in registry order.
    pub fn candidate_urls(&self) -> impl Iterator<Item = &str> {
        self.home_page
            .as_deref()
            .into_iter()
            .chain(self.project_urls.iter().map(|(_, url)| url.as_str()))
    }
}

/// A single file published for a release
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseFile {
    /// Distribution kind
    #[serde(default)]
    pub package_type: PackageType,

    /// Download URL for the artifact
    pub url: String,

    /// When the file was uploaded, if the registry reported it
    #[serde(default)]
    pub upload_time: Option<DateTime<Utc>>,
}

/// Distribution kind of a release file.
///
/// Registries report this as a free-form string (`sdist`, `bdist_wheel`,
/// `bdist_egg`, ...); anything unrecognized maps to [`PackageType::Other`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PackageType {
    /// Archived snapshot of the package source
    SourceDist,
    /// Pre-built binary artifact (wheel, egg, ...)
    BuiltDist,
    /// Anything else
    #[default]
    Other,
}

impl From<String> for PackageType {
    fn from(s: String) -> Self {
        if s == "sdist" {
            Self::SourceDist
        } else if s.starts_with("bdist") {
            Self::BuiltDist
        } else {
            Self::Other
        }
    }
}

impl From<PackageType> for String {
    fn from(t: PackageType) -> Self {
        match t {
            PackageType::SourceDist => "sdist".to_string(),
            PackageType::BuiltDist => "bdist".to_string(),
            PackageType::Other => "other".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn file(package_type: &str, upload_time: Option<DateTime<Utc>>) -> ReleaseFile {
        ReleaseFile {
            package_type: PackageType::from(package_type.to_string()),
            url: "https://files.example/pkg.tar.gz".into(),
            upload_time,
        }
    }

    #[test]
    fn package_type_from_registry_strings() {
        assert_eq!(PackageType::from("sdist".to_string()), PackageType::SourceDist);
        assert_eq!(
            PackageType::from("bdist_wheel".to_string()),
            PackageType::BuiltDist
        );
        assert_eq!(PackageType::from("bdist_egg".to_string()), PackageType::BuiltDist);
        assert_eq!(PackageType::from("whatever".to_string()), PackageType::Other);
    }

    #[test]
    fn earliest_upload_across_versions() {
        let early = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();

        let mut metadata = PackageMetadata {
            name: "demo".into(),
            ..Default::default()
        };
        metadata
            .releases
            .insert("2.0".into(), vec![file("sdist", Some(late))]);
        metadata
            .releases
            .insert("1.0".into(), vec![file("bdist_wheel", None), file("sdist", Some(early))]);

        assert_eq!(metadata.earliest_upload(), Some(early));
        assert_eq!(metadata.version_count(), 2);
    }

    #[test]
    fn candidate_urls_homepage_first() {
        let metadata = PackageMetadata {
            name: "demo".into(),
            home_page: Some("https://example.com".into()),
            project_urls: vec![
                ("Source".into(), "https://github.com/someone/demo".into()),
                ("Docs".into(), "https://demo.readthedocs.io".into()),
            ],
            ..Default::default()
        };

        let urls: Vec<&str> = metadata.candidate_urls().collect();
        assert_eq!(
            urls,
            vec![
                "https://example.com",
                "https://github.com/someone/demo",
                "https://demo.readthedocs.io",
            ]
        );
    }
}
