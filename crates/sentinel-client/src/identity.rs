//! Maintainer identity extraction from registry metadata.

use sentinel_core::PackageMetadata;

/// Domain whose account handles serve as the reputation proxy
const CODE_HOST_DOMAIN: &str = "github.com";

/// Derive a code-hosting handle from a package's metadata URLs.
///
/// Scans the homepage and project URLs in registry order and takes the path
/// segment immediately after the first occurrence of the code-hosting
/// domain. Deterministic, no I/O. Returns `None` when no URL mentions the
/// domain.
#[must_use]
pub fn extract_identity_handle(metadata: &PackageMetadata) -> Option<String> {
    metadata.candidate_urls().find_map(handle_from_url)
}

fn handle_from_url(url: &str) -> Option<String> {
    let prefix = format!("{CODE_HOST_DOMAIN}/");
    let start = url.find(&prefix)? + prefix.len();
    let segment = url[start..]
        .split(['/', '?', '#'])
        .next()
        .filter(|s| !s.is_empty())?;
    Some(segment.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata_with(home_page: Option<&str>, project_urls: &[(&str, &str)]) -> PackageMetadata {
        PackageMetadata {
            name: "demo".into(),
            home_page: home_page.map(ToString::to_string),
            project_urls: project_urls
                .iter()
                .map(|(l, u)| ((*l).to_string(), (*u).to_string()))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn extracts_from_homepage() {
        let metadata = metadata_with(Some("https://github.com/jane/demo"), &[]);
        assert_eq!(extract_identity_handle(&metadata).as_deref(), Some("jane"));
    }

    #[test]
    fn homepage_wins_over_project_urls() {
        let metadata = metadata_with(
            Some("https://github.com/first/demo"),
            &[("Source", "https://github.com/second/demo")],
        );
        assert_eq!(extract_identity_handle(&metadata).as_deref(), Some("first"));
    }

    #[test]
    fn falls_back_to_project_urls_in_order() {
        let metadata = metadata_with(
            Some("https://demo.example"),
            &[
                ("Docs", "https://demo.readthedocs.io"),
                ("Source", "https://github.com/jane/demo"),
                ("Tracker", "https://github.com/other/demo/issues"),
            ],
        );
        assert_eq!(extract_identity_handle(&metadata).as_deref(), Some("jane"));
    }

    #[test]
    fn none_when_no_code_host_url() {
        let metadata = metadata_with(Some("https://demo.example"), &[("Docs", "https://rtd.io/x")]);
        assert_eq!(extract_identity_handle(&metadata), None);
    }

    #[test]
    fn none_when_no_urls_at_all() {
        let metadata = metadata_with(None, &[]);
        assert_eq!(extract_identity_handle(&metadata), None);
    }

    #[test]
    fn bare_organization_url() {
        let metadata = metadata_with(Some("https://github.com/numpy"), &[]);
        assert_eq!(extract_identity_handle(&metadata).as_deref(), Some("numpy"));
    }

    #[test]
    fn stops_at_query_or_fragment() {
        let metadata = metadata_with(Some("https://github.com/jane?tab=repositories"), &[]);
        assert_eq!(extract_identity_handle(&metadata).as_deref(), Some("jane"));
    }

    #[test]
    fn trailing_slash_without_handle_is_skipped() {
        let metadata = metadata_with(
            Some("https://github.com/"),
            &[("Source", "https://github.com/jane/demo")],
        );
        assert_eq!(extract_identity_handle(&metadata).as_deref(), Some("jane"));
    }
}
