//! Archive iteration and line scanning.

use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use tar::Archive;
use tracing::{debug, warn};

use crate::patterns::{DANGEROUS_PATTERNS, SOURCE_EXTENSIONS, TEST_DIR_SEGMENT};
use sentinel_client::RegistryClient;
use sentinel_core::{PackageMetadata, PackageType, ReleaseFile, ScanFinding, SentinelError};

/// Locate the authoritative source distribution for a version.
///
/// The first source-distribution entry in the release-file list wins.
#[must_use]
pub fn locate_sdist<'a>(metadata: &'a PackageMetadata, version: &str) -> Option<&'a ReleaseFile> {
    metadata
        .release_files(version)?
        .iter()
        .find(|f| f.package_type == PackageType::SourceDist)
}

/// Scan a package's source distribution for dangerous code patterns.
///
/// Never fails the overall assessment: a missing artifact, failed download,
/// or corrupt archive degrades to a single synthetic advisory finding so
/// the calculator can still proceed and reporting can distinguish "scanned
/// clean" from "could not scan".
pub async fn scan_package(
    registry: &RegistryClient,
    metadata: &PackageMetadata,
    version: &str,
) -> Vec<ScanFinding> {
    let Some(sdist) = locate_sdist(metadata, version) else {
        debug!(package = %metadata.name, version, "no source distribution in release list");
        return vec![ScanFinding::advisory(
            "no-source-distribution",
            "Could not find source code distribution (.tar.gz) to scan.",
        )];
    };

    let bytes = match registry.download_archive(&sdist.url).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(package = %metadata.name, version, error = %e, "sdist download failed");
            return vec![ScanFinding::advisory(
                "sdist-download-failed",
                &format!("Failed to analyze source code: {e}"),
            )];
        }
    };

    match scan_archive(&bytes) {
        Ok(findings) => findings,
        Err(e) => {
            warn!(package = %metadata.name, version, error = %e, "sdist unreadable");
            vec![ScanFinding::advisory(
                "sdist-unreadable",
                &format!("Failed to analyze source code: {e}"),
            )]
        }
    }
}

/// Scan an in-memory gzip-compressed tar archive.
///
/// Findings are ordered by file iteration order, then line order, then
/// pattern-table order for same-line multi-matches.
pub fn scan_archive(tar_gz: &[u8]) -> Result<Vec<ScanFinding>, SentinelError> {
    let mut archive = Archive::new(GzDecoder::new(tar_gz));
    let mut findings = Vec::new();

    for entry in archive.entries().map_err(archive_error)? {
        let mut entry = entry.map_err(archive_error)?;
        if !entry.header().entry_type().is_file() {
            continue;
        }

        let path = entry.path().map_err(archive_error)?.into_owned();
        if !is_eligible(&path) {
            continue;
        }
        let display_path = path.to_string_lossy().into_owned();

        let mut raw = Vec::new();
        entry.read_to_end(&mut raw).map_err(archive_error)?;
        // Best-effort text decode; invalid byte sequences are replaced,
        // never fatal
        let text = String::from_utf8_lossy(&raw);

        scan_lines(&display_path, &text, &mut findings);
    }

    debug!(findings = findings.len(), "archive scan complete");
    Ok(findings)
}

/// A member is scanned only if it is a regular file with a source-code
/// extension whose path contains no test-directory segment.
fn is_eligible(path: &Path) -> bool {
    let has_source_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SOURCE_EXTENSIONS.contains(&e));
    if !has_source_extension {
        return false;
    }

    !path
        .components()
        .any(|c| c.as_os_str() == TEST_DIR_SEGMENT)
}

fn scan_lines(path: &str, text: &str, findings: &mut Vec<ScanFinding>) {
    for (index, line) in text.lines().enumerate() {
        for (pattern, description) in DANGEROUS_PATTERNS {
            if line.contains(pattern) {
                findings.push(ScanFinding::pattern_match(
                    pattern,
                    description,
                    path,
                    index + 1,
                    line,
                ));
            }
        }
    }
}

fn archive_error(e: std::io::Error) -> SentinelError {
    SentinelError::Archive(e.to_string())
}
