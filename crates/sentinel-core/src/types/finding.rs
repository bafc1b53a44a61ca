use serde::{Deserialize, Serialize};

/// One occurrence of a dangerous code pattern located during static
/// scanning, with file and line provenance for audit.
///
/// Findings are append-only and ordered by discovery: file iteration order,
/// then line order, then pattern-table order for same-line multi-matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanFinding {
    /// Identifier of the matched pattern (the pattern text itself)
    pub pattern_id: String,

    /// Human-readable description of the risk
    pub description: String,

    /// Path of the file inside the source distribution.
    ///
    /// Empty for synthetic advisory findings (scan degradation markers).
    #[serde(default)]
    pub file_path: String,

    /// 1-based line number of the match; 0 for synthetic advisories
    #[serde(default)]
    pub line_number: usize,

    /// Raw text of the matching line
    #[serde(default)]
    pub matched_line: String,
}

impl ScanFinding {
    /// A real pattern match with provenance
    #[must_use]
    pub fn pattern_match(
        pattern: &str,
        description: &str,
        file_path: &str,
        line_number: usize,
        matched_line: &str,
    ) -> Self {
        Self {
            pattern_id: pattern.to_string(),
            description: description.to_string(),
            file_path: file_path.to_string(),
            line_number,
            matched_line: matched_line.to_string(),
        }
    }

    /// A synthetic advisory describing why the scan degraded, so that
    /// downstream reporting can distinguish "scanned clean" from "could
    /// not scan".
    #[must_use]
    pub fn advisory(pattern_id: &str, description: &str) -> Self {
        Self {
            pattern_id: pattern_id.to_string(),
            description: description.to_string(),
            file_path: String::new(),
            line_number: 0,
            matched_line: String::new(),
        }
    }

    /// Returns true if this finding is a synthetic advisory rather than an
    /// actual pattern match
    #[must_use]
    pub fn is_advisory(&self) -> bool {
        self.file_path.is_empty()
    }
}

impl std::fmt::Display for ScanFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_advisory() {
            write!(f, "{}", self.description)
        } else {
            write!(
                f,
                "'{}' found in '{}' (line {}) - {}.",
                self.pattern_id, self.file_path, self.line_number, self.description
            )
        }
    }
}
