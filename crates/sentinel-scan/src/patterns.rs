//! The dangerous-pattern table.
//!
//! Exact, case-sensitive substrings with their report descriptions. Table
//! order is part of the contract: same-line multi-matches are reported in
//! this order.

/// (pattern, description) pairs matched against every eligible source line
pub const DANGEROUS_PATTERNS: &[(&str, &str)] = &[
    ("os.system", "High-risk OS command execution"),
    ("subprocess.run", "Potential for arbitrary command execution"),
    ("eval(", "Execution of arbitrary strings as code"),
    ("exec(", "Execution of arbitrary strings as code"),
    ("pickle.load", "Potential for arbitrary code execution during deserialization"),
];

/// File extensions eligible for scanning
pub const SOURCE_EXTENSIONS: &[&str] = &["py"];

/// Path segment that marks a file as test fixture material
pub const TEST_DIR_SEGMENT: &str = "tests";
