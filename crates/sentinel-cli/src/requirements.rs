//! Dependency list parsing.
//!
//! One dependency per line, optional inline comment after `#`, version pins
//! (`==`, `>=`, `<=`) stripped for name extraction.

/// Extract package names from requirements-file content.
#[must_use]
pub fn parse(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                return None;
            }
            let name = line
                .split("==")
                .next()
                .unwrap_or("")
                .split(">=")
                .next()
                .unwrap_or("")
                .split("<=")
                .next()
                .unwrap_or("")
                .trim();
            (!name.is_empty()).then(|| name.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_names() {
        assert_eq!(parse("requests\nflask\n"), vec!["requests", "flask"]);
    }

    #[test]
    fn strips_version_pins() {
        let content = "requests==2.31.0\nnumpy>=1.20\npandas<=2.0.0\n";
        assert_eq!(parse(content), vec!["requests", "numpy", "pandas"]);
    }

    #[test]
    fn skips_blank_lines_and_comments() {
        let content = "\n# core deps\nrequests==2.31.0  # pinned for CVE-xxxx\n\n   \nflask\n";
        assert_eq!(parse(content), vec!["requests", "flask"]);
    }

    #[test]
    fn comment_only_line_yields_nothing() {
        assert_eq!(parse("# nothing here\n#also nothing"), Vec::<String>::new());
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert_eq!(parse(""), Vec::<String>::new());
    }
}
