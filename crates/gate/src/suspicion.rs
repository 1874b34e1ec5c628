use std::collections::HashMap;

use regex::RegexSet;

/// A named suspicion signature.
struct Signature {
    name: &'static str,
    pattern: &'static str,
}

/// Signatures tested against every inspected request. Patterns are matched
/// case-insensitively against the URL, all input keys and values, and the
/// agent string.
const SIGNATURES: &[Signature] = &[
    Signature {
        name: "sql_keyword",
        pattern: r"(?i)(union\s+select|select\s+.+\s+from\s|insert\s+into\s|drop\s+table|information_schema|sleep\s*\(|benchmark\s*\()",
    },
    Signature {
        name: "sql_quote_probe",
        pattern: r#"(?i)('\s*(or|and)\s+'?\d|--\s|%27\s*(or|and))"#,
    },
    Signature {
        name: "script_tag",
        pattern: r"(?i)(<script|javascript:|onerror\s*=|onload\s*=)",
    },
    Signature {
        name: "path_traversal",
        pattern: r"(?i)(\.\./|\.\.\\|%2e%2e%2f)",
    },
    Signature {
        name: "scanner_agent",
        pattern: r"(?i)(sqlmap|nikto|nessus|masscan|dirbuster|gobuster|wfuzz|acunetix|wpscan)",
    },
];

/// Precompiled suspicion signature set.
///
/// Compiled once at gate construction and shared for the process lifetime;
/// request content is only ever matched against, never interpolated into,
/// the patterns.
#[derive(Debug)]
pub struct SuspicionRules {
    set: RegexSet,
}

impl SuspicionRules {
    /// Compile the built-in signature set.
    #[must_use]
    pub fn new() -> Self {
        let set = RegexSet::new(SIGNATURES.iter().map(|s| s.pattern))
            .expect("built-in suspicion patterns are valid");
        Self { set }
    }

    /// Return the names of all signatures matching `text`.
    #[must_use]
    pub fn scan(&self, text: &str) -> Vec<&'static str> {
        self.set
            .matches(text)
            .into_iter()
            .map(|i| SIGNATURES[i].name)
            .collect()
    }

    /// Scan a full request surface: URL, every input key and value, and the
    /// agent string. Returns matched signature names, deduplicated, in
    /// signature order.
    #[must_use]
    pub fn scan_request(
        &self,
        url: &str,
        params: &HashMap<String, String>,
        user_agent: Option<&str>,
    ) -> Vec<&'static str> {
        let mut hit = [false; SIGNATURES.len()];

        let mut mark = |text: &str| {
            for idx in self.set.matches(text) {
                hit[idx] = true;
            }
        };

        mark(url);
        for (key, value) in params {
            mark(key);
            mark(value);
        }
        if let Some(agent) = user_agent {
            mark(agent);
        }

        hit.iter()
            .enumerate()
            .filter_map(|(i, &h)| h.then_some(SIGNATURES[i].name))
            .collect()
    }
}

impl Default for SuspicionRules {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn clean_request_matches_nothing() {
        let rules = SuspicionRules::new();
        let matched = rules.scan_request(
            "https://portal.example.com/invoices?page=2",
            &params(&[("search", "march invoices"), ("per_page", "25")]),
            Some("Mozilla/5.0 (X11; Linux x86_64)"),
        );
        assert!(matched.is_empty());
    }

    #[test]
    fn sql_keywords_in_params() {
        let rules = SuspicionRules::new();
        let matched = rules.scan_request(
            "https://portal.example.com/search",
            &params(&[("q", "1 UNION SELECT password FROM users")]),
            None,
        );
        assert!(matched.contains(&"sql_keyword"));
    }

    #[test]
    fn quote_probe_in_url() {
        let rules = SuspicionRules::new();
        let matched = rules.scan("/items?id=1' OR '1");
        assert!(matched.contains(&"sql_quote_probe"));
    }

    #[test]
    fn script_tag_in_value() {
        let rules = SuspicionRules::new();
        let matched = rules.scan_request(
            "/profile",
            &params(&[("bio", "<script>alert(1)</script>")]),
            None,
        );
        assert_eq!(matched, vec!["script_tag"]);
    }

    #[test]
    fn path_traversal_in_url() {
        let rules = SuspicionRules::new();
        let matched = rules.scan("/download?file=../../etc/passwd");
        assert!(matched.contains(&"path_traversal"));
    }

    #[test]
    fn scanner_agent_string() {
        let rules = SuspicionRules::new();
        let matched = rules.scan_request(
            "/",
            &HashMap::new(),
            Some("sqlmap/1.7#stable (https://sqlmap.org)"),
        );
        assert_eq!(matched, vec!["scanner_agent"]);
    }

    #[test]
    fn multiple_signatures_deduplicated() {
        let rules = SuspicionRules::new();
        let matched = rules.scan_request(
            "/x?a=../../one&b=../../two",
            &params(&[("c", "<script>"), ("d", "<script src=x>")]),
            None,
        );
        assert_eq!(matched, vec!["script_tag", "path_traversal"]);
    }
}
