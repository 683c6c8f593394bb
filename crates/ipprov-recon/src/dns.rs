//! PTR response parsing and hostname suffix classification.

use ipprov_core::ProvenanceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default suffix: EC2 and other AWS reverse names.
pub const DEFAULT_SUFFIX: &str = "amazonaws.com";

/// Strip a single trailing root-label dot.
#[must_use]
pub fn normalize_hostname(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// Parse newline-delimited reverse-DNS output into hostnames.
///
/// Blank lines and `;` comment lines (resolver diagnostics) are dropped.
#[must_use]
pub fn parse_ptr_response(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(';'))
        .map(normalize_hostname)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// Domain suffix that marks a PTR name as belonging to a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SuffixRule(String);

impl SuffixRule {
    /// Build a rule, rejecting an empty suffix.
    pub fn new(suffix: &str) -> ipprov_core::Result<Self> {
        let normalized = normalize_hostname(suffix.trim());
        if normalized.is_empty() {
            return Err(ProvenanceError::InvalidSuffix(format!(
                "'{suffix}' would match every hostname"
            )));
        }
        Ok(Self(normalized.to_ascii_lowercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Plain, case-insensitive suffix match on the normalized hostname.
    #[must_use]
    pub fn matches(&self, hostname: &str) -> bool {
        let host = normalize_hostname(hostname).as_bytes();
        let suffix = self.0.as_bytes();
        host.len() >= suffix.len() && host[host.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
    }

    /// True if any of the hostnames match.
    pub fn matches_any<S: AsRef<str>>(&self, hostnames: &[S]) -> bool {
        hostnames.iter().any(|h| self.matches(h.as_ref()))
    }
}

impl Default for SuffixRule {
    fn default() -> Self {
        Self(DEFAULT_SUFFIX.to_string())
    }
}

impl TryFrom<String> for SuffixRule {
    type Error = ProvenanceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<SuffixRule> for String {
    fn from(rule: SuffixRule) -> Self {
        rule.0
    }
}

impl fmt::Display for SuffixRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
