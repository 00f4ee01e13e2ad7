//! Lexical URL Features
//!
//! The five syntactic signals shown on the Results view. All checks are
//! plain string/regex tests on the raw input; nothing is parsed or
//! normalized, so the values describe exactly what the user typed.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Dotted-quad anywhere in the string. Octets are not range-checked.
/// `[0-9]` instead of `\d`: Rust's `\d` also matches non-ASCII digits.
static IP_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| {
    match Regex::new(r"[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}") {
        Ok(re) => Some(re),
        Err(e) => {
            log::error!("Invalid IP pattern: {}", e);
            None
        }
    }
});

/// Literal, case-sensitive secure scheme prefix
pub const HTTPS_PREFIX: &str = "https://";

/// Fixed record of syntactic signals embedded in every detection result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSet {
    /// Character count of the URL
    pub url_length: usize,
    /// Contains a dotted-quad substring
    #[serde(rename = "hasIP")]
    pub has_ip: bool,
    /// Contains `@` anywhere
    pub has_at_symbol: bool,
    /// Number of `.` characters in the whole URL (path and query included)
    pub subdomain_count: usize,
    /// Starts with `https://`
    pub https_used: bool,
}

impl FeatureSet {
    /// Extract all five signals from the raw URL string
    pub fn extract(url: &str) -> Self {
        Self {
            url_length: url_length(url),
            has_ip: has_ip(url),
            has_at_symbol: has_at_symbol(url),
            subdomain_count: dot_count(url),
            https_used: https_used(url),
        }
    }
}

pub fn url_length(url: &str) -> usize {
    url.chars().count()
}

pub fn has_ip(url: &str) -> bool {
    IP_PATTERN.as_ref().map(|re| re.is_match(url)).unwrap_or(false)
}

pub fn has_at_symbol(url: &str) -> bool {
    url.contains('@')
}

pub fn dot_count(url: &str) -> usize {
    url.matches('.').count()
}

pub fn https_used(url: &str) -> bool {
    url.starts_with(HTTPS_PREFIX)
}
