//! Extended URL Features
//!
//! Extra signals used by the rule-based classifier and returned by the
//! stateless prediction endpoint. They are not part of `FeatureSet`.

use serde::{Deserialize, Serialize};
use url::Url;

/// Keywords commonly seen in credential-harvesting URLs
pub const SUSPICIOUS_KEYWORDS: [&str; 6] = ["login", "verify", "account", "secure", "update", "confirm"];

/// Characters counted by `special_char_count`
pub const SPECIAL_CHARS: [char; 15] = [
    '@', '?', '-', '=', '.', '#', '%', '+', '$', '!', '*', ',', ';', '_', '&',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedFeatures {
    /// Number of `/` characters
    pub url_depth: usize,
    pub has_suspicious_keywords: bool,
    /// Length of the authority as written (userinfo, host, port), 0 when
    /// the URL has none
    pub domain_length: usize,
    pub has_numbers_in_domain: bool,
    pub has_hyphen: bool,
    pub special_char_count: usize,
}

impl ExtendedFeatures {
    pub fn extract(url: &str) -> Self {
        let domain = domain_of(url).unwrap_or_default();

        Self {
            url_depth: url.matches('/').count(),
            has_suspicious_keywords: has_suspicious_keywords(url),
            domain_length: domain.chars().count(),
            has_numbers_in_domain: domain.chars().any(|c| c.is_ascii_digit()),
            has_hyphen: url.contains('-'),
            special_char_count: url.chars().filter(|c| SPECIAL_CHARS.contains(c)).count(),
        }
    }
}

pub fn has_suspicious_keywords(url: &str) -> bool {
    let lower = url.to_lowercase();
    SUSPICIOUS_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Raw `[userinfo@]host[:port]` text of the URL, `None` when it has no
/// authority. Taken from the input, not from the parsed `Url`, so default
/// ports, userinfo and non-ASCII hosts are kept as typed.
fn domain_of(url: &str) -> Option<&str> {
    let parsed = Url::parse(url).ok()?;
    if !parsed.has_authority() {
        return None;
    }
    let (_, rest) = url.split_once("://")?;
    let end = rest
        .find(|c: char| matches!(c, '/' | '?' | '#'))
        .unwrap_or(rest.len());
    Some(&rest[..end])
}
