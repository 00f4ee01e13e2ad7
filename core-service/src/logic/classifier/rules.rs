//! Rule-Based Scoring Thresholds
//!
//! Constants only. Scoring lives in `classifier.rs`.

/// URLs longer than this add `LONG_URL_POINTS`
pub const LONG_URL_THRESHOLD: usize = 75;

/// More dots than this add `MANY_DOTS_POINTS`
pub const MANY_DOTS_THRESHOLD: usize = 3;

pub const LONG_URL_POINTS: u32 = 2;
pub const NO_HTTPS_POINTS: u32 = 3;
pub const IP_POINTS: u32 = 4;
pub const AT_SYMBOL_POINTS: u32 = 3;
pub const MANY_DOTS_POINTS: u32 = 2;
pub const KEYWORD_POINTS: u32 = 2;

/// Score at or above this = phishing
pub const PHISHING_SCORE_MIN: u32 = 5;

/// Upper bound of the score-derived confidence
pub const RULES_CONFIDENCE_CAP: u32 = 95;

/// Range of the mock confidence draw (`floor(random * 40) + 60`)
pub const MOCK_CONFIDENCE_SPAN: u8 = 40;
