//! URL Classifiers
//!
//! `Classifier` is the capability the scan controller depends on. The
//! default `MockRandomClassifier` reproduces the demo behavior (coin flip,
//! random confidence). `RuleBasedClassifier` scores the extracted features
//! deterministically.

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::rules::*;
use super::types::{ClassifierError, Verdict};
use crate::constants::CONFIDENCE_MIN;
use crate::logic::features::{extract, extract_extended};

// ============================================================================
// CAPABILITY
// ============================================================================

#[async_trait]
pub trait Classifier: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Produce a verdict for the raw URL string
    async fn classify(&self, url: &str) -> Result<Verdict, ClassifierError>;
}

// ============================================================================
// MOCK (RANDOM) CLASSIFIER
// ============================================================================

/// Verdict is a fair coin flip; confidence is uniform in 60..=99.
/// Neither depends on the URL.
pub struct MockRandomClassifier {
    rng: Mutex<StdRng>,
}

impl MockRandomClassifier {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible sequence for tests and demos
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Draw one verdict without going through the async trait
    pub fn draw(&self) -> Verdict {
        let mut rng = self.rng.lock();
        let is_phishing = rng.gen_bool(0.5);
        let confidence = rng.gen_range(0..MOCK_CONFIDENCE_SPAN) + CONFIDENCE_MIN;
        Verdict::new(is_phishing, confidence)
    }
}

impl Default for MockRandomClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Classifier for MockRandomClassifier {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn classify(&self, _url: &str) -> Result<Verdict, ClassifierError> {
        Ok(self.draw())
    }
}

// ============================================================================
// RULE-BASED CLASSIFIER
// ============================================================================

/// Score breakdown for one URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleScore {
    pub score: u32,
    pub reasons: Vec<String>,
}

/// Deterministic fallback scoring over the extracted features
#[derive(Debug, Clone, Default)]
pub struct RuleBasedClassifier;

impl RuleBasedClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn score(url: &str) -> RuleScore {
        let basic = extract(url);
        let extended = extract_extended(url);
        let mut score = 0;
        let mut reasons = Vec::new();

        if basic.url_length > LONG_URL_THRESHOLD {
            score += LONG_URL_POINTS;
            reasons.push(format!("Long URL ({} chars)", basic.url_length));
        }
        // Looser than `FeatureSet::https_used`: any `https` prefix counts
        if !url.starts_with("https") {
            score += NO_HTTPS_POINTS;
            reasons.push("No HTTPS".to_string());
        }
        if basic.has_ip {
            score += IP_POINTS;
            reasons.push("Contains IP address".to_string());
        }
        if basic.has_at_symbol {
            score += AT_SYMBOL_POINTS;
            reasons.push("Contains @ symbol".to_string());
        }
        if basic.subdomain_count > MANY_DOTS_THRESHOLD {
            score += MANY_DOTS_POINTS;
            reasons.push(format!("{} dots in URL", basic.subdomain_count));
        }
        if extended.has_suspicious_keywords {
            score += KEYWORD_POINTS;
            reasons.push("Suspicious keyword".to_string());
        }

        RuleScore { score, reasons }
    }

    pub fn verdict_for(url: &str) -> Verdict {
        let RuleScore { score, reasons } = Self::score(url);
        let is_phishing = score >= PHISHING_SCORE_MIN;

        let raw = if is_phishing {
            score * 10 + 50
        } else {
            (10u32.saturating_sub(score)) * 10 + 50
        };
        let confidence = raw.min(RULES_CONFIDENCE_CAP) as u8;

        log::debug!("Rule score {} for {}: {:?}", score, url, reasons);
        Verdict::new(is_phishing, confidence)
    }
}

#[async_trait]
impl Classifier for RuleBasedClassifier {
    fn name(&self) -> &'static str {
        "rules"
    }

    async fn classify(&self, url: &str) -> Result<Verdict, ClassifierError> {
        Ok(Self::verdict_for(url))
    }
}
