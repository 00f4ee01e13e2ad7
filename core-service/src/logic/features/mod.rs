//! Features Module - URL Feature Extraction
//!
//! Pure functions mapping a URL string to syntactic signals.
//! - `lexical`: the fixed five-signal `FeatureSet` carried by every result
//! - `extended`: extra signals for the rule-based classifier and `/api/predict`
//!
//! Features are display data in the default (mock) pipeline: the verdict
//! is not derived from them.

pub mod lexical;
pub mod extended;


pub use lexical::FeatureSet;
pub use extended::ExtendedFeatures;

/// Extract the fixed feature record for a URL
pub fn extract(url: &str) -> FeatureSet {
    FeatureSet::extract(url)
}

/// Extract the extended signals for a URL
pub fn extract_extended(url: &str) -> ExtendedFeatures {
    ExtendedFeatures::extract(url)
}
