//! Classifier Module
//!
//! Turns a URL into a `Verdict`. The scan controller only sees the
//! `Classifier` trait, so the mock can be swapped for a real model
//! without touching it.
//!
//! ## Structure
//! - `types`: Verdict, ClassifierKind, ClassifierError
//! - `rules`: Scoring thresholds
//! - `classifier`: Trait + mock and rule-based implementations
//! - `remote`: HTTP-backed model classifier

pub mod types;
pub mod rules;
pub mod classifier;
pub mod remote;

use std::sync::Arc;

pub use types::{ClassifierError, ClassifierKind, Verdict};
pub use classifier::{Classifier, MockRandomClassifier, RuleBasedClassifier, RuleScore};
pub use remote::{RemoteModelClassifier, RemoteModelConfig};

/// Build the classifier selected by `kind`
pub fn build_classifier(
    kind: ClassifierKind,
    remote: RemoteModelConfig,
) -> Result<Arc<dyn Classifier>, ClassifierError> {
    let classifier: Arc<dyn Classifier> = match kind {
        ClassifierKind::Mock => Arc::new(MockRandomClassifier::new()),
        ClassifierKind::Rules => Arc::new(RuleBasedClassifier::new()),
        ClassifierKind::Remote => Arc::new(RemoteModelClassifier::new(remote)?),
    };
    log::info!("Using {} classifier", classifier.name());
    Ok(classifier)
}
