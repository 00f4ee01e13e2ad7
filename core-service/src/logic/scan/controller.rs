//! Scan Session Controller
//!
//! Owns the in-flight flag and the current detection result.
//! At most one scan runs at a time; blank input is silently ignored.
//!
//! A scan is split in two steps so callers can observe the scanning
//! state before the simulated latency elapses:
//! `begin` (sync, claims the slot) → `run` (async, delay + classify).
//! The returned `ScanTicket` releases the slot on drop, so an abandoned
//! scan never leaves the controller stuck in "scanning".

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use thiserror::Error;

use super::result::DetectionResult;
use crate::logic::classifier::{Classifier, ClassifierError};

// ============================================================================
// OUTCOMES
// ============================================================================

/// Submission refused without any state change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScanRejection {
    #[error("URL is empty")]
    EmptyInput,
    #[error("A scan is already in progress")]
    ScanInFlight,
}

/// Scan ran but produced no result
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

#[derive(Debug, Clone)]
pub enum ScanOutcome {
    Completed(Arc<DetectionResult>),
    Rejected(ScanRejection),
    Failed(ScanError),
}

impl ScanOutcome {
    pub fn result(&self) -> Option<&Arc<DetectionResult>> {
        match self {
            ScanOutcome::Completed(result) => Some(result),
            _ => None,
        }
    }
}

// ============================================================================
// STATE
// ============================================================================

/// Point-in-time copy of the observable scan state
#[derive(Debug, Clone)]
pub struct ScanStatus {
    pub scanning: bool,
    pub current: Option<Arc<DetectionResult>>,
    pub last_error: Option<ScanError>,
}

#[derive(Debug, Default)]
struct ScanState {
    scanning: bool,
    current: Option<Arc<DetectionResult>>,
    last_error: Option<ScanError>,
    completed: u64,
}

/// Claim on the single scan slot
pub struct ScanTicket {
    url: String,
    state: Arc<Mutex<ScanState>>,
    started: Instant,
    finished: bool,
}

impl ScanTicket {
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for ScanTicket {
    fn drop(&mut self) {
        if !self.finished {
            self.state.lock().scanning = false;
            log::warn!("Scan abandoned after {:?}", self.started.elapsed());
        }
    }
}

// ============================================================================
// CONTROLLER
// ============================================================================

pub struct ScanController {
    classifier: Arc<dyn Classifier>,
    latency: Duration,
    state: Arc<Mutex<ScanState>>,
}

impl ScanController {
    pub fn new(classifier: Arc<dyn Classifier>, latency: Duration) -> Self {
        Self {
            classifier,
            latency,
            state: Arc::new(Mutex::new(ScanState::default())),
        }
    }

    /// Claim the scan slot for `raw_url`
    pub fn begin(&self, raw_url: &str) -> Result<ScanTicket, ScanRejection> {
        if raw_url.trim().is_empty() {
            log::debug!("Ignoring blank scan request");
            return Err(ScanRejection::EmptyInput);
        }

        let mut state = self.state.lock();
        if state.scanning {
            log::debug!("Ignoring scan request while another scan is in flight");
            return Err(ScanRejection::ScanInFlight);
        }
        state.scanning = true;
        state.last_error = None;

        log::info!("Scan started ({} classifier)", self.classifier.name());
        Ok(ScanTicket {
            url: raw_url.to_string(),
            state: Arc::clone(&self.state),
            started: Instant::now(),
            finished: false,
        })
    }

    /// Wait out the simulated latency, classify, and store the result
    pub async fn run(&self, ticket: ScanTicket) -> Result<Arc<DetectionResult>, ScanError> {
        self.run_with(ticket, |_| {}).await
    }

    /// `run`, calling `on_complete` while the new result is being stored.
    /// Observers going through `with_status` see the result, the cleared
    /// flag and whatever `on_complete` changed, or none of them.
    pub async fn run_with<F>(
        &self,
        mut ticket: ScanTicket,
        on_complete: F,
    ) -> Result<Arc<DetectionResult>, ScanError>
    where
        F: FnOnce(&Arc<DetectionResult>),
    {
        tokio::time::sleep(self.latency).await;
        let verdict = self.classifier.classify(&ticket.url).await;

        let mut state = ticket.state.lock();
        state.scanning = false;
        ticket.finished = true;

        match verdict {
            Ok(verdict) => {
                let result = Arc::new(DetectionResult::new(&ticket.url, verdict));
                state.current = Some(Arc::clone(&result));
                state.completed += 1;
                on_complete(&result);
                log::info!(
                    "Scan #{} finished in {:?}: {} ({}%)",
                    state.completed,
                    ticket.started.elapsed(),
                    verdict.label(),
                    verdict.confidence
                );
                Ok(result)
            }
            Err(e) => {
                log::error!("Scan failed: {}", e);
                let err = ScanError::from(e);
                state.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// `begin` + `run`
    pub async fn submit_scan(&self, raw_url: &str) -> ScanOutcome {
        let ticket = match self.begin(raw_url) {
            Ok(ticket) => ticket,
            Err(rejection) => return ScanOutcome::Rejected(rejection),
        };
        match self.run(ticket).await {
            Ok(result) => ScanOutcome::Completed(result),
            Err(e) => ScanOutcome::Failed(e),
        }
    }

    /// Run `f` against a consistent view of the scan state. The state lock
    /// is held while `f` runs; `f` must not call back into this controller.
    pub fn with_status<R>(&self, f: impl FnOnce(ScanStatus) -> R) -> R {
        let state = self.state.lock();
        f(ScanStatus {
            scanning: state.scanning,
            current: state.current.clone(),
            last_error: state.last_error.clone(),
        })
    }

    pub fn classifier_name(&self) -> &'static str {
        self.classifier.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::classifier::{MockRandomClassifier, Verdict};
    use async_trait::async_trait;

    struct FailingClassifier;

    #[async_trait]
    impl Classifier for FailingClassifier {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn classify(&self, _url: &str) -> Result<Verdict, ClassifierError> {
            Err(ClassifierError::Unavailable("model offline".to_string()))
        }
    }

    fn controller() -> ScanController {
        ScanController::new(
            Arc::new(MockRandomClassifier::seeded(3)),
            Duration::from_millis(2000),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_scan_produces_result_after_latency() {
        let ctrl = controller();
        let before = tokio::time::Instant::now();

        let outcome = ctrl.submit_scan("https://example.com").await;
        let result = outcome.result().unwrap();

        assert!(before.elapsed() >= Duration::from_millis(2000));
        assert_eq!(result.url, "https://example.com");
        assert_eq!(result.features.url_length, 19);
        assert!(!ctrl.with_status(|s| s.scanning));
        assert_eq!(ctrl.with_status(|s| s.current).unwrap().id, result.id);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_url_is_ignored() {
        let ctrl = controller();
        for blank in ["", "   ", "\t\n"] {
            let outcome = ctrl.submit_scan(blank).await;
            assert!(matches!(outcome, ScanOutcome::Rejected(ScanRejection::EmptyInput)));
        }
        assert!(!ctrl.with_status(|s| s.scanning));
        assert!(ctrl.with_status(|s| s.current).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_scan_rejected_while_pending() {
        let ctrl = controller();
        let first = ctrl.begin("https://first.test").unwrap();
        assert!(ctrl.with_status(|s| s.scanning));

        assert!(matches!(ctrl.begin("https://second.test"), Err(ScanRejection::ScanInFlight)));
        assert!(ctrl.with_status(|s| s.current).is_none());

        let result = ctrl.run(first).await.unwrap();
        assert_eq!(result.url, "https://first.test");

        // slot is free again
        let again = ctrl.begin("https://second.test");
        assert!(again.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_scan_replaces_result() {
        let ctrl = controller();
        let a = ctrl.submit_scan("https://a.test").await.result().cloned().unwrap();
        let b = ctrl.submit_scan("https://b.test").await.result().cloned().unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(ctrl.with_status(|s| s.current).unwrap().url, "https://b.test");
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_ticket_releases_slot() {
        let ctrl = controller();
        let ticket = ctrl.begin("https://example.com").unwrap();
        drop(ticket);
        assert!(!ctrl.with_status(|s| s.scanning));
        assert!(ctrl.begin("https://example.com").is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_run_releases_slot() {
        let ctrl = controller();
        let ticket = ctrl.begin("https://example.com").unwrap();

        let timed_out = tokio::time::timeout(Duration::from_millis(500), ctrl.run(ticket)).await;
        assert!(timed_out.is_err());
        assert!(!ctrl.with_status(|s| s.scanning));
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_hook_runs_once_with_stored_result() {
        let ctrl = controller();
        let ticket = ctrl.begin("https://example.com").unwrap();
        let mut seen = Vec::new();

        let result = ctrl.run_with(ticket, |r| seen.push(r.id)).await.unwrap();
        assert_eq!(seen, vec![result.id]);

        let status = ctrl.with_status(|s| s);
        assert!(!status.scanning);
        assert_eq!(status.current.map(|r| r.id), Some(result.id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_hook_skipped_on_failure() {
        let ctrl = ScanController::new(Arc::new(FailingClassifier), Duration::from_millis(10));
        let ticket = ctrl.begin("https://example.com").unwrap();
        let mut called = false;

        assert!(ctrl.run_with(ticket, |_| called = true).await.is_err());
        assert!(!called);
        assert!(ctrl.with_status(|s| s.last_error.is_some()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_classifier_failure_is_terminal_and_clears_flag() {
        let ctrl = ScanController::new(Arc::new(FailingClassifier), Duration::from_millis(10));

        let outcome = ctrl.submit_scan("https://example.com").await;
        assert!(matches!(outcome, ScanOutcome::Failed(ScanError::Classifier(ClassifierError::Unavailable(_)))));
        assert!(!ctrl.with_status(|s| s.scanning));
        assert!(ctrl.with_status(|s| s.current).is_none());
        assert!(ctrl.with_status(|s| s.last_error).is_some());
    }
}
