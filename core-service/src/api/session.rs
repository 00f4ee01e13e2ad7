//! Session Facade
//!
//! One owned store per browser session: page router, scan controller and
//! chat assistant wired together. View renderers (or the HTTP layer) send
//! intents here and read back a `SessionSnapshot`.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use uuid::Uuid;

use crate::logic::chat::{ChatAssistant, ChatClient, ChatRejection, ChatSnapshot, TurnOutcome};
use crate::logic::classifier::Classifier;
use crate::logic::explain::{self, FeatureInsight, InsightStatus};
use crate::logic::router::{Page, PageRouter};
use crate::logic::scan::{DetectionResult, ScanController, ScanOutcome, ScanRejection, ScanTicket};

/// Collaborators injected into every new session
#[derive(Clone)]
pub struct SessionConfig {
    pub classifier: Arc<dyn Classifier>,
    pub chat_client: Arc<dyn ChatClient>,
    pub scan_latency: Duration,
}

/// Everything a renderer needs, in one serializable value
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub page: Page,
    /// Page actually rendered; `None` for Results without a result
    pub view: Option<Page>,
    pub nav_highlight: Page,
    /// Name of the classifier behind this session
    pub classifier: &'static str,
    pub scanning: bool,
    pub result: Option<DetectionResult>,
    pub insights: Vec<FeatureInsight>,
    pub overall: Option<InsightStatus>,
    pub scan_error: Option<String>,
    pub chat: ChatSnapshot,
}

pub struct AppSession {
    id: Uuid,
    router: Mutex<PageRouter>,
    scanner: ScanController,
    chat: ChatAssistant,
}

impl AppSession {
    pub fn new(config: SessionConfig) -> Self {
        let id = Uuid::new_v4();
        log::debug!("Session {} created ({} classifier)", id, config.classifier.name());

        Self {
            id,
            router: Mutex::new(PageRouter::new()),
            scanner: ScanController::new(config.classifier, config.scan_latency),
            chat: ChatAssistant::new(config.chat_client),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    // ========================================================================
    // NAVIGATION
    // ========================================================================

    pub fn navigate(&self, page: Page) -> Page {
        self.router.lock().navigate(page)
    }

    /// Back to Home; the stored result stays for the chat assistant
    pub fn new_scan(&self) -> Page {
        self.router.lock().new_scan()
    }

    // ========================================================================
    // SCANNING
    // ========================================================================

    /// Claim the scan slot. The caller observes `scanning == true` until
    /// the ticket is passed to `finish_scan` (or dropped).
    pub fn begin_scan(&self, url: &str) -> Result<ScanTicket, ScanRejection> {
        self.scanner.begin(url)
    }

    /// Run a claimed scan to completion. On success the router moves to
    /// Results together with storing the result, and the assistant explains
    /// the new result before this returns.
    pub async fn finish_scan(&self, ticket: ScanTicket) -> ScanOutcome {
        log::debug!("Session {} scanning {}", self.id, ticket.url());
        let routed = self.scanner.run_with(ticket, |_| {
            self.router.lock().on_scan_complete();
        });

        match routed.await {
            Ok(result) => {
                self.chat.notify(Arc::clone(&result)).await;
                ScanOutcome::Completed(result)
            }
            Err(e) => ScanOutcome::Failed(e),
        }
    }

    pub async fn submit_scan(&self, url: &str) -> ScanOutcome {
        match self.begin_scan(url) {
            Ok(ticket) => self.finish_scan(ticket).await,
            Err(rejection) => ScanOutcome::Rejected(rejection),
        }
    }

    // ========================================================================
    // CHAT
    // ========================================================================

    /// Send `text`, or the pending draft when `text` is `None`
    pub async fn send_chat_message(&self, text: Option<&str>) -> Result<TurnOutcome, ChatRejection> {
        match text {
            Some(text) => self.chat.send_user_message(text).await,
            None => {
                let draft = self.chat.draft();
                self.chat.send_user_message(&draft).await
            }
        }
    }

    pub fn toggle_chat(&self) -> bool {
        self.chat.toggle_open()
    }

    pub fn set_chat_draft(&self, text: impl Into<String>) {
        self.chat.set_draft(text);
    }

    // ========================================================================
    // SNAPSHOT
    // ========================================================================

    pub fn snapshot(&self) -> SessionSnapshot {
        // Scan state, then router: the same lock order as `finish_scan`
        let (status, page, view) = self.scanner.with_status(|status| {
            let router = self.router.lock();
            let page = router.current();
            let view = router.resolve(status.current.as_deref());
            (status, page, view)
        });
        let result = status.current;

        let insights = result
            .as_ref()
            .map(|r| explain::assess(&r.features))
            .unwrap_or_default();
        let overall = (!insights.is_empty()).then(|| explain::overall_status(&insights));

        SessionSnapshot {
            id: self.id,
            page,
            view,
            nav_highlight: page.nav_highlight(),
            classifier: self.scanner.classifier_name(),
            scanning: status.scanning,
            result: result.map(|r| (*r).clone()),
            insights,
            overall,
            scan_error: status.last_error.map(|e| e.to_string()),
            chat: self.chat.snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::chat::testing::ScriptedChatClient;
    use crate::logic::chat::{ChatMessage, ChatPhase, UpstreamError};
    use crate::logic::classifier::{ClassifierError, MockRandomClassifier, Verdict};
    use crate::logic::features::FeatureSet;
    use crate::logic::scan::ScanError;
    use async_trait::async_trait;

    struct OfflineClassifier;

    #[async_trait]
    impl Classifier for OfflineClassifier {
        fn name(&self) -> &'static str {
            "offline"
        }

        async fn classify(&self, _url: &str) -> Result<Verdict, ClassifierError> {
            Err(ClassifierError::Unavailable("model offline".to_string()))
        }
    }

    fn session_with(classifier: Arc<dyn Classifier>, chat: Arc<ScriptedChatClient>) -> AppSession {
        AppSession::new(SessionConfig {
            classifier,
            chat_client: chat,
            scan_latency: Duration::from_millis(2000),
        })
    }

    fn session(chat: Arc<ScriptedChatClient>) -> AppSession {
        session_with(Arc::new(MockRandomClassifier::seeded(11)), chat)
    }

    #[test]
    fn test_initial_snapshot() {
        let s = session(Arc::new(ScriptedChatClient::new()));
        let snap = s.snapshot();
        assert_eq!(snap.page, Page::Home);
        assert_eq!(snap.view, Some(Page::Home));
        assert!(!snap.scanning);
        assert!(snap.result.is_none());
        assert!(snap.insights.is_empty());
        assert!(snap.overall.is_none());
        assert!(!snap.chat.is_open);
        assert_eq!(snap.chat.phase, ChatPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_example_com_end_to_end() {
        let chat = Arc::new(ScriptedChatClient::new());
        chat.push_reply(Ok("### 🔍 Scan Result".to_string()));
        let s = session(chat.clone());

        let started = tokio::time::Instant::now();
        let outcome = s.submit_scan("https://example.com").await;
        assert!(outcome.result().is_some());
        assert!(started.elapsed() >= Duration::from_millis(2000));

        let snap = s.snapshot();
        assert_eq!(snap.page, Page::Results);
        assert_eq!(snap.view, Some(Page::Results));
        assert_eq!(snap.nav_highlight, Page::Home);
        assert!(!snap.scanning);

        let result = snap.result.unwrap();
        assert_eq!(
            result.features,
            FeatureSet {
                url_length: 19,
                has_ip: false,
                has_at_symbol: false,
                subdomain_count: 1,
                https_used: true,
            }
        );
        assert!((60..=99).contains(&result.confidence));
        assert_eq!(snap.insights.len(), 5);

        assert!(snap.chat.is_open);
        assert!(!snap.chat.is_busy);
        assert_eq!(snap.chat.transcript, vec![ChatMessage::assistant("### 🔍 Scan Result")]);
        assert_eq!(chat.requests().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_scanning_visible_before_latency_elapses() {
        let s = Arc::new(session(Arc::new(ScriptedChatClient::new())));
        let ticket = s.begin_scan("https://example.com").unwrap();
        assert!(s.snapshot().scanning);
        assert_eq!(s.snapshot().page, Page::Home);

        assert!(matches!(s.begin_scan("https://other.test"), Err(ScanRejection::ScanInFlight)));

        let runner = Arc::clone(&s);
        let handle = tokio::spawn(async move { runner.finish_scan(ticket).await });
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(s.snapshot().scanning);

        handle.await.unwrap();
        let snap = s.snapshot();
        assert!(!snap.scanning);
        assert_eq!(snap.page, Page::Results);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_result_and_results_page_appear_together() {
        let s = Arc::new(AppSession::new(SessionConfig {
            classifier: Arc::new(MockRandomClassifier::seeded(5)),
            chat_client: Arc::new(ScriptedChatClient::new()),
            scan_latency: Duration::from_millis(20),
        }));

        let ticket = s.begin_scan("https://example.com").unwrap();
        let runner = Arc::clone(&s);
        let handle = tokio::spawn(async move { runner.finish_scan(ticket).await });

        while !handle.is_finished() {
            let snap = s.snapshot();
            if snap.result.is_some() {
                assert!(!snap.scanning);
                assert_eq!(snap.page, Page::Results);
            } else {
                assert!(snap.scanning);
                assert_eq!(snap.page, Page::Home);
            }
            tokio::task::yield_now().await;
        }
        assert!(handle.await.unwrap().result().is_some());
    }

    #[test]
    fn test_snapshot_names_classifier() {
        let s = session(Arc::new(ScriptedChatClient::new()));
        assert_eq!(s.snapshot().classifier, "mock");
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_url_leaves_state_untouched() {
        let chat = Arc::new(ScriptedChatClient::new());
        let s = session(chat.clone());
        let outcome = s.submit_scan("   ").await;
        assert!(matches!(outcome, ScanOutcome::Rejected(ScanRejection::EmptyInput)));

        let snap = s.snapshot();
        assert_eq!(snap.page, Page::Home);
        assert!(snap.result.is_none());
        assert!(chat.requests().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_scan_keeps_page_result_and_chat() {
        let chat = Arc::new(ScriptedChatClient::new());
        let s = session_with(Arc::new(OfflineClassifier), chat.clone());

        let outcome = s.submit_scan("https://example.com").await;
        assert!(matches!(outcome, ScanOutcome::Failed(ScanError::Classifier(_))));

        let snap = s.snapshot();
        assert_eq!(snap.page, Page::Home);
        assert!(!snap.scanning);
        assert!(snap.result.is_none());
        assert!(snap.scan_error.unwrap().contains("model offline"));
        assert!(snap.chat.transcript.is_empty());
        assert!(chat.requests().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_scan_keeps_result_and_transcript() {
        let s = session(Arc::new(ScriptedChatClient::new()));
        s.submit_scan("https://example.com").await;

        assert_eq!(s.new_scan(), Page::Home);
        let snap = s.snapshot();
        assert!(snap.result.is_some());
        assert_eq!(snap.chat.transcript.len(), 1);

        // navigating back shows the same result without a new explanation
        s.navigate(Page::Results);
        assert_eq!(s.snapshot().view, Some(Page::Results));
        assert_eq!(s.snapshot().chat.transcript.len(), 1);
    }

    #[test]
    fn test_results_without_result_is_not_rendered() {
        let s = session(Arc::new(ScriptedChatClient::new()));
        s.navigate(Page::Results);
        let snap = s.snapshot();
        assert_eq!(snap.page, Page::Results);
        assert_eq!(snap.view, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_chat_message_falls_back_to_draft() {
        let chat = Arc::new(ScriptedChatClient::new());
        let s = session(chat.clone());
        s.submit_scan("https://example.com").await;

        s.set_chat_draft("is this link safe?");
        assert_eq!(s.send_chat_message(None).await, Ok(TurnOutcome::Applied));

        let snap = s.snapshot();
        assert_eq!(snap.chat.draft, "");
        assert_eq!(snap.chat.transcript.len(), 3);
        assert_eq!(snap.chat.transcript[1], ChatMessage::user("is this link safe?"));

        assert_eq!(s.send_chat_message(None).await, Err(ChatRejection::EmptyInput));
    }

    #[tokio::test(start_paused = true)]
    async fn test_chat_failure_surfaces_in_transcript() {
        let chat = Arc::new(ScriptedChatClient::new());
        chat.push_reply(Err(UpstreamError::NotConfigured));
        let s = session(chat);

        s.submit_scan("https://example.com").await;
        let snap = s.snapshot();
        assert!(snap.chat.is_open);
        assert!(!snap.chat.is_busy);
        assert_eq!(snap.chat.transcript.len(), 1);
        assert!(snap.chat.transcript[0].text.starts_with("⚠️"));
    }

    #[test]
    fn test_toggle_chat() {
        let s = session(Arc::new(ScriptedChatClient::new()));
        assert!(s.toggle_chat());
        assert!(!s.toggle_chat());
    }
}
