//! Scripted chat client for unit tests.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::client::ChatClient;
use super::types::{UpstreamError, WireMessage};

/// Replays queued replies in order; once the queue is empty, answers
/// `"reply #<n>"`. Every request is recorded.
#[derive(Default)]
pub struct ScriptedChatClient {
    replies: Mutex<VecDeque<Result<String, UpstreamError>>>,
    requests: Mutex<Vec<Vec<WireMessage>>>,
    delay: Duration,
}

impl ScriptedChatClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay, ..Self::default() }
    }

    pub fn push_reply(&self, reply: Result<String, UpstreamError>) {
        self.replies.lock().push_back(reply);
    }

    pub fn requests(&self) -> Vec<Vec<WireMessage>> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl ChatClient for ScriptedChatClient {
    async fn complete(&self, messages: &[WireMessage]) -> Result<String, UpstreamError> {
        let n = {
            let mut requests = self.requests.lock();
            requests.push(messages.to_vec());
            requests.len()
        };
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(format!("reply #{}", n)))
    }
}
