//! Session registry
//!
//! One `AppSession` per browser session, keyed by id. Sessions idle past
//! the TTL are evicted whenever a new one is created.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use uuid::Uuid;

use phishguard_core::api::{AppSession, SessionConfig};

struct SessionEntry {
    session: Arc<AppSession>,
    last_seen: Instant,
}

pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
    config: SessionConfig,
    idle_ttl: Duration,
}

impl SessionRegistry {
    pub fn new(config: SessionConfig, idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            config,
            idle_ttl,
        }
    }

    pub fn create(&self) -> Arc<AppSession> {
        let evicted = self.evict_idle();
        if evicted > 0 {
            tracing::info!("Evicted {} idle sessions", evicted);
        }

        let session = Arc::new(AppSession::new(self.config.clone()));
        self.sessions.write().insert(
            session.id(),
            SessionEntry {
                session: Arc::clone(&session),
                last_seen: Instant::now(),
            },
        );
        tracing::debug!("Session created: {} ({} active)", session.id(), self.len());
        session
    }

    /// Look up a session and mark it as seen
    pub fn get(&self, id: Uuid) -> Option<Arc<AppSession>> {
        let mut sessions = self.sessions.write();
        let entry = sessions.get_mut(&id)?;
        entry.last_seen = Instant::now();
        Some(Arc::clone(&entry.session))
    }

    pub fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_seen.elapsed() < self.idle_ttl);
        before - sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::test_session_config;

    #[test]
    fn test_create_get_remove() {
        let registry = SessionRegistry::new(test_session_config(), Duration::from_secs(60));
        let session = registry.create();

        let found = registry.get(session.id()).unwrap();
        assert_eq!(found.id(), session.id());
        assert_eq!(registry.len(), 1);

        assert!(registry.remove(session.id()));
        assert!(!registry.remove(session.id()));
        assert!(registry.get(session.id()).is_none());
    }

    #[test]
    fn test_idle_sessions_evicted_on_create() {
        let registry = SessionRegistry::new(test_session_config(), Duration::ZERO);
        let first = registry.create();
        let second = registry.create();

        assert!(registry.get(first.id()).is_none());
        assert!(registry.get(second.id()).is_some());
        assert_eq!(registry.len(), 1);
    }
}
