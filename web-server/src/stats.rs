//! Live scan counters behind `/api/stats`

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

/// Reported model accuracy (percent)
pub const MODEL_ACCURACY: f64 = 99.2;

#[derive(Debug, Default)]
pub struct ScanStats {
    urls_scanned: AtomicU64,
    threats_blocked: AtomicU64,
    total_response_ms: AtomicU64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub urls_scanned: u64,
    pub threats_blocked: u64,
    pub accuracy: f64,
    /// Seconds, one decimal
    pub avg_response_time: f64,
}

impl ScanStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, is_phishing: bool, elapsed: Duration) {
        self.urls_scanned.fetch_add(1, Ordering::Relaxed);
        if is_phishing {
            self.threats_blocked.fetch_add(1, Ordering::Relaxed);
        }
        let ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self.total_response_ms.fetch_add(ms, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let scanned = self.urls_scanned.load(Ordering::Relaxed);
        let total_ms = self.total_response_ms.load(Ordering::Relaxed);
        let avg_response_time = if scanned == 0 {
            0.0
        } else {
            (total_ms as f64 / scanned as f64 / 100.0).round() / 10.0
        };

        StatsSnapshot {
            urls_scanned: scanned,
            threats_blocked: self.threats_blocked.load(Ordering::Relaxed),
            accuracy: MODEL_ACCURACY,
            avg_response_time,
        }
    }
}
