//! Metrics collection for header validation

use std::sync::atomic::{AtomicU64, Ordering};

use crate::verdict::{HeaderVerdict, RejectReason};

/// Counters for validation outcomes.
#[derive(Debug, Default)]
pub struct ValidationMetrics {
    /// Headers accepted outright
    pub headers_accepted: AtomicU64,

    /// Merge-mined headers handed back for parent-chain verification
    pub headers_deferred: AtomicU64,

    /// Headers rejected for any reason
    pub headers_rejected: AtomicU64,

    /// Rejections that can never become valid
    pub permanent_rejections: AtomicU64,

    pub bad_difficulty: AtomicU64,
    pub high_hash: AtomicU64,
    pub checkpoint_mismatches: AtomicU64,
    pub sequential_violations: AtomicU64,
}

impl ValidationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one validation.
    pub fn record_verdict(&self, verdict: &HeaderVerdict) {
        match verdict {
            HeaderVerdict::Accepted { .. } => {
                self.headers_accepted.fetch_add(1, Ordering::Relaxed);
            }
            HeaderVerdict::DeferredAuxpow { .. } => {
                self.headers_deferred.fetch_add(1, Ordering::Relaxed);
            }
            HeaderVerdict::Rejected(reason) => self.record_rejection(reason),
        }
    }

    fn record_rejection(&self, reason: &RejectReason) {
        self.headers_rejected.fetch_add(1, Ordering::Relaxed);
        if reason.is_permanent() {
            self.permanent_rejections.fetch_add(1, Ordering::Relaxed);
        }
        let counter = match reason {
            RejectReason::BadDifficulty { .. } => &self.bad_difficulty,
            RejectReason::HighHash { .. } => &self.high_hash,
            RejectReason::CheckpointMismatch { .. } => &self.checkpoint_mismatches,
            RejectReason::TooManySequential { .. } => &self.sequential_violations,
            _ => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_headers_accepted(&self) -> u64 {
        self.headers_accepted.load(Ordering::Relaxed)
    }

    pub fn get_headers_deferred(&self) -> u64 {
        self.headers_deferred.load(Ordering::Relaxed)
    }

    pub fn get_headers_rejected(&self) -> u64 {
        self.headers_rejected.load(Ordering::Relaxed)
    }

    pub fn get_permanent_rejections(&self) -> u64 {
        self.permanent_rejections.load(Ordering::Relaxed)
    }

    /// Share of validated headers that were rejected.
    pub fn get_rejection_rate(&self) -> f64 {
        let rejected = self.get_headers_rejected();
        let total = rejected + self.get_headers_accepted() + self.get_headers_deferred();
        if total == 0 {
            return 0.0;
        }
        rejected as f64 / total as f64
    }
}
