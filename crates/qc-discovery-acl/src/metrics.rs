//! Decision counters for the discovery ACL
//!
//! Counters are lock-free and never feed back into a decision.
//!
//! ## Usage
//!
//! ```ignore
//! let metrics = Arc::new(AclMetrics::new());
//! let support = DiscoverySupport::new(verifier, evaluator, channels)
//!     .with_metrics(metrics.clone());
//!
//! support.eligible_for_service("mychannel", &signed_data)?;
//! assert_eq!(metrics.snapshot().eligibility_granted, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe decision counters.
#[derive(Debug, Default)]
pub struct AclMetrics {
    pub eligibility_granted: AtomicU64,
    pub eligibility_denied: AtomicU64,
    pub satisfaction_granted: AtomicU64,
    pub satisfaction_denied: AtomicU64,
    pub principals_resolved: AtomicU64,
    pub principals_unresolved: AtomicU64,
    pub integrity_violations: AtomicU64,
}

impl AclMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_eligibility(&self, granted: bool) {
        bump(if granted {
            &self.eligibility_granted
        } else {
            &self.eligibility_denied
        });
    }

    pub fn record_satisfaction(&self, granted: bool) {
        bump(if granted {
            &self.satisfaction_granted
        } else {
            &self.satisfaction_denied
        });
    }

    /// `resolved` is false whenever the empty organization is returned.
    pub fn record_resolution(&self, resolved: bool) {
        bump(if resolved {
            &self.principals_resolved
        } else {
            &self.principals_unresolved
        });
    }

    pub fn record_integrity_violation(&self) {
        bump(&self.integrity_violations);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> AclMetricsSnapshot {
        AclMetricsSnapshot {
            eligibility_granted: self.eligibility_granted.load(Ordering::Relaxed),
            eligibility_denied: self.eligibility_denied.load(Ordering::Relaxed),
            satisfaction_granted: self.satisfaction_granted.load(Ordering::Relaxed),
            satisfaction_denied: self.satisfaction_denied.load(Ordering::Relaxed),
            principals_resolved: self.principals_resolved.load(Ordering::Relaxed),
            principals_unresolved: self.principals_unresolved.load(Ordering::Relaxed),
            integrity_violations: self.integrity_violations.load(Ordering::Relaxed),
        }
    }
}

fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

/// Point-in-time copy of [`AclMetrics`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AclMetricsSnapshot {
    pub eligibility_granted: u64,
    pub eligibility_denied: u64,
    pub satisfaction_granted: u64,
    pub satisfaction_denied: u64,
    pub principals_resolved: u64,
    pub principals_unresolved: u64,
    pub integrity_violations: u64,
}

impl AclMetricsSnapshot {
    /// Ratio of denied eligibility checks to all eligibility checks.
    pub fn eligibility_denial_rate(&self) -> f64 {
        let total = self.eligibility_granted + self.eligibility_denied;
        if total == 0 {
            0.0
        } else {
            self.eligibility_denied as f64 / total as f64
        }
    }
}
