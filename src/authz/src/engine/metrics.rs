//! Decision counters for engine observability
//!
//! Counters are plain atomics so recording never blocks a check.

use super::decision::{Decision, DecisionReason};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Engine decision metrics snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EngineMetrics {
    /// Total number of authorization checks
    pub total_requests: u64,

    /// Number of allowed decisions
    pub allowed_decisions: u64,

    /// Number of denied decisions
    pub denied_decisions: u64,

    /// Allowed through the ADMIN bypass
    pub admin_bypasses: u64,

    /// Denied because a scoped grant was not satisfied
    pub scope_denials: u64,

    /// Denied because the resource kind or action was unrecognized
    pub unknown_inputs: u64,
}

impl EngineMetrics {
    /// Calculate allow rate
    pub fn allow_rate(&self) -> f64 {
        let total = self.allowed_decisions + self.denied_decisions;
        if total == 0 {
            0.0
        } else {
            self.allowed_decisions as f64 / total as f64
        }
    }
}

/// Lock-free metrics collector
#[derive(Debug, Default)]
pub struct MetricsCollector {
    total_requests: AtomicU64,
    allowed_decisions: AtomicU64,
    denied_decisions: AtomicU64,
    admin_bypasses: AtomicU64,
    scope_denials: AtomicU64,
    unknown_inputs: AtomicU64,
}

impl MetricsCollector {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an authorization decision
    pub fn record_decision(&self, decision: &Decision) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);

        if decision.allowed {
            self.allowed_decisions.fetch_add(1, Ordering::Relaxed);
        } else {
            self.denied_decisions.fetch_add(1, Ordering::Relaxed);
        }

        match decision.reason {
            DecisionReason::AdminBypass => {
                self.admin_bypasses.fetch_add(1, Ordering::Relaxed);
            }
            DecisionReason::ScopeNotSatisfied => {
                self.scope_denials.fetch_add(1, Ordering::Relaxed);
            }
            DecisionReason::UnknownResource { .. } | DecisionReason::UnknownAction { .. } => {
                self.unknown_inputs.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }
    }

    /// Get current metrics
    pub fn get_metrics(&self) -> EngineMetrics {
        EngineMetrics {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            allowed_decisions: self.allowed_decisions.load(Ordering::Relaxed),
            denied_decisions: self.denied_decisions.load(Ordering::Relaxed),
            admin_bypasses: self.admin_bypasses.load(Ordering::Relaxed),
            scope_denials: self.scope_denials.load(Ordering::Relaxed),
            unknown_inputs: self.unknown_inputs.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        for counter in [
            &self.total_requests,
            &self.allowed_decisions,
            &self.denied_decisions,
            &self.admin_bypasses,
            &self.scope_denials,
            &self.unknown_inputs,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_decisions() {
        let collector = MetricsCollector::new();

        collector.record_decision(&Decision::allow(DecisionReason::AdminBypass));
        collector.record_decision(&Decision::deny(DecisionReason::ScopeNotSatisfied));
        collector.record_decision(&Decision::deny(DecisionReason::UnknownAction {
            action: "archive".to_string(),
        }));

        let metrics = collector.get_metrics();
        assert_eq!(metrics.total_requests, 3);
        assert_eq!(metrics.allowed_decisions, 1);
        assert_eq!(metrics.denied_decisions, 2);
        assert_eq!(metrics.admin_bypasses, 1);
        assert_eq!(metrics.scope_denials, 1);
        assert_eq!(metrics.unknown_inputs, 1);
    }

    #[test]
    fn test_allow_rate() {
        let collector = MetricsCollector::new();
        assert_eq!(collector.get_metrics().allow_rate(), 0.0);

        collector.record_decision(&Decision::allow(DecisionReason::AdminBypass));
        collector.record_decision(&Decision::deny(DecisionReason::NoGrant));
        assert!((collector.get_metrics().allow_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset() {
        let collector = MetricsCollector::new();
        collector.record_decision(&Decision::deny(DecisionReason::NoGrant));
        collector.reset();
        assert_eq!(collector.get_metrics(), EngineMetrics::default());
    }
}
