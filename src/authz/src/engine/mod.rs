//! Decision function and engine facade
//!
//! [`evaluate`] is the pure decision function over the global permission
//! table. [`AuthzEngine`] wraps it with configuration, metrics, and
//! decision logging for request-handling code.

pub mod decision;
pub mod metrics;

pub use decision::{Decision, DecisionReason};
pub use metrics::{EngineMetrics, MetricsCollector};

use crate::policy::{GrantSet, PermissionTable};
use crate::scope::{ActionToken, ScopeResolver};
use crate::types::{AccessQuery, ResourceKind, Role};

use std::collections::BTreeMap;
use tracing::{debug, info};

/// Evaluate a query against the global permission table
///
/// 1. ADMIN is allowed unconditionally.
/// 2. Unknown resource kinds and actions are denied.
/// 3. If no variant of the requested verb is granted, deny.
/// 4. An unscoped grant of the verb allows.
/// 5. Otherwise the first scoped variant the instance satisfies allows.
///
/// The scope suffix on the requested action does not narrow the search;
/// the verb selects which grants apply.
pub fn evaluate(query: &AccessQuery) -> Decision {
    evaluate_with_table(PermissionTable::global(), query)
}

/// Evaluate a query against an explicit table
pub fn evaluate_with_table(table: &PermissionTable, query: &AccessQuery) -> Decision {
    // The only unconditional bypass in the engine.
    if query.role() == Role::Admin {
        return Decision::allow(DecisionReason::AdminBypass);
    }

    let Some(kind) = query.resource_kind() else {
        return Decision::deny(DecisionReason::UnknownResource {
            resource: query.resource().to_string(),
        });
    };

    let Some(requested) = query.action_token() else {
        return Decision::deny(DecisionReason::UnknownAction {
            action: query.action().to_string(),
        });
    };

    let grants = table.lookup(kind, query.role());
    let verb = requested.verb();

    if !grants.grants_verb(verb) {
        return Decision::deny(DecisionReason::NoGrant);
    }

    if grants.grants_unscoped(verb) {
        return Decision::allow(DecisionReason::UnscopedGrant {
            token: ActionToken::unscoped(verb),
        });
    }

    match ScopeResolver::new().first_qualifying(grants.scoped_variants(verb), query) {
        Some(token) => Decision::allow(DecisionReason::ScopedGrant { token }),
        None => Decision::deny(DecisionReason::ScopeNotSatisfied),
    }
}

/// Whether the query is allowed; fails closed on every unknown input
pub fn is_allowed(query: &AccessQuery) -> bool {
    evaluate(query).allowed
}

/// Grant set for a resource kind string and role; unknown kinds yield the empty set
pub fn lookup_grants(resource: &str, role: Role) -> &'static GrantSet {
    match resource.parse::<ResourceKind>() {
        Ok(kind) => PermissionTable::global().lookup(kind, role),
        Err(_) => GrantSet::empty(),
    }
}

/// Capability summary for a role across every resource kind
pub fn grants_for_role(role: Role) -> BTreeMap<ResourceKind, GrantSet> {
    PermissionTable::global().grants_for_role(role)
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Enable decision counters
    pub enable_metrics: bool,

    /// Log every decision at info level instead of debug
    pub trace_decisions: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enable_metrics: true,
            trace_decisions: false,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `AUTHZ_ENABLE_METRICS` and `AUTHZ_TRACE_DECISIONS`
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            enable_metrics: env_flag("AUTHZ_ENABLE_METRICS").unwrap_or(defaults.enable_metrics),
            trace_decisions: env_flag("AUTHZ_TRACE_DECISIONS").unwrap_or(defaults.trace_decisions),
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name).ok().and_then(|value| parse_flag(&value))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Authorization engine for request handlers
///
/// Cheap to construct and safe to share across threads; all state besides
/// the counters is the read-only global table.
#[derive(Debug)]
pub struct AuthzEngine {
    /// Read-only permission table
    table: &'static PermissionTable,

    /// Decision counters
    metrics: Option<MetricsCollector>,

    /// Engine configuration
    config: EngineConfig,
}

impl AuthzEngine {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with the given configuration
    pub fn with_config(config: EngineConfig) -> Self {
        let metrics = config.enable_metrics.then(MetricsCollector::new);

        info!(
            "AuthzEngine initialized with metrics={}, trace_decisions={}",
            config.enable_metrics, config.trace_decisions
        );

        Self {
            table: PermissionTable::global(),
            metrics,
            config,
        }
    }

    /// Evaluate a query, recording metrics and logging the outcome
    pub fn check(&self, query: &AccessQuery) -> Decision {
        debug!(
            "Authorization check: role={}, user={}, resource={}, action={}",
            query.role(),
            query.user_id(),
            query.resource(),
            query.action()
        );

        let decision = evaluate_with_table(self.table, query);

        if let Some(metrics) = &self.metrics {
            metrics.record_decision(&decision);
        }

        let verdict = if decision.allowed { "ALLOW" } else { "DENY" };
        if self.config.trace_decisions {
            info!(
                "Decision: {} {} on {}/{} ({})",
                verdict,
                query.user_id(),
                query.resource(),
                query.action(),
                decision.reason
            );
        } else {
            debug!("Decision: {} ({})", verdict, decision.reason);
        }

        decision
    }

    /// Boolean form of [`check`](Self::check)
    pub fn is_allowed(&self, query: &AccessQuery) -> bool {
        self.check(query).allowed
    }

    /// Grant set for a resource kind string and role
    pub fn lookup_grants(&self, resource: &str, role: Role) -> &'static GrantSet {
        match resource.parse::<ResourceKind>() {
            Ok(kind) => self.table.lookup(kind, role),
            Err(_) => GrantSet::empty(),
        }
    }

    /// Capability summary for a role
    pub fn grants_for_role(&self, role: Role) -> BTreeMap<ResourceKind, GrantSet> {
        self.table.grants_for_role(role)
    }

    /// The read-only table this engine decides against
    pub fn table(&self) -> &'static PermissionTable {
        self.table
    }

    /// Get engine metrics
    pub fn metrics(&self) -> Option<EngineMetrics> {
        self.metrics.as_ref().map(MetricsCollector::get_metrics)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl Default for AuthzEngine {
    fn default() -> Self {
        Self::new()
    }
}
