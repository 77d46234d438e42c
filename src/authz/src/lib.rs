//! # Project Tracker Authorization Engine
//!
//! Role-and-ownership authorization for a multi-tenant project tracker
//! (users, projects, sprints, issues, comments, time entries, reports,
//! settings).
//!
//! ## Features
//!
//! - **Static permission table** declared once as typed data, read-only at runtime
//! - **Typed action tokens**: a verb plus an optional scope qualifier
//!   (`_self`, `_own`, `_assigned`, `_team`, `_all`, `_project`)
//! - **Fail-closed decisions**: unknown kinds, unknown actions and missing
//!   ownership facts all deny
//! - **Lock-free**: decisions are pure functions over immutable data
//!
//! ## Example
//!
//! ```rust
//! use tracker_authz::{AccessQuery, AuthzEngine, Role};
//!
//! let engine = AuthzEngine::new();
//!
//! let query = AccessQuery::builder()
//!     .role(Role::Employee)
//!     .user_id("user-42")
//!     .resource("time_entries")
//!     .action("delete_own")
//!     .resource_owner_id("user-42")
//!     .build()
//!     .unwrap();
//!
//! let decision = engine.check(&query);
//! assert!(decision.allowed);
//! ```

pub mod types;
pub mod engine;
pub mod policy;
pub mod error;
pub mod scope;

// Re-export commonly used types
pub use types::{AccessQuery, AccessQueryBuilder, ResourceKind, Role, Verb};
pub use engine::{
    evaluate, grants_for_role, is_allowed, lookup_grants, AuthzEngine, Decision, DecisionReason,
    EngineConfig, EngineMetrics,
};
pub use policy::{GrantSet, PermissionTable};
pub use error::{AuthzError, Result};
pub use scope::{ActionToken, Scope, ScopeResolver};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
