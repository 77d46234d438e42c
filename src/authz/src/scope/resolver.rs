/// Scope resolver for ownership and assignment qualifiers
///
/// Decides whether a specific resource instance satisfies a granted token.
/// Resolution is a pure function of the token and the query's facts.

use super::types::{ActionToken, Scope};
use crate::types::AccessQuery;

/// Resolves scoped grants against the ownership facts of a query
///
/// - No scope: always qualifies
/// - `_self` / `_own`: actor must equal the resource owner
/// - `_assigned`: actor must equal the resource assignee
/// - `_team` / `_all` / `_project`: qualifies; the caller restricts the
///   instances it asks about to that breadth
///
/// A missing fact never qualifies.
///
/// # Examples
///
/// ```
/// use tracker_authz::scope::{ActionToken, Scope, ScopeResolver};
/// use tracker_authz::{AccessQuery, Role, Verb};
///
/// let resolver = ScopeResolver::new();
/// let query = AccessQuery::builder()
///     .role(Role::Employee)
///     .user_id("u1")
///     .resource("time_entries")
///     .action("delete")
///     .resource_owner_id("u1")
///     .build()
///     .unwrap();
///
/// assert!(resolver.qualifies(ActionToken::scoped(Verb::Delete, Scope::Own), &query));
/// assert!(!resolver.qualifies(ActionToken::scoped(Verb::Delete, Scope::Assigned), &query));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopeResolver;

impl ScopeResolver {
    pub fn new() -> Self {
        Self
    }

    /// Checks whether the query's resource instance satisfies `token`
    pub fn qualifies(&self, token: ActionToken, query: &AccessQuery) -> bool {
        match token.scope() {
            None => true,
            Some(scope) => self.scope_qualifies(scope, query),
        }
    }

    /// Checks a bare scope qualifier against the query's facts
    pub fn scope_qualifies(&self, scope: Scope, query: &AccessQuery) -> bool {
        match scope {
            Scope::SelfOnly | Scope::Own => is_actor(query.user_id(), query.resource_owner_id()),
            Scope::Assigned => is_actor(query.user_id(), query.resource_assignee_id()),
            Scope::Team | Scope::All | Scope::Project => true,
        }
    }

    /// Returns the first token in `tokens` the instance satisfies
    pub fn first_qualifying<I>(&self, tokens: I, query: &AccessQuery) -> Option<ActionToken>
    where
        I: IntoIterator<Item = ActionToken>,
    {
        tokens.into_iter().find(|token| self.qualifies(*token, query))
    }
}

fn is_actor(actor: &str, fact: Option<&str>) -> bool {
    fact.is_some_and(|id| id == actor)
}
