/// Scope qualifier and action token definitions
///
/// An action token is a verb plus an optional scope qualifier. Tokens are
/// typed values; the `verb_suffix` string form only exists at the boundary.

use crate::error::{AuthzError, Result};
use crate::types::Verb;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Narrows an action to instances related to the actor in a specific way
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// `_self`: the actor is the resource owner (typically their own profile)
    #[serde(rename = "self")]
    SelfOnly,
    /// `_own`: the actor is the resource owner/reporter
    Own,
    /// `_assigned`: the actor is the resource assignee
    Assigned,
    /// `_team`: caller pre-filters to the actor's team
    Team,
    /// `_all`: caller pre-filters to everything the actor can see
    All,
    /// `_project`: caller pre-filters to the actor's projects
    Project,
}

impl Scope {
    /// Suffix match order; the first matching suffix wins when parsing.
    pub const ALL: [Scope; 6] = [
        Scope::SelfOnly,
        Scope::Own,
        Scope::Assigned,
        Scope::Team,
        Scope::All,
        Scope::Project,
    ];

    /// Token suffix including the leading underscore
    pub fn suffix(&self) -> &'static str {
        match self {
            Scope::SelfOnly => "_self",
            Scope::Own => "_own",
            Scope::Assigned => "_assigned",
            Scope::Team => "_team",
            Scope::All => "_all",
            Scope::Project => "_project",
        }
    }

    /// Whether the engine itself can decide this scope from ownership facts.
    ///
    /// Broad scopes (`_team`, `_all`, `_project`) are satisfied by their
    /// presence in the grant set; membership is the caller's filter.
    pub fn is_instance_bound(&self) -> bool {
        matches!(self, Scope::SelfOnly | Scope::Own | Scope::Assigned)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.suffix()[1..])
    }
}

/// A verb, optionally qualified by a scope
///
/// ```
/// use tracker_authz::scope::{ActionToken, Scope};
/// use tracker_authz::Verb;
///
/// let token: ActionToken = "update_assigned".parse().unwrap();
/// assert_eq!(token, ActionToken::scoped(Verb::Update, Scope::Assigned));
/// assert_eq!(token.to_string(), "update_assigned");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ActionToken {
    verb: Verb,
    scope: Option<Scope>,
}

impl ActionToken {
    /// Token that applies to any instance of the resource kind
    pub const fn unscoped(verb: Verb) -> Self {
        Self { verb, scope: None }
    }

    pub const fn scoped(verb: Verb, scope: Scope) -> Self {
        Self {
            verb,
            scope: Some(scope),
        }
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    pub fn scope(&self) -> Option<Scope> {
        self.scope
    }

    pub fn is_unscoped(&self) -> bool {
        self.scope.is_none()
    }
}

impl fmt::Display for ActionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scope {
            Some(scope) => write!(f, "{}{}", self.verb, scope.suffix()),
            None => write!(f, "{}", self.verb),
        }
    }
}

impl FromStr for ActionToken {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self> {
        for scope in Scope::ALL {
            if let Some(verb) = s.strip_suffix(scope.suffix()) {
                if let Ok(verb) = verb.parse::<Verb>() {
                    return Ok(Self::scoped(verb, scope));
                }
            }
        }

        s.parse::<Verb>()
            .map(Self::unscoped)
            .map_err(|_| AuthzError::UnknownAction(s.to_string()))
    }
}

impl From<ActionToken> for String {
    fn from(token: ActionToken) -> Self {
        token.to_string()
    }
}

impl TryFrom<String> for ActionToken {
    type Error = AuthzError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}
