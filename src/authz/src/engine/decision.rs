//! Authorization decision types

use crate::scope::ActionToken;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Verdict plus the rule that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Whether the request is allowed
    pub allowed: bool,

    /// Reason for the decision
    pub reason: DecisionReason,
}

impl Decision {
    /// Allow decision
    pub fn allow(reason: DecisionReason) -> Self {
        Self {
            allowed: true,
            reason,
        }
    }

    /// Deny decision
    pub fn deny(reason: DecisionReason) -> Self {
        Self {
            allowed: false,
            reason,
        }
    }
}

/// Reason for an authorization decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DecisionReason {
    /// Actor is ADMIN; nothing else was consulted
    AdminBypass,

    /// The unscoped token for the requested verb is granted
    UnscopedGrant { token: ActionToken },

    /// A scoped variant is granted and the instance qualifies
    ScopedGrant { token: ActionToken },

    /// No variant of the requested verb is granted
    NoGrant,

    /// Scoped variants are granted but the instance qualifies for none
    ScopeNotSatisfied,

    /// Resource kind outside the closed set
    UnknownResource { resource: String },

    /// Action that is not `verb[_scope]`
    UnknownAction { action: String },
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdminBypass => write!(f, "admin bypass"),
            Self::UnscopedGrant { token } => write!(f, "unscoped grant '{}'", token),
            Self::ScopedGrant { token } => write!(f, "scoped grant '{}' satisfied", token),
            Self::NoGrant => write!(f, "no grant for requested action"),
            Self::ScopeNotSatisfied => write!(f, "scoped grants not satisfied by resource"),
            Self::UnknownResource { resource } => write!(f, "unknown resource kind '{}'", resource),
            Self::UnknownAction { action } => write!(f, "unknown action '{}'", action),
        }
    }
}
